/// Size of the addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// 0x000 - 0x1FF is reserved for the interpreter; ROMs are loaded at 0x200
pub const PROGRAM_START: u16 = 0x200;

/// The largest ROM that fits between PROGRAM_START and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of return addresses the call stack can hold
pub const STACK_DEPTH: usize = 16;

/// VF doubles as the carry, borrow and collision flag
pub const FLAG: usize = 0xF;

/// Every instruction is two bytes wide
pub const INSTRUCTION_SIZE: u16 = 0x2;

/// Default number of instructions executed per second by a host loop
pub const CLOCK_SPEED: u32 = 500;

/// Rate at which a host should tick the delay and sound timers
pub const TIMER_HZ: u32 = 60;

/// Where the hex digit sprites live inside the reserved region
pub const FONT_ADDR: u16 = 0x050;

/// Each hex digit sprite is 5 rows tall
pub const FONT_SPRITE_SIZE: u16 = 5;

/// # Sprite sheet
/// Sprites for the hex digits 0..F, 4 pixels wide and 5 rows tall.
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
