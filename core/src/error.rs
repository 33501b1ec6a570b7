use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Everything that can stop a ROM from loading or a cycle from completing.
///
/// Load errors surface before any execution begins; the rest are faults of the
/// cycle that raised them and leave the machine as it was before that cycle.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), at most {capacity} bytes fit in program memory")]
    ImageTooLarge { size: usize, capacity: usize },

    #[error("memory access out of range at address {address:#06X}")]
    AddressOutOfRange { address: usize },

    #[error("stack overflow: call at {pc:#06X} with every stack slot in use")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#06X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("unknown opcode {opcode:#06X} at {pc:#06X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("sprite pixel ({x}, {y}) lies outside the display")]
    SpriteOutOfBounds { x: usize, y: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
