use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};

use crate::config::Config;
use crate::cpu::Cpu;
use crate::display::{Display, FrameBuffer};
use crate::error::Result;
use crate::memory::Memory;
use crate::timer::DelayTimer;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns:
///  - the `cpu` and its registers, stack and timers
///  - the `memory` the ROM is loaded into
///  - the `display` draw instructions write to
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time, or until told to stop
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    cpu: Cpu,
    memory: Memory,
    display: Display,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut memory = Memory::new();
        if config.preload_font {
            memory.load_font();
        }
        debug!("created machine with {:?}", config);
        Chip8 {
            cpu: Cpu::new(config),
            memory,
            display: Display::new(),
        }
    }

    /// Load a rom image into program memory
    ///
    /// # Arguments
    /// * `image` the ROM contents; at most 0xE00 bytes
    pub fn load_rom(&mut self, image: &[u8]) -> Result<()> {
        self.memory.load(image)
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        self.memory.load_from(reader)
    }

    /// Advances the CPU by a single cycle
    /// - does nothing if awaiting a keypress
    /// - gets and executes the opcode pointed at by the pc
    pub fn step(&mut self) -> Result<()> {
        if self.cpu.waiting_for_key().is_some() {
            return Ok(());
        }
        let op = self.memory.fetch_instruction(self.cpu.pc())?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.cpu.registers(),
            self.cpu.i(),
            self.cpu.pc()
        );
        self.cpu.execute(op, &mut self.memory, &mut self.display)
    }

    /// Steps until `stop` is set or a cycle fails.
    /// `stop` is checked once before every cycle.
    ///
    /// Returns the number of cycles run. Nothing else feeds keys on this
    /// thread, so a ROM waiting on FX0A spins until stopped.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<u64> {
        let mut cycles = 0;
        while !stop.load(Ordering::Relaxed) {
            self.step()?;
            cycles += 1;
        }
        debug!("stopped after {} cycles", cycles);
        Ok(cycles)
    }

    /// Decrements the delay and sound timers; a host calls this at 60Hz
    pub fn tick_timers(&mut self) {
        self.cpu.tick_timers();
    }

    /// A handle on the delay timer for hosts that tick it from another thread
    pub fn delay_timer(&self) -> DelayTimer {
        self.cpu.delay_timer().clone()
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&self) -> Option<&FrameBuffer> {
        self.display.frame()
    }

    /// Tells the machine the current frame has been drawn
    pub fn acknowledge_frame(&mut self) {
        self.display.acknowledge();
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.cpu.key_press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.cpu.key_release(key);
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn display(&self) -> &Display {
        &self.display
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FONT_ADDR, SPRITE_SHEET};

    #[test]
    fn test_chip8_steps_from_program_start() {
        let mut chip8 = Chip8::new();
        chip8.load_rom(&[0x6A, 0x08]).unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.cpu().v(0xA), 0x08);
        assert_eq!(chip8.cpu().pc(), 0x202);
    }

    #[test]
    fn test_preloads_font_by_default() {
        let chip8 = Chip8::new();
        assert_eq!(chip8.memory().read(FONT_ADDR, 80).unwrap(), &SPRITE_SHEET[..]);
    }

    #[test]
    fn test_font_can_be_left_out() {
        let chip8 = Chip8::with_config(Config {
            preload_font: false,
            ..Config::default()
        });
        assert!(chip8.memory().as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_doesnt_cycle_while_register_needs_key() {
        let mut chip8 = Chip8::new();
        chip8.load_rom(&[0xF1, 0x0A, 0x61, 0x05]).unwrap();
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.cpu().pc(), 0x202);
        assert_eq!(chip8.cpu().v(0x1), 0x0);

        chip8.key_press(0xC);
        assert_eq!(chip8.cpu().v(0x1), 0xC);
        chip8.step().unwrap();
        assert_eq!(chip8.cpu().v(0x1), 0x5);
    }

    #[test]
    fn test_run_returns_immediately_when_stopped() {
        let mut chip8 = Chip8::new();
        let stop = AtomicBool::new(true);
        assert_eq!(chip8.run(&stop).unwrap(), 0);
        assert_eq!(chip8.cpu().pc(), 0x200);
    }

    #[test]
    fn test_run_stops_on_error() {
        let mut chip8 = Chip8::new();
        // return with an empty stack
        chip8.load_rom(&[0x60, 0x01, 0x00, 0xEE]).unwrap();
        let stop = AtomicBool::new(false);
        assert!(chip8.run(&stop).is_err());
        assert_eq!(chip8.cpu().pc(), 0x202);
    }

    #[test]
    fn test_timers_tick_through_handle() {
        let mut chip8 = Chip8::new();
        chip8.load_rom(&[0x60, 0x03, 0xF0, 0x15]).unwrap();
        chip8.step().unwrap();
        chip8.step().unwrap();
        chip8.tick_timers();
        let handle = chip8.delay_timer();
        handle.tick();
        assert_eq!(chip8.cpu().delay_timer().get(), 1);
    }

    #[test]
    fn test_frame_hand_off() {
        let mut chip8 = Chip8::new();
        assert!(chip8.get_frame().is_none());
        chip8.load_rom(&[0x00, 0xE0]).unwrap();
        chip8.step().unwrap();
        assert!(chip8.get_frame().is_some());
        chip8.acknowledge_frame();
        assert!(chip8.get_frame().is_none());
    }
}
