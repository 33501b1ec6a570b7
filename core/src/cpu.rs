use log::warn;

use crate::config::{Config, UnknownOpcodePolicy};
use crate::constants::{INSTRUCTION_SIZE, PROGRAM_START, STACK_DEPTH};
use crate::display::Display;
use crate::error::{Chip8Error, Result};
use crate::instruction::from_op;
use crate::memory::Memory;
use crate::timer::DelayTimer;

/// Where the program counter goes once an instruction has executed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    /// PC += 2
    Next,
    /// PC += 4
    Skip,
    /// PC = addr
    Jump(u16),
}

/// # Chip-8 CPU
///
/// ## Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry and collision flag
/// - (i) a 16-bit memory address register
///
/// ## Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// ## Stack
/// - 16 return addresses and an 8-bit stack pointer (0..=16)
///
/// ## Timers
/// - 2 8-bit timers (delay & sound), decremented by the host at 60Hz
///
/// ## Input
/// - the pressed status of keys 0..F, fed by the host
/// - emulation halts while FX0A waits for a key to be written to some register
///
/// All state starts zeroed and is only changed by `execute`, apart from the
/// host-driven keys and timer ticks.
pub struct Cpu {
    pub(crate) v: [u8; 16],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) stack: [u16; STACK_DEPTH],
    pub(crate) sp: u8,
    pub(crate) delay_timer: DelayTimer,
    pub(crate) sound_timer: u8,
    pub(crate) keys: [bool; 16],
    pub(crate) waiting_for_key: Option<usize>,
    pub(crate) config: Config,
}

impl Cpu {
    pub fn new(config: Config) -> Self {
        Cpu {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: 0,
            delay_timer: DelayTimer::new(),
            sound_timer: 0,
            keys: [false; 16],
            waiting_for_key: None,
            config,
        }
    }

    /// Decode and execute a single instruction.
    ///
    /// On success the program counter points at the next instruction to fetch.
    /// On failure nothing about the CPU, memory or display has changed.
    ///
    /// # Arguments
    /// * `op` the raw instruction fetched from `memory` at the current pc
    /// * `memory` the address space sprites and register dumps are read from and written to
    /// * `display` the frame buffer draw instructions write to
    pub fn execute(&mut self, op: u16, memory: &mut Memory, display: &mut Display) -> Result<()> {
        let flow = match from_op(&op) {
            Some(operation) => operation(&op, self, memory, display)?,
            None => match self.config.unknown_opcode {
                UnknownOpcodePolicy::Skip => {
                    warn!("opcode {:04X} at {:04X} is not implemented", op, self.pc);
                    Flow::Next
                }
                UnknownOpcodePolicy::Fail => {
                    return Err(Chip8Error::UnknownOpcode {
                        opcode: op,
                        pc: self.pc,
                    })
                }
            },
        };

        self.pc = match flow {
            Flow::Next => self.pc.wrapping_add(INSTRUCTION_SIZE),
            Flow::Skip => self.pc.wrapping_add(2 * INSTRUCTION_SIZE),
            Flow::Jump(addr) => addr,
        };
        Ok(())
    }

    /// Set the pressed status of key; a pending FX0A receives it
    ///
    /// # Arguments
    /// * `key` the hex keypad key, 0x0..=0xF
    pub fn key_press(&mut self, key: u8) {
        if let Some(pressed) = self.keys.get_mut(key as usize) {
            *pressed = true;
            if let Some(register) = self.waiting_for_key.take() {
                self.v[register] = key;
            }
        }
    }

    /// Unset the pressed status of key
    pub fn key_release(&mut self, key: u8) {
        if let Some(pressed) = self.keys.get_mut(key as usize) {
            *pressed = false;
        }
    }

    /// Decrement both timers by one, stopping at 0
    pub fn tick_timers(&mut self) {
        self.delay_timer.tick();
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn v(&self, x: usize) -> u8 {
        self.v[x]
    }

    pub fn registers(&self) -> &[u8; 16] {
        &self.v
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn stack(&self) -> &[u16; STACK_DEPTH] {
        &self.stack
    }

    pub fn delay_timer(&self) -> &DelayTimer {
        &self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// The register FX0A is waiting to fill, if any
    pub fn waiting_for_key(&self) -> Option<usize> {
        self.waiting_for_key
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
