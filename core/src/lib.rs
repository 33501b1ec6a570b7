pub use chip8::Chip8;
pub use config::{Config, IndexOverflow, SpriteBounds, UnknownOpcodePolicy};
pub use constants::{CLOCK_SPEED, TIMER_HZ};
pub use cpu::{Cpu, Flow};
pub use display::{Display, FrameBuffer};
pub use error::{Chip8Error, Result};
pub use memory::Memory;
pub use timer::DelayTimer;

mod chip8;
pub mod config;
pub mod constants;
mod cpu;
mod display;
mod error;
mod instruction;
mod memory;
pub mod opcode;
mod operations;
mod timer;
