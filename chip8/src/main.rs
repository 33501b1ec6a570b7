use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use chippy_core::{Config, IndexOverflow, SpriteBounds, UnknownOpcodePolicy, CLOCK_SPEED};
use chippy_renderer::DEFAULT_SCALE;

mod keymap;
mod run;

#[derive(Parser, Debug)]
#[command(name = "chippy")]
#[command(about = "A CHIP-8 interpreter", long_about = None)]
struct Args {
    /// Path to the ROM to run
    rom: PathBuf,

    /// Stop at the first opcode that isn't implemented instead of skipping it
    #[arg(long)]
    strict: bool,

    /// What happens to sprite pixels past the display edges: wrap, clip or fault
    #[arg(long, default_value = "wrap")]
    sprite_bounds: SpriteBounds,

    /// Set VF when FX1E moves I past 0xFFF
    #[arg(long)]
    index_overflow_flag: bool,

    /// Leave the hex digit sprites out of the reserved memory region
    #[arg(long)]
    no_font: bool,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_SPEED, value_parser = clap::value_parser!(u32).range(1..))]
    clock_hz: u32,

    /// Size multiplier for each pixel
    #[arg(long, default_value_t = DEFAULT_SCALE, value_parser = clap::value_parser!(u32).range(1..))]
    scale: u32,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            unknown_opcode: if self.strict {
                UnknownOpcodePolicy::Fail
            } else {
                UnknownOpcodePolicy::Skip
            },
            sprite_bounds: self.sprite_bounds,
            index_overflow: if self.index_overflow_flag {
                IndexOverflow::SetFlag
            } else {
                IndexOverflow::Wrap
            },
            preload_font: !self.no_font,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new().with_level(args.log_level).init()?;

    run::run(run::Settings {
        config: args.config(),
        rom: args.rom,
        clock_hz: args.clock_hz,
        scale: args.scale,
    })
}
