/// # Config
/// Behaviors the original hardware documentation leaves ambiguous, chosen once
/// when the machine is built.
///
/// The defaults match the classic interpreter behavior: unknown opcodes are
/// skipped, sprites wrap around the display edges and `FX1E` never touches VF.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub unknown_opcode: UnknownOpcodePolicy,
    pub sprite_bounds: SpriteBounds,
    pub index_overflow: IndexOverflow,
    /// Copy the hex digit sprites into the reserved region on construction
    pub preload_font: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            unknown_opcode: UnknownOpcodePolicy::Skip,
            sprite_bounds: SpriteBounds::Wrap,
            index_overflow: IndexOverflow::Wrap,
            preload_font: true,
        }
    }
}

/// What to do with an opcode that doesn't decode to any instruction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnknownOpcodePolicy {
    /// Log a warning and move on to the next instruction
    Skip,
    /// Stop the cycle with `Chip8Error::UnknownOpcode`
    Fail,
}

/// How `DXYN` treats pixels that land past the right or bottom edge
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteBounds {
    /// Coordinates are taken modulo the display size
    Wrap,
    /// Pixels past the edges are dropped
    Clip,
    /// The whole draw is rejected with `Chip8Error::SpriteOutOfBounds`
    Fault,
}

/// Whether `FX1E` reports I leaving the 12-bit address space in VF
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexOverflow {
    /// I wraps at 16 bits; VF is untouched
    Wrap,
    /// I wraps at 16 bits; VF = 1 if I + Vx > 0xFFF, else 0
    SetFlag,
}

impl std::str::FromStr for SpriteBounds {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wrap" => Ok(SpriteBounds::Wrap),
            "clip" => Ok(SpriteBounds::Clip),
            "fault" => Ok(SpriteBounds::Fault),
            other => Err(format!("unknown sprite bounds mode '{}'", other)),
        }
    }
}
