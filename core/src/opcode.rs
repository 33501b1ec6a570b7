/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored most significant byte first. Their behavior is
/// selected by some combination of:
/// - `(n, _, _, _)` the instruction class; applies to all opcodes
/// - `(_, _, _, n)` the operation within classes 0x5, 0x8 and 0x9
/// - `(_, _, n, n)` the operation within classes 0x0, 0xE and 0xF
///
/// Nibbles not used to select the operation carry its operands, following the
/// layouts `_XYN`, `_XNN` and `_NNN`.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` an immediate byte assigned to or compared with Vx
/// - `(_, n, _, _)` the register Vx, or the last register of the range V0..=Vx
/// - `(_, _, n, _)` the register Vy
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[x___]`
    fn class(&self) -> u8;

    /// `[_X__]`
    fn x(&self) -> usize;

    /// `[__Y_]`
    fn y(&self) -> usize;

    /// `[___N]`
    fn n(&self) -> u8;

    /// `[__NN]`
    fn nn(&self) -> u8;

    /// `[_NNN]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.class(), self.x() as u8, self.y() as u8, self.n())
    }

    fn class(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> usize {
        ((self & 0x0F00) >> 8) as usize
    }

    fn y(&self) -> usize {
        ((self & 0x00F0) >> 4) as usize
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
