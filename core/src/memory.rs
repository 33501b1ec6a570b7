use std::io::Read;

use log::debug;

use crate::constants::{FONT_ADDR, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};

/// # Memory
/// The full 4096 byte address space.
///
/// - 0x000 - 0x1FF is reserved for the interpreter and never executed
///     - optionally holds the hex digit sprite sheet at 0x050
/// - 0x200 - 0xFFF holds the loaded ROM
///
/// Every access is bounds-checked; reading or writing past the end of memory
/// is reported as `Chip8Error::AddressOutOfRange` rather than wrapping.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: [0; MEMORY_SIZE],
        }
    }

    /// Copy a ROM image into program memory.
    ///
    /// The size is checked before anything is written, so a rejected image
    /// leaves memory untouched.
    ///
    /// # Arguments
    /// * `image` the raw ROM contents
    pub fn load(&mut self, image: &[u8]) -> Result<()> {
        if image.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::ImageTooLarge {
                size: image.len(),
                capacity: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + image.len()].copy_from_slice(image);
        debug!("loaded {} byte ROM at {:#06X}", image.len(), start);
        Ok(())
    }

    /// Read a whole ROM from `reader` and load it.
    ///
    /// # Arguments
    /// * `reader` a source that contains a ROM
    pub fn load_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut image = Vec::with_capacity(MAX_ROM_SIZE);
        reader.read_to_end(&mut image)?;
        self.load(&image)
    }

    /// Write the hex digit sprites into the reserved region at `FONT_ADDR`
    pub fn load_font(&mut self) {
        let start = FONT_ADDR as usize;
        self.bytes[start..start + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }

    /// Gets the opcode at `pc`.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch_instruction(&self, pc: u16) -> Result<u16> {
        let word = self.read(pc, 2)?;
        Ok(u16::from(word[0]) << 8 | u16::from(word[1]))
    }

    pub fn read_byte(&self, addr: u16) -> Result<u8> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Chip8Error::AddressOutOfRange {
                address: addr as usize,
            })
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<()> {
        let cell = self
            .bytes
            .get_mut(addr as usize)
            .ok_or(Chip8Error::AddressOutOfRange {
                address: addr as usize,
            })?;
        *cell = value;
        Ok(())
    }

    /// Borrow `len` bytes starting at `addr`
    pub fn read(&self, addr: u16, len: usize) -> Result<&[u8]> {
        let range = Self::range(addr, len)?;
        Ok(&self.bytes[range])
    }

    /// Overwrite memory starting at `addr` with `data`; nothing is written if
    /// any part of the range is out of bounds
    pub fn write(&mut self, addr: u16, data: &[u8]) -> Result<()> {
        let range = Self::range(addr, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn range(addr: u16, len: usize) -> Result<std::ops::Range<usize>> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            // report the first byte that doesn't exist
            return Err(Chip8Error::AddressOutOfRange {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed() {
        let memory = Memory::new();
        assert!(memory.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_places_image_at_program_start() {
        let mut memory = Memory::new();
        memory.load(b"12345").unwrap();
        assert_eq!(memory.read(0x200, 5).unwrap(), b"12345");
        // the reserved region is left alone
        assert!(memory.as_slice()[..0x200].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_exactly_fills_program_memory() {
        let mut memory = Memory::new();
        let image = vec![0xAB; MAX_ROM_SIZE];
        memory.load(&image).unwrap();
        assert_eq!(memory.read_byte(0xFFF).unwrap(), 0xAB);
    }

    #[test]
    fn test_load_too_large_is_rejected_untouched() {
        let mut memory = Memory::new();
        let image = vec![0xAB; MAX_ROM_SIZE + 1];
        match memory.load(&image) {
            Err(Chip8Error::ImageTooLarge { size, capacity }) => {
                assert_eq!(size, 0xE01);
                assert_eq!(capacity, 0xE00);
            }
            other => panic!("expected ImageTooLarge, got {:?}", other),
        }
        assert!(memory.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_load_from_reader() {
        let mut memory = Memory::new();
        let mut rom: &[u8] = &[0x00, 0xE0];
        memory.load_from(&mut rom).unwrap();
        assert_eq!(memory.fetch_instruction(0x200).unwrap(), 0x00E0);
    }

    #[test]
    fn test_load_font() {
        let mut memory = Memory::new();
        memory.load_font();
        assert_eq!(memory.read(FONT_ADDR, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(memory.read_byte(FONT_ADDR + 79).unwrap(), 0x80);
    }

    #[test]
    fn test_fetch_is_big_endian() {
        let mut memory = Memory::new();
        memory.write(0x200, &[0xAA, 0xBB]).unwrap();
        assert_eq!(memory.fetch_instruction(0x200).unwrap(), 0xAABB);
    }

    #[test]
    fn test_fetch_past_end_fails() {
        let memory = Memory::new();
        assert!(memory.fetch_instruction(0xFFE).is_ok());
        match memory.fetch_instruction(0xFFF) {
            Err(Chip8Error::AddressOutOfRange { address }) => assert_eq!(address, 0x1000),
            other => panic!("expected AddressOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_access_bounds() {
        let mut memory = Memory::new();
        memory.write_byte(0xFFF, 0x7).unwrap();
        assert_eq!(memory.read_byte(0xFFF).unwrap(), 0x7);
        assert!(memory.read_byte(0x1000).is_err());
        assert!(memory.write_byte(0x1000, 0x1).is_err());
    }

    #[test]
    fn test_partial_write_out_of_range_writes_nothing() {
        let mut memory = Memory::new();
        assert!(memory.write(0xFFE, &[1, 2, 3]).is_err());
        assert_eq!(memory.read(0xFFE, 2).unwrap(), &[0, 0]);
    }
}
