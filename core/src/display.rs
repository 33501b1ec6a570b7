use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display
/// The Chip-8 display is 64x32 black/white pixels stored as 1/0 cells.
///
/// Draw instructions set the dirty flag; only the renderer clears it, once it
/// has consumed the frame via `acknowledge`.
pub struct Display {
    frame_buffer: FrameBuffer,
    dirty: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XOR the pixel at (x, y) with 1.
    /// Returns true if the pixel was on beforehand, i.e. the draw collided.
    ///
    /// Callers resolve coordinates against the display bounds first.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let cell = &mut self.frame_buffer[y][x];
        let collided = *cell == 1;
        *cell ^= 1;
        collided
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn frame(&self) -> Option<&FrameBuffer> {
        if self.dirty {
            Some(&self.frame_buffer)
        } else {
            None
        }
    }

    /// Called by the renderer once it has drawn the current frame
    pub fn acknowledge(&mut self) {
        self.dirty = false;
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame_buffer[y][x]
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_display_is_blank_and_clean() {
        let display = Display::new();
        assert!(!display.is_dirty());
        assert!(display.frame().is_none());
        assert!(display.frame_buffer().iter().flatten().all(|&p| p == 0));
    }

    #[test]
    fn test_toggle_reports_collision() {
        let mut display = Display::new();
        assert!(!display.toggle(3, 4));
        assert_eq!(display.pixel(3, 4), 1);
        assert!(display.toggle(3, 4));
        assert_eq!(display.pixel(3, 4), 0);
    }

    #[test]
    fn test_clear_marks_dirty() {
        let mut display = Display::new();
        display.toggle(0, 0);
        display.clear();
        assert_eq!(display.pixel(0, 0), 0);
        assert!(display.is_dirty());
    }

    #[test]
    fn test_only_acknowledge_clears_dirty() {
        let mut display = Display::new();
        display.mark_dirty();
        assert!(display.frame().is_some());
        // reading the frame doesn't consume it
        assert!(display.frame().is_some());
        display.acknowledge();
        assert!(display.frame().is_none());
    }
}
