use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// # Delay timer
/// An 8-bit counter that a host decrements at 60Hz until it reaches 0.
///
/// Clones share the same value so a separate timing thread can tick it while
/// the CPU reads and writes it through FX07 / FX15.
#[derive(Clone, Debug, Default)]
pub struct DelayTimer(Arc<AtomicU8>);

impl DelayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u8 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, value: u8) {
        self.0.store(value, Ordering::SeqCst)
    }

    /// Decrement by one, stopping at 0
    pub fn tick(&self) {
        // Err means the timer already sat at 0
        let _ = self
            .0
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| t.checked_sub(1));
    }
}
