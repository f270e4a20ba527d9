//! Frame counting utilities
//!
//! Every timeout in the impact protocol is measured in frames, never in
//! wall-clock time. [`FrameClock`] is the counter embedders advance once per
//! simulation step and read when stamping paint requests.

/// Monotonic frame counter
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    frame: u64,
}

impl FrameClock {
    /// Create a clock at frame zero
    pub fn new() -> Self {
        Self { frame: 0 }
    }

    /// Call once per simulation step
    pub fn tick(&mut self) {
        self.frame += 1;
    }

    /// Current frame number
    pub fn frame(&self) -> u64 {
        self.frame
    }
}
