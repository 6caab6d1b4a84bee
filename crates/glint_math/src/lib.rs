// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod interval;
pub use interval::Interval;
