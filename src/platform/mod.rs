//! Platform-specific tool conventions.

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

/// Re-export platform-specific items for the current platform.
#[cfg(unix)]
pub use unix::*;

#[cfg(windows)]
pub use windows::*;
