//! Logging infrastructure for structured console output.
//!
//! Library code logs through plain [`tracing`] macros; the binary installs
//! the subscriber from [`init_subscriber`].

mod subscriber;

pub use subscriber::init_subscriber;

/// Target for stage headers (`==> ...` on the console).
pub const STAGE_TARGET: &str = "hwconfig::stage";
