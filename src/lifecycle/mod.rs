//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Compile engine → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     ctrl-c or test trigger → broadcast → stop accepting → drain → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
