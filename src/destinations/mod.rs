//! Destination implementations

pub mod console;
pub mod file;
pub mod memory;

#[cfg(all(unix, feature = "syslog"))]
pub mod syslog;

pub use console::ConsoleDestination;
pub use file::FileDestination;
pub use memory::MemoryDestination;

#[cfg(all(unix, feature = "syslog"))]
pub use syslog::SyslogDestination;

pub use crate::core::Destination;
