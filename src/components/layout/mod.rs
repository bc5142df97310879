//! Layout Components
//!
//! Shell and header around the roster page.

pub mod header;
pub mod shell;

pub use header::Header;
pub use shell::Shell;
