//! LibraryHub application library
//!
//! Catalog, session and admin modules plus the bootstrap that wires them into
//! the HTTP server.

pub mod bootstrap;
pub mod library;
pub mod modules;
pub mod utils;

pub use library::{Library, SharedLibrary};
