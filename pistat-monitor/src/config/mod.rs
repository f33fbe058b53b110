//! Configuration loading
//!
//! Loads the TOML configuration from disk, falling back to built-in defaults.

pub mod loader;

pub use loader::load;
