//! # Common Components
//!
//! Plumbing shared by the codec and the binaries.
//!
//! ## Modules
//!
//! - [`pixels`]: The raw sample array the codec works on
//! - [`image_io`]: Image files and bytes to and from pixel arrays
//! - [`text_file`]: Message files as raw bytes
//! - [`config`]: TOML configuration
//! - [`logging`]: Logger setup for the binaries
//! - [`error`]: Error type shared by everything above

pub mod config;
pub mod error;
pub mod image_io;
pub mod logging;
pub mod pixels;
pub mod text_file;
