//! File, command-line and progress boundaries around the mosaic core

/// Command-line parsing and run orchestration
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Library directory scanning and loading
pub mod discovery;
/// Error types
pub mod error;
/// Image decoding, output naming and encoding
pub mod image;
/// Progress bars for pipeline stages
pub mod progress;
