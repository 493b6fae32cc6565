//! Collaborators around the assembly engine
//!
//! This module contains everything outside the core algorithm:
//! - Command-line parsing and run orchestration
//! - Tile discovery, ordering and decoding
//! - Mosaic export
//! - Progress display and error types

/// Command-line arguments and the mosaic job runner
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Compressed grayscale TIFF export
pub mod image;
/// Progress display while tiles load
pub mod progress;
/// Tile discovery, ordering, decoding and downsampling
pub mod source;
