//! The tools module provides helper functions for huffpack.
//!
//! The tools are:
//! - cli: Command line interface and the options struct every operation runs from.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod cli;
pub mod freq_count;
