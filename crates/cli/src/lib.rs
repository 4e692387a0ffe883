//! Library side of the `wafermap` binary.
//!
//! Every subcommand body lives here (under [`commands`]) so integration
//! tests can drive them directly without spawning the binary.

pub mod commands;
