//! matpack CLI library.
//!
//! The binary in `main.rs` parses arguments and dispatches into
//! [`commands`]; everything testable lives here.

pub mod commands;
pub mod input;
