//! Command line interface

pub mod commands;
pub mod display;
pub mod pod;

pub use self::commands::{CliArgs, Commands};
