//! Current record analyzer CLI library.
//!
//! This crate provides the CLI interface for the current record analyzer.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, InstantArgs, WindowArgs};
pub use config::{Config, DisplayZone};
