//! CLI subcommand implementations.

pub mod charge;
pub mod convert;
pub mod info;
pub mod util;
pub mod value;
