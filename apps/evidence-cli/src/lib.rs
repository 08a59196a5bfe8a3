//! Command-line front end for evidence region resolution

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command};
pub use config::Config;
