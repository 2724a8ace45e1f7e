//! Utility modules for the shiori CLI

pub mod cli_args;
pub mod logging;
pub mod titles;
