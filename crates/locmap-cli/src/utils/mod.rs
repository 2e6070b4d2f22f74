//! Shared helpers for the locmap CLI

pub mod cli_args;
pub mod logging;
