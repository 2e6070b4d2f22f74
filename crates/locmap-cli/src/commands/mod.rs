//! Command implementations for the locmap CLI
//!
//! Each command lives in its own submodule.

mod config;
mod enumerate;
mod localize;

pub use config::{execute as show_config, print_path as show_config_path};
pub use enumerate::execute as enumerate;
pub use localize::execute as localize_path;
