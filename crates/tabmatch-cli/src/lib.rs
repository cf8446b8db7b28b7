//! CLI library components for tabmatch.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod prompt;
pub mod summary;
