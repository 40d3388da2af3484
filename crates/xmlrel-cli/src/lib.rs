//! Library side of the `xmlrel` binary, split out so commands can be tested

pub mod cli;
pub mod commands;
pub mod factories;
pub mod logging;
