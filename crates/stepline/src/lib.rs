//! Command-line front end for `stepline-core`.

pub mod cli;
pub mod config;
