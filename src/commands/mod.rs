//! CLI commands

pub mod build;
pub mod clean;
pub mod list;
pub mod serve;
pub mod show;
