//! CLI subcommand implementations.

pub mod alarm;
pub mod common;
pub mod config;
pub mod evaluate;
pub mod prefs;
pub mod track;
