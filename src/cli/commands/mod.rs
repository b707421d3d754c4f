//! Command implementations for the git-sniffer CLI

pub mod check;
pub mod config;
pub mod install;
pub mod uninstall;
