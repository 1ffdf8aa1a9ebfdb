//! Subcommand implementations.

pub mod index;
pub mod init;
pub mod lint;
pub mod output;
pub mod rules;
