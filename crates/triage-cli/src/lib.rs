//! Triage CLI library.
//!
//! This crate provides the command-line interface for tallying classified
//! issues and distributing them across team rosters.

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
