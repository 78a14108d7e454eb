//! connstr CLI - Command-line interface for inspecting connection strings.
//!
//! This crate provides the `connstr` tool, which parses connection strings
//! with a chosen dialect, prints their pairs, normalizes them and strips
//! secrets before they end up in logs or tickets.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
