//! # ResearchDesk CLI
//!
//! Administration commands for the navigation permission table. The binary
//! parses arguments and prompts; everything that touches the table lives in
//! [`commands`] so it can run against any store backend.

pub mod commands;
