//! Yeedu Core
//!
//! Core types shared by the Yeedu job client and runner.
//!
//! This crate contains:
//! - Domain types: job identifiers, job statuses, log types, status check outcomes
//!   and the terminal-state policy table
//! - DTOs: request and response bodies of the Yeedu Spark job API
//!
//! Note: HTTP transport lives in `yeedu-client`, polling logic in `yeedu-runner`.

pub mod domain;
pub mod dto;
