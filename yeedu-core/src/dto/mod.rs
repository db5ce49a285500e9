//! Data transfer objects
//!
//! Request and response bodies exchanged with the Yeedu Spark job API.

pub mod job;
