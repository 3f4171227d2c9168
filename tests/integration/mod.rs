//! Integration tests for forum-smoke
//!
//! Each test drives the harness against a wiremock backend standing in for
//! the forum API.

pub mod executor;
pub mod pipeline;
