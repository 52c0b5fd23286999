//! Imagerank - vote on images stored in object storage
//!
//! This library crate exposes the core functionality for integration testing.

pub mod aws;
pub mod config;
pub mod scores;
pub mod server;
pub mod storage;
pub mod voting;
