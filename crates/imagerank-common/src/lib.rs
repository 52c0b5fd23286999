//! Imagerank-Common: Shared types and errors.
//!
//! This crate provides the vocabulary used across imagerank:
//!
//! - **Core Types**: Vote directions, listing entries and object pages
//! - **Error Handling**: A single error type with HTTP status mapping
//!
//! # Examples
//!
//! ```
//! use imagerank_common::{Error, Result, VoteDirection};
//!
//! let direction: VoteDirection = "up".parse().unwrap();
//! assert_eq!(direction.delta(), 1);
//!
//! fn example() -> Result<()> {
//!     Err(Error::validation("image_key is required"))
//! }
//! assert_eq!(example().unwrap_err().http_status(), 400);
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
