//! Core types shared across imagerank.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Score change applied by this vote.
    pub fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl FromStr for VoteDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(Error::validation(format!(
                "unknown vote direction '{other}', expected 'up' or 'down'"
            ))),
        }
    }
}

/// One row of the listing: an image, where to fetch it, and its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Object key in the image store.
    pub key: String,
    /// Time-limited access URL for the object.
    pub url: String,
    /// Current score, 0 when no record exists.
    pub score: i64,
}

/// One page of object keys from the image store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectPage {
    /// Keys on this page, in store enumeration order.
    pub keys: Vec<String>,
    /// Token for the next page, `None` on the last page.
    pub next_continuation: Option<String>,
}
