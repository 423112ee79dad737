//! Request DTOs for the entry server API
//!
//! Defines the query parameters accepted by the listing endpoint.

use serde::Deserialize;

use crate::pagination::{Pagination, MAX_LIMIT};

/// Query string for `GET /entries`.
///
/// Parameters arrive as raw strings so malformed numbers can be reported
/// with a JSON body. Empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEntriesParams {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub offset: Option<String>,
}

impl ListEntriesParams {
    /// Validates the parameters into a pagination window.
    ///
    /// Every invalid parameter contributes one message, in query order.
    pub fn validate(&self) -> Result<Pagination, Vec<String>> {
        let mut errors = Vec::new();

        let limit = present(&self.limit).and_then(|raw| match raw.parse::<usize>() {
            Ok(limit) if (1..=MAX_LIMIT).contains(&limit) => Some(limit),
            _ => {
                errors.push(format!("Limit must be between 1 and {MAX_LIMIT}"));
                None
            }
        });

        let offset = present(&self.offset).and_then(|raw| match raw.parse::<usize>() {
            Ok(offset) => Some(offset),
            Err(_) => {
                errors.push("Offset must be a non-negative number".to_string());
                None
            }
        });

        if errors.is_empty() {
            Ok(Pagination::new(limit, offset))
        } else {
            Err(errors)
        }
    }
}

fn present(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
