// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Search and pagination parameters for service listings.

use crate::db::{Filter, Page};
use crate::models::fields;
use serde::Deserialize;

/// Query string of `/services` and `/services-count`.
///
/// Values are kept as raw strings: anything that does not parse as an
/// unsigned integer is treated as absent rather than rejected.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Items per page
    pub size: Option<String>,
    /// Page number (1-indexed)
    pub page: Option<String>,
    /// Case-insensitive substring of `serviceName`
    pub search: Option<String>,
}

fn parse_number(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse().ok())
}

impl ListQuery {
    /// Filter matching services whose name contains the search term.
    /// An absent or empty term matches everything.
    pub fn search_filter(&self) -> Filter {
        match self.search.as_deref() {
            Some(term) if !term.is_empty() => Filter::ContainsIgnoreCase {
                field: fields::SERVICE_NAME,
                needle: term.to_string(),
            },
            _ => Filter::All,
        }
    }

    /// Offset window, present only when both `size` and `page` are given.
    pub fn page(&self) -> Option<Page> {
        let size = parse_number(self.size.as_deref())?;
        let page = parse_number(self.page.as_deref())?;
        Some(Page {
            skip: page.saturating_sub(1).saturating_mul(size),
            limit: size,
        })
    }
}
