//! Pagination cursor carried in the `next_page` URL query string.

use crate::error::ValidationError;
use crate::model::{PageCursor, PrimaryKey};
use crate::service::validation::RequestValidator;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize)]
struct CursorQuery<'a> {
    title: &'a str,
    #[serde(rename = "date-time")]
    date_time: &'a str,
    #[serde(rename = "next-page-number")]
    next_page_number: u32,
}

/// Build the URL of the page after `current_page`, resuming after `last_key`.
/// Values are form-urlencoded, so the `+00:00` offset survives decoding.
pub fn encode(last_key: &PrimaryKey, current_page: u32, base_url: &str) -> String {
    let query = CursorQuery {
        title: &last_key.title,
        date_time: &last_key.date_time,
        next_page_number: current_page.saturating_add(1),
    };
    // Serializing a flat struct of strings and integers cannot fail.
    let qs = serde_urlencoded::to_string(&query).unwrap_or_default();
    let sep = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base_url, sep, qs)
}

/// `None` means the first page; any parameter present requests a cursor page.
pub fn decode(params: Option<&HashMap<String, String>>) -> Result<Option<PageCursor>, ValidationError> {
    match params {
        None => Ok(None),
        Some(p) if p.is_empty() => Ok(None),
        Some(p) => RequestValidator::validate_pagination(p).map(Some),
    }
}
