//! Create and list handlers. Each call is one stateless pass:
//! validate, one store call, build the envelope.

use crate::error::{ApiError, FieldError, ValidationError};
use crate::event::ApiEvent;
use crate::model::{Announcement, ListPage};
use crate::response::{build, from_error, AllowedMethods, Envelope};
use crate::service::{cursor, RequestValidator};
use crate::store::AnnouncementStore;
use axum::http::StatusCode;
use serde_json::Value;

pub const CREATED_MESSAGE: &str = "Added a new announcement";
pub const LISTED_MESSAGE: &str = "OK";

/// POST: validate the body, insert, and echo the stored item.
pub async fn add_announcement(store: &dyn AnnouncementStore, event: &ApiEvent) -> Envelope {
    match create(store, event).await {
        Ok(item) => {
            tracing::info!(title = %item.title, date_time = %item.date_time, "announcement added");
            build(StatusCode::CREATED, CREATED_MESSAGE, item, AllowedMethods::Create)
        }
        Err(e) => {
            tracing::info!(status = e.status().as_u16(), error = %e, "create rejected");
            from_error(&e, AllowedMethods::Create)
        }
    }
}

/// GET: one page of the table, plus a `next_page` link while more remain.
pub async fn list_announcements(store: &dyn AnnouncementStore, event: &ApiEvent) -> Envelope {
    match list(store, event).await {
        Ok(page) => {
            tracing::info!(
                page = page.page,
                count = page.announcements.len(),
                more = page.next_page.is_some(),
                "announcements listed"
            );
            build(StatusCode::OK, LISTED_MESSAGE, page, AllowedMethods::List)
        }
        Err(e) => {
            tracing::info!(status = e.status().as_u16(), error = %e, "list rejected");
            from_error(&e, AllowedMethods::List)
        }
    }
}

async fn create(store: &dyn AnnouncementStore, event: &ApiEvent) -> Result<Announcement, ApiError> {
    if !event.is_method("POST") {
        return Err(ApiError::MethodNotAllowed(event.http_method.clone()));
    }
    let payload = parse_body(event.body.as_deref()).map_err(ApiError::create_payload)?;
    let new = RequestValidator::validate_create(&payload).map_err(ApiError::create_payload)?;
    Ok(store.insert(new).await?)
}

async fn list(store: &dyn AnnouncementStore, event: &ApiEvent) -> Result<ListPage, ApiError> {
    if !event.is_method("GET") {
        return Err(ApiError::MethodNotAllowed(event.http_method.clone()));
    }
    let cursor = cursor::decode(event.query_string_parameters.as_ref()).map_err(ApiError::pagination)?;
    let page_number = cursor.as_ref().map(|c| c.next_page_number).unwrap_or(1);
    let scanned = store.scan(cursor.as_ref()).await?;
    let next_page = scanned
        .last_key
        .as_ref()
        .map(|key| cursor::encode(key, page_number, &event.endpoint_url()));
    Ok(ListPage {
        page: page_number,
        announcements: scanned.items,
        next_page,
    })
}

fn parse_body(body: Option<&str>) -> Result<Value, ValidationError> {
    let raw = body.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| ValidationError {
        errors: vec![FieldError::new("body", "is required")],
    })?;
    serde_json::from_str(raw).map_err(|e| ValidationError {
        errors: vec![FieldError::new("body", format!("must be valid JSON: {}", e))],
    })
}
