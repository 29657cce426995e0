//! `/announcements`: translates HTTP requests into `ApiEvent`s for the handlers.
//! GET lists; every other verb goes to the create handler, which answers 405 unless POST.

use crate::error::{ApiError, FieldError, ValidationError};
use crate::event::{ApiEvent, RequestContext};
use crate::handlers::{add_announcement, list_announcements};
use crate::response::{from_error, AllowedMethods, Envelope};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, OriginalUri, State},
    http::{header, HeaderMap, Method},
    routing::any,
    Router,
};
use std::collections::HashMap;

async fn announcements(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    OriginalUri(uri): OriginalUri,
    body: Result<Bytes, BytesRejection>,
) -> Envelope {
    let methods = if method == Method::GET {
        AllowedMethods::List
    } else {
        AllowedMethods::Create
    };
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::info!(status = %rejection.status(), "request body rejected");
            let err = ApiError::Body {
                status: rejection.status(),
                reason: rejection.body_text(),
            };
            return from_error(&err, methods);
        }
    };
    // Only the list endpoint reads query parameters.
    let query_string_parameters = match (method == Method::GET, uri.query()) {
        (true, Some(q)) => match serde_urlencoded::from_str::<HashMap<String, String>>(q) {
            Ok(params) => Some(params),
            Err(e) => {
                let err = ApiError::pagination(ValidationError {
                    errors: vec![FieldError::new("query", e.to_string())],
                });
                return from_error(&err, methods);
            }
        },
        _ => None,
    };
    let domain_name = state
        .config
        .public_host
        .clone()
        .or_else(|| {
            headers
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "localhost".into());
    let event = ApiEvent {
        http_method: method.as_str().to_string(),
        body: (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned()),
        query_string_parameters,
        request_context: RequestContext {
            domain_name,
            path: uri.path().to_string(),
        },
    };
    tracing::debug!(method = %event.http_method, path = %event.request_context.path, "announcement request");
    if method == Method::GET {
        list_announcements(state.store.as_ref(), &event).await
    } else {
        add_announcement(state.store.as_ref(), &event).await
    }
}

pub fn announcement_routes(state: AppState) -> Router {
    let limit = state.config.body_limit;
    Router::new()
        .route("/announcements", any(announcements))
        .layer(DefaultBodyLimit::max(limit))
        .with_state(state)
}
