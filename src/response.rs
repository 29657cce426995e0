//! Standard response envelope: `{"message", "details"}` plus fixed CORS headers.

use crate::error::ApiError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `Access-Control-Allow-Methods` value, scoped to the responding endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllowedMethods {
    Create,
    List,
}

impl AllowedMethods {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllowedMethods::Create => "OPTIONS,POST",
            AllowedMethods::List => "OPTIONS,GET",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnvelopeBody {
    pub message: String,
    pub details: serde_json::Value,
}

#[derive(Clone, Debug)]
pub struct Envelope {
    pub status: StatusCode,
    pub methods: AllowedMethods,
    pub body: EnvelopeBody,
}

/// HTTP-shaped proxy response: status, headers, and the body as a JSON string.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn build<T: Serialize>(
    status: StatusCode,
    message: impl Into<String>,
    details: T,
    methods: AllowedMethods,
) -> Envelope {
    Envelope {
        status,
        methods,
        body: EnvelopeBody {
            message: message.into(),
            details: serde_json::to_value(details).unwrap_or(serde_json::Value::Null),
        },
    }
}

pub fn from_error(err: &ApiError, methods: AllowedMethods) -> Envelope {
    build(err.status(), err.message(), err.details(), methods)
}

impl Envelope {
    pub fn headers(&self) -> [(&'static str, &'static str); 4] {
        [
            ("Content-Type", "application/json"),
            ("Access-Control-Allow-Headers", "Content-Type"),
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", self.methods.as_str()),
        ]
    }

    pub fn into_proxy_response(self) -> ProxyResponse {
        let headers = self
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ProxyResponse {
            status_code: self.status.as_u16(),
            headers,
            body: serde_json::to_string(&self.body).unwrap_or_default(),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let methods = self.methods.as_str();
        let mut response = (self.status, Json(self.body)).into_response();
        let map = response.headers_mut();
        map.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        map.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );
        map.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        map.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(methods));
        response
    }
}
