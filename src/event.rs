//! HTTP-shaped request event handed to the handlers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub request_context: RequestContext,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    #[serde(default)]
    pub domain_name: String,
    #[serde(default)]
    pub path: String,
}

impl ApiEvent {
    /// `https://{domainName}{path}`: the base of `next_page` links.
    pub fn endpoint_url(&self) -> String {
        format!(
            "https://{}{}",
            self.request_context.domain_name, self.request_context.path
        )
    }

    pub fn is_method(&self, method: &str) -> bool {
        self.http_method.eq_ignore_ascii_case(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_proxy_event_json() {
        let event: ApiEvent = serde_json::from_str(
            r#"{
                "httpMethod": "GET",
                "queryStringParameters": {"title": "abcd"},
                "requestContext": {"domainName": "abc.execute-api.eu-west-1.amazonaws.com", "path": "/prod/announcements"}
            }"#,
        )
        .unwrap();
        assert!(event.is_method("get"));
        assert!(event.body.is_none());
        assert_eq!(
            event.endpoint_url(),
            "https://abc.execute-api.eu-west-1.amazonaws.com/prod/announcements"
        );
        assert_eq!(event.query_string_parameters.unwrap()["title"], "abcd");
    }

    #[test]
    fn null_query_parameters_are_none() {
        let event: ApiEvent =
            serde_json::from_str(r#"{"httpMethod": "POST", "queryStringParameters": null, "body": "{}"}"#)
                .unwrap();
        assert!(event.query_string_parameters.is_none());
        assert_eq!(event.body.as_deref(), Some("{}"));
    }
}
