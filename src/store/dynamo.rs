//! DynamoDB-backed announcement table keyed by `(title, date-time)`.

use crate::error::StoreError;
use crate::model::{Announcement, NewAnnouncement, PageCursor, PrimaryKey, ScanPage};
use crate::store::AnnouncementStore;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::Utc;
use std::collections::HashMap;

pub const TITLE_ATTR: &str = "title";
pub const DATE_TIME_ATTR: &str = "date-time";
pub const DESCRIPTION_ATTR: &str = "description";

type Item = HashMap<String, AttributeValue>;

#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
    page_size: Option<i32>,
}

impl DynamoStore {
    pub fn new(client: Client, table_name: impl Into<String>, page_size: Option<i32>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            page_size,
        }
    }

    /// Build a client from the default AWS provider chain (env, profile, IMDS).
    pub async fn from_env(table_name: impl Into<String>, page_size: Option<i32>) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(Client::new(&sdk_config), table_name, page_size)
    }
}

#[async_trait]
impl AnnouncementStore for DynamoStore {
    async fn insert(&self, new: NewAnnouncement) -> Result<Announcement, StoreError> {
        let item = new.stamp(Utc::now());
        tracing::debug!(table = %self.table_name, title = %item.title, date_time = %item.date_time, "put_item");
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(&item)))
            .condition_expression("attribute_not_exists(#title)")
            .expression_attribute_names("#title", TITLE_ATTR)
            .send()
            .await
            .map_err(store_error)?;
        Ok(item)
    }

    async fn scan(&self, cursor: Option<&PageCursor>) -> Result<ScanPage, StoreError> {
        let start_key = cursor.map(|c| key_to_item(&c.last_key));
        tracing::debug!(table = %self.table_name, resume = start_key.is_some(), "scan");
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .set_limit(self.page_size)
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(store_error)?;
        let items = output
            .items()
            .iter()
            .map(from_item)
            .collect::<Result<Vec<_>, _>>()?;
        let last_key = output.last_evaluated_key().map(key_from_item).transpose()?;
        Ok(ScanPage { items, last_key })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

fn to_item(a: &Announcement) -> Item {
    let mut item = key_to_item(&a.key());
    item.insert(
        DESCRIPTION_ATTR.to_string(),
        AttributeValue::S(a.description.clone()),
    );
    item
}

fn key_to_item(key: &PrimaryKey) -> Item {
    HashMap::from([
        (TITLE_ATTR.to_string(), AttributeValue::S(key.title.clone())),
        (
            DATE_TIME_ATTR.to_string(),
            AttributeValue::S(key.date_time.clone()),
        ),
    ])
}

fn string_attr(item: &Item, name: &str) -> Result<String, StoreError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| {
            StoreError::service_fault(
                "MalformedItem",
                format!("item attribute '{}' is missing or not a string", name),
            )
        })
}

fn from_item(item: &Item) -> Result<Announcement, StoreError> {
    Ok(Announcement {
        title: string_attr(item, TITLE_ATTR)?,
        description: string_attr(item, DESCRIPTION_ATTR)?,
        date_time: string_attr(item, DATE_TIME_ATTR)?,
    })
}

fn key_from_item(item: &Item) -> Result<PrimaryKey, StoreError> {
    Ok(PrimaryKey {
        title: string_attr(item, TITLE_ATTR)?,
        date_time: string_attr(item, DATE_TIME_ATTR)?,
    })
}

/// Service errors keep the store's status and code; everything else is a service fault.
fn store_error<E>(err: SdkError<E, HttpResponse>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let fault = match &err {
        SdkError::ServiceError(ctx) => StoreError::client_fault(
            ctx.raw().status().as_u16(),
            ctx.err().code().unwrap_or("Unknown"),
            ctx.err().message().unwrap_or_default(),
        ),
        SdkError::TimeoutError(_) => {
            StoreError::service_fault("TimeoutError", DisplayErrorContext(&err).to_string())
        }
        SdkError::DispatchFailure(_) => {
            StoreError::service_fault("DispatchFailure", DisplayErrorContext(&err).to_string())
        }
        SdkError::ResponseError(_) => {
            StoreError::service_fault("ResponseError", DisplayErrorContext(&err).to_string())
        }
        _ => StoreError::service_fault("SdkError", DisplayErrorContext(&err).to_string()),
    };
    tracing::warn!(kind = ?fault.kind, status = fault.status, code = %fault.code, "store request failed");
    fault
}
