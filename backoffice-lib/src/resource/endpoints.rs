use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::client::{ApiClient, Method};
use crate::error::ApiError;
use crate::model::Entity;

/// The four operations a collection supports.
#[async_trait]
pub trait Endpoints<T: Entity>: Send + Sync {
    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<T>, ApiError>;

    /// Create a record, returning the stored version.
    async fn create(&self, item: &T) -> Result<T, ApiError>;

    /// Replace a record, returning the stored version.
    async fn update(&self, item: &T) -> Result<T, ApiError>;

    /// Delete a record by id.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// [`Endpoints`] over a REST collection.
///
/// | operation | request                |
/// |-----------|------------------------|
/// | list      | `GET /{path}`          |
/// | create    | `POST /{path}`         |
/// | update    | `PUT /{path}/{id}`     |
/// | delete    | `DELETE /{path}/{id}`  |
pub struct RestEndpoints<T> {
    client: ApiClient,
    path: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> RestEndpoints<T> {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into().trim_matches('/').to_string(),
            _entity: PhantomData,
        }
    }

    /// Collection path, without surrounding slashes.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, id)
    }
}

#[async_trait]
impl<T: Entity> Endpoints<T> for RestEndpoints<T> {
    async fn list(&self) -> Result<Vec<T>, ApiError> {
        let value: Value = self.client.get_json(&self.path).await?;
        decode_list(&value)
    }

    async fn create(&self, item: &T) -> Result<T, ApiError> {
        match self.client.send_json(Method::POST, &self.path, item).await? {
            Some(value) => decode_one(&value),
            None => Ok(item.clone()),
        }
    }

    async fn update(&self, item: &T) -> Result<T, ApiError> {
        let id = item.id().ok_or(ApiError::MissingId)?;
        match self
            .client
            .send_json(Method::PUT, &self.item_path(&id), item)
            .await?
        {
            Some(value) => decode_one(&value),
            None => Ok(item.clone()),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        if id.is_empty() {
            return Err(ApiError::MissingId);
        }
        self.client.delete(&self.item_path(id)).await
    }
}

/// Decode a list response: a bare array or an object with a `data` array.
pub fn decode_list<T: Entity>(value: &Value) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(unexpected_shape(value)),
        },
        _ => return Err(unexpected_shape(value)),
    };
    items
        .iter()
        .map(|item| {
            T::deserialize(item).map_err(|e| ApiError::parse_with_body(e.to_string(), item.to_string()))
        })
        .collect()
}

/// Decode a single-record response.
///
/// An object whose only key is `data` is treated as an envelope.
pub fn decode_one<T: Entity>(value: &Value) -> Result<T, ApiError> {
    let inner = match value {
        Value::Object(map) if map.len() == 1 => map.get("data").unwrap_or(value),
        _ => value,
    };
    T::deserialize(inner).map_err(|e| ApiError::parse_with_body(e.to_string(), inner.to_string()))
}

fn unexpected_shape(value: &Value) -> ApiError {
    ApiError::parse_with_body(
        "expected an array or an object with a `data` array",
        value.to_string(),
    )
}
