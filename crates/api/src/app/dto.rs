//! Request and response bodies that are not domain types.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use duenos_core::Owner;

/// Parse a request body as JSON regardless of its declared content type.
///
/// An empty or unparseable body reads as `{}`.
pub fn json_or_empty(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap_or_else(|_| serde_json::Value::Object(Default::default()))
}

/// Login body. Absent fields read as empty strings and simply fail the
/// credential check.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "admin")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "1234")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub message: String,
    #[serde(rename = "idCliente")]
    pub id_cliente: i64,
}

/// Error envelope shared by every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    /// Incident id for server-side failures; look it up in the logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page size (1-100, default 10). Enables paging when present.
    #[serde(default, deserialize_with = "non_negative_or_none")]
    pub limit: Option<u32>,
    /// Rows to skip (default 0). Enables paging when present.
    #[serde(default, deserialize_with = "non_negative_or_none")]
    pub offset: Option<u32>,
}

/// Query values that are not non-negative integers are treated as absent.
fn non_negative_or_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.trim().parse().ok()))
}

impl ListQuery {
    pub fn is_paged(&self) -> bool {
        self.limit.is_some() || self.offset.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OwnerPage {
    pub items: Vec<Owner>,
    pub limit: u32,
    pub offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(qs: &str) -> ListQuery {
        axum::extract::Query::<ListQuery>::try_from_uri(&format!("/api/duenos?{qs}").parse().unwrap())
            .unwrap()
            .0
    }

    #[test]
    fn query_values_parse_leniently() {
        let q = query("limit=5&offset=2");
        assert_eq!((q.limit, q.offset), (Some(5), Some(2)));
        assert!(q.is_paged());

        let q = query("limit=abc&offset=-1");
        assert_eq!((q.limit, q.offset), (None, None));
        assert!(!q.is_paged());

        let q = query("");
        assert!(!q.is_paged());
    }

    #[test]
    fn bodies_that_are_not_json_read_as_empty_objects() {
        assert_eq!(json_or_empty(b""), serde_json::json!({}));
        assert_eq!(json_or_empty(b"username=admin"), serde_json::json!({}));
        assert_eq!(json_or_empty(br#"{"a":1}"#), serde_json::json!({ "a": 1 }));
    }
}
