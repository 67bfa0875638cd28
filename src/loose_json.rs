//! An extractor for request bodies that never rejects the request.

use std::convert::Infallible;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde_json::Value;

/// A JSON request body, or `null` if the body could not be read as JSON.
///
/// Unlike [Json], a missing content type, invalid syntax or an empty body
/// does not reject the request. The handler runs with `null` instead, and
/// SQLite decides whether the resulting values are acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct LooseJson(pub Value);

impl<S> FromRequest<S> for LooseJson
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(LooseJson(value)),
            Err(rejection) => {
                tracing::debug!("Could not read request body as JSON: {rejection}");
                Ok(LooseJson(Value::Null))
            }
        }
    }
}

impl LooseJson {
    /// Get the value of `field`, or `null` if the body is not an object or lacks the field.
    pub fn field(&self, field: &str) -> Value {
        self.0.get(field).cloned().unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        extract::{FromRequest, Request},
        http::header::CONTENT_TYPE,
    };
    use serde_json::{Value, json};

    use super::LooseJson;

    async fn extract(content_type: &str, body: &'static str) -> LooseJson {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();

        LooseJson::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_json_object() {
        let body = extract("application/json", r#"{"status":"COMPLETED"}"#).await;

        assert_eq!(body, LooseJson(json!({ "status": "COMPLETED" })));
        assert_eq!(body.field("status"), json!("COMPLETED"));
        assert_eq!(body.field("amount"), Value::Null);
    }

    #[tokio::test]
    async fn wrong_content_type_is_null() {
        let body = extract("text/plain", r#"{"status":"COMPLETED"}"#).await;

        assert_eq!(body, LooseJson(Value::Null));
    }

    #[tokio::test]
    async fn invalid_syntax_is_null() {
        let body = extract("application/json", "{not json").await;

        assert_eq!(body, LooseJson(Value::Null));
    }

    #[tokio::test]
    async fn scalar_body_has_no_fields() {
        let body = extract("application/json", "5").await;

        assert_eq!(body.field("status"), Value::Null);
    }
}
