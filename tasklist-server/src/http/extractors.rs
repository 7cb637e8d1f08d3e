//! Custom Axum extractors

use std::convert::Infallible;

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::{Map, Value};

/// Top-level fields of a JSON object body.
///
/// Never rejects: a missing or wrong content type, malformed JSON, or a
/// non-object body all yield an empty map, so field validation reports
/// the missing field with the route's own 400 message.
#[derive(Debug, Default)]
pub struct JsonFields(pub Map<String, Value>);

impl JsonFields {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl<S> FromRequest<S> for JsonFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(Value::Object(fields))) => Ok(Self(fields)),
            Ok(Json(_)) => Ok(Self::default()),
            Err(rejection) => {
                tracing::debug!(%rejection, "Treating unreadable JSON body as empty");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;

    async fn extract(content_type: Option<&str>, body: &'static str) -> JsonFields {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        JsonFields::from_request(req, &()).await.unwrap()
    }

    #[tokio::test]
    async fn reads_object_fields() {
        let fields = extract(Some("application/json"), r#"{"title": "x"}"#).await;
        assert_eq!(fields.get("title"), Some(&Value::String("x".into())));
    }

    #[tokio::test]
    async fn unreadable_bodies_are_empty() {
        assert!(extract(None, r#"{"title": "x"}"#).await.0.is_empty());
        assert!(extract(Some("application/json"), "{not json").await.0.is_empty());
        assert!(extract(Some("application/json"), r#"["x"]"#).await.0.is_empty());
        assert!(extract(Some("text/plain"), "title=x").await.0.is_empty());
    }
}
