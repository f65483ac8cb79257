//! Request extractors whose rejections render through [`AppError`]

use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body. Same as `axum::Json`, but a malformed or ill-typed body
/// answers with the standard error envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Shelf {
        label: String,
        slots: u32,
    }

    fn router() -> Router {
        Router::new().route(
            "/shelves",
            post(|JsonBody(shelf): JsonBody<Shelf>| async move {
                format!("{}:{}", shelf.label, shelf.slots)
            }),
        )
    }

    async fn post_json(body: &'static str) -> (StatusCode, serde_json::Value) {
        let request = HttpRequest::post("/shelves")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn well_formed_body_is_extracted() {
        let (status, _) = post_json(r#"{"label":"A","slots":3}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn ill_typed_body_is_validation_envelope() {
        let (status, body) = post_json(r#"{"label":"A","slots":-1}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "validation_error");
        assert_eq!(body["error"]["details"][0]["field"], "body");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request_envelope() {
        let (status, body) = post_json("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "bad_request");
    }
}
