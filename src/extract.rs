use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use laptopbay_core::AppError;
use laptopbay_db::Document;

/// A JSON object request body.
///
/// Bodies that are missing, not JSON, or not an object are rejected with a
/// `400` failure envelope instead of axum's plain-text rejection.
#[derive(Debug, Clone, Default)]
pub struct JsonDocument(pub Document);

impl<S> FromRequest<S> for JsonDocument
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(document) = Json::<Document>::from_request(req, state)
            .await
            .map_err(reject_body)?;
        Ok(Self(document))
    }
}

fn reject_body(rejection: JsonRejection) -> AppError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header"
        }
        JsonRejection::JsonDataError(_) => "Request body must be a JSON object",
        JsonRejection::JsonSyntaxError(_) => "Request body is not valid JSON",
        _ => "Invalid request body",
    };
    tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
    AppError::bad_request(anyhow!(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode, header};

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    #[tokio::test]
    async fn test_object_body_is_accepted() {
        let JsonDocument(doc) =
            JsonDocument::from_request(request(Some("application/json"), r#"{"name":"X"}"#), &())
                .await
                .unwrap();
        assert_eq!(doc["name"], "X");
    }

    #[tokio::test]
    async fn test_array_body_is_bad_request() {
        let err = JsonDocument::from_request(request(Some("application/json"), "[1,2]"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Request body must be a JSON object");
    }

    #[tokio::test]
    async fn test_syntax_error_is_bad_request() {
        let err = JsonDocument::from_request(request(Some("application/json"), "{oops"), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Request body is not valid JSON");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let err = JsonDocument::from_request(request(None, r#"{"name":"X"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
