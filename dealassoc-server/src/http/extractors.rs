//! Custom Axum extractors

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;
use crate::models::ValidationError;

/// Raw create-association fields from a JSON or form-encoded body
///
/// Fields stay untyped so that falsy values reach presence validation
/// instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct AssociationPayload {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub deal_id: Option<Value>,
}

#[derive(Deserialize)]
struct FormFields {
    email: Option<String>,
    deal_id: Option<String>,
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn malformed(reason: String) -> ApiError {
    ApiError::Validation(ValidationError::Malformed { reason })
}

impl<S> FromRequest<S> for AssociationPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            let Form(fields) = Form::<FormFields>::from_request(req, state)
                .await
                .map_err(|rejection| malformed(rejection.body_text()))?;

            return Ok(Self {
                email: fields.email.map(Value::String),
                deal_id: fields.deal_id.map(Value::String),
            });
        }

        let Json(payload) = Json::<Self>::from_request(req, state)
            .await
            .map_err(|rejection| malformed(rejection.body_text()))?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::json;

    fn post(content_type: &str, body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/create/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap()
    }

    async fn extract(req: Request) -> Result<AssociationPayload, ApiError> {
        <AssociationPayload as FromRequest<()>>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn json_body_keeps_raw_values() {
        let req = post("application/json", r#"{"email": "a@x.com", "deal_id": 0}"#);
        let payload = extract(req).await.unwrap();

        assert_eq!(payload.email, Some(json!("a@x.com")));
        assert_eq!(payload.deal_id, Some(json!(0)));
    }

    #[tokio::test]
    async fn form_body_yields_strings() {
        let req = post("application/x-www-form-urlencoded", "email=a%40x.com&deal_id=D1");
        let payload = extract(req).await.unwrap();

        assert_eq!(payload.email, Some(json!("a@x.com")));
        assert_eq!(payload.deal_id, Some(json!("D1")));
    }

    #[tokio::test]
    async fn form_body_missing_field_is_none() {
        let req = post("application/x-www-form-urlencoded", "email=a%40x.com");
        let payload = extract(req).await.unwrap();

        assert_eq!(payload.deal_id, None);
    }

    #[tokio::test]
    async fn other_content_types_are_400() {
        let req = post("text/plain", "email=a@x.com");
        let err = extract(req).await.unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
