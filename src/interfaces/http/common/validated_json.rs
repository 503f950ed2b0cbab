//! `ValidatedJson<T>`: `axum::Json<T>` followed by `validator::Validate`.
//!
//! A body that does not parse is a 400. A body that parses but breaks a
//! field rule becomes `DomainError::Validation`, so it goes through the
//! same [`api_error`] mapping (and envelope) as errors raised by services.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::{api_error, bad_request, ApiError};
use crate::domain::DomainError;

/// Request body that has been deserialized and passed its field rules.
///
/// ```ignore
/// async fn create_bicycle(
///     ValidatedJson(body): ValidatedJson<CreateBicycleRequest>,
/// ) -> Result<(StatusCode, Json<ApiResponse<BicycleDto>>), ApiError> { ... }
/// ```
pub struct ValidatedJson<T>(pub T);

/// Flatten field errors into `field: message` pairs, ordered by field name.
pub fn validation_error(errors: &ValidationErrors) -> DomainError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let details: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();

    if details.is_empty() {
        DomainError::Validation("request body failed validation".into())
    } else {
        DomainError::Validation(details.join("; "))
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| bad_request(format!("Invalid JSON: {}", rejection.body_text())))?;

        body.validate()
            .map_err(|errors| api_error(validation_error(&errors)))?;
        Ok(ValidatedJson(body))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 10))]
        brand: String,
        #[validate(range(exclusive_min = 0.0))]
        price_per_hour: f64,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<TestBody>) -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new().route("/test", post(handler))
    }

    async fn send(req: Request<Body>) -> axum::http::Response<Body> {
        use tower::ServiceExt;
        app().oneshot(req).await.unwrap()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let body = serde_json::json!({"brand": "Cube", "price_per_hour": 7.5});
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn validation_failure_returns_422() {
        let body = serde_json::json!({"brand": "", "price_per_hour": 0.0});
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Validation: brand"));
        assert!(message.contains("; price_per_hour"));
        assert_eq!(body["success"], false);
    }

    #[test]
    fn rule_failures_become_domain_validation_errors() {
        let body = TestBody {
            brand: "A very long brand".into(),
            price_per_hour: -1.0,
        };
        let errors = body.validate().unwrap_err();

        let err = validation_error(&errors);
        let DomainError::Validation(details) = &err else {
            panic!("expected a validation error, got {:?}", err);
        };
        assert!(details.starts_with("brand: length"));
        assert!(details.contains("price_per_hour: range"));
        assert_eq!(
            crate::interfaces::http::common::status_for(&err),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn missing_content_type_is_rejected_as_bad_json() {
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .body(Body::from(r#"{"brand": "Cube", "price_per_hour": 7.5}"#))
            .unwrap();

        let resp = send(req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
