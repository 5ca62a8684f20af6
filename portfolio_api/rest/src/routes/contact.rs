use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_contact_contracts::{ContactService, DeliveryError, SubmissionOutcome};

use super::{error, internal_server_error};
use crate::models::contact::{ApiContactForm, ApiInvalidContactForm};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    Json(form): Json<ApiContactForm>,
) -> Response {
    let payload = match service.validate(&form.into()) {
        Ok(payload) => payload,
        Err(fields) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiInvalidContactForm {
                    detail: "Invalid contact form",
                    fields,
                }),
            )
                .into_response()
        }
    };

    match service.submit(payload).await {
        SubmissionOutcome::Submitted => Json(true).into_response(),
        SubmissionOutcome::Failed(DeliveryError::Other(err)) => internal_server_error(err),
        SubmissionOutcome::Failed(DeliveryError::Rejected | DeliveryError::Timeout) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, "Could not send message")
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use portfolio_core_contact_contracts::MockContactService;
    use portfolio_models::contact::ContactFormInput;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn input() -> ContactFormInput {
        ContactFormInput {
            name: "Al".into(),
            email: "al@example.com".into(),
            message: "Hello there, this is long enough.".into(),
        }
    }

    async fn post(service: MockContactService, body: Value) -> (StatusCode, Value) {
        let request = Request::post("/contact")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router(Arc::new(service)).oneshot(request).await.unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn body(input: &ContactFormInput) -> Value {
        json!({
            "name": input.name,
            "email": input.email,
            "message": input.message,
        })
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let payload = input().validate().unwrap();
        let service = MockContactService::new()
            .with_validate(input(), Ok(payload.clone()))
            .with_submit(payload, SubmissionOutcome::Submitted);

        // Act
        let (status, body) = post(service, body(&input())).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(true));
    }

    #[tokio::test]
    async fn invalid() {
        // Arrange
        let input = ContactFormInput {
            name: "A".into(),
            message: "short".into(),
            ..input()
        };
        let errors = input.validate().unwrap_err();
        let service = MockContactService::new().with_validate(input.clone(), Err(errors));

        // Act
        let (status, body) = post(service, body(&input)).await;

        // Assert
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({
                "detail": "Invalid contact form",
                "fields": {
                    "name": "Name must be at least 2 characters",
                    "message": "Message must be at least 10 characters",
                },
            })
        );
    }

    #[tokio::test]
    async fn rejected() {
        // Arrange
        let payload = input().validate().unwrap();
        let service = MockContactService::new()
            .with_validate(input(), Ok(payload.clone()))
            .with_submit(payload, SubmissionOutcome::Failed(DeliveryError::Timeout));

        // Act
        let (status, body) = post(service, body(&input())).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Could not send message"}));
    }

    #[tokio::test]
    async fn other_error() {
        // Arrange
        let payload = input().validate().unwrap();
        let service = MockContactService::new()
            .with_validate(input(), Ok(payload.clone()))
            .with_submit(
                payload,
                SubmissionOutcome::Failed(anyhow::anyhow!("smtp down").into()),
            );

        // Act
        let (status, body) = post(service, body(&input())).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Internal server error"}));
    }
}
