use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use immerse_core_contact_contracts::{ContactSendMessageError, ContactService};
use immerse_models::contact::{ContactSubmission, ContactValidationErrors};
use tracing::{error, warn};

use super::error;
use crate::models::{
    contact::{ApiContactSubmission, ApiContactValidationError},
    ApiMessage,
};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactService>>,
    submission: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let Ok(Json(submission)) = submission else {
        return error(StatusCode::BAD_REQUEST, "Invalid request body");
    };

    let submission = match ContactSubmission::validate(submission.into()) {
        Ok(submission) => submission,
        Err(errors) => return validation_error(errors),
    };

    match service.send_message(submission).await {
        Ok(()) => Json(ApiMessage {
            message: "Email sent successfully",
        })
        .into_response(),
        Err(ContactSendMessageError::NotConfigured(setting)) => {
            error!(%setting, "email relay configuration is incomplete");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
            )
        }
        Err(err @ (ContactSendMessageError::Send(_) | ContactSendMessageError::Other(_))) => {
            error!("failed to send contact message: {:#}", anyhow::Error::from(err));
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send email. Please try again later.",
            )
        }
    }
}

fn validation_error(errors: ContactValidationErrors) -> Response {
    warn!(?errors, "rejected contact submission");
    let error = if errors.has_required() {
        "All fields are required"
    } else {
        "Invalid email format"
    };
    (
        StatusCode::BAD_REQUEST,
        Json(ApiContactValidationError {
            error,
            fields: errors,
        }),
    )
        .into_response()
}
