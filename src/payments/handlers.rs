//! HTTP handlers for payment operations

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{GatewayError, RequestError};
use crate::core::payment::{PaymentOutcome, PaymentRecord, PaymentRequest};
use crate::core::processor::PaymentProcessor;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<PaymentProcessor>,
}

/// Body returned for a rejected submission
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedPaymentResponse {
    pub status: &'static str,
    pub rejection_reason: String,
}

impl IntoResponse for PaymentOutcome {
    fn into_response(self) -> Response {
        let label = self.status_label();
        match self {
            PaymentOutcome::Authorized(record) | PaymentOutcome::Declined(record) => {
                (StatusCode::OK, Json(record)).into_response()
            }
            PaymentOutcome::Rejected(reason) => {
                let status = if reason.is_malformed_request() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::UNPROCESSABLE_ENTITY
                };
                let body = RejectedPaymentResponse {
                    status: label,
                    rejection_reason: reason.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

/// `POST /payment`
///
/// A body that is not a JSON object is treated as a request with every field
/// missing, which rejects it as a malformed request.
pub async fn process_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<PaymentOutcome, GatewayError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable payment body");
            PaymentRequest::default()
        }
    };

    state.processor.process(&request).await
}

/// `GET /payment/{id}`
///
/// Only the canonical hyphenated UUID form is accepted as an id. A segment
/// that does not even decode to a string gets the same answer.
pub async fn get_payment(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> Result<Json<PaymentRecord>, GatewayError> {
    let raw_id = match raw_id {
        Ok(Path(raw_id)) => raw_id,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Undecodable payment id");
            return Err(RequestError::InvalidPaymentId {
                value: rejection.body_text(),
            }
            .into());
        }
    };
    let id = parse_payment_id(&raw_id)?;
    let record = state.processor.get_by_id(&id).await?;
    Ok(Json(record))
}

fn parse_payment_id(raw: &str) -> Result<Uuid, RequestError> {
    const HYPHENATED_LEN: usize = 36;

    Uuid::parse_str(raw)
        .ok()
        .filter(|_| raw.len() == HYPHENATED_LEN)
        .ok_or_else(|| RequestError::InvalidPaymentId {
            value: raw.to_string(),
        })
}
