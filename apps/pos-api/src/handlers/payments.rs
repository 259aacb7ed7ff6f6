//! Payment registration endpoint.
//!
//! `POST /api/payments` mutates exactly one receivable, atomically. The
//! ledger enforces the balance invariant; this handler only does the
//! zero-knowledge checks (positive amount) and passes today's date in.

use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use balcao_core::{validation, ReceivableStatus};

use crate::error::ApiError;
use crate::session::Operator;
use crate::AppState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPaymentRequest {
    pub receivable_id: String,
    pub amount_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPaymentResponse {
    pub receivable_id: String,
    pub paid_amount_cents: i64,
    pub remaining_cents: i64,
    pub status: ReceivableStatus,
    pub payment_date: Option<NaiveDate>,
}

/// POST /api/payments
///
/// Registers a payment against a receivable. Rejected without state change
/// when the amount is non-positive or exceeds the open balance; a lost
/// race against a concurrent payment surfaces as 409.
pub async fn register_payment(
    Operator(user_id): Operator,
    State(state): State<AppState>,
    Json(request): Json<RegisterPaymentRequest>,
) -> Result<Json<RegisterPaymentResponse>, ApiError> {
    debug!(
        receivable_id = %request.receivable_id,
        amount = %request.amount_cents,
        user_id = %user_id,
        "register_payment request"
    );

    validation::validate_payment_amount(request.amount_cents)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let today = Utc::now().date_naive();
    let updated = state
        .db
        .receivables()
        .register_payment(&request.receivable_id, request.amount_cents, today)
        .await?;

    Ok(Json(RegisterPaymentResponse {
        receivable_id: updated.id.clone(),
        paid_amount_cents: updated.paid_amount_cents,
        remaining_cents: updated.remaining_cents(),
        status: updated.status,
        payment_date: updated.payment_date,
    }))
}
