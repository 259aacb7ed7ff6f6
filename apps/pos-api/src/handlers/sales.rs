//! Sale commit endpoints.
//!
//! `POST /api/sales` is the single entry point of the commit engine: one
//! request, one transaction, all-or-nothing. The request body mirrors the
//! draft the counter screen holds: lines with frozen unit prices, an
//! absolute discount, the payment method, and the installment count when
//! the sale is deferred.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use balcao_core::{PaymentMethod, Receivable, Sale, SaleDraft, SaleItem, SaleLine};

use crate::error::ApiError;
use crate::session::Operator;
use crate::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineRequest {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSaleRequest {
    pub customer_id: Option<String>,
    pub items: Vec<SaleLineRequest>,
    #[serde(default)]
    pub discount_cents: i64,
    pub payment_method: PaymentMethod,
    pub installments: Option<u32>,
    pub notes: Option<String>,
}

impl From<CommitSaleRequest> for SaleDraft {
    fn from(request: CommitSaleRequest) -> Self {
        SaleDraft {
            customer_id: request.customer_id,
            lines: request
                .items
                .into_iter()
                .map(|item| SaleLine {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price_cents,
                })
                .collect(),
            discount_cents: request.discount_cents,
            payment_method: request.payment_method,
            installments: request.installments,
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSaleResponse {
    pub sale_id: String,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub final_amount_cents: i64,
    pub item_count: usize,
    /// Present (non-empty) only for installment sales.
    pub receivables: Vec<Receivable>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetailResponse {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
    pub receivables: Vec<Receivable>,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/sales
///
/// Commits a proposed sale atomically: header, items, stock decrements,
/// and the installment schedule either all persist or none do.
pub async fn commit_sale(
    Operator(user_id): Operator,
    State(state): State<AppState>,
    Json(request): Json<CommitSaleRequest>,
) -> Result<Json<CommitSaleResponse>, ApiError> {
    debug!(items = request.items.len(), "commit_sale request");

    let draft = SaleDraft::from(request);

    // Fail fast before touching the database; the commit engine validates
    // again inside the transaction.
    draft.validate()?;

    let committed = state.db.sales().commit(&draft, &user_id, Utc::now()).await?;

    Ok(Json(CommitSaleResponse {
        sale_id: committed.sale.id.clone(),
        subtotal_cents: committed.sale.subtotal_cents,
        discount_cents: committed.sale.discount_cents,
        final_amount_cents: committed.sale.final_amount_cents,
        item_count: committed.items.len(),
        receivables: committed.receivables,
    }))
}

/// GET /api/sales/:id
///
/// Returns a sale with its items and (for installment sales) receivables.
pub async fn get_sale(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SaleDetailResponse>, ApiError> {
    let sale = state
        .db
        .sales()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Sale", &id))?;

    let items = state.db.sales().get_items(&id).await?;
    let receivables = state.db.receivables().list_by_sale(&id).await?;

    Ok(Json(SaleDetailResponse {
        sale,
        items,
        receivables,
    }))
}
