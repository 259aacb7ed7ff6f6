//! Reporting endpoints: read-only aggregations for the dashboards.
//!
//! Every query resolves "today" once, here at the edge, and hands the
//! explicit date to the repository, so overdue/upcoming bucketing is a
//! pure function of the data and the server's calendar day.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Months, NaiveDate, Utc};
use serde::Deserialize;

use balcao_db::repository::report::{
    MonthlySummary, OverdueReceivable, PeriodTotal, ReceivablesPosition, SalesSummary,
};

use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Parameters
// =============================================================================

/// Bucket granularity for the sales totals query.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Day,
    Week,
    Month,
}

#[derive(Debug, Deserialize)]
pub struct SalesReportParams {
    pub bucket: Option<Bucket>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/reports/sales?bucket=day|week|month&from=2026-01-01&to=2026-06-30
///
/// Completed-sales totals per period. Defaults: monthly buckets over the
/// last six months, matching the dashboard's chart.
pub async fn sales_report(
    State(state): State<AppState>,
    Query(params): Query<SalesReportParams>,
) -> Result<Json<Vec<PeriodTotal>>, ApiError> {
    let today = Utc::now().date_naive();
    let to = params.to.unwrap_or(today);
    let from = match params.from {
        Some(from) => from,
        None => to
            .checked_sub_months(Months::new(6))
            .ok_or_else(|| ApiError::validation("date range out of bounds"))?,
    };

    if from > to {
        return Err(ApiError::validation("'from' must not be after 'to'"));
    }

    let reports = state.db.reports();
    let rows = match params.bucket.unwrap_or(Bucket::Month) {
        Bucket::Day => reports.sales_by_day(from, to).await?,
        Bucket::Week => reports.sales_by_week(from, to).await?,
        Bucket::Month => reports.sales_by_month(from, to).await?,
    };

    Ok(Json(rows))
}

/// GET /api/reports/summary
///
/// The dashboard cards: today, rolling week, calendar month.
pub async fn sales_summary(
    State(state): State<AppState>,
) -> Result<Json<SalesSummary>, ApiError> {
    let today = Utc::now().date_naive();
    let summary = state.db.reports().sales_summary(today).await?;
    Ok(Json(summary))
}

/// GET /api/reports/monthly-summary
///
/// Month-to-date totals, transaction count, average ticket, and the
/// payment-method distribution.
pub async fn monthly_summary(
    State(state): State<AppState>,
) -> Result<Json<MonthlySummary>, ApiError> {
    let today = Utc::now().date_naive();
    let summary = state.db.reports().monthly_summary(today).await?;
    Ok(Json(summary))
}

/// GET /api/reports/receivables
///
/// Open balances split into upcoming vs overdue as of today.
pub async fn receivables_position(
    State(state): State<AppState>,
) -> Result<Json<ReceivablesPosition>, ApiError> {
    let today = Utc::now().date_naive();
    let position = state.db.reports().receivables_position(today).await?;
    Ok(Json(position))
}

/// GET /api/reports/receivables/overdue
///
/// Per-receivable overdue listing with customer and days overdue.
pub async fn overdue_receivables(
    State(state): State<AppState>,
) -> Result<Json<Vec<OverdueReceivable>>, ApiError> {
    let today = Utc::now().date_naive();
    let rows = state.db.reports().overdue_receivables(today).await?;
    Ok(Json(rows))
}
