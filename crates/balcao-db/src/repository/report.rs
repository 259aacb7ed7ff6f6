//! # Report Repository
//!
//! Read-only aggregations over sales and receivables, consumed by the
//! dashboards. No mutation happens here; every query is parameterized by
//! the caller's clock so "today" is explicit and testable.
//!
//! ## Buckets
//! ```text
//! sales totals      ── day / week / month buckets over completed sales
//! sales summary     ── today, last 7 days, current calendar month
//! monthly summary   ── totals + count + average ticket + method breakdown
//! receivables       ── open balances split into upcoming vs overdue
//! overdue listing   ── per-receivable rows with customer and days overdue
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

// =============================================================================
// Row Types
// =============================================================================

/// One bucket of the sales-by-period queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotal {
    /// Bucket label: "2026-03-15" (day), "2026-11" (week of year), "2026-03" (month).
    pub period: String,
    pub total_cents: i64,
}

/// The dashboard's three headline cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub today_cents: i64,
    /// Rolling last 7 days, inclusive of today.
    pub week_cents: i64,
    /// Current calendar month.
    pub month_cents: i64,
}

/// Per-payment-method slice of the monthly summary.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodTotal {
    pub payment_method: String,
    pub count: i64,
    pub total_cents: i64,
}

/// Aggregates for the current calendar month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub total_sales_cents: i64,
    pub transaction_count: i64,
    pub average_sale_cents: i64,
    pub payment_methods: Vec<PaymentMethodTotal>,
}

/// Open receivable balances bucketed by due date vs today.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReceivablesPosition {
    /// Balance still due on or after today.
    pub upcoming_cents: i64,
    /// Balance past due (the derived "overdue" state).
    pub overdue_cents: i64,
}

/// One row of the overdue listing.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OverdueReceivable {
    pub id: String,
    /// None for walk-in installment sales with no customer on file.
    pub customer_name: Option<String>,
    pub sale_id: String,
    pub due_date: NaiveDate,
    pub remaining_cents: i64,
    pub days_overdue: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for read-only reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Completed sales bucketed by calendar day over a date range.
    pub async fn sales_by_day(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<PeriodTotal>> {
        self.sales_by_period("date(created_at)", from, to).await
    }

    /// Completed sales bucketed by ISO-style week of year (`%Y-%W`).
    pub async fn sales_by_week(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<PeriodTotal>> {
        self.sales_by_period("strftime('%Y-%W', created_at)", from, to)
            .await
    }

    /// Completed sales bucketed by calendar month (`%Y-%m`).
    pub async fn sales_by_month(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<PeriodTotal>> {
        self.sales_by_period("strftime('%Y-%m', created_at)", from, to)
            .await
    }

    /// Shared shape of the three bucket queries. `period_expr` is one of a
    /// fixed set of SQL expressions above, never caller input.
    async fn sales_by_period(
        &self,
        period_expr: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<PeriodTotal>> {
        debug!(%from, %to, period_expr, "Sales by period");

        let rows = sqlx::query_as::<_, PeriodTotal>(&format!(
            r#"
            SELECT {period_expr} AS period,
                   SUM(final_amount_cents) AS total_cents
            FROM sales
            WHERE status = 'completed'
              AND date(created_at) BETWEEN ?1 AND ?2
            GROUP BY period
            ORDER BY period ASC
            "#
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// The dashboard cards: today, rolling week, calendar month.
    pub async fn sales_summary(&self, today: NaiveDate) -> DbResult<SalesSummary> {
        let today_cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(final_amount_cents), 0)
            FROM sales
            WHERE status = 'completed' AND date(created_at) = ?1
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        let week_cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(final_amount_cents), 0)
            FROM sales
            WHERE status = 'completed' AND date(created_at) >= date(?1, '-7 day')
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        let month_cents: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(final_amount_cents), 0)
            FROM sales
            WHERE status = 'completed'
              AND strftime('%Y-%m', created_at) = strftime('%Y-%m', ?1)
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        Ok(SalesSummary {
            today_cents,
            week_cents,
            month_cents,
        })
    }

    /// Month-to-date totals, transaction count, average ticket, and the
    /// payment-method distribution.
    pub async fn monthly_summary(&self, today: NaiveDate) -> DbResult<MonthlySummary> {
        let totals: (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(final_amount_cents), 0),
                   COUNT(*),
                   CAST(COALESCE(AVG(final_amount_cents), 0) AS INTEGER)
            FROM sales
            WHERE status = 'completed'
              AND strftime('%Y-%m', created_at) = strftime('%Y-%m', ?1)
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        let payment_methods = sqlx::query_as::<_, PaymentMethodTotal>(
            r#"
            SELECT payment_method,
                   COUNT(*) AS count,
                   SUM(final_amount_cents) AS total_cents
            FROM sales
            WHERE status = 'completed'
              AND strftime('%Y-%m', created_at) = strftime('%Y-%m', ?1)
            GROUP BY payment_method
            ORDER BY total_cents DESC
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(MonthlySummary {
            total_sales_cents: totals.0,
            transaction_count: totals.1,
            average_sale_cents: totals.2,
            payment_methods,
        })
    }

    /// Open balances bucketed into upcoming vs overdue as of `today`.
    ///
    /// Only `pending`/`partial` rows carry an open balance; `paid` rows are
    /// settled and excluded by definition.
    pub async fn receivables_position(&self, today: NaiveDate) -> DbResult<ReceivablesPosition> {
        let position = sqlx::query_as::<_, ReceivablesPosition>(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN due_date >= ?1
                    THEN amount_cents - paid_amount_cents ELSE 0 END), 0) AS upcoming_cents,
                COALESCE(SUM(CASE WHEN due_date < ?1
                    THEN amount_cents - paid_amount_cents ELSE 0 END), 0) AS overdue_cents
            FROM receivables
            WHERE status IN ('pending', 'partial')
            "#,
        )
        .bind(today)
        .fetch_one(&self.pool)
        .await?;

        Ok(position)
    }

    /// Per-receivable overdue listing, oldest due date first.
    pub async fn overdue_receivables(&self, today: NaiveDate) -> DbResult<Vec<OverdueReceivable>> {
        debug!(%today, "Listing overdue receivables");

        let rows = sqlx::query_as::<_, OverdueReceivable>(
            r#"
            SELECT r.id,
                   c.name AS customer_name,
                   r.sale_id,
                   r.due_date,
                   r.amount_cents - r.paid_amount_cents AS remaining_cents,
                   CAST(julianday(?1) - julianday(r.due_date) AS INTEGER) AS days_overdue
            FROM receivables r
            JOIN sales s ON r.sale_id = s.id
            LEFT JOIN customers c ON s.customer_id = c.id
            WHERE r.status IN ('pending', 'partial')
              AND r.due_date < ?1
            ORDER BY r.due_date ASC
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
