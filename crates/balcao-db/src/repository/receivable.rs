//! # Receivable Repository
//!
//! The receivable ledger: one row per installment, mutated only by payment
//! registration.
//!
//! ## Payment Registration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                Payment Registration (ONE transaction)                   │
//! │                                                                         │
//! │  1. SELECT amount, paid_amount  ── missing ──► NotFound                │
//! │                                                                         │
//! │  2. amount <= 0                 ──► PaymentExceedsBalance family       │
//! │     amount > remaining          ──► rejected, no write                 │
//! │                                                                         │
//! │  3. UPDATE receivables SET                                             │
//! │        paid_amount = paid_amount + :p,                                 │
//! │        status       = CASE paid+p >= amount → 'paid' | 'partial',      │
//! │        payment_date = CASE paid+p >= amount → :today | unchanged       │
//! │     WHERE id = :id AND paid_amount + :p <= amount  ◄── closes the race │
//! │                                                                         │
//! │     0 rows affected ──► PaymentConflict (another payment won) ──► ⟲    │
//! │                                                                         │
//! │  4. COMMIT                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two concurrent payments whose amounts individually fit but jointly
//! exceed the balance cannot both succeed: the conditional predicate in
//! step 3 re-checks the balance at write time, so exactly one update
//! applies and the other resolves to `PaymentConflict` with no state
//! change. `paid_amount` is monotonic and never exceeds `amount`.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use balcao_core::Receivable;

const RECEIVABLE_COLUMNS: &str = "id, sale_id, installment_number, amount_cents, \
     paid_amount_cents, due_date, status, payment_date, created_at";

/// Repository for receivable database operations.
#[derive(Debug, Clone)]
pub struct ReceivableRepository {
    pool: SqlitePool,
}

impl ReceivableRepository {
    /// Creates a new ReceivableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceivableRepository { pool }
    }

    /// Registers a payment against one receivable, atomically.
    ///
    /// ## Arguments
    /// * `id` - Receivable ID
    /// * `amount_cents` - Payment amount; must be positive and no larger
    ///   than the open balance
    /// * `today` - Becomes `payment_date` when the payment settles the row
    ///
    /// ## Transitions
    /// `pending → partial`, `partial → partial`, `pending/partial → paid`.
    /// `paid` is terminal: once settled the balance is zero, so any further
    /// payment is rejected at step 2.
    ///
    /// ## Returns
    /// The receivable as persisted after the payment.
    pub async fn register_payment(
        &self,
        id: &str,
        amount_cents: i64,
        today: NaiveDate,
    ) -> DbResult<Receivable> {
        debug!(id = %id, amount = %amount_cents, "Registering payment");

        let mut tx = self.pool.begin().await?;

        let row: Option<(i64, i64)> = sqlx::query_as(
            "SELECT amount_cents, paid_amount_cents FROM receivables WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let (amount, paid) = match row {
            Some(r) => r,
            None => return Err(DbError::not_found("Receivable", id)),
        };

        let remaining = amount - paid;
        if amount_cents <= 0 || amount_cents > remaining {
            return Err(DbError::PaymentExceedsBalance {
                amount_cents,
                remaining_cents: remaining,
            });
        }

        // Balance re-checked in the predicate: a concurrent registration
        // that slipped between our read and this write makes it affect
        // zero rows instead of overpaying.
        let result = sqlx::query(
            r#"
            UPDATE receivables
            SET paid_amount_cents = paid_amount_cents + ?2,
                status = CASE
                    WHEN paid_amount_cents + ?2 >= amount_cents THEN 'paid'
                    ELSE 'partial'
                END,
                payment_date = CASE
                    WHEN paid_amount_cents + ?2 >= amount_cents THEN ?3
                    ELSE payment_date
                END
            WHERE id = ?1 AND paid_amount_cents + ?2 <= amount_cents
            "#,
        )
        .bind(id)
        .bind(amount_cents)
        .bind(today)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::PaymentConflict { id: id.to_string() });
        }

        let updated = sqlx::query_as::<_, Receivable>(&format!(
            "SELECT {RECEIVABLE_COLUMNS} FROM receivables WHERE id = ?1"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            id = %id,
            amount = %amount_cents,
            paid_amount = %updated.paid_amount_cents,
            status = ?updated.status,
            "Payment registered"
        );

        Ok(updated)
    }

    /// Gets a receivable by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Receivable>> {
        let receivable = sqlx::query_as::<_, Receivable>(&format!(
            "SELECT {RECEIVABLE_COLUMNS} FROM receivables WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(receivable)
    }

    /// Gets all receivables for a sale, in installment order.
    pub async fn list_by_sale(&self, sale_id: &str) -> DbResult<Vec<Receivable>> {
        let receivables = sqlx::query_as::<_, Receivable>(&format!(
            r#"
            SELECT {RECEIVABLE_COLUMNS}
            FROM receivables
            WHERE sale_id = ?1
            ORDER BY installment_number
            "#
        ))
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(receivables)
    }
}
