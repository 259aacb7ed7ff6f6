//! # Sale Repository
//!
//! Database operations for sales, including **the commit engine**: the one
//! all-or-nothing transaction that turns a validated draft into persistent
//! state.
//!
//! ## Commit Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Sale Commit (ONE transaction)                        │
//! │                                                                         │
//! │  1. VALIDATE draft (pure, balcao-core) ── fail ──► nothing written     │
//! │                                                                         │
//! │  2. INSERT sales row (status = 'completed')                            │
//! │                                                                         │
//! │  3. For each line:                                                     │
//! │     ├── SELECT product (snapshot code/name, read stock for errors)     │
//! │     ├── UPDATE products SET stock = stock - qty                        │
//! │     │        WHERE id = ? AND stock >= qty    ◄── atomic floor check   │
//! │     │        0 rows affected ──► InsufficientStock ──► ROLLBACK        │
//! │     └── INSERT sale_items row (frozen price/code/name)                 │
//! │                                                                         │
//! │  4. payment_method = installments?                                     │
//! │     └── INSERT one receivables row per installment (schedule from      │
//! │         balcao-core: equal split, remainder in the last, monthly due)  │
//! │                                                                         │
//! │  5. COMMIT ── any error anywhere ──► ROLLBACK, zero partial writes     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent commits against the same product can never drive stock
//! negative: the conditional UPDATE predicate is evaluated under SQLite's
//! write serialization, so the losing transaction sees zero affected rows
//! and aborts in full.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use balcao_core::{
    build_schedule, Receivable, ReceivableStatus, Sale, SaleDraft, SaleItem, SaleStatus,
};

/// Everything persisted by one successful commit.
#[derive(Debug, Clone)]
pub struct CommittedSale {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
    /// Empty unless the sale was paid in installments.
    pub receivables: Vec<Receivable>,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Commits a proposed sale atomically.
    ///
    /// ## Arguments
    /// * `draft` - The proposed sale (validated again here, inside the unit)
    /// * `user_id` - The operator registering the sale, for audit
    /// * `now` - Commit instant; also anchors the installment cadence
    ///
    /// ## Errors
    /// * `DbError::Invalid` - draft failed validation; nothing was written
    /// * `DbError::NotFound` - product or customer reference doesn't resolve
    /// * `DbError::InsufficientStock` - a line asked for more than on hand
    /// * persistence errors - transaction aborted, nothing observable
    pub async fn commit(
        &self,
        draft: &SaleDraft,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> DbResult<CommittedSale> {
        // Step 1: reject bad input before any write.
        draft.validate().map_err(DbError::Invalid)?;

        let sale_id = Uuid::new_v4().to_string();
        let subtotal = draft.subtotal_cents();
        let final_amount = draft.final_amount_cents();

        debug!(
            sale_id = %sale_id,
            items = draft.lines.len(),
            final_amount = %final_amount,
            "Committing sale"
        );

        let mut tx = self.pool.begin().await?;

        // Resolve the customer reference early so a bad id surfaces as a
        // clear NotFound instead of a raw FK violation at insert time.
        if let Some(customer_id) = &draft.customer_id {
            let exists: Option<String> =
                sqlx::query_scalar("SELECT id FROM customers WHERE id = ?1")
                    .bind(customer_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            if exists.is_none() {
                return Err(DbError::not_found("Customer", customer_id));
            }
        }

        // Step 2: sale header, committed sales are born 'completed'.
        let sale = Sale {
            id: sale_id.clone(),
            customer_id: draft.customer_id.clone(),
            user_id: user_id.to_string(),
            subtotal_cents: subtotal,
            discount_cents: draft.discount_cents,
            final_amount_cents: final_amount,
            payment_method: draft.payment_method,
            status: SaleStatus::Completed,
            notes: draft.notes.clone(),
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, customer_id, user_id,
                subtotal_cents, discount_cents, final_amount_cents,
                payment_method, status, notes, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.customer_id)
        .bind(&sale.user_id)
        .bind(sale.subtotal_cents)
        .bind(sale.discount_cents)
        .bind(sale.final_amount_cents)
        .bind(sale.payment_method)
        .bind(sale.status)
        .bind(&sale.notes)
        .bind(sale.created_at)
        .execute(&mut *tx)
        .await?;

        // Step 3: line items with frozen snapshots, stock decremented
        // under the same transaction.
        let mut items = Vec::with_capacity(draft.lines.len());

        for line in &draft.lines {
            let product: Option<(String, String, i64)> = sqlx::query_as(
                "SELECT code, name, stock_quantity FROM products WHERE id = ?1 AND status = 'active'",
            )
            .bind(&line.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            let (code, name, available) = match product {
                Some(p) => p,
                None => return Err(DbError::not_found("Product", &line.product_id)),
            };

            let result = sqlx::query(
                r#"
                UPDATE products
                SET stock_quantity = stock_quantity - ?2,
                    updated_at = ?3
                WHERE id = ?1 AND stock_quantity >= ?2
                "#,
            )
            .bind(&line.product_id)
            .bind(line.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(DbError::InsufficientStock {
                    code,
                    available,
                    requested: line.quantity,
                });
            }

            let item = SaleItem {
                id: Uuid::new_v4().to_string(),
                sale_id: sale_id.clone(),
                product_id: line.product_id.clone(),
                code_snapshot: code,
                name_snapshot: name,
                quantity: line.quantity,
                unit_price_cents: line.unit_price_cents,
                line_total_cents: line.line_total_cents(),
                created_at: now,
            };

            sqlx::query(
                r#"
                INSERT INTO sale_items (
                    id, sale_id, product_id, code_snapshot, name_snapshot,
                    quantity, unit_price_cents, line_total_cents, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&item.id)
            .bind(&item.sale_id)
            .bind(&item.product_id)
            .bind(&item.code_snapshot)
            .bind(&item.name_snapshot)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.line_total_cents)
            .bind(item.created_at)
            .execute(&mut *tx)
            .await?;

            items.push(item);
        }

        // Step 4: installment schedule, only for deferred payment.
        let mut receivables = Vec::new();

        if let Some(count) = draft.effective_installments() {
            let schedule = build_schedule(draft.final_amount(), count, now.date_naive())
                .map_err(DbError::Invalid)?;

            for installment in schedule {
                let receivable = Receivable {
                    id: Uuid::new_v4().to_string(),
                    sale_id: sale_id.clone(),
                    installment_number: installment.number as i64,
                    amount_cents: installment.amount.cents(),
                    paid_amount_cents: 0,
                    due_date: installment.due_date,
                    status: ReceivableStatus::Pending,
                    payment_date: None,
                    created_at: now,
                };

                sqlx::query(
                    r#"
                    INSERT INTO receivables (
                        id, sale_id, installment_number, amount_cents,
                        paid_amount_cents, due_date, status, payment_date, created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    "#,
                )
                .bind(&receivable.id)
                .bind(&receivable.sale_id)
                .bind(receivable.installment_number)
                .bind(receivable.amount_cents)
                .bind(receivable.paid_amount_cents)
                .bind(receivable.due_date)
                .bind(receivable.status)
                .bind(receivable.payment_date)
                .bind(receivable.created_at)
                .execute(&mut *tx)
                .await?;

                receivables.push(receivable);
            }
        }

        // Step 5: make it all visible at once.
        tx.commit().await?;

        info!(
            sale_id = %sale_id,
            final_amount = %final_amount,
            items = items.len(),
            receivables = receivables.len(),
            "Sale committed"
        );

        Ok(CommittedSale {
            sale,
            items,
            receivables,
        })
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, customer_id, user_id,
                   subtotal_cents, discount_cents, final_amount_cents,
                   payment_method, status, notes, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all items for a sale, in ring-up order.
    pub async fn get_items(&self, sale_id: &str) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, code_snapshot, name_snapshot,
                   quantity, unit_price_cents, line_total_cents, created_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
