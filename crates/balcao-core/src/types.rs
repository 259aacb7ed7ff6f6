//! # Domain Types
//!
//! Core domain types used throughout Balcão POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │   Receivable    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  code (business)│   │  payment_method │   │  sale_id (FK)   │       │
//! │  │  price_cents    │   │  final_amount   │   │  amount/paid    │       │
//! │  │  stock_quantity │   │  status         │   │  due_date       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleStatus    │   │ PaymentMethod   │   │ReceivableStatus │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Pending        │   │  Money / Pix    │   │  Pending        │       │
//! │  │  Completed      │   │  CreditCard     │   │  Partial        │       │
//! │  │  Cancelled      │   │  DebitCard      │   │  Paid           │       │
//! │  └─────────────────┘   │  Installments   │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID where one exists: (product code, customer document)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Entity Status
// =============================================================================

/// Soft-delete status shared by catalog entities (products, customers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    /// Visible to lookups and eligible for new sales.
    Active,
    /// Hidden from lookups; historical sales keep referencing it.
    Inactive,
}

impl Default for EntityStatus {
    fn default() -> Self {
        EntityStatus::Active
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business identifier shown at the counter (e.g. "CAFE-500").
    pub code: String,

    /// Display name shown to the operator.
    pub name: String,

    /// Unit price in centavos (smallest currency unit).
    pub price_cents: i64,

    /// Current stock level. Never driven below zero by a sale.
    pub stock_quantity: i64,

    /// Whether product is active (soft delete).
    pub status: EntityStatus,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if the requested quantity can be sold from current stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.status == EntityStatus::Active && self.stock_quantity >= quantity
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer that sales and receivables can reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// CPF (11 digits) or CNPJ (14 digits), digits only.
    pub document: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: EntityStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Reserved for imports or recovery; the commit engine never writes it.
    Pending,
    /// Sale has been committed and is immutable.
    Completed,
    /// Sale was cancelled. Cancellation flows live outside this core.
    Cancelled,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer settled (or will settle) a sale.
///
/// `Installments` is the only method with a deferred component: it is the
/// one that generates receivables at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment ("dinheiro").
    Money,
    /// Credit card on the external terminal.
    CreditCard,
    /// Debit card on the external terminal.
    DebitCard,
    /// Instant transfer.
    Pix,
    /// Deferred payment split into monthly installments.
    Installments,
}

impl PaymentMethod {
    /// Whether committing a sale with this method creates receivables.
    #[inline]
    pub const fn generates_receivables(&self) -> bool {
        matches!(self, PaymentMethod::Installments)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A committed sale transaction.
///
/// ## Invariants
/// - `final_amount_cents == subtotal_cents - discount_cents`
/// - `subtotal_cents` equals the sum of its items' line totals
/// - Immutable once committed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    /// Optional customer reference (walk-in sales have none).
    pub customer_id: Option<String>,
    /// Operator that registered the sale, for audit.
    pub user_id: String,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub final_amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the final amount as Money.
    #[inline]
    pub fn final_amount(&self) -> Money {
        Money::from_cents(self.final_amount_cents)
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line item in a sale.
/// Uses the snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    /// Product code at time of sale (frozen).
    pub code_snapshot: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in centavos at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Line total (unit_price × quantity).
    pub line_total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl SaleItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

// =============================================================================
// Receivable Status
// =============================================================================

/// Stored state of a receivable (one installment).
///
/// ## State Machine
/// ```text
/// pending ──► partial ──► paid        (monotonic, one direction)
///    │                     ▲
///    └─────────────────────┘          (single full payment)
/// ```
///
/// "Overdue" is NOT a stored state: it is derived at query time from
/// `due_date < today` for anything not yet paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum ReceivableStatus {
    /// No payment registered yet (paid_amount = 0).
    Pending,
    /// Partially settled (0 < paid_amount < amount).
    Partial,
    /// Fully settled. Terminal: no transition out of paid.
    Paid,
}

// =============================================================================
// Receivable
// =============================================================================

/// One installment obligation tied to a sale paid via installments.
///
/// ## Invariants
/// - `0 <= paid_amount_cents <= amount_cents` at all times
/// - `status == Paid` iff `paid_amount_cents >= amount_cents`
/// - `paid_amount_cents` never decreases
/// - `installment_number` is unique within a sale (1..N)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Receivable {
    pub id: String,
    pub sale_id: String,
    pub installment_number: i64,
    pub amount_cents: i64,
    pub paid_amount_cents: i64,
    pub due_date: NaiveDate,
    pub status: ReceivableStatus,
    /// Set once, when the receivable transitions to paid.
    pub payment_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Receivable {
    /// Open balance still owed on this installment.
    #[inline]
    pub fn remaining_cents(&self) -> i64 {
        self.amount_cents - self.paid_amount_cents
    }

    /// Display-time derivation: unpaid and past due as of `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != ReceivableStatus::Paid && self.due_date < today
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn receivable(paid: i64, due: NaiveDate, status: ReceivableStatus) -> Receivable {
        Receivable {
            id: "r1".to_string(),
            sale_id: "s1".to_string(),
            installment_number: 1,
            amount_cents: 10000,
            paid_amount_cents: paid,
            due_date: due,
            status,
            payment_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_payment_method_wire_names() {
        let json = serde_json::to_string(&PaymentMethod::CreditCard).unwrap();
        assert_eq!(json, "\"credit_card\"");
        let json = serde_json::to_string(&PaymentMethod::Money).unwrap();
        assert_eq!(json, "\"money\"");
    }

    #[test]
    fn test_only_installments_generate_receivables() {
        assert!(PaymentMethod::Installments.generates_receivables());
        assert!(!PaymentMethod::Money.generates_receivables());
        assert!(!PaymentMethod::Pix.generates_receivables());
    }

    #[test]
    fn test_receivable_remaining() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let r = receivable(2500, today, ReceivableStatus::Partial);
        assert_eq!(r.remaining_cents(), 7500);
    }

    #[test]
    fn test_overdue_is_derived_not_stored() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

        // Unpaid and past due: overdue
        assert!(receivable(0, yesterday, ReceivableStatus::Pending).is_overdue(today));
        assert!(receivable(100, yesterday, ReceivableStatus::Partial).is_overdue(today));

        // Paid never shows as overdue, regardless of dates
        assert!(!receivable(10000, yesterday, ReceivableStatus::Paid).is_overdue(today));

        // Due today is not overdue yet
        assert!(!receivable(0, today, ReceivableStatus::Pending).is_overdue(today));
    }

    #[test]
    fn test_product_can_sell() {
        let now = Utc::now();
        let mut product = Product {
            id: "p1".to_string(),
            code: "CAFE-500".to_string(),
            name: "Café 500g".to_string(),
            price_cents: 1850,
            stock_quantity: 5,
            status: EntityStatus::Active,
            created_at: now,
            updated_at: now,
        };

        assert!(product.can_sell(5));
        assert!(!product.can_sell(6));

        product.status = EntityStatus::Inactive;
        assert!(!product.can_sell(1));
    }
}
