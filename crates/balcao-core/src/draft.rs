//! # Sale Draft
//!
//! The proposed sale as assembled at the counter, before it is committed.
//!
//! ## Where This Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sale Draft Lifecycle                                │
//! │                                                                         │
//! │  Counter screen (client-held)                                          │
//! │       │  items picked, discount applied, payment method chosen         │
//! │       ▼                                                                 │
//! │  POST /api/sales  ──►  SaleDraft (THIS TYPE)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  draft.validate()  ──►  rejected BEFORE any write on failure           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleRepository::commit()  ──►  one atomic transaction                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft carries the unit prices the operator saw when the items were
//! rung up; those prices are the snapshot persisted with the sale, not the
//! live catalog price at commit time.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::PaymentMethod;
use crate::validation;
use crate::MAX_SALE_ITEMS;

// =============================================================================
// Sale Line
// =============================================================================

/// One proposed line item: product reference, quantity, and the unit price
/// frozen at ring-up time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    /// Product ID (UUID).
    pub product_id: String,

    /// Quantity to sell.
    pub quantity: i64,

    /// Unit price in centavos at time of sale (frozen).
    pub unit_price_cents: i64,
}

impl SaleLine {
    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }
}

// =============================================================================
// Sale Draft
// =============================================================================

/// A proposed sale, ready to be validated and committed.
///
/// ## Invariants (after `validate()` passes)
/// - At least one line, at most MAX_SALE_ITEMS
/// - Every quantity in 1..=MAX_ITEM_QUANTITY, every unit price >= 0
/// - `0 <= discount_cents <= subtotal_cents`, so the final amount is
///   never negative
/// - An installment count in 1..=MAX_INSTALLMENTS is present exactly when
///   the payment method requires one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    /// Optional customer reference (walk-in sales have none).
    pub customer_id: Option<String>,

    /// Line items. Order is preserved into the committed sale.
    pub lines: Vec<SaleLine>,

    /// Absolute discount in centavos applied to the whole sale.
    pub discount_cents: i64,

    /// How the customer settles the sale.
    pub payment_method: PaymentMethod,

    /// Number of monthly installments; only meaningful when
    /// `payment_method` is `Installments`.
    pub installments: Option<u32>,

    /// Free-form note from the operator.
    pub notes: Option<String>,
}

impl SaleDraft {
    /// Sum of all line totals, before discount.
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.line_total_cents()).sum()
    }

    /// Subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents())
    }

    /// Final amount: subtotal minus discount.
    #[inline]
    pub fn final_amount_cents(&self) -> i64 {
        self.subtotal_cents() - self.discount_cents
    }

    /// Final amount as Money.
    #[inline]
    pub fn final_amount(&self) -> Money {
        Money::from_cents(self.final_amount_cents())
    }

    /// Installment count for the commit engine: `Some` only when the
    /// payment method actually generates receivables.
    pub fn effective_installments(&self) -> Option<u32> {
        if self.payment_method.generates_receivables() {
            self.installments
        } else {
            None
        }
    }

    /// Validates the draft against every commit precondition.
    ///
    /// This is step 1 of the commit contract: any failure here happens
    /// before a single write. The commit engine calls this again inside
    /// the transaction, so the engine is safe even for callers that skip
    /// the early check.
    pub fn validate(&self) -> CoreResult<()> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptySale);
        }

        if self.lines.len() > MAX_SALE_ITEMS {
            return Err(ValidationError::OutOfRange {
                field: "items".to_string(),
                min: 1,
                max: MAX_SALE_ITEMS as i64,
            }
            .into());
        }

        for line in &self.lines {
            validation::validate_uuid(&line.product_id)?;
            validation::validate_quantity(line.quantity)?;
            validation::validate_price_cents(line.unit_price_cents)?;
        }

        if let Some(customer_id) = &self.customer_id {
            validation::validate_uuid(customer_id)?;
        }

        validation::validate_discount_cents(self.discount_cents)?;

        let subtotal = self.subtotal_cents();
        if self.discount_cents > subtotal {
            return Err(CoreError::DiscountExceedsSubtotal {
                discount_cents: self.discount_cents,
                subtotal_cents: subtotal,
            });
        }

        if self.payment_method.generates_receivables() {
            let count = self.installments.ok_or(CoreError::MissingInstallmentCount)?;
            validation::validate_installment_count(count)?;
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT_A: &str = "0191b6a2-1111-4a5e-9c3d-000000000001";
    const PRODUCT_B: &str = "0191b6a2-2222-4a5e-9c3d-000000000002";

    fn line(product_id: &str, quantity: i64, unit_price_cents: i64) -> SaleLine {
        SaleLine {
            product_id: product_id.to_string(),
            quantity,
            unit_price_cents,
        }
    }

    fn cash_draft() -> SaleDraft {
        SaleDraft {
            customer_id: None,
            lines: vec![line(PRODUCT_A, 3, 1000), line(PRODUCT_B, 1, 500)],
            discount_cents: 200,
            payment_method: PaymentMethod::Money,
            installments: None,
            notes: None,
        }
    }

    #[test]
    fn test_totals() {
        let draft = cash_draft();
        assert_eq!(draft.subtotal_cents(), 3500);
        assert_eq!(draft.final_amount_cents(), 3300);
    }

    #[test]
    fn test_valid_cash_draft() {
        assert!(cash_draft().validate().is_ok());
    }

    #[test]
    fn test_empty_sale_rejected() {
        let mut draft = cash_draft();
        draft.lines.clear();
        assert!(matches!(draft.validate(), Err(CoreError::EmptySale)));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut draft = cash_draft();
        draft.lines[0].quantity = 0;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut draft = cash_draft();
        draft.lines[0].unit_price_cents = -1;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_discount_above_subtotal_rejected() {
        let mut draft = cash_draft();
        draft.discount_cents = 10_000;
        assert!(matches!(
            draft.validate(),
            Err(CoreError::DiscountExceedsSubtotal { .. })
        ));
    }

    #[test]
    fn test_installments_require_count() {
        let mut draft = cash_draft();
        draft.payment_method = PaymentMethod::Installments;
        draft.installments = None;
        assert!(matches!(
            draft.validate(),
            Err(CoreError::MissingInstallmentCount)
        ));

        draft.installments = Some(3);
        assert!(draft.validate().is_ok());

        draft.installments = Some(0);
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_installment_count_ignored_for_cash() {
        let mut draft = cash_draft();
        draft.installments = Some(3);
        // Count is irrelevant for cash; the draft stays valid and the
        // commit engine sees no effective installments.
        assert!(draft.validate().is_ok());
        assert_eq!(draft.effective_installments(), None);
    }

    #[test]
    fn test_bad_product_id_rejected() {
        let mut draft = cash_draft();
        draft.lines[0].product_id = "not-a-uuid".to_string();
        assert!(draft.validate().is_err());
    }
}
