//! # Installment Schedule
//!
//! Generates the receivable schedule for a sale paid in installments.
//!
//! ## Cadence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale committed 2026-01-15, R$ 300,00 in 3 installments                 │
//! │                                                                         │
//! │  #1  due 2026-02-15   R$ 100,00                                         │
//! │  #2  due 2026-03-15   R$ 100,00                                         │
//! │  #3  due 2026-04-15   R$ 100,00                                         │
//! │                                                                         │
//! │  Installment i is due i calendar months after the commit date.          │
//! │  Month-end dates clamp: Jan 31 + 1 month = Feb 28 (chrono semantics).  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts come from [`Money::split`], so the schedule always sums back to
//! the sale's final amount exactly; any centavo remainder sits in the last
//! installment.

use chrono::{Months, NaiveDate};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::validate_installment_count;

// =============================================================================
// Installment
// =============================================================================

/// One entry of a generated schedule, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    /// 1-based position within the sale's schedule.
    pub number: u32,

    /// Portion of the sale's final amount owed by this installment.
    pub amount: Money,

    /// Calendar date this installment falls due.
    pub due_date: NaiveDate,
}

// =============================================================================
// Schedule Generation
// =============================================================================

/// Builds the installment schedule for a sale.
///
/// ## Arguments
/// * `total` - The sale's final amount (subtotal minus discount)
/// * `count` - Number of installments, 1..=MAX_INSTALLMENTS
/// * `from` - The commit date; the first installment is due one month later
///
/// ## Guarantees
/// - `sum(amounts) == total` exactly (remainder in the last installment)
/// - Due dates are strictly monthly from the commit date
/// - Installment numbers are 1..=count with no gaps
pub fn build_schedule(total: Money, count: u32, from: NaiveDate) -> CoreResult<Vec<Installment>> {
    validate_installment_count(count)?;

    let amounts = total.split(count);

    amounts
        .into_iter()
        .enumerate()
        .map(|(idx, amount)| {
            let number = idx as u32 + 1;
            let due_date = from
                .checked_add_months(Months::new(number))
                .ok_or(CoreError::DueDateOutOfRange { number })?;

            Ok(Installment {
                number,
                amount,
                due_date,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_even_split_monthly_cadence() {
        let schedule = build_schedule(Money::from_cents(30000), 3, date(2026, 1, 15)).unwrap();

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0].number, 1);
        assert_eq!(schedule[0].amount.cents(), 10000);
        assert_eq!(schedule[0].due_date, date(2026, 2, 15));
        assert_eq!(schedule[1].due_date, date(2026, 3, 15));
        assert_eq!(schedule[2].due_date, date(2026, 4, 15));
    }

    #[test]
    fn test_remainder_lands_in_last_installment() {
        let schedule = build_schedule(Money::from_cents(10000), 3, date(2026, 1, 1)).unwrap();

        assert_eq!(schedule[0].amount.cents(), 3333);
        assert_eq!(schedule[1].amount.cents(), 3333);
        assert_eq!(schedule[2].amount.cents(), 3334);

        let sum: i64 = schedule.iter().map(|i| i.amount.cents()).sum();
        assert_eq!(sum, 10000);
    }

    #[test]
    fn test_single_installment() {
        let schedule = build_schedule(Money::from_cents(4990), 1, date(2026, 6, 10)).unwrap();

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].amount.cents(), 4990);
        assert_eq!(schedule[0].due_date, date(2026, 7, 10));
    }

    #[test]
    fn test_month_end_clamping() {
        // Jan 31 + 1 month clamps to Feb 28 (2026 is not a leap year)
        let schedule = build_schedule(Money::from_cents(6000), 2, date(2026, 1, 31)).unwrap();

        assert_eq!(schedule[0].due_date, date(2026, 2, 28));
        assert_eq!(schedule[1].due_date, date(2026, 3, 31));
    }

    #[test]
    fn test_year_rollover() {
        let schedule = build_schedule(Money::from_cents(9000), 3, date(2026, 11, 5)).unwrap();

        assert_eq!(schedule[0].due_date, date(2026, 12, 5));
        assert_eq!(schedule[1].due_date, date(2027, 1, 5));
        assert_eq!(schedule[2].due_date, date(2027, 2, 5));
    }

    #[test]
    fn test_invalid_count_rejected() {
        assert!(build_schedule(Money::from_cents(1000), 0, date(2026, 1, 1)).is_err());
        assert!(build_schedule(Money::from_cents(1000), 13, date(2026, 1, 1)).is_err());
    }
}
