//! # Validation Module
//!
//! Input validation utilities for Balcão POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (serde)                                         │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: field and business rule validation                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commit engine (balcao-db)                                    │
//! │  ├── Draft re-validated inside the transaction                         │
//! │  └── Conditional updates enforce stock and balance floors              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE / FK constraints                                │
//! │  └── CHECK constraints on quantities and balances                      │
//! │                                                                         │
//! │  Defense in depth: each layer catches a different class of error       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_INSTALLMENTS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (product or customer).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (returns default results)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in centavos.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, promotions)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount in centavos.
///
/// Range against the subtotal is checked separately by the sale draft;
/// here we only reject negative values.
pub fn validate_discount_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a payment amount in centavos.
///
/// ## Rules
/// - Must be positive (> 0)
/// - The "not above remaining balance" rule is enforced by the ledger,
///   which is the only place that knows the current balance
pub fn validate_payment_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates an installment count.
///
/// ## Rules
/// - Must be between 1 and MAX_INSTALLMENTS
pub fn validate_installment_count(count: u32) -> ValidationResult<()> {
    if count < 1 || count > MAX_INSTALLMENTS {
        return Err(ValidationError::OutOfRange {
            field: "installments".to_string(),
            min: 1,
            max: MAX_INSTALLMENTS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Document Validators (CPF / CNPJ)
// =============================================================================

/// Validates a Brazilian taxpayer document: CPF (11 digits) or CNPJ (14).
///
/// Formatting characters (dots, dashes, slashes) are stripped before
/// checking; both check digits are verified with the standard mod-11
/// weighting. Sequences of a single repeated digit pass the arithmetic but
/// are not real documents, so they are rejected explicitly.
///
/// ## Example
/// ```rust
/// use balcao_core::validation::validate_document;
///
/// assert!(validate_document("529.982.247-25").is_ok());   // CPF
/// assert!(validate_document("11.222.333/0001-81").is_ok()); // CNPJ
/// assert!(validate_document("111.111.111-11").is_err());
/// ```
pub fn validate_document(document: &str) -> ValidationResult<()> {
    let digits: Vec<u32> = document.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.is_empty() {
        return Err(ValidationError::Required {
            field: "document".to_string(),
        });
    }

    let valid = match digits.len() {
        11 => is_valid_cpf(&digits),
        14 => is_valid_cnpj(&digits),
        _ => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "document".to_string(),
            reason: "must be a valid CPF or CNPJ".to_string(),
        });
    }

    Ok(())
}

/// CPF check-digit verification (digits 10 and 11).
fn is_valid_cpf(digits: &[u32]) -> bool {
    if all_same(digits) {
        return false;
    }

    // Check digit t (0-based index) is computed over the first t digits
    // with weights (t+1) down to 2.
    for t in [9usize, 10] {
        let sum: u32 = digits[..t]
            .iter()
            .enumerate()
            .map(|(c, d)| d * (t as u32 + 1 - c as u32))
            .sum();
        let expected = ((10 * sum) % 11) % 10;
        if digits[t] != expected {
            return false;
        }
    }

    true
}

/// CNPJ check-digit verification (digits 13 and 14).
fn is_valid_cnpj(digits: &[u32]) -> bool {
    if all_same(digits) {
        return false;
    }

    // Weights count down from the start value and wrap from 2 back to 9.
    fn check_digit(digits: &[u32], start_weight: u32) -> u32 {
        let mut weight = start_weight;
        let mut sum = 0u32;
        for d in digits {
            sum += d * weight;
            weight = if weight == 2 { 9 } else { weight - 1 };
        }
        ((10 * sum) % 11) % 10
    }

    digits[12] == check_digit(&digits[..12], 5) && digits[13] == check_digit(&digits[..13], 6)
}

fn all_same(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

// =============================================================================
// Unit Tests
// =============================================================================
