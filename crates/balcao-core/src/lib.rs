//! # balcao-core: Pure Business Logic for Balcão POS
//!
//! This crate is the **heart** of Balcão POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Balcão POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/pos-api (Axum)                          │   │
//! │  │    POST /api/sales, POST /api/payments, GET /api/reports/...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ balcao-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   draft   │  │ schedule  │  │   │
//! │  │   │  Product  │  │   Money   │  │ SaleDraft │  │Installment│  │   │
//! │  │   │   Sale    │  │   split   │  │  totals   │  │ due dates │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    balcao-db (Database Layer)                   │   │
//! │  │        SQLite queries, migrations, commit engine, ledger        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Sale, Receivable, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`draft`] - Proposed-sale aggregation and commit validation
//! - [`schedule`] - Installment schedule generation for credit sales
//! - [`validation`] - Field-level validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Explicit Time**: Anything date-dependent takes the date as an argument

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod money;
pub mod schedule;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use balcao_core::Money` instead of
// `use balcao_core::money::Money`

pub use draft::{SaleDraft, SaleLine};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use schedule::{build_schedule, Installment};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct line items allowed in a single sale
///
/// ## Business Reason
/// Prevents runaway payloads and ensures reasonable transaction sizes.
pub const MAX_SALE_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum number of installments a sale can be split into
///
/// The counter UI offers up to 6x; the API accepts a little more headroom
/// for back-office adjustments, but never an open-ended plan.
pub const MAX_INSTALLMENTS: u32 = 12;
