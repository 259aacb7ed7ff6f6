//! # Repository Implementations
//!
//! One repository per aggregate. Each repository owns the SQL touching its
//! tables; cross-aggregate writes (the sale commit touching products and
//! receivables) stay inside a single transaction owned by the repository
//! that starts it.

pub mod customer;
pub mod product;
pub mod receivable;
pub mod report;
pub mod sale;
