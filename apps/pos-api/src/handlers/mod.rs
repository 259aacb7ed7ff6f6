//! # Request Handlers
//!
//! One module per resource. Handlers stay thin: deserialize, validate via
//! balcao-core, call the repository, map the result to a response DTO.
//! Every clock read (`Utc::now()`) happens here at the edge; the layers
//! below receive explicit instants.

pub mod catalog;
pub mod health;
pub mod payments;
pub mod reports;
pub mod sales;
