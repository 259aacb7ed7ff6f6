//! Catalog lookup endpoints: product and customer search for the counter
//! screen. These feed the client-held sale draft; the prices returned here
//! are the ones frozen into the draft's lines.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use balcao_core::{validation, Customer, Product};

use crate::error::ApiError;
use crate::AppState;

/// Default and ceiling for search result counts.
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search term; empty lists default results.
    #[serde(default)]
    pub q: String,
    pub limit: Option<u32>,
}

impl SearchParams {
    fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }
}

/// GET /api/products?q=cafe
///
/// Searches active, in-stock products by code or name.
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let query = validation::validate_search_query(&params.q)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let products = state.db.products().search(&query, params.limit()).await?;

    Ok(Json(products))
}

/// GET /api/customers?q=maria
///
/// Searches active customers by name or document.
pub async fn search_customers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let query = validation::validate_search_query(&params.q)
        .map_err(|e| ApiError::validation(e.to_string()))?;

    let customers = state.db.customers().search(&query, params.limit()).await?;

    Ok(Json(customers))
}
