//! # Balcão POS API
//!
//! HTTP JSON surface for the sale/receivables core, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource (sales, payments, catalog, reports)
//! - **Session**: operator identification seam (header-based provider)
//! - **Error Handling**: consistent `{code, message}` error bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use balcao_pos_api::create_router;
//!
//! let app = create_router(db);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod session;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use balcao_db::Database;

use crate::handlers::{catalog, health, payments, reports, sales};

/// Application state shared across handlers.
///
/// The database handle is constructed once in `main` and injected here;
/// nothing reaches for a global instance.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Creates the main API router.
///
/// # Arguments
///
/// * `db` - Database handle (pool + repositories)
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(db: Database) -> Router {
    let state = AppState { db };

    // Public routes (no operator header required)
    let public_routes = Router::new().route("/health", get(health::health_check));

    // Report routes
    let report_routes = Router::new()
        .route("/sales", get(reports::sales_report))
        .route("/summary", get(reports::sales_summary))
        .route("/monthly-summary", get(reports::monthly_summary))
        .route("/receivables", get(reports::receivables_position))
        .route("/receivables/overdue", get(reports::overdue_receivables));

    // Core API routes
    let api_routes = Router::new()
        .route("/sales", post(sales::commit_sale))
        .route("/sales/:id", get(sales::get_sale))
        .route("/payments", post(payments::register_payment))
        .route("/products", get(catalog::search_products))
        .route("/customers", get(catalog::search_customers))
        .nest("/reports", report_routes);

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
