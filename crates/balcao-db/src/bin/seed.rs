//! # Seed Data Generator
//!
//! Populates the database with test products and customers for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p balcao-db --bin seed
//!
//! # Specify database path and product count
//! cargo run -p balcao-db --bin seed -- --db ./data/balcao.db --count 500
//! ```
//!
//! Prices and stock levels are derived deterministically from the product
//! index so repeated seeds produce the same catalog.

use chrono::Utc;
use std::env;
use uuid::Uuid;

use balcao_core::{Customer, EntityStatus, Product};
use balcao_db::{Database, DbConfig};

/// Product categories with base names for realistic test data.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "BEB",
        &[
            "Refrigerante Cola 350ml",
            "Refrigerante Guaraná 350ml",
            "Água Mineral 500ml",
            "Suco de Laranja 1L",
            "Suco de Uva 1L",
            "Cerveja Pilsen 350ml",
            "Café Torrado 500g",
            "Chá Mate 1L",
        ],
    ),
    (
        "MER",
        &[
            "Arroz Branco 5kg",
            "Feijão Carioca 1kg",
            "Açúcar Refinado 1kg",
            "Sal Refinado 1kg",
            "Óleo de Soja 900ml",
            "Macarrão Espaguete 500g",
            "Farinha de Trigo 1kg",
            "Molho de Tomate 340g",
        ],
    ),
    (
        "LIM",
        &[
            "Detergente Neutro 500ml",
            "Sabão em Pó 1kg",
            "Água Sanitária 1L",
            "Esponja de Aço",
            "Desinfetante 500ml",
        ],
    ),
    (
        "PAD",
        &[
            "Pão Francês kg",
            "Pão de Forma 500g",
            "Bolo de Fubá",
            "Biscoito Recheado 140g",
        ],
    ),
];

/// Sample customers with valid CPF/CNPJ check digits.
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Maria Oliveira", "52998224725", "(11) 98765-4321"),
    ("Mercado Vizinho Ltda", "11222333000181", "(11) 3456-7890"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let db_path = arg_value(&args, "--db").unwrap_or_else(|| "./balcao.db".to_string());
    let count: usize = arg_value(&args, "--count")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let now = Utc::now();
    let mut inserted = 0usize;
    let mut index = 0usize;

    'outer: for (prefix, names) in CATEGORIES {
        for name in *names {
            if count > 0 && inserted >= count {
                break 'outer;
            }

            index += 1;
            let product = Product {
                id: Uuid::new_v4().to_string(),
                code: format!("{}-{:03}", prefix, index),
                name: (*name).to_string(),
                // Deterministic spread: R$ 1,99 .. R$ 35,99
                price_cents: 199 + (index as i64 * 137) % 3400,
                stock_quantity: 10 + (index as i64 * 7) % 90,
                status: EntityStatus::Active,
                created_at: now,
                updated_at: now,
            };

            match db.products().insert(&product).await {
                Ok(()) => inserted += 1,
                // Re-running the seed against an existing database is fine
                Err(balcao_db::DbError::UniqueViolation { .. }) => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    for (name, document, phone) in CUSTOMERS {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            document: (*document).to_string(),
            phone: Some((*phone).to_string()),
            email: None,
            status: EntityStatus::Active,
            created_at: now,
            updated_at: now,
        };

        match db.customers().insert(&customer).await {
            Ok(()) => {}
            Err(balcao_db::DbError::UniqueViolation { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let total = db.products().count().await?;
    println!("Seeded {} products ({} total active) into {}", inserted, total, db_path);

    db.close().await;
    Ok(())
}

/// Returns the value following `flag` in the argument list, if any.
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
