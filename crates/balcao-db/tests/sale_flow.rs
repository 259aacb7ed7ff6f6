//! End-to-end tests for the sale commit engine, the receivable ledger, and
//! the reporting views, against an in-memory SQLite database.
//!
//! Every date-sensitive call receives an explicit instant, so the scenarios
//! are deterministic regardless of when the suite runs.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use balcao_core::{
    CoreError, Customer, EntityStatus, PaymentMethod, Product, ReceivableStatus, SaleDraft,
    SaleLine, SaleStatus,
};
use balcao_db::{Database, DbConfig, DbError};

// =============================================================================
// Helpers
// =============================================================================

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn insert_product(db: &Database, code: &str, price_cents: i64, stock: i64) -> Product {
    let now = at(2026, 1, 1);
    let product = Product {
        id: Uuid::new_v4().to_string(),
        code: code.to_string(),
        name: format!("Produto {}", code),
        price_cents,
        stock_quantity: stock,
        status: EntityStatus::Active,
        created_at: now,
        updated_at: now,
    };
    db.products().insert(&product).await.expect("insert product");
    product
}

async fn insert_customer(db: &Database, name: &str, document: &str) -> Customer {
    let now = at(2026, 1, 1);
    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        document: document.to_string(),
        phone: None,
        email: None,
        status: EntityStatus::Active,
        created_at: now,
        updated_at: now,
    };
    db.customers()
        .insert(&customer)
        .await
        .expect("insert customer");
    customer
}

fn draft(lines: Vec<SaleLine>, discount_cents: i64, payment_method: PaymentMethod) -> SaleDraft {
    SaleDraft {
        customer_id: None,
        lines,
        discount_cents,
        payment_method,
        installments: None,
        notes: None,
    }
}

fn line(product: &Product, quantity: i64) -> SaleLine {
    SaleLine {
        product_id: product.id.clone(),
        quantity,
        unit_price_cents: product.price_cents,
    }
}

async fn count_rows(db: &Database, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(db.pool())
        .await
        .expect("count")
}

// =============================================================================
// Scenario A: cash sale
// =============================================================================

#[tokio::test]
async fn cash_sale_commits_items_and_stock_without_receivables() {
    let db = test_db().await;
    let a = insert_product(&db, "PROD-A", 1000, 10).await;
    let b = insert_product(&db, "PROD-B", 500, 10).await;

    let draft = draft(
        vec![line(&a, 3), line(&b, 1)],
        200,
        PaymentMethod::Money,
    );

    let committed = db
        .sales()
        .commit(&draft, "operator-1", at(2026, 3, 10))
        .await
        .expect("commit");

    assert_eq!(committed.sale.subtotal_cents, 3500);
    assert_eq!(committed.sale.final_amount_cents, 3300);
    assert_eq!(committed.sale.status, SaleStatus::Completed);
    assert_eq!(committed.items.len(), 2);
    assert!(committed.receivables.is_empty());

    // Line totals sum back to the subtotal
    let line_sum: i64 = committed.items.iter().map(|i| i.line_total_cents).sum();
    assert_eq!(line_sum, committed.sale.subtotal_cents);

    // The sale is queryable and stock moved exactly once per line
    let stored = db
        .sales()
        .get_by_id(&committed.sale.id)
        .await
        .unwrap()
        .expect("stored sale");
    assert_eq!(stored.final_amount_cents, 3300);

    let items = db.sales().get_items(&committed.sale.id).await.unwrap();
    assert_eq!(items.len(), 2);

    let a_after = db.products().get_by_id(&a.id).await.unwrap().unwrap();
    let b_after = db.products().get_by_id(&b.id).await.unwrap().unwrap();
    assert_eq!(a_after.stock_quantity, 7);
    assert_eq!(b_after.stock_quantity, 9);

    assert_eq!(count_rows(&db, "receivables").await, 0);
}

// =============================================================================
// Scenario B: installment sale
// =============================================================================

#[tokio::test]
async fn installment_sale_generates_monthly_schedule() {
    let db = test_db().await;
    let product = insert_product(&db, "PROD-A", 30000, 5).await;
    let customer = insert_customer(&db, "Maria Oliveira", "52998224725").await;

    let mut draft = draft(vec![line(&product, 1)], 0, PaymentMethod::Installments);
    draft.customer_id = Some(customer.id.clone());
    draft.installments = Some(3);

    let committed = db
        .sales()
        .commit(&draft, "operator-1", at(2026, 1, 15))
        .await
        .expect("commit");

    assert_eq!(committed.sale.final_amount_cents, 30000);
    assert_eq!(committed.receivables.len(), 3);

    let receivables = db
        .receivables()
        .list_by_sale(&committed.sale.id)
        .await
        .unwrap();
    assert_eq!(receivables.len(), 3);

    for (idx, r) in receivables.iter().enumerate() {
        assert_eq!(r.installment_number, idx as i64 + 1);
        assert_eq!(r.amount_cents, 10000);
        assert_eq!(r.paid_amount_cents, 0);
        assert_eq!(r.status, ReceivableStatus::Pending);
        assert_eq!(r.payment_date, None);
    }

    assert_eq!(receivables[0].due_date, date(2026, 2, 15));
    assert_eq!(receivables[1].due_date, date(2026, 3, 15));
    assert_eq!(receivables[2].due_date, date(2026, 4, 15));
}

#[tokio::test]
async fn installment_split_remainder_stays_in_last_installment() {
    let db = test_db().await;
    let product = insert_product(&db, "PROD-A", 10000, 5).await;

    let mut draft = draft(vec![line(&product, 1)], 0, PaymentMethod::Installments);
    draft.installments = Some(3);

    let committed = db
        .sales()
        .commit(&draft, "operator-1", at(2026, 1, 1))
        .await
        .expect("commit");

    let amounts: Vec<i64> = committed
        .receivables
        .iter()
        .map(|r| r.amount_cents)
        .collect();
    assert_eq!(amounts, vec![3333, 3333, 3334]);

    let sum: i64 = amounts.iter().sum();
    assert_eq!(sum, committed.sale.final_amount_cents);
}

// =============================================================================
// Scenarios C and D: payment registration
// =============================================================================

async fn installment_sale(db: &Database, total_cents: i64, count: u32) -> Vec<String> {
    let product = insert_product(db, &format!("INST-{}", Uuid::new_v4()), total_cents, 100).await;

    let mut d = draft(vec![line(&product, 1)], 0, PaymentMethod::Installments);
    d.installments = Some(count);

    let committed = db
        .sales()
        .commit(&d, "operator-1", at(2026, 1, 15))
        .await
        .expect("commit");

    committed.receivables.iter().map(|r| r.id.clone()).collect()
}

#[tokio::test]
async fn full_payment_settles_receivable_and_stamps_payment_date() {
    let db = test_db().await;
    let ids = installment_sale(&db, 30000, 3).await;

    let today = date(2026, 2, 20);
    let updated = db
        .receivables()
        .register_payment(&ids[0], 10000, today)
        .await
        .expect("payment");

    assert_eq!(updated.paid_amount_cents, 10000);
    assert_eq!(updated.status, ReceivableStatus::Paid);
    assert_eq!(updated.payment_date, Some(today));
}

#[tokio::test]
async fn overpayment_is_rejected_with_no_state_change() {
    let db = test_db().await;
    let ids = installment_sale(&db, 30000, 3).await;

    let err = db
        .receivables()
        .register_payment(&ids[0], 15000, date(2026, 2, 20))
        .await
        .expect_err("overpayment must fail");

    assert!(matches!(
        err,
        DbError::PaymentExceedsBalance {
            amount_cents: 15000,
            remaining_cents: 10000,
        }
    ));

    let unchanged = db.receivables().get_by_id(&ids[0]).await.unwrap().unwrap();
    assert_eq!(unchanged.paid_amount_cents, 0);
    assert_eq!(unchanged.status, ReceivableStatus::Pending);
    assert_eq!(unchanged.payment_date, None);
}

#[tokio::test]
async fn partial_payments_walk_the_state_machine_monotonically() {
    let db = test_db().await;
    let ids = installment_sale(&db, 30000, 3).await;
    let id = &ids[0];

    // pending → partial
    let after_first = db
        .receivables()
        .register_payment(id, 2500, date(2026, 2, 10))
        .await
        .unwrap();
    assert_eq!(after_first.paid_amount_cents, 2500);
    assert_eq!(after_first.status, ReceivableStatus::Partial);
    assert_eq!(after_first.payment_date, None);

    // partial payment above the remaining balance is rejected
    let err = db
        .receivables()
        .register_payment(id, 8000, date(2026, 2, 12))
        .await
        .expect_err("exceeds remaining");
    assert!(matches!(err, DbError::PaymentExceedsBalance { .. }));

    // partial → paid
    let after_second = db
        .receivables()
        .register_payment(id, 7500, date(2026, 2, 15))
        .await
        .unwrap();
    assert_eq!(after_second.paid_amount_cents, 10000);
    assert_eq!(after_second.status, ReceivableStatus::Paid);
    assert_eq!(after_second.payment_date, Some(date(2026, 2, 15)));

    // paid is terminal: remaining is zero, any further payment is rejected
    let err = db
        .receivables()
        .register_payment(id, 1, date(2026, 2, 16))
        .await
        .expect_err("paid is terminal");
    assert!(matches!(
        err,
        DbError::PaymentExceedsBalance {
            remaining_cents: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn non_positive_payments_are_rejected() {
    let db = test_db().await;
    let ids = installment_sale(&db, 30000, 3).await;

    for bad in [0, -100] {
        let err = db
            .receivables()
            .register_payment(&ids[0], bad, date(2026, 2, 20))
            .await
            .expect_err("non-positive payment");
        assert!(matches!(err, DbError::PaymentExceedsBalance { .. }));
    }
}

#[tokio::test]
async fn payment_against_unknown_receivable_is_not_found() {
    let db = test_db().await;

    let err = db
        .receivables()
        .register_payment(&Uuid::new_v4().to_string(), 100, date(2026, 2, 20))
        .await
        .expect_err("unknown receivable");
    assert!(matches!(err, DbError::NotFound { .. }));
}

// =============================================================================
// Atomicity and stock protection
// =============================================================================

#[tokio::test]
async fn insufficient_stock_rejects_the_whole_commit() {
    let db = test_db().await;
    let plenty = insert_product(&db, "PROD-A", 1000, 50).await;
    let scarce = insert_product(&db, "PROD-B", 500, 2).await;

    // First line is satisfiable, second is not: nothing may persist.
    let draft = draft(
        vec![line(&plenty, 5), line(&scarce, 3)],
        0,
        PaymentMethod::Money,
    );

    let err = db
        .sales()
        .commit(&draft, "operator-1", at(2026, 3, 10))
        .await
        .expect_err("oversell must fail");

    match err {
        DbError::InsufficientStock {
            code,
            available,
            requested,
        } => {
            assert_eq!(code, "PROD-B");
            assert_eq!(available, 2);
            assert_eq!(requested, 3);
        }
        other => panic!("expected InsufficientStock, got {:?}", other),
    }

    // Full rollback: no sale, no items, and the first line's decrement undone
    assert_eq!(count_rows(&db, "sales").await, 0);
    assert_eq!(count_rows(&db, "sale_items").await, 0);

    let plenty_after = db.products().get_by_id(&plenty.id).await.unwrap().unwrap();
    assert_eq!(plenty_after.stock_quantity, 50);
}

#[tokio::test]
async fn exact_stock_sale_succeeds_and_drains_to_zero() {
    let db = test_db().await;
    let product = insert_product(&db, "PROD-A", 1000, 3).await;

    let d = draft(vec![line(&product, 3)], 0, PaymentMethod::Pix);
    db.sales()
        .commit(&d, "operator-1", at(2026, 3, 10))
        .await
        .expect("exact stock is sellable");

    let after = db.products().get_by_id(&product.id).await.unwrap().unwrap();
    assert_eq!(after.stock_quantity, 0);

    // The next unit is not sellable
    let d = draft(vec![line(&product, 1)], 0, PaymentMethod::Pix);
    let err = db
        .sales()
        .commit(&d, "operator-1", at(2026, 3, 10))
        .await
        .expect_err("drained product");
    assert!(matches!(err, DbError::InsufficientStock { .. }));
}

#[tokio::test]
async fn invalid_drafts_are_rejected_before_any_write() {
    let db = test_db().await;
    insert_product(&db, "PROD-A", 1000, 10).await;

    let empty = draft(vec![], 0, PaymentMethod::Money);
    let err = db
        .sales()
        .commit(&empty, "operator-1", at(2026, 3, 10))
        .await
        .expect_err("empty sale");
    assert!(matches!(err, DbError::Invalid(CoreError::EmptySale)));

    assert_eq!(count_rows(&db, "sales").await, 0);
}

#[tokio::test]
async fn unknown_product_reference_fails_the_commit() {
    let db = test_db().await;

    let ghost = SaleLine {
        product_id: Uuid::new_v4().to_string(),
        quantity: 1,
        unit_price_cents: 1000,
    };
    let err = db
        .sales()
        .commit(&draft(vec![ghost], 0, PaymentMethod::Money), "op", at(2026, 3, 10))
        .await
        .expect_err("unknown product");
    assert!(matches!(err, DbError::NotFound { .. }));

    assert_eq!(count_rows(&db, "sales").await, 0);
}

#[tokio::test]
async fn unknown_customer_reference_fails_the_commit() {
    let db = test_db().await;
    let product = insert_product(&db, "PROD-A", 1000, 10).await;

    let mut d = draft(vec![line(&product, 1)], 0, PaymentMethod::Money);
    d.customer_id = Some(Uuid::new_v4().to_string());

    let err = db
        .sales()
        .commit(&d, "operator-1", at(2026, 3, 10))
        .await
        .expect_err("unknown customer");
    assert!(matches!(err, DbError::NotFound { .. }));

    assert_eq!(count_rows(&db, "sales").await, 0);
    let after = db.products().get_by_id(&product.id).await.unwrap().unwrap();
    assert_eq!(after.stock_quantity, 10);
}

// =============================================================================
// Reporting views
// =============================================================================

#[tokio::test]
async fn sales_buckets_respect_period_boundaries() {
    let db = test_db().await;
    let product = insert_product(&db, "PROD-A", 1000, 100).await;

    // Two sales on March 10, one on March 11, one outside the range
    for (day, qty) in [(10, 2), (10, 3), (11, 1), (20, 4)] {
        let d = draft(vec![line(&product, qty)], 0, PaymentMethod::Money);
        db.sales()
            .commit(&d, "operator-1", at(2026, 3, day))
            .await
            .expect("commit");
    }

    let buckets = db
        .reports()
        .sales_by_day(date(2026, 3, 10), date(2026, 3, 11))
        .await
        .unwrap();

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].period, "2026-03-10");
    assert_eq!(buckets[0].total_cents, 5000);
    assert_eq!(buckets[1].period, "2026-03-11");
    assert_eq!(buckets[1].total_cents, 1000);

    let months = db
        .reports()
        .sales_by_month(date(2026, 3, 1), date(2026, 3, 31))
        .await
        .unwrap();
    assert_eq!(months.len(), 1);
    assert_eq!(months[0].period, "2026-03");
    assert_eq!(months[0].total_cents, 10000);
}

#[tokio::test]
async fn sales_summary_covers_today_week_and_month() {
    let db = test_db().await;
    let product = insert_product(&db, "PROD-A", 1000, 100).await;

    // today (Mar 15), within the week (Mar 10), within the month (Mar 1),
    // previous month (Feb 20)
    for (m, day, qty) in [(3, 15, 1), (3, 10, 2), (3, 1, 3), (2, 20, 4)] {
        let d = draft(vec![line(&product, qty)], 0, PaymentMethod::Money);
        db.sales()
            .commit(&d, "operator-1", at(2026, m, day))
            .await
            .expect("commit");
    }

    let summary = db.reports().sales_summary(date(2026, 3, 15)).await.unwrap();

    assert_eq!(summary.today_cents, 1000);
    assert_eq!(summary.week_cents, 3000); // Mar 15 + Mar 10
    assert_eq!(summary.month_cents, 6000); // all three March sales
}

#[tokio::test]
async fn monthly_summary_breaks_down_payment_methods() {
    let db = test_db().await;
    let product = insert_product(&db, "PROD-A", 1000, 100).await;

    for (method, qty) in [
        (PaymentMethod::Money, 1),
        (PaymentMethod::Money, 2),
        (PaymentMethod::Pix, 3),
    ] {
        let d = draft(vec![line(&product, qty)], 0, method);
        db.sales()
            .commit(&d, "operator-1", at(2026, 3, 12))
            .await
            .expect("commit");
    }

    let summary = db
        .reports()
        .monthly_summary(date(2026, 3, 15))
        .await
        .unwrap();

    assert_eq!(summary.total_sales_cents, 6000);
    assert_eq!(summary.transaction_count, 3);
    assert_eq!(summary.average_sale_cents, 2000);

    assert_eq!(summary.payment_methods.len(), 2);
    let money = summary
        .payment_methods
        .iter()
        .find(|m| m.payment_method == "money")
        .expect("money bucket");
    assert_eq!(money.count, 2);
    assert_eq!(money.total_cents, 3000);
}

#[tokio::test]
async fn receivables_split_into_upcoming_and_overdue() {
    let db = test_db().await;
    let customer = insert_customer(&db, "Maria Oliveira", "52998224725").await;
    let product = insert_product(&db, "PROD-A", 30000, 100).await;

    let mut d = draft(vec![line(&product, 1)], 0, PaymentMethod::Installments);
    d.customer_id = Some(customer.id.clone());
    d.installments = Some(3);

    // Committed Jan 15: due Feb 15, Mar 15, Apr 15
    let committed = db
        .sales()
        .commit(&d, "operator-1", at(2026, 1, 15))
        .await
        .expect("commit");

    // Partially pay the first installment so the overdue balance is partial
    db.receivables()
        .register_payment(&committed.receivables[0].id, 4000, date(2026, 2, 16))
        .await
        .unwrap();

    // As of Mar 20: Feb 15 (6000 open) and Mar 15 (10000) are overdue,
    // Apr 15 (10000) is upcoming
    let position = db
        .reports()
        .receivables_position(date(2026, 3, 20))
        .await
        .unwrap();
    assert_eq!(position.overdue_cents, 16000);
    assert_eq!(position.upcoming_cents, 10000);

    let overdue = db
        .reports()
        .overdue_receivables(date(2026, 3, 20))
        .await
        .unwrap();
    assert_eq!(overdue.len(), 2);

    assert_eq!(overdue[0].due_date, date(2026, 2, 15));
    assert_eq!(overdue[0].remaining_cents, 6000);
    assert_eq!(overdue[0].days_overdue, 33);
    assert_eq!(overdue[0].customer_name.as_deref(), Some("Maria Oliveira"));

    assert_eq!(overdue[1].due_date, date(2026, 3, 15));
    assert_eq!(overdue[1].remaining_cents, 10000);
    assert_eq!(overdue[1].days_overdue, 5);
}

#[tokio::test]
async fn paid_receivables_leave_the_aging_buckets() {
    let db = test_db().await;
    let product = insert_product(&db, "PROD-A", 10000, 100).await;

    let mut d = draft(vec![line(&product, 1)], 0, PaymentMethod::Installments);
    d.installments = Some(1);

    let committed = db
        .sales()
        .commit(&d, "operator-1", at(2026, 1, 15))
        .await
        .expect("commit");

    // Settle it after the due date: it must not show up as overdue
    db.receivables()
        .register_payment(&committed.receivables[0].id, 10000, date(2026, 3, 1))
        .await
        .unwrap();

    let position = db
        .reports()
        .receivables_position(date(2026, 3, 20))
        .await
        .unwrap();
    assert_eq!(position.overdue_cents, 0);
    assert_eq!(position.upcoming_cents, 0);

    let overdue = db
        .reports()
        .overdue_receivables(date(2026, 3, 20))
        .await
        .unwrap();
    assert!(overdue.is_empty());
}

// =============================================================================
// Catalog lookups
// =============================================================================

#[tokio::test]
async fn product_search_filters_inactive_and_out_of_stock() {
    let db = test_db().await;
    let now = at(2026, 1, 1);

    insert_product(&db, "CAFE-500", 1850, 10).await;
    insert_product(&db, "CAFE-250", 990, 0).await; // out of stock

    let inactive = Product {
        id: Uuid::new_v4().to_string(),
        code: "CAFE-OLD".to_string(),
        name: "Café Descontinuado".to_string(),
        price_cents: 500,
        stock_quantity: 10,
        status: EntityStatus::Inactive,
        created_at: now,
        updated_at: now,
    };
    db.products().insert(&inactive).await.unwrap();

    let found = db.products().search("CAFE", 10).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code, "CAFE-500");
}

#[tokio::test]
async fn customer_search_matches_name_and_document() {
    let db = test_db().await;
    insert_customer(&db, "Maria Oliveira", "52998224725").await;
    insert_customer(&db, "Mercado Vizinho Ltda", "11222333000181").await;

    let by_name = db.customers().search("maria", 10).await.unwrap();
    assert_eq!(by_name.len(), 1);

    let by_document = db.customers().search("11222333", 10).await.unwrap();
    assert_eq!(by_document.len(), 1);
    assert_eq!(by_document[0].name, "Mercado Vizinho Ltda");
}
