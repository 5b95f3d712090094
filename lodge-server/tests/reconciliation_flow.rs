//! End-to-end workflow tests for the shift / assignment / sale /
//! closing-balance chain, run against a real SQLite file in a temp dir.

use sqlx::SqlitePool;
use tempfile::TempDir;

use lodge_server::db::DbService;
use lodge_server::db::repository::{
    RepoError, assignment, closing_balance, item, sale, shift, staff,
};
use shared::models::{ItemCreate, ShiftClose, ShiftStart, StaffRole};

async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("test.db");
    let db = DbService::new(path.to_str().unwrap()).await.expect("open db");
    (dir, db.pool)
}

async fn seed_staff(pool: &SqlitePool, name: &str) -> i64 {
    staff::create(
        pool,
        name,
        &format!("{}@example.com", name.to_lowercase()),
        StaffRole::Staff,
        "hash",
    )
    .await
    .expect("create staff")
    .id
}

async fn seed_item(pool: &SqlitePool, name: &str, price: f64, quantity: i64) -> i64 {
    item::create(
        pool,
        &ItemCreate {
            name: name.to_string(),
            price,
            total_quantity: quantity,
            low_stock_threshold: 0,
        },
    )
    .await
    .expect("create item")
    .id
}

fn open_shift() -> ShiftStart {
    ShiftStart {
        confirmed_stock: true,
        stock_remarks: None,
    }
}

#[tokio::test]
async fn assign_moves_stock_out_of_the_pool() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let item_id = seed_item(&pool, "Cola", 50.0, 10).await;

    let a = assignment::assign(&pool, staff_id, item_id, 6).await.unwrap();
    assert_eq!(a.quantity_assigned, 6);

    let remaining = item::find_by_id(&pool, item_id).await.unwrap().unwrap();
    assert_eq!(remaining.total_quantity, 4);

    // More than what's left in the pool
    let err = assignment::assign(&pool, staff_id, item_id, 5).await.unwrap_err();
    assert!(matches!(err, RepoError::InsufficientStock(_)));

    // Pool unchanged after the failed assign
    let remaining = item::find_by_id(&pool, item_id).await.unwrap().unwrap();
    assert_eq!(remaining.total_quantity, 4);
}

#[tokio::test]
async fn repeated_assign_increments_the_same_record() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let item_id = seed_item(&pool, "Cola", 50.0, 10).await;

    let first = assignment::assign(&pool, staff_id, item_id, 3).await.unwrap();
    let second = assignment::assign(&pool, staff_id, item_id, 2).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity_assigned, 5);
}

#[tokio::test]
async fn adjustment_reconciles_the_pool_both_ways() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let item_id = seed_item(&pool, "Cola", 50.0, 10).await;

    let a = assignment::assign(&pool, staff_id, item_id, 6).await.unwrap();

    // Adjusting to the current value moves no stock
    let adjusted = assignment::adjust(&pool, a.id, 6).await.unwrap();
    assert_eq!(adjusted.item_remaining, 4);

    // Down from 6 to 2: 4 goes back to the pool
    let adjusted = assignment::adjust(&pool, a.id, 2).await.unwrap();
    assert_eq!(adjusted.old_quantity, 6);
    assert_eq!(adjusted.new_quantity, 2);
    assert_eq!(adjusted.item_remaining, 8);

    // Up from 2 to 9: 7 reserved, 1 left
    let adjusted = assignment::adjust(&pool, a.id, 9).await.unwrap();
    assert_eq!(adjusted.item_remaining, 1);

    // Up to 11 would need 2 more than the pool holds
    let err = assignment::adjust(&pool, a.id, 11).await.unwrap_err();
    assert!(matches!(err, RepoError::InsufficientStock(_)));
}

#[tokio::test]
async fn selling_requires_an_open_shift() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let item_id = seed_item(&pool, "Cola", 50.0, 10).await;
    assignment::assign(&pool, staff_id, item_id, 6).await.unwrap();

    let err = sale::record(&pool, staff_id, item_id, 1).await.unwrap_err();
    assert!(matches!(err, RepoError::NoActiveShift));
}

#[tokio::test]
async fn sale_deducts_assignment_and_bumps_shift_total() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let item_id = seed_item(&pool, "Cola", 50.0, 10).await;
    assignment::assign(&pool, staff_id, item_id, 6).await.unwrap();
    let s = shift::start(&pool, staff_id, &open_shift()).await.unwrap();

    let sale = sale::record(&pool, staff_id, item_id, 4).await.unwrap();
    assert_eq!(sale.shift_id, s.id);
    assert_eq!(sale.price_per_item, 50.0);
    assert_eq!(sale.total_amount, 200.0);

    let assignments = assignment::find_by_staff_with_items(&pool, staff_id).await.unwrap();
    assert_eq!(assignments[0].quantity_assigned, 2);

    let s = shift::find_by_id(&pool, s.id).await.unwrap().unwrap();
    assert_eq!(s.total_sales_amount, 200.0);

    // Only 2 left on the assignment
    let err = sale::record(&pool, staff_id, item_id, 3).await.unwrap_err();
    assert!(matches!(err, RepoError::InsufficientAssignment(_)));

    // Central pool untouched by selling
    let i = item::find_by_id(&pool, item_id).await.unwrap().unwrap();
    assert_eq!(i.total_quantity, 4);
}

#[tokio::test]
async fn selling_without_an_assignment_is_not_found() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let item_id = seed_item(&pool, "Cola", 50.0, 10).await;
    shift::start(&pool, staff_id, &open_shift()).await.unwrap();

    let err = sale::record(&pool, staff_id, item_id, 1).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn shift_lifecycle_enforces_single_open_shift() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    seed_item(&pool, "Cola", 50.0, 10).await;

    let s = shift::start(&pool, staff_id, &open_shift()).await.unwrap();
    assert!(s.end_time.is_none());
    assert_eq!(s.opening_stock.0.len(), 1);
    assert_eq!(s.opening_stock.0[0].quantity, 10);

    let err = shift::start(&pool, staff_id, &open_shift()).await.unwrap_err();
    assert!(matches!(err, RepoError::ShiftAlreadyOpen));

    let close = ShiftClose {
        handed_over_to: None,
        expenses: None,
    };
    let closed = shift::close(&pool, staff_id, &close).await.unwrap();
    assert!(closed.end_time.is_some());
    assert!(closed.closing_stock.is_some());

    let err = shift::close(&pool, staff_id, &close).await.unwrap_err();
    assert!(matches!(err, RepoError::NoActiveShift));

    // A new shift may start after the old one closed
    shift::start(&pool, staff_id, &open_shift()).await.unwrap();
}

#[tokio::test]
async fn closing_a_shift_appends_well_formed_expenses_only() {
    use shared::models::ExpenseInput;

    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    shift::start(&pool, staff_id, &open_shift()).await.unwrap();

    let close = ShiftClose {
        handed_over_to: None,
        expenses: Some(vec![
            ExpenseInput {
                description: Some("Gas refill".to_string()),
                amount: Some(120.0),
            },
            ExpenseInput {
                description: None,
                amount: Some(99.0),
            },
            ExpenseInput {
                description: Some("No amount".to_string()),
                amount: None,
            },
        ]),
    };
    let closed = shift::close(&pool, staff_id, &close).await.unwrap();
    assert_eq!(closed.expenses.0.len(), 1);
    assert_eq!(closed.expenses.0[0].description, "Gas refill");
    assert_eq!(closed.expenses.0[0].added_by, staff_id);
}

#[tokio::test]
async fn reconciliation_summarizes_one_line_per_item() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let cola = seed_item(&pool, "Cola", 50.0, 10).await;
    let water = seed_item(&pool, "Water", 50.0, 10).await;
    assignment::assign(&pool, staff_id, cola, 6).await.unwrap();
    assignment::assign(&pool, staff_id, water, 6).await.unwrap();
    let s = shift::start(&pool, staff_id, &open_shift()).await.unwrap();

    sale::record(&pool, staff_id, cola, 4).await.unwrap();
    sale::record(&pool, staff_id, water, 2).await.unwrap();

    let view = closing_balance::reconcile(&pool, s.id).await.unwrap();
    assert_eq!(view.balance.shift_id, s.id);
    assert_eq!(view.balance.total_sales, 300.0);
    assert_eq!(view.balance.sales.0.len(), 2);
    assert_eq!(view.staff_name, "Ana");

    let cola_line = &view.balance.sales.0[0];
    assert_eq!(cola_line.item.name, "Cola");
    assert_eq!(cola_line.quantity_sold, 4);
    assert_eq!(cola_line.total_amount, 200.0);
}

#[tokio::test]
async fn reconciliation_is_idempotent_and_absorbs_late_sales() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let cola = seed_item(&pool, "Cola", 50.0, 10).await;
    assignment::assign(&pool, staff_id, cola, 6).await.unwrap();
    let s = shift::start(&pool, staff_id, &open_shift()).await.unwrap();

    sale::record(&pool, staff_id, cola, 2).await.unwrap();
    let first = closing_balance::reconcile(&pool, s.id).await.unwrap();
    assert_eq!(first.balance.total_sales, 100.0);

    // Re-running with no changes replaces the record in place
    let again = closing_balance::reconcile(&pool, s.id).await.unwrap();
    assert_eq!(again.balance.id, first.balance.id);
    assert_eq!(again.balance.total_sales, 100.0);

    // A later sale is absorbed by the next reconciliation
    sale::record(&pool, staff_id, cola, 4).await.unwrap();
    let updated = closing_balance::reconcile(&pool, s.id).await.unwrap();
    assert_eq!(updated.balance.id, first.balance.id);
    assert_eq!(updated.balance.total_sales, 300.0);
    assert_eq!(updated.balance.sales.0[0].quantity_sold, 6);
}

#[tokio::test]
async fn reconciliation_rejects_shifts_without_sales() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let s = shift::start(&pool, staff_id, &open_shift()).await.unwrap();

    let err = closing_balance::reconcile(&pool, s.id).await.unwrap_err();
    assert!(matches!(err, RepoError::NoSalesRecorded));

    let err = closing_balance::reconcile(&pool, 999).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn monthly_total_sums_closing_balances() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let cola = seed_item(&pool, "Cola", 50.0, 20).await;
    assignment::assign(&pool, staff_id, cola, 10).await.unwrap();

    // Two complete shift cycles, each reconciled
    for quantity in [2_i64, 3] {
        let s = shift::start(&pool, staff_id, &open_shift()).await.unwrap();
        sale::record(&pool, staff_id, cola, quantity).await.unwrap();
        closing_balance::reconcile(&pool, s.id).await.unwrap();
        shift::close(
            &pool,
            staff_id,
            &ShiftClose {
                handed_over_to: None,
                expenses: None,
            },
        )
        .await
        .unwrap();
    }

    let range = lodge_server::utils::time::month_bounds(chrono::Utc::now());
    let total = closing_balance::total_for_staff_in_range(&pool, staff_id, range)
        .await
        .unwrap();
    assert_eq!(total, 250.0);

    let daily = closing_balance::find_for_staff_in_range(
        &pool,
        staff_id,
        lodge_server::utils::time::day_bounds(chrono::Utc::now()),
    )
    .await
    .unwrap()
    .expect("today's balance");
    assert_eq!(daily.balance.total_sales, 150.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_assigns_never_overdraw_the_pool() {
    let (_dir, pool) = test_pool().await;
    let cola = seed_item(&pool, "Cola", 50.0, 10).await;

    // 8 staff racing to assign 3 each from a pool of 10
    let mut staff_ids = Vec::new();
    for i in 0..8 {
        staff_ids.push(seed_staff(&pool, &format!("Staff{i}")).await);
    }

    let mut handles = Vec::new();
    for staff_id in staff_ids.clone() {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            assignment::assign(&pool, staff_id, cola, 3).await.is_ok()
        }));
    }

    let mut succeeded: i64 = 0;
    for h in handles {
        if h.await.unwrap() {
            succeeded += 1;
        }
    }

    let remaining = item::find_by_id(&pool, cola).await.unwrap().unwrap().total_quantity;
    assert!(remaining >= 0);
    assert_eq!(succeeded * 3, 10 - remaining);

    let mut reserved = 0;
    for staff_id in staff_ids {
        let assignments = assignment::find_by_staff_with_items(&pool, staff_id).await.unwrap();
        reserved += assignments.iter().map(|a| a.quantity_assigned).sum::<i64>();
    }
    assert_eq!(reserved + remaining, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_sales_never_overdraw_an_assignment() {
    let (_dir, pool) = test_pool().await;
    let staff_id = seed_staff(&pool, "Ana").await;
    let cola = seed_item(&pool, "Cola", 50.0, 10).await;
    assignment::assign(&pool, staff_id, cola, 5).await.unwrap();
    shift::start(&pool, staff_id, &open_shift()).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            sale::record(&pool, staff_id, cola, 1).await.is_ok()
        }));
    }

    let mut succeeded = 0;
    for h in handles {
        if h.await.unwrap() {
            succeeded += 1;
        }
    }

    let assignments = assignment::find_by_staff_with_items(&pool, staff_id).await.unwrap();
    let left = assignments[0].quantity_assigned;
    assert!(left >= 0);
    assert_eq!(succeeded as i64 + left, 5);
    assert!(succeeded <= 5);
}
