use super::test_support::test_pool;
use super::{RepoError, cart, category, deal, food_item, order};
use crate::utils::now_ms;
use shared::models::{
    CategoryCreate, DiscountType, FoodItemCreate, FoodItemUpdate, OrderStatus, PaymentMethod,
    SpecialDealCreate, SpecialDealUpdate,
};

async fn seed_item(pool: &sqlx::SqlitePool, category: &str, name: &str, price: f64) -> i64 {
    let cat = match category::find_by_name(pool, category).await.unwrap() {
        Some(c) => c,
        None => category::create(
            pool,
            CategoryCreate {
                name: category.into(),
                image: None,
            },
        )
        .await
        .unwrap(),
    };
    food_item::create(
        pool,
        FoodItemCreate {
            name: name.into(),
            description: None,
            price,
            image: None,
            category_id: cat.id,
        },
    )
    .await
    .unwrap()
    .id
}

// ── Cart ────────────────────────────────────────────────────────────

#[tokio::test]
async fn readding_an_item_updates_the_existing_row() {
    let pool = test_pool().await;
    let item = seed_item(&pool, "Mains", "Burger", 200.0).await;
    let session = "upsert";

    cart::add_item(&pool, session, item, 1).await.unwrap();
    let summary = cart::add_item(&pool, session, item, 2).await.unwrap();

    assert_eq!(summary.items.len(), 1);
    assert_eq!(summary.items[0].quantity, 3);
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.subtotal, 600.0);
}

#[tokio::test]
async fn readding_refreshes_the_price_snapshot() {
    let pool = test_pool().await;
    let item = seed_item(&pool, "Mains", "Burger", 200.0).await;
    let session = "reprice";

    cart::add_item(&pool, session, item, 1).await.unwrap();
    food_item::update(
        &pool,
        item,
        FoodItemUpdate {
            name: None,
            description: None,
            price: Some(250.0),
            image: None,
            category_id: None,
            is_available: None,
        },
    )
    .await
    .unwrap();

    let summary = cart::add_item(&pool, session, item, 1).await.unwrap();
    assert_eq!(summary.items[0].quantity, 2);
    assert_eq!(summary.items[0].price, 250.0);
    assert_eq!(summary.subtotal, 500.0);
}

#[tokio::test]
async fn adding_a_missing_or_unavailable_item_fails() {
    let pool = test_pool().await;
    let item = seed_item(&pool, "Mains", "Burger", 200.0).await;

    let err = cart::add_item(&pool, "s", 777, 1).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));

    food_item::toggle_availability(&pool, item).await.unwrap();
    let err = cart::add_item(&pool, "s", item, 1).await.unwrap_err();
    assert!(matches!(err, RepoError::Unavailable(_)));
}

#[tokio::test]
async fn update_item_treats_zero_quantity_as_removal() {
    let pool = test_pool().await;
    let item = seed_item(&pool, "Mains", "Burger", 200.0).await;
    let session = "qty-zero";

    let summary = cart::add_item(&pool, session, item, 2).await.unwrap();
    let line_id = summary.items[0].id;

    cart::update_item(&pool, line_id, 5).await.unwrap();
    let summary = cart::summary(&pool, session).await.unwrap();
    assert_eq!(summary.items[0].quantity, 5);

    cart::update_item(&pool, line_id, 0).await.unwrap();
    let summary = cart::summary(&pool, session).await.unwrap();
    assert!(summary.items.is_empty());

    // The line is gone now
    let err = cart::update_item(&pool, line_id, 1).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
    let err = cart::remove_item(&pool, line_id).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[tokio::test]
async fn clearing_an_unknown_session_is_a_noop_success() {
    let pool = test_pool().await;
    cart::clear(&pool, "ghost-session").await.unwrap();

    let summary = cart::summary(&pool, "ghost-session").await.unwrap();
    assert_eq!(summary.item_count, 0);
    assert_eq!(summary.subtotal, 0.0);
}

#[tokio::test]
async fn summary_joins_food_and_category_info() {
    let pool = test_pool().await;
    let item = seed_item(&pool, "Drinks", "Cola", 3.5).await;
    let session = "joined";

    cart::add_item(&pool, session, item, 2).await.unwrap();
    let summary = cart::summary(&pool, session).await.unwrap();

    let line = &summary.items[0];
    assert_eq!(line.name, "Cola");
    assert_eq!(line.category_name, "Drinks");
    assert_eq!(line.line_total, 7.0);
    assert_eq!(summary.subtotal, 7.0);
}

#[tokio::test]
async fn get_or_create_is_stable_per_session() {
    let pool = test_pool().await;
    let first = cart::get_or_create(&pool, "stable").await.unwrap();
    let second = cart::get_or_create(&pool, "stable").await.unwrap();
    assert_eq!(first.id, second.id);
}

// ── Catalog ─────────────────────────────────────────────────────────

#[tokio::test]
async fn category_delete_is_guarded_while_items_reference_it() {
    let pool = test_pool().await;
    let item = seed_item(&pool, "Mains", "Burger", 200.0).await;
    let cat = category::find_by_name(&pool, "Mains").await.unwrap().unwrap();

    let err = category::delete(&pool, cat.id).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(_)));

    // Both rows intact
    assert!(category::find_by_id(&pool, cat.id).await.unwrap().is_some());
    assert!(food_item::find_by_id(&pool, item).await.unwrap().is_some());

    // Removing the item unblocks the delete
    food_item::delete(&pool, item).await.unwrap();
    assert!(category::delete(&pool, cat.id).await.unwrap());
}

#[tokio::test]
async fn duplicate_category_names_conflict() {
    let pool = test_pool().await;
    category::create(
        &pool,
        CategoryCreate {
            name: "Mains".into(),
            image: None,
        },
    )
    .await
    .unwrap();

    let err = category::create(
        &pool,
        CategoryCreate {
            name: "Mains".into(),
            image: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}

#[tokio::test]
async fn public_listing_hides_inactive_rows() {
    let pool = test_pool().await;
    let item = seed_item(&pool, "Mains", "Burger", 200.0).await;
    let cat = category::find_by_name(&pool, "Mains").await.unwrap().unwrap();

    category::toggle(&pool, cat.id).await.unwrap();

    let public = category::find_all(&pool, false).await.unwrap();
    assert!(public.is_empty());
    let admin = category::find_all(&pool, true).await.unwrap();
    assert_eq!(admin.len(), 1);

    // An available item inside an inactive category is off the menu too
    let menu_items = food_item::find_all(
        &pool,
        &food_item::FoodItemFilter {
            available_only: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(menu_items.is_empty());
    assert!(food_item::find_by_id(&pool, item).await.unwrap().is_some());
}

#[tokio::test]
async fn search_matches_name_and_description_case_insensitively() {
    let pool = test_pool().await;
    seed_item(&pool, "Mains", "Margherita Pizza", 12.0).await;
    let cat = category::find_by_name(&pool, "Mains").await.unwrap().unwrap();
    food_item::create(
        &pool,
        FoodItemCreate {
            name: "Calzone".into(),
            description: Some("Folded pizza with ricotta".into()),
            price: 14.0,
            image: None,
            category_id: cat.id,
        },
    )
    .await
    .unwrap();

    let hits = food_item::find_all(
        &pool,
        &food_item::FoodItemFilter {
            search: Some("PIZZA".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(hits.len(), 2);

    let hits = food_item::find_all(
        &pool,
        &food_item::FoodItemFilter {
            search: Some("ricotta".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Calzone");
}

// ── Deals ───────────────────────────────────────────────────────────

fn window() -> (i64, i64) {
    let now = now_ms();
    (now - 1_000, now + 3_600_000)
}

#[tokio::test]
async fn deal_write_validation() {
    let pool = test_pool().await;
    let (from, to) = window();

    // discount must be positive
    let err = deal::create(
        &pool,
        SpecialDealCreate {
            title: "Bad".into(),
            description: "d".into(),
            image: None,
            discount: 0.0,
            discount_type: DiscountType::Fixed,
            min_order_amount: None,
            valid_from: from,
            valid_to: to,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // percentage capped at 100
    let err = deal::create(
        &pool,
        SpecialDealCreate {
            title: "Bad".into(),
            description: "d".into(),
            image: None,
            discount: 150.0,
            discount_type: DiscountType::Percentage,
            min_order_amount: None,
            valid_from: from,
            valid_to: to,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // window must be non-empty
    let err = deal::create(
        &pool,
        SpecialDealCreate {
            title: "Bad".into(),
            description: "d".into(),
            image: None,
            discount: 10.0,
            discount_type: DiscountType::Fixed,
            min_order_amount: None,
            valid_from: to,
            valid_to: from,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    // update validates the merged row
    let ok = deal::create(
        &pool,
        SpecialDealCreate {
            title: "Good".into(),
            description: "d".into(),
            image: None,
            discount: 10.0,
            discount_type: DiscountType::Percentage,
            min_order_amount: None,
            valid_from: from,
            valid_to: to,
        },
    )
    .await
    .unwrap();
    let err = deal::update(
        &pool,
        ok.id,
        SpecialDealUpdate {
            title: None,
            description: None,
            image: None,
            discount: Some(120.0),
            discount_type: None,
            min_order_amount: None,
            valid_from: None,
            valid_to: None,
            is_active: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn valid_deals_filter_by_window_and_amount() {
    let pool = test_pool().await;
    let (from, to) = window();
    let now = now_ms();

    let mk = |title: &str, discount: f64, dt: DiscountType, min: Option<f64>, from: i64, to: i64| {
        SpecialDealCreate {
            title: title.into(),
            description: "d".into(),
            image: None,
            discount,
            discount_type: dt,
            min_order_amount: min,
            valid_from: from,
            valid_to: to,
        }
    };

    deal::create(&pool, mk("ten-pct", 10.0, DiscountType::Percentage, None, from, to))
        .await
        .unwrap();
    deal::create(&pool, mk("flat-fifty", 50.0, DiscountType::Fixed, None, from, to))
        .await
        .unwrap();
    deal::create(
        &pool,
        mk("big-spender", 20.0, DiscountType::Percentage, Some(1_000.0), from, to),
    )
    .await
    .unwrap();
    deal::create(
        &pool,
        mk("expired", 90.0, DiscountType::Percentage, None, from - 10_000, from - 5_000),
    )
    .await
    .unwrap();
    let inactive = deal::create(&pool, mk("paused", 30.0, DiscountType::Fixed, None, from, to))
        .await
        .unwrap();
    deal::toggle(&pool, inactive.id).await.unwrap();

    let valid = deal::find_valid(&pool, now).await.unwrap();
    let titles: Vec<&str> = valid.iter().map(|d| d.title.as_str()).collect();
    assert!(titles.contains(&"ten-pct"));
    assert!(titles.contains(&"flat-fifty"));
    assert!(titles.contains(&"big-spender"));
    assert!(!titles.contains(&"expired"));
    assert!(!titles.contains(&"paused"));

    // For a 400 order: big-spender gated out, flat 50 beats 10% of 400
    let for_amount = deal::find_valid_for_amount(&pool, now, 400.0).await.unwrap();
    let titles: Vec<&str> = for_amount.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["flat-fifty", "ten-pct"]);
}

// ── Orders ──────────────────────────────────────────────────────────

fn plain_order(number: &str, total: f64) -> order::NewOrder {
    order::NewOrder {
        order_number: number.into(),
        customer_name: "Ada".into(),
        customer_phone: "+34600111222".into(),
        customer_email: None,
        delivery_address: "1 Analytical Way".into(),
        latitude: None,
        longitude: None,
        distance: None,
        subtotal: total,
        delivery_charges: 0.0,
        discount: 0.0,
        total,
        payment_method: PaymentMethod::Cash,
        notes: None,
        deal_id: None,
    }
}

#[tokio::test]
async fn stats_count_by_status_and_sum_revenue() {
    let pool = test_pool().await;
    let item = seed_item(&pool, "Mains", "Burger", 100.0).await;
    let cart_row = cart::get_or_create(&pool, "stats").await.unwrap();

    let empty = order::stats(&pool).await.unwrap();
    assert_eq!(empty.total_orders, 0);
    assert_eq!(empty.total_revenue, 0.0);

    let line = order::NewOrderItem {
        food_item_id: item,
        name: "Burger".into(),
        quantity: 1,
        price: 100.0,
        total: 100.0,
    };
    let first = order::persist(&pool, &plain_order("ORD-STATS001", 100.0), &[line.clone()], cart_row.id)
        .await
        .unwrap();
    order::persist(&pool, &plain_order("ORD-STATS002", 50.0), &[line], cart_row.id)
        .await
        .unwrap();

    order::update_status(&pool, first, OrderStatus::Cancelled)
        .await
        .unwrap();

    let stats = order::stats(&pool).await.unwrap();
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.active_orders, 1);
    assert_eq!(stats.cancelled_orders, 1);
    assert_eq!(stats.delivered_orders, 0);
    assert_eq!(stats.total_revenue, 50.0);
}

#[tokio::test]
async fn duplicate_order_numbers_are_rejected() {
    let pool = test_pool().await;
    let item = seed_item(&pool, "Mains", "Burger", 100.0).await;
    let cart_row = cart::get_or_create(&pool, "dup-number").await.unwrap();

    let line = order::NewOrderItem {
        food_item_id: item,
        name: "Burger".into(),
        quantity: 1,
        price: 100.0,
        total: 100.0,
    };
    order::persist(&pool, &plain_order("ORD-SAME", 100.0), &[line.clone()], cart_row.id)
        .await
        .unwrap();
    let err = order::persist(&pool, &plain_order("ORD-SAME", 100.0), &[line], cart_row.id)
        .await
        .unwrap_err();
    assert!(err.is_unique_violation());
}
