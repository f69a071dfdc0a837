//! Food Item Repository

use super::{RepoError, RepoResult};
use crate::utils::now_ms;
use shared::models::{FoodItemCreate, FoodItemDetail, FoodItemUpdate};
use sqlx::SqlitePool;

const DETAIL_COLUMNS: &str = "f.id, f.name, f.description, f.price, f.image, f.category_id, \
                              c.name AS category_name, f.is_available, f.created_at";

/// List filter for food items
#[derive(Debug, Clone, Default)]
pub struct FoodItemFilter {
    /// Restrict to orderable items (the customer surface)
    pub available_only: bool,
    pub category_id: Option<i64>,
    /// Case-insensitive substring match over name and description
    pub search: Option<String>,
    /// Page window; `None` returns everything (internal callers)
    pub limit: Option<u32>,
    pub offset: u64,
}

pub async fn find_all(pool: &SqlitePool, filter: &FoodItemFilter) -> RepoResult<Vec<FoodItemDetail>> {
    let mut sql = format!(
        "SELECT {DETAIL_COLUMNS} FROM food_item f \
         JOIN category c ON c.id = f.category_id WHERE 1 = 1"
    );
    if filter.available_only {
        sql.push_str(" AND f.is_available = 1 AND c.is_active = 1");
    }
    if filter.category_id.is_some() {
        sql.push_str(" AND f.category_id = ?");
    }
    if filter.search.is_some() {
        sql.push_str(
            " AND (LOWER(f.name) LIKE '%' || ? || '%' \
             OR LOWER(COALESCE(f.description, '')) LIKE '%' || ? || '%')",
        );
    }
    sql.push_str(" ORDER BY c.name, f.name");
    if filter.limit.is_some() {
        sql.push_str(" LIMIT ? OFFSET ?");
    }

    let mut query = sqlx::query_as::<_, FoodItemDetail>(&sql);
    if let Some(category_id) = filter.category_id {
        query = query.bind(category_id);
    }
    if let Some(ref search) = filter.search {
        let needle = search.to_lowercase();
        query = query.bind(needle.clone()).bind(needle);
    }
    if let Some(limit) = filter.limit {
        query = query.bind(limit).bind(filter.offset as i64);
    }

    let items = query.fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<FoodItemDetail>> {
    let item = sqlx::query_as::<_, FoodItemDetail>(&format!(
        "SELECT {DETAIL_COLUMNS} FROM food_item f \
         JOIN category c ON c.id = f.category_id WHERE f.id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: FoodItemCreate) -> RepoResult<FoodItemDetail> {
    let category_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM category WHERE id = ?")
        .bind(data.category_id)
        .fetch_one(pool)
        .await?;
    if category_exists == 0 {
        return Err(RepoError::NotFound(format!(
            "Category {} not found",
            data.category_id
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO food_item (name, description, price, image, category_id, is_available, created_at) \
         VALUES (?, ?, ?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image)
    .bind(data.category_id)
    .bind(now_ms())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create food item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: FoodItemUpdate) -> RepoResult<FoodItemDetail> {
    if let Some(category_id) = data.category_id {
        let category_exists: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM category WHERE id = ?")
                .bind(category_id)
                .fetch_one(pool)
                .await?;
        if category_exists == 0 {
            return Err(RepoError::NotFound(format!(
                "Category {category_id} not found"
            )));
        }
    }

    let rows = sqlx::query(
        "UPDATE food_item SET name = COALESCE(?1, name), description = COALESCE(?2, description), \
         price = COALESCE(?3, price), image = COALESCE(?4, image), \
         category_id = COALESCE(?5, category_id), is_available = COALESCE(?6, is_available) \
         WHERE id = ?7",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image)
    .bind(data.category_id)
    .bind(data.is_available)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Food item {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Food item {id} not found")))
}

/// Flip the availability flag
pub async fn toggle_availability(pool: &SqlitePool, id: i64) -> RepoResult<FoodItemDetail> {
    let rows = sqlx::query("UPDATE food_item SET is_available = NOT is_available WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Food item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Food item {id} not found")))
}

/// Hard delete. Cart lines holding the item go with it; order lines are
/// snapshots and keep their copy.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM cart_item WHERE food_item_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let rows = sqlx::query("DELETE FROM food_item WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Food item {id} not found")));
    }

    tx.commit().await?;
    Ok(true)
}
