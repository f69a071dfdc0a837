//! Special Deal Repository

use super::{RepoError, RepoResult};
use crate::pricing;
use crate::utils::now_ms;
use shared::models::{DiscountType, SpecialDeal, SpecialDealCreate, SpecialDealUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, title, description, image, discount, discount_type, \
                       min_order_amount, valid_from, valid_to, is_active, created_at";

/// Write-time invariants: positive discount, percentage capped at 100,
/// a non-empty validity window.
fn validate_deal(
    discount: f64,
    discount_type: DiscountType,
    valid_from: i64,
    valid_to: i64,
) -> RepoResult<()> {
    if !discount.is_finite() || discount <= 0.0 {
        return Err(RepoError::Validation(format!(
            "discount must be positive, got {discount}"
        )));
    }
    if discount_type == DiscountType::Percentage && discount > 100.0 {
        return Err(RepoError::Validation(format!(
            "percentage discount must not exceed 100, got {discount}"
        )));
    }
    if valid_from >= valid_to {
        return Err(RepoError::Validation(
            "validFrom must be before validTo".into(),
        ));
    }
    Ok(())
}

pub async fn find_all(pool: &SqlitePool, include_inactive: bool) -> RepoResult<Vec<SpecialDeal>> {
    let sql = if include_inactive {
        format!("SELECT {COLUMNS} FROM special_deal ORDER BY valid_to DESC")
    } else {
        format!("SELECT {COLUMNS} FROM special_deal WHERE is_active = 1 ORDER BY valid_to DESC")
    };
    let deals = sqlx::query_as::<_, SpecialDeal>(&sql).fetch_all(pool).await?;
    Ok(deals)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<SpecialDeal>> {
    let deal =
        sqlx::query_as::<_, SpecialDeal>(&format!("SELECT {COLUMNS} FROM special_deal WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(deal)
}

/// Deals that are active and inside their validity window right now
pub async fn find_valid(pool: &SqlitePool, now_ms: i64) -> RepoResult<Vec<SpecialDeal>> {
    let deals = sqlx::query_as::<_, SpecialDeal>(&format!(
        "SELECT {COLUMNS} FROM special_deal \
         WHERE is_active = 1 AND valid_from <= ?1 AND valid_to >= ?1 \
         ORDER BY discount DESC"
    ))
    .bind(now_ms)
    .fetch_all(pool)
    .await?;
    Ok(deals)
}

/// Valid deals an order of `amount` qualifies for, best deal first.
///
/// "Best" is the computed discount for this amount, so a flat 50 outranks
/// 5% of 600. Raw discount values would compare apples to oranges.
pub async fn find_valid_for_amount(
    pool: &SqlitePool,
    now_ms: i64,
    amount: f64,
) -> RepoResult<Vec<SpecialDeal>> {
    let mut deals: Vec<SpecialDeal> = find_valid(pool, now_ms)
        .await?
        .into_iter()
        .filter(|d| d.min_order_amount.is_none_or(|min| amount >= min))
        .collect();
    deals.sort_by(|a, b| {
        let da = pricing::calculate_discount(a, amount, now_ms);
        let db = pricing::calculate_discount(b, amount, now_ms);
        db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(deals)
}

pub async fn create(pool: &SqlitePool, data: SpecialDealCreate) -> RepoResult<SpecialDeal> {
    validate_deal(data.discount, data.discount_type, data.valid_from, data.valid_to)?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO special_deal \
         (title, description, image, discount, discount_type, min_order_amount, \
          valid_from, valid_to, is_active, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.discount)
    .bind(data.discount_type)
    .bind(data.min_order_amount)
    .bind(data.valid_from)
    .bind(data.valid_to)
    .bind(now_ms())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create deal".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: SpecialDealUpdate) -> RepoResult<SpecialDeal> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Deal {id} not found")))?;

    // Validate the merged row, not just the patch
    validate_deal(
        data.discount.unwrap_or(existing.discount),
        data.discount_type.unwrap_or(existing.discount_type),
        data.valid_from.unwrap_or(existing.valid_from),
        data.valid_to.unwrap_or(existing.valid_to),
    )?;

    sqlx::query(
        "UPDATE special_deal SET title = COALESCE(?1, title), \
         description = COALESCE(?2, description), image = COALESCE(?3, image), \
         discount = COALESCE(?4, discount), discount_type = COALESCE(?5, discount_type), \
         min_order_amount = COALESCE(?6, min_order_amount), \
         valid_from = COALESCE(?7, valid_from), valid_to = COALESCE(?8, valid_to), \
         is_active = COALESCE(?9, is_active) WHERE id = ?10",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.discount)
    .bind(data.discount_type)
    .bind(data.min_order_amount)
    .bind(data.valid_from)
    .bind(data.valid_to)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Deal {id} not found")))
}

/// Flip the active flag
pub async fn toggle(pool: &SqlitePool, id: i64) -> RepoResult<SpecialDeal> {
    let rows = sqlx::query("UPDATE special_deal SET is_active = NOT is_active WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Deal {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Deal {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM special_deal WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Deal {id} not found")));
    }
    Ok(true)
}
