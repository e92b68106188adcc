use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use super::repo_types::FoodItem;

/// Fields for creating or whole-field replacing an item. `consumed` and
/// `created_at` are managed separately.
#[derive(Debug)]
pub struct ItemFields<'a> {
    pub name: &'a str,
    pub quantity: f64,
    pub unit: Option<&'a str>,
    pub category: Option<&'a str>,
    pub expiry_date: Date,
    pub receipt_id: Option<Uuid>,
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    fields: &ItemFields<'_>,
    consumed: bool,
) -> anyhow::Result<FoodItem> {
    let item = sqlx::query_as::<_, FoodItem>(
        r#"
        INSERT INTO food_items (user_id, name, quantity, unit, category, expiry_date, receipt_id, consumed)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_id, name, quantity, unit, category, expiry_date, receipt_id, consumed, created_at
        "#,
    )
    .bind(user_id)
    .bind(fields.name)
    .bind(fields.quantity)
    .bind(fields.unit)
    .bind(fields.category)
    .bind(fields.expiry_date)
    .bind(fields.receipt_id)
    .bind(consumed)
    .fetch_one(db)
    .await?;
    Ok(item)
}

/// Active items only unless `include_consumed`; ordered by expiry so the
/// most urgent come first.
pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    include_consumed: bool,
) -> anyhow::Result<Vec<FoodItem>> {
    let rows = sqlx::query_as::<_, FoodItem>(
        r#"
        SELECT id, user_id, name, quantity, unit, category, expiry_date, receipt_id, consumed, created_at
        FROM food_items
        WHERE user_id = $1 AND ($2 OR NOT consumed)
        ORDER BY expiry_date ASC, created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(include_consumed)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<FoodItem>> {
    let item = sqlx::query_as::<_, FoodItem>(
        r#"
        SELECT id, user_id, name, quantity, unit, category, expiry_date, receipt_id, consumed, created_at
        FROM food_items
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

/// Whole-field replacement; returns None when the item does not exist or
/// belongs to someone else.
pub async fn replace(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    fields: &ItemFields<'_>,
) -> anyhow::Result<Option<FoodItem>> {
    let item = sqlx::query_as::<_, FoodItem>(
        r#"
        UPDATE food_items
        SET name = $3, quantity = $4, unit = $5, category = $6, expiry_date = $7, receipt_id = $8
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, quantity, unit, category, expiry_date, receipt_id, consumed, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(fields.name)
    .bind(fields.quantity)
    .bind(fields.unit)
    .bind(fields.category)
    .bind(fields.expiry_date)
    .bind(fields.receipt_id)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

pub async fn set_consumed(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    consumed: bool,
) -> anyhow::Result<Option<FoodItem>> {
    let item = sqlx::query_as::<_, FoodItem>(
        r#"
        UPDATE food_items
        SET consumed = $3
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, name, quantity, unit, category, expiry_date, receipt_id, consumed, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(consumed)
    .fetch_optional(db)
    .await?;
    Ok(item)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(r#"DELETE FROM food_items WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Non-consumed items among `ids`, for recipe candidate sets. Order is not
/// meaningful here; callers reorder as needed.
pub async fn list_active_by_ids(
    db: &PgPool,
    user_id: Uuid,
    ids: &[Uuid],
) -> anyhow::Result<Vec<FoodItem>> {
    let rows = sqlx::query_as::<_, FoodItem>(
        r#"
        SELECT id, user_id, name, quantity, unit, category, expiry_date, receipt_id, consumed, created_at
        FROM food_items
        WHERE user_id = $1 AND id = ANY($2) AND NOT consumed
        "#,
    )
    .bind(user_id)
    .bind(ids)
    .fetch_all(db)
    .await?;
    Ok(rows)
}
