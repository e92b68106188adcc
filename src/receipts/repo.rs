use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Receipt;

#[derive(Debug)]
pub struct NewReceipt<'a> {
    pub s3_key: Option<&'a str>,
    pub external_url: Option<&'a str>,
    pub store_name: Option<&'a str>,
    /// Falls back to the upload instant when absent.
    pub purchase_date: Option<OffsetDateTime>,
    pub total_amount: Option<f64>,
}

pub async fn insert(db: &PgPool, user_id: Uuid, receipt: &NewReceipt<'_>) -> anyhow::Result<Receipt> {
    let row = sqlx::query_as::<_, Receipt>(
        r#"
        INSERT INTO receipts (user_id, s3_key, external_url, store_name, purchase_date, total_amount)
        VALUES ($1, $2, $3, $4, COALESCE($5, now()), $6)
        RETURNING id, user_id, s3_key, external_url, store_name, purchase_date, total_amount, uploaded_at
        "#,
    )
    .bind(user_id)
    .bind(receipt.s3_key)
    .bind(receipt.external_url)
    .bind(receipt.store_name)
    .bind(receipt.purchase_date)
    .bind(receipt.total_amount)
    .fetch_one(db)
    .await?;
    Ok(row)
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Receipt>> {
    let rows = sqlx::query_as::<_, Receipt>(
        r#"
        SELECT id, user_id, s3_key, external_url, store_name, purchase_date, total_amount, uploaded_at
        FROM receipts
        WHERE user_id = $1
        ORDER BY uploaded_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Receipt>> {
    let row = sqlx::query_as::<_, Receipt>(
        r#"
        SELECT id, user_id, s3_key, external_url, store_name, purchase_date, total_amount, uploaded_at
        FROM receipts
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Deletes the row and hands back what was deleted so the caller can clean
/// up the stored object. Food items referencing the receipt are untouched.
pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Receipt>> {
    let row = sqlx::query_as::<_, Receipt>(
        r#"
        DELETE FROM receipts
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, s3_key, external_url, store_name, purchase_date, total_amount, uploaded_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}
