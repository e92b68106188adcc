use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::Recipe;
use super::synthesize::RecipeDraft;

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    draft: &RecipeDraft,
    source_item_ids: &[Uuid],
) -> anyhow::Result<Recipe> {
    let ingredients = serde_json::to_value(&draft.ingredients).context("serialize ingredients")?;
    let instructions = serde_json::to_value(&draft.instructions).context("serialize instructions")?;

    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        INSERT INTO recipes (user_id, recipe_name, ingredients, instructions, source_item_ids, image_url)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, recipe_name, ingredients, instructions, source_item_ids, image_url, created_at
        "#,
    )
    .bind(user_id)
    .bind(&draft.recipe_name)
    .bind(ingredients)
    .bind(instructions)
    .bind(source_item_ids)
    .bind(&draft.image_ref)
    .fetch_one(db)
    .await?;
    Ok(recipe)
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT id, user_id, recipe_name, ingredients, instructions, source_item_ids, image_url, created_at
        FROM recipes
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn get(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Recipe>> {
    let recipe = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT id, user_id, recipe_name, ingredients, instructions, source_item_ids, image_url, created_at
        FROM recipes
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(recipe)
}

pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(r#"DELETE FROM recipes WHERE id = $1 AND user_id = $2"#)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
