use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Recipe;

#[derive(Debug, Deserialize)]
pub struct GenerateRecipeRequest {
    pub item_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    pub id: Uuid,
    pub recipe_name: String,
    pub ingredients: serde_json::Value,
    pub instructions: serde_json::Value,
    pub source_item_ids: Vec<Uuid>,
    pub image_url: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<Recipe> for RecipeResponse {
    fn from(r: Recipe) -> Self {
        Self {
            id: r.id,
            recipe_name: r.recipe_name,
            ingredients: r.ingredients,
            instructions: r.instructions,
            source_item_ids: r.source_item_ids,
            image_url: r.image_url,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}
