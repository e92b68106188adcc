use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Persisted recipe. `source_item_ids` is a snapshot taken at synthesis
/// time, not a live foreign key: the items may be consumed or deleted later
/// without touching this record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub recipe_name: String,
    pub ingredients: serde_json::Value,
    pub instructions: serde_json::Value,
    pub source_item_ids: Vec<Uuid>,
    pub image_url: Option<String>,
    pub created_at: OffsetDateTime,
}
