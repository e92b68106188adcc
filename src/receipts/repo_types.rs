use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Receipt record. The image lives either in our object store (`s3_key`) or
/// behind an external URL; exactly one of the two is set. The receipt has no
/// knowledge of which food items reference it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Receipt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub s3_key: Option<String>,
    pub external_url: Option<String>,
    pub store_name: Option<String>,
    pub purchase_date: OffsetDateTime,
    pub total_amount: Option<f64>,
    pub uploaded_at: OffsetDateTime,
}
