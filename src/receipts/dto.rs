use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Receipt;

/// Registers a receipt that lives behind an external image URL.
#[derive(Debug, Deserialize)]
pub struct ReceiptByUrlRequest {
    pub url: String,
    pub store_name: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub purchase_date: Option<OffsetDateTime>,
    pub total_amount: Option<f64>,
}

/// JSON upload with the image bytes inline, for clients that cannot send
/// multipart.
#[derive(Debug, Deserialize)]
pub struct InlineReceiptRequest {
    pub image: serde_bytes::ByteBuf,
    pub content_type: Option<String>,
    pub store_name: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub purchase_date: Option<OffsetDateTime>,
    pub total_amount: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub id: Uuid,
    pub store_name: Option<String>,
    pub purchase_date: OffsetDateTime,
    pub total_amount: Option<f64>,
    pub uploaded_at: OffsetDateTime,
    pub external_url: Option<String>,
    /// True when the image is in our object store and served via the image
    /// endpoint rather than `external_url`.
    pub stored_image: bool,
}

impl From<Receipt> for ReceiptResponse {
    fn from(r: Receipt) -> Self {
        Self {
            id: r.id,
            store_name: r.store_name,
            purchase_date: r.purchase_date,
            total_amount: r.total_amount,
            uploaded_at: r.uploaded_at,
            stored_image: r.s3_key.is_some(),
            external_url: r.external_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_hides_the_object_key() {
        let receipt = Receipt {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            s3_key: Some("receipts/u/x.jpg".into()),
            external_url: None,
            store_name: Some("Whole Foods".into()),
            purchase_date: OffsetDateTime::UNIX_EPOCH,
            total_amount: Some(54.99),
            uploaded_at: OffsetDateTime::UNIX_EPOCH,
        };

        let response = ReceiptResponse::from(receipt);
        assert!(response.stored_image);

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("s3_key"));
        assert!(json.contains("Whole Foods"));
    }
}
