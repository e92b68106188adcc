use anyhow::Context;
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::state::AppState;

const PRESIGN_TTL_SECS: u64 = 10 * 60;

/// Stores a receipt image and returns its object key.
pub async fn store_receipt_image(
    st: &AppState,
    user_id: Uuid,
    body: Bytes,
    content_type: &str,
) -> anyhow::Result<String> {
    let id = Uuid::new_v4();
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    let key = format!("receipts/{}/{}.{}", user_id, id, ext);
    st.storage
        .put_object(&key, body, content_type)
        .await
        .with_context(|| format!("put_object {}", key))?;
    Ok(key)
}

pub async fn presign_receipt_image(st: &AppState, s3_key: &str) -> anyhow::Result<String> {
    st.storage
        .presign_get(s3_key, PRESIGN_TTL_SECS)
        .await
        .with_context(|| format!("presign url for s3_key {}", s3_key))
}

/// Best effort: a dangling object is preferable to a delete that fails after
/// the row is gone.
pub async fn delete_receipt_image(st: &AppState, s3_key: &str) {
    if let Err(e) = st.storage.delete_object(s3_key).await {
        warn!(error = %e, %s3_key, "failed to delete stored receipt image");
    }
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(ext_from_mime("image/png"), Some("png"));
        assert_eq!(ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(ext_from_mime("image/heic"), Some("heic"));
        assert_eq!(ext_from_mime("application/octet-stream"), None);
        assert_eq!(ext_from_mime("whatever/else"), None);
    }

    #[tokio::test]
    async fn store_and_presign_against_fake_storage() {
        let state = AppState::fake();
        let user_id = Uuid::new_v4();

        let key = store_receipt_image(&state, user_id, Bytes::from_static(b"img"), "image/png")
            .await
            .unwrap();
        assert!(key.starts_with(&format!("receipts/{}/", user_id)));
        assert!(key.ends_with(".png"));

        let url = presign_receipt_image(&state, &key).await.unwrap();
        assert!(url.contains(&key));
    }

    #[tokio::test]
    async fn unknown_mime_falls_back_to_bin() {
        let state = AppState::fake();
        let key = store_receipt_image(
            &state,
            Uuid::new_v4(),
            Bytes::from_static(b"img"),
            "application/octet-stream",
        )
        .await
        .unwrap();
        assert!(key.ends_with(".bin"));
    }
}
