use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{delete, get, post},
    Json, Router,
};
use bytes::Bytes;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, state::AppState};

use super::dto::{InlineReceiptRequest, ReceiptByUrlRequest, ReceiptResponse};
use super::repo::{self, NewReceipt};
use super::services::{delete_receipt_image, presign_receipt_image, store_receipt_image};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/receipts", get(list_receipts))
        .route("/receipts/:id", get(get_receipt))
        .route("/receipts/:id/image", get(get_receipt_image))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/receipts", post(upload_receipt_multipart))
        .route("/receipts/inline", post(upload_receipt_inline))
        .route("/receipts/url", post(add_receipt_by_url))
        .route("/receipts/:id", delete(delete_receipt))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[instrument(skip(state))]
pub async fn list_receipts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ReceiptResponse>>, (StatusCode, String)> {
    let receipts = repo::list_by_user(&state.db, user_id).await.map_err(internal)?;
    Ok(Json(receipts.into_iter().map(ReceiptResponse::from).collect()))
}

/// The explicit lookup for an item's weak `receipt_id` reference.
#[instrument(skip(state))]
pub async fn get_receipt(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ReceiptResponse>, (StatusCode, String)> {
    match repo::get(&state.db, user_id, id).await.map_err(internal)? {
        Some(receipt) => Ok(Json(ReceiptResponse::from(receipt))),
        None => Err((StatusCode::NOT_FOUND, "Receipt not found".into())),
    }
}

/// POST /receipts (multipart)
/// Fields: file (required), store_name, purchase_date (RFC 3339),
/// total_amount.
#[instrument(skip(state, mp))]
pub async fn upload_receipt_multipart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Result<(StatusCode, Json<ReceiptResponse>), (StatusCode, String)> {
    let mut file: Option<(Bytes, String)> = None;
    let mut store_name: Option<String> = None;
    let mut purchase_date: Option<OffsetDateTime> = None;
    let mut total_amount: Option<f64> = None;

    while let Ok(Some(field)) = mp.next_field().await {
        match field.name().map(|s| s.to_string()).as_deref() {
            Some("file") => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                file = Some((data, content_type));
            }
            Some("store_name") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                store_name = Some(text);
            }
            Some("purchase_date") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                let parsed = OffsetDateTime::parse(&text, &Rfc3339).map_err(|_| {
                    (StatusCode::BAD_REQUEST, "purchase_date must be RFC 3339".into())
                })?;
                purchase_date = Some(parsed);
            }
            Some("total_amount") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                let parsed = text.parse::<f64>().map_err(|_| {
                    (StatusCode::BAD_REQUEST, "total_amount must be a number".into())
                })?;
                total_amount = Some(parsed);
            }
            _ => {}
        }
    }

    let Some((data, content_type)) = file else {
        return Err((StatusCode::BAD_REQUEST, "file is required".into()));
    };
    validate_total_amount(total_amount)?;

    let key = store_receipt_image(&state, user_id, data, &content_type)
        .await
        .map_err(internal)?;
    let receipt = repo::insert(
        &state.db,
        user_id,
        &NewReceipt {
            s3_key: Some(&key),
            external_url: None,
            store_name: store_name.as_deref(),
            purchase_date,
            total_amount,
        },
    )
    .await
    .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(ReceiptResponse::from(receipt))))
}

/// POST /receipts/inline { image: <bytes>, content_type?, ... }
#[instrument(skip(state, payload))]
pub async fn upload_receipt_inline(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<InlineReceiptRequest>,
) -> Result<(StatusCode, Json<ReceiptResponse>), (StatusCode, String)> {
    if payload.image.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "image must be non-empty".into()));
    }
    validate_total_amount(payload.total_amount)?;

    let content_type = payload
        .content_type
        .as_deref()
        .unwrap_or("application/octet-stream");
    let key = store_receipt_image(
        &state,
        user_id,
        Bytes::from(payload.image.into_vec()),
        content_type,
    )
    .await
    .map_err(internal)?;

    let receipt = repo::insert(
        &state.db,
        user_id,
        &NewReceipt {
            s3_key: Some(&key),
            external_url: None,
            store_name: payload.store_name.as_deref(),
            purchase_date: payload.purchase_date,
            total_amount: payload.total_amount,
        },
    )
    .await
    .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(ReceiptResponse::from(receipt))))
}

/// POST /receipts/url — the image stays wherever it already is.
#[instrument(skip(state, payload))]
pub async fn add_receipt_by_url(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ReceiptByUrlRequest>,
) -> Result<(StatusCode, Json<ReceiptResponse>), (StatusCode, String)> {
    if payload.url.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "url must not be empty".into()));
    }
    validate_total_amount(payload.total_amount)?;

    let receipt = repo::insert(
        &state.db,
        user_id,
        &NewReceipt {
            s3_key: None,
            external_url: Some(payload.url.trim()),
            store_name: payload.store_name.as_deref(),
            purchase_date: payload.purchase_date,
            total_amount: payload.total_amount,
        },
    )
    .await
    .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(ReceiptResponse::from(receipt))))
}

/// 302 to a presigned URL for stored images, or straight to the external
/// URL.
#[instrument(skip(state))]
pub async fn get_receipt_image(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let receipt = match repo::get(&state.db, user_id, id).await {
        Ok(Some(r)) => r,
        Ok(None) => return (StatusCode::NOT_FOUND, "Receipt not found").into_response(),
        Err(e) => {
            error!(error = %e, %id, "get_receipt_image failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
        }
    };

    if let Some(key) = receipt.s3_key.as_deref() {
        let Ok(url) = presign_receipt_image(&state, key).await else {
            return (StatusCode::INTERNAL_SERVER_ERROR, "presign failed").into_response();
        };
        return Redirect::temporary(&url).into_response();
    }
    match receipt.external_url.as_deref() {
        Some(url) => Redirect::temporary(url).into_response(),
        None => (StatusCode::NOT_FOUND, "Receipt has no image").into_response(),
    }
}

/// Removes the receipt and its stored object. Never cascades: items keep
/// their (now dangling) `receipt_id`.
#[instrument(skip(state))]
pub async fn delete_receipt(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    match repo::delete(&state.db, user_id, id).await.map_err(internal)? {
        Some(receipt) => {
            if let Some(key) = receipt.s3_key.as_deref() {
                delete_receipt_image(&state, key).await;
            }
            Ok(StatusCode::NO_CONTENT)
        }
        None => Err((StatusCode::NOT_FOUND, "Receipt not found".into())),
    }
}

fn validate_total_amount(total_amount: Option<f64>) -> Result<(), (StatusCode, String)> {
    if let Some(amount) = total_amount {
        if !(amount >= 0.0) {
            warn!(amount, "rejected negative receipt total");
            return Err((
                StatusCode::BAD_REQUEST,
                "total_amount must be non-negative".into(),
            ));
        }
    }
    Ok(())
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    tracing::error!(error = %e, "receipts request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
