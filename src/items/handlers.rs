use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use time::{Date, OffsetDateTime};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, state::AppState};

use super::aggregate::aggregate;
use super::dto::{CalendarDay, DashboardResponse, ItemRequest, ItemResponse, ListQuery};
use super::repo::{self, ItemFields};
use super::repo_types::FoodItem;
use super::services::validate_item_fields;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items))
        .route("/items/dashboard", get(dashboard))
        .route("/items/calendar", get(calendar))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/items", post(create_item))
        .route("/items/:id", put(update_item))
        .route("/items/:id/consume", post(consume_item))
        .route("/items/:id", delete(delete_item))
}

/// The civil-date convention for "now": the current UTC calendar date.
fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

fn item_fields(req: &ItemRequest) -> ItemFields<'_> {
    ItemFields {
        name: &req.name,
        quantity: req.quantity,
        unit: req.unit.as_deref(),
        category: req.category.as_deref(),
        expiry_date: req.expiry_date,
        receipt_id: req.receipt_id,
    }
}

#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<ItemResponse>>, (StatusCode, String)> {
    let items = repo::list_by_user(&state.db, user_id, q.include_consumed)
        .await
        .map_err(internal)?;
    let today = today_utc();
    let responses = items
        .into_iter()
        .map(|item| ItemResponse::from_item(item, today))
        .collect();
    Ok(Json(responses))
}

#[instrument(skip(state, payload))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), (StatusCode, String)> {
    if let Err(e) = validate_item_fields(&payload.name, payload.quantity) {
        warn!(error = %e, "rejected item create");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    let item = repo::insert(&state.db, user_id, &item_fields(&payload), payload.consumed)
        .await
        .map_err(internal)?;
    Ok((
        StatusCode::CREATED,
        Json(ItemResponse::from_item(item, today_utc())),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ItemRequest>,
) -> Result<Json<ItemResponse>, (StatusCode, String)> {
    if let Err(e) = validate_item_fields(&payload.name, payload.quantity) {
        warn!(error = %e, %id, "rejected item update");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }

    let updated = repo::replace(&state.db, user_id, id, &item_fields(&payload))
        .await
        .map_err(internal)?;
    match updated {
        Some(item) => Ok(Json(ItemResponse::from_item(item, today_utc()))),
        None => Err((StatusCode::NOT_FOUND, "Item not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn consume_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ItemResponse>, (StatusCode, String)> {
    let updated = repo::set_consumed(&state.db, user_id, id, true)
        .await
        .map_err(internal)?;
    match updated {
        Some(item) => Ok(Json(ItemResponse::from_item(item, today_utc()))),
        None => Err((StatusCode::NOT_FOUND, "Item not found".into())),
    }
}

#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let removed = repo::delete(&state.db, user_id, id).await.map_err(internal)?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Item not found".into()))
    }
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DashboardResponse>, (StatusCode, String)> {
    let items = repo::list_by_user(&state.db, user_id, false)
        .await
        .map_err(internal)?;
    let today = today_utc();
    let view = aggregate(&items, today);

    let to_responses = |items: Vec<FoodItem>| -> Vec<ItemResponse> {
        items
            .into_iter()
            .map(|item| ItemResponse::from_item(item, today))
            .collect()
    };

    let urgent_count = view.urgent_count();
    let active_total = view.active_total();
    Ok(Json(DashboardResponse {
        expired: to_responses(view.expired),
        expiring_soon: to_responses(view.expiring_soon),
        use_soon: to_responses(view.use_soon),
        fresh: to_responses(view.fresh),
        urgent_count,
        active_total,
    }))
}

#[instrument(skip(state))]
pub async fn calendar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<CalendarDay>>, (StatusCode, String)> {
    let items = repo::list_by_user(&state.db, user_id, false)
        .await
        .map_err(internal)?;
    let view = aggregate(&items, today_utc());
    let days = view
        .by_date
        .into_iter()
        .map(|(date, count)| CalendarDay { date, count })
        .collect();
    Ok(Json(days))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    tracing::error!(error = %e, "items request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
