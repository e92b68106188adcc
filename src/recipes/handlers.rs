use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, items, state::AppState};

use super::dto::{GenerateRecipeRequest, Pagination, RecipeResponse};
use super::repo;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes/generate", post(generate_recipe))
        .route("/recipes/:id", delete(delete_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<RecipeResponse>>, (StatusCode, String)> {
    let recipes = repo::list_by_user(&state.db, user_id, p.limit, p.offset)
        .await
        .map_err(internal)?;
    Ok(Json(recipes.into_iter().map(RecipeResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeResponse>, (StatusCode, String)> {
    match repo::get(&state.db, user_id, id).await.map_err(internal)? {
        Some(recipe) => Ok(Json(RecipeResponse::from(recipe))),
        None => Err((StatusCode::NOT_FOUND, "Recipe not found".into())),
    }
}

/// Synthesizes a draft from the caller's candidate items and persists it with
/// the item-id snapshot. Consumed or foreign items silently drop out of the
/// candidate set; an empty remainder is reported so the caller can widen the
/// selection.
#[instrument(skip(state, payload))]
pub async fn generate_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<GenerateRecipeRequest>,
) -> Result<(StatusCode, HeaderMap, Json<RecipeResponse>), (StatusCode, String)> {
    let fetched = items::repo::list_active_by_ids(&state.db, user_id, &payload.item_ids)
        .await
        .map_err(internal)?;

    // restore the caller's candidate order
    let mut by_id: HashMap<Uuid, items::repo_types::FoodItem> =
        fetched.into_iter().map(|item| (item.id, item)).collect();
    let candidates: Vec<items::repo_types::FoodItem> = payload
        .item_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect();

    let draft = match state.generator.generate(&candidates) {
        Ok(draft) => draft,
        Err(e) => {
            warn!(error = %e, requested = payload.item_ids.len(), "recipe synthesis rejected");
            return Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
        }
    };

    let source_item_ids: Vec<Uuid> = candidates.iter().map(|item| item.id).collect();
    let recipe = repo::insert(&state.db, user_id, &draft, &source_item_ids)
        .await
        .map_err(internal)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::LOCATION,
        format!("/api/v1/recipes/{}", recipe.id)
            .parse()
            .expect("static path is a valid header value"),
    );

    Ok((StatusCode::CREATED, headers, Json(RecipeResponse::from(recipe))))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let removed = repo::delete(&state.db, user_id, id).await.map_err(internal)?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Recipe not found".into()))
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    tracing::error!(error = %e, "recipes request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
