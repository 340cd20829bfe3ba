use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};

use crate::entities::product;
use crate::errors::ApiError;
use crate::validation::{self, ProductPayload};
use crate::{AppState, DataResponse};

/// `GET /api/products` — all products, newest id first.
async fn list_products(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let products = product::Entity::find()
        .order_by_desc(product::Column::Id)
        .all(state.db.as_ref())
        .await?;
    Ok(Json(DataResponse { data: products }))
}

/// `GET /api/products/:id`
async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validation::validate_id(&raw_id)?;
    let found = product::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(ApiError::product_not_found)?;
    Ok(Json(DataResponse { data: found }))
}

/// `POST /api/products`
async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let new_product = validation::validate_create(&payload)?;

    let created = product::ActiveModel {
        name: Set(new_product.name),
        price: Set(new_product.price),
        ..Default::default()
    }
    .insert(state.db.as_ref())
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// `PUT /api/products/:id` — full replace; every mutable field is overwritten.
async fn replace_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let (id, body) = validation::validate_replace(&raw_id, &payload)?;

    let existing = product::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(ApiError::product_not_found)?;

    let mut active: product::ActiveModel = existing.into();
    active.name = Set(body.name);
    active.price = Set(body.price);
    active.availability = Set(body.availability);

    let updated = active.update(state.db.as_ref()).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// `PATCH /api/products/:id` — flips `availability` via an explicit
/// read-modify-write and returns the refreshed row.
async fn toggle_availability(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validation::validate_id(&raw_id)?;

    let existing = product::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(ApiError::product_not_found)?;

    let toggled = !existing.availability;
    let mut active: product::ActiveModel = existing.into();
    active.availability = Set(toggled);

    let updated = active.update(state.db.as_ref()).await?;
    Ok(Json(DataResponse { data: updated }))
}

/// `DELETE /api/products/:id` — physical removal.
async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validation::validate_id(&raw_id)?;

    let existing = product::Entity::find_by_id(id)
        .one(state.db.as_ref())
        .await?
        .ok_or_else(ApiError::product_not_found)?;

    existing.delete(state.db.as_ref()).await?;
    Ok(Json(DataResponse {
        data: "Product removed",
    }))
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/", post(create_product))
        .route("/:id", get(get_product))
        .route("/:id", put(replace_product))
        .route("/:id", patch(toggle_availability))
        .route("/:id", delete(delete_product))
}
