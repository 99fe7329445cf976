use crate::api::models::MessageResponse;
use crate::api::models::stores::{StoreData, StoreSummary};
use crate::errors::Result;
use crate::service;
use crate::types::StoreId;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

#[utoipa::path(
    post,
    path = "/store",
    tag = "stores",
    summary = "Create a pet store",
    request_body = StoreData,
    responses(
        (status = 201, description = "Pet store created successfully", body = StoreData),
        (status = 404, description = "Pet store id in the body does not exist", body = MessageResponse),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_store(State(state): State<AppState>, Json(data): Json<StoreData>) -> Result<(StatusCode, Json<StoreData>)> {
    tracing::info!("Creating pet store {:?}", data.name);
    let store = service::save_store(&state.db, data).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

#[utoipa::path(
    put,
    path = "/store/{store_id}",
    tag = "stores",
    summary = "Update a pet store",
    request_body = StoreData,
    responses(
        (status = 200, description = "Pet store updated successfully", body = StoreData),
        (status = 404, description = "Pet store not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("store_id" = i64, Path, description = "Pet store ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_store(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Json(mut data): Json<StoreData>,
) -> Result<Json<StoreData>> {
    // the id always comes from the path, whatever the body says
    data.id = Some(store_id);
    tracing::info!("Updating pet store with ID={store_id}");
    let store = service::save_store(&state.db, data).await?;
    Ok(Json(store))
}

#[utoipa::path(
    get,
    path = "/store",
    tag = "stores",
    summary = "List pet stores",
    responses(
        (status = 200, description = "Flat summaries of all pet stores", body = Vec<StoreSummary>),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_stores(State(state): State<AppState>) -> Result<Json<Vec<StoreSummary>>> {
    tracing::info!("Retrieving all pet stores");
    let stores = service::list_stores(&state.db).await?;
    Ok(Json(stores))
}

#[utoipa::path(
    get,
    path = "/store/{store_id}",
    tag = "stores",
    summary = "Get a pet store",
    responses(
        (status = 200, description = "Pet store with nested employees and customers", body = StoreData),
        (status = 404, description = "Pet store not found", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("store_id" = i64, Path, description = "Pet store ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_store(State(state): State<AppState>, Path(store_id): Path<StoreId>) -> Result<Json<StoreData>> {
    tracing::info!("Retrieving pet store with ID={store_id}");
    let store = service::get_store(&state.db, store_id).await?;
    Ok(Json(store))
}

#[utoipa::path(
    delete,
    path = "/store/{store_id}",
    tag = "stores",
    summary = "Delete a pet store",
    responses(
        (status = 200, description = "Pet store deleted successfully", body = MessageResponse),
        (status = 404, description = "Pet store not found", body = MessageResponse),
        (status = 409, description = "Store still has dependents (restrict mode)", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("store_id" = i64, Path, description = "Pet store ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn delete_store(State(state): State<AppState>, Path(store_id): Path<StoreId>) -> Result<Json<MessageResponse>> {
    tracing::info!("Deleting pet store with ID={store_id}");
    service::delete_store(&state.db, store_id, state.config.delete_behavior).await?;
    Ok(Json(MessageResponse {
        message: format!("Deletion of Pet Store with ID={store_id} was successful."),
    }))
}
