use crate::api::models::employees::EmployeeData;
use crate::api::models::MessageResponse;
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
    path = "/store/{store_id}/employee",
    tag = "employees",
    summary = "Add or update a pet store employee",
    request_body = EmployeeData,
    responses(
        (status = 201, description = "Employee saved successfully", body = EmployeeData),
        (status = 404, description = "Pet store or employee not found", body = MessageResponse),
        (status = 409, description = "Employee belongs to a different pet store", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("store_id" = i64, Path, description = "Pet store ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn add_employee(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Json(data): Json<EmployeeData>,
) -> Result<(StatusCode, Json<EmployeeData>)> {
    tracing::info!("Adding employee for pet store with ID={store_id}");
    let employee = service::save_employee(&state.db, store_id, data).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}
