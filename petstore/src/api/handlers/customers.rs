use crate::api::models::customers::CustomerData;
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
    path = "/store/{store_id}/customer",
    tag = "customers",
    summary = "Add or update a pet store customer",
    request_body = CustomerData,
    responses(
        (status = 201, description = "Customer saved and linked successfully", body = CustomerData),
        (status = 404, description = "Pet store or customer not found", body = MessageResponse),
        (status = 409, description = "Customer does not shop at this pet store", body = MessageResponse),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("store_id" = i64, Path, description = "Pet store ID")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn add_customer(
    State(state): State<AppState>,
    Path(store_id): Path<StoreId>,
    Json(data): Json<CustomerData>,
) -> Result<(StatusCode, Json<CustomerData>)> {
    tracing::info!("Adding customer for pet store with ID={store_id}");
    let customer = service::save_customer(&state.db, store_id, data).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

#[cfg(test)]
mod tests {
    use crate::api::models::customers::CustomerData;
    use crate::api::models::stores::StoreData;
    use crate::test_utils::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::PgPool;

    #[sqlx::test]
    #[test_log::test]
    async fn test_add_customer_returns_201(pool: PgPool) {
        let app = create_test_app(pool).await;

        let store: StoreData = app.post("/store").json(&json!({"name": "Pawsome"})).await.json();
        let store_id = store.id.unwrap();

        let response = app
            .post(&format!("/store/{store_id}/customer"))
            .json(&json!({"firstName": "Dot", "email": "dot@example.com"}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let customer: CustomerData = response.json();
        assert!(customer.id.is_some());
        assert_eq!(customer.email.as_deref(), Some("dot@example.com"));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_add_customer_to_unknown_store_is_404(pool: PgPool) {
        let app = create_test_app(pool).await;

        let response = app.post("/store/4096/customer").json(&json!({"firstName": "Dot"})).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_customer_through_wrong_store_is_409(pool: PgPool) {
        let app = create_test_app(pool).await;

        let first: StoreData = app.post("/store").json(&json!({"name": "First"})).await.json();
        let second: StoreData = app.post("/store").json(&json!({"name": "Second"})).await.json();
        let first_id = first.id.unwrap();
        let second_id = second.id.unwrap();

        let customer: CustomerData = app
            .post(&format!("/store/{first_id}/customer"))
            .json(&json!({"firstName": "Dot"}))
            .await
            .json();
        let customer_id = customer.id.unwrap();

        let response = app
            .post(&format!("/store/{second_id}/customer"))
            .json(&json!({"id": customer_id, "firstName": "Dot"}))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let body: serde_json::Value = response.json();
        assert_eq!(
            body["message"],
            format!("Customer with ID={customer_id} does not shop at pet store with ID={second_id}")
        );
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_resaving_customer_does_not_duplicate_association(pool: PgPool) {
        let app = create_test_app(pool).await;

        let store: StoreData = app.post("/store").json(&json!({"name": "Pawsome"})).await.json();
        let store_id = store.id.unwrap();

        let customer: CustomerData = app
            .post(&format!("/store/{store_id}/customer"))
            .json(&json!({"firstName": "Dot"}))
            .await
            .json();

        app.post(&format!("/store/{store_id}/customer"))
            .json(&json!({"id": customer.id, "firstName": "Dorothy"}))
            .await
            .assert_status(StatusCode::CREATED);

        let full: StoreData = app.get(&format!("/store/{store_id}")).await.json();
        assert_eq!(full.customers.len(), 1);
        assert_eq!(full.customers[0].first_name.as_deref(), Some("Dorothy"));
    }
}
