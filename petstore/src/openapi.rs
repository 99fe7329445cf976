//! OpenAPI document assembly for the management API.

use crate::api::models::customers::CustomerData;
use crate::api::models::employees::EmployeeData;
use crate::api::models::stores::{StoreData, StoreSummary};
use crate::api::models::MessageResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pet Store Management API",
        description = "CRUD API for pet stores and their employees and customers"
    ),
    paths(
        crate::api::handlers::stores::create_store,
        crate::api::handlers::stores::update_store,
        crate::api::handlers::stores::list_stores,
        crate::api::handlers::stores::get_store,
        crate::api::handlers::stores::delete_store,
        crate::api::handlers::employees::add_employee,
        crate::api::handlers::customers::add_customer,
    ),
    components(schemas(StoreData, StoreSummary, EmployeeData, CustomerData, MessageResponse)),
    tags(
        (name = "stores", description = "Pet store management"),
        (name = "employees", description = "Employees of a pet store"),
        (name = "customers", description = "Customers shopping at pet stores")
    )
)]
pub struct ApiDoc;
