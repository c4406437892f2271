//! Customer handlers

use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use crm_core::{Customer, CustomerError, CustomerRegistration, CustomerUpdate};

fn error_status(err: CustomerError) -> StatusCode {
    match err {
        CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
        CustomerError::DuplicateEmail(_) => StatusCode::CONFLICT,
        CustomerError::NoChanges => StatusCode::BAD_REQUEST,
        other => {
            tracing::error!("Customer operation failed: {}", other);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, StatusCode> {
    match state.customer_service.get_all().await {
        Ok(customers) => Ok(Json(customers)),
        Err(e) => Err(error_status(e)),
    }
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, StatusCode> {
    match state.customer_service.get_by_id(id).await {
        Ok(customer) => Ok(Json(customer)),
        Err(e) => Err(error_status(e)),
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req_body): Json<CustomerRegistration>,
) -> Result<StatusCode, StatusCode> {
    match state.customer_service.register(req_body).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err(error_status(e)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req_body): Json<CustomerUpdate>,
) -> Result<StatusCode, StatusCode> {
    match state.customer_service.update(id, req_body).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err(error_status(e)),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    match state.customer_service.delete_by_id(id).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err(error_status(e)),
    }
}
