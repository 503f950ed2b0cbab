//! Rental API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateRentalRequest, ListRentalsParams, RentalDto, RevenueDto, RevenueParams,
    UpdateRentalRequest,
};
use crate::application::{RentalService, RentalWindow};
use crate::interfaces::http::common::{api_error, bad_request, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct RentalHandlerState {
    pub service: Arc<RentalService>,
}

fn to_dtos(rentals: Vec<crate::domain::Rental>) -> Vec<RentalDto> {
    rentals.into_iter().map(RentalDto::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals",
    tag = "Rentals",
    params(ListRentalsParams),
    responses(
        (status = 200, description = "Rentals, optionally restricted to a window", body = ApiResponse<Vec<RentalDto>>),
        (status = 400, description = "start_date is not earlier than end_date")
    )
)]
pub async fn list_rentals(
    State(state): State<RentalHandlerState>,
    Query(params): Query<ListRentalsParams>,
) -> Result<Json<ApiResponse<Vec<RentalDto>>>, ApiError> {
    let window = params.window();
    if let Some(w) = window {
        if w.from >= w.to {
            return Err(bad_request("start_date must be earlier than end_date"));
        }
    }
    let rentals = state
        .service
        .list(window)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(to_dtos(rentals))))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/{id}",
    tag = "Rentals",
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental details", body = ApiResponse<RentalDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_rental(
    State(state): State<RentalHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<RentalDto>>, ApiError> {
    let rental = state.service.get(id).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(rental.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/rentals",
    tag = "Rentals",
    request_body = CreateRentalRequest,
    responses(
        (status = 201, description = "Rental opened, bicycle marked rented", body = ApiResponse<RentalDto>),
        (status = 400, description = "Bicycle not available or discount not applicable"),
        (status = 404, description = "User or bicycle not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_rental(
    State(state): State<RentalHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateRentalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RentalDto>>), ApiError> {
    let rental = state
        .service
        .create(request.into())
        .await
        .map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(rental.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/rentals/{id}",
    tag = "Rentals",
    params(("id" = i32, Path, description = "Rental ID")),
    request_body = UpdateRentalRequest,
    responses(
        (status = 200, description = "Rental updated", body = ApiResponse<RentalDto>),
        (status = 400, description = "Discount not applicable"),
        (status = 404, description = "Rental, user or bicycle not found")
    )
)]
pub async fn update_rental(
    State(state): State<RentalHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateRentalRequest>,
) -> Result<Json<ApiResponse<RentalDto>>, ApiError> {
    let rental = state
        .service
        .update(id, request.into())
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(rental.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rentals/{id}",
    tag = "Rentals",
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 204, description = "Rental deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_rental(
    State(state): State<RentalHandlerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await.map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/bicycle-history/{bicycle_id}",
    tag = "Rentals",
    params(("bicycle_id" = i32, Path, description = "Bicycle ID")),
    responses(
        (status = 200, description = "Every rental of the bicycle", body = ApiResponse<Vec<RentalDto>>),
        (status = 404, description = "Bicycle not found")
    )
)]
pub async fn bicycle_history(
    State(state): State<RentalHandlerState>,
    Path(bicycle_id): Path<i32>,
) -> Result<Json<ApiResponse<Vec<RentalDto>>>, ApiError> {
    let rentals = state
        .service
        .history_for_bicycle(bicycle_id)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(to_dtos(rentals))))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/revenue",
    tag = "Rentals",
    params(RevenueParams),
    responses(
        (status = 200, description = "Sum of total_price inside the window", body = ApiResponse<RevenueDto>),
        (status = 400, description = "start_date is not before end_date")
    )
)]
pub async fn revenue(
    State(state): State<RentalHandlerState>,
    Query(params): Query<RevenueParams>,
) -> Result<Json<ApiResponse<RevenueDto>>, ApiError> {
    if params.start_date >= params.end_date {
        return Err(bad_request("start_date must be earlier than end_date"));
    }
    let window = RentalWindow {
        from: params.start_date,
        to: params.end_date,
    };
    let total = state.service.revenue(window).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(RevenueDto {
        start_date: window.from,
        end_date: window.to,
        total_revenue: total,
    })))
}
