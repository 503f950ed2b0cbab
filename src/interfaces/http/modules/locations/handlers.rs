//! Location API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateLocationRequest, LocationDto, TopLocationsParams, UpdateLocationRequest};
use crate::application::services::MAX_TOP_LIMIT;
use crate::application::LocationService;
use crate::interfaces::http::common::{api_error, bad_request, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct LocationHandlerState {
    pub service: Arc<LocationService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/locations",
    tag = "Locations",
    responses(
        (status = 200, description = "All locations", body = ApiResponse<Vec<LocationDto>>)
    )
)]
pub async fn list_locations(
    State(state): State<LocationHandlerState>,
) -> Result<Json<ApiResponse<Vec<LocationDto>>>, ApiError> {
    let locations = state.service.list().await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        locations.into_iter().map(LocationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/{id}",
    tag = "Locations",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 200, description = "Location details", body = ApiResponse<LocationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_location(
    State(state): State<LocationHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<LocationDto>>, ApiError> {
    let location = state.service.get(id).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(location.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/locations",
    tag = "Locations",
    request_body = CreateLocationRequest,
    responses(
        (status = 201, description = "Location created", body = ApiResponse<LocationDto>),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_location(
    State(state): State<LocationHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateLocationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LocationDto>>), ApiError> {
    let location = state
        .service
        .create(request.into())
        .await
        .map_err(api_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(location.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/locations/{id}",
    tag = "Locations",
    params(("id" = i32, Path, description = "Location ID")),
    request_body = UpdateLocationRequest,
    responses(
        (status = 200, description = "Location updated", body = ApiResponse<LocationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_location(
    State(state): State<LocationHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateLocationRequest>,
) -> Result<Json<ApiResponse<LocationDto>>, ApiError> {
    let location = state
        .service
        .update(id, request.into())
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(location.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/locations/{id}",
    tag = "Locations",
    params(("id" = i32, Path, description = "Location ID")),
    responses(
        (status = 204, description = "Location deleted, its bicycles detached"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_location(
    State(state): State<LocationHandlerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await.map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/locations/top-rentals",
    tag = "Locations",
    params(TopLocationsParams),
    responses(
        (status = 200, description = "Locations ordered by rental count", body = ApiResponse<Vec<LocationDto>>),
        (status = 400, description = "Invalid range or limit")
    )
)]
pub async fn top_locations(
    State(state): State<LocationHandlerState>,
    Query(params): Query<TopLocationsParams>,
) -> Result<Json<ApiResponse<Vec<LocationDto>>>, ApiError> {
    if !(1..=MAX_TOP_LIMIT).contains(&params.limit) {
        return Err(bad_request(format!(
            "limit must be between 1 and {}",
            MAX_TOP_LIMIT
        )));
    }
    if let (Some(start), Some(end)) = (params.start_date, params.end_date) {
        if start > end {
            return Err(bad_request("start_date must not be later than end_date"));
        }
    }
    let locations = state
        .service
        .top_by_rentals(params.start_date, params.end_date, params.limit)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        locations.into_iter().map(LocationDto::from).collect(),
    )))
}
