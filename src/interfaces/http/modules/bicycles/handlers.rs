//! Bicycle API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{BicycleDto, CreateBicycleRequest, ListBicyclesParams, UpdateBicycleRequest};
use crate::application::BicycleService;
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct BicycleHandlerState {
    pub service: Arc<BicycleService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/bicycles",
    tag = "Bicycles",
    params(ListBicyclesParams),
    responses(
        (status = 200, description = "Bicycles matching the filters", body = ApiResponse<Vec<BicycleDto>>),
        (status = 422, description = "Unknown status value")
    )
)]
pub async fn list_bicycles(
    State(state): State<BicycleHandlerState>,
    Query(params): Query<ListBicyclesParams>,
) -> Result<Json<ApiResponse<Vec<BicycleDto>>>, ApiError> {
    let filter = params.into_filter().map_err(api_error)?;
    let bicycles = state.service.list(&filter).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        bicycles.into_iter().map(BicycleDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/bicycles/{id}",
    tag = "Bicycles",
    params(("id" = i32, Path, description = "Bicycle ID")),
    responses(
        (status = 200, description = "Bicycle details", body = ApiResponse<BicycleDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_bicycle(
    State(state): State<BicycleHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<BicycleDto>>, ApiError> {
    let bicycle = state.service.get(id).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(bicycle.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/bicycles",
    tag = "Bicycles",
    request_body = CreateBicycleRequest,
    responses(
        (status = 201, description = "Bicycle registered", body = ApiResponse<BicycleDto>),
        (status = 404, description = "Location not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_bicycle(
    State(state): State<BicycleHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateBicycleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BicycleDto>>), ApiError> {
    let new = request.into_new().map_err(api_error)?;
    let bicycle = state.service.create(new).await.map_err(api_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(bicycle.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/bicycles/{id}",
    tag = "Bicycles",
    params(("id" = i32, Path, description = "Bicycle ID")),
    request_body = UpdateBicycleRequest,
    responses(
        (status = 200, description = "Bicycle updated", body = ApiResponse<BicycleDto>),
        (status = 404, description = "Bicycle or location not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_bicycle(
    State(state): State<BicycleHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateBicycleRequest>,
) -> Result<Json<ApiResponse<BicycleDto>>, ApiError> {
    let patch = request.into_patch().map_err(api_error)?;
    let bicycle = state.service.update(id, patch).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(bicycle.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/bicycles/{id}",
    tag = "Bicycles",
    params(("id" = i32, Path, description = "Bicycle ID")),
    responses(
        (status = 204, description = "Bicycle deleted"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Bicycle has rentals on record")
    )
)]
pub async fn delete_bicycle(
    State(state): State<BicycleHandlerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await.map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/v1/bicycles/most-rented",
    tag = "Bicycles",
    responses(
        (status = 200, description = "Bicycle with the most rentals", body = ApiResponse<BicycleDto>),
        (status = 404, description = "No rentals recorded yet")
    )
)]
pub async fn most_rented_bicycle(
    State(state): State<BicycleHandlerState>,
) -> Result<Json<ApiResponse<BicycleDto>>, ApiError> {
    match state.service.most_rented().await.map_err(api_error)? {
        Some(bicycle) => Ok(Json(ApiResponse::success(bicycle.into()))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("No rental data available")),
        )),
    }
}
