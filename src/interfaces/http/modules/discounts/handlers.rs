//! Discount API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateDiscountRequest, DiscountDto, ListDiscountsParams, UpdateDiscountRequest};
use crate::application::DiscountService;
use crate::interfaces::http::common::{api_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct DiscountHandlerState {
    pub service: Arc<DiscountService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/discounts",
    tag = "Discounts",
    params(ListDiscountsParams),
    responses(
        (status = 200, description = "Discounts", body = ApiResponse<Vec<DiscountDto>>)
    )
)]
pub async fn list_discounts(
    State(state): State<DiscountHandlerState>,
    Query(params): Query<ListDiscountsParams>,
) -> Result<Json<ApiResponse<Vec<DiscountDto>>>, ApiError> {
    let discounts = state
        .service
        .list(params.active_only)
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(
        discounts.into_iter().map(DiscountDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/discounts/{id}",
    tag = "Discounts",
    params(("id" = i32, Path, description = "Discount ID")),
    responses(
        (status = 200, description = "Discount details", body = ApiResponse<DiscountDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_discount(
    State(state): State<DiscountHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    let discount = state.service.get(id).await.map_err(api_error)?;
    Ok(Json(ApiResponse::success(discount.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/discounts",
    tag = "Discounts",
    request_body = CreateDiscountRequest,
    responses(
        (status = 201, description = "Discount created", body = ApiResponse<DiscountDto>),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_discount(
    State(state): State<DiscountHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateDiscountRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DiscountDto>>), ApiError> {
    let discount = state
        .service
        .create(request.into())
        .await
        .map_err(api_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(discount.into())),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/discounts/{id}",
    tag = "Discounts",
    params(("id" = i32, Path, description = "Discount ID")),
    request_body = UpdateDiscountRequest,
    responses(
        (status = 200, description = "Discount updated", body = ApiResponse<DiscountDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name already taken"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_discount(
    State(state): State<DiscountHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateDiscountRequest>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    let discount = state
        .service
        .update(id, request.into())
        .await
        .map_err(api_error)?;
    Ok(Json(ApiResponse::success(discount.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/discounts/{id}",
    tag = "Discounts",
    params(("id" = i32, Path, description = "Discount ID")),
    responses(
        (status = 204, description = "Discount deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_discount(
    State(state): State<DiscountHandlerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id).await.map_err(api_error)?;
    Ok(StatusCode::NO_CONTENT)
}
