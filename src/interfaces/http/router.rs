//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    response::Redirect,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::AppServices;

use super::common::ApiResponse;
use super::modules::{
    bicycles, discounts, health, locations, metrics, rentals, request_id, users,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Bicycles
        bicycles::list_bicycles,
        bicycles::get_bicycle,
        bicycles::create_bicycle,
        bicycles::update_bicycle,
        bicycles::delete_bicycle,
        bicycles::most_rented_bicycle,
        // Locations
        locations::list_locations,
        locations::get_location,
        locations::create_location,
        locations::update_location,
        locations::delete_location,
        locations::top_locations,
        // Users
        users::list_users,
        users::get_user,
        users::get_user_by_email,
        users::get_user_by_phone,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Discounts
        discounts::list_discounts,
        discounts::get_discount,
        discounts::create_discount,
        discounts::update_discount,
        discounts::delete_discount,
        // Rentals
        rentals::list_rentals,
        rentals::get_rental,
        rentals::create_rental,
        rentals::update_rental,
        rentals::delete_rental,
        rentals::bicycle_history,
        rentals::revenue,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            bicycles::BicycleDto,
            bicycles::CreateBicycleRequest,
            bicycles::UpdateBicycleRequest,
            locations::LocationDto,
            locations::CreateLocationRequest,
            locations::UpdateLocationRequest,
            users::UserDto,
            users::CreateUserRequest,
            users::UpdateUserRequest,
            discounts::DiscountDto,
            discounts::CreateDiscountRequest,
            discounts::UpdateDiscountRequest,
            rentals::RentalDto,
            rentals::CreateRentalRequest,
            rentals::UpdateRentalRequest,
            rentals::RevenueDto,
        )
    ),
    tags(
        (name = "Health", description = "Service and database health"),
        (name = "Bicycles", description = "Fleet management and the most-rented bicycle"),
        (name = "Locations", description = "Rental stations and their ranking by rentals"),
        (name = "Users", description = "Customers"),
        (name = "Discounts", description = "Percentage discounts with a validity window"),
        (name = "Rentals", description = "Check-out, returns, bicycle history and revenue"),
    ),
    info(
        title = "Bike Rental API",
        version = "1.0.0",
        description = "REST API for a bicycle rental service",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the full application router.
///
/// `metrics` is the installed Prometheus recorder; `/metrics` is only
/// mounted when one is given.
pub fn create_api_router(
    services: AppServices,
    db: DatabaseConnection,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let bicycle_routes = Router::new()
        .route(
            "/",
            get(bicycles::list_bicycles).post(bicycles::create_bicycle),
        )
        .route("/most-rented", get(bicycles::most_rented_bicycle))
        .route(
            "/{id}",
            get(bicycles::get_bicycle)
                .put(bicycles::update_bicycle)
                .delete(bicycles::delete_bicycle),
        )
        .with_state(bicycles::BicycleHandlerState {
            service: services.bicycles.clone(),
        });

    let location_routes = Router::new()
        .route(
            "/",
            get(locations::list_locations).post(locations::create_location),
        )
        .route("/top-rentals", get(locations::top_locations))
        .route(
            "/{id}",
            get(locations::get_location)
                .put(locations::update_location)
                .delete(locations::delete_location),
        )
        .with_state(locations::LocationHandlerState {
            service: services.locations.clone(),
        });

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/by-email/{email}", get(users::get_user_by_email))
        .route("/by-phone/{phone}", get(users::get_user_by_phone))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(users::UserHandlerState {
            service: services.users.clone(),
        });

    let discount_routes = Router::new()
        .route(
            "/",
            get(discounts::list_discounts).post(discounts::create_discount),
        )
        .route(
            "/{id}",
            get(discounts::get_discount)
                .put(discounts::update_discount)
                .delete(discounts::delete_discount),
        )
        .with_state(discounts::DiscountHandlerState {
            service: services.discounts.clone(),
        });

    let rental_routes = Router::new()
        .route("/", get(rentals::list_rentals).post(rentals::create_rental))
        .route("/revenue", get(rentals::revenue))
        .route(
            "/bicycle-history/{bicycle_id}",
            get(rentals::bicycle_history),
        )
        .route(
            "/{id}",
            get(rentals::get_rental)
                .put(rentals::update_rental)
                .delete(rentals::delete_rental),
        )
        .with_state(rentals::RentalHandlerState {
            service: services.rentals.clone(),
        });

    let api_v1 = Router::new()
        .nest("/bicycles", bicycle_routes)
        .nest("/locations", location_routes)
        .nest("/users", user_routes)
        .nest("/discounts", discount_routes)
        .nest("/rentals", rental_routes);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let mut app = Router::new()
        .route("/", get(|| async { Redirect::permanent("/docs/") }))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .nest("/api/v1", api_v1);

    if let Some(handle) = metrics {
        app = app.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(request_id::request_id_middleware))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infrastructure::database::repositories::test_support::migrated_db;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    async fn app() -> Router {
        let db = migrated_db().await;
        let repos = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        create_api_router(AppServices::new(repos), db, None)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn seed_rider_and_bicycle(app: &Router) -> (i64, i64) {
        let (status, user) = send(
            app,
            "POST",
            "/api/v1/users",
            Some(json!({"first_name": "Mykola", "last_name": "Hnatiuk", "phone": "+380931112233"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, bicycle) = send(
            app,
            "POST",
            "/api/v1/bicycles",
            Some(json!({"brand": "Cube", "model": "Nature", "type": "trekking", "price_per_hour": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        (
            user["data"]["id"].as_i64().unwrap(),
            bicycle["data"]["id"].as_i64().unwrap(),
        )
    }

    fn rental_body(user_id: i64, bicycle_id: i64) -> Value {
        json!({
            "user_id": user_id,
            "bicycle_id": bicycle_id,
            "rental_start_time": "2024-01-01T10:00:00Z",
            "rental_end_time": "2024-01-01T12:00:00Z",
            "total_price": 20
        })
    }

    #[tokio::test]
    async fn rental_lifecycle_over_http() {
        let app = app().await;
        let (user_id, bicycle_id) = seed_rider_and_bicycle(&app).await;

        let (status, created) =
            send(&app, "POST", "/api/v1/rentals", Some(rental_body(user_id, bicycle_id))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["success"], true);
        assert_eq!(created["data"]["total_price"], 20.0);
        let rental_id = created["data"]["id"].as_i64().unwrap();

        let (_, bicycle) = send(&app, "GET", &format!("/api/v1/bicycles/{}", bicycle_id), None).await;
        assert_eq!(bicycle["data"]["status"], "rented");

        let (status, rejected) =
            send(&app, "POST", "/api/v1/rentals", Some(rental_body(user_id, bicycle_id))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(rejected["success"], false);

        let (status, returned) = send(
            &app,
            "PUT",
            &format!("/api/v1/rentals/{}", rental_id),
            Some(json!({"actual_return_time": "2024-01-01T11:55:00"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(returned["data"]["total_price"], 20.0);

        let (_, bicycle) = send(&app, "GET", &format!("/api/v1/bicycles/{}", bicycle_id), None).await;
        assert_eq!(bicycle["data"]["status"], "available");

        let (status, most) = send(&app, "GET", "/api/v1/bicycles/most-rented", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(most["data"]["id"].as_i64(), Some(bicycle_id));

        let (status, history) = send(
            &app,
            "GET",
            &format!("/api/v1/rentals/bicycle-history/{}", bicycle_id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_references_map_to_404() {
        let app = app().await;

        let (status, body) = send(&app, "POST", "/api/v1/rentals", Some(rental_body(1, 1))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("User"));

        let (status, _) = send(&app, "GET", "/api/v1/rentals/bicycle-history/3", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/api/v1/bicycles/most-rented", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/bicycles",
            Some(json!({"brand": "Cube", "model": "Nature", "type": "trekking",
                        "price_per_hour": 10, "current_location_id": 12})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/api/v1/discounts/8", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn revenue_requires_ordered_window() {
        let app = app().await;

        let (status, _) = send(
            &app,
            "GET",
            "/api/v1/rentals/revenue?start_date=2024-02-01&end_date=2024-01-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/api/v1/rentals/revenue?start_date=2024-02-01", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "GET",
            "/api/v1/rentals?start_date=2024-02-01&end_date=2024-02-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/rentals?start_date=2024-01-01&end_date=2024-02-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/rentals/revenue?start_date=2024-01-01&end_date=2024-02-01",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total_revenue"], 0.0);
    }

    #[tokio::test]
    async fn user_with_rentals_is_not_deleted() {
        let app = app().await;
        let (user_id, bicycle_id) = seed_rider_and_bicycle(&app).await;
        send(&app, "POST", "/api/v1/rentals", Some(rental_body(user_id, bicycle_id))).await;

        let (status, _) = send(&app, "DELETE", &format!("/api/v1/users/{}", user_id), None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(&app, "GET", "/api/v1/users/by-phone/+380931112233", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"].as_i64(), Some(user_id));
    }

    #[tokio::test]
    async fn delete_returns_no_content() {
        let app = app().await;
        let (status, location) = send(
            &app,
            "POST",
            "/api/v1/locations",
            Some(json!({"name": "Central Station"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = location["data"]["id"].as_i64().unwrap();

        let (status, body) = send(&app, "DELETE", &format!("/api/v1/locations/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, "GET", &format!("/api/v1/locations/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn validation_and_filter_errors() {
        let app = app().await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/bicycles",
            Some(json!({"brand": "Cube", "model": "Nature", "type": "trekking", "price_per_hour": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(&app, "GET", "/api/v1/bicycles?status=stolen", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(&app, "GET", "/api/v1/bicycles?status=available&sort_by_price=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));

        let (status, _) = send(&app, "GET", "/api/v1/locations/top-rentals?limit=0", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/locations/top-rentals?limit=18446744073709551615",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = send(&app, "GET", "/api/v1/locations/top-rentals", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn health_reports_database_and_echoes_request_id() {
        let app = app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "probe-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            "probe-1"
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["database"]["status"], "ok");
    }

    #[test]
    fn openapi_lists_every_resource() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/bicycles/most-rented",
            "/api/v1/locations/top-rentals",
            "/api/v1/users/by-email/{email}",
            "/api/v1/discounts/{id}",
            "/api/v1/rentals/revenue",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
