//! # Bike Rental Service
//!
//! Backend for a bicycle rental business: fleet, stations, customers,
//! discounts and the rental workflow, exposed as a REST API.
//!
//! ## Architecture
//!
//! - **domain**: plain records, patch types and repository traits
//! - **application**: services enforcing the business rules
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **interfaces**: axum REST API with Swagger documentation
//! - **server**: process lifecycle (database, listener, shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::create_api_router;
