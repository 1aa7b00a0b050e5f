pub mod error;
pub mod models;
pub mod repositories;

pub use error::DbError;

use common::Config;
use mongodb::{Client, Database};

/// Connects to the configured MongoDB deployment and returns a handle to
/// the application database.
///
/// Called once at startup; an unreachable store is fatal here rather than
/// surfacing as a 500 on every request.
pub async fn connect() -> Database {
    let config = Config::get();

    let client = Client::with_uri_str(&config.mongodb_url)
        .await
        .expect("Failed to connect to MongoDB");

    client.database(&config.database_name)
}
