use bson::doc;
use mongodb::{Collection, Database};

use crate::error::DbError;
use crate::models::User;
use common::Config;

pub const COLLECTION: &str = "users";

fn collection(db: &Database) -> Collection<User> {
    db.collection(COLLECTION)
}

pub async fn find_by_username(db: &Database, username: &str) -> Result<Option<User>, DbError> {
    Ok(collection(db).find_one(doc! { "username": username }).await?)
}

pub async fn insert(db: &Database, user: &User) -> Result<(), DbError> {
    collection(db).insert_one(user).await?;
    Ok(())
}

/// Seeds the singleton admin credential from `ADMIN_USERNAME` /
/// `ADMIN_PASSWORD` when it does not exist yet. A deployment without the
/// variables set simply has no login until they are provided.
pub async fn ensure_admin(db: &Database) -> Result<(), DbError> {
    let config = Config::get();

    if config.admin_username.is_empty() || config.admin_password.is_empty() {
        tracing::warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set; skipping admin bootstrap");
        return Ok(());
    }

    if find_by_username(db, &config.admin_username).await?.is_some() {
        return Ok(());
    }

    let user = User::new(&config.admin_username, &config.admin_password)?;
    insert(db, &user).await?;
    tracing::info!(username = %config.admin_username, "seeded admin user");
    Ok(())
}
