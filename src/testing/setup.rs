use account_api_migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, Set};
use uuid::Uuid;

use crate::config::auth::{Argon2Config, AuthConfig};
use crate::database;
use crate::entities::v1::users;
use crate::helpers::now;
use crate::security::password::PasswordHasher;

/// Fresh in-memory SQLite database with all migrations applied.
///
/// Each call returns an isolated database, so tests never see each other's
/// rows. Panics on setup failure, which is the right behavior for tests.
pub async fn database() -> DatabaseConnection {
    let db = database::memory()
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Auth configuration with Argon2 parameters reduced for test speed.
///
/// Roughly 50-100x faster than the production defaults while exercising
/// the same hashing code path.
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        min_password_length: 6,
        session_cache_ttl: 300,
        argon2: Argon2Config {
            memory_cost: 19456, // 19 MB (reduced from 64 MB)
            time_cost: 1,       // 1 iteration (reduced from 3)
            parallelism: 1,     // 1 thread (reduced from 4)
            hash_length: 32,
            salt_length: 16,
        },
    }
}

pub fn password_hasher() -> Result<PasswordHasher, argon2::password_hash::Error> {
    PasswordHasher::from_config(&auth_config())
}

/// Insert a user with a random unique email. The password is always
/// "password".
pub async fn create_test_user(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
) -> Result<users::Model, DbErr> {
    use rand::Rng;

    let suffix: u32 = rand::thread_rng().gen();
    let email = format!("test_{}@example.com", suffix);

    let hash = hasher.hash("password").expect("Failed to hash password");

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        name: Set("Test User".to_string()),
        password: Set(hash),
        created_at: Set(now()),
        updated_at: Set(now()),
    };

    user.insert(db).await
}

/// Insert a live token row for the user and return its bearer string.
pub async fn bearer(db: &DatabaseConnection, user_id: Uuid) -> String {
    let token = crate::entities::v1::tokens::Model {
        id: Uuid::new_v4(),
        user_id,
        expired_at: None,
        created_at: now(),
    };

    let token = token.store(db).await.expect("Failed to store token");

    crate::security::token::encode(token.id)
}

#[macro_export]
macro_rules! service {
    () => {{
        let db = $crate::testing::setup::database().await;
        let app = ::actix_web::App::new()
            .app_data(::actix_web::web::Data::new(db.clone()))
            .app_data(::actix_web::web::Data::new(
                $crate::testing::setup::auth_config(),
            ))
            .configure($crate::router::route);

        let service = ::actix_web::test::init_service(app).await;

        (service, db)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn database_is_connected_and_migrated() {
        use sea_orm::EntityTrait;

        let db = database().await;

        assert_eq!(db.ping().await, Ok(()));

        let result = users::Entity::find().all(&db).await;
        assert!(result.is_ok(), "users table should exist after migrations");
    }

    #[actix_web::test]
    async fn database_calls_are_isolated() {
        use sea_orm::EntityTrait;

        let db1 = database().await;
        let db2 = database().await;
        let hasher = password_hasher().unwrap();

        let user = create_test_user(&db1, &hasher).await.unwrap();

        let in_db2 = users::Entity::find_by_id(user.id).one(&db2).await.unwrap();
        assert!(in_db2.is_none(), "in-memory databases must be isolated");
    }

    #[actix_web::test]
    async fn test_users_are_unique_and_verifiable() {
        let db = database().await;
        let hasher = password_hasher().unwrap();

        let user1 = create_test_user(&db, &hasher).await.unwrap();
        let user2 = create_test_user(&db, &hasher).await.unwrap();

        assert_ne!(user1.id, user2.id);
        assert_ne!(user1.email, user2.email);

        assert!(hasher.verify("password", &user1.password).unwrap());
        assert!(!hasher.verify("wrong", &user1.password).unwrap());
    }
}
