#![allow(dead_code)]

use rental_core::RentalConfig;
use rental_crm::{router, AppState, CrmSettings};
use rental_data::User;
use rental_data_sqlx::run_migrations;
use rental_test::TestApp;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub fn users() -> Vec<User> {
    vec![
        User { id: 1, name: "Alice".into() },
        User { id: 2, name: "Bob".into() },
    ]
}

// Kept open for the whole test: the in-memory database dies with its last connection.
async fn seeded_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool).await.unwrap();

    for user in users() {
        sqlx::query("INSERT INTO users (id, name) VALUES (?, ?)")
            .bind(user.id)
            .bind(&user.name)
            .execute(&pool)
            .await
            .unwrap();
    }
    for (id, model) in [(1, "Skoda Octavia"), (2, "VW Golf")] {
        sqlx::query("INSERT INTO cars (id, model) VALUES (?, ?)")
            .bind(id)
            .bind(model)
            .execute(&pool)
            .await
            .unwrap();
    }
    pool
}

/// A fully wired application over a seeded in-memory database.
pub async fn setup() -> (TestApp, AppState) {
    let config = RentalConfig::from_yaml_str("database:\n  url: \"sqlite::memory:\"\n", "test").unwrap();
    let settings = CrmSettings::from_config(&config).unwrap();
    let state = AppState::new(seeded_pool().await, &settings, config);
    (TestApp::new(router(state.clone())), state)
}
