use rental_core::{init_tracing, RentalConfig};
use rental_crm::{router, AppState, CrmSettings};
use rental_data_sqlx::run_migrations;
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let config = RentalConfig::load("dev")?;
    let settings = CrmSettings::from_config(&config)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let profile = config.profile().to_string();
    let app = router(AppState::new(pool, &settings, config));

    let listener = tokio::net::TcpListener::bind(&settings.addr).await?;
    tracing::info!(addr = %settings.addr, %profile, "rental-crm listening");
    axum::serve(listener, app).await?;
    Ok(())
}
