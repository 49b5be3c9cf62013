use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "spese={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = sea_orm::Database::connect(&settings.database.url).await?;
    Migrator::up(&db, None).await?;
    tracing::info!("database ready, schema up to date");

    let engine = engine::Engine::builder().database(db).build().await?;

    let bind = settings.server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(
        engine,
        server::SharedSecret::new(settings.server.api_key),
        listener,
    )
    .await?;

    Ok(())
}
