pub mod domain;
pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    use crate::domain::a001_material::{MaterialStore, SeaOrmMaterialStore};
    use crate::routes::{configure_routes, AppState};
    use crate::shared::config;

    system::tracing::initialize()?;

    let config = config::load_config()?;

    // Initialize database (path from config.toml)
    let db_path = config::get_database_path(&config);
    let conn = shared::data::db::initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;
    let store: Arc<dyn MaterialStore> = Arc::new(SeaOrmMaterialStore::new(conn));

    if config.database.seed_demo_data {
        system::initialization::seed_demo_materials(store.as_ref()).await?;
    }

    let app = configure_routes(AppState::new(store));

    let port = config::resolve_port(config.server.port, std::env::var("PORT").ok());
    let addr: SocketAddr = format!("{}:{}", config.server.host, port).parse()?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
