use dashmap::DashMap;
use restful::prelude::*;

mod modules;

use modules::product::{CategoryController, ProductController};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Starting example server...");

    // 1. Shared in-memory store
    let products = Arc::new(DashMap::new());

    // 2. Mount controllers
    let mut router = Router::new();
    router
        .handle_resource("/products", Arc::new(ProductController::new(Arc::clone(&products))))?
        .handle_resource("/categories", Arc::new(CategoryController::new(products)))?;

    for route in router.routes() {
        tracing::info!(%route, "Mounted");
    }

    // 3. Serve until Ctrl+C / SIGTERM
    let config = ServerConfig::from_config(&ConfigService::new())?;
    restful::server::serve(router, &config).await?;

    Ok(())
}
