use std::net::SocketAddr;

use talentflow_backend::middleware::chaos::ChaosPolicy;
use talentflow_backend::services::seed_service::SeedService;
use talentflow_backend::store::Store;
use talentflow_backend::{
    config::{get_config, init_config},
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

// Seeding chaos is deliberately milder than the per-request policy: a
// short pause and a small failure chance per bulk step.
const SEED_FAULT_PROBABILITY: f64 = 0.01;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let store = Store::open(&config.database_url).await?;

    if config.seed_on_start {
        let seed_chaos = ChaosPolicy::new(SEED_FAULT_PROBABILITY, 40, 160, config.chaos_seed);
        let seeder = SeedService::new(store.clone(), seed_chaos);
        if let Err(e) = seeder.run().await {
            // Keep serving whatever partial data exists; the next startup
            // detects the missing marker and clears before retrying.
            error!(error = ?e, "Database seeding failed");
        }
    }

    let chaos = ChaosPolicy::new(
        config.fault_probability,
        config.latency_min_ms,
        config.latency_max_ms,
        config.chaos_seed,
    );
    let app_state = AppState::new(store, chaos);

    let app = routes::api_router(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Mock API listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
