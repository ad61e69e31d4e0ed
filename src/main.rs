use borrow_ledger::{
    adapters::{
        clock::SystemClock, http::AvailabilityClient, noop::NoopEventBus,
        postgres::PostgresBorrowStore, redis::RedisEventBus,
    },
    api::{handlers::AppState, router::create_router},
    application::borrow::{EventPublisher, ServiceDependencies},
    config::AppConfig,
    ports::EventBus,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("borrow_ledger={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting borrow ledger v{}", env!("CARGO_PKG_VERSION"));

    // Initialize database connection pool
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Connected to database");

    // Initialize adapters
    let borrow_store = Arc::new(PostgresBorrowStore::new(pool));
    let availability_service = Arc::new(AvailabilityClient::new(
        &config.availability.base_url,
        config.availability.timeout(),
    )?);
    // Redisに接続できない場合はイベントを破棄して起動を続ける
    let event_bus: Arc<dyn EventBus> = match RedisEventBus::connect(&config.event_bus.url).await {
        Ok(bus) => {
            tracing::info!("Connected to event bus");
            Arc::new(bus)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                url = %config.event_bus.url,
                "Event bus unavailable, events will be dropped"
            );
            Arc::new(NoopEventBus)
        }
    };

    tracing::info!(availability = %config.availability.base_url, "Adapters initialized");

    // Create service dependencies
    let service_deps = ServiceDependencies {
        borrow_store,
        availability_service,
        event_publisher: EventPublisher::new(
            event_bus,
            config.event_bus.returned_topic.clone(),
            config.event_bus.overdue_topic.clone(),
        ),
        clock: Arc::new(SystemClock),
    };

    // Create application state
    let app_state = Arc::new(AppState { service_deps });

    // Create router
    let app = create_router(app_state);

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
