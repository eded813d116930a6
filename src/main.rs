use wassali::config::Config;
use wassali::engine::Engine;
use wassali::error::Error;
use wassali::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    tracing::info!(
        "minimum fare {}, rate {} per km",
        config.fare.minimum_fare,
        config.fare.per_km_rate
    );

    let engine = Engine::from_config(&config);

    serve(engine, config.listen_addr).await
}
