use clap::Parser;
use dotenv::dotenv;
use medilocator_backend::config::Config;
use medilocator_backend::controller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::parse();

    controller::serve(&config).await
}
