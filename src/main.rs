use anyhow::{Context, Result};
use stormwatch::{handler, AlertConfig, AwsSecretStore, SnsPublisher, WeatherClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AlertConfig::load().context("Failed to load configuration")?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let secrets = AwsSecretStore::new(aws_sdk_secretsmanager::Client::new(&aws_config));
    let publisher = SnsPublisher::new(aws_sdk_sns::Client::new(&aws_config));
    let weather = WeatherClient::new(&config).context("Failed to create weather client")?;

    let response = handler::run(&config, &secrets, &weather, &publisher).await;

    println!("{} {}", response.status_code, response.body);

    if response.status_code != 200 {
        std::process::exit(1);
    }
    Ok(())
}
