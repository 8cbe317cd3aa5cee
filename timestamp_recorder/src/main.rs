mod config;
mod handler;
mod model;
mod service;

use anyhow::Context;
use config::Config;
use lambda_runtime::{Error, LambdaEvent, run, service_fn, tracing};
use recorder_entrypoint::Entrypoint;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    Entrypoint::default().init();
    tracing::trace!("initiating lambda");

    let config = Config::from_env().context("all necessary env vars should be available")?;
    tracing::trace!("initialized config");

    let s3_client = service::s3::S3::new(aws_sdk_s3::Client::new(
        &aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await,
    ));
    tracing::trace!("initialized s3 client");

    // Shared references
    let shared_s3_client = Arc::new(s3_client);
    let shared_config = Arc::new(config);

    let func = service_fn(move |event: LambdaEvent<serde_json::Value>| {
        let s3_client = shared_s3_client.clone();
        let config = shared_config.clone();

        async move { handler::handler(s3_client, config, event).await }
    });

    run(func).await
}
