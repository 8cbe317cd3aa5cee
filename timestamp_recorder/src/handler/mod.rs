use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use lambda_runtime::{Error, LambdaEvent, tracing};

use crate::config::Config;
use crate::model::{
    InvocationFacts, RecordMetadata, RecorderResponse, RecordingError, TimestampRecord,
    key::TimestampKeyParts,
};
use crate::service::s3::S3;

/// Lambda entry: lift the invocation facts out of the runtime context and
/// record one timestamp file. Faults are reported through the response
/// body, never as a handler error.
#[tracing::instrument(skip_all)]
pub async fn handler(
    s3_client: Arc<S3>,
    config: Arc<Config>,
    event: LambdaEvent<serde_json::Value>,
) -> Result<RecorderResponse, Error> {
    let facts = InvocationFacts::from_context(&event.context);
    Ok(record(&s3_client, &config, facts, event.payload).await)
}

/// Creates one timestamp file in the configured bucket and reports the
/// outcome. No retries; a failed upload is terminal for this invocation.
#[tracing::instrument(skip_all, fields(request_id = %facts.request_id))]
pub async fn record(
    s3_client: &S3,
    config: &Config,
    facts: InvocationFacts,
    event: serde_json::Value,
) -> RecorderResponse {
    match try_record(s3_client, config, facts, event).await {
        Ok((key, timestamp)) => {
            tracing::info!(key = %key, "created timestamp file");
            RecorderResponse::success(
                config.bucket_name.clone(),
                key,
                timestamp,
                config.environment.clone(),
            )
        }
        Err(e) => {
            tracing::error!(error = ?e, "failed to create timestamp file");
            RecorderResponse::failure(e.to_string(), config.environment.clone())
        }
    }
}

async fn try_record(
    s3_client: &S3,
    config: &Config,
    facts: InvocationFacts,
    event: serde_json::Value,
) -> Result<(String, String), RecordingError> {
    let now = Utc::now();
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Micros, true);
    let key = TimestampKeyParts {
        environment: config.environment.clone(),
        at: now,
    }
    .to_key();

    let function_name = facts.function_name.clone();
    let record = TimestampRecord {
        execution_time: timestamp.clone(),
        environment: config.environment.clone(),
        facts,
        event_data: event,
        metadata: RecordMetadata::for_build(&config.region),
    };
    let body = serde_json::to_vec_pretty(&record)?;

    let mut metadata = vec![
        ("timestamp".to_string(), timestamp.clone()),
        ("function-name".to_string(), function_name),
    ];
    if let Some(environment) = &config.environment {
        metadata.push(("environment".to_string(), environment.clone()));
    }

    s3_client
        .put_json(&config.bucket_name, &key, body, metadata)
        .await
        .map_err(RecordingError::Upload)?;

    Ok((key, timestamp))
}
