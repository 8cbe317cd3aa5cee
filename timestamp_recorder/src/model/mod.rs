use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

pub mod key;

/// Facts about the current invocation, lifted from the runtime context.
///
/// Captured once at the start of the invocation and never mutated; field
/// names match how they appear in the stored record.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationFacts {
    #[serde(rename = "lambda_function_name")]
    pub function_name: String,
    #[serde(rename = "lambda_function_version")]
    pub function_version: String,
    #[serde(rename = "lambda_request_id")]
    pub request_id: String,
    pub remaining_time_ms: i64,
    pub memory_limit_mb: i32,
    pub log_group_name: String,
    pub log_stream_name: String,
}

impl InvocationFacts {
    pub fn from_context(context: &lambda_runtime::Context) -> Self {
        // deadline is milliseconds since the epoch
        let now_ms = Utc::now().timestamp_millis();
        let remaining_time_ms = (context.deadline as i64).saturating_sub(now_ms).max(0);

        Self {
            function_name: context.env_config.function_name.clone(),
            function_version: context.env_config.version.clone(),
            request_id: context.request_id.clone(),
            remaining_time_ms,
            memory_limit_mb: context.env_config.memory,
            log_group_name: context.env_config.log_group.clone(),
            log_stream_name: context.env_config.log_stream.clone(),
        }
    }
}

/// The document stored in the bucket, one per invocation.
#[derive(Debug, Serialize)]
pub struct TimestampRecord {
    /// ISO-8601 instant with microsecond precision
    pub execution_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(flatten)]
    pub facts: InvocationFacts,
    /// The triggering payload, copied in verbatim
    pub event_data: serde_json::Value,
    pub metadata: RecordMetadata,
}

#[derive(Debug, Serialize)]
pub struct RecordMetadata {
    pub region: String,
    pub runtime: &'static str,
    pub architecture: &'static str,
}

impl RecordMetadata {
    pub fn for_build(region: &str) -> Self {
        Self {
            region: region.to_string(),
            runtime: "rust",
            architecture: std::env::consts::ARCH,
        }
    }
}

/// What can go wrong while recording a timestamp
#[derive(Debug, Error)]
pub enum RecordingError {
    #[error("could not serialize timestamp record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("could not upload timestamp record: {0}")]
    Upload(#[source] anyhow::Error),
}

/// The envelope returned to the invoking platform.
///
/// Faults are reported through the 500 variant of the body rather than
/// as handler errors, so an invocation always completes with a response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success {
        message: &'static str,
        bucket: String,
        file_name: String,
        timestamp: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        environment: Option<String>,
    },
    Failure {
        error: &'static str,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        environment: Option<String>,
    },
}

impl RecorderResponse {
    pub fn success(
        bucket: String,
        file_name: String,
        timestamp: String,
        environment: Option<String>,
    ) -> Self {
        Self {
            status_code: 200,
            body: ResponseBody::Success {
                message: "Timestamp file created successfully",
                bucket,
                file_name,
                timestamp,
                environment,
            },
        }
    }

    pub fn failure(message: String, environment: Option<String>) -> Self {
        Self {
            status_code: 500,
            body: ResponseBody::Failure {
                error: "Failed to create timestamp file",
                message,
                environment,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn facts() -> InvocationFacts {
        InvocationFacts {
            function_name: "timestamp-recorder".to_string(),
            function_version: "$LATEST".to_string(),
            request_id: "00000000-0000-0000-0000-000000000000".to_string(),
            remaining_time_ms: 30_000,
            memory_limit_mb: 128,
            log_group_name: "/aws/lambda/timestamp-recorder".to_string(),
            log_stream_name: "2024/01/15/[$LATEST]deadbeef".to_string(),
        }
    }

    #[test]
    fn record_round_trips_event_payload() {
        let payload = json!({
            "source": "scheduler",
            "detail": { "nested": [1, 2, 3], "flag": true }
        });
        let record = TimestampRecord {
            execution_time: "2024-01-15T14:30:45.123456Z".to_string(),
            environment: Some("prod".to_string()),
            facts: facts(),
            event_data: payload.clone(),
            metadata: RecordMetadata::for_build("us-east-1"),
        };

        let body = serde_json::to_string_pretty(&record).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(parsed["event_data"], payload);
        assert_eq!(parsed["execution_time"], "2024-01-15T14:30:45.123456Z");
        assert_eq!(parsed["environment"], "prod");
        assert_eq!(parsed["lambda_function_name"], "timestamp-recorder");
        assert_eq!(parsed["lambda_function_version"], "$LATEST");
        assert_eq!(parsed["memory_limit_mb"], 128);
        assert_eq!(parsed["metadata"]["region"], "us-east-1");
        assert_eq!(parsed["metadata"]["runtime"], "rust");
    }

    #[test]
    fn record_omits_environment_when_unset() {
        let record = TimestampRecord {
            execution_time: "2024-01-15T14:30:45.123456Z".to_string(),
            environment: None,
            facts: facts(),
            event_data: json!({}),
            metadata: RecordMetadata::for_build("unknown"),
        };

        let parsed = serde_json::to_value(&record).unwrap();
        assert!(parsed.get("environment").is_none());
    }

    #[test]
    fn serialized_record_uses_two_space_indent() {
        let record = TimestampRecord {
            execution_time: "2024-01-15T14:30:45.123456Z".to_string(),
            environment: None,
            facts: facts(),
            event_data: json!({"a": 1}),
            metadata: RecordMetadata::for_build("unknown"),
        };

        let body = serde_json::to_string_pretty(&record).unwrap();
        assert!(body.lines().nth(1).unwrap().starts_with("  \""));
    }

    #[test]
    fn success_response_shape() {
        let response = RecorderResponse::success(
            "my-bucket".to_string(),
            "prod/timestamp_2024-01-15_14-30-45-123.json".to_string(),
            "2024-01-15T14:30:45.123456Z".to_string(),
            Some("prod".to_string()),
        );

        let parsed = serde_json::to_value(&response).unwrap();
        assert_eq!(parsed["statusCode"], 200);
        assert_eq!(parsed["body"]["message"], "Timestamp file created successfully");
        assert_eq!(parsed["body"]["bucket"], "my-bucket");
        assert_eq!(
            parsed["body"]["file_name"],
            "prod/timestamp_2024-01-15_14-30-45-123.json"
        );
        assert_eq!(parsed["body"]["environment"], "prod");
    }

    #[test]
    fn failure_response_carries_error_text() {
        let response = RecorderResponse::failure("access denied".to_string(), None);

        let parsed = serde_json::to_value(&response).unwrap();
        assert_eq!(parsed["statusCode"], 500);
        assert_eq!(parsed["body"]["error"], "Failed to create timestamp file");
        assert_eq!(parsed["body"]["message"], "access denied");
        assert!(parsed["body"].get("environment").is_none());
    }
}
