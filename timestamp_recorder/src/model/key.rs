use chrono::{DateTime, Utc};

/// The pieces that an object key is derived from.
///
/// Keys look like `prod/timestamp_2024-01-15_14-30-45-123.json`, with the
/// environment segment omitted when no environment label is configured.
/// The fractional part is the instant's microseconds truncated to three
/// digits, which keeps keys unique for any two invocations more than a
/// millisecond apart.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TimestampKeyParts {
    pub environment: Option<String>,
    pub at: DateTime<Utc>,
}

impl TimestampKeyParts {
    pub fn to_key(&self) -> String {
        let stamp = self.at.format("%Y-%m-%d_%H-%M-%S-%3f");
        match &self.environment {
            Some(environment) => format!("{environment}/timestamp_{stamp}.json"),
            None => format!("timestamp_{stamp}.json"),
        }
    }
}
