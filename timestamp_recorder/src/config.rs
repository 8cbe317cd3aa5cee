use anyhow::Context;

/// The configuration parameters for the recorder.
///
/// These are pulled from environment variables, which is how the
/// deployment tooling populates the Lambda execution environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// The bucket that timestamp files are written to
    pub bucket_name: String,

    /// Optional label for the deployment this recorder belongs to.
    /// When present it prefixes every object key and is copied into
    /// the stored record.
    pub environment: Option<String>,

    /// The region reported in the stored record's metadata
    pub region: String,
}

impl Config {
    pub fn new(bucket_name: &str, environment: Option<&str>, region: &str) -> Self {
        Config {
            bucket_name: bucket_name.to_string(),
            environment: environment.map(|e| e.to_string()),
            region: region.to_string(),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a [Config] from an arbitrary variable lookup.
    ///
    /// `from_env` goes through here so the parsing rules stay testable
    /// without touching process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let bucket_name = lookup("BUCKET_NAME").context("BUCKET_NAME must be provided")?;
        let environment = lookup("ENVIRONMENT").filter(|e| !e.is_empty());
        let region = lookup("REGION").unwrap_or_else(|| "unknown".to_string());

        Ok(Config {
            bucket_name,
            environment,
            region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn requires_bucket_name() {
        let err = Config::from_lookup(lookup_from(&[("ENVIRONMENT", "prod")])).unwrap_err();
        assert!(err.to_string().contains("BUCKET_NAME"));
    }

    #[test]
    fn environment_and_region_are_optional() {
        let config = Config::from_lookup(lookup_from(&[("BUCKET_NAME", "my-bucket")])).unwrap();
        assert_eq!(config.bucket_name, "my-bucket");
        assert_eq!(config.environment, None);
        assert_eq!(config.region, "unknown");
    }

    #[test]
    fn empty_environment_counts_as_unset() {
        let config = Config::from_lookup(lookup_from(&[
            ("BUCKET_NAME", "my-bucket"),
            ("ENVIRONMENT", ""),
        ]))
        .unwrap();
        assert_eq!(config.environment, None);
    }

    #[test]
    fn reads_all_vars_when_present() {
        let config = Config::from_lookup(lookup_from(&[
            ("BUCKET_NAME", "my-bucket"),
            ("ENVIRONMENT", "prod"),
            ("REGION", "us-east-1"),
        ]))
        .unwrap();
        assert_eq!(config.environment.as_deref(), Some("prod"));
        assert_eq!(config.region, "us-east-1");
    }
}
