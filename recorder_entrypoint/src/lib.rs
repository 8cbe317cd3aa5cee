#![deny(missing_docs)]
//! This crate provides a standardized initialization process that should be used across entrypoint crates.
//! This is used to provide consistent behaviour with e.g. tracing configurations

use tracing_subscriber::EnvFilter;

/// Where a binary is currently running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    /// Running inside the Lambda execution environment
    Deployed,
    /// Running on a developer machine
    Local,
}

impl RuntimeEnv {
    /// Detect the runtime environment.
    ///
    /// `AWS_LAMBDA_FUNCTION_NAME` is set by the platform for every managed
    /// execution environment, so its presence is the discriminator.
    pub fn detect() -> Self {
        if std::env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some() {
            RuntimeEnv::Deployed
        } else {
            RuntimeEnv::Local
        }
    }
}

/// unit struct which defines the behaviour for instantiation
#[derive(Debug)]
pub struct Entrypoint {
    env: RuntimeEnv,
}

impl Default for Entrypoint {
    fn default() -> Self {
        Entrypoint {
            env: RuntimeEnv::detect(),
        }
    }
}

/// sentinel struct which guarantees that we called [Entrypoint::init]
#[derive(Debug)]
pub struct InitializedEntrypoint(());

impl Entrypoint {
    /// create a new instance of [Self] from an input [RuntimeEnv]
    pub fn new(env: RuntimeEnv) -> Self {
        Self { env }
    }

    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        match self.env {
            RuntimeEnv::Local => {
                tracing_subscriber::fmt()
                    .with_ansi(true)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .pretty()
                    .init();
            }
            RuntimeEnv::Deployed => {
                tracing_subscriber::fmt()
                    .with_ansi(false)
                    .with_env_filter(EnvFilter::from_default_env())
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_current_span(true)
                    .with_span_list(false)
                    .flatten_event(true)
                    .init();
            }
        }

        InitializedEntrypoint(())
    }
}
