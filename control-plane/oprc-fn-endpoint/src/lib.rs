pub mod config;
pub mod error;
pub mod function;
pub mod platform;
pub mod resolver;
pub mod source;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{EndpointConfig, FallbackChain, IngressGuard};
pub use error::{FetchError, FunctionError, PlatformError};
pub use function::FunctionEntity;
pub use platform::{ConfiguredExternalIp, ExternalIpResolver};
pub use source::{KubeResourceSource, ResourceSource};
pub use types::{
    DeploymentStatus, FunctionMeta, IngressStatus, InvokeVia, ResolvedEndpoint,
    StatusSnapshot,
};

use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

pub fn init_tracing(default_env: &str) {
    let filter = EnvFilter::builder()
        .with_env_var("RUST_LOG")
        .from_env_lossy()
        .add_directive(
            default_env
                .parse()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        );

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();
}
