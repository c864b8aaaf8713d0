use crate::types::InvokeVia;

/// Failure reading a resource from the cluster store.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Kubernetes API error: {0}")]
    Kube(#[from] kube::Error),

    #[error("Resource store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("External IP invocation unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid invoke via type: {0}")]
    InvalidVia(String),

    #[error("'any' cannot appear inside the fallback chain")]
    AnyInChain,

    #[error("Fallback chain is empty")]
    EmptyChain,

    #[error("Invalid ingress guard: {0} (expected on-error or on-success)")]
    InvalidGuard(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("Failed to get deployment: {0}")]
    DeploymentFetch(#[source] FetchError),

    #[error("Failed to get external IP invocation URL: {0}")]
    Platform(#[from] PlatformError),

    #[error("Couldn't find address for invoke via type {0}")]
    NoAddressForVia(InvokeVia),

    #[error("Could not resolve invoke URL")]
    Unresolvable,
}

impl FunctionError {
    /// Whether the error is a resolution miss rather than a fetch or
    /// collaborator failure. Both misses are transient from the caller's view.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FunctionError::NoAddressForVia(_) | FunctionError::Unresolvable
        )
    }
}
