use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;

use crate::error::ConfigError;

pub const DEFAULT_FUNCTION_VERSION: &str = "latest";

/// Mechanism a caller wants to reach the function through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InvokeVia {
    #[default]
    Any,
    LoadBalancer,
    ExternalIp,
    DomainName,
}

impl fmt::Display for InvokeVia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvokeVia::Any => "any",
            InvokeVia::LoadBalancer => "load-balancer",
            InvokeVia::ExternalIp => "external-ip",
            InvokeVia::DomainName => "domain-name",
        };
        f.write_str(s)
    }
}

impl FromStr for InvokeVia {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(InvokeVia::Any),
            "load-balancer" | "loadbalancer" | "ingress" => {
                Ok(InvokeVia::LoadBalancer)
            }
            "external-ip" | "externalip" => Ok(InvokeVia::ExternalIp),
            "domain-name" | "domainname" => Ok(InvokeVia::DomainName),
            other => Err(ConfigError::InvalidVia(other.to_string())),
        }
    }
}

/// Identity of a deployed function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FunctionMeta {
    pub name: String,
    pub namespace: String,
    pub version: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

impl FunctionMeta {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            version: DEFAULT_FUNCTION_VERSION.to_string(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Build from the metadata of the function's custom resource.
    /// A missing namespace becomes the empty string.
    pub fn from_object_meta(meta: &ObjectMeta) -> Self {
        Self {
            name: meta.name.clone().unwrap_or_default(),
            namespace: meta.namespace.clone().unwrap_or_default(),
            version: DEFAULT_FUNCTION_VERSION.to_string(),
            labels: meta.labels.clone().unwrap_or_default(),
            annotations: meta.annotations.clone().unwrap_or_default(),
        }
    }
}

/// Last aggregated view of the function's runtime status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub configured_replicas: i32,
    pub available_replicas: i32,
    pub ingress_address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedEndpoint {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl ResolvedEndpoint {
    pub fn new(host: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            path: path.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.host.is_empty()
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}{}", self.host, self.port, self.path)
    }
}

/// Replica facts read from a Deployment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeploymentStatus {
    /// `spec.replicas`; `None` when the spec leaves it unset.
    pub replicas: Option<i32>,
    /// `status.availableReplicas`, 0 when unset.
    pub available_replicas: i32,
}

/// Load balancer facts read from an Ingress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IngressStatus {
    /// One element per load balancer entry, `""` when the entry has no IP.
    pub load_balancer_ips: Vec<String>,
}
