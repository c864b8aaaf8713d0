use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::networking::v1::Ingress;
use kube::{Api, Client};

use crate::error::FetchError;
use crate::types::{DeploymentStatus, IngressStatus};

pub type FetchResult<T> = Result<T, FetchError>;

/// Read-only access to the two cluster objects backing a function.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> FetchResult<DeploymentStatus>;

    /// `Ok(None)` when no ingress exists for the function.
    async fn get_ingress(
        &self,
        namespace: &str,
        name: &str,
    ) -> FetchResult<Option<IngressStatus>>;
}

/// [`ResourceSource`] backed by the Kubernetes API server.
#[derive(Clone)]
pub struct KubeResourceSource {
    client: Client,
}

impl KubeResourceSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> {
        if namespace.is_empty() {
            Api::default_namespaced(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        }
    }

    fn ingresses(&self, namespace: &str) -> Api<Ingress> {
        if namespace.is_empty() {
            Api::default_namespaced(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        }
    }
}

#[async_trait]
impl ResourceSource for KubeResourceSource {
    #[tracing::instrument(level = "trace", skip(self))]
    async fn get_deployment(
        &self,
        namespace: &str,
        name: &str,
    ) -> FetchResult<DeploymentStatus> {
        match self.deployments(namespace).get_opt(name).await? {
            Some(d) => Ok(deployment_status(&d)),
            None => Err(FetchError::NotFound(format!(
                "deployment {}/{}",
                namespace, name
            ))),
        }
    }

    #[tracing::instrument(level = "trace", skip(self))]
    async fn get_ingress(
        &self,
        namespace: &str,
        name: &str,
    ) -> FetchResult<Option<IngressStatus>> {
        let ingress = self.ingresses(namespace).get_opt(name).await?;
        Ok(ingress.as_ref().map(ingress_status))
    }
}

pub(crate) fn deployment_status(d: &Deployment) -> DeploymentStatus {
    DeploymentStatus {
        replicas: d.spec.as_ref().and_then(|s| s.replicas),
        available_replicas: d
            .status
            .as_ref()
            .and_then(|s| s.available_replicas)
            .unwrap_or(0),
    }
}

pub(crate) fn ingress_status(ing: &Ingress) -> IngressStatus {
    let load_balancer_ips = ing
        .status
        .as_ref()
        .and_then(|s| s.load_balancer.as_ref())
        .and_then(|lb| lb.ingress.as_ref())
        .map(|entries| {
            entries
                .iter()
                .map(|e| e.ip.clone().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();
    IngressStatus { load_balancer_ips }
}
