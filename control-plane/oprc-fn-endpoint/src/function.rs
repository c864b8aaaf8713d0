use std::sync::Arc;

use tracing::debug;

use crate::config::EndpointConfig;
use crate::error::FunctionError;
use crate::platform::ExternalIpResolver;
use crate::source::ResourceSource;
use crate::types::{FunctionMeta, StatusSnapshot};

/// A deployed function together with the last known status of the cluster
/// objects backing it.
///
/// [`FunctionEntity::initialize`] refreshes the snapshot; the invoke URL
/// resolver and [`FunctionEntity::replicas`] only read it.
pub struct FunctionEntity {
    pub(crate) meta: FunctionMeta,
    pub(crate) snapshot: StatusSnapshot,
    pub(crate) config: EndpointConfig,
    source: Arc<dyn ResourceSource>,
    pub(crate) platform: Arc<dyn ExternalIpResolver>,
}

impl FunctionEntity {
    pub fn new(
        meta: FunctionMeta,
        source: Arc<dyn ResourceSource>,
        platform: Arc<dyn ExternalIpResolver>,
        config: EndpointConfig,
    ) -> Self {
        Self {
            meta,
            snapshot: StatusSnapshot::default(),
            config,
            source,
            platform,
        }
    }

    pub fn meta(&self) -> &FunctionMeta {
        &self.meta
    }

    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }

    /// Load the deployment and ingress of this function and update the
    /// status snapshot from them.
    ///
    /// Both reads run concurrently. A failed deployment read is returned and
    /// leaves the snapshot untouched; a failed ingress read only means no
    /// ingress address is recorded.
    #[tracing::instrument(level = "debug", skip(self), fields(ns = %self.meta.namespace, name = %self.meta.name))]
    pub async fn initialize(&mut self) -> Result<(), FunctionError> {
        let ns = self.meta.namespace.as_str();
        let name = self.meta.name.as_str();

        let (deployment, ingress) = tokio::join!(
            self.source.get_deployment(ns, name),
            self.source.get_ingress(ns, name),
        );

        let deployment = deployment.map_err(FunctionError::DeploymentFetch)?;

        let mut snapshot = self.snapshot.clone();
        snapshot.available_replicas = deployment.available_replicas;
        if let Some(replicas) = deployment.replicas {
            snapshot.configured_replicas = replicas;
        }

        let ingress_failed = ingress.is_err();
        if let Err(e) = &ingress {
            debug!(error = %e, "ingress fetch failed, ignoring");
        }
        if self.config.ingress_guard.allows(ingress_failed) {
            let first_ip = ingress
                .ok()
                .flatten()
                .and_then(|i| i.load_balancer_ips.into_iter().next());
            if let Some(ip) = first_ip {
                snapshot.ingress_address = ip;
            }
        }

        debug!(
            available = snapshot.available_replicas,
            configured = snapshot.configured_replicas,
            ingress = %snapshot.ingress_address,
            "function status loaded"
        );
        self.snapshot = snapshot;
        Ok(())
    }

    /// Returns `(available, configured)` replicas from the last snapshot.
    pub fn replicas(&self) -> (i32, i32) {
        (
            self.snapshot.available_replicas,
            self.snapshot.configured_replicas,
        )
    }
}
