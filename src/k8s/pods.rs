//! Pod snapshots and the kube-backed pod store

use anyhow::{Context, Result};
use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt as _;
use kube::api::{Api, DeleteParams, ListParams};
use std::fmt;

use crate::workflow::PodStore;

/// Namespace all pod operations are scoped to.
pub const NAMESPACE: &str = "default";

/// Lifecycle phase reported by the cluster for a pod.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

impl PodPhase {
    /// Parse a server-reported phase string. A missing status or an
    /// unrecognized phase maps to `Unknown`.
    pub fn parse(phase: Option<&str>) -> Self {
        match phase {
            Some("Pending") => Self::Pending,
            Some("Running") => Self::Running,
            Some("Succeeded") => Self::Succeeded,
            Some("Failed") => Self::Failed,
            _ => Self::Unknown,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PodPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only snapshot of a pod: its name and current phase. Snapshots are
/// taken from API responses, printed, and discarded; nothing mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PodSummary {
    pub name: String,
    pub phase: PodPhase,
}

impl PodSummary {
    pub fn from_pod(pod: &Pod) -> Self {
        let phase = pod.status.as_ref().and_then(|status| status.phase.as_deref());
        Self {
            name: pod.name_any(),
            phase: PodPhase::parse(phase),
        }
    }
}

/// Pod store backed by the cluster API, scoped to [`NAMESPACE`].
pub struct ClusterPods {
    api: Api<Pod>,
}

impl ClusterPods {
    pub fn new(client: kube::Client) -> Self {
        Self {
            api: Api::namespaced(client, NAMESPACE),
        }
    }
}

impl PodStore for ClusterPods {
    async fn list_pods(&self) -> Result<Vec<PodSummary>> {
        let list = self
            .api
            .list(&ListParams::default())
            .await
            .with_context(|| format!("listing pods in namespace {NAMESPACE}"))?;
        Ok(list.items.iter().map(PodSummary::from_pod).collect())
    }

    async fn get_pod(&self, name: &str) -> Result<PodSummary> {
        let pod = self
            .api
            .get(name)
            .await
            .with_context(|| format!("fetching pod {name}"))?;
        Ok(PodSummary::from_pod(&pod))
    }

    async fn delete_pod(&self, name: &str) -> Result<()> {
        self.api
            .delete(name, &DeleteParams::default())
            .await
            .with_context(|| format!("deleting pod {name}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::PodStatus;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

    fn pod(name: &str, phase: Option<&str>) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..ObjectMeta::default()
            },
            status: phase.map(|phase| PodStatus {
                phase: Some(phase.to_string()),
                ..PodStatus::default()
            }),
            ..Pod::default()
        }
    }

    #[test]
    fn test_phase_parse_known_values() {
        assert_eq!(PodPhase::parse(Some("Pending")), PodPhase::Pending);
        assert_eq!(PodPhase::parse(Some("Running")), PodPhase::Running);
        assert_eq!(PodPhase::parse(Some("Succeeded")), PodPhase::Succeeded);
        assert_eq!(PodPhase::parse(Some("Failed")), PodPhase::Failed);
    }

    #[test]
    fn test_phase_parse_unknown_values() {
        assert_eq!(PodPhase::parse(Some("Evicted")), PodPhase::Unknown);
        assert_eq!(PodPhase::parse(Some("")), PodPhase::Unknown);
        assert_eq!(PodPhase::parse(None), PodPhase::Unknown);
    }

    #[test]
    fn test_phase_display_matches_cluster_spelling() {
        assert_eq!(PodPhase::Running.to_string(), "Running");
        assert_eq!(PodPhase::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_summary_from_pod() {
        let summary = PodSummary::from_pod(&pod("web-0", Some("Running")));
        assert_eq!(summary.name, "web-0");
        assert_eq!(summary.phase, PodPhase::Running);
    }

    #[test]
    fn test_summary_from_pod_without_status() {
        let summary = PodSummary::from_pod(&pod("web-1", None));
        assert_eq!(summary.name, "web-1");
        assert_eq!(summary.phase, PodPhase::Unknown);
    }
}
