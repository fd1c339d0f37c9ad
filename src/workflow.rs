//! The linear list, inspect, delete, re-list workflow

use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;

use crate::k8s::pods::PodSummary;

/// The four cluster operations the workflow consumes. Production uses the
/// kube-backed [`ClusterPods`](crate::k8s::pods::ClusterPods); tests
/// substitute a scripted fake.
#[allow(async_fn_in_trait)]
pub trait PodStore {
    async fn list_pods(&self) -> Result<Vec<PodSummary>>;
    async fn get_pod(&self, name: &str) -> Result<PodSummary>;
    async fn delete_pod(&self, name: &str) -> Result<()>;
}

/// Fixed pauses between workflow steps. These exist for human-observable
/// pacing only, never for correctness, so tests disable them.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    after_list: Duration,
    after_details: Duration,
}

impl Pacing {
    /// The standard pacing: 5 seconds after the initial listing, 2 seconds
    /// after the detail fetch.
    pub const fn standard() -> Self {
        Self {
            after_list: Duration::from_secs(5),
            after_details: Duration::from_secs(2),
        }
    }

    /// No pauses at all.
    pub const fn disabled() -> Self {
        Self {
            after_list: Duration::ZERO,
            after_details: Duration::ZERO,
        }
    }

    async fn pause(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }

    pub async fn after_list(&self) {
        Self::pause(self.after_list).await;
    }

    pub async fn after_details(&self) {
        Self::pause(self.after_details).await;
    }
}

/// Runs the workflow: list pods, fetch the first pod's details, delete it,
/// re-list. Strictly sequential, with the transcript written to `out`.
pub struct Workflow<S> {
    store: S,
    pacing: Pacing,
}

impl<S: PodStore> Workflow<S> {
    pub fn new(store: S, pacing: Pacing) -> Self {
        Self { store, pacing }
    }

    /// Execute the whole sequence.
    ///
    /// A failing list (initial or final) aborts with an error. Failures
    /// while fetching details or deleting are written to the transcript and
    /// the workflow moves on to its next step. When the initial list is
    /// empty the detail and delete steps are skipped entirely, though both
    /// pauses still elapse.
    pub async fn run(&self, out: &mut impl Write) -> Result<()> {
        tracing::debug!("starting pod workflow");

        let pods = self.list_and_print(out).await?;

        self.pacing.after_list().await;

        if let Some(first) = pods.first() {
            self.fetch_details(out, &first.name).await?;
        }

        self.pacing.after_details().await;

        if let Some(first) = pods.first() {
            self.delete_first(out, &first.name).await?;
        }

        self.list_and_print(out).await?;
        Ok(())
    }

    /// List pods and print one line per pod in server-returned order.
    async fn list_and_print(&self, out: &mut impl Write) -> Result<Vec<PodSummary>> {
        writeln!(out, "Fetching pods...")?;
        let pods = self
            .store
            .list_pods()
            .await
            .context("failed to list pods")?;

        writeln!(out, "Pods:")?;
        for pod in &pods {
            writeln!(out, "{}", format_pod_line(pod))?;
        }

        Ok(pods)
    }

    async fn fetch_details(&self, out: &mut impl Write, name: &str) -> Result<()> {
        writeln!(out, "Fetching pod details...")?;
        match self.store.get_pod(name).await {
            Ok(pod) => {
                writeln!(out, "Pod details:\nName: {}\nStatus: {}", pod.name, pod.phase)?;
            }
            Err(err) => {
                writeln!(out, "Error fetching pod details: {err:#}")?;
            }
        }
        Ok(())
    }

    async fn delete_first(&self, out: &mut impl Write, name: &str) -> Result<()> {
        writeln!(out, "Deleting pod...")?;
        match self.store.delete_pod(name).await {
            Ok(()) => {
                writeln!(out, "Pod {name} deleted successfully.")?;
            }
            Err(err) => {
                writeln!(out, "Error deleting pod: {err:#}")?;
            }
        }
        Ok(())
    }
}

/// One transcript line per pod.
fn format_pod_line(pod: &PodSummary) -> String {
    format!("Name: {}, Status: {}", pod.name, pod.phase)
}
