//! Library crate for the podcycle CLI.

pub mod k8s;
pub mod workflow;

pub use workflow::{Pacing, PodStore, Workflow};
