//! Kubernetes operations

pub mod client;
pub mod pods;
