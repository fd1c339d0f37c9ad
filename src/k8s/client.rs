//! Cluster client construction from a kubeconfig file

use kube::config::{KubeConfigOptions, Kubeconfig, KubeconfigError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while locating a kubeconfig or building the cluster client.
/// Every variant is fatal: without a working client there is nothing to do.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("kubeconfig not found: {}", path.display())]
    KubeconfigMissing { path: PathBuf },

    #[error("could not determine home directory for the default kubeconfig")]
    HomeDirUnavailable,

    #[error("failed to load kubeconfig {}", path.display())]
    KubeconfigLoad {
        path: PathBuf,
        #[source]
        source: KubeconfigError,
    },

    #[error("failed to construct cluster client")]
    ClientBuild(#[source] kube::Error),
}

/// Resolve the kubeconfig path to use.
///
/// An explicit path (from the `--kubeconfig` flag or the `KUBECONFIG`
/// environment variable) wins; otherwise fall back to the per-user default
/// `$HOME/.kube/config`. The file must exist.
pub fn resolve_kubeconfig(explicit: Option<PathBuf>) -> Result<PathBuf, ClientError> {
    let path = match explicit {
        Some(path) => path,
        None => dirs::home_dir()
            .ok_or(ClientError::HomeDirUnavailable)?
            .join(".kube")
            .join("config"),
    };

    if !path.exists() {
        return Err(ClientError::KubeconfigMissing { path });
    }

    Ok(path)
}

/// Build a cluster client from the kubeconfig at `path`.
pub async fn build_client(path: &Path) -> Result<kube::Client, ClientError> {
    tracing::debug!("building cluster client from {}", path.display());

    let load_err = |source| ClientError::KubeconfigLoad {
        path: path.to_path_buf(),
        source,
    };

    let kubeconfig = Kubeconfig::read_from(path).map_err(load_err)?;
    let config = kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(load_err)?;

    kube::Client::try_from(config).map_err(ClientError::ClientBuild)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_explicit_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let resolved = resolve_kubeconfig(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(resolved, file.path());
    }

    #[test]
    fn test_resolve_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-config");

        let err = resolve_kubeconfig(Some(missing.clone())).unwrap_err();
        match err {
            ClientError::KubeconfigMissing { path } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_build_client_rejects_garbage_kubeconfig() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        use std::io::Write as _;
        writeln!(file, "this is not a kubeconfig").unwrap();

        let err = build_client(file.path())
            .await
            .err()
            .expect("expected building a client from garbage to fail");
        assert!(matches!(err, ClientError::KubeconfigLoad { .. }));
    }
}
