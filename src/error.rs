use kube::config::{InferConfigError, KubeconfigError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    #[error("failed to infer cluster configuration: {0}")]
    InferConfig(#[from] InferConfigError),

    #[error("failed to create Kubernetes client: {0}")]
    Client(#[source] kube::Error),

    #[error("failed to list namespaces: {0}")]
    ListNamespaces(#[source] kube::Error),

    #[error("failed to list pods in namespace {namespace}: {source}")]
    ListPods {
        namespace: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to delete pod {pod} in namespace {namespace}: {source}")]
    DeletePod {
        namespace: String,
        pod: String,
        #[source]
        source: kube::Error,
    },

    #[error("failed to write output: {0}")]
    WriteOutput(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
