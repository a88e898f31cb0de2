use k8s_openapi::api::core::v1::{Namespace, Pod};
use kube::api::{Api, DeleteParams, ListParams};
use kube::{Client, ResourceExt};
use log::debug;

/// The slice of the Kubernetes API the reaper needs.
pub trait Cluster {
    async fn list_namespaces(&self) -> Result<Vec<String>, kube::Error>;

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, kube::Error>;

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), kube::Error>;
}

/// [`Cluster`] backed by a live API server.
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        KubeCluster { client }
    }

    fn pods(&self, namespace: &str) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

impl Cluster for KubeCluster {
    async fn list_namespaces(&self) -> Result<Vec<String>, kube::Error> {
        let namespaces: Api<Namespace> = Api::all(self.client.clone());
        let names: Vec<String> = namespaces
            .list(&ListParams::default())
            .await?
            .into_iter()
            .map(|namespace| namespace.name_any())
            .collect();
        debug!("Got {} namespaces from the Kubernetes API server.", names.len());
        Ok(names)
    }

    async fn list_pods(&self, namespace: &str) -> Result<Vec<Pod>, kube::Error> {
        let pods = self.pods(namespace).list(&ListParams::default()).await?;
        debug!(
            "Got {} pod{} from the namespace {namespace}",
            pods.items.len(),
            if pods.items.len() == 1 { "" } else { "s" },
        );
        Ok(pods.items)
    }

    async fn delete_pod(&self, namespace: &str, name: &str) -> Result<(), kube::Error> {
        self.pods(namespace)
            .delete(name, &DeleteParams::default())
            .await?
            .map_left(|_| debug!("Pod {name} in namespace {namespace} is being deleted."))
            .map_right(|_| debug!("Pod {name} in namespace {namespace} is gone."));
        Ok(())
    }
}

/// `status.reason` of a pod, empty when the server did not set one.
pub fn status_reason(pod: &Pod) -> &str {
    pod.status
        .as_ref()
        .and_then(|status| status.reason.as_deref())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use k8s_openapi::api::core::v1::PodStatus;

    use super::*;

    #[test]
    fn reason_of_pod_without_status_is_empty() {
        assert_eq!(status_reason(&Pod::default()), "");
    }

    #[test]
    fn reason_of_pod_without_reason_is_empty() {
        let pod = Pod {
            status: Some(PodStatus {
                phase: Some("Running".to_string()),
                ..PodStatus::default()
            }),
            ..Pod::default()
        };
        assert_eq!(status_reason(&pod), "");
    }

    #[test]
    fn reason_is_read_from_status() {
        let pod = Pod {
            status: Some(PodStatus {
                reason: Some("Evicted".to_string()),
                ..PodStatus::default()
            }),
            ..Pod::default()
        };
        assert_eq!(status_reason(&pod), "Evicted");
    }
}
