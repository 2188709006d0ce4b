#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use k8s_openapi::api::core::v1::{ConfigMap, Pod};
    use kube::api::{Api, DeleteParams, ListParams, PostParams};

    use crate::FakeClusterBuilder;

    fn pod(namespace: &str, name: &str) -> Pod {
        let mut pod = Pod::default();
        pod.metadata.name = Some(name.to_string());
        pod.metadata.namespace = Some(namespace.to_string());
        pod
    }

    fn labeled_pod(namespace: &str, name: &str, labels: &[(&str, &str)]) -> Pod {
        let mut pod = pod(namespace, name);
        pod.metadata.labels = Some(
            labels
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
        );
        pod
    }

    #[tokio::test]
    async fn test_get_pod() {
        let client = FakeClusterBuilder::new()
            .with_pod(pod("default", "web-0"))
            .build()
            .unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let fetched = pods.get("web-0").await.unwrap();
        assert_eq!(fetched.metadata.name.as_deref(), Some("web-0"));
        assert!(fetched.metadata.uid.is_some());
    }

    #[tokio::test]
    async fn test_get_missing_pod_is_404() {
        let client = FakeClusterBuilder::new().build().unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let err = pods.get("ghost").await.unwrap_err();
        match err {
            kube::Error::Api(resp) => {
                assert_eq!(resp.code, 404);
                assert_eq!(resp.reason, "NotFound");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_pods_namespace_scoped() {
        let client = FakeClusterBuilder::new()
            .with_pods(vec![
                pod("default", "web-0"),
                pod("default", "web-1"),
                pod("kube-system", "dns-0"),
            ])
            .build()
            .unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let list = pods.list(&ListParams::default()).await.unwrap();

        let names: Vec<_> = list
            .items
            .iter()
            .map(|p| p.metadata.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["web-0", "web-1"]);
    }

    #[tokio::test]
    async fn test_list_with_label_selector() {
        let client = FakeClusterBuilder::new()
            .with_pods(vec![
                labeled_pod("default", "web-0", &[("app", "web")]),
                labeled_pod("default", "db-0", &[("app", "db")]),
                pod("default", "bare-0"),
            ])
            .build()
            .unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let list = pods
            .list(&ListParams::default().labels("app=web"))
            .await
            .unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].metadata.name.as_deref(), Some("web-0"));
    }

    #[tokio::test]
    async fn test_list_with_double_equals_label_selector() {
        let client = FakeClusterBuilder::new()
            .with_pods(vec![
                labeled_pod("default", "web-0", &[("app", "web")]),
                labeled_pod("default", "db-0", &[("app", "db")]),
            ])
            .build()
            .unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let list = pods
            .list(&ListParams::default().labels("app==web"))
            .await
            .unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].metadata.name.as_deref(), Some("web-0"));
    }

    #[tokio::test]
    async fn test_list_with_field_selector() {
        let client = FakeClusterBuilder::new()
            .with_pods(vec![pod("default", "web-0"), pod("default", "web-1")])
            .build()
            .unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let list = pods
            .list(&ListParams::default().fields("metadata.name=web-1"))
            .await
            .unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].metadata.name.as_deref(), Some("web-1"));
    }

    #[tokio::test]
    async fn test_list_with_double_equals_field_selector() {
        let client = FakeClusterBuilder::new()
            .with_pods(vec![pod("default", "web-0"), pod("default", "web-1")])
            .build()
            .unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let list = pods
            .list(&ListParams::default().fields("metadata.name==web-0"))
            .await
            .unwrap();

        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].metadata.name.as_deref(), Some("web-0"));
    }

    #[tokio::test]
    async fn test_list_with_limit() {
        let client = FakeClusterBuilder::new()
            .with_pods(vec![
                pod("default", "web-0"),
                pod("default", "web-1"),
                pod("default", "web-2"),
            ])
            .build()
            .unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let list = pods
            .list(&ListParams::default().limit(2))
            .await
            .unwrap();

        assert_eq!(list.items.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_pod_returns_deleted_object() {
        let client = FakeClusterBuilder::new()
            .with_pod(pod("default", "web-0"))
            .build()
            .unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let deleted = pods
            .delete("web-0", &DeleteParams::default())
            .await
            .unwrap();

        let deleted_pod = deleted.left().expect("expected the deleted pod back");
        assert_eq!(deleted_pod.metadata.name.as_deref(), Some("web-0"));

        let err = pods.get("web-0").await.unwrap_err();
        assert!(matches!(err, kube::Error::Api(resp) if resp.code == 404));
    }

    #[tokio::test]
    async fn test_unserved_resource_is_404() {
        let client = FakeClusterBuilder::new().build().unwrap();

        let maps: Api<ConfigMap> = Api::namespaced(client, "default");
        let err = maps.get("anything").await.unwrap_err();
        assert!(matches!(err, kube::Error::Api(resp) if resp.code == 404));
    }

    #[tokio::test]
    async fn test_create_is_not_allowed() {
        let client = FakeClusterBuilder::new().build().unwrap();

        let pods: Api<Pod> = Api::namespaced(client, "default");
        let err = pods
            .create(&PostParams::default(), &pod("default", "web-0"))
            .await
            .unwrap_err();
        assert!(matches!(err, kube::Error::Api(resp) if resp.code == 405));
    }
}
