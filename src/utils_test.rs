#[cfg(test)]
mod tests {
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use serde_json::json;

    use crate::error::FakeError;
    use crate::utils::{ensure_metadata, extract_metadata};

    #[test]
    fn test_ensure_metadata_fills_defaults() {
        let mut meta = ObjectMeta {
            name: Some("web-0".to_string()),
            ..Default::default()
        };

        ensure_metadata(&mut meta, "default");

        assert_eq!(meta.namespace.as_deref(), Some("default"));
        assert!(meta.uid.is_some());
        assert!(meta.creation_timestamp.is_some());
        assert_eq!(meta.resource_version.as_deref(), Some("1"));
    }

    #[test]
    fn test_ensure_metadata_keeps_existing_values() {
        let mut meta = ObjectMeta {
            name: Some("web-0".to_string()),
            namespace: Some("prod".to_string()),
            uid: Some("fixed-uid".to_string()),
            resource_version: Some("42".to_string()),
            ..Default::default()
        };

        ensure_metadata(&mut meta, "default");

        assert_eq!(meta.namespace.as_deref(), Some("prod"));
        assert_eq!(meta.uid.as_deref(), Some("fixed-uid"));
        assert_eq!(meta.resource_version.as_deref(), Some("42"));
    }

    #[test]
    fn test_ensure_metadata_replaces_empty_resource_version() {
        let mut meta = ObjectMeta {
            resource_version: Some(String::new()),
            ..Default::default()
        };

        ensure_metadata(&mut meta, "default");
        assert_eq!(meta.resource_version.as_deref(), Some("1"));
    }

    #[test]
    fn test_extract_metadata() {
        let value = json!({
            "metadata": {
                "name": "web-0",
                "namespace": "default"
            }
        });

        let meta = extract_metadata(&value).unwrap();
        assert_eq!(meta.name.as_deref(), Some("web-0"));
    }

    #[test]
    fn test_extract_metadata_missing() {
        let err = extract_metadata(&json!({})).unwrap_err();
        assert!(matches!(err, FakeError::InvalidRequest(_)));
    }
}
