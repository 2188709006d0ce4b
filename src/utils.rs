use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ObjectMeta, Time};
use serde_json::Value;

use crate::error::FakeError;

/// Fill in the metadata a real API server would set on admission.
pub fn ensure_metadata(meta: &mut ObjectMeta, namespace: &str) {
    if meta.namespace.is_none() {
        meta.namespace = Some(namespace.to_string());
    }
    if meta.creation_timestamp.is_none() {
        meta.creation_timestamp = Some(Time(chrono::Utc::now()));
    }
    if meta.uid.is_none() {
        meta.uid = Some(uuid::Uuid::new_v4().to_string());
    }
    if meta
        .resource_version
        .as_deref()
        .is_none_or(|rv| rv.is_empty())
    {
        meta.resource_version = Some("1".to_string());
    }
}

pub fn extract_metadata(value: &Value) -> Result<ObjectMeta, FakeError> {
    match value.get("metadata") {
        Some(meta) => Ok(serde_json::from_value(meta.clone())?),
        None => Err(FakeError::InvalidRequest(
            "object has no metadata".to_string(),
        )),
    }
}
