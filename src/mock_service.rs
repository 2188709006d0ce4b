//! Mock tower service that routes pod HTTP requests to the in-memory
//! tracker, so a real `kube::Client` can run against it.

use std::task::{Context, Poll};

use bytes::Bytes;
use futures::future::{BoxFuture, FutureExt};
use http::{Request, Response, StatusCode};
use http_body_util::Full;
use kube::api::ListParams;
use kube::client::Body as KubeBody;
use serde_json::Value;
use tower::Service;

use crate::error::FakeError;
use crate::interceptor;
use crate::tracker::PodTracker;

/// Parsed pod API path.
struct ParsedPath {
    namespace: String,
    name: Option<String>,
}

/// Serves the pods surface of the core/v1 API from a [`PodTracker`].
#[derive(Clone)]
pub struct MockService {
    tracker: PodTracker,
    interceptors: Option<interceptor::Funcs>,
}

type ServiceResult =
    std::result::Result<Response<Full<Bytes>>, Box<dyn std::error::Error + Send + Sync>>;

impl MockService {
    pub fn new(tracker: PodTracker, interceptors: Option<interceptor::Funcs>) -> Self {
        Self {
            tracker,
            interceptors,
        }
    }

    /// Parse pod list/item paths:
    /// - /api/v1/namespaces/{namespace}/pods
    /// - /api/v1/namespaces/{namespace}/pods/{name}
    fn parse_path(path: &str) -> Option<ParsedPath> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match parts.as_slice() {
            ["api", "v1", "namespaces", namespace, "pods"] => Some(ParsedPath {
                namespace: (*namespace).to_string(),
                name: None,
            }),
            ["api", "v1", "namespaces", namespace, "pods", name] => Some(ParsedPath {
                namespace: (*namespace).to_string(),
                name: Some((*name).to_string()),
            }),
            _ => None,
        }
    }

    /// Parse the query string into ListParams.
    fn parse_list_params(query: Option<&str>) -> ListParams {
        let mut params = ListParams::default();

        if let Some(query_str) = query {
            for pair in query_str.split('&') {
                if let Some((key, value)) = pair.split_once('=') {
                    let decoded =
                        urlencoding::decode(value).unwrap_or(std::borrow::Cow::Borrowed(value));

                    match key {
                        "labelSelector" => params.label_selector = Some(decoded.to_string()),
                        "fieldSelector" => params.field_selector = Some(decoded.to_string()),
                        "limit" => {
                            if let Ok(limit) = decoded.parse::<u32>() {
                                params.limit = Some(limit);
                            }
                        }
                        _ => {} // Ignore unknown parameters
                    }
                }
            }
        }

        params
    }

    fn is_watch_request(query: Option<&str>) -> bool {
        query.is_some_and(|q| {
            q.split('&')
                .any(|pair| pair == "watch=true" || pair == "watch=1")
        })
    }

    /// Split an equality requirement, accepting both `key=value` and
    /// `key==value` forms.
    fn split_equality(requirement: &str) -> Option<(&str, &str)> {
        requirement
            .split_once("==")
            .or_else(|| requirement.split_once('='))
    }

    /// Equality-based label selector matching (key=value terms).
    fn matches_label_selector(obj: &Value, selector: &str) -> bool {
        let labels = obj
            .get("metadata")
            .and_then(|m| m.get("labels"))
            .and_then(|l| l.as_object());

        let Some(labels) = labels else {
            return false;
        };

        selector.split(',').all(|requirement| {
            let requirement = requirement.trim();
            match Self::split_equality(requirement) {
                Some((key, value)) => {
                    labels.get(key).and_then(|v| v.as_str()) == Some(value.trim())
                }
                None => false,
            }
        })
    }

    /// Field selector matching on the fields the real server indexes for
    /// pods that this fake supports.
    fn matches_field_selector(obj: &Value, selector: &str) -> bool {
        selector.split(',').all(|requirement| {
            let requirement = requirement.trim();
            match Self::split_equality(requirement) {
                Some((field, value)) => {
                    let value = value.trim();
                    let actual = match field {
                        "metadata.name" => obj.pointer("/metadata/name"),
                        "metadata.namespace" => obj.pointer("/metadata/namespace"),
                        "status.phase" => obj.pointer("/status/phase"),
                        _ => None,
                    };
                    actual.and_then(|v| v.as_str()) == Some(value)
                }
                None => false,
            }
        })
    }

    async fn handle_request(&self, req: Request<KubeBody>) -> ServiceResult {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(|s| s.to_string());

        match method.as_str() {
            "GET" => self.handle_get(&path, query.as_deref()),
            "DELETE" => self.handle_delete(&path),
            _ => Self::error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
        }
    }

    fn handle_get(&self, path: &str, query: Option<&str>) -> ServiceResult {
        let Some(parsed) = Self::parse_path(path) else {
            return Self::error_response(StatusCode::NOT_FOUND, "the requested resource is not served");
        };

        if let Some(name) = parsed.name {
            let pod = match self.tracker.get(&parsed.namespace, &name) {
                Ok(pod) => pod,
                Err(e) => return Self::fake_error_response(e),
            };
            return Self::success_response(pod);
        }

        // A watch subscription: respond with an empty event stream so the
        // connection closes cleanly and the watcher relists on next poll.
        if Self::is_watch_request(query) {
            return Ok(Response::builder()
                .status(StatusCode::OK)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::new()))
                .unwrap());
        }

        let params = Self::parse_list_params(query);

        let items = if let Some(list_interceptor) =
            self.interceptors.as_ref().and_then(|i| i.list.as_ref())
        {
            let ctx = interceptor::ListContext {
                namespace: &parsed.namespace,
                params: &params,
            };
            match list_interceptor(ctx) {
                Ok(Some(items)) => items,
                Ok(None) => self.tracker.list(&parsed.namespace),
                Err(e) => return Self::fake_error_response(e),
            }
        } else {
            self.tracker.list(&parsed.namespace)
        };

        let mut items = items;
        if let Some(label_selector) = &params.label_selector {
            items.retain(|obj| Self::matches_label_selector(obj, label_selector));
        }
        if let Some(field_selector) = &params.field_selector {
            items.retain(|obj| Self::matches_field_selector(obj, field_selector));
        }
        if let Some(limit) = params.limit {
            items.truncate(limit as usize);
        }

        let list = serde_json::json!({
            "kind": "PodList",
            "apiVersion": "v1",
            "metadata": {
                "resourceVersion": "1"
            },
            "items": items
        });

        Self::success_response(list)
    }

    fn handle_delete(&self, path: &str) -> ServiceResult {
        let Some(parsed) = Self::parse_path(path) else {
            return Self::error_response(StatusCode::NOT_FOUND, "the requested resource is not served");
        };
        let Some(name) = parsed.name else {
            return Self::error_response(StatusCode::METHOD_NOT_ALLOWED, "collection deletes are not supported");
        };

        let deleted = if let Some(delete_interceptor) =
            self.interceptors.as_ref().and_then(|i| i.delete.as_ref())
        {
            let ctx = interceptor::DeleteContext {
                namespace: &parsed.namespace,
                name: &name,
            };
            match delete_interceptor(ctx) {
                Ok(Some(value)) => value,
                Ok(None) => match self.tracker.delete(&parsed.namespace, &name) {
                    Ok(value) => value,
                    Err(e) => return Self::fake_error_response(e),
                },
                Err(e) => return Self::fake_error_response(e),
            }
        } else {
            match self.tracker.delete(&parsed.namespace, &name) {
                Ok(value) => value,
                Err(e) => return Self::fake_error_response(e),
            }
        };

        Self::success_response(deleted)
    }

    /// Render a FakeError as the Status body a real API server returns.
    fn fake_error_response(err: FakeError) -> ServiceResult {
        let (code, reason) = err.status();
        let status_code =
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "kind": "Status",
            "apiVersion": "v1",
            "status": "Failure",
            "message": err.to_string(),
            "reason": reason,
            "code": code
        });

        Ok(Response::builder()
            .status(status_code)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap())
    }

    fn error_response(status: StatusCode, message: &str) -> ServiceResult {
        let body = serde_json::json!({
            "kind": "Status",
            "apiVersion": "v1",
            "status": "Failure",
            "message": message,
            "code": status.as_u16()
        });

        Ok(Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap())
    }

    fn success_response(data: Value) -> ServiceResult {
        Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from(data.to_string())))
            .unwrap())
    }
}

impl Service<Request<KubeBody>> for MockService {
    type Response = Response<Full<Bytes>>;
    type Error = Box<dyn std::error::Error + Send + Sync>;
    type Future = BoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<KubeBody>) -> Self::Future {
        let this = self.clone();
        async move { this.handle_request(req).await }.boxed()
    }
}
