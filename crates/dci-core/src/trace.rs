//! Zipkin-style call records.

use crate::template::Service;
use serde::{Deserialize, Serialize};

/// One side of a span, serialized as `{"serviceName": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub service_name: String,
}

/// A single synthesized call between two services.
///
/// Serializes with the exact field names of the Zipkin v2 span format:
/// `traceId`, `id`, `localEndpoint.serviceName`, `remoteEndpoint.serviceName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceRecord {
    pub trace_id: String,
    #[serde(rename = "id")]
    pub span_id: String,
    pub local_endpoint: Endpoint,
    pub remote_endpoint: Endpoint,
}

impl TraceRecord {
    /// Build the record for the 1-based trace `index`; trace and span ids share the value.
    pub fn new(index: u64, caller: &Service, callee: &Service) -> Self {
        let id = index.to_string();
        Self {
            trace_id: id.clone(),
            span_id: id,
            local_endpoint: Endpoint {
                service_name: caller.to_string(),
            },
            remote_endpoint: Endpoint {
                service_name: callee.to_string(),
            },
        }
    }

    pub fn caller(&self) -> &str {
        &self.local_endpoint.service_name
    }

    pub fn callee(&self) -> &str {
        &self.remote_endpoint.service_name
    }
}
