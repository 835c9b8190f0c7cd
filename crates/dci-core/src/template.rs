//! Architecture templates: services plus weighted caller -> callee edges.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Opaque service identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Service(pub String);

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Service {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Service {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A weighted call edge.
///
/// `weight` is a relative frequency; the sampling probability is the weight
/// divided by the sum of all weights in the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPattern {
    pub caller: Service,
    pub callee: Service,
    pub weight: u32,
}

impl CallPattern {
    pub fn new(caller: impl Into<Service>, callee: impl Into<Service>, weight: u32) -> Self {
        Self {
            caller: caller.into(),
            callee: callee.into(),
            weight,
        }
    }
}

/// A named topology used to synthesize traces.
///
/// Construction through [`ArchitectureTemplate::new`] guarantees unique
/// service names, positive weights, and that every edge endpoint is a
/// declared service. Service order is report order only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchitectureTemplate {
    name: String,
    services: Vec<Service>,
    call_patterns: Vec<CallPattern>,
}

impl ArchitectureTemplate {
    pub fn new(
        name: impl Into<String>,
        services: Vec<Service>,
        call_patterns: Vec<CallPattern>,
    ) -> Result<Self> {
        let name = name.into();

        let mut seen = HashSet::with_capacity(services.len());
        for service in &services {
            if !seen.insert(service) {
                return Err(Error::InvalidTemplate(format!(
                    "template '{}' declares service '{}' more than once",
                    name, service
                )));
            }
        }

        for pattern in &call_patterns {
            if pattern.weight == 0 {
                return Err(Error::InvalidTemplate(format!(
                    "template '{}': edge {} -> {} has zero weight",
                    name, pattern.caller, pattern.callee
                )));
            }
            for endpoint in [&pattern.caller, &pattern.callee] {
                if !seen.contains(endpoint) {
                    return Err(Error::InvalidTemplate(format!(
                        "template '{}': edge {} -> {} references undeclared service '{}'",
                        name, pattern.caller, pattern.callee, endpoint
                    )));
                }
            }
        }

        Ok(Self {
            name,
            services,
            call_patterns,
        })
    }

    /// Convenience constructor from string literals, as used by the built-in catalog.
    pub fn from_parts(name: &str, services: &[&str], calls: &[(&str, &str, u32)]) -> Result<Self> {
        Self::new(
            name,
            services.iter().copied().map(Service::from).collect(),
            calls
                .iter()
                .map(|&(caller, callee, weight)| CallPattern::new(caller, callee, weight))
                .collect(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn call_patterns(&self) -> &[CallPattern] {
        &self.call_patterns
    }

    /// Sum of all edge weights.
    pub fn total_weight(&self) -> u64 {
        self.call_patterns.iter().map(|p| u64::from(p.weight)).sum()
    }

    pub fn contains(&self, service: &Service) -> bool {
        self.services.contains(service)
    }
}
