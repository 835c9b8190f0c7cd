//! Registry of named architecture templates.

use dci_core::{ArchitectureTemplate, Error, Result};
use std::collections::HashSet;

/// Immutable lookup table of templates, in declaration order.
///
/// Built once and passed by reference; there is no global registry.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    templates: Vec<ArchitectureTemplate>,
}

impl PatternCatalog {
    /// Create a catalog from arbitrary templates, rejecting duplicate names.
    pub fn new(templates: Vec<ArchitectureTemplate>) -> Result<Self> {
        let mut names = HashSet::with_capacity(templates.len());
        for template in &templates {
            if !names.insert(template.name()) {
                return Err(Error::InvalidTemplate(format!(
                    "duplicate template name '{}'",
                    template.name()
                )));
            }
        }
        Ok(Self { templates })
    }

    /// The four built-in topologies: linear chain, e-commerce fan-out,
    /// hub-and-spoke mesh, and event bus.
    pub fn builtin() -> Result<Self> {
        Self::new(vec![
            ArchitectureTemplate::from_parts(
                "simple_chain",
                &["frontend", "api-gateway", "user-service", "database"],
                &[
                    ("frontend", "api-gateway", 10),
                    ("api-gateway", "user-service", 8),
                    ("user-service", "database", 6),
                ],
            )?,
            ArchitectureTemplate::from_parts(
                "ecommerce",
                &["web", "api", "user", "order", "payment", "inventory", "notification"],
                &[
                    ("web", "api", 15),
                    ("api", "user", 8),
                    ("api", "order", 6),
                    ("api", "payment", 4),
                    ("order", "inventory", 3),
                    ("order", "payment", 2),
                    ("payment", "notification", 1),
                ],
            )?,
            ArchitectureTemplate::from_parts(
                "microservice_mesh",
                &[
                    "gateway", "auth", "user", "product", "order", "payment", "shipping",
                    "analytics",
                ],
                &[
                    ("gateway", "auth", 12),
                    ("gateway", "user", 10),
                    ("gateway", "product", 8),
                    ("gateway", "order", 6),
                    ("user", "auth", 4),
                    ("order", "payment", 3),
                    ("order", "shipping", 2),
                    ("order", "analytics", 1),
                    ("payment", "analytics", 1),
                ],
            )?,
            ArchitectureTemplate::from_parts(
                "event_driven",
                &["producer", "event-bus", "consumer1", "consumer2", "consumer3", "database"],
                &[
                    ("producer", "event-bus", 20),
                    ("event-bus", "consumer1", 8),
                    ("event-bus", "consumer2", 6),
                    ("event-bus", "consumer3", 4),
                    ("consumer1", "database", 3),
                    ("consumer2", "database", 2),
                ],
            )?,
        ])
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Result<&ArchitectureTemplate> {
        self.templates
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| Error::UnknownPattern {
                name: name.to_string(),
                available: self.names().into_iter().map(str::to_string).collect(),
            })
    }

    /// Template names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchitectureTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_in_order() {
        let catalog = PatternCatalog::builtin().unwrap();
        assert_eq!(
            catalog.names(),
            vec!["simple_chain", "ecommerce", "microservice_mesh", "event_driven"]
        );
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = PatternCatalog::new(vec![]).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.names().is_empty());
        assert!(matches!(
            catalog.get("simple_chain"),
            Err(Error::UnknownPattern { ref available, .. }) if available.is_empty()
        ));
    }

    #[test]
    fn test_get_simple_chain() {
        let catalog = PatternCatalog::builtin().unwrap();
        let template = catalog.get("simple_chain").unwrap();
        assert_eq!(template.services().len(), 4);
        assert_eq!(template.call_patterns().len(), 3);
        assert_eq!(template.total_weight(), 24);
    }

    #[test]
    fn test_unknown_name_lists_valid_names() {
        let catalog = PatternCatalog::builtin().unwrap();
        match catalog.get("star") {
            Err(Error::UnknownPattern { name, available }) => {
                assert_eq!(name, "star");
                assert_eq!(available.len(), 4);
                assert!(available.contains(&"event_driven".to_string()));
            }
            other => panic!("expected UnknownPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_template_names_rejected() {
        let a = ArchitectureTemplate::from_parts("same", &["x"], &[]).unwrap();
        let b = ArchitectureTemplate::from_parts("same", &["y"], &[]).unwrap();
        assert!(matches!(
            PatternCatalog::new(vec![a, b]),
            Err(Error::InvalidTemplate(_))
        ));
    }
}
