//! Structural (expected) coupling of a template.
//!
//! Used as an oracle for the external DCI computation: a service's expected
//! score is the number of distinct services it calls divided by the number of
//! other services in the template. Weights play no part.

use dci_core::{ArchitectureTemplate, CouplingStatus, DciRow, Service};
use itertools::Itertools;

/// Expected coupling of one service.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedCoupling {
    pub service: Service,
    pub distinct_callees: usize,
    pub max_possible: usize,
    pub dci: f64,
    pub status: CouplingStatus,
}

impl ExpectedCoupling {
    pub fn to_row(&self) -> DciRow {
        DciRow::new(self.service.clone(), self.dci, self.status)
    }
}

/// Expected coupling for every service, in the template's service order.
///
/// A single-service template has no possible external coupling, so every
/// score is 0 there.
pub fn expected_dci(template: &ArchitectureTemplate) -> Vec<ExpectedCoupling> {
    let max_possible = template.services().len().saturating_sub(1);

    template
        .services()
        .iter()
        .map(|service| {
            let distinct_callees = template
                .call_patterns()
                .iter()
                .filter(|p| &p.caller == service)
                .map(|p| &p.callee)
                .unique()
                .count();

            let dci = if max_possible > 0 {
                distinct_callees as f64 / max_possible as f64
            } else {
                0.0
            };

            ExpectedCoupling {
                service: service.clone(),
                distinct_callees,
                max_possible,
                dci,
                status: CouplingStatus::from_score(dci),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternCatalog;

    fn find<'a>(expected: &'a [ExpectedCoupling], name: &str) -> &'a ExpectedCoupling {
        expected
            .iter()
            .find(|e| e.service.as_str() == name)
            .unwrap()
    }

    #[test]
    fn test_simple_chain_expected_dci() {
        let catalog = PatternCatalog::builtin().unwrap();
        let expected = expected_dci(catalog.get("simple_chain").unwrap());

        assert_eq!(expected.len(), 4);
        for name in ["frontend", "api-gateway", "user-service"] {
            let e = find(&expected, name);
            assert_eq!(e.distinct_callees, 1);
            assert_eq!(e.max_possible, 3);
            assert!((e.dci - 1.0 / 3.0).abs() < 1e-12);
            assert_eq!(e.status, CouplingStatus::Low);
        }
        let database = find(&expected, "database");
        assert_eq!(database.dci, 0.0);
        assert_eq!(database.status, CouplingStatus::No);
    }

    #[test]
    fn test_mesh_gateway_fan_out() {
        let catalog = PatternCatalog::builtin().unwrap();
        let expected = expected_dci(catalog.get("microservice_mesh").unwrap());
        let gateway = find(&expected, "gateway");
        assert_eq!(gateway.distinct_callees, 4);
        assert!((gateway.dci - 4.0 / 7.0).abs() < 1e-12);
        assert_eq!(gateway.status, CouplingStatus::Moderate);
    }

    #[test]
    fn test_invariant_to_order_and_duplicate_edges() {
        let services = ["a", "b", "c"];
        let base = ArchitectureTemplate::from_parts(
            "base",
            &services,
            &[("a", "b", 1), ("a", "c", 5), ("b", "c", 2)],
        )
        .unwrap();
        let shuffled = ArchitectureTemplate::from_parts(
            "shuffled",
            &services,
            &[("b", "c", 9), ("a", "c", 1), ("a", "b", 3), ("a", "b", 4), ("b", "c", 1)],
        )
        .unwrap();

        assert_eq!(expected_dci(&base), expected_dci(&shuffled));
        assert_eq!(find(&expected_dci(&base), "a").dci, 1.0);
    }

    #[test]
    fn test_single_service_scores_zero() {
        let template = ArchitectureTemplate::from_parts("solo", &["only"], &[]).unwrap();
        let expected = expected_dci(&template);
        assert_eq!(expected[0].max_possible, 0);
        assert_eq!(expected[0].dci, 0.0);
        assert_eq!(expected[0].status, CouplingStatus::No);
    }

    #[test]
    fn test_to_row_carries_status() {
        let catalog = PatternCatalog::builtin().unwrap();
        let rows: Vec<_> = expected_dci(catalog.get("event_driven").unwrap())
            .iter()
            .map(ExpectedCoupling::to_row)
            .collect();
        let bus = rows.iter().find(|r| r.service.as_str() == "event-bus").unwrap();
        assert!((bus.dci - 0.6).abs() < 1e-12);
        assert_eq!(bus.status, CouplingStatus::Moderate);
    }
}
