//! Weighted trace synthesis.
//!
//! Each trace is drawn independently: a uniform value in `[0, total_weight)`
//! is mapped onto the cumulative weights of the template's call patterns in
//! declaration order (roulette-wheel selection).

use dci_core::{ArchitectureTemplate, CallPattern, Error, Result, TraceRecord};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

/// Cumulative-weight selector over one template's call patterns.
#[derive(Debug, Clone)]
pub struct PatternSampler<'a> {
    patterns: &'a [CallPattern],
    last: &'a CallPattern,
    total_weight: f64,
}

impl<'a> PatternSampler<'a> {
    /// Fails with `EmptyCallPatterns` when there is nothing to select from.
    pub fn new(template: &'a ArchitectureTemplate) -> Result<Self> {
        let patterns = template.call_patterns();
        let last = patterns
            .last()
            .ok_or_else(|| Error::EmptyCallPatterns(template.name().to_string()))?;

        Ok(Self {
            patterns,
            last,
            total_weight: template.total_weight() as f64,
        })
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Map a point `u` on `[0, total_weight]` to the first pattern whose
    /// cumulative weight reaches it. Points past the final boundary select
    /// the last pattern.
    pub fn select(&self, u: f64) -> &'a CallPattern {
        let mut cumulative = 0.0;
        for pattern in self.patterns {
            cumulative += f64::from(pattern.weight);
            if u <= cumulative {
                return pattern;
            }
        }
        self.last
    }

    /// Draw one pattern.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> &'a CallPattern {
        let u = rng.random_range(0.0..self.total_weight);
        self.select(u)
    }
}

/// Produces Zipkin-style call records from a template.
///
/// The random source is injected so that runs can be made reproducible.
pub struct TraceSynthesizer<R> {
    rng: R,
}

impl TraceSynthesizer<StdRng> {
    /// Synthesizer with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Synthesizer seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> TraceSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate exactly `count` records. Trace ids run from 1 to `count`.
    pub fn generate(
        &mut self,
        template: &ArchitectureTemplate,
        count: usize,
    ) -> Result<Vec<TraceRecord>> {
        let sampler = PatternSampler::new(template)?;
        debug!(
            template = template.name(),
            patterns = template.call_patterns().len(),
            total_weight = sampler.total_weight(),
            "sampling call patterns"
        );

        let mut traces = Vec::with_capacity(count);
        for index in 1..=count as u64 {
            let pattern = sampler.sample(&mut self.rng);
            traces.push(TraceRecord::new(index, &pattern.caller, &pattern.callee));
        }

        info!(template = template.name(), count, "generated traces");
        Ok(traces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatternCatalog;
    use dci_core::Service;
    use std::collections::HashMap;

    fn make_chain() -> ArchitectureTemplate {
        PatternCatalog::builtin()
            .unwrap()
            .get("simple_chain")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_select_cumulative_boundaries() {
        let template = make_chain();
        let sampler = PatternSampler::new(&template).unwrap();
        assert_eq!(sampler.total_weight(), 24.0);

        // weights 10, 8, 6 -> boundaries at 10, 18, 24
        assert_eq!(sampler.select(0.0).callee.as_str(), "api-gateway");
        assert_eq!(sampler.select(10.0).callee.as_str(), "api-gateway");
        assert_eq!(sampler.select(10.5).callee.as_str(), "user-service");
        assert_eq!(sampler.select(18.0).callee.as_str(), "user-service");
        assert_eq!(sampler.select(23.9).callee.as_str(), "database");
        assert_eq!(sampler.select(24.0).callee.as_str(), "database");
    }

    #[test]
    fn test_select_past_last_boundary_picks_last() {
        let template = make_chain();
        let sampler = PatternSampler::new(&template).unwrap();
        assert_eq!(sampler.select(24.000001).caller.as_str(), "user-service");
    }

    #[test]
    fn test_empty_patterns_is_config_error() {
        let template = ArchitectureTemplate::from_parts("lonely", &["a"], &[]).unwrap();
        let err = TraceSynthesizer::seeded(1).generate(&template, 5).unwrap_err();
        assert!(matches!(err, Error::EmptyCallPatterns(ref name) if name == "lonely"));
    }

    #[test]
    fn test_generate_exact_count_and_ids() {
        let catalog = PatternCatalog::builtin().unwrap();
        for template in catalog.iter() {
            let traces = TraceSynthesizer::seeded(7).generate(template, 250).unwrap();
            assert_eq!(traces.len(), 250);
            for (i, trace) in traces.iter().enumerate() {
                let expected_id = (i + 1).to_string();
                assert_eq!(trace.trace_id, expected_id);
                assert_eq!(trace.span_id, expected_id);
                assert!(template.contains(&Service::from(trace.caller())));
                assert!(template.contains(&Service::from(trace.callee())));
            }
        }
    }

    #[test]
    fn test_generate_zero_traces() {
        let template = make_chain();
        let traces = TraceSynthesizer::seeded(3).generate(&template, 0).unwrap();
        assert!(traces.is_empty());
    }

    #[test]
    fn test_same_seed_reproduces_traces() {
        let template = make_chain();
        let first = TraceSynthesizer::seeded(99).generate(&template, 50).unwrap();
        let second = TraceSynthesizer::seeded(99).generate(&template, 50).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_frequencies_converge_to_weights() {
        let catalog = PatternCatalog::builtin().unwrap();
        let template = catalog.get("ecommerce").unwrap();
        let draws = 100_000;
        let traces = TraceSynthesizer::seeded(2024).generate(template, draws).unwrap();

        let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
        for trace in &traces {
            *counts.entry((trace.caller(), trace.callee())).or_default() += 1;
        }

        let total = template.total_weight() as f64;
        for pattern in template.call_patterns() {
            let expected = f64::from(pattern.weight) / total;
            let observed = counts
                .get(&(pattern.caller.as_str(), pattern.callee.as_str()))
                .copied()
                .unwrap_or(0) as f64
                / draws as f64;
            assert!(
                (observed - expected).abs() < 0.02,
                "{} -> {}: observed {:.4}, expected {:.4}",
                pattern.caller,
                pattern.callee,
                observed,
                expected
            );
        }
    }
}
