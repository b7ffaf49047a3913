//! Empirical background p-values from random gene sets
//!
//! The background estimate answers the question: "Which p-value would I
//! expect if my query set were just a random selection of genes?". It is
//! calculated by repeatedly drawing random gene sets of the same size as the
//! query set from the universe and averaging their enrichment p-values.
//!
//! The random source is supplied by the caller, so results are reproducible
//! when a seeded generator is used:
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use setenrich::{background_pvalue, Universe};
//! use setenrich::set::gene_set;
//!
//! let universe: Universe = (0..100).map(|i| format!("G{i}")).collect();
//! let reference = gene_set((0..20).map(|i| format!("G{i}")));
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let first = background_pvalue(10, &universe, &reference, 100, &mut rng).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let second = background_pvalue(10, &universe, &reference, 100, &mut rng).unwrap();
//!
//! assert_eq!(first.to_bits(), second.to_bits());
//! ```

use rand::seq::index;
use rand::Rng;
use tracing::debug;

use crate::set::GeneSet;
use crate::stats::EnrichmentParams;
use crate::{EnrichmentError, EnrichmentResult, Universe};

/// Estimates the expected p-value of a random query set with `sample_size` genes
///
/// Draws `repeats` random sets of `sample_size` distinct genes from the
/// `universe`, calculates the enrichment p-value of each for the `reference`
/// set and returns the mean.
///
/// All genes of `reference` must be part of the `universe`. This is not
/// checked, genes outside of the universe will never be counted as overlap.
/// Only the size is checked: a `reference` with more genes than the
/// `universe` is rejected with [`EnrichmentError::InvalidParameter`], even
/// if `sample_size` is valid.
///
/// # Errors
///
/// - [`EnrichmentError::InvalidParameter`] if `sample_size` is larger than the universe
/// - [`EnrichmentError::InvalidParameter`] if `repeats` is `0`
/// - [`EnrichmentError::InvalidParameter`] if `reference` is larger than the universe
pub fn background_pvalue<R: Rng + ?Sized>(
    sample_size: usize,
    universe: &Universe,
    reference: &GeneSet,
    repeats: u32,
    rng: &mut R,
) -> EnrichmentResult<f64> {
    if sample_size > universe.len() {
        return Err(EnrichmentError::InvalidParameter(format!(
            "cannot draw {sample_size} genes from a universe of {} genes",
            universe.len()
        )));
    }
    if repeats == 0 {
        return Err(EnrichmentError::InvalidParameter(
            "at least one repeat is required".to_string(),
        ));
    }

    let population = u64::try_from(universe.len())?;
    let successes = u64::try_from(reference.len())?;
    let draws = u64::try_from(sample_size)?;

    let mut total = 0.0;
    for _ in 0..repeats {
        let overlap = index::sample(rng, universe.len(), sample_size)
            .into_iter()
            .filter_map(|idx| universe.get(idx))
            .filter(|gene| reference.contains(*gene))
            .count();
        total +=
            EnrichmentParams::new(u64::try_from(overlap)?, draws, successes, population)?
                .tail_probability();
    }

    let pvalue = total / f64::from(repeats);
    debug!(
        "Population: {}, Successes: {}, Draws: {}, Repeats: {}, background p-value: {}",
        population, successes, draws, repeats, pvalue
    );
    Ok(pvalue)
}
