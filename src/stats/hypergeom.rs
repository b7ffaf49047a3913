//! Calculate the probability of an overlap between two gene sets
//! within the hypergeometric distribution.
//!
//! The hypergeometric distribution models drawing `N` genes without
//! replacement from a universe of `M` genes, `n` of which belong to a
//! reference set. The enrichment p-value is the probability to draw `k`
//! or more genes of the reference set by chance.
//!
//! # Examples
//!
//! ```
//! use setenrich::{enrichment_pvalue, Universe};
//! use setenrich::set::gene_set;
//!
//! let universe: Universe = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]
//!     .into_iter()
//!     .collect();
//! let pathway = gene_set(["A", "B", "C", "D"]);
//! let degs = gene_set(["A", "B", "E", "F"]);
//!
//! let pvalue = enrichment_pvalue(&pathway, &degs, &universe, true).unwrap();
//! assert!((pvalue - 115.0 / 210.0).abs() < 1e-9);
//! ```

use tracing::{debug, warn};

use crate::set::GeneSet;
use crate::stats::EnrichmentParams;
use crate::{EnrichmentError, EnrichmentResult, Universe};

/// Returns `P(X >= overlap)` for `X ~ Hypergeometric(population, successes, draws)`
///
/// - `overlap` (`k`): number of genes shared by reference and query set
/// - `draws` (`N`): size of the query set
/// - `successes` (`n`): size of the reference set
/// - `population` (`M`): size of the universe
///
/// An `overlap` of `0` always returns `1.0`.
///
/// # Errors
///
/// [`EnrichmentError::InvalidParameter`] if the parameters do not describe
/// a valid hypergeometric distribution (see [`EnrichmentParams::new`])
///
/// # Examples
///
/// ```
/// use setenrich::tail_probability_one;
///
/// let p = tail_probability_one(2, 4, 4, 10).unwrap();
/// assert!((p - 0.547_619_047_619).abs() < 1e-9);
///
/// assert_eq!(tail_probability_one(0, 4, 4, 10).unwrap(), 1.0);
/// assert!(tail_probability_one(5, 4, 4, 10).is_err());
/// ```
pub fn tail_probability_one(
    overlap: u64,
    draws: u64,
    successes: u64,
    population: u64,
) -> EnrichmentResult<f64> {
    Ok(EnrichmentParams::new(overlap, draws, successes, population)?.tail_probability())
}

/// Returns `P(X >= overlap)` for each pair of `overlaps` and `draws`
///
/// All pairs share the same `successes` and `population`. The result
/// contains one probability per pair, in the same order.
///
/// # Errors
///
/// - [`EnrichmentError::InvalidParameter`] if `overlaps` and `draws` differ in length
/// - [`EnrichmentError::InvalidParameter`] if any pair is invalid, see [`tail_probability_one`]
///
/// # Examples
///
/// ```
/// use setenrich::tail_probability_many;
///
/// let p = tail_probability_many(&[0, 2, 4], &[4, 4, 4], 4, 10).unwrap();
/// assert_eq!(p.len(), 3);
/// assert_eq!(p[0], 1.0);
/// assert!(p[1] > p[2]);
/// ```
pub fn tail_probability_many(
    overlaps: &[u64],
    draws: &[u64],
    successes: u64,
    population: u64,
) -> EnrichmentResult<Vec<f64>> {
    if overlaps.len() != draws.len() {
        return Err(EnrichmentError::InvalidParameter(format!(
            "{} overlaps were given for {} draws",
            overlaps.len(),
            draws.len()
        )));
    }
    overlaps
        .iter()
        .zip(draws)
        .map(|(overlap, draw)| tail_probability_one(*overlap, *draw, successes, population))
        .collect()
}

/// Calculates the enrichment p-value of `query` for the `reference` set
///
/// If `filter_to_universe` is `true`, genes that are not part of the
/// `universe` are removed from both sets before counting. Otherwise
/// both sets must already be subsets of the `universe`.
///
/// Empty sets are allowed and result in a p-value of `1.0`. With
/// `filter_to_universe`, empty sets are logged as a warning.
///
/// # Errors
///
/// [`EnrichmentError::InvalidParameter`] if unfiltered sets are larger
/// than the universe
pub fn enrichment_pvalue(
    reference: &GeneSet,
    query: &GeneSet,
    universe: &Universe,
    filter_to_universe: bool,
) -> EnrichmentResult<f64> {
    let params = if filter_to_universe {
        let reference = universe.restrict(reference);
        let query = universe.restrict(query);
        EnrichmentParams::from_sets(&reference, &query, universe.len())?
    } else {
        EnrichmentParams::from_sets(reference, query, universe.len())?
    };

    if params.successes() == 0 || params.draws() == 0 {
        // callers passing pre-filtered sets report empty sets themselves
        if filter_to_universe {
            warn!(
                "Empty set after filtering. Reference: {}, Query: {}",
                params.successes(),
                params.draws()
            );
        } else {
            debug!(
                "Empty set. Reference: {}, Query: {}",
                params.successes(),
                params.draws()
            );
        }
    }

    let pvalue = params.tail_probability();
    debug!(
        "Population: {}, Successes: {}, Draws: {}, Observed: {}, p-value: {}",
        params.population(),
        params.successes(),
        params.draws(),
        params.overlap(),
        pvalue
    );
    Ok(pvalue)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::set::gene_set;
    use statrs::function::factorial::binomial;

    fn letters() -> Universe {
        ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]
            .into_iter()
            .collect()
    }

    fn numbers(range: std::ops::RangeInclusive<u32>) -> GeneSet {
        range.map(|i| i.to_string()).collect()
    }

    #[test]
    fn tail_probability_reference_values() {
        // Numbers calculated here https://statisticsbyjim.com/probability/hypergeometric-distribution/
        // more than 1 == 2 or more
        let p = tail_probability_one(2, 13, 25, 50).unwrap();
        assert!((p - 0.999_618_983_254_245_1).abs() < 1e-12);
        // more than 7 == 8 or more
        let p = tail_probability_one(8, 13, 25, 50).unwrap();
        assert!((p - 0.260_097_374_777_385_37).abs() < 1e-12);
        // more than 12 == 13 or more
        let p = tail_probability_one(13, 13, 25, 50).unwrap();
        assert!((p - 0.000_014_654_490_222_007_184).abs() < 1e-15);
    }

    #[test]
    fn zero_overlap() {
        for (draws, successes, population) in [(4, 4, 10), (0, 4, 10), (4, 0, 10), (0, 0, 0), (10, 10, 10)] {
            let p = tail_probability_one(0, draws, successes, population).unwrap();
            assert!((p - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn full_universe_is_certain() {
        // n == M: every draw is a success
        let p = tail_probability_one(4, 4, 10, 10).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn invalid_parameters() {
        assert!(matches!(
            tail_probability_one(3, 2, 4, 10),
            Err(EnrichmentError::InvalidParameter(_))
        ));
        assert!(tail_probability_one(1, 4, 11, 10).is_err());
        assert!(tail_probability_one(1, 11, 4, 10).is_err());
    }

    #[test]
    fn probabilities_are_bounded_and_monotone() {
        for (draws, successes, population) in [(13, 25, 50), (4, 4, 10), (30, 5, 200)] {
            let max = draws.min(successes);
            let mut previous = 1.0;
            for k in 0..=max {
                let p = tail_probability_one(k, draws, successes, population).unwrap();
                assert!((0.0..=1.0).contains(&p));
                assert!(p <= previous + 1e-12);
                previous = p;
            }
        }
    }

    #[test]
    fn many_matches_one() {
        let overlaps = [0, 1, 2, 3];
        let draws = [4, 5, 6, 7];
        let many = tail_probability_many(&overlaps, &draws, 8, 30).unwrap();
        assert_eq!(many.len(), 4);
        for ((k, n), p) in overlaps.iter().zip(draws.iter()).zip(many.iter()) {
            let one = tail_probability_one(*k, *n, 8, 30).unwrap();
            assert!((one - p).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn many_with_unequal_length() {
        assert!(tail_probability_many(&[0, 1], &[4], 8, 30).is_err());
        assert!(tail_probability_many(&[], &[], 8, 30).unwrap().is_empty());
    }

    #[test]
    fn many_fails_on_any_invalid_pair() {
        assert!(tail_probability_many(&[0, 5], &[4, 4], 4, 10).is_err());
    }

    #[test]
    fn letters_example() {
        let reference = gene_set(["A", "B", "C", "D"]);
        let query = gene_set(["A", "B", "E", "F"]);
        let p = enrichment_pvalue(&reference, &query, &letters(), true).unwrap();
        // 1 - (C(6,4) + 4 * C(6,3)) / C(10,4)
        assert!((p - 115.0 / 210.0).abs() < 1e-9);
    }

    #[test]
    fn perfect_self_match() {
        let universe: Universe = (1..=100).map(|i| i.to_string()).collect();
        let set = numbers(1..=10);
        let p = enrichment_pvalue(&set, &set, &universe, true).unwrap();
        let expected = 1.0 / binomial(100, 10);
        assert!(p < 1e-13);
        assert!((p - expected).abs() / expected < 1e-6);
    }

    #[test]
    fn filtering_is_idempotent() {
        let universe = letters();
        let reference = gene_set(["A", "B", "C", "X", "Y"]);
        let query = gene_set(["A", "C", "D", "Z"]);

        let filtered = enrichment_pvalue(&reference, &query, &universe, true).unwrap();
        let prefiltered = enrichment_pvalue(
            &universe.restrict(&reference),
            &universe.restrict(&query),
            &universe,
            false,
        )
        .unwrap();
        assert!((filtered - prefiltered).abs() < f64::EPSILON);
    }

    #[test]
    fn unfiltered_sets_must_fit_universe() {
        let universe: Universe = ["A", "B"].into_iter().collect();
        let reference = gene_set(["A", "B", "C"]);
        let query = gene_set(["A"]);
        assert!(enrichment_pvalue(&reference, &query, &universe, false).is_err());
        assert!(enrichment_pvalue(&reference, &query, &universe, true).is_ok());
    }

    #[test]
    fn empty_sets_are_certain() {
        let universe = letters();
        let reference = gene_set(["X", "Y"]);
        let query = gene_set(["A", "B"]);
        let p = enrichment_pvalue(&reference, &query, &universe, true).unwrap();
        assert!((p - 1.0).abs() < f64::EPSILON);

        let p = enrichment_pvalue(&GeneSet::new(), &GeneSet::new(), &universe, false).unwrap();
        assert!((p - 1.0).abs() < f64::EPSILON);
    }
}
