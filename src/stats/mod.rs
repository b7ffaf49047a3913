//! Statistical analyses for the enrichment of gene sets
//!
//! This module contains methods to calculate how likely the overlap between
//! a reference set (e.g. the genes of a pathway) and a query set (e.g. the
//! differentially expressed genes of a cluster) occurs by chance.
//!
//! At the moment, only the hypergeometric enrichment analysis using the
//! survival function is provided, together with an empirical
//! [background estimate](`background::background_pvalue`) from random sampling.

use statrs::distribution::{DiscreteCDF, Hypergeometric};

use crate::set::{intersection_size, GeneSet};
use crate::{EnrichmentError, EnrichmentResult};

pub mod background;
pub mod hypergeom;

/// The parameters of a single hypergeometric enrichment test
///
/// | Parameter    | Meaning                          |
/// |:------------ |:-------------------------------- |
/// | `population` | size of the universe (`M`)       |
/// | `successes`  | size of the reference set (`n`)  |
/// | `draws`      | size of the query set (`N`)      |
/// | `overlap`    | size of the intersection (`k`)   |
///
/// The parameters are validated upon construction, so an `EnrichmentParams`
/// always describes a valid hypergeometric distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnrichmentParams {
    overlap: u64,
    distribution: Hypergeometric,
    population: u64,
    successes: u64,
    draws: u64,
}

impl EnrichmentParams {
    /// Constructs new `EnrichmentParams`
    ///
    /// The arguments follow the order of [`hypergeom::tail_probability_one`]:
    /// overlap (`k`), draws (`N`), successes (`n`), population (`M`).
    ///
    /// # Errors
    ///
    /// [`EnrichmentError::InvalidParameter`] if `successes > population`,
    /// `draws > population` or `overlap > min(successes, draws)`
    ///
    /// # Examples
    ///
    /// ```
    /// use setenrich::EnrichmentParams;
    ///
    /// let params = EnrichmentParams::new(2, 4, 4, 10).unwrap();
    /// assert_eq!(params.population(), 10);
    ///
    /// assert!(EnrichmentParams::new(5, 4, 4, 10).is_err());
    /// assert!(EnrichmentParams::new(0, 11, 4, 10).is_err());
    /// ```
    pub fn new(overlap: u64, draws: u64, successes: u64, population: u64) -> EnrichmentResult<Self> {
        let distribution = Hypergeometric::new(population, successes, draws).map_err(|_| {
            EnrichmentError::InvalidParameter(format!(
                "population {population} must not be smaller than successes {successes} or draws {draws}"
            ))
        })?;
        if overlap > successes.min(draws) {
            return Err(EnrichmentError::InvalidParameter(format!(
                "overlap {overlap} is larger than successes {successes} or draws {draws}"
            )));
        }
        Ok(Self {
            overlap,
            distribution,
            population,
            successes,
            draws,
        })
    }

    /// Derives the parameters from a reference and a query set
    ///
    /// Both sets are expected to be subsets of a universe of size `population`.
    ///
    /// # Errors
    ///
    /// [`EnrichmentError::InvalidParameter`] if one of the sets is larger
    /// than the universe
    pub fn from_sets(
        reference: &GeneSet,
        query: &GeneSet,
        population: usize,
    ) -> EnrichmentResult<Self> {
        Self::new(
            u64::try_from(intersection_size(reference, query))?,
            u64::try_from(query.len())?,
            u64::try_from(reference.len())?,
            u64::try_from(population)?,
        )
    }

    /// Number of genes in the universe (`M`)
    pub fn population(&self) -> u64 {
        self.population
    }

    /// Number of genes in the reference set (`n`)
    pub fn successes(&self) -> u64 {
        self.successes
    }

    /// Number of genes in the query set (`N`)
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Number of genes in both reference and query set (`k`)
    pub fn overlap(&self) -> u64 {
        self.overlap
    }

    /// Returns the probability to observe `overlap` or more shared genes by chance
    ///
    /// `P(X >= k)`, which is the survival function evaluated at `k - 1`
    pub fn tail_probability(&self) -> f64 {
        if self.overlap == 0 {
            return 1.0;
        }
        // subtracting 1, because we want to test including the overlap
        // e.g. "7 or more", but sf by default calculates "more than 7"
        self.distribution.sf(self.overlap - 1)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::set::gene_set;

    #[test]
    fn build_params() {
        let params = EnrichmentParams::new(2, 4, 4, 10).unwrap();
        assert_eq!(params.overlap(), 2);
        assert_eq!(params.draws(), 4);
        assert_eq!(params.successes(), 4);
        assert_eq!(params.population(), 10);
    }

    #[test]
    fn invalid_params() {
        // successes larger than population
        assert!(EnrichmentParams::new(0, 2, 11, 10).is_err());
        // draws larger than population
        assert!(EnrichmentParams::new(0, 11, 2, 10).is_err());
        // overlap larger than draws
        assert!(EnrichmentParams::new(3, 2, 5, 10).is_err());
        // overlap larger than successes
        assert!(EnrichmentParams::new(3, 5, 2, 10).is_err());
    }

    #[test]
    fn params_from_sets() {
        let reference = gene_set(["A", "B", "C", "D"]);
        let query = gene_set(["A", "B", "E"]);
        let params = EnrichmentParams::from_sets(&reference, &query, 10).unwrap();
        assert_eq!(params.overlap(), 2);
        assert_eq!(params.draws(), 3);
        assert_eq!(params.successes(), 4);
        assert_eq!(params.population(), 10);

        assert!(EnrichmentParams::from_sets(&reference, &query, 3).is_err());
    }

    #[test]
    fn zero_overlap_is_certain() {
        let params = EnrichmentParams::new(0, 4, 4, 10).unwrap();
        assert!((params.tail_probability() - 1.0).abs() < f64::EPSILON);

        let params = EnrichmentParams::new(0, 0, 0, 0).unwrap();
        assert!((params.tail_probability() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn large_population() {
        let params = EnrichmentParams::new(1, 1, 1, 5_000_000_000).unwrap();
        let p = params.tail_probability();
        assert!((0.0..=1.0).contains(&p));
        // P(X >= 1) == 1 / M for a single draw and a single success
        assert!((p / 2e-10 - 1.0).abs() < 1e-3);
    }
}
