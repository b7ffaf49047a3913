//! Enrichment of many reference sets against many query sets
//!
//! # Examples
//!
//! ```
//! use setenrich::{multi_set_pvalues, BatchConfig, SetCollection, Universe};
//! use setenrich::set::gene_set;
//!
//! let universe: Universe = (0..200).map(|i| format!("G{i}")).collect();
//!
//! let pathways: SetCollection = [
//!     ("pathway-a", gene_set((0..30).map(|i| format!("G{i}")))),
//!     ("pathway-b", gene_set((100..130).map(|i| format!("G{i}")))),
//! ]
//! .into_iter()
//! .collect();
//!
//! let clusters = SetCollection::queries([
//!     gene_set((0..20).map(|i| format!("G{i}"))),
//!     gene_set((50..70).map(|i| format!("G{i}"))),
//! ]);
//!
//! let config = BatchConfig::default().with_repeats(100).with_seed(42);
//! let table = multi_set_pvalues(&pathways, &clusters, &universe, &config).unwrap();
//!
//! assert_eq!(table.dim(), (4, 2));
//! assert!(table.pvalue("pathway-a", "que_0").unwrap() < 1e-10);
//! assert_eq!(table.pvalue("pathway-a", "que_1").unwrap(), 1.0);
//! assert!(table.background("pathway-b", "que_0").unwrap() > 0.1);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::stats::background::background_pvalue;
use crate::stats::hypergeom::enrichment_pvalue;
use crate::table::random_label;
use crate::{EnrichmentError, EnrichmentResult, PValueTable, SetCollection, Universe};

/// Settings for [`multi_set_pvalues`]
///
/// By default, the background is estimated from [`DEFAULT_REPEATS`](`crate::DEFAULT_REPEATS`)
/// random draws using a random generator seeded from system entropy.
///
/// # Examples
///
/// ```
/// use setenrich::BatchConfig;
///
/// let config = BatchConfig::default();
/// assert_eq!(config.repeats(), 1000);
/// assert_eq!(config.seed(), None);
///
/// let config = config.with_repeats(50).with_seed(7);
/// assert_eq!(config.repeats(), 50);
/// assert_eq!(config.seed(), Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    repeats: u32,
    seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            repeats: crate::DEFAULT_REPEATS,
            seed: None,
        }
    }
}

impl BatchConfig {
    /// Sets the number of random draws for the background estimate
    #[must_use]
    pub fn with_repeats(mut self, repeats: u32) -> Self {
        self.repeats = repeats;
        self
    }

    /// Seeds the random generator to get reproducible background estimates
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of random draws for the background estimate
    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    /// Seed of the random generator, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Calculates the enrichment of every query set for every reference set
///
/// All sets are restricted to the `universe` first. Then, for every
/// pair of reference and query set, the [enrichment p-value](`enrichment_pvalue`)
/// and the [random background](`background_pvalue`) for a query set of the
/// same size are calculated.
///
/// ```mermaid
/// graph LR
///     R[Reference sets] --> F{restrict to universe}
///     Q[Query sets] --> F
///     F --> P[enrichment p-value]
///     F --> B[background p-value]
///     P --> T[PValueTable]
///     B --> T
/// ```
///
/// The resulting [`PValueTable`] has one column per reference set and two
/// rows per query set (`{query}` and `{query}(random)`), in the order of the
/// collections.
///
/// # Errors
///
/// - [`EnrichmentError::InvalidParameter`] if `config` requests `0` repeats
/// - Any error of a single pair aborts the whole batch
pub fn multi_set_pvalues(
    references: &SetCollection,
    queries: &SetCollection,
    universe: &Universe,
    config: &BatchConfig,
) -> EnrichmentResult<PValueTable> {
    let mut rng = config.rng();
    multi_set_pvalues_with_rng(references, queries, universe, config.repeats(), &mut rng)
}

/// Same as [`multi_set_pvalues`], but draws the random background from `rng`
///
/// # Errors
///
/// - [`EnrichmentError::InvalidParameter`] if `repeats` is `0`
/// - Any error of a single pair aborts the whole batch
pub fn multi_set_pvalues_with_rng<R: Rng + ?Sized>(
    references: &SetCollection,
    queries: &SetCollection,
    universe: &Universe,
    repeats: u32,
    rng: &mut R,
) -> EnrichmentResult<PValueTable> {
    if repeats == 0 {
        return Err(EnrichmentError::InvalidParameter(
            "at least one repeat is required".to_string(),
        ));
    }

    let references = references.restrict_to(universe);
    let queries = queries.restrict_to(universe);
    for (tag, set) in references.iter().chain(queries.iter()) {
        if set.is_empty() {
            warn!("No gene of {} is part of the universe", tag);
        }
    }

    let n_cols = references.len();
    let mut values = vec![0.0; 2 * queries.len() * n_cols];

    for (col, (ref_tag, reference)) in references.iter().enumerate() {
        for (idx, (que_tag, query)) in queries.iter().enumerate() {
            let pvalue = enrichment_pvalue(reference, query, universe, false)?;
            let background = background_pvalue(query.len(), universe, reference, repeats, rng)?;
            debug!(
                "Reference: {}, Query: {}, p-value: {}, background: {}",
                ref_tag, que_tag, pvalue, background
            );
            values[2 * idx * n_cols + col] = pvalue;
            values[(2 * idx + 1) * n_cols + col] = background;
        }
    }

    let columns = references.tags().map(String::from).collect();
    let rows = queries
        .tags()
        .flat_map(|tag| [tag.to_string(), random_label(tag)])
        .collect();
    PValueTable::new(columns, rows, values)
}
