//! Gene sets and the background universe they are drawn from
use std::collections::HashSet;

/// A set of gene identifiers
///
/// This is the canonical container for reference and query sets. Every
/// gene appears only once and the order of genes is irrelevant.
pub type GeneSet = HashSet<String>;

/// Builds a [`GeneSet`] from anything that yields string-like items
///
/// # Examples
///
/// ```
/// use setenrich::set::gene_set;
///
/// let set = gene_set(["EZH2", "KRAS", "EZH2"]);
/// assert_eq!(set.len(), 2);
/// assert!(set.contains("KRAS"));
/// ```
pub fn gene_set<I, S>(genes: I) -> GeneSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    genes.into_iter().map(Into::into).collect()
}

/// Returns the genes present in both `a` and `b`
///
/// # Examples
///
/// ```
/// use setenrich::set::{gene_set, intersect};
///
/// let a = gene_set(["A", "B", "C"]);
/// let b = gene_set(["B", "C", "D"]);
/// assert_eq!(intersect(&a, &b), gene_set(["B", "C"]));
/// ```
pub fn intersect(a: &GeneSet, b: &GeneSet) -> GeneSet {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter(|gene| large.contains(*gene))
        .cloned()
        .collect()
}

/// Returns the number of genes present in both `a` and `b`
///
/// Same as `intersect(a, b).len()` but without allocating a new set
pub fn intersection_size(a: &GeneSet, b: &GeneSet) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|gene| large.contains(*gene)).count()
}

/// The background population of genes
///
/// The `Universe` holds every gene only once. In addition to fast
/// membership checks, it remembers the order in which genes were added, so
/// that drawing random genes by their index is reproducible when the same
/// random seed is used.
///
/// # Examples
///
/// ```
/// use setenrich::Universe;
///
/// let universe: Universe = ["A", "B", "C", "B"].into_iter().collect();
/// assert_eq!(universe.len(), 3);
/// assert_eq!(universe.get(2), Some("C"));
/// assert!(universe.contains("A"));
/// assert!(!universe.contains("Z"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Universe {
    genes: Vec<String>,
    index: GeneSet,
}

impl Universe {
    /// Constructs an empty `Universe`
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a gene to the universe
    ///
    /// Returns `false` if the gene was already present
    pub fn insert<S: Into<String>>(&mut self, gene: S) -> bool {
        let gene = gene.into();
        if self.index.contains(&gene) {
            return false;
        }
        self.index.insert(gene.clone());
        self.genes.push(gene);
        true
    }

    /// Returns the number of genes in the universe
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Returns `true` if the universe does not contain any genes
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Returns `true` if `gene` is part of the universe
    pub fn contains(&self, gene: &str) -> bool {
        self.index.contains(gene)
    }

    /// Returns the gene at position `idx` (in insertion order)
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.genes.get(idx).map(String::as_str)
    }

    /// Iterates all genes in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.genes.iter()
    }

    /// Returns the universe as an unordered [`GeneSet`]
    pub fn as_set(&self) -> &GeneSet {
        &self.index
    }

    /// Returns the genes of `set` that are part of the universe
    ///
    /// # Examples
    ///
    /// ```
    /// use setenrich::Universe;
    /// use setenrich::set::gene_set;
    ///
    /// let universe: Universe = ["A", "B", "C"].into_iter().collect();
    /// let restricted = universe.restrict(&gene_set(["A", "X"]));
    /// assert_eq!(restricted, gene_set(["A"]));
    /// ```
    pub fn restrict(&self, set: &GeneSet) -> GeneSet {
        intersect(set, &self.index)
    }
}

impl<S: Into<String>> FromIterator<S> for Universe {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut universe = Universe::new();
        for gene in iter {
            universe.insert(gene);
        }
        universe
    }
}

impl<'a> IntoIterator for &'a Universe {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
