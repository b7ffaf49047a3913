//! Ordered collections of tagged gene sets
use crate::set::GeneSet;
use crate::Universe;

/// An ordered collection of gene sets, each identified by a tag
///
/// Reference and query sets are handed to the
/// [batch enrichment](`crate::batch::multi_set_pvalues`) as `SetCollection`s.
/// The order of the sets determines the order of columns and rows of the
/// resulting [`PValueTable`](`crate::PValueTable`).
///
/// A `SetCollection` is built either from named sets, keeping the tags
/// as they are, or from unnamed sets, with tags generated from a prefix
/// and the position of the set (`ref_0`, `ref_1`, ...).
///
/// # Examples
///
/// ```
/// use setenrich::SetCollection;
/// use setenrich::set::gene_set;
///
/// let named: SetCollection = [
///     ("pathway-a", gene_set(["A", "B"])),
///     ("pathway-b", gene_set(["C"])),
/// ]
/// .into_iter()
/// .collect();
/// assert_eq!(named.tags().collect::<Vec<_>>(), vec!["pathway-a", "pathway-b"]);
///
/// let unnamed = SetCollection::references([gene_set(["A"]), gene_set(["B"])]);
/// assert_eq!(unnamed.tags().collect::<Vec<_>>(), vec!["ref_0", "ref_1"]);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetCollection {
    entries: Vec<(String, GeneSet)>,
}

impl SetCollection {
    /// Constructs an empty `SetCollection`
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a `SetCollection` from unnamed sets
    ///
    /// Each set is tagged as `{prefix}_{index}`
    pub fn positional<I: IntoIterator<Item = GeneSet>>(prefix: &str, sets: I) -> Self {
        Self {
            entries: sets
                .into_iter()
                .enumerate()
                .map(|(idx, set)| (format!("{prefix}_{idx}"), set))
                .collect(),
        }
    }

    /// Constructs a `SetCollection` of unnamed reference sets, tagged `ref_0, ref_1, ...`
    pub fn references<I: IntoIterator<Item = GeneSet>>(sets: I) -> Self {
        Self::positional(crate::REFERENCE_PREFIX, sets)
    }

    /// Constructs a `SetCollection` of unnamed query sets, tagged `que_0, que_1, ...`
    pub fn queries<I: IntoIterator<Item = GeneSet>>(sets: I) -> Self {
        Self::positional(crate::QUERY_PREFIX, sets)
    }

    /// Adds a tagged set to the end of the collection
    ///
    /// If the tag is already present, its set is replaced but keeps
    /// its position.
    pub fn insert<S: Into<String>>(&mut self, tag: S, set: GeneSet) {
        let tag = tag.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == tag) {
            Some(entry) => entry.1 = set,
            None => self.entries.push((tag, set)),
        }
    }

    /// Returns the set with the given tag
    pub fn get(&self, tag: &str) -> Option<&GeneSet> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == tag)
            .map(|(_, set)| set)
    }

    /// Returns the number of sets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the collection does not contain any sets
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the tags in order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(tag, _)| tag.as_str())
    }

    /// Iterates tags and sets in order
    pub fn iter(&self) -> std::slice::Iter<'_, (String, GeneSet)> {
        self.entries.iter()
    }

    /// Returns a new collection with every set restricted to the `universe`
    pub fn restrict_to(&self, universe: &Universe) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(tag, set)| (tag.clone(), universe.restrict(set)))
                .collect(),
        }
    }

    /// Returns the union of all sets
    ///
    /// # Examples
    ///
    /// ```
    /// use setenrich::SetCollection;
    /// use setenrich::set::gene_set;
    ///
    /// let clusters = SetCollection::queries([gene_set(["A", "B"]), gene_set(["B", "C"])]);
    /// assert_eq!(clusters.pooled(), gene_set(["A", "B", "C"]));
    /// ```
    pub fn pooled(&self) -> GeneSet {
        self.entries
            .iter()
            .flat_map(|(_, set)| set.iter().cloned())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, GeneSet)> for SetCollection {
    fn from_iter<T: IntoIterator<Item = (S, GeneSet)>>(iter: T) -> Self {
        let mut collection = SetCollection::new();
        for (tag, set) in iter {
            collection.insert(tag, set);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a SetCollection {
    type Item = &'a (String, GeneSet);
    type IntoIter = std::slice::Iter<'a, (String, GeneSet)>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::set::gene_set;

    #[test]
    fn positional_tags() {
        let sets = vec![gene_set(["A"]), gene_set(["B"]), gene_set(["C"])];
        let queries = SetCollection::queries(sets.clone());
        assert_eq!(queries.tags().collect::<Vec<_>>(), vec!["que_0", "que_1", "que_2"]);

        let custom = SetCollection::positional("cluster", sets);
        assert_eq!(custom.get("cluster_2"), Some(&gene_set(["C"])));
    }

    #[test]
    fn named_keeps_insertion_order() {
        let collection: SetCollection = [
            ("zeta", gene_set(["A"])),
            ("alpha", gene_set(["B"])),
            ("mu", gene_set(["C"])),
        ]
        .into_iter()
        .collect();
        assert_eq!(collection.tags().collect::<Vec<_>>(), vec!["zeta", "alpha", "mu"]);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn reinserted_tag_keeps_position() {
        let mut collection = SetCollection::new();
        collection.insert("first", gene_set(["A"]));
        collection.insert("second", gene_set(["B"]));
        collection.insert("first", gene_set(["C"]));

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.tags().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(collection.get("first"), Some(&gene_set(["C"])));
    }

    #[test]
    fn restrict_to_universe() {
        let universe: Universe = ["A", "B", "C"].into_iter().collect();
        let collection = SetCollection::references([gene_set(["A", "X"]), gene_set(["Y"])]);
        let restricted = collection.restrict_to(&universe);

        assert_eq!(restricted.get("ref_0"), Some(&gene_set(["A"])));
        assert!(restricted.get("ref_1").unwrap().is_empty());
        // the input collection is untouched
        assert_eq!(collection.get("ref_0"), Some(&gene_set(["A", "X"])));
    }

    #[test]
    fn empty_collection() {
        let collection = SetCollection::new();
        assert!(collection.is_empty());
        assert!(collection.pooled().is_empty());
        assert!(collection.get("ref_0").is_none());
    }
}
