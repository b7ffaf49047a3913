//! Load gene lists and gene set tables from text files
//!
//! Two formats are supported:
//!
//! - **Name lists**: one gene per line. Surrounding whitespace and quotes are
//!   removed and blank lines are skipped. Used for the universe and for single
//!   reference or query sets. Several name lists are combined into a
//!   [`SetCollection`] with [`load_named_sets`], tagged by file name.
//! - **Set tables**: tab separated, with a header line. The first column holds
//!   the tag of the set, the second column a comma separated list of genes, e.g.
//!   the differentially expressed genes of each cluster.
//!
//! ```text
//! cluster	genes
//! 0	KRAS,EZH2,"TP53"
//! 1	GBA1,EZH2
//! ```
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, trace};

use crate::set::GeneSet;
use crate::{EnrichmentError, EnrichmentResult, SetCollection, Universe};

/// Removes surrounding whitespace and quotes of a gene name
fn clean_name(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim()
}

fn read_file(path: &Path) -> EnrichmentResult<String> {
    fs::read_to_string(path)
        .map_err(|err| EnrichmentError::CannotOpenFile(format!("{}: {err}", path.display())))
}

/// Parses a list of names, one per line
///
/// # Examples
///
/// ```
/// use setenrich::parser::parse_namelist;
///
/// let names = parse_namelist("KRAS\n  \"EZH2\" \n\n\"TP53\"\n");
/// assert_eq!(names, vec!["KRAS", "EZH2", "TP53"]);
/// ```
pub fn parse_namelist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(clean_name)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Loads a list of names from a file with one name per line
///
/// The order of the names is preserved and duplicates are kept.
///
/// # Errors
///
/// [`EnrichmentError::CannotOpenFile`] if the file cannot be read
pub fn load_namelist<P: AsRef<Path>>(path: P) -> EnrichmentResult<Vec<String>> {
    let names = parse_namelist(&read_file(path.as_ref())?);
    debug!("Loaded {} names from {}", names.len(), path.as_ref().display());
    Ok(names)
}

/// Loads a [`GeneSet`] from a name list file
///
/// # Errors
///
/// [`EnrichmentError::CannotOpenFile`] if the file cannot be read
pub fn load_gene_set<P: AsRef<Path>>(path: P) -> EnrichmentResult<GeneSet> {
    Ok(load_namelist(path)?.into_iter().collect())
}

/// Loads a [`Universe`] from a name list file
///
/// # Errors
///
/// [`EnrichmentError::CannotOpenFile`] if the file cannot be read
pub fn load_universe<P: AsRef<Path>>(path: P) -> EnrichmentResult<Universe> {
    Ok(load_namelist(path)?.into_iter().collect())
}

/// Loads one [`GeneSet`] per name list file, tagged by the file stem
///
/// `psg-0.txt` is tagged `psg-0`, `markers/top-10.txt` is tagged `top-10`.
/// The sets keep the order of `paths`.
///
/// # Errors
///
/// [`EnrichmentError::CannotOpenFile`] if one of the files cannot be read
///
/// # Examples
///
/// ```no_run
/// use setenrich::parser::load_named_sets;
///
/// let references = load_named_sets(["psg-0.txt", "psg-plos2016.txt"]).unwrap();
/// assert_eq!(references.tags().collect::<Vec<_>>(), vec!["psg-0", "psg-plos2016"]);
/// ```
pub fn load_named_sets<I, P>(paths: I) -> EnrichmentResult<SetCollection>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut sets = SetCollection::new();
    for path in paths {
        let path = path.as_ref();
        let tag = path.file_stem().map_or_else(
            || path.to_string_lossy().to_string(),
            |stem| stem.to_string_lossy().to_string(),
        );
        sets.insert(tag, load_gene_set(path)?);
    }
    Ok(sets)
}

/// Parses a tab separated table of tagged gene sets
///
/// The first line is a header and is ignored. Additional columns after
/// the gene list are ignored as well.
///
/// # Errors
///
/// [`EnrichmentError::ParseError`] if a line does not have at least two columns
///
/// # Examples
///
/// ```
/// use setenrich::parser::parse_set_table;
///
/// let table = "cluster\tgenes\n0\tKRAS,EZH2\n1\tGBA1\n";
/// let sets = parse_set_table(table).unwrap();
///
/// assert_eq!(sets.tags().collect::<Vec<_>>(), vec!["0", "1"]);
/// assert!(sets.get("0").unwrap().contains("EZH2"));
/// ```
pub fn parse_set_table(content: &str) -> EnrichmentResult<SetCollection> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut collection = SetCollection::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let (Some(tag), Some(genes)) = (record.get(0), record.get(1)) else {
            return Err(EnrichmentError::ParseError(format!(
                "line {line}: expected a tag and a list of genes"
            )));
        };
        let set: GeneSet = genes
            .split(',')
            .map(clean_name)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();
        trace!("Line {}: {} genes for {}", line, set.len(), tag);
        collection.insert(clean_name(tag), set);
    }
    Ok(collection)
}

/// Loads a tab separated table of tagged gene sets
///
/// See [`parse_set_table`] for the format.
///
/// # Errors
///
/// - [`EnrichmentError::CannotOpenFile`] if the file cannot be read
/// - [`EnrichmentError::ParseError`] if the table is malformed
pub fn load_set_table<P: AsRef<Path>>(path: P) -> EnrichmentResult<SetCollection> {
    let sets = parse_set_table(&read_file(path.as_ref())?)?;
    debug!("Loaded {} sets from {}", sets.len(), path.as_ref().display());
    Ok(sets)
}
