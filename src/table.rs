//! The labeled result table of a batch enrichment
use std::fmt::Display;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::matrix::{Column, Matrix, Row};
use crate::{EnrichmentError, EnrichmentResult, RANDOM_SUFFIX};

/// Returns the row label of the random background estimate for `query_tag`
///
/// # Examples
///
/// ```
/// assert_eq!(setenrich::table::random_label("cluster-1"), "cluster-1(random)");
/// ```
pub fn random_label(query_tag: &str) -> String {
    format!("{query_tag}{RANDOM_SUFFIX}")
}

/// P-values of all reference sets against all query sets
///
/// Every reference set is a column and every query set is represented by two rows:
/// the enrichment p-value and the random background estimate, labeled
/// `{query}` and `{query}(random)`.
///
/// |                 | ref_0 | ref_1 |
/// |:--------------- | -----:| -----:|
/// | **que_0**       |  0.01 |  0.80 |
/// | **que_0(random)** | 0.62 | 0.64 |
/// | **que_1**       |  0.33 |  0.02 |
/// | **que_1(random)** | 0.58 | 0.61 |
///
/// `PValueTable`s are returned from [`multi_set_pvalues`](`crate::multi_set_pvalues`).
#[derive(Debug, Clone, PartialEq)]
pub struct PValueTable {
    columns: Vec<String>,
    rows: Vec<String>,
    values: Matrix<f64>,
}

impl PValueTable {
    /// Constructs a new `PValueTable` from row-major `values`
    ///
    /// # Errors
    ///
    /// [`EnrichmentError::InvalidParameter`] if the number of values does
    /// not match the number of row and column labels
    pub fn new(columns: Vec<String>, rows: Vec<String>, values: Vec<f64>) -> EnrichmentResult<Self> {
        let values = Matrix::new(rows.len(), columns.len(), values)?;
        Ok(Self {
            columns,
            rows,
            values,
        })
    }

    /// Returns a Tuple with number of rows and number of columns
    pub fn dim(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// The labels of the rows, i.e. query tags and their random counterparts
    pub fn row_labels(&self) -> &[String] {
        &self.rows
    }

    /// The labels of the columns, i.e. the reference tags
    pub fn column_labels(&self) -> &[String] {
        &self.columns
    }

    /// The raw values of the table
    pub fn values(&self) -> &Matrix<f64> {
        &self.values
    }

    /// Returns the value in column `reference` and row `row`
    pub fn get(&self, reference: &str, row: &str) -> Option<f64> {
        let col = self.columns.iter().position(|label| label == reference)?;
        let row = self.rows.iter().position(|label| label == row)?;
        self.values.get(row, col).copied()
    }

    /// Returns the enrichment p-value of `query` for `reference`
    pub fn pvalue(&self, reference: &str, query: &str) -> Option<f64> {
        self.get(reference, query)
    }

    /// Returns the random background p-value of `query` for `reference`
    pub fn background(&self, reference: &str, query: &str) -> Option<f64> {
        self.get(reference, &random_label(query))
    }

    /// Iterates the rows together with their label
    pub fn rows(&self) -> impl Iterator<Item = (&str, Row<'_, f64>)> {
        self.rows.iter().map(String::as_str).zip(self.values.rows())
    }

    /// Iterates the columns together with their reference tag
    ///
    /// Each column holds the values of all rows for one reference set,
    /// in the order of [`PValueTable::row_labels`].
    pub fn cols(&self) -> impl Iterator<Item = (&str, Column<'_, f64>)> {
        self.columns.iter().map(String::as_str).zip(self.values.cols())
    }

    /// Writes the table as CSV
    ///
    /// The header starts with `index_label`, followed by the reference tags.
    /// Every line starts with the row label.
    ///
    /// # Errors
    ///
    /// [`EnrichmentError::WriteError`] if writing fails
    ///
    /// # Examples
    ///
    /// ```
    /// use setenrich::PValueTable;
    ///
    /// let table = PValueTable::new(
    ///     vec!["psg".to_string()],
    ///     vec!["top-10".to_string(), "top-10(random)".to_string()],
    ///     vec![0.25, 0.5],
    /// ).unwrap();
    ///
    /// let mut out = Vec::new();
    /// table.write_csv(&mut out, "ntop_markers").unwrap();
    /// assert_eq!(
    ///     String::from_utf8(out).unwrap(),
    ///     "ntop_markers,psg\ntop-10,0.25\ntop-10(random),0.5\n"
    /// );
    /// ```
    pub fn write_csv<W: Write>(&self, writer: W, index_label: &str) -> EnrichmentResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(std::iter::once(index_label).chain(self.columns.iter().map(String::as_str)))?;
        for (label, row) in self.rows() {
            wtr.write_record(std::iter::once(label.to_string()).chain(row.map(f64::to_string)))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Writes the table as CSV to the file at `path`
    ///
    /// # Errors
    ///
    /// - [`EnrichmentError::CannotOpenFile`] if the file cannot be created
    /// - [`EnrichmentError::WriteError`] if writing fails
    pub fn to_csv_file<P: AsRef<Path>>(&self, path: P, index_label: &str) -> EnrichmentResult<()> {
        let file = File::create(path.as_ref()).map_err(|err| {
            EnrichmentError::CannotOpenFile(format!("{}: {err}", path.as_ref().display()))
        })?;
        self.write_csv(file, index_label)
    }
}

impl Display for PValueTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.rows.iter().map(String::len).max().unwrap_or(0);
        write!(f, "{:width$}", "")?;
        for col in &self.columns {
            write!(f, "\t{col}")?;
        }
        writeln!(f)?;
        for (label, row) in self.rows() {
            write!(f, "{label:width$}")?;
            for value in row {
                write!(f, "\t{value:.6e}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
