//! A row-major matrix for quick row and column-based data access
//!
//! `Matrix` holds the values of a [`PValueTable`](`crate::PValueTable`).
//! Imagine the following matrix / Dataframe
//!
//! | Index |   0 |   1 |   2 |   3 |
//! |:----- | ---:| ---:| ---:| ---:|
//! | **0** |  11 |  12 |  13 |  14 |
//! | **1** |  21 |  22 |  23 |  24 |
//! | **2** |  31 |  32 |  33 |  34 |
//!
//! ```
//! use setenrich::matrix::Matrix;
//! let data = vec![11, 12, 13, 14, 21, 22, 23, 24, 31, 32, 33, 34];
//! let m = Matrix::new(3, 4, data).unwrap();
//!
//! let rows: Vec<Vec<i32>> = m.rows().map(|row| row.copied().collect()).collect();
//! assert_eq!(rows[1], vec![21, 22, 23, 24]);
//!
//! let cols: Vec<Vec<i32>> = m.cols().map(|col| col.copied().collect()).collect();
//! assert_eq!(cols[3], vec![14, 24, 34]);
//! ```
use std::fmt::Display;

use crate::{EnrichmentError, EnrichmentResult};

/// A row-major matrix with a fixed number of rows and columns
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Creates a new Matrix from `data` with `rows` number of rows and `cols` number of columns
    ///
    /// # Errors
    ///
    /// [`EnrichmentError::InvalidParameter`] if `data` does not contain
    /// exactly `rows * cols` values
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> EnrichmentResult<Self> {
        if rows * cols != data.len() {
            return Err(EnrichmentError::InvalidParameter(format!(
                "{rows} x {cols} matrix cannot hold {} values",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Returns the total number of values
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the `Matrix` does not contain any data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a Tuple with number of rows and number of columns
    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the value at `row` and `col`
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    /// Iterates the rows of the matrix
    pub fn rows(&self) -> RowIterator<'_, T> {
        RowIterator::new(&self.data, self.rows, self.cols)
    }

    /// Iterates the columns of the matrix
    pub fn cols(&self) -> ColumnIterator<'_, T> {
        ColumnIterator::new(&self.data, self.cols)
    }
}

impl<T: Display> Display for Matrix<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let v: Vec<String> = row.map(|v| format!("{v}")).collect();
            writeln!(f, "[{}]", v.join(", "))?;
        }
        Ok(())
    }
}

/// An iterator of the values of a single row of a `Matrix`
pub type Row<'a, T> = std::slice::Iter<'a, T>;

/// An iterator of the values of a single column of a `Matrix`
pub type Column<'a, T> = std::iter::StepBy<std::iter::Skip<std::slice::Iter<'a, T>>>;

/// Iterates the rows of a `Matrix`, returning an Iterator over individual row values
///
/// This struct is yielded by `Matrix::rows`
pub struct RowIterator<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    idx: usize,
}

impl<'a, T> RowIterator<'a, T> {
    fn new(data: &'a [T], rows: usize, cols: usize) -> Self {
        Self {
            data,
            rows,
            cols,
            idx: 0,
        }
    }
}

impl<'a, T> Iterator for RowIterator<'a, T> {
    type Item = Row<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.rows {
            return None;
        }
        let start = self.idx * self.cols;
        self.idx += 1;
        Some(self.data[start..start + self.cols].iter())
    }
}

/// Iterates the columns of a `Matrix`, returning an Iterator over individual column values
///
/// This struct is yielded by `Matrix::cols`
pub struct ColumnIterator<'a, T> {
    data: &'a [T],
    cols: usize,
    idx: usize,
}

impl<'a, T> ColumnIterator<'a, T> {
    fn new(data: &'a [T], cols: usize) -> Self {
        Self { data, cols, idx: 0 }
    }
}

impl<'a, T> Iterator for ColumnIterator<'a, T> {
    type Item = Column<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.cols {
            return None;
        }
        let col = self.data.iter().skip(self.idx).step_by(self.cols);
        self.idx += 1;
        Some(col)
    }
}
