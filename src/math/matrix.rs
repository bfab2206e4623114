use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::NetError;

/// A dense 2-D matrix of `f64`, stored as row-major nested vectors.
///
/// Pure operations (`map`, `combine`, `transpose`, `multiply`) allocate a
/// fresh matrix and never alias their inputs. Each has a `_mut` variant
/// that is a thin wrapper assigning the pure result back into `self`, so
/// the arithmetic itself stays testable in isolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// The n×n identity matrix.
    pub fn identity(n: usize) -> Matrix {
        let mut res = Matrix::zeros(n, n);
        for i in 0..n {
            res.data[i][i] = 1.0;
        }
        res
    }

    /// A matrix with every cell drawn uniformly from [-1, 1].
    ///
    /// The generator is passed in explicitly so callers that need
    /// reproducible runs can seed it (e.g. `StdRng::seed_from_u64`).
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.randomize(rng);
        res
    }

    /// Refills every cell with a fresh uniform draw from [-1, 1].
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for row in self.data.iter_mut() {
            for x in row.iter_mut() {
                *x = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }
    }

    /// Builds a matrix from nested rows.
    ///
    /// Fails with a shape error if the outer sequence is empty or the rows
    /// have unequal lengths.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix, NetError> {
        if data.is_empty() {
            return Err(NetError::Shape {
                op: "from_rows",
                expected: "at least one row".to_string(),
                found: "an empty sequence".to_string(),
            });
        }
        let cols = data[0].len();
        for row in &data {
            if row.len() != cols {
                return Err(NetError::Shape {
                    op: "from_rows",
                    expected: format!("{cols} columns in every row"),
                    found: format!("a row of {}", row.len()),
                });
            }
        }
        Ok(Matrix {
            rows: data.len(),
            cols,
            data,
        })
    }

    /// A len×1 column matrix from a flat slice.
    pub fn column(values: &[f64]) -> Matrix {
        Matrix {
            rows: values.len(),
            cols: 1,
            data: values.iter().map(|&x| vec![x]).collect(),
        }
    }

    pub fn map<F>(&self, f: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(|&x| f(x)).collect())
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    pub fn map_mut<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        *self = self.map(f);
    }

    /// Combines two same-shape matrices elementwise with `f`.
    pub fn combine<F>(&self, other: &Matrix, f: F) -> Result<Matrix, NetError>
    where
        F: Fn(f64, f64) -> f64,
    {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(NetError::Shape {
                op: "combine",
                expected: format!("{}x{}", self.rows, self.cols),
                found: format!("{}x{}", other.rows, other.cols),
            });
        }
        let mut res = Matrix::zeros(self.rows, self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = f(self.data[i][j], other.data[i][j]);
            }
        }
        Ok(res)
    }

    pub fn combine_mut<F>(&mut self, other: &Matrix, f: F) -> Result<(), NetError>
    where
        F: Fn(f64, f64) -> f64,
    {
        *self = self.combine(other, f)?;
        Ok(())
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);
        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }
        res
    }

    pub fn transpose_mut(&mut self) {
        *self = self.transpose();
    }

    /// Standard matrix product. Fails unless `a.cols == b.rows`.
    pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, NetError> {
        if a.cols != b.rows {
            return Err(NetError::Shape {
                op: "multiply",
                expected: format!("{} rows on the right operand", a.cols),
                found: format!("{}x{}", b.rows, b.cols),
            });
        }
        let mut res = Matrix::zeros(a.rows, b.cols);
        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;
                for k in 0..a.cols {
                    sum += a.data[i][k] * b.data[k][j];
                }
                res.data[i][j] = sum;
            }
        }
        Ok(res)
    }

    /// Row-major flat export, useful for vectors.
    pub fn to_flat_vec(&self) -> Vec<f64> {
        self.data.iter().flatten().copied().collect()
    }

    /// Nested 2-D export for external display collaborators.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.clone()
    }
}
