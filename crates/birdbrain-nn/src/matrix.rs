use rand::Rng;

use crate::ShapeMismatchError;

/// Draws a single weight value uniformly from `[-1, 1)`.
///
/// Used both for initializing fresh networks and as the replacement value
/// when a weight mutates.
#[must_use]
pub fn random_weight<R>(rng: &mut R) -> f32
where
    R: Rng + ?Sized,
{
    rng.random_range(-1.0..1.0)
}

/// A fixed-shape 2D array of `f32` values, stored row-major.
///
/// The shape is fixed at construction; there is no resizing. Operations on
/// two matrices return [`ShapeMismatchError`] when the shapes are
/// incompatible. The matrices in this project are tiny (a few rows and
/// columns), so none of the operations try to be clever about performance.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a matrix by applying a function to each `(row, col)` position.
    #[must_use]
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        assert!(rows > 0 && cols > 0, "matrix shape must be non-empty");
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Creates a matrix from nested row vectors.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty or the rows have unequal lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|row| row.len() == cols),
            "all rows must have equal length"
        );
        Self::from_fn(rows.len(), cols, |r, c| rows[r][c])
    }

    /// Creates a matrix with every element drawn independently from
    /// [`random_weight`].
    #[must_use]
    pub fn random<R>(rows: usize, cols: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_fn(rows, cols, |_, _| random_weight(rng))
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the element at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Returns an iterator over all elements in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    /// Applies a function to every element, producing a same-shaped matrix.
    #[must_use]
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f32) -> f32,
    {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combines two same-shaped matrices elementwise.
    pub fn zip_map<F>(&self, other: &Self, mut f: F) -> Result<Self, ShapeMismatchError>
    where
        F: FnMut(f32, f32) -> f32,
    {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(self.mismatch("zip", other));
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Standard matrix product `self · rhs`.
    ///
    /// Fails unless `self.cols() == rhs.rows()`.
    pub fn multiply(&self, rhs: &Self) -> Result<Self, ShapeMismatchError> {
        if self.cols != rhs.rows {
            return Err(self.mismatch("multiply", rhs));
        }
        Ok(Self::from_fn(self.rows, rhs.cols, |r, c| {
            (0..self.cols).map(|i| self.get(r, i) * rhs.get(i, c)).sum()
        }))
    }

    /// Returns the transpose of this matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |r, c| self.get(c, r))
    }

    /// Elementwise sum of two same-shaped matrices.
    pub fn add(&self, other: &Self) -> Result<Self, ShapeMismatchError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(self.mismatch("add", other));
        }
        self.zip_map(other, |a, b| a + b)
    }

    /// Multiplies every element by a scalar.
    #[must_use]
    pub fn scale(&self, factor: f32) -> Self {
        self.map(|v| v * factor)
    }

    /// Affine transform `self · weightᵗ [+ bias]`.
    ///
    /// The networks in this project never use a bias, but the primitive
    /// supports one.
    pub fn linear(&self, weight: &Self, bias: Option<&Self>) -> Result<Self, ShapeMismatchError> {
        let output = self.multiply(&weight.transpose())?;
        match bias {
            Some(bias) => output.add(bias),
            None => Ok(output),
        }
    }

    /// Elementwise hyperbolic tangent; every output lies in `[-1, 1]`
    /// (saturated inputs round to exactly `±1.0` in `f32`).
    #[must_use]
    pub fn tanh(&self) -> Self {
        self.map(f32::tanh)
    }

    fn mismatch(&self, op: &'static str, rhs: &Self) -> ShapeMismatchError {
        ShapeMismatchError {
            op,
            lhs_rows: self.rows,
            lhs_cols: self.cols,
            rhs_rows: rhs.rows,
            rhs_cols: rhs.cols,
        }
    }
}
