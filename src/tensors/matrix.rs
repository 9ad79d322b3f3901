use std::{
    fmt::Display,
    ops::{Add, Index, IndexMut, Mul, Neg, Sub},
    slice::Chunks,
};

use crate::{
    domains::{
        integer::{extended_gcd, Integer, IntegerRing},
        EuclideanDomain, Field, Ring,
    },
    printer::MatrixPrinter,
};

/// A matrix with entries that are elements of a ring `F`.
/// A vector can be represented as a matrix with one row or one column.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Matrix<F: Ring> {
    pub(crate) data: Vec<F::Element>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
    pub(crate) field: F,
}

impl<F: Ring> Matrix<F> {
    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..nrows as usize * ncols as usize)
                .map(|_| field.zero())
                .collect(),
            nrows,
            ncols,
            field,
        }
    }

    /// Create a new square matrix with `nrows` rows and ones on the main diagonal and zeroes elsewhere.
    pub fn identity(nrows: u32, field: F) -> Matrix<F> {
        let mut m = Matrix::new(nrows, nrows, field);
        for i in 0..nrows {
            m[(i, i)] = m.field.one();
        }
        m
    }

    /// Create a new column vector from a list of scalars.
    pub fn new_vec(data: Vec<F::Element>, field: F) -> Matrix<F> {
        Matrix {
            nrows: data.len() as u32,
            ncols: 1,
            data,
            field,
        }
    }

    /// Convert a linear representation of a matrix to a `Matrix`.
    pub fn from_linear(
        data: Vec<F::Element>,
        nrows: u32,
        ncols: u32,
        field: F,
    ) -> Result<Matrix<F>, String> {
        if data.len() == nrows as usize * ncols as usize {
            Ok(Matrix {
                data,
                nrows,
                ncols,
                field,
            })
        } else {
            Err(format!(
                "Data length does not match matrix dimensions: {} vs ({},{})",
                data.len(),
                nrows,
                ncols
            ))
        }
    }

    /// Create a new matrix from a 2-dimensional vector of scalars.
    pub fn from_nested_vec(matrix: Vec<Vec<F::Element>>, field: F) -> Result<Matrix<F>, String> {
        let nrows = matrix.len();
        let cols = matrix.first().map(|r| r.len()).unwrap_or(0);

        let mut data = Vec::with_capacity(nrows * cols);
        for d in matrix {
            if d.len() != cols {
                return Err("Matrix is not rectangular".to_string());
            }

            data.extend(d);
        }

        Ok(Matrix {
            nrows: nrows as u32,
            ncols: cols as u32,
            data,
            field,
        })
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows as usize
    }

    /// Return the number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols as usize
    }

    /// Return the field of the matrix entries.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Return the entries in row-major order.
    pub fn data(&self) -> &[F::Element] {
        &self.data
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, F::Element> {
        self.data.chunks(self.ncols.max(1) as usize)
    }

    /// Return true iff every entry in the matrix is zero.
    pub fn is_zero(&self) -> bool {
        self.data.iter().all(|e| F::is_zero(e))
    }

    /// Transpose the matrix.
    pub fn transpose(&self) -> Matrix<F> {
        let mut m = Matrix::new(self.ncols, self.nrows, self.field.clone());
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                m[(j, i)] = self[(i, j)].clone();
            }
        }
        m
    }

    /// Stack the rows of `other` below the rows of `self`.
    pub fn vstack(&self, other: &Matrix<F>) -> Matrix<F> {
        assert_eq!(
            self.ncols, other.ncols,
            "Cannot stack matrices with a different number of columns"
        );

        let mut data = self.data.clone();
        data.extend_from_slice(&other.data);
        Matrix {
            data,
            nrows: self.nrows + other.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        }
    }

    /// Place the columns of `other` to the right of the columns of `self`.
    pub fn hstack(&self, other: &Matrix<F>) -> Matrix<F> {
        assert_eq!(
            self.nrows, other.nrows,
            "Cannot stack matrices with a different number of rows"
        );

        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        for i in 0..self.nrows {
            data.extend_from_slice(&self[i]);
            data.extend_from_slice(&other[i]);
        }

        Matrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols + other.ncols,
            field: self.field.clone(),
        }
    }

    /// Select the columns in the range `start..end`.
    pub fn columns(&self, start: u32, end: u32) -> Matrix<F> {
        let mut data = Vec::with_capacity(self.nrows as usize * (end - start) as usize);
        for i in 0..self.nrows {
            data.extend_from_slice(&self[i][start as usize..end as usize]);
        }

        Matrix {
            data,
            nrows: self.nrows,
            ncols: end - start,
            field: self.field.clone(),
        }
    }

    /// Multiply the scalar `e` to each entry of the matrix.
    pub fn mul_scalar(&self, e: &F::Element) -> Matrix<F> {
        Matrix {
            data: self.data.iter().map(|ee| self.field.mul(ee, e)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        }
    }

    /// Apply a function `f` to each entry of the matrix.
    pub fn map<G: Ring>(&self, f: impl Fn(&F::Element) -> G::Element, field: G) -> Matrix<G> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field,
        }
    }

    /// Swap rows `i` and `j`.
    fn swap_rows(&mut self, i: u32, j: u32) {
        if i == j {
            return;
        }
        for l in 0..self.ncols {
            self.data
                .swap((self.ncols * i + l) as usize, (self.ncols * j + l) as usize);
        }
    }
}

impl<F: Ring> Index<u32> for Matrix<F> {
    type Output = [F::Element];

    /// Get the `index`th row of the matrix.
    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        &self.data[index as usize * self.ncols as usize..(index as usize + 1) * self.ncols as usize]
    }
}

impl<F: Ring> Index<(u32, u32)> for Matrix<F> {
    type Output = F::Element;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        &self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<F: Ring> IndexMut<(u32, u32)> for Matrix<F> {
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut F::Element {
        &mut self.data[(index.0 * self.ncols + index.1) as usize]
    }
}

impl<F: Ring> Display for Matrix<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

impl<F: Ring> Add<&Matrix<F>> for &Matrix<F> {
    type Output = Matrix<F>;

    /// Add two matrices.
    fn add(self, rhs: &Matrix<F>) -> Self::Output {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            panic!(
                "Cannot add matrices of different dimensions: ({},{}) vs ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            );
        }

        Matrix {
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| self.field.add(a, b))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        }
    }
}

impl<F: Ring> Sub<&Matrix<F>> for &Matrix<F> {
    type Output = Matrix<F>;

    /// Subtract two matrices.
    fn sub(self, rhs: &Matrix<F>) -> Self::Output {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            panic!(
                "Cannot subtract matrices of different dimensions: ({},{}) vs ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            );
        }

        Matrix {
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| self.field.sub(a, b))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        }
    }
}

impl<F: Ring> Mul<&Matrix<F>> for &Matrix<F> {
    type Output = Matrix<F>;

    /// Multiply two matrices.
    fn mul(self, rhs: &Matrix<F>) -> Self::Output {
        if self.ncols != rhs.nrows {
            panic!(
                "Cannot multiply matrices because of a dimension mismatch: ({},{}) vs ({},{})",
                self.nrows, self.ncols, rhs.nrows, rhs.ncols
            );
        }

        let mut m = Matrix::new(self.nrows, rhs.ncols, self.field.clone());

        for i in 0..self.nrows {
            for k in 0..self.ncols {
                let a = &self[(i, k)];
                if F::is_zero(a) {
                    continue;
                }

                for j in 0..rhs.ncols {
                    let mut e = std::mem::replace(&mut m[(i, j)], self.field.zero());
                    self.field.add_mul_assign(&mut e, a, &rhs[(k, j)]);
                    m[(i, j)] = e;
                }
            }
        }

        m
    }
}

impl<F: Ring> Neg for Matrix<F> {
    type Output = Matrix<F>;

    /// Negate each entry of the matrix.
    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = self.field.neg(e);
        }

        self
    }
}

/// Errors that can occur when performing matrix operations.
#[derive(Debug)]
pub enum MatrixError<F: Ring> {
    Underdetermined {
        min_rank: u32,
        max_rank: u32,
        row_reduced_matrix: Option<Matrix<F>>,
    },
    Inconsistent,
    NotSquare,
    Singular,
    ShapeMismatch,
    RightHandSideIsNotVector,
}

impl<F: Ring> std::fmt::Display for MatrixError<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatrixError::Underdetermined {
                min_rank,
                max_rank,
                row_reduced_matrix,
            } => {
                write!(
                    f,
                    "The system is underdetermined. The rank of the matrix is between {} and {}",
                    min_rank, max_rank
                )?;
                if let Some(m) = row_reduced_matrix {
                    write!(f, "\nRow reduced matrix:\n{}", m)?;
                }
                Ok(())
            }
            MatrixError::Inconsistent => write!(f, "The system is inconsistent"),
            MatrixError::NotSquare => write!(f, "The matrix is not square"),
            MatrixError::Singular => write!(f, "The matrix is singular"),
            MatrixError::ShapeMismatch => write!(f, "The shape of the matrix is not compatible"),
            MatrixError::RightHandSideIsNotVector => {
                write!(f, "The right-hand side is not a vector")
            }
        }
    }
}

impl<F: Ring> std::error::Error for MatrixError<F> {}

impl<F: EuclideanDomain> Matrix<F> {
    /// Get the content of the matrix, i.e. the gcd of all entries.
    pub fn content(&self) -> F::Element {
        let mut gcd = self.field.zero();
        for e in &self.data {
            gcd = self.field.gcd(&gcd, e);
        }

        gcd
    }

    /// Divide each entry in the matrix by the scalar `e`.
    pub fn div_scalar(&self, e: &F::Element) -> Matrix<F> {
        Matrix {
            data: self
                .data
                .iter()
                .map(|ee| {
                    let (q, r) = self.field.quot_rem(ee, e);
                    assert_eq!(r, self.field.zero());
                    q
                })
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        }
    }
}

impl<F: Field> Matrix<F> {
    /// Compute the inverse of a square matrix, if it exists.
    /// Otherwise, this function returns `MatrixError::Singular`.
    pub fn inv(&self) -> Result<Self, MatrixError<F>> {
        if self.nrows != self.ncols {
            Err(MatrixError::NotSquare)?;
        }

        // use Gaussian elimination with an augmented matrix to find the inverse
        let mut m = self.hstack(&Matrix::identity(self.nrows, self.field.clone()));

        // pivots may only come from the left block
        let rank = m.gaussian_elimination(self.ncols, false)?;
        if rank < self.nrows {
            return Err(MatrixError::Singular);
        }
        m.back_substitution(self.ncols);

        Ok(m.columns(self.ncols, 2 * self.ncols))
    }

    /// Compute the determinant of the matrix.
    pub fn det(&self) -> Result<F::Element, MatrixError<F>> {
        if self.nrows != self.ncols {
            Err(MatrixError::NotSquare)?;
        }

        let f = &self.field;
        match self.nrows {
            0 => Err(MatrixError::Singular),
            1 => Ok(self.data[0].clone()),
            2 => Ok(f.sub(
                &f.mul(&self.data[0], &self.data[3]),
                &f.mul(&self.data[1], &self.data[2]),
            )),
            _ => {
                // track the sign of row swaps during elimination
                let mut m = self.clone();
                let mut det = f.one();
                for j in 0..m.ncols {
                    let Some(k) = (j..m.nrows).find(|k| !F::is_zero(&m[(*k, j)])) else {
                        return Ok(f.zero());
                    };

                    if k != j {
                        m.swap_rows(j, k);
                        det = f.neg(&det);
                    }

                    let inv_x = f.inv(&m[(j, j)]);
                    f.mul_assign(&mut det, &m[(j, j)]);
                    for k in j + 1..m.nrows {
                        if F::is_zero(&m[(k, j)]) {
                            continue;
                        }

                        let s = f.mul(&m[(k, j)], &inv_x);
                        for l in j..m.ncols {
                            let mut e = std::mem::replace(&mut m[(k, l)], f.zero());
                            f.sub_mul_assign(&mut e, &m[(j, l)], &s);
                            m[(k, l)] = e;
                        }
                    }
                }

                Ok(det)
            }
        }
    }

    /// Compute the trace of a square matrix.
    pub fn trace(&self) -> Result<F::Element, MatrixError<F>> {
        if self.nrows != self.ncols {
            Err(MatrixError::NotSquare)?;
        }

        let mut t = self.field.zero();
        for i in 0..self.nrows {
            self.field.add_assign(&mut t, &self[(i, i)]);
        }
        Ok(t)
    }

    /// Write the matrix in echelon form.
    fn gaussian_elimination(
        &mut self,
        max_col: u32,
        early_return: bool,
    ) -> Result<u32, MatrixError<F>> {
        let zero = self.field.zero();

        let mut i = 0;
        for j in 0..max_col {
            if i >= self.nrows {
                break;
            }

            if F::is_zero(&self[(i, j)]) {
                // select a non-zero pivot
                if let Some(k) = (i + 1..self.nrows).find(|k| !F::is_zero(&self[(*k, j)])) {
                    self.swap_rows(i, k);
                } else if early_return {
                    return Err(MatrixError::Underdetermined {
                        min_rank: i,
                        max_rank: max_col - 1,
                        row_reduced_matrix: None,
                    });
                } else {
                    continue;
                }
            }

            let inv_x = self.field.inv(&self[(i, j)]);
            for k in i + 1..self.nrows {
                if !F::is_zero(&self[(k, j)]) {
                    let s = self.field.mul(&self[(k, j)], &inv_x);
                    self[(k, j)] = zero.clone();
                    for l in j + 1..self.ncols {
                        let mut e = std::mem::replace(&mut self[(k, l)], zero.clone());
                        self.field.sub_mul_assign(&mut e, &self[(i, l)], &s);
                        self[(k, l)] = e;
                    }
                }
            }

            i += 1;
        }

        Ok(i)
    }

    /// Create a row-reduced matrix from a matrix in echelon form.
    fn back_substitution(&mut self, max_col: u32) {
        let field = self.field.clone();
        for i in (0..self.nrows).rev() {
            if let Some(j) = (0..max_col).find(|&j| !F::is_zero(&self[(i, j)])) {
                if !field.is_one(&self[(i, j)]) {
                    let inv_x = field.inv(&self[(i, j)]);

                    for k in j..self.ncols {
                        field.mul_assign(&mut self[(i, k)], &inv_x);
                    }
                }

                for k in 0..i {
                    if !F::is_zero(&self[(k, j)]) {
                        let scale = std::mem::replace(&mut self[(k, j)], field.zero());
                        for l in j + 1..self.ncols {
                            let mut e = std::mem::replace(&mut self[(k, l)], field.zero());
                            field.sub_mul_assign(&mut e, &self[(i, l)], &scale);
                            self[(k, l)] = e;
                        }
                    }
                }
            }
        }
    }

    /// Solve `A * x = b` for `x`, where `A` is `self`.
    pub fn solve(&self, b: &Matrix<F>) -> Result<Matrix<F>, MatrixError<F>> {
        if self.nrows != b.nrows {
            return Err(MatrixError::ShapeMismatch);
        }
        if b.ncols != 1 {
            return Err(MatrixError::RightHandSideIsNotVector);
        }

        let (neqs, nvars) = (self.nrows, self.ncols);

        if neqs < nvars {
            return Err(MatrixError::Underdetermined {
                min_rank: 0,
                max_rank: neqs,
                row_reduced_matrix: None,
            });
        }

        // create the augmented matrix
        let mut m = self.hstack(b);

        let rank = match m.gaussian_elimination(nvars, true) {
            Ok(i) => i,
            Err(mut x) => {
                if let MatrixError::Underdetermined {
                    row_reduced_matrix, ..
                } = &mut x
                {
                    *row_reduced_matrix = Some(m);
                }
                return Err(x);
            }
        };

        for k in rank..neqs {
            if !F::is_zero(&m[(k, nvars)]) {
                return Err(MatrixError::Inconsistent);
            }
        }

        if rank < nvars {
            return Err(MatrixError::Underdetermined {
                min_rank: rank,
                max_rank: rank,
                row_reduced_matrix: Some(m),
            });
        }

        m.back_substitution(nvars);

        Ok(Matrix {
            nrows: nvars,
            ncols: 1,
            data: (0..nvars).map(|i| m[(i, nvars)].clone()).collect(),
            field: m.field,
        })
    }

    /// Row-reduce the matrix in-place using Gaussian elimination and return the rank.
    pub fn row_reduce(&mut self) -> usize {
        let rank = match self.gaussian_elimination(self.ncols, false) {
            Ok(r) => r as usize,
            Err(_) => unreachable!("Elimination without early return cannot fail"),
        };
        self.back_substitution(self.ncols);
        rank
    }

    /// Get the rank of the matrix.
    pub fn rank(&self) -> usize {
        let mut m = self.clone();
        m.row_reduce()
    }
}

impl Matrix<IntegerRing> {
    /// Compute the Hermite normal form of the row lattice. The result is in row echelon
    /// form with positive pivots, every entry above a pivot lies in `[0, pivot)`, and zero rows
    /// are removed. Two matrices span the same lattice iff their normal forms are equal.
    pub fn hermite_normal_form(&self) -> Matrix<IntegerRing> {
        let mut m = self.clone();

        let mut r = 0;
        for c in 0..m.ncols {
            if r == m.nrows {
                break;
            }

            // clear the column below row r with unimodular row operations
            for k in r + 1..m.nrows {
                if m[(k, c)] == 0 {
                    continue;
                }

                if m[(r, c)] == 0 {
                    m.swap_rows(r, k);
                    continue;
                }

                let (g, s, t) = extended_gcd(&m[(r, c)], &m[(k, c)]);
                let a_g = m[(r, c)].clone() / &g;
                let b_g = m[(k, c)].clone() / &g;

                for l in c..m.ncols {
                    let x = std::mem::take(&mut m[(r, l)]);
                    let y = std::mem::take(&mut m[(k, l)]);
                    m[(r, l)] = s.clone() * &x + t.clone() * &y;
                    m[(k, l)] = a_g.clone() * y - b_g.clone() * x;
                }
            }

            if m[(r, c)] == 0 {
                continue;
            }

            if m[(r, c)] < 0 {
                for l in c..m.ncols {
                    let e = std::mem::take(&mut m[(r, l)]);
                    m[(r, l)] = -e;
                }
            }

            // reduce the entries above the pivot
            for k in 0..r {
                let q = m[(k, c)].clone().div_rem_floor(m[(r, c)].clone()).0;
                if q == 0 {
                    continue;
                }

                for l in c..m.ncols {
                    let e = q.clone() * &m[(r, l)];
                    m[(k, l)] -= e;
                }
            }

            r += 1;
        }

        m.data.truncate(r as usize * m.ncols as usize);
        m.nrows = r;
        m
    }

    /// Compute a basis of the left kernel `{v : v * self = 0}` over the integers.
    /// The basis is returned as the rows of the result.
    pub fn integer_kernel(&self) -> Matrix<IntegerRing> {
        let aug = self.hstack(&Matrix::identity(self.nrows, self.field));
        let h = aug.hermite_normal_form();

        let mut data = vec![];
        let mut nrows = 0;
        for row in h.row_iter() {
            if row[..self.ncols as usize].iter().all(|e| *e == 0) {
                data.extend_from_slice(&row[self.ncols as usize..]);
                nrows += 1;
            }
        }

        Matrix {
            data,
            nrows,
            ncols: self.nrows,
            field: self.field,
        }
    }

    /// Test if the vector `v` is an integer combination of the rows of `self`,
    /// which must be in Hermite normal form.
    pub fn row_lattice_contains(&self, v: &[Integer]) -> bool {
        assert_eq!(v.len(), self.ncols as usize);

        let mut v = v.to_vec();
        for row in self.row_iter() {
            let Some(p) = row.iter().position(|e| *e != 0) else {
                continue;
            };

            let (q, r) = v[p].clone().div_rem_floor(row[p].clone());
            if r != 0 {
                return false;
            }

            if q != 0 {
                for (a, b) in v.iter_mut().zip(row) {
                    *a -= q.clone() * b;
                }
            }
        }

        v.iter().all(|e| *e == 0)
    }

    /// Reduce `v` modulo the row lattice of `self`, which must be a square matrix in
    /// Hermite normal form. Every coordinate of the result lies in `[0, pivot)`, so two
    /// vectors are congruent modulo the lattice iff their reductions are equal.
    pub fn reduce_vector(&self, v: &[Integer]) -> Vec<Integer> {
        assert_eq!(self.nrows, self.ncols);

        let mut v = v.to_vec();
        for (i, row) in self.row_iter().enumerate() {
            let q = v[i].clone().div_rem_floor(row[i].clone()).0;
            if q != 0 {
                for (a, b) in v.iter_mut().zip(row).skip(i) {
                    *a -= q.clone() * b;
                }
            }
        }
        v
    }

    /// Compute the Hermite normal form of the intersection of the row lattices of `self` and `other`.
    pub fn intersect_row_lattices(&self, other: &Matrix<IntegerRing>) -> Matrix<IntegerRing> {
        assert_eq!(self.ncols, other.ncols);

        // rows (xA + yB | xA) with xA + yB = 0 span the intersection
        let top = self.hstack(self);
        let bottom = other.hstack(&Matrix::new(other.nrows, other.ncols, self.field));
        let h = top.vstack(&bottom).hermite_normal_form();

        let n = self.ncols as usize;
        let mut data = vec![];
        let mut nrows = 0;
        for row in h.row_iter() {
            if row[..n].iter().all(|e| *e == 0) {
                data.extend_from_slice(&row[n..]);
                nrows += 1;
            }
        }

        Matrix {
            data,
            nrows,
            ncols: self.ncols,
            field: self.field,
        }
        .hermite_normal_form()
    }
}

#[cfg(test)]
mod test {
    use crate::domains::{
        integer::{Integer, Z},
        rational::{Rational, Q},
    };

    use super::{Matrix, MatrixError};

    fn z_matrix(rows: &[&[i64]]) -> Matrix<crate::domains::integer::IntegerRing> {
        Matrix::from_nested_vec(
            rows.iter()
                .map(|r| r.iter().map(|x| Integer::from(*x)).collect())
                .collect(),
            Z,
        )
        .unwrap()
    }

    #[test]
    fn basics() {
        let a = Matrix::from_linear(
            vec![
                1u64.into(),
                2u64.into(),
                3u64.into(),
                4u64.into(),
                5u64.into(),
                6u64.into(),
            ],
            2,
            3,
            Z,
        )
        .unwrap();

        assert_eq!(a.transpose().data, vec![1, 4, 2, 5, 3, 6]);
        assert_eq!((-a.clone()).data, vec![-1, -2, -3, -4, -5, -6]);
        assert_eq!((&a - &a).data, vec![0, 0, 0, 0, 0, 0]);

        let b = z_matrix(&[&[7, 8], &[9, 10], &[11, 12]]);
        let c = &a * &b;

        assert_eq!(c.data, vec![58, 64, 139, 154]);
        assert_eq!(&c[1], &[139, 154]);
        assert_eq!(c[(0, 1)], 64);
        assert_eq!(format!("{}", c), "{{58,64},{139,154}}");

        assert_eq!(a.hstack(&a).ncols(), 6);
        assert_eq!(a.vstack(&a).columns(1, 2).data, vec![2, 5, 2, 5]);
    }

    #[test]
    fn solve() {
        let a = Matrix::from_linear(
            vec![
                1u64.into(),
                2u64.into(),
                3u64.into(),
                4u64.into(),
                5u64.into(),
                16u64.into(),
                7u64.into(),
                8u64.into(),
                9u64.into(),
            ],
            3,
            3,
            Q,
        )
        .unwrap();

        assert_eq!(
            a.inv().unwrap().data,
            vec![
                Rational::from((-83, 60)),
                (1, 10).into(),
                (17, 60).into(),
                (19, 15).into(),
                (-1, 5).into(),
                (-1, 15).into(),
                (-1, 20).into(),
                (1, 10).into(),
                (-1, 20).into()
            ]
        );
        assert_eq!(a.det().unwrap(), 60);

        let b = Matrix::from_linear(vec![1u64.into(), 2u64.into(), 3u64.into()], 3, 1, Q).unwrap();

        let r = a.solve(&b).unwrap();
        assert_eq!(
            r.data,
            vec![Rational::from((-1, 3)), (2, 3).into(), 0.into()]
        );
    }

    #[test]
    fn row_reduce() {
        let mut a = Matrix::from_linear(
            (1..=9).map(Rational::from).collect(),
            3,
            3,
            Q,
        )
        .unwrap();

        assert_eq!(a.rank(), 2);
        assert_eq!(a.det().unwrap(), 0);
        assert!(a.inv().is_err());
        assert_eq!(a.row_reduce(), 2);

        assert_eq!(
            a.data,
            vec![
                Rational::from(1),
                0.into(),
                (-1).into(),
                0.into(),
                1.into(),
                2.into(),
                0.into(),
                0.into(),
                0.into()
            ]
        );
    }

    #[test]
    fn inverse() {
        let a = Matrix::from_linear(
            [3, 2, 15, 4, 9, 6, 7, 8, 17, 45, 23, 12, 13, 14, 15, 16]
                .into_iter()
                .map(Rational::from)
                .collect(),
            4,
            4,
            Q,
        )
        .unwrap();

        let inv = a.inv().unwrap();
        assert_eq!(&a * &inv, Matrix::identity(4, Q));
        assert_eq!(a.det().unwrap() * inv.det().unwrap(), 1);

        // the identity block must not supply pivots for a dependent column
        let b = Matrix::from_linear(
            [3, 0, 1, 0].into_iter().map(Rational::from).collect(),
            2,
            2,
            Q,
        )
        .unwrap();
        assert!(matches!(b.inv(), Err(MatrixError::Singular)));
    }

    #[test]
    fn hermite_normal_form() {
        let a = z_matrix(&[&[2, 0], &[1, 1], &[0, 2], &[-2, 2]]);
        assert_eq!(a.hermite_normal_form(), z_matrix(&[&[1, 1], &[0, 2]]));

        let b = z_matrix(&[&[4, 6, 8], &[6, 9, 12], &[0, 0, 5]]);
        let h = b.hermite_normal_form();
        assert_eq!(h, z_matrix(&[&[2, 3, 4], &[0, 0, 5]]));
        assert!(h.row_lattice_contains(&[Integer::from(6), 9.into(), 17.into()]));
        assert!(!h.row_lattice_contains(&[Integer::from(1), 0.into(), 0.into()]));

        // the normal form does not depend on the generators
        let c = z_matrix(&[&[2, 3, 9], &[0, 0, -5], &[2, 3, 4]]);
        assert_eq!(c.hermite_normal_form(), h);
    }

    #[test]
    fn lattices() {
        let a = z_matrix(&[&[2, 0], &[0, 2]]);
        let b = z_matrix(&[&[1, 1], &[0, 2]]);
        assert_eq!(a.intersect_row_lattices(&b), a);

        let c = z_matrix(&[&[3, 0], &[0, 1]]);
        assert_eq!(b.intersect_row_lattices(&c), z_matrix(&[&[3, 1], &[0, 2]]));

        let k = z_matrix(&[&[1, 2], &[2, 4], &[0, 1]]).integer_kernel();
        assert_eq!(k, z_matrix(&[&[2, -1, 0]]));

        let r = b.reduce_vector(&[Integer::from(-3), 7.into()]);
        assert_eq!(r, vec![Integer::from(0), 0.into()]);
        let r = c.reduce_vector(&[Integer::from(7), (-1).into()]);
        assert_eq!(r, vec![Integer::from(1), 0.into()]);
    }
}
