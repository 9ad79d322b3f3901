//! Printing options and printers for matrices and ideals.

use std::fmt::{self, Display, Write};

use crate::{
    domains::{Ring, RingPrinter},
    tensors::matrix::Matrix,
};

/// Options that control how ring elements, polynomials and ideals are printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PrintOptions {
    /// The symbol placed between a coefficient and a monomial.
    pub multiplication_operator: char,
    /// Print ideal bases as `[..]` instead of `(..)`.
    pub square_brackets_for_ideals: bool,
    /// Print number field elements as explicit rational polynomials
    /// with the modulus, e.g. `x+1 % x^2-2`.
    pub explicit_rational_polynomial: bool,
}

impl PrintOptions {
    /// Print with a minimal amount of symbols.
    pub const fn compact() -> PrintOptions {
        PrintOptions {
            multiplication_operator: ' ',
            square_brackets_for_ideals: true,
            explicit_rational_polynomial: false,
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            multiplication_operator: '*',
            square_brackets_for_ideals: false,
            explicit_rational_polynomial: false,
        }
    }
}

/// A printer for a matrix, writing one row per line.
pub struct MatrixPrinter<'a, F: Ring> {
    pub matrix: &'a Matrix<F>,
    pub opts: PrintOptions,
}

impl<'a, F: Ring> MatrixPrinter<'a, F> {
    pub fn new(matrix: &'a Matrix<F>) -> MatrixPrinter<'a, F> {
        MatrixPrinter {
            matrix,
            opts: PrintOptions::default(),
        }
    }
}

impl<'a, F: Ring> Display for MatrixPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = if self.opts.square_brackets_for_ideals {
            ('[', ']')
        } else {
            ('{', '}')
        };

        f.write_char(open)?;
        for (ri, r) in self.matrix.row_iter().enumerate() {
            if ri > 0 {
                f.write_char(',')?;
            }
            f.write_char(open)?;
            for (ci, c) in r.iter().enumerate() {
                if ci > 0 {
                    f.write_char(',')?;
                }

                RingPrinter {
                    ring: self.matrix.field(),
                    element: c,
                    opts: self.opts,
                    in_product: false,
                }
                .fmt(f)?;
            }
            f.write_char(close)?;
        }
        f.write_char(close)
    }
}
