//! Integral and fractional ideals of an [Order].
//!
//! An ideal is a full-rank sublattice of the order that is closed under multiplication
//! by the order. It is stored as the Hermite normal form of its basis, expressed in the
//! basis of the order, so that two ideals are equal iff their representations are equal.
//!
//! A fractional ideal `(d, I)` represents `I/d` and is normalized such that `d` is positive
//! and coprime to the content of `I`. Fractional ideals are also used to represent overorders,
//! which are lattices that contain `1` and are closed under multiplication.

use std::fmt::{Display, Formatter};

use rug::ops::Pow;

use crate::{
    printer::{MatrixPrinter, PrintOptions},
    tensors::matrix::Matrix,
};

use super::{
    algebraic_number::AlgebraicNumber,
    integer::{lcm, Integer, IntegerRing, Z},
    order::Order,
    rational::{denominator_lcm, Rational, Q},
    EuclideanDomain, Ring,
};

/// Errors that occur when building ideals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IdealError {
    /// The generators do not have one coordinate per basis element of the order.
    DimensionMismatch { expected: usize, found: usize },
    /// The generators only generate the zero ideal.
    ZeroIdeal,
}

impl Display for IdealError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            IdealError::DimensionMismatch { expected, found } => write!(
                f,
                "Generators should have {} coordinates, but have {}",
                expected, found
            ),
            IdealError::ZeroIdeal => write!(f, "The zero ideal is not supported"),
        }
    }
}

impl std::error::Error for IdealError {}

/// An integral ideal of an order, stored as a square basis matrix in Hermite normal form.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Ideal {
    basis: Matrix<IntegerRing>,
}

impl Ideal {
    /// The Hermite normal form of the basis. Row `i` holds the coordinates of the `i`th generator.
    pub fn basis(&self) -> &Matrix<IntegerRing> {
        &self.basis
    }

    /// The gcd of all basis entries.
    pub fn content(&self) -> Integer {
        self.basis.content()
    }

    fn scale(&self, k: &Integer) -> Ideal {
        Ideal {
            basis: self.basis.mul_scalar(&k.clone().abs()),
        }
    }
}

impl Display for Ideal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter {
            matrix: &self.basis,
            opts: PrintOptions {
                square_brackets_for_ideals: true,
                ..PrintOptions::default()
            },
        }
        .fmt(f)
    }
}

/// A fractional ideal `I/d` with a positive denominator `d` that is coprime to the content of `I`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct FractionalIdeal {
    denominator: Integer,
    numerator: Ideal,
}

impl FractionalIdeal {
    pub fn denominator(&self) -> &Integer {
        &self.denominator
    }

    pub fn numerator(&self) -> &Ideal {
        &self.numerator
    }

    /// Test if the fractional ideal lies in the order.
    pub fn is_integral(&self) -> bool {
        self.denominator == 1
    }
}

impl Display for FractionalIdeal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl Order {
    fn lattice(&self, m: &Matrix<IntegerRing>) -> Ideal {
        let basis = m.hermite_normal_form();
        debug_assert_eq!(basis.nrows(), self.degree(), "Lattice does not have full rank");
        Ideal { basis }
    }

    /// Create the ideal generated by the rows of `gens`, expressed in the basis of the order.
    pub fn idealify(&self, gens: &Matrix<IntegerRing>) -> Result<Ideal, IdealError> {
        let n = self.degree();
        if gens.ncols() != n {
            return Err(IdealError::DimensionMismatch {
                expected: n,
                found: gens.ncols(),
            });
        }

        if gens.is_zero() {
            return Err(IdealError::ZeroIdeal);
        }

        let mut data = Vec::with_capacity(gens.nrows() * n * n);
        for g in gens.row_iter() {
            if Order::is_zero(&g.to_vec()) {
                continue;
            }

            data.extend(self.multiplication_matrix(g).data);
        }

        let nrows = (data.len() / n) as u32;
        Ok(self.lattice(&Matrix {
            data,
            nrows,
            ncols: n as u32,
            field: Z,
        }))
    }

    /// The principal ideal generated by `o`.
    pub fn ideal_generated_by(&self, o: &[Integer]) -> Result<Ideal, IdealError> {
        self.idealify(&Matrix {
            data: o.to_vec(),
            nrows: 1,
            ncols: o.len() as u32,
            field: Z,
        })
    }

    /// The order itself as an ideal.
    pub fn one_i(&self) -> Ideal {
        Ideal {
            basis: Matrix::identity(self.degree() as u32, Z),
        }
    }

    pub fn equal_i(&self, a: &Ideal, b: &Ideal) -> bool {
        a == b
    }

    /// Test if `a` is a subset of `b`.
    pub fn subset_i(&self, a: &Ideal, b: &Ideal) -> bool {
        a.basis.row_iter().all(|r| b.basis.row_lattice_contains(r))
    }

    /// Test if the order element `o` lies in `a`.
    pub fn contains_i(&self, a: &Ideal, o: &[Integer]) -> bool {
        a.basis.row_lattice_contains(o)
    }

    pub fn sum_i(&self, a: &Ideal, b: &Ideal) -> Ideal {
        self.lattice(&a.basis.vstack(&b.basis))
    }

    pub fn mul_i(&self, a: &Ideal, b: &Ideal) -> Ideal {
        let n = self.degree();
        let mut data = Vec::with_capacity(n * n * n);
        for x in a.basis.row_iter() {
            for y in b.basis.row_iter() {
                data.extend(Ring::mul(self, &x.to_vec(), &y.to_vec()));
            }
        }

        self.lattice(&Matrix {
            data,
            nrows: (n * n) as u32,
            ncols: n as u32,
            field: Z,
        })
    }

    pub fn intersect_i(&self, a: &Ideal, b: &Ideal) -> Ideal {
        Ideal {
            basis: a.basis.intersect_row_lattices(&b.basis),
        }
    }

    /// Compute the ideal quotient `(a : b) = {x in O : x*b ⊆ a}`.
    pub fn quotient_i(&self, a: &Ideal, b: &Ideal) -> Ideal {
        let n = self.degree();

        let h_inv = match a.basis.map(|x| Rational::from(x.clone()), Q).inv() {
            Ok(m) => m,
            Err(e) => unreachable!("An ideal has full rank: {}", e),
        };

        // x*g is in a iff c*M_g*H^-1 is integral, where c are the coordinates of x
        let blocks: Vec<_> = b
            .basis
            .row_iter()
            .map(|g| &self.multiplication_matrix(g).map(|x| Rational::from(x.clone()), Q) * &h_inv)
            .collect();

        let d = denominator_lcm(blocks.iter().flat_map(|m| m.data()));
        if d == 1 {
            return self.one_i();
        }

        let width = n * blocks.len();
        let mut conditions = Matrix::new(n as u32, width as u32, Z);
        for (bi, m) in blocks.iter().enumerate() {
            for r in 0..n as u32 {
                for c in 0..n as u32 {
                    conditions[(r, (bi * n) as u32 + c)] =
                        (m[(r, c)].clone() * Rational::from(d.clone()))
                            .into_numer_denom()
                            .0;
                }
            }
        }

        // solve c*N' = 0 mod d
        let top = conditions.hstack(&Matrix::identity(n as u32, Z));
        let bottom = Matrix::identity(width as u32, Z)
            .mul_scalar(&d)
            .hstack(&Matrix::new(width as u32, n as u32, Z));
        let h = top.vstack(&bottom).hermite_normal_form();

        let mut data = vec![];
        for row in h.row_iter() {
            if row[..width].iter().all(|x| *x == 0) {
                data.extend_from_slice(&row[width..]);
            }
        }

        let nrows = (data.len() / n) as u32;
        self.lattice(&Matrix {
            data,
            nrows,
            ncols: n as u32,
            field: Z,
        })
    }

    /// The positive generator of `a ∩ Z`. Since the coordinate of `1` is last, this is the
    /// last diagonal entry of the Hermite normal form.
    pub fn get_smallest_int(&self, a: &Ideal) -> Integer {
        let n = self.degree() as u32;
        a.basis[(n - 1, n - 1)].clone()
    }

    /// The index `[O : a]`.
    pub fn norm_i(&self, a: &Ideal) -> Integer {
        let mut r = Integer::from(1);
        for i in 0..self.degree() as u32 {
            r *= &a.basis[(i, i)];
        }
        r
    }

    /// Create the fractional ideal `a/d`. Panics when `d` is not positive.
    pub fn make_frac_ideal(&self, d: &Integer, a: &Ideal) -> FractionalIdeal {
        assert!(*d > 0, "The denominator of a fractional ideal must be positive");

        let g = Z.gcd(d, &a.content());
        if g == 1 {
            FractionalIdeal {
                denominator: d.clone(),
                numerator: a.clone(),
            }
        } else {
            FractionalIdeal {
                denominator: d.clone() / &g,
                numerator: Ideal {
                    basis: a.basis.div_scalar(&g),
                },
            }
        }
    }

    /// The order as a fractional ideal.
    pub fn one_f(&self) -> FractionalIdeal {
        self.make_frac_ideal(&Integer::from(1), &self.one_i())
    }

    /// The fractional ideal `x*O`.
    pub fn principal_ideal(&self, x: &AlgebraicNumber) -> Result<FractionalIdeal, IdealError> {
        let (o, d) = self.to_order_element(x);
        Ok(self.make_frac_ideal(&d, &self.ideal_generated_by(&o)?))
    }

    /// Bring `a` and `b` to the common denominator `lcm(d_a, d_b)`.
    fn common_denominator(
        &self,
        a: &FractionalIdeal,
        b: &FractionalIdeal,
    ) -> (Integer, Ideal, Ideal) {
        let l = lcm(&a.denominator, &b.denominator);
        let na = a.numerator.scale(&(l.clone() / &a.denominator));
        let nb = b.numerator.scale(&(l.clone() / &b.denominator));
        (l, na, nb)
    }

    pub fn sum(&self, a: &FractionalIdeal, b: &FractionalIdeal) -> FractionalIdeal {
        let (l, na, nb) = self.common_denominator(a, b);
        self.make_frac_ideal(&l, &self.sum_i(&na, &nb))
    }

    pub fn mul_f(&self, a: &FractionalIdeal, b: &FractionalIdeal) -> FractionalIdeal {
        self.make_frac_ideal(
            &(a.denominator.clone() * &b.denominator),
            &self.mul_i(&a.numerator, &b.numerator),
        )
    }

    pub fn intersect(&self, a: &FractionalIdeal, b: &FractionalIdeal) -> FractionalIdeal {
        let (l, na, nb) = self.common_denominator(a, b);
        self.make_frac_ideal(&l, &self.intersect_i(&na, &nb))
    }

    /// Compute `a^e`, where `a^0` is the order itself.
    pub fn exp(&self, a: &FractionalIdeal, mut e: u64) -> FractionalIdeal {
        let mut result = self.one_f();
        let mut x = a.clone();
        while e > 0 {
            if e % 2 == 1 {
                result = self.mul_f(&result, &x);
            }
            e /= 2;
            if e > 0 {
                x = self.mul_f(&x, &x);
            }
        }
        result
    }

    /// Compute the quotient `(a : b) = {x in K : x*b ⊆ a}`.
    pub fn quotient(&self, a: &FractionalIdeal, b: &FractionalIdeal) -> FractionalIdeal {
        let m = self.get_smallest_int(&b.numerator);
        let q = self.quotient_i(&a.numerator.scale(&m), &b.numerator);
        self.make_frac_ideal(&(a.denominator.clone() * &m), &q.scale(&b.denominator))
    }

    /// Test if `a` is a subset of `b`.
    pub fn subset(&self, a: &FractionalIdeal, b: &FractionalIdeal) -> bool {
        let (_, na, nb) = self.common_denominator(a, b);
        self.subset_i(&na, &nb)
    }

    pub fn equal(&self, a: &FractionalIdeal, b: &FractionalIdeal) -> bool {
        a == b
    }

    /// Test if the field element `x` lies in `a`.
    pub fn contains_f(&self, a: &FractionalIdeal, x: &AlgebraicNumber) -> bool {
        let c = self.to_order_coordinates(x);
        let v: Vec<_> = c
            .into_iter()
            .map(|c| c * Rational::from(a.denominator.clone()))
            .collect();

        if v.iter().any(|c| *c.denom() != 1) {
            return false;
        }

        let v: Vec<_> = v.into_iter().map(|c| c.into_numer_denom().0).collect();
        self.contains_i(&a.numerator, &v)
    }

    /// Compute the inverse `(c : a)` of `a` in the overorder `c`.
    pub fn inverse_in(&self, c: &FractionalIdeal, a: &FractionalIdeal) -> FractionalIdeal {
        self.quotient(c, a)
    }

    /// The ring of multipliers `(a : a)`, the largest order over which `a` is an ideal.
    pub fn ring_of_multipliers(&self, a: &FractionalIdeal) -> FractionalIdeal {
        self.quotient(a, a)
    }

    /// Test if `a` is invertible in the overorder `c`.
    pub fn is_invertible_in(&self, c: &FractionalIdeal, a: &FractionalIdeal) -> bool {
        self.mul_f(a, &self.inverse_in(c, a)) == *c
    }

    /// The index of `a` relative to the order, `[O : a]`.
    pub fn norm(&self, a: &FractionalIdeal) -> Rational {
        let n = self.degree() as u32;
        Rational::from((
            self.norm_i(&a.numerator),
            a.denominator.clone().pow(n),
        ))
    }

    /// Multiply `a` by the non-zero integer `q`.
    pub fn scale(&self, a: &FractionalIdeal, q: &Integer) -> FractionalIdeal {
        assert!(*q != 0, "Cannot scale an ideal by zero");
        self.make_frac_ideal(&a.denominator, &a.numerator.scale(q))
    }

    /// Extend `a` to the overorder `c`.
    pub fn extend(&self, a: &FractionalIdeal, c: &FractionalIdeal) -> FractionalIdeal {
        self.mul_f(a, c)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::{
            algebraic_number::AlgebraicExtension,
            integer::{Integer, Z},
            order::Order,
            rational::{Rational, Q},
            Field, Ring,
        },
        poly::{univariate::UnivariatePolynomial, Variable},
        tensors::matrix::Matrix,
    };

    use super::{Ideal, IdealError};

    fn equation_order(d: i64) -> Order {
        let field = AlgebraicExtension::new(&UnivariatePolynomial::from_coefficients(
            &Q,
            vec![Rational::from(-d), 0.into(), 1.into()],
            Arc::new(Variable::new("a")),
        ))
        .unwrap();
        Order::equation_order(&field)
    }

    fn z_matrix(rows: &[&[i64]]) -> Matrix<crate::domains::integer::IntegerRing> {
        Matrix::from_nested_vec(
            rows.iter()
                .map(|r| r.iter().map(|x| Integer::from(*x)).collect())
                .collect(),
            Z,
        )
        .unwrap()
    }

    fn v(x: &[i64]) -> Vec<Integer> {
        x.iter().map(|x| Integer::from(*x)).collect()
    }

    fn ideal(o: &Order, gens: &[&[i64]]) -> Ideal {
        o.idealify(&z_matrix(gens)).unwrap()
    }

    #[test]
    fn integral_ideals() {
        let o = equation_order(-5);

        let two = o.ideal_generated_by(&v(&[0, 2])).unwrap();
        let p2 = ideal(&o, &[&[0, 2], &[1, 1]]);
        let p3 = ideal(&o, &[&[0, 3], &[1, 1]]);
        let a = o.ideal_generated_by(&v(&[1, 1])).unwrap();

        assert_eq!(two.basis(), &z_matrix(&[&[2, 0], &[0, 2]]));
        assert_eq!(p2.basis(), &z_matrix(&[&[1, 1], &[0, 2]]));
        assert_eq!(a.basis(), &z_matrix(&[&[1, 1], &[0, 6]]));
        assert_eq!(format!("{}", p2), "[[1,1],[0,2]]");

        assert_eq!(o.mul_i(&p2, &p2), two);
        assert_eq!(o.sum_i(&two, &a), p2);
        assert_eq!(o.sum_i(&p2, &p3), o.one_i());
        assert_eq!(o.mul_i(&p2, &p3), a);
        assert!(o.equal_i(&o.sum_i(&p3, &two), &o.sum_i(&two, &p3)));

        let ab = o.mul_i(&a, &p3);
        assert!(o.subset_i(&ab, &a));
        assert!(o.subset_i(&ab, &p3));
        assert!(!o.subset_i(&p2, &two));

        assert_eq!(o.get_smallest_int(&p2), 2);
        assert_eq!(o.get_smallest_int(&a), 6);
        assert_eq!(o.norm_i(&a), 6);

        let six = o.ideal_generated_by(&v(&[0, 6])).unwrap();
        let three = o.ideal_generated_by(&v(&[0, 3])).unwrap();
        assert_eq!(o.intersect_i(&two, &three), six);
        assert_eq!(o.intersect_i(&p2, &p3), a);
    }

    #[test]
    fn quotients() {
        let o = equation_order(-5);
        let two = o.ideal_generated_by(&v(&[0, 2])).unwrap();
        let p2 = ideal(&o, &[&[0, 2], &[1, 1]]);
        let p3 = ideal(&o, &[&[0, 3], &[1, 1]]);

        assert_eq!(o.quotient_i(&two, &p2), p2);
        assert_eq!(o.quotient_i(&p3, &p2), p3);
        assert_eq!(o.quotient_i(&p2, &o.one_i()), p2);

        for i in [&two, &p2, &p3] {
            let q = o.quotient_i(i, i);
            assert!(o.contains_i(&q, &Ring::one(&o)));
        }
    }

    #[test]
    fn errors() {
        let o = equation_order(-5);
        assert_eq!(
            o.idealify(&z_matrix(&[&[1, 2, 3]])),
            Err(IdealError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(o.ideal_generated_by(&v(&[0, 0])), Err(IdealError::ZeroIdeal));
    }

    #[test]
    fn fractional_ideals() {
        let o = equation_order(-5);
        let field = o.field().clone();
        let p2 = o.make_frac_ideal(&Integer::from(1), &ideal(&o, &[&[0, 2], &[1, 1]]));

        // (2/4) is normalized to (1/2)
        let half = o.make_frac_ideal(
            &Integer::from(4),
            &o.ideal_generated_by(&v(&[0, 2])).unwrap(),
        );
        assert_eq!(*half.denominator(), 2);
        assert_eq!(half.numerator(), &o.one_i());
        assert_eq!(half, o.principal_ideal(&field.inv(&field.nth(2))).unwrap());
        assert_eq!(format!("{}", half), "[[1,0],[0,1]]/2");

        // P2 is invertible with inverse P2/2
        let inv = o.inverse_in(&o.one_f(), &p2);
        assert_eq!(inv, o.mul_f(&p2, &half));
        assert!(o.is_invertible_in(&o.one_f(), &p2));
        assert_eq!(o.mul_f(&p2, &inv), o.one_f());

        assert_eq!(o.exp(&p2, 2), o.principal_ideal(&field.nth(2)).unwrap());
        assert_eq!(o.exp(&p2, 0), o.one_f());
        assert_eq!(o.norm(&p2), 2);
        assert_eq!(o.norm(&inv), Rational::from((1, 2)));

        assert!(o.subset(&p2, &o.one_f()));
        assert!(o.subset(&o.one_f(), &inv));
        assert!(!o.subset(&inv, &o.one_f()));
        assert_eq!(o.sum(&p2, &o.one_f()), o.one_f());
        assert_eq!(o.intersect(&inv, &o.one_f()), o.one_f());
        assert_eq!(o.scale(&inv, &Integer::from(2)), p2);
        assert_eq!(o.ring_of_multipliers(&p2), o.one_f());

        let a = field.add(&field.generator(), &field.one());
        assert!(o.contains_f(&inv, &field.div(&a, &field.nth(2))));
        assert!(!o.contains_f(&p2, &field.one()));
    }

    #[test]
    fn ring_of_multipliers() {
        let o = equation_order(5);

        // P = (2, 1+sqrt(5)) equals 2*Z[(1+sqrt(5))/2] and is not invertible in Z[sqrt(5)]
        let p = o.make_frac_ideal(&Integer::from(1), &ideal(&o, &[&[0, 2], &[1, 1]]));
        assert!(!o.is_invertible_in(&o.one_f(), &p));
        assert_eq!(o.mul_f(&p, &p), o.scale(&p, &Integer::from(2)));

        let c = o.ring_of_multipliers(&p);
        assert_eq!(
            c,
            o.make_frac_ideal(&Integer::from(2), &ideal(&o, &[&[0, 2], &[1, 1]]))
        );
        assert!(o.subset(&o.one_f(), &c));
        assert_eq!(o.mul_f(&c, &c), c);
        assert!(o.is_invertible_in(&c, &o.extend(&p, &c)));
    }
}
