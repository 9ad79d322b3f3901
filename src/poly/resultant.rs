use crate::domains::EuclideanDomain;

use super::univariate::UnivariatePolynomial;

impl<F: EuclideanDomain> UnivariatePolynomial<F> {
    /// Compute the resultant using the subresultant polynomial remainder sequence.
    /// Only exact divisions are performed in the coefficient ring, so this works
    /// over any Euclidean domain, including polynomial rings over a field.
    pub fn resultant(&self, other: &Self) -> F::Element {
        if self.is_zero() || other.is_zero() {
            return self.field.zero();
        }

        let mut a = self.clone();
        let mut b = other.clone();
        let mut negate = false;

        if a.degree() < b.degree() {
            std::mem::swap(&mut a, &mut b);
            if a.degree() % 2 == 1 && b.degree() % 2 == 1 {
                negate = true;
            }
        }

        if b.is_constant() {
            let r = self.field.pow(&b.lcoeff(), a.degree() as u64);
            return if negate { self.field.neg(&r) } else { r };
        }

        let mut g = self.field.one();
        let mut h = self.field.one();

        loop {
            let delta = (a.degree() - b.degree()) as u64;
            if a.degree() % 2 == 1 && b.degree() % 2 == 1 {
                negate = !negate;
            }

            let r = a.pseudo_rem(&b);
            a = b;

            let scale = self.field.mul(&g, &self.field.pow(&h, delta));
            b = r.div_coeff(&scale);

            g = a.lcoeff();
            h = if delta == 0 {
                h
            } else {
                let (q, r) = self
                    .field
                    .quot_rem(&self.field.pow(&g, delta), &self.field.pow(&h, delta - 1));
                debug_assert!(F::is_zero(&r));
                q
            };

            if b.is_constant() {
                break;
            }
        }

        // b is a constant, possibly zero
        let d = a.degree() as u64;
        let (res, r) = self.field.quot_rem(
            &self.field.pow(&b.lcoeff(), d),
            &self.field.pow(&h, d - 1),
        );
        debug_assert!(F::is_zero(&r));

        if negate {
            self.field.neg(&res)
        } else {
            res
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::{
            integer::{Integer, Z},
            rational::{Rational, Q},
        },
        poly::{univariate::UnivariatePolynomial, Variable},
    };

    fn z_poly(c: &[i64]) -> UnivariatePolynomial<crate::domains::integer::IntegerRing> {
        UnivariatePolynomial::from_coefficients(
            &Z,
            c.iter().map(|x| Integer::from(*x)).collect(),
            Arc::new(Variable::new("x")),
        )
    }

    #[test]
    fn resultant_integer() {
        assert_eq!(z_poly(&[-2, 0, 1]).resultant(&z_poly(&[-1, 1])), -1);
        assert_eq!(z_poly(&[-1, 1]).resultant(&z_poly(&[-2, 0, 1])), -1);
        // res(f, f') = -disc(f) for a monic quadratic
        assert_eq!(z_poly(&[1, 1, 1]).resultant(&z_poly(&[1, 2])), 3);
        // a common root gives zero
        assert_eq!(z_poly(&[-1, 0, 1]).resultant(&z_poly(&[1, 1])), 0);
        assert_eq!(z_poly(&[3]).resultant(&z_poly(&[0, 0, 1])), 9);
    }

    #[test]
    fn resultant_cubic() {
        // res(x^3 - 2, x^2 + 1) = prod over roots i, -i of (r^3 - 2) = (-i-2)(i-2) = 5
        assert_eq!(z_poly(&[-2, 0, 0, 1]).resultant(&z_poly(&[1, 0, 1])), 5);

        let a = z_poly(&[-2, 0, 0, 1]).map_coeff(|c| Rational::from(c), Q);
        let b = z_poly(&[1, 0, 1]).map_coeff(|c| Rational::from(c), Q);
        assert_eq!(a.resultant(&b), 5);
    }
}
