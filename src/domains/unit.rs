//! Multiplicative relations between number field elements that yield units of an order.

use tracing::{debug, instrument};

use crate::tensors::matrix::Matrix;

use super::{
    algebraic_number::AlgebraicNumber,
    ideal::{FractionalIdeal, IdealError},
    integer::{Integer, IntegerRing, Z},
    order::{Order, OrderElement},
    rational::Rational,
    refinement::Exponents,
    Field, Ring,
};

/// Arithmetic in `C/mC` for an overorder `C = N/m`. Since `mC = N ⊆ O`, an element `x` of `C`
/// is stored as `m` times its coordinates in the order, reduced modulo `mN`.
struct Residues<'a> {
    order: &'a Order,
    m: Integer,
    lattice: Matrix<IntegerRing>,
}

impl<'a> Residues<'a> {
    fn new(order: &'a Order, c: &FractionalIdeal) -> Residues<'a> {
        let m = c.denominator().clone();
        Residues {
            order,
            lattice: c.numerator().basis().mul_scalar(&m),
            m,
        }
    }

    fn one(&self) -> OrderElement {
        let one = Ring::one(self.order)
            .into_iter()
            .map(|x| x * &self.m)
            .collect::<Vec<_>>();
        self.lattice.reduce_vector(&one)
    }

    fn residue(&self, x: &AlgebraicNumber) -> OrderElement {
        let w: Vec<_> = self
            .order
            .to_order_coordinates(x)
            .into_iter()
            .map(|c| {
                let (n, d) = (c * Rational::from(self.m.clone())).into_numer_denom();
                debug_assert_eq!(d, 1, "Element does not lie in the overorder");
                n
            })
            .collect();
        self.lattice.reduce_vector(&w)
    }

    fn mul(&self, a: &[Integer], b: &[Integer]) -> OrderElement {
        let p: Vec<_> = Ring::mul(self.order, &a.to_vec(), &b.to_vec())
            .into_iter()
            .map(|x| x.div_exact(&self.m))
            .collect();
        self.lattice.reduce_vector(&p)
    }

    /// Test if the residue class lies in the order.
    fn in_order(&self, a: &[Integer]) -> bool {
        a.iter().all(|x| x.is_divisible(&self.m))
    }
}

/// A coset of the units of the order in the group generated so far.
struct Coset {
    exponents: Exponents,
    residue: OrderElement,
    inverse: OrderElement,
}

impl Order {
    /// Compute a basis of the lattice of exponent vectors `e` for which `Π_i gammas[i]^e[i]`
    /// is a unit of the order. The basis is returned as the rows of a matrix in Hermite
    /// normal form.
    ///
    /// The relations are first computed for the units of the overorder `C` produced by
    /// factor refinement of the principal ideals. The finite quotient of the units of `C`
    /// by the units of the order is then enumerated to find the sublattice of relations
    /// that yield units of the order itself.
    #[instrument(level = "trace", skip_all)]
    pub fn find_unit_basis(
        &self,
        gammas: &[AlgebraicNumber],
    ) -> Result<Matrix<IntegerRing>, IdealError> {
        let ideals = gammas
            .iter()
            .map(|g| self.principal_ideal(g))
            .collect::<Result<Vec<_>, _>>()?;

        let f = self.compute_factorization(&ideals);
        let kernel = f.exponents.integer_kernel();
        debug!("Exponent lattice of units of {}: {}", f.order, kernel);

        if f.order.is_integral() || kernel.nrows() == 0 {
            return Ok(kernel.hermite_normal_form());
        }

        let field = self.field();
        let residues = Residues::new(self, &f.order);
        let r = kernel.nrows();

        let mut relations = Matrix::new(r as u32, r as u32, Z);
        let mut reached = vec![Coset {
            exponents: Exponents::from_elem(0, r),
            residue: residues.one(),
            inverse: residues.one(),
        }];

        for (j, row) in kernel.row_iter().enumerate() {
            let mut g = field.one();
            for (gamma, e) in gammas.iter().zip(row) {
                let e = match e.to_i64() {
                    Some(e) => e,
                    None => panic!("Exponent {} in unit relation is too large", e),
                };

                if e > 0 {
                    field.mul_assign(&mut g, &field.pow(gamma, e as u64));
                } else if e < 0 {
                    field.mul_assign(&mut g, &field.pow(&field.inv(gamma), e.unsigned_abs()));
                }
            }

            let g_res = residues.residue(&g);
            let g_inv_res = residues.residue(&field.inv(&g));

            // find the smallest t such that g^t lies in a reached coset
            let mut powers = vec![(residues.one(), residues.one())];
            let mut p = g_res.clone();
            let mut p_inv = g_inv_res.clone();
            let h = loop {
                if let Some(h) = reached
                    .iter()
                    .position(|h| residues.in_order(&residues.mul(&p, &h.inverse)))
                {
                    break h;
                }

                let next = residues.mul(&p, &g_res);
                let next_inv = residues.mul(&p_inv, &g_inv_res);
                powers.push((
                    std::mem::replace(&mut p, next),
                    std::mem::replace(&mut p_inv, next_inv),
                ));
            };

            let t = powers.len();
            debug!("Generator {} has order {} modulo the units of the order", j, t);

            relations[(j as u32, j as u32)] = Integer::from(t);
            for (i, a) in reached[h].exponents.iter().enumerate() {
                if *a != 0 {
                    relations[(j as u32, i as u32)] -= Integer::from(*a);
                }
            }

            let mut next = Vec::with_capacity(reached.len() * t);
            for (s, (q, q_inv)) in powers.iter().enumerate() {
                for c in &reached {
                    let mut exponents = c.exponents.clone();
                    exponents[j] = s as i64;
                    next.push(Coset {
                        exponents,
                        residue: residues.mul(&c.residue, q),
                        inverse: residues.mul(&c.inverse, q_inv),
                    });
                }
            }
            reached = next;
        }

        Ok((&relations * &kernel).hermite_normal_form())
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::{
            algebraic_number::{AlgebraicExtension, AlgebraicNumber},
            ideal::IdealError,
            integer::{Integer, Z},
            order::Order,
            rational::{Rational, Q},
            Field, Ring,
        },
        poly::{univariate::UnivariatePolynomial, Variable},
        tensors::matrix::Matrix,
    };

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

    fn evaluate(field: &AlgebraicExtension, gammas: &[AlgebraicNumber], e: &[Integer]) -> AlgebraicNumber {
        let mut r = field.one();
        for (g, e) in gammas.iter().zip(e) {
            let e = e.to_i64().unwrap();
            let b = if e < 0 { field.inv(g) } else { g.clone() };
            r = field.mul(&r, &field.pow(&b, e.unsigned_abs()));
        }
        r
    }

    #[test]
    fn units_of_non_maximal_order() {
        let o = equation_order(5);
        let field = o.field().clone();
        let phi = field.div(&field.add(&field.generator(), &field.one()), &field.nth(2));

        // only the third power of the golden ratio lies in Z[sqrt(5)]
        assert_eq!(o.find_unit_basis(&[phi.clone()]).unwrap(), z_matrix(&[&[3]]));

        let u = field.add(&field.generator(), &field.nth(2));
        let gammas = [phi, u];
        let basis = o.find_unit_basis(&gammas).unwrap();
        assert_eq!(basis, z_matrix(&[&[3, 0], &[0, 1]]));

        for row in basis.row_iter() {
            let x = evaluate(&field, &gammas, row);
            assert!(o.contains(&x));
            assert!(o.contains(&field.inv(&x)));
            let n = field.norm(&x);
            assert!(n == 1 || n == -1);
        }
    }

    #[test]
    fn units_of_maximal_order() {
        let o = equation_order(2);
        let field = o.field().clone();
        let u = field.add(&field.generator(), &field.one());

        assert_eq!(
            o.find_unit_basis(&[u.clone(), field.nth(2)]).unwrap(),
            z_matrix(&[&[1, 0]])
        );

        // 3+2*sqrt(2) is the square of the fundamental unit
        let v = field.add(&field.mul(&field.generator(), &field.nth(2)), &field.nth(3));
        assert_eq!(
            o.find_unit_basis(&[u, v, field.nth(3)]).unwrap(),
            z_matrix(&[&[1, 0, 0], &[0, 1, 0]])
        );

        assert_eq!(
            o.find_unit_basis(&[field.zero()]),
            Err(IdealError::ZeroIdeal)
        );
    }
}
