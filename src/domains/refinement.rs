//! Factor refinement of fractional ideals.
//!
//! Given fractional ideals `I_1, ..., I_k` of an order `O`, factor refinement computes an
//! overorder `C ⊇ O` and pairwise coprime invertible ideals `J_1, ..., J_l` of `C` such that
//! every `I_i C` is a product of powers of the `J_j`. Ideals of `C` are represented as
//! fractional ideals of `O`, so that all operations can be performed in the basis of `O`.

use ahash::HashMap;
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::tensors::matrix::Matrix;

use super::{
    ideal::FractionalIdeal,
    integer::{Integer, IntegerRing, Z},
    order::Order,
};

/// Exponents of a refined piece with respect to each input ideal.
pub type Exponents = SmallVec<[i64; 4]>;

/// The result of [Order::factor_refinement].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Refinement {
    /// The overorder `C` in which all factors are invertible.
    pub order: FractionalIdeal,
    /// Pairwise coprime proper ideals of `C` with their exponent in the product of the inputs.
    pub factors: Vec<(FractionalIdeal, i64)>,
}

/// The result of [Order::compute_factorization].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    /// The overorder `C` in which all factors are invertible.
    pub order: FractionalIdeal,
    /// Pairwise coprime proper ideals `J_1, ..., J_l` of `C`.
    pub basis: Vec<FractionalIdeal>,
    /// A `k x l` matrix `V` such that `I_i C = Π_j J_j^V[i][j]`.
    pub exponents: Matrix<IntegerRing>,
}

impl Order {
    /// Enlarge the overorder `c` until `i c` is invertible in it. Returns the new
    /// overorder and the extension of `i`.
    ///
    /// The ideal `J^(n-1)` is invertible in its ring of multipliers, so if `J` is not
    /// invertible in `c`, one of the powers `J^k` with `k < n` has a ring of multipliers
    /// that is strictly larger than `c`.
    #[instrument(level = "trace", skip_all)]
    pub fn compute_overorder(
        &self,
        c: &FractionalIdeal,
        i: &FractionalIdeal,
    ) -> (FractionalIdeal, FractionalIdeal) {
        let mut c = c.clone();

        'enlarge: loop {
            let j = self.extend(i, &c);
            if self.is_invertible_in(&c, &j) {
                return (c, j);
            }

            let mut jk = j.clone();
            for k in 1..=self.degree() {
                let r = self.ring_of_multipliers(&jk);
                if r != c {
                    debug!("Ring of multipliers of power {} enlarges order to {}", k, r);
                    c = r;
                    continue 'enlarge;
                }

                jk = self.mul_f(&jk, &j);
            }

            unreachable!(
                "No power of {} enlarges the order {}, yet it is not invertible",
                j, c
            );
        }
    }

    /// Compute `a^e` in the overorder `c`, where negative exponents use the inverse in `c`.
    pub fn power_in(&self, c: &FractionalIdeal, a: &FractionalIdeal, e: i64) -> FractionalIdeal {
        if e == 0 {
            c.clone()
        } else if e < 0 {
            self.exp(&self.inverse_in(c, a), e.unsigned_abs())
        } else {
            self.exp(a, e as u64)
        }
    }

    /// Merge equal pieces and drop pieces that are trivial.
    fn normalize_pieces(
        &self,
        c: &FractionalIdeal,
        pieces: Vec<(FractionalIdeal, Exponents)>,
    ) -> Vec<(FractionalIdeal, Exponents)> {
        let mut index: HashMap<FractionalIdeal, usize> = HashMap::default();
        let mut merged: Vec<(FractionalIdeal, Exponents)> = Vec::with_capacity(pieces.len());

        for (j, v) in pieces {
            if let Some(&p) = index.get(&j) {
                for (a, b) in merged[p].1.iter_mut().zip(&v) {
                    *a += b;
                }
            } else {
                index.insert(j.clone(), merged.len());
                merged.push((j, v));
            }
        }

        merged.retain(|(j, v)| j != c && v.iter().any(|e| *e != 0));
        merged
    }

    /// Find the first pair of pieces that is not coprime, together with their sum.
    fn find_common_part(
        &self,
        c: &FractionalIdeal,
        pieces: &[(FractionalIdeal, Exponents)],
    ) -> Option<(usize, usize, FractionalIdeal)> {
        for p in 0..pieces.len() {
            for q in p + 1..pieces.len() {
                let g = self.sum(&pieces[p].0, &pieces[q].0);
                if g != *c {
                    return Some((p, q, g));
                }
            }
        }
        None
    }

    /// Refine the ideals into coprime pieces, where each piece carries a vector that
    /// holds its exponent in the factorization of every input.
    #[instrument(level = "trace", skip_all)]
    fn refine(
        &self,
        ideals: &[FractionalIdeal],
    ) -> (FractionalIdeal, Vec<(FractionalIdeal, Exponents)>) {
        let k = ideals.len();

        let mut c = self.one_f();
        for i in ideals {
            c = self.compute_overorder(&c, i).0;
        }

        // I = N/d is split into N and d, which are both integral and invertible in c
        let mut pieces = Vec::with_capacity(2 * k);
        for (pos, i) in ideals.iter().enumerate() {
            let mut v: Exponents = SmallVec::from_elem(0, k);
            v[pos] = 1;
            let numerator = self.make_frac_ideal(&Integer::from(1), i.numerator());
            pieces.push((self.extend(&numerator, &c), v.clone()));

            if *i.denominator() != 1 {
                v[pos] = -1;
                let d = self.scale(&c, i.denominator());
                pieces.push((d, v));
            }
        }

        loop {
            pieces = self.normalize_pieces(&c, pieces);

            let Some((p, q, g)) = self.find_common_part(&c, &pieces) else {
                break;
            };

            if !self.is_invertible_in(&c, &g) {
                c = self.compute_overorder(&c, &g).0;
                debug!("Lifting {} pieces to {}", pieces.len(), c);
                pieces = pieces
                    .into_iter()
                    .map(|(j, v)| (self.extend(&j, &c), v))
                    .collect();
                continue;
            }

            let g_inv = self.inverse_in(&c, &g);
            let (jq, vq) = pieces.remove(q);
            let (jp, vp) = pieces.remove(p);
            let v: Exponents = vp.iter().zip(&vq).map(|(a, b)| a + b).collect();

            debug!("Splitting off common part {}", g);
            pieces.push((self.mul_f(&jp, &g_inv), vp));
            pieces.push((self.mul_f(&jq, &g_inv), vq));
            pieces.push((g, v));
        }

        (c, pieces)
    }

    /// Compute an overorder `C` and pairwise coprime ideals `J_j` of `C` with exponents `e_j`
    /// such that `Π_i I_i C = Π_j J_j^e_j`.
    #[instrument(level = "trace", skip_all)]
    pub fn factor_refinement(&self, ideals: &[FractionalIdeal]) -> Refinement {
        let (order, pieces) = self.refine(ideals);

        let factors = pieces
            .into_iter()
            .filter_map(|(j, v)| {
                let e: i64 = v.iter().sum();
                if e != 0 {
                    Some((j, e))
                } else {
                    None
                }
            })
            .collect();

        Refinement { order, factors }
    }

    /// Compute an overorder `C`, pairwise coprime ideals `J_j` of `C` and an exponent matrix `V`
    /// such that `I_i C = Π_j J_j^V[i][j]` for every input ideal `I_i`.
    pub fn compute_factorization(&self, ideals: &[FractionalIdeal]) -> Factorization {
        let (order, pieces) = self.refine(ideals);

        let mut exponents = Matrix::new(ideals.len() as u32, pieces.len() as u32, Z);
        for (j, (_, v)) in pieces.iter().enumerate() {
            for (i, e) in v.iter().enumerate() {
                exponents[(i as u32, j as u32)] = Integer::from(*e);
            }
        }

        Factorization {
            order,
            basis: pieces.into_iter().map(|(j, _)| j).collect(),
            exponents,
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::{
            algebraic_number::AlgebraicExtension,
            ideal::FractionalIdeal,
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

    fn integral(o: &Order, gens: &[[i64; 2]]) -> FractionalIdeal {
        let m = Matrix::from_nested_vec(
            gens.iter()
                .map(|r| r.iter().map(|x| Integer::from(*x)).collect())
                .collect(),
            Z,
        )
        .unwrap();
        o.make_frac_ideal(&Integer::from(1), &o.idealify(&m).unwrap())
    }

    fn product(o: &Order, c: &FractionalIdeal, factors: &[(FractionalIdeal, i64)]) -> FractionalIdeal {
        factors
            .iter()
            .fold(c.clone(), |acc, (j, e)| o.mul_f(&acc, &o.power_in(c, j, *e)))
    }

    #[test]
    fn refine_in_maximal_order() {
        let o = equation_order(-5);
        let two = integral(&o, &[[0, 2]]);
        let a = integral(&o, &[[1, 1]]);
        let p2 = integral(&o, &[[0, 2], [1, 1]]);
        let p3 = integral(&o, &[[0, 3], [1, 1]]);

        let r = o.factor_refinement(&[two.clone(), a.clone()]);
        assert_eq!(r.order, o.one_f());
        assert_eq!(r.factors, vec![(p2.clone(), 3), (p3.clone(), 1)]);
        assert_eq!(product(&o, &r.order, &r.factors), o.mul_f(&two, &a));

        let f = o.compute_factorization(&[two.clone(), a.clone()]);
        assert_eq!(f.basis, vec![p2.clone(), p3.clone()]);
        assert_eq!(
            f.exponents,
            Matrix::from_linear(vec![2.into(), 0.into(), 1.into(), 1.into()], 2, 2, Z).unwrap()
        );

        for (input, row) in [two, a].iter().zip(f.exponents.row_iter()) {
            let factors: Vec<_> = f
                .basis
                .iter()
                .cloned()
                .zip(row.iter().map(|e| e.to_i64().unwrap()))
                .collect();
            assert_eq!(product(&o, &f.order, &factors), *input);
        }
    }

    #[test]
    fn refine_fractional() {
        let o = equation_order(-5);
        let field = o.field().clone();
        let p2 = integral(&o, &[[0, 2], [1, 1]]);

        let two = integral(&o, &[[0, 2]]);
        let half = o.principal_ideal(&field.inv(&field.nth(2))).unwrap();
        let r = o.factor_refinement(&[half.clone()]);
        assert_eq!(r.factors, vec![(two.clone(), -1)]);

        // the common factor of 2 and 1/2 cancels
        let r = o.factor_refinement(&[half, p2.clone()]);
        assert_eq!(r.factors, vec![(p2.clone(), -1)]);

        assert_eq!(o.power_in(&o.one_f(), &p2, -2), o.make_frac_ideal(&Integer::from(2), &o.one_i()));
        assert_eq!(o.power_in(&o.one_f(), &p2, 0), o.one_f());
    }

    #[test]
    fn overorder() {
        let o = equation_order(5);
        let p = integral(&o, &[[0, 2], [1, 1]]);
        let c = o.make_frac_ideal(&Integer::from(2), p.numerator());

        let (c2, j) = o.compute_overorder(&o.one_f(), &p);
        assert_eq!(c2, c);
        assert_eq!(j, p);
        assert!(o.is_invertible_in(&c2, &j));

        // in Z[(1+sqrt(5))/2] the ideals (2) and (1+sqrt(5)) coincide
        let two = integral(&o, &[[0, 2]]);
        let a = integral(&o, &[[1, 1]]);
        let r = o.factor_refinement(&[two.clone(), a.clone()]);
        assert_eq!(r.order, c);
        assert_eq!(r.factors, vec![(p.clone(), 2)]);

        let f = o.compute_factorization(&[two, a]);
        assert_eq!(f.basis, vec![p]);
        assert_eq!(
            f.exponents,
            Matrix::from_linear(vec![1.into(), 1.into()], 2, 1, Z).unwrap()
        );
        assert!(o.contains_f(&f.order, &o.to_field(&Ring::one(&o))));
    }

    #[test]
    fn enlarge_during_refinement() {
        // (2) and (1+sqrt(-3)) are principal, but their sum is not invertible in Z[sqrt(-3)]
        let o = equation_order(-3);
        let two = integral(&o, &[[0, 2]]);
        let a = integral(&o, &[[1, 1]]);
        let three = integral(&o, &[[0, 3]]);
        let p = integral(&o, &[[0, 2], [1, 1]]);

        assert!(o.is_invertible_in(&o.one_f(), &two));
        assert!(o.is_invertible_in(&o.one_f(), &a));
        assert_eq!(o.sum(&two, &a), p);
        assert!(!o.is_invertible_in(&o.one_f(), &p));

        let r = o.factor_refinement(&[two.clone(), a.clone(), three.clone()]);

        // the order is lifted to Z[(1+sqrt(-3))/2], in which 2 and 1+sqrt(-3) are associated
        let c = o.make_frac_ideal(&Integer::from(2), p.numerator());
        assert_eq!(r.order, c);
        assert!(o.subset(&o.one_f(), &r.order));
        assert_ne!(r.order, o.one_f());
        assert_eq!(r.factors, vec![(p.clone(), 2), (o.scale(&c, &Integer::from(3)), 1)]);

        let input = o.mul_f(&o.mul_f(&two, &a), &three);
        assert_eq!(product(&o, &r.order, &r.factors), o.extend(&input, &r.order));

        for (i, (ji, _)) in r.factors.iter().enumerate() {
            assert!(o.is_invertible_in(&r.order, ji));
            for (jj, _) in &r.factors[i + 1..] {
                assert_eq!(o.sum(ji, jj), r.order);
            }
        }
    }
}
