use std::sync::Arc;

use rand::{rngs::StdRng, Rng, SeedableRng};
use rug::ops::Pow;
use tracing::{debug, instrument};

use crate::{
    combinatorics::CombinationIterator,
    domains::{
        algebraic_number::AlgebraicExtension,
        finite_field::Zp,
        integer::{mod_inverse, symmetric_mod, Integer, IntegerRing, SMALL_PRIMES, Z},
        rational::{denominator_lcm, Rational, RationalField, Q},
        Field, Ring,
    },
};

use super::{
    univariate::{UnivariatePolynomial, UnivariatePolynomialRing},
    Variable,
};

/// The seed of the random number generator used in modular factorization,
/// which makes every factorization reproducible.
const RNG_SEED: u64 = 0x6e756d6669656c64;
/// The number of suitable primes that are tried before the one with the fewest
/// modular factors is selected.
const PRIME_CANDIDATES: usize = 5;

pub trait Factorize: Sized {
    /// Perform a square-free factorization.
    /// The output is `a_1^e1*...*a_n^e_n`
    /// where each `a_i` is relative prime.
    fn square_free_factorization(&self) -> Vec<(Self, usize)>;
    /// Factor a polynomial over its coefficient ring. Over a field
    /// the factors are monic and the leading coefficient is dropped.
    fn factor(&self) -> Vec<(Self, usize)>;
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Perform a square free factorization using Yun's algorithm.
    ///
    /// The characteristic of the field must be 0.
    pub fn square_free_factorization_0_char(&self) -> Vec<(Self, usize)> {
        if self.is_constant() {
            return vec![];
        }

        let b = self.derivative();
        let c = self.gcd(&b);
        let mut w = self.quot_rem(&c).0;
        let mut y = b.quot_rem(&c).0;

        let mut factors = vec![];

        let mut i = 1;
        while !w.is_constant() {
            let z = &y - &w.derivative();
            let g = w.gcd(&z);
            w = w.quot_rem(&g).0;
            y = z.quot_rem(&g).0;

            if !g.is_one() {
                factors.push((g, i));
            }
            i += 1
        }

        factors
    }
}

impl UnivariatePolynomial<RationalField> {
    /// Clear denominators and the content, yielding the primitive integer
    /// associate with a positive leading coefficient.
    pub fn to_primitive_integer(&self) -> UnivariatePolynomial<IntegerRing> {
        let d = denominator_lcm(&self.coefficients);
        let p = self.map_coeff(
            |c| {
                let c = c.clone() * &d;
                debug_assert!(*c.denom() == 1);
                c.numer().clone()
            },
            Z,
        );

        if p.lcoeff() < 0 {
            (-p).make_primitive()
        } else {
            p.make_primitive()
        }
    }
}

impl Factorize for UnivariatePolynomial<IntegerRing> {
    fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        if self.is_zero() {
            return vec![];
        }

        let mut c = self.content();
        if self.lcoeff() < 0 {
            c = -c;
        }

        let mut factors = vec![];
        if c != 1 {
            factors.push((self.constant(c), 1));
        }

        let q = self.map_coeff(|x| Rational::from(x), Q);
        for (f, e) in q.square_free_factorization_0_char() {
            factors.push((f.to_primitive_integer(), e));
        }

        factors
    }

    fn factor(&self) -> Vec<(Self, usize)> {
        let mut factors = vec![];
        for (f, p) in self.square_free_factorization() {
            if f.is_constant() {
                factors.push((f, p));
                continue;
            }

            debug!("SFF {} {}", f, p);
            factors.extend(f.factor_reconstruct().into_iter().map(|ff| (ff, p)));
        }

        factors
    }
}

impl Factorize for UnivariatePolynomial<RationalField> {
    fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        self.square_free_factorization_0_char()
    }

    fn factor(&self) -> Vec<(Self, usize)> {
        let mut factors = vec![];
        for (f, p) in self.square_free_factorization() {
            debug!("SFF {} {}", f, p);
            for ff in f.to_primitive_integer().factor_reconstruct() {
                factors.push((ff.map_coeff(|c| Rational::from(c), Q).make_monic(), p));
            }
        }

        factors
    }
}

impl Factorize for UnivariatePolynomial<AlgebraicExtension> {
    fn square_free_factorization(&self) -> Vec<(Self, usize)> {
        self.square_free_factorization_0_char()
    }

    #[instrument(level = "trace", skip_all)]
    fn factor(&self) -> Vec<(Self, usize)> {
        let mut factors = vec![];
        for (f, p) in self.square_free_factorization() {
            debug!("SFF {} {}", f, p);
            factors.extend(f.factor_square_free().into_iter().map(|ff| (ff, p)));
        }

        factors
    }
}

impl UnivariatePolynomial<Zp> {
    /// Perform distinct degree factorization on a monic and square-free polynomial.
    pub fn distinct_degree_factorization(&self) -> Vec<(usize, Self)> {
        assert!(self.field.get_prime() != 2);

        if self.is_constant() {
            return vec![];
        }

        let p = Integer::from(self.field.get_prime());
        let x = self.variable_power(1);

        let mut factors = vec![];
        let mut h = x.clone();
        let mut f = self.clone();
        let mut i: usize = 0;
        while !f.is_one() {
            i += 1;

            h = h.exp_mod(&p, &f);

            let g = (&h - &x).gcd(&f);

            if !g.is_one() {
                f = f.quot_rem(&g).0;
                h = h.rem(&f);
                factors.push((i, g));
            }

            if f.degree() < 2 * (i + 1) {
                // f cannot be split more
                if !f.is_constant() {
                    factors.push((f.degree(), f));
                }
                break;
            }
        }

        factors
    }

    /// Perform Cantor-Zassenhaus's probabilistic algorithm for
    /// finding irreducible factors of degree `d`.
    pub fn equal_degree_factorization(&self, d: usize, rng: &mut StdRng) -> Vec<Self> {
        assert!(self.field.get_prime() != 2);
        let s = self.clone().make_monic();

        let n = s.degree();
        if n == d {
            return vec![s];
        }

        let p = self.field.get_prime();
        let exp = (Integer::from(p).pow(d as u32) - 1u32) / 2u32;

        let factor = loop {
            // generate a random non-constant polynomial
            let coeffs = (0..n).map(|_| rng.gen_range(0..p)).collect();
            let random_poly = UnivariatePolynomial::from_coefficients(&self.field, coeffs, self.get_var());

            if random_poly.is_constant() {
                continue;
            }

            let g = random_poly.gcd(&s);

            if !g.is_one() {
                break g;
            }

            let b = random_poly.exp_mod(&exp, &s) - s.one();
            let g = b.gcd(&s);

            if !g.is_one() && g != s {
                break g;
            }
        };

        let mut factors = factor.equal_degree_factorization(d, rng);
        factors.extend(s.quot_rem(&factor).0.equal_degree_factorization(d, rng));
        factors
    }

    /// Perform distinct and equal degree factorization on a square-free polynomial.
    pub fn factor_distinct_equal_degree(&self, rng: &mut StdRng) -> Vec<Self> {
        let mut factors = vec![];
        for (d2, f2) in self.clone().make_monic().distinct_degree_factorization() {
            debug!("DDF {} {}", f2, d2);
            factors.extend(f2.equal_degree_factorization(d2, rng));
        }
        factors
    }
}

impl UnivariatePolynomial<IntegerRing> {
    /// Hensel lift a factorization `self = g * h mod p` of a polynomial that is monic modulo `max_p`
    /// to a factorization `self = g * h mod max_p`, where `max_p` is a power of `p`.
    /// The factors `g` and `h` must be monic and coprime.
    pub fn hensel_lift(
        &self,
        g0: &UnivariatePolynomial<Zp>,
        h0: &UnivariatePolynomial<Zp>,
        max_p: &Integer,
    ) -> (Self, Self) {
        let field = g0.field;
        let p = Integer::from(field.get_prime());

        let (_, s, t) = g0.eea(h0);
        debug_assert!((&(&s * g0) + &(&t * h0)).is_one());

        let sym_map = |e: &u64| field.to_symmetric_integer(*e);
        let mut g = g0.map_coeff(sym_map, Z);
        let mut h = h0.map_coeff(sym_map, Z);

        let mut m = p.clone();
        while m < *max_p {
            let e = self - &(&g * &h);
            if e.is_zero() {
                break;
            }

            let e_p = e.map_coeff(
                |c| {
                    debug_assert!(c.is_divisible(&m));
                    field.to_element(&(c.clone() / &m))
                },
                field,
            );

            // e = (e*s + q*h0) * g0 + r * h0 where e*t = q*g0 + r
            let (q, r) = (&e_p * &t).quot_rem(g0);
            let dh = &(&e_p * &s) + &(&q * h0);

            g = g + r.map_coeff(sym_map, Z).mul_coeff(&m);
            h = h + dh.map_coeff(sym_map, Z).mul_coeff(&m);

            m *= &p;
        }

        (
            g.map_coeff(|c| symmetric_mod(c, max_p), Z),
            h.map_coeff(|c| symmetric_mod(c, max_p), Z),
        )
    }

    /// Lift multiple factors by creating a binary tree and lifting each product.
    fn multi_factor_hensel_lift(&self, hs: &[UnivariatePolynomial<Zp>], max_p: &Integer) -> Vec<Self> {
        if hs.len() == 1 {
            return vec![self.map_coeff(|c| symmetric_mod(c, max_p), Z)];
        }

        let (gs, hs) = hs.split_at(hs.len() / 2);

        let mut g = gs[0].one();
        for x in gs {
            g = g * x;
        }

        let mut h = hs[0].one();
        for x in hs {
            h = h * x;
        }

        let (g_i, h_i) = self.hensel_lift(&g, &h, max_p);
        debug!("g_i={}", g_i);
        debug!("h_i={}", h_i);

        let mut factors = g_i.multi_factor_hensel_lift(gs, max_p);
        factors.extend(h_i.multi_factor_hensel_lift(hs, max_p));
        factors
    }

    /// Factor a square-free primitive polynomial with a positive leading coefficient
    /// by Hensel lifting the factors of a finite field image and recombining them.
    pub fn factor_reconstruct(&self) -> Vec<Self> {
        let d = self.degree();
        if d <= 1 {
            return vec![self.clone()];
        }

        let lcoeff = self.lcoeff();
        let mut rng = StdRng::seed_from_u64(RNG_SEED);

        // select the prime with the fewest modular factors
        let mut best: Option<(Zp, Vec<UnivariatePolynomial<Zp>>)> = None;
        let mut candidates = 0;
        for p in &SMALL_PRIMES[1..] {
            let field = Zp::new(*p as u32);
            if field.to_element(&lcoeff) == 0 {
                continue;
            }

            // check if f_p remains square-free
            let f_p = self.map_coeff(|c| field.to_element(c), field);
            if !f_p.gcd(&f_p.derivative()).is_one() {
                continue;
            }

            let hs = f_p.factor_distinct_equal_degree(&mut rng);
            debug!("{} has {} factors modulo {}", self, hs.len(), p);

            if best.as_ref().map(|(_, b)| hs.len() < b.len()).unwrap_or(true) {
                best = Some((field, hs));
            }

            candidates += 1;
            if candidates == PRIME_CANDIDATES {
                break;
            }
        }

        let Some((field, hs)) = best else {
            panic!("Ran out of primes during factorization of {}", self);
        };

        if hs.len() == 1 {
            // the polynomial is irreducible
            return vec![self.clone()];
        }

        // a coefficient bound for any factor, times two for the symmetric range
        let max_norm = self
            .coefficients
            .iter()
            .map(|c| c.clone().abs())
            .max()
            .unwrap_or_default();
        let bound = (Integer::from(1) << (d as u32 + 1))
            * Integer::from(d + 1)
            * max_norm
            * lcoeff.clone().abs();

        let p = Integer::from(field.get_prime());
        let mut max_p = p.clone();
        while max_p <= bound {
            max_p *= &p;
        }

        let Some(inv) = mod_inverse(&lcoeff, &max_p) else {
            unreachable!("The leading coefficient {} is a unit modulo {}", lcoeff, max_p);
        };
        let monic = self.map_coeff(|c| symmetric_mod(&(c.clone() * &inv), &max_p), Z);

        let mut factors = monic.multi_factor_hensel_lift(&hs, &max_p);

        let mut rec_factors = vec![];
        let mut s = 1;
        let mut rest = self.clone();
        'len: while 2 * s <= factors.len() {
            let mut fs = CombinationIterator::new(factors.len(), s);
            while let Some(cs) = fs.next() {
                let lc = rest.lcoeff();

                // check if the constant term divides
                let c0 = lc.clone() * rest.get_constant();
                if c0 != 0 {
                    let mut g0 = lc.clone();
                    for i in cs {
                        g0 = symmetric_mod(&(g0 * factors[*i].get_constant()), &max_p);
                    }

                    if !c0.is_divisible(&g0) {
                        continue;
                    }
                }

                let mut g = rest.constant(lc);
                for i in cs {
                    g = (&g * &factors[*i]).map_coeff(|c| symmetric_mod(c, &max_p), Z);
                }
                let g = g.make_primitive();

                if let Some(h) = rest.divides(&g) {
                    debug!("Recombined factor {}", g);
                    rec_factors.push(g);

                    let cs = cs.to_vec();
                    for i in cs.iter().rev() {
                        factors.remove(*i);
                    }

                    rest = h;
                    continue 'len;
                }
            }

            s += 1;
        }

        rec_factors.push(rest);
        rec_factors
    }
}

impl UnivariatePolynomial<AlgebraicExtension> {
    /// Compute the norm `N(x) = Res_y(m(y), f(y, x))`, where `f(y, x)` is `self` with the field
    /// generator replaced by `y` and `m` is the minimal polynomial of the field.
    pub fn norm(&self) -> UnivariatePolynomial<RationalField> {
        let field = &self.field;
        let zero_x = UnivariatePolynomial::new(&Q, None, self.variable.clone());
        let ring = UnivariatePolynomialRing::new(Q, self.variable.clone());
        let y = Arc::new(Variable::Temporary(0));

        let m = UnivariatePolynomial::from_coefficients(
            &ring,
            field
                .poly()
                .coefficients
                .iter()
                .map(|c| zero_x.constant(c.clone()))
                .collect(),
            y.clone(),
        );

        let mut coeffs = vec![zero_x.clone(); field.degree()];
        for (i, c) in self.coefficients.iter().enumerate() {
            for (j, cc) in c.poly().coefficients.iter().enumerate() {
                coeffs[j] = &coeffs[j] + &zero_x.monomial(cc.clone(), i);
            }
        }
        let f = UnivariatePolynomial::from_coefficients(&ring, coeffs, y);

        m.resultant(&f)
    }

    /// Factor a square-free polynomial using Trager's algorithm. The factors are monic.
    pub fn factor_square_free(&self) -> Vec<Self> {
        let f = self.clone().make_monic();
        if f.degree() <= 1 {
            return vec![f];
        }

        let field = &f.field;
        let x = f.variable_power(1);

        // find a shift for which the norm is square-free
        let mut s = 0;
        let (g, norm) = loop {
            let shift = f.constant(field.mul(&field.nth(s), &field.generator()));
            let g = f.compose(&(&x - &shift));
            let norm = g.norm();

            if norm.gcd(&norm.derivative()).is_constant() {
                break (g, norm);
            }
            s += 1;
        };
        debug!("Norm {} is square-free for shift {}", norm, s);

        let norm_factors = norm.factor();
        if norm_factors.len() == 1 {
            return vec![f];
        }

        let back = &x + &f.constant(field.mul(&field.nth(s), &field.generator()));
        let mut factors = vec![];
        for (n, _) in norm_factors {
            let h = g.gcd(&field.lift_rational(&n));
            factors.push(h.compose(&back).make_monic());
        }

        factors
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        domains::{
            algebraic_number::AlgebraicExtension,
            finite_field::Zp,
            integer::{Integer, IntegerRing, Z},
            rational::{Rational, RationalField, Q},
            Ring,
        },
        poly::{univariate::UnivariatePolynomial, Variable},
    };

    use super::Factorize;

    fn z_poly(c: &[i64]) -> UnivariatePolynomial<IntegerRing> {
        UnivariatePolynomial::from_coefficients(
            &Z,
            c.iter().map(|x| Integer::from(*x)).collect(),
            Arc::new(Variable::new("x")),
        )
    }

    fn q_poly(c: &[i64]) -> UnivariatePolynomial<RationalField> {
        z_poly(c).map_coeff(|c| Rational::from(c), Q)
    }

    #[test]
    fn square_free() {
        // (x+1)^2 (x-2)
        let f = q_poly(&[2, 3, 0, -1]);
        let mut sff = f.square_free_factorization();
        sff.sort_by_key(|(_, e)| *e);
        assert_eq!(sff, vec![(q_poly(&[-2, 1]), 1), (q_poly(&[1, 1]), 2)]);
    }

    #[test]
    fn modular() {
        let field = Zp::new(7);
        // x^4 - 1 = (x-1)(x+1)(x^2+1) mod 7
        let f = z_poly(&[-1, 0, 0, 0, 1]).map_coeff(|c| field.to_element(c), field);
        let mut rng = StdRng::seed_from_u64(1);
        let factors = f.factor_distinct_equal_degree(&mut rng);
        assert_eq!(factors.len(), 3);

        let mut prod = f.one();
        for x in &factors {
            prod = prod * x;
        }
        assert_eq!(prod, f);
    }

    #[test]
    fn integer() {
        // (2x^2 + 3)(x^3 - x + 5)(x - 1)
        let a = z_poly(&[3, 0, 2]);
        let b = z_poly(&[5, -1, 0, 1]);
        let c = z_poly(&[-1, 1]);
        let f = (&(&a * &b) * &c).mul_coeff(&Integer::from(-3));

        let mut factors = f.factor();
        factors.sort_by_key(|(f, _)| f.degree());
        assert_eq!(
            factors,
            vec![
                (z_poly(&[-3]), 1),
                (c.clone(), 1),
                (a.clone(), 1),
                (b.clone(), 1)
            ]
        );

        // x^4 + 1 is irreducible over Z, but splits modulo every prime
        assert_eq!(z_poly(&[1, 0, 0, 0, 1]).factor(), vec![(z_poly(&[1, 0, 0, 0, 1]), 1)]);
    }

    #[test]
    fn rational() {
        // (x^2 - 2)^2 (x/2 + 1)
        let f = &q_poly(&[-2, 0, 1]).pow(2) * &q_poly(&[2, 1]).mul_coeff(&Rational::from((1, 2)));
        let mut factors = f.factor();
        factors.sort_by_key(|(_, e)| *e);
        assert_eq!(factors, vec![(q_poly(&[2, 1]), 1), (q_poly(&[-2, 0, 1]), 2)]);
    }

    #[test]
    fn number_field() {
        let field = AlgebraicExtension::new(&q_poly(&[-2, 0, 1])).unwrap();
        let f = field.lift_rational(&q_poly(&[-2, 0, 1]));

        let factors = f.factor();
        assert_eq!(factors.len(), 2);
        for (ff, e) in &factors {
            assert_eq!(*e, 1);
            assert_eq!(ff.degree(), 1);
            let root = field.extract_root_from_linear(ff).unwrap();
            assert_eq!(field.mul(&root, &root), field.nth(2));
        }

        // x^2 + 1 stays irreducible over Q(sqrt(2))
        let g = field.lift_rational(&q_poly(&[1, 0, 1]));
        assert_eq!(g.factor(), vec![(g.clone(), 1)]);
    }
}
