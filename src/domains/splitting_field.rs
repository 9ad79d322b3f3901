//! Composition of number fields through primitive elements, and splitting fields
//! of rational polynomials.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    poly::{
        factor::Factorize,
        polynomial::{ConversionError, MultivariatePolynomial},
        univariate::UnivariatePolynomial,
    },
    tensors::matrix::{Matrix, MatrixError},
};

use super::{
    algebraic_number::{AlgebraicExtension, AlgebraicNumber, NumberFieldError},
    rational::{Rational, RationalField, Q},
    Ring,
};

/// A primitive element `z = α + t*β` of the compositum `Q(α, β)`, where `α` is a root of the
/// first polynomial and `β` a root of the second.
#[derive(Clone, Debug)]
pub struct PrimitiveElement {
    /// The minimal polynomial of `z`, which has degree `[Q(α, β) : Q]`.
    pub minimal_polynomial: UnivariatePolynomial<RationalField>,
    /// The multiplier `t`.
    pub multiplier: u64,
    /// `α` as a polynomial in `z`.
    pub v0: UnivariatePolynomial<RationalField>,
    /// `β` as a polynomial in `z`.
    pub v1: UnivariatePolynomial<RationalField>,
}

/// The splitting field of a polynomial together with its roots.
#[derive(Clone, Debug)]
pub struct SplittingField {
    pub field: AlgebraicExtension,
    /// Every distinct root with its multiplicity.
    pub roots: Vec<(AlgebraicNumber, usize)>,
}

impl SplittingField {
    /// The minimal polynomial of the generator of the splitting field.
    pub fn minimal_polynomial(&self) -> &UnivariatePolynomial<RationalField> {
        self.field.poly()
    }
}

/// Convert the polynomial `q` in the variables `v0` and `v1` to a polynomial in `v1`
/// over `field`, where `v0` is mapped to the root of the defining polynomial of `field`.
fn to_field_poly(
    field: &AlgebraicExtension,
    q: &MultivariatePolynomial<RationalField>,
    v0: usize,
    v1: usize,
) -> Result<UnivariatePolynomial<AlgebraicExtension>, NumberFieldError> {
    if v0 >= q.nvars() || v1 >= q.nvars() {
        Err(ConversionError::VariableCount {
            expected: v0.max(v1) + 1,
            found: q.nvars(),
        })?;
    }

    let others: Vec<_> = (0..q.nvars())
        .filter(|v| *v != v0 && *v != v1 && q.degree(*v) > 0)
        .map(|v| q.get_vars_ref()[v].to_string())
        .collect();
    if !others.is_empty() {
        Err(ConversionError::NotUnivariate { variables: others })?;
    }

    let zero = UnivariatePolynomial::new(&Q, None, field.variable());
    let mut coeffs = vec![zero.clone(); q.degree(v1) as usize + 1];
    for t in q {
        let e = t.exponents[v1] as usize;
        coeffs[e] = &coeffs[e] + &zero.monomial(t.coefficient.clone(), t.exponents[v0] as usize);
    }

    Ok(UnivariatePolynomial::from_coefficients(
        field,
        coeffs.iter().map(|c| field.from_original(c)).collect(),
        Arc::new(q.get_vars_ref()[v1].clone()),
    ))
}

/// The coordinates of `a` in the basis `α^i y^j` of `K[y]/(q)`, where `m` is the degree of `q`.
fn coordinates(
    field: &AlgebraicExtension,
    m: usize,
    a: &UnivariatePolynomial<AlgebraicExtension>,
) -> Vec<Rational> {
    (0..m)
        .flat_map(|j| field.coefficients(&a.coefficient(j)))
        .collect()
}

/// Find a primitive element `z = α + t*β` for the compositum of the field defined by `p` and the
/// field obtained by adjoining a root `β` of `q`. The polynomial `q` is a polynomial in
/// `v1` with coefficients that are polynomials in `α` (variable `v0`), and it must be
/// irreducible over `Q(α)`.
///
/// Multipliers `t = 0, 1, 2, ...` are tried until the powers of `z` span the
/// compositum. Then `α` and `β` are expressed in terms of `z`.
#[instrument(level = "trace", skip_all)]
pub fn primitive_elem(
    p: &UnivariatePolynomial<RationalField>,
    q: &MultivariatePolynomial<RationalField>,
    v0: usize,
    v1: usize,
) -> Result<PrimitiveElement, NumberFieldError> {
    let k1 = AlgebraicExtension::new(p)?;
    let q = to_field_poly(&k1, q, v0, v1)?;
    if q.is_constant() {
        return Err(NumberFieldError::ConstantPolynomial);
    }
    let q = q.make_monic();

    let (n, m) = (k1.degree(), q.degree());
    let dim = n * m;

    let alpha = q.constant(k1.original_root());
    let y = q.variable_power(1);

    let mut t = 0u64;
    loop {
        let z = &alpha + &y.clone().mul_coeff(&k1.nth(t as i64));

        // column i holds the coordinates of z^i
        let mut basis = Matrix::new(dim as u32, dim as u32, Q);
        let mut cur = q.one();
        for i in 0..dim {
            for (r, c) in coordinates(&k1, m, &cur).into_iter().enumerate() {
                basis[(r as u32, i as u32)] = c;
            }
            cur = (&cur * &z).rem(&q);
        }

        let rhs = Matrix::new_vec(coordinates(&k1, m, &cur), Q);
        let c = match basis.solve(&rhs) {
            Ok(c) => c,
            Err(MatrixError::Underdetermined { .. }) => {
                debug!("Multiplier {} does not yield a primitive element", t);
                t += 1;
                continue;
            }
            Err(e) => unreachable!("Powers of the primitive element are dependent: {}", e),
        };

        let mut coeffs: Vec<Rational> = c.data().iter().map(|c| -c.clone()).collect();
        coeffs.push(Rational::from(1));
        let minimal_polynomial = UnivariatePolynomial::from_coefficients(&Q, coeffs, p.variable.clone());

        let express = |x: &UnivariatePolynomial<AlgebraicExtension>| {
            match basis.solve(&Matrix::new_vec(coordinates(&k1, m, x), Q)) {
                Ok(s) => UnivariatePolynomial::from_coefficients(
                    &Q,
                    s.data().to_vec(),
                    p.variable.clone(),
                ),
                Err(e) => unreachable!("The powers of the primitive element form a basis: {}", e),
            }
        };

        debug!("Primitive element with multiplier {}: {}", t, minimal_polynomial);
        return Ok(PrimitiveElement {
            v0: express(&alpha),
            v1: express(&y),
            minimal_polynomial,
            multiplier: t,
        });
    }
}

/// Map `x` into a larger field, in which the generator of the field of `x` is `theta`.
fn embed(field: &AlgebraicExtension, theta: &AlgebraicNumber, x: &AlgebraicNumber) -> AlgebraicNumber {
    let mut r = field.zero();
    for c in x.poly().coefficients.iter().rev() {
        r = field.add(&field.mul(&r, theta), &field.constant(c.clone()));
    }
    r
}

/// Compute the splitting field of `p` and all its roots with their multiplicities.
///
/// The polynomial is factored over the field built so far and a root of the first nonlinear
/// factor is adjoined, until all factors are linear.
#[instrument(level = "trace", skip_all)]
pub fn splitting_field(
    p: &UnivariatePolynomial<RationalField>,
) -> Result<SplittingField, NumberFieldError> {
    let mut field = AlgebraicExtension::rationals(p.variable.clone());
    if p.is_constant() {
        return Ok(SplittingField {
            field,
            roots: vec![],
        });
    }

    let mut pending: Vec<_> = p
        .square_free_factorization()
        .into_iter()
        .map(|(f, e)| (field.lift_rational(&f), e))
        .collect();
    let mut roots = vec![];

    loop {
        let mut nonlinear = vec![];
        for (f, e) in &pending {
            for g in field.factor_square_free_poly(f) {
                match g.degree() {
                    0 => {}
                    1 => roots.push((field.extract_root_from_linear(&g)?, *e)),
                    _ => nonlinear.push((g, *e)),
                }
            }
        }

        let Some((g, _)) = nonlinear.first() else {
            break;
        };

        let pe = primitive_elem(field.poly(), &field.de_lift(g), 0, 1)?;
        let new_field = AlgebraicExtension::new(&pe.minimal_polynomial)?;
        debug!("Extended {} to {}", field, new_field);

        let theta = new_field.from_original(&pe.v0);
        roots = roots
            .into_iter()
            .map(|(r, e)| (embed(&new_field, &theta, &r), e))
            .collect();
        pending = nonlinear
            .into_iter()
            .map(|(g, e)| {
                (
                    g.map_coeff(|c| embed(&new_field, &theta, c), new_field.clone()),
                    e,
                )
            })
            .collect();
        field = new_field;
    }

    Ok(SplittingField { field, roots })
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::{
            rational::{Rational, RationalField, Q},
            Ring,
        },
        poly::{polynomial::MultivariatePolynomial, univariate::UnivariatePolynomial, Variable},
    };

    use super::{primitive_elem, splitting_field};

    fn q_poly(c: &[i64]) -> UnivariatePolynomial<RationalField> {
        UnivariatePolynomial::from_coefficients(
            &Q,
            c.iter().map(|x| Rational::from(*x)).collect(),
            Arc::new(Variable::new("x")),
        )
    }

    fn q_rat(c: &[(i64, i64)]) -> UnivariatePolynomial<RationalField> {
        UnivariatePolynomial::from_coefficients(
            &Q,
            c.iter().map(|x| Rational::from(*x)).collect(),
            Arc::new(Variable::new("x")),
        )
    }

    #[test]
    fn sqrt2_sqrt3() {
        let mut q = MultivariatePolynomial::new(
            &Q,
            None,
            Arc::new(vec![Variable::new("x"), Variable::new("y")]),
        );
        q.append_monomial(Rational::from(-3), &[0, 0]);
        q.append_monomial(Rational::from(1), &[0, 2]);

        let pe = primitive_elem(&q_poly(&[-2, 0, 1]), &q, 0, 1).unwrap();
        assert_eq!(pe.multiplier, 1);
        assert_eq!(pe.minimal_polynomial, q_poly(&[1, 0, -10, 0, 1]));
        assert_eq!(pe.v0, q_rat(&[(0, 1), (-9, 2), (0, 1), (1, 2)]));
        assert_eq!(pe.v1, q_rat(&[(0, 1), (11, 2), (0, 1), (-1, 2)]));
    }

    #[test]
    fn cube_root() {
        let p = q_poly(&[-2, 0, 0, 1]);
        let s = splitting_field(&p).unwrap();

        assert_eq!(s.field.degree(), 6);
        assert_eq!(s.roots.len(), 3);

        let lifted = s.field.lift_rational(&p);
        for (r, e) in &s.roots {
            assert_eq!(*e, 1);
            assert_eq!(lifted.evaluate(r), s.field.zero());
        }
        assert_ne!(s.roots[0].0, s.roots[1].0);
        assert_ne!(s.roots[1].0, s.roots[2].0);
        assert_ne!(s.roots[0].0, s.roots[2].0);
    }

    #[test]
    fn multiplicities() {
        // (x^2-2)^2*(x+1)
        let p = &q_poly(&[-2, 0, 1]).pow(2) * &q_poly(&[1, 1]);
        let s = splitting_field(&p).unwrap();

        assert_eq!(s.minimal_polynomial(), &q_poly(&[-2, 0, 1]));
        assert_eq!(s.roots.len(), 3);
        assert_eq!(s.roots[0], (s.field.nth(-1), 1));
        assert_eq!(s.roots[1].1, 2);
        assert_eq!(s.roots[2].1, 2);
        assert_eq!(
            s.field.add(&s.roots[1].0, &s.roots[2].0),
            s.field.zero()
        );

        let rational = splitting_field(&q_poly(&[-6, 1, 1])).unwrap();
        assert_eq!(rational.field.degree(), 1);
        assert_eq!(rational.roots.len(), 2);

        let constant = splitting_field(&q_poly(&[3])).unwrap();
        assert!(constant.roots.is_empty());
    }
}
