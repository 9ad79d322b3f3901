//! Algebraic number fields, e.g. fields supporting sqrt(2).

use std::{
    fmt::{Display, Error, Formatter},
    sync::Arc,
};

use rug::ops::Pow;

use crate::{
    poly::{
        polynomial::{ConversionError, Exponent, MultivariatePolynomial},
        univariate::UnivariatePolynomial,
        Variable,
    },
    printer::PrintOptions,
    tensors::matrix::{Matrix, MatrixError},
};

use super::{
    integer::{lcm, Integer, SMALL_PRIMES},
    rational::{Rational, RationalField, Q},
    EuclideanDomain, Field, Ring,
};

/// Errors that occur when building number fields or converting polynomials over them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumberFieldError {
    /// A root was requested from a polynomial that is not linear.
    NotLinear { degree: usize },
    /// A number field cannot be defined by a constant polynomial.
    ConstantPolynomial,
    Conversion(ConversionError),
}

impl Display for NumberFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberFieldError::NotLinear { degree } => {
                write!(f, "Expected a linear polynomial, but it has degree {}", degree)
            }
            NumberFieldError::ConstantPolynomial => {
                write!(f, "A constant polynomial does not define a number field")
            }
            NumberFieldError::Conversion(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for NumberFieldError {}

impl From<ConversionError> for NumberFieldError {
    fn from(e: ConversionError) -> Self {
        NumberFieldError::Conversion(e)
    }
}

/// An algebraic number field `Q[x]/(f)`, defined by a monic, integral and irreducible polynomial `f`.
///
/// The field is built from any irreducible rational polynomial `m` with root `α`.
/// The stored polynomial is `f(x) = c^n m(x/c)/lc(m)`, where `c` clears the denominators,
/// so that the generator of the field is `θ = c*α`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use numfield::{
///     domains::{algebraic_number::AlgebraicExtension, rational::{Rational, Q}, Ring},
///     poly::{univariate::UnivariatePolynomial, Variable},
/// };
///
/// let x = Arc::new(Variable::new("x"));
/// let m = UnivariatePolynomial::from_coefficients(
///     &Q,
///     vec![Rational::from(-2), 0.into(), 1.into()],
///     x,
/// );
/// let field = AlgebraicExtension::new(&m).unwrap();
///
/// let sqrt_2 = field.generator();
/// assert_eq!(field.mul(&sqrt_2, &sqrt_2), field.nth(2));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AlgebraicExtension {
    poly: Arc<UnivariatePolynomial<RationalField>>,
    scale: Integer,
}

/// The least `c > 0` such that `d` divides `c^k`. Prime factors of `d` that are not
/// small primes are kept with their full multiplicity.
fn least_root_multiple(d: &Integer, k: u32) -> Integer {
    let mut rest = d.clone();
    let mut c = Integer::from(1);

    for p in SMALL_PRIMES {
        if rest == 1 {
            break;
        }

        let mut e = 0;
        while rest.is_divisible(&Integer::from(p)) {
            rest /= p;
            e += 1;
        }

        if e > 0 {
            c *= Integer::from(p).pow((e + k - 1) / k);
        }
    }

    c * rest
}

impl AlgebraicExtension {
    /// Create a new number field from the polynomial `min_poly`, which must be irreducible
    /// over the rationals. This is not checked.
    pub fn new(
        min_poly: &UnivariatePolynomial<RationalField>,
    ) -> Result<AlgebraicExtension, NumberFieldError> {
        if min_poly.is_constant() {
            return Err(NumberFieldError::ConstantPolynomial);
        }

        let n = min_poly.degree();
        let monic = min_poly.clone().make_monic();

        let mut scale = Integer::from(1);
        for (i, a) in monic.coefficients.iter().enumerate().take(n) {
            if *a.denom() != 1 {
                scale = lcm(&scale, &least_root_multiple(a.denom(), (n - i) as u32));
            }
        }

        let mut poly = monic;
        for (i, a) in poly.coefficients.iter_mut().enumerate().take(n) {
            *a *= Rational::from(scale.clone().pow((n - i) as u32));
        }

        Ok(AlgebraicExtension {
            poly: Arc::new(poly),
            scale,
        })
    }

    /// The rational numbers as a number field of degree 1, with minimal polynomial `var`.
    pub fn rationals(var: Arc<Variable>) -> AlgebraicExtension {
        let zero = UnivariatePolynomial::new(&Q, None, var);
        AlgebraicExtension {
            poly: Arc::new(zero.variable_power(1)),
            scale: Integer::from(1),
        }
    }

    /// The degree of the field over the rationals.
    pub fn degree(&self) -> usize {
        self.poly.degree()
    }

    /// Get the monic integral minimal polynomial of the generator.
    pub fn poly(&self) -> &UnivariatePolynomial<RationalField> {
        &self.poly
    }

    /// The factor `c` relating the generator to the root `α` of the defining polynomial, `θ = c*α`.
    pub fn scale(&self) -> &Integer {
        &self.scale
    }

    pub fn variable(&self) -> Arc<Variable> {
        self.poly.variable.clone()
    }

    /// The generator `θ` of the field, a root of [Self::poly].
    pub fn generator(&self) -> AlgebraicNumber {
        self.make_elem(&self.poly.variable_power(1))
    }

    /// The root `α = θ/c` of the polynomial the field was constructed from.
    pub fn original_root(&self) -> AlgebraicNumber {
        let g = self.generator();
        AlgebraicNumber {
            poly: g.poly.div_coeff(&Rational::from(self.scale.clone())),
        }
    }

    /// Create the element `p(θ)`, reduced modulo the minimal polynomial.
    pub fn make_elem(&self, p: &UnivariatePolynomial<RationalField>) -> AlgebraicNumber {
        let mut p = p.clone();
        p.variable = self.poly.variable.clone();
        self.reduce(p)
    }

    /// Create the element `p(α)`, where `α` is the root of the polynomial the field was constructed from.
    pub fn from_original(&self, p: &UnivariatePolynomial<RationalField>) -> AlgebraicNumber {
        let alpha = self.original_root();
        let mut res = self.zero();
        for c in p.coefficients.iter().rev() {
            res = self.add(&self.mul(&res, &alpha), &self.constant(c.clone()));
        }
        res
    }

    fn reduce(&self, p: UnivariatePolynomial<RationalField>) -> AlgebraicNumber {
        if p.is_zero() || p.degree() < self.degree() {
            AlgebraicNumber { poly: p }
        } else {
            AlgebraicNumber {
                poly: p.rem(&self.poly),
            }
        }
    }

    pub fn constant(&self, c: Rational) -> AlgebraicNumber {
        AlgebraicNumber {
            poly: self.poly.constant(c),
        }
    }

    /// The coordinates of `x` in the power basis `1, θ, ..., θ^(n-1)`.
    pub fn coefficients(&self, x: &AlgebraicNumber) -> Vec<Rational> {
        (0..self.degree()).map(|i| x.poly.coefficient(i)).collect()
    }

    /// Create an element from its coordinates in the power basis.
    pub fn from_coefficients(&self, c: &[Rational]) -> AlgebraicNumber {
        self.make_elem(&UnivariatePolynomial::from_coefficients(
            &Q,
            c.to_vec(),
            self.poly.variable.clone(),
        ))
    }

    /// The matrix of multiplication by `x` on the power basis,
    /// where row `i` holds the coordinates of `x*θ^i`.
    pub fn multiplication_matrix(&self, x: &AlgebraicNumber) -> Matrix<RationalField> {
        let n = self.degree();
        let theta = self.generator();

        let mut data = Vec::with_capacity(n * n);
        let mut cur = x.clone();
        for _ in 0..n {
            data.extend(self.coefficients(&cur));
            cur = self.mul(&cur, &theta);
        }

        Matrix {
            data,
            nrows: n as u32,
            ncols: n as u32,
            field: Q,
        }
    }

    /// The norm of `x` over the rationals.
    pub fn norm(&self, x: &AlgebraicNumber) -> Rational {
        match self.multiplication_matrix(x).det() {
            Ok(d) => d,
            Err(e) => unreachable!("The multiplication matrix is square: {}", e),
        }
    }

    /// The trace of `x` over the rationals.
    pub fn trace(&self, x: &AlgebraicNumber) -> Rational {
        match self.multiplication_matrix(x).trace() {
            Ok(t) => t,
            Err(e) => unreachable!("The multiplication matrix is square: {}", e),
        }
    }

    /// Compute the monic minimal polynomial of `x` by finding the first
    /// linear relation between the powers `1, x, x^2, ...`.
    pub fn compute_min_poly(&self, x: &AlgebraicNumber) -> UnivariatePolynomial<RationalField> {
        let n = self.degree();

        let mut powers = vec![self.coefficients(&self.one())];
        let mut cur = self.one();
        for k in 1..=n {
            cur = self.mul(&cur, x);
            let rhs = self.coefficients(&cur);

            // column i holds the coordinates of x^i
            let mut a = Matrix::new(n as u32, k as u32, Q);
            for (i, p) in powers.iter().enumerate() {
                for (r, c) in p.iter().enumerate() {
                    a[(r as u32, i as u32)] = c.clone();
                }
            }

            match a.solve(&Matrix::new_vec(rhs.clone(), Q)) {
                Ok(sol) => {
                    let mut coeffs: Vec<Rational> = sol.data.into_iter().map(|c| -c).collect();
                    coeffs.push(Rational::from(1));
                    return UnivariatePolynomial::from_coefficients(
                        &Q,
                        coeffs,
                        self.poly.variable.clone(),
                    );
                }
                Err(MatrixError::Inconsistent) => powers.push(rhs),
                Err(e) => unreachable!("Powers of an algebraic number are dependent: {}", e),
            }
        }

        unreachable!("The minimal polynomial of {} has a degree above {}", x, n)
    }

    /// Test if `x` is an algebraic integer.
    pub fn is_integral(&self, x: &AlgebraicNumber) -> bool {
        self.compute_min_poly(x)
            .coefficients
            .iter()
            .all(|c| *c.denom() == 1)
    }

    /// Convert a polynomial in two variables to a polynomial over the number field,
    /// where variable 0 is the generator and variable 1 is the polynomial variable.
    pub fn lift(
        &self,
        p: &MultivariatePolynomial<RationalField>,
    ) -> Result<UnivariatePolynomial<AlgebraicExtension>, NumberFieldError> {
        if p.nvars() != 2 {
            Err(ConversionError::VariableCount {
                expected: 2,
                found: p.nvars(),
            })?;
        }

        let var = Arc::new(p.get_vars_ref()[1].clone());
        let zero = UnivariatePolynomial::new(&Q, None, self.poly.variable.clone());

        let mut coeffs = vec![zero.clone(); p.degree(1) as usize + 1];
        for t in p {
            coeffs[t.exponents[1] as usize] = &coeffs[t.exponents[1] as usize]
                + &zero.monomial(t.coefficient.clone(), t.exponents[0] as usize);
        }

        Ok(UnivariatePolynomial::from_coefficients(
            self,
            coeffs.into_iter().map(|c| self.reduce(c)).collect(),
            var,
        ))
    }

    /// Embed a rational polynomial into the polynomials over the number field.
    pub fn lift_rational(
        &self,
        p: &UnivariatePolynomial<RationalField>,
    ) -> UnivariatePolynomial<AlgebraicExtension> {
        p.map_coeff(|c| self.constant(c.clone()), self.clone())
    }

    /// Convert a polynomial over the number field to a rational polynomial in the generator
    /// (variable 0) and the polynomial variable (variable 1).
    pub fn de_lift(
        &self,
        p: &UnivariatePolynomial<AlgebraicExtension>,
    ) -> MultivariatePolynomial<RationalField> {
        let mut res = MultivariatePolynomial::new(
            &Q,
            None,
            Arc::new(vec![
                self.poly.variable.as_ref().clone(),
                p.variable.as_ref().clone(),
            ]),
        );

        for (i, c) in p.coefficients.iter().enumerate() {
            for (j, cc) in c.poly.coefficients.iter().enumerate() {
                if *cc != 0 {
                    res.append_monomial(cc.clone(), &[j as Exponent, i as Exponent]);
                }
            }
        }

        res
    }

    /// Get the root `-p_0/p_1` of a linear polynomial.
    pub fn extract_root_from_linear(
        &self,
        p: &UnivariatePolynomial<AlgebraicExtension>,
    ) -> Result<AlgebraicNumber, NumberFieldError> {
        if p.degree() != 1 || p.is_zero() {
            return Err(NumberFieldError::NotLinear {
                degree: p.degree(),
            });
        }

        Ok(self.neg(&self.div(&p.coefficients[0], &p.coefficients[1])))
    }

    /// Factor a square-free polynomial over the number field into monic irreducible factors.
    pub fn factor_square_free_poly(
        &self,
        p: &UnivariatePolynomial<AlgebraicExtension>,
    ) -> Vec<UnivariatePolynomial<AlgebraicExtension>> {
        p.factor_square_free()
    }
}

impl std::fmt::Debug for AlgebraicExtension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q[{}]/({:?})", self.poly.variable, self.poly)
    }
}

impl Display for AlgebraicExtension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q[{}]/({})", self.poly.variable, self.poly)
    }
}

/// A number in an algebraic number field, stored as its reduced
/// representative polynomial in the generator of the field.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AlgebraicNumber {
    pub(crate) poly: UnivariatePolynomial<RationalField>,
}

impl std::fmt::Debug for AlgebraicNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.poly)
    }
}

impl Display for AlgebraicNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.poly)
    }
}

impl AlgebraicNumber {
    /// The reduced representative of the number.
    pub fn poly(&self) -> &UnivariatePolynomial<RationalField> {
        &self.poly
    }

    pub fn into_poly(self) -> UnivariatePolynomial<RationalField> {
        self.poly
    }

    pub fn mul_coeff(self, c: &Rational) -> Self {
        AlgebraicNumber {
            poly: self.poly.mul_coeff(c),
        }
    }
}

impl Ring for AlgebraicExtension {
    type Element = AlgebraicNumber;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        AlgebraicNumber {
            poly: &a.poly + &b.poly,
        }
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        AlgebraicNumber {
            poly: &a.poly - &b.poly,
        }
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.reduce(&a.poly * &b.poly)
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.add(a, &self.mul(b, c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.sub(a, &self.mul(b, c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        AlgebraicNumber {
            poly: -a.poly.clone(),
        }
    }

    fn zero(&self) -> Self::Element {
        AlgebraicNumber {
            poly: self.poly.zero(),
        }
    }

    fn one(&self) -> Self::Element {
        AlgebraicNumber {
            poly: self.poly.one(),
        }
    }

    fn nth(&self, n: i64) -> Self::Element {
        self.constant(Rational::from(n))
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut result = self.one();
        let mut x = b.clone();
        while e > 0 {
            if e % 2 == 1 {
                result = self.mul(&result, &x);
            }
            e /= 2;
            if e > 0 {
                x = self.mul(&x, &x);
            }
        }
        result
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.poly.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.poly.is_one()
    }

    fn one_is_gcd_unit() -> bool {
        true
    }

    fn characteristic(&self) -> Integer {
        Integer::new()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if Self::is_zero(b) {
            None
        } else {
            Some(self.div(a, b))
        }
    }

    fn fmt_display(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        in_product: bool,
        f: &mut Formatter<'_>,
    ) -> Result<(), Error> {
        if f.sign_plus() {
            f.write_str("+")?;
        }

        let nterms = element.poly.coefficients.iter().filter(|c| **c != 0).count();
        let needs_parentheses =
            (in_product && nterms > 1) || (opts.explicit_rational_polynomial && nterms > 0);

        if needs_parentheses {
            f.write_str("(")?;
        }

        element.poly.format(opts, f)?;

        if opts.explicit_rational_polynomial {
            f.write_str(" % ")?;
            self.poly.format(opts, f)?;
        }

        if needs_parentheses {
            f.write_str(")")?;
        }

        Ok(())
    }
}

impl EuclideanDomain for AlgebraicExtension {
    fn rem(&self, _a: &Self::Element, _b: &Self::Element) -> Self::Element {
        self.zero()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), self.zero())
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if Self::is_zero(a) && Self::is_zero(b) {
            self.zero()
        } else {
            self.one()
        }
    }
}

impl Field for AlgebraicExtension {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        if a.poly.is_zero() {
            panic!("Division by zero");
        }

        // a*s + f*t = 1, since f is irreducible
        let (g, s, _) = a.poly.eea(&self.poly);
        debug_assert!(g.is_one());
        self.reduce(s)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::{
            rational::{Rational, RationalField, Q},
            Field, Ring,
        },
        poly::{polynomial::MultivariatePolynomial, univariate::UnivariatePolynomial, Variable},
        printer::PrintOptions,
    };

    use super::{AlgebraicExtension, NumberFieldError};

    fn q_poly(var: &str, c: &[(i64, i64)]) -> UnivariatePolynomial<RationalField> {
        UnivariatePolynomial::from_coefficients(
            &Q,
            c.iter().map(|x| Rational::from(*x)).collect(),
            Arc::new(Variable::new(var)),
        )
    }

    fn sqrt_2() -> AlgebraicExtension {
        AlgebraicExtension::new(&q_poly("a", &[(-2, 1), (0, 1), (1, 1)])).unwrap()
    }

    #[test]
    fn arithmetic() {
        let field = sqrt_2();
        let a = field.generator();

        assert_eq!(field.degree(), 2);
        assert_eq!(field.compute_min_poly(&a), *field.poly());
        assert_eq!(field.mul(&a, &a), field.nth(2));

        let inv = field.inv(&a);
        assert_eq!(inv, field.make_elem(&q_poly("a", &[(0, 1), (1, 2)])));
        assert_eq!(field.mul(&a, &inv), field.one());

        assert_eq!(field.pow(&a, 5), field.mul(&field.nth(4), &a));
        assert_eq!(field.try_div(&a, &field.zero()), None);
        assert_eq!(format!("{}", field.add(&a, &field.one())), "a+1");
        assert_eq!(
            format!(
                "{}",
                crate::domains::RingPrinter {
                    ring: &field,
                    element: &a,
                    opts: PrintOptions {
                        explicit_rational_polynomial: true,
                        ..PrintOptions::default()
                    },
                    in_product: false
                }
            ),
            "(a % a^2-2)"
        );
    }

    #[test]
    fn reduction() {
        let field = sqrt_2();
        let p = q_poly("a", &[(1, 1), (2, 1), (3, 1), (1, 1)]);
        let x = field.make_elem(&p);
        // a^3 + 3a^2 + 2a + 1 = 2a + 6 + 2a + 1
        assert_eq!(x, field.make_elem(&q_poly("a", &[(7, 1), (4, 1)])));
        assert_eq!(field.make_elem(x.poly()), x);
        assert_eq!(field.from_coefficients(&field.coefficients(&x)), x);
    }

    #[test]
    fn rescaled() {
        // 2x^2 - 3 has root sqrt(3/2), the generator is sqrt(6)
        let field = AlgebraicExtension::new(&q_poly("x", &[(-3, 1), (0, 1), (2, 1)])).unwrap();
        assert_eq!(*field.poly(), q_poly("x", &[(-6, 1), (0, 1), (1, 1)]));
        assert_eq!(*field.scale(), 2);

        let alpha = field.original_root();
        assert_eq!(field.mul(&alpha, &alpha), field.constant((3, 2).into()));
        assert_eq!(
            field.from_original(&q_poly("y", &[(-3, 1), (0, 1), (2, 1)])),
            field.zero()
        );

        assert_eq!(
            AlgebraicExtension::new(&q_poly("x", &[(5, 1)])),
            Err(NumberFieldError::ConstantPolynomial)
        );
    }

    #[test]
    fn norm_and_trace() {
        let field = sqrt_2();
        let x = field.add(&field.generator(), &field.one());
        assert_eq!(field.norm(&x), -1);
        assert_eq!(field.trace(&x), 2);
        assert_eq!(field.compute_min_poly(&x), q_poly("a", &[(-1, 1), (-2, 1), (1, 1)]));
        assert_eq!(field.compute_min_poly(&field.nth(3)), q_poly("a", &[(-3, 1), (1, 1)]));

        assert!(field.is_integral(&x));
        assert!(!field.is_integral(&field.inv(&field.generator())));

        let golden = AlgebraicExtension::new(&q_poly("b", &[(-5, 1), (0, 1), (1, 1)])).unwrap();
        let phi = golden.make_elem(&q_poly("b", &[(1, 2), (1, 2)]));
        assert!(golden.is_integral(&phi));
        assert_eq!(golden.norm(&phi), -1);
    }

    #[test]
    fn lift() {
        let field = sqrt_2();
        let vars = Arc::new(vec![Variable::new("a"), Variable::new("y")]);
        let zero = MultivariatePolynomial::new(&Q, None, vars);

        // 2*a*y^2 + 3*y - a + a^3
        let p = zero.monomial((2, 1).into(), vec![1, 2])
            + zero.monomial((3, 1).into(), vec![0, 1])
            + zero.monomial((-1, 1).into(), vec![1, 0]);
        let lifted = field.lift(&p).unwrap();
        assert_eq!(lifted.degree(), 2);
        assert_eq!(field.de_lift(&lifted), p);

        let q = p.clone() + zero.monomial((1, 1).into(), vec![3, 0]);
        let lifted_q = field.lift(&q).unwrap();
        // a^3 - a = a in the field
        assert_eq!(lifted_q.coefficients[0], field.generator());

        let x = Arc::new(Variable::new("x"));
        let uni = UnivariatePolynomial::from_coefficients(&Q, vec![Rational::from(1)], x);
        assert!(matches!(
            field.lift(&uni.make_multivariate()),
            Err(NumberFieldError::Conversion(_))
        ));
    }

    #[test]
    fn linear_root() {
        let field = sqrt_2();
        let a = field.generator();

        // 2y - 2a
        let p = UnivariatePolynomial::from_coefficients(
            &field,
            vec![field.neg(&field.mul(&field.nth(2), &a)), field.nth(2)],
            Arc::new(Variable::new("y")),
        );
        assert_eq!(field.extract_root_from_linear(&p), Ok(a));

        let q = &p * &p;
        assert_eq!(
            field.extract_root_from_linear(&q),
            Err(NumberFieldError::NotLinear { degree: 2 })
        );
    }
}
