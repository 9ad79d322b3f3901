use std::{
    fmt::Write,
    ops::{Add, Div, Mul, Neg, Sub},
    sync::Arc,
};

use crate::{
    domains::{integer::Integer, EuclideanDomain, Field, Ring, RingPrinter},
    printer::PrintOptions,
};

use super::Variable;

/// The ring of univariate polynomials over `R` in a fixed variable.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct UnivariatePolynomialRing<R: Ring> {
    ring: R,
    variable: Arc<Variable>,
}

impl<R: Ring> UnivariatePolynomialRing<R> {
    pub fn new(coeff_ring: R, var_map: Arc<Variable>) -> UnivariatePolynomialRing<R> {
        UnivariatePolynomialRing {
            ring: coeff_ring,
            variable: var_map,
        }
    }

    pub fn new_from_poly(poly: &UnivariatePolynomial<R>) -> UnivariatePolynomialRing<R> {
        UnivariatePolynomialRing {
            ring: poly.field.clone(),
            variable: poly.variable.clone(),
        }
    }

    /// Get the coefficient ring.
    pub fn coefficient_ring(&self) -> &R {
        &self.ring
    }
}

impl<R: Ring> std::fmt::Display for UnivariatePolynomialRing<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.ring, self.variable)
    }
}

impl<R: EuclideanDomain> Ring for UnivariatePolynomialRing<R> {
    type Element = UnivariatePolynomial<R>;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a + b
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a - b
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a * b
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = std::mem::replace(a, b.zero()) + b.clone();
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = std::mem::replace(a, b.zero()) - b.clone();
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = std::mem::replace(a, b.zero()) * b;
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = std::mem::replace(a, b.zero()) + b * c
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = std::mem::replace(a, b.zero()) - b * c
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        a.clone().neg()
    }

    fn zero(&self) -> Self::Element {
        UnivariatePolynomial::new(&self.ring, None, self.variable.clone())
    }

    fn one(&self) -> Self::Element {
        self.zero().one()
    }

    fn nth(&self, n: i64) -> Self::Element {
        self.zero().constant(self.ring.nth(n))
    }

    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        b.pow(e as usize)
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn one_is_gcd_unit() -> bool {
        false
    }

    fn characteristic(&self) -> Integer {
        self.ring.characteristic()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if b.is_zero() {
            return None;
        }
        a.divides(b)
    }

    fn fmt_display(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        in_product: bool,
        f: &mut std::fmt::Formatter<'_>,
    ) -> Result<(), std::fmt::Error> {
        if f.sign_plus() {
            f.write_str("+")?;
        }

        let needs_parentheses = in_product && element.coefficients.len() > 1;
        if needs_parentheses {
            f.write_str("(")?;
        }

        element.format(opts, f)?;

        if needs_parentheses {
            f.write_str(")")?;
        }

        Ok(())
    }
}

impl<F: Field> EuclideanDomain for UnivariatePolynomialRing<F> {
    fn rem(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.rem(b)
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        a.quot_rem(b)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.gcd(b)
    }
}

/// A dense univariate polynomial.
#[derive(Clone)]
pub struct UnivariatePolynomial<F: Ring> {
    pub coefficients: Vec<F::Element>,
    pub variable: Arc<Variable>,
    pub field: F,
}

impl<F: Ring> std::fmt::Debug for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for c in self.coefficients.iter() {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{{ {:?} }}", c)?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring> std::fmt::Display for UnivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.format(&PrintOptions::default(), f)
    }
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// variable and field are inherited.
    #[inline]
    pub fn new(field: &F, cap: Option<usize>, variable: Arc<Variable>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            field: field.clone(),
            variable,
        }
    }

    /// Constructs a polynomial from a list of coefficients, starting at the constant term.
    pub fn from_coefficients(field: &F, coefficients: Vec<F::Element>, variable: Arc<Variable>) -> Self {
        let mut p = Self {
            coefficients,
            field: field.clone(),
            variable,
        };
        p.truncate();
        p
    }

    /// Constructs a zero polynomial, inheriting the field and variable from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a constant polynomial,
    /// inheriting the field and variable from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a polynomial that is one, inheriting the field and variable from `self`.
    #[inline]
    pub fn one(&self) -> Self {
        Self {
            coefficients: vec![self.field.one()],
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// Constructs a polynomial with a single term.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponent: usize) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        let mut coefficients = vec![self.field.zero(); exponent + 1];
        coefficients[exponent] = coeff;

        Self {
            coefficients,
            field: self.field.clone(),
            variable: self.variable.clone(),
        }
    }

    /// The polynomial `x`.
    pub fn variable_power(&self, exponent: usize) -> Self {
        self.monomial(self.field.one(), exponent)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.coefficients.len() == 1 && self.field.is_one(&self.coefficients[0])
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coefficients.len() <= 1
    }

    /// Get the constant term of the polynomial.
    #[inline]
    pub fn get_constant(&self) -> F::Element {
        if self.is_zero() {
            return self.field.zero();
        }

        self.coefficients[0].clone()
    }

    /// Get the coefficient of `x^e`.
    pub fn coefficient(&self, e: usize) -> F::Element {
        self.coefficients
            .get(e)
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// Get a copy of the variable.
    pub fn get_var(&self) -> Arc<Variable> {
        self.variable.clone()
    }

    /// Get the leading coefficient.
    pub fn lcoeff(&self) -> F::Element {
        self.coefficients
            .last()
            .cloned()
            .unwrap_or_else(|| self.field.zero())
    }

    /// The degree of the polynomial. The zero polynomial has degree 0.
    pub fn degree(&self) -> usize {
        if self.is_zero() {
            return 0;
        }

        self.coefficients.len() - 1
    }

    /// Compute `self^pow`.
    pub fn pow(&self, mut pow: usize) -> Self {
        if pow == 0 {
            return self.one();
        }

        let mut x = self.clone();
        let mut y = self.one();
        while pow != 1 {
            if pow % 2 == 1 {
                y = &y * &x;
                pow -= 1;
            }

            x = &x * &x;
            pow /= 2;
        }

        x * &y
    }

    /// Multiply by `x^exp`.
    pub fn mul_exp(&self, exp: usize) -> Self {
        if exp == 0 || self.is_zero() {
            return self.clone();
        }

        let mut a = self.zero();
        a.coefficients = vec![self.field.zero(); self.degree() + exp + 1];

        for (cn, c) in a.coefficients.iter_mut().skip(exp).zip(&self.coefficients) {
            *cn = c.clone();
        }

        a
    }

    pub fn mul_coeff(mut self, coeff: &F::Element) -> Self {
        for c in &mut self.coefficients {
            if !F::is_zero(c) {
                self.field.mul_assign(c, coeff);
            }
        }

        self.truncate();
        self
    }

    pub(crate) fn truncate(&mut self) {
        let d = self
            .coefficients
            .iter_mut()
            .rev()
            .position(|c| !F::is_zero(c))
            .unwrap_or(self.coefficients.len());

        self.coefficients.truncate(self.coefficients.len() - d);
    }

    /// Evaluate the polynomial at `x` using Horner's scheme.
    pub fn evaluate(&self, x: &F::Element) -> F::Element {
        let mut res = self.field.zero();
        for c in self.coefficients.iter().rev() {
            self.field.mul_assign(&mut res, x);
            self.field.add_assign(&mut res, c);
        }
        res
    }

    /// Compute `self(g(x))`.
    pub fn compose(&self, g: &Self) -> Self {
        let mut res = self.zero();
        for c in self.coefficients.iter().rev() {
            res = &res * g + self.constant(c.clone());
        }
        res
    }

    /// Compute the derivative.
    pub fn derivative(&self) -> Self {
        if self.is_constant() {
            return self.zero();
        }

        let mut res = self.zero();
        res.coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(e, c)| self.field.mul(c, &self.field.nth(e as i64)))
            .collect();
        res.truncate();
        res
    }

    /// Apply a function `f` to each coefficient, yielding a polynomial over `field`.
    pub fn map_coeff<G: Ring>(
        &self,
        f: impl Fn(&F::Element) -> G::Element,
        field: G,
    ) -> UnivariatePolynomial<G> {
        let mut r = UnivariatePolynomial {
            coefficients: self.coefficients.iter().map(f).collect(),
            variable: self.variable.clone(),
            field,
        };
        r.truncate();
        r
    }

    /// Write the polynomial with the highest power first.
    pub fn format(&self, opts: &PrintOptions, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        let v = self.variable.to_string();

        let mut first = true;
        for (e, c) in self.coefficients.iter().enumerate().rev() {
            if F::is_zero(c) {
                continue;
            }

            let mut coeff = String::new();
            write!(
                coeff,
                "{}",
                RingPrinter {
                    ring: &self.field,
                    element: c,
                    opts: *opts,
                    in_product: false,
                }
            )?;

            if e > 0 && coeff.len() > 1 && coeff[1..].contains(['+', '-']) {
                coeff = format!("({})", coeff);
            }

            if !first && !coeff.starts_with('-') {
                f.write_char('+')?;
            }
            first = false;

            if e == 0 {
                f.write_str(&coeff)?;
                continue;
            }

            match coeff.as_str() {
                "1" => {}
                "-1" => f.write_char('-')?,
                _ => {
                    f.write_str(&coeff)?;
                    f.write_char(opts.multiplication_operator)?;
                }
            }

            if e == 1 {
                f.write_str(&v)?;
            } else {
                write!(f, "{}^{}", v, e)?;
            }
        }

        Ok(())
    }
}

impl<F: Ring> PartialEq for UnivariatePolynomial<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.coefficients != other.coefficients {
            return false;
        }

        self.is_constant() || self.variable == other.variable
    }
}

impl<F: Ring> std::hash::Hash for UnivariatePolynomial<F> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
    }
}

impl<F: Ring> Eq for UnivariatePolynomial<F> {}

impl<F: Ring> Add for UnivariatePolynomial<F> {
    type Output = Self;

    fn add(mut self, mut other: Self) -> Self::Output {
        if self.is_zero() {
            return other;
        }
        if other.is_zero() {
            return self;
        }

        if self.coefficients.len() < other.coefficients.len() {
            std::mem::swap(&mut self, &mut other);
        }

        for (i, c) in other.coefficients.iter().enumerate() {
            self.field.add_assign(&mut self.coefficients[i], c);
        }

        self.truncate();

        self
    }
}

impl<'a, 'b, F: Ring> Add<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn add(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (self.clone()).add(other.clone())
    }
}

impl<F: Ring> Sub for UnivariatePolynomial<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add(other.neg())
    }
}

impl<'a, 'b, F: Ring> Sub<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn sub(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (self.clone()).add(other.clone().neg())
    }
}

impl<F: Ring> Neg for UnivariatePolynomial<F> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, 'b, F: Ring> Mul<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    #[inline]
    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return self.zero();
        }

        let n = self.degree();
        let m = rhs.degree();

        let mut res = self.zero();
        res.coefficients = vec![self.field.zero(); n + m + 1];

        for (e1, c1) in self.coefficients.iter().enumerate() {
            if F::is_zero(c1) {
                continue;
            }

            for (e2, c2) in rhs.coefficients.iter().enumerate() {
                if !F::is_zero(c2) {
                    self.field
                        .add_mul_assign(&mut res.coefficients[e1 + e2], c1, c2);
                }
            }
        }

        res.truncate();
        res
    }
}

impl<'a, F: Ring> Mul<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    #[inline]
    fn mul(self, rhs: &'a UnivariatePolynomial<F>) -> Self::Output {
        (&self) * rhs
    }
}

impl<'a, 'b, F: EuclideanDomain> Div<&'a UnivariatePolynomial<F>> for &'b UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn div(self, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        self.divides(other)
            .unwrap_or_else(|| panic!("No clean division of {} by {}", self, other))
    }
}

impl<'a, F: EuclideanDomain> Div<&'a UnivariatePolynomial<F>> for UnivariatePolynomial<F> {
    type Output = UnivariatePolynomial<F>;

    fn div(self: UnivariatePolynomial<F>, other: &'a UnivariatePolynomial<F>) -> Self::Output {
        (&self).div(other)
    }
}

impl<F: EuclideanDomain> UnivariatePolynomial<F> {
    /// Get the content from the coefficients.
    pub fn content(&self) -> F::Element {
        let mut c = self.field.zero();
        for cc in &self.coefficients {
            // early return if possible (not possible for rationals)
            if F::one_is_gcd_unit() && self.field.is_one(&c) {
                break;
            }

            c = self.field.gcd(&c, cc);
        }
        c
    }

    /// Divide every coefficient with `other`.
    pub fn div_coeff(mut self, other: &F::Element) -> Self {
        for c in &mut self.coefficients {
            let (quot, rem) = self.field.quot_rem(c, other);
            debug_assert!(F::is_zero(&rem));
            *c = quot;
        }
        self
    }

    /// Make the polynomial primitive by removing the content.
    pub fn make_primitive(self) -> Self {
        if self.is_zero() {
            return self;
        }

        let c = self.content();
        self.div_coeff(&c)
    }

    /// Return `self / div` if the division is exact.
    pub fn divides(&self, div: &UnivariatePolynomial<F>) -> Option<UnivariatePolynomial<F>> {
        if div.is_zero() {
            panic!("Cannot divide by 0 polynomial");
        }

        if self.is_zero() {
            return Some(self.clone());
        }

        if self.degree() < div.degree() {
            return None;
        }

        // check if the leading coefficients divide
        if !F::is_zero(&self.field.rem(&self.lcoeff(), &div.lcoeff())) {
            return None;
        }

        let (a, b) = self.quot_rem(div);
        if b.is_zero() {
            Some(a)
        } else {
            None
        }
    }

    /// Compute the remainder `self % div`.
    pub fn rem(&self, div: &UnivariatePolynomial<F>) -> Self {
        self.quot_rem(div).1
    }

    /// Divide with remainder. If a leading coefficient division is not exact,
    /// the quotient is returned as zero together with the partial remainder.
    pub fn quot_rem(&self, div: &Self) -> (Self, Self) {
        if div.is_zero() {
            panic!("Cannot divide by 0");
        }

        if self.is_zero() || self.degree() < div.degree() {
            return (self.zero(), self.clone());
        }

        let mut n = self.degree();
        let m = div.degree();

        let mut q = self.zero();
        q.coefficients = vec![self.field.zero(); n - m + 1];

        let mut r = self.clone();

        while n >= m {
            let (qq, rr) = self
                .field
                .quot_rem(&r.coefficients[n], &div.coefficients[m]);
            if !F::is_zero(&rr) {
                return (self.zero(), r);
            }

            r = r - div.mul_exp(n - m).mul_coeff(&qq);
            q.coefficients[n - m] = qq;

            if r.is_zero() {
                break;
            }

            n = r.degree();
        }

        q.truncate();

        (q, r)
    }

    /// Compute the pseudo-remainder `lcoeff(div)^(deg(self)-deg(div)+1) * self % div`
    /// without any coefficient division.
    pub fn pseudo_rem(&self, div: &Self) -> Self {
        if div.is_zero() {
            panic!("Cannot divide by 0");
        }

        if self.degree() < div.degree() {
            return self.clone();
        }

        let m = div.degree();
        let l = div.lcoeff();
        let mut e = self.degree() - m + 1;
        let mut r = self.clone();
        while !r.is_zero() && r.degree() >= m {
            let t = div.mul_exp(r.degree() - m).mul_coeff(&r.lcoeff());
            r = r.mul_coeff(&l) - t;
            e -= 1;
        }

        r.mul_coeff(&self.field.pow(&l, e as u64))
    }
}

impl<F: Field> UnivariatePolynomial<F> {
    /// Compute the univariate GCD using Euclid's algorithm. The result is normalized to 1.
    pub fn gcd(&self, b: &Self) -> Self {
        if self.is_zero() {
            return b.clone().make_monic();
        }
        if b.is_zero() {
            return self.clone().make_monic();
        }

        let mut c = self.clone();
        let mut d = b.clone();
        if self.degree() < b.degree() {
            std::mem::swap(&mut c, &mut d);
        }

        let mut r = c.quot_rem(&d).1;
        while !r.is_zero() {
            c = d;
            d = r;
            r = c.quot_rem(&d).1;
        }

        d.make_monic()
    }

    /// Divide by the leading coefficient.
    pub fn make_monic(self) -> Self {
        if self.is_zero() || self.field.is_one(&self.lcoeff()) {
            return self;
        }

        let inv = self.field.inv(&self.lcoeff());
        self.mul_coeff(&inv)
    }

    /// Compute `(g, s, t)` where `self * s + other * t = g`
    /// and `g` is the monic gcd.
    pub fn eea(&self, other: &Self) -> (Self, Self, Self) {
        let mut r0 = self.clone();
        let mut r1 = other.clone();
        let mut s0 = self.one();
        let mut s1 = self.zero();
        let mut t0 = self.zero();
        let mut t1 = self.one();

        while !r1.is_zero() {
            let (q, r) = r0.quot_rem(&r1);
            (r0, r1) = (r1, r);
            let s = &s0 - &(&q * &s1);
            (s0, s1) = (s1, s);
            let t = &t0 - &(&q * &t1);
            (t0, t1) = (t1, t);
        }

        if r0.is_zero() {
            return (r0, s0, t0);
        }

        let inv = self.field.inv(&r0.lcoeff());
        (r0.mul_coeff(&inv), s0.mul_coeff(&inv), t0.mul_coeff(&inv))
    }

    /// Compute `self^e % m` by repeated squaring.
    pub fn exp_mod(&self, e: &Integer, m: &Self) -> Self {
        let b = self.rem(m);
        let mut r = self.one().rem(m);
        for i in (0..e.significant_bits()).rev() {
            r = (&r * &r).rem(m);
            if e.get_bit(i) {
                r = (&r * &b).rem(m);
            }
        }
        r
    }
}
