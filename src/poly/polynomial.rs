use std::cmp::Ordering;
use std::fmt::{Display, Write};
use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use crate::domains::{Ring, RingPrinter};
use crate::printer::PrintOptions;

use super::univariate::UnivariatePolynomial;
use super::Variable;

/// The exponent type of multivariate polynomials.
pub type Exponent = u16;

/// An error that occurs when converting between polynomial representations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConversionError {
    /// More than one variable occurs with a positive degree.
    NotUnivariate { variables: Vec<String> },
    /// The polynomial has the wrong number of variables.
    VariableCount { expected: usize, found: usize },
}

impl Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::NotUnivariate { variables } => write!(
                f,
                "The polynomial depends on more than one variable: {}",
                variables.join(", ")
            ),
            ConversionError::VariableCount { expected, found } => write!(
                f,
                "Expected a polynomial in {} variables, but it has {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for ConversionError {}

/// A sparse multivariate polynomial. The terms are sorted in ascending
/// lexicographical order of their exponents and no coefficient is zero.
#[derive(Clone)]
pub struct MultivariatePolynomial<F: Ring> {
    pub coefficients: Vec<F::Element>,
    pub exponents: Vec<Exponent>,
    pub field: F,
    pub variables: Arc<Vec<Variable>>,
}

impl<F: Ring> MultivariatePolynomial<F> {
    /// Constructs a zero polynomial. Instead of using this constructor,
    /// prefer to create new polynomials from existing ones, so that the
    /// variable map and field are inherited.
    #[inline]
    pub fn new(field: &F, cap: Option<usize>, variables: Arc<Vec<Variable>>) -> Self {
        Self {
            coefficients: Vec::with_capacity(cap.unwrap_or(0)),
            exponents: Vec::with_capacity(cap.unwrap_or(0) * variables.len()),
            field: field.clone(),
            variables,
        }
    }

    /// Constructs a zero polynomial, inheriting the field and variable map from `self`.
    #[inline]
    pub fn zero(&self) -> Self {
        Self {
            coefficients: vec![],
            exponents: vec![],
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    /// Constructs a constant polynomial,
    /// inheriting the field and variable map from `self`.
    #[inline]
    pub fn constant(&self, coeff: F::Element) -> Self {
        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents: vec![0; self.nvars()],
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    #[inline]
    pub fn one(&self) -> Self {
        self.constant(self.field.one())
    }

    /// Constructs the polynomial `var^exp`.
    pub fn variable(&self, var: usize, exp: Exponent) -> Self {
        let mut e = vec![0; self.nvars()];
        e[var] = exp;
        self.monomial(self.field.one(), e)
    }

    /// Constructs a polynomial with a single term.
    #[inline]
    pub fn monomial(&self, coeff: F::Element, exponents: Vec<Exponent>) -> Self {
        debug_assert!(self.nvars() == exponents.len());

        if F::is_zero(&coeff) {
            return self.zero();
        }

        Self {
            coefficients: vec![coeff],
            exponents,
            field: self.field.clone(),
            variables: self.variables.clone(),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.nterms() == 0
    }

    #[inline]
    pub fn is_one(&self) -> bool {
        self.nterms() == 1
            && self.field.is_one(&self.coefficients[0])
            && self.exponents.iter().all(|x| *x == 0)
    }

    /// Returns the number of terms in the polynomial.
    #[inline]
    pub fn nterms(&self) -> usize {
        self.coefficients.len()
    }

    /// Returns the number of variables in the polynomial.
    #[inline]
    pub fn nvars(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if the polynomial is constant.
    #[inline]
    pub fn is_constant(&self) -> bool {
        match self.nterms() {
            0 => true,
            1 => self.exponents.iter().all(|e| *e == 0),
            _ => false,
        }
    }

    /// Get the constant term of the polynomial.
    pub fn get_constant(&self) -> F::Element {
        if self.is_zero() || !self.exponents(0).iter().all(|e| *e == 0) {
            return self.field.zero();
        }

        self.coefficients[0].clone()
    }

    /// Returns the slice for the exponents of the specified monomial.
    #[inline]
    pub fn exponents(&self, index: usize) -> &[Exponent] {
        &self.exponents[index * self.nvars()..(index + 1) * self.nvars()]
    }

    /// Returns an iterator over the exponents of every monomial.
    #[inline]
    pub fn exponents_iter(&self) -> std::slice::Chunks<Exponent> {
        self.exponents.chunks(self.nvars().max(1))
    }

    /// Get a copy of the variable list.
    pub fn get_vars(&self) -> Arc<Vec<Variable>> {
        self.variables.clone()
    }

    /// Get a reference to the variables list.
    pub fn get_vars_ref(&self) -> &[Variable] {
        self.variables.as_ref()
    }

    /// Iterate over the terms.
    pub fn terms(&self) -> MonomialViewIterator<F> {
        self.into_iter()
    }

    /// The highest power of `var` that occurs.
    pub fn degree(&self, var: usize) -> Exponent {
        self.exponents_iter().map(|e| e[var]).max().unwrap_or(0)
    }

    /// Appends a monomial to the polynomial, keeping the terms sorted.
    pub fn append_monomial(&mut self, coefficient: F::Element, exponents: &[Exponent]) {
        if F::is_zero(&coefficient) {
            return;
        }
        if self.nvars() != exponents.len() {
            panic!(
                "nvars mismatched: got {}, expected {}",
                exponents.len(),
                self.nvars()
            );
        }

        // should we append to the back?
        if self.nterms() == 0 || self.last_exponents().cmp(exponents) == Ordering::Less {
            self.coefficients.push(coefficient);
            self.exponents.extend_from_slice(exponents);
            return;
        }

        // binary search for the insertion point
        let (mut l, mut r) = (0, self.nterms());
        while l < r {
            let m = (l + r) / 2;
            if self.exponents(m) < exponents {
                l = m + 1;
            } else {
                r = m;
            }
        }

        if l < self.nterms() && self.exponents(l) == exponents {
            self.field.add_assign(&mut self.coefficients[l], &coefficient);
            if F::is_zero(&self.coefficients[l]) {
                self.coefficients.remove(l);
                let i = l * self.nvars();
                self.exponents.drain(i..i + self.nvars());
            }
            return;
        }

        self.coefficients.insert(l, coefficient);
        let i = l * self.nvars();
        self.exponents.splice(i..i, exponents.iter().cloned());
    }

    fn last_exponents(&self) -> &[Exponent] {
        self.exponents(self.nterms() - 1)
    }

    /// Compute `self^pow`.
    pub fn pow(&self, mut pow: usize) -> Self {
        let mut x = self.clone();
        let mut y = self.one();
        while pow > 0 {
            if pow % 2 == 1 {
                y = &y * &x;
            }
            pow /= 2;
            if pow > 0 {
                x = &x * &x;
            }
        }
        y
    }

    /// Multiply every coefficient by `other`.
    pub fn mul_coeff(&self, other: &F::Element) -> Self {
        let mut res = self.zero();
        for t in self {
            res.append_monomial(self.field.mul(t.coefficient, other), t.exponents);
        }
        res
    }

    /// Apply a function `f` to each coefficient, yielding a polynomial over `field`.
    pub fn map_coeff<U: Ring, T: Fn(&F::Element) -> U::Element>(
        &self,
        f: T,
        field: U,
    ) -> MultivariatePolynomial<U> {
        let mut res = MultivariatePolynomial::new(&field, Some(self.nterms()), self.variables.clone());
        for t in self {
            res.append_monomial(f(t.coefficient), t.exponents);
        }
        res
    }

    /// Convert a polynomial in at most one variable to a dense univariate polynomial.
    /// A constant converts to a constant in the first variable, or in an anonymous
    /// variable when there are no variables.
    pub fn make_univariate(&self) -> Result<UnivariatePolynomial<F>, ConversionError> {
        let occurring: Vec<usize> = (0..self.nvars()).filter(|v| self.degree(*v) > 0).collect();

        if occurring.len() > 1 {
            return Err(ConversionError::NotUnivariate {
                variables: occurring
                    .iter()
                    .map(|v| self.variables[*v].to_string())
                    .collect(),
            });
        }

        let var = occurring.first().cloned().unwrap_or(0);
        let variable = self
            .variables
            .get(var)
            .cloned()
            .unwrap_or(Variable::Temporary(0));

        let mut p = UnivariatePolynomial::new(&self.field, None, Arc::new(variable));
        if self.is_zero() {
            return Ok(p);
        }

        p.coefficients = vec![self.field.zero(); self.degree(var) as usize + 1];
        for t in self {
            let e = if t.exponents.is_empty() {
                0
            } else {
                t.exponents[var] as usize
            };
            p.coefficients[e] = t.coefficient.clone();
        }

        Ok(p)
    }

    /// Write the polynomial with the highest term first.
    pub fn format(&self, opts: &PrintOptions, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }

        let mut first = true;
        for t in self.terms().collect::<Vec<_>>().into_iter().rev() {
            let mut coeff = String::new();
            write!(
                coeff,
                "{}",
                RingPrinter {
                    ring: &self.field,
                    element: t.coefficient,
                    opts: *opts,
                    in_product: false,
                }
            )?;

            let is_constant = t.exponents.iter().all(|e| *e == 0);
            if !is_constant && coeff.len() > 1 && coeff[1..].contains(['+', '-']) {
                coeff = format!("({})", coeff);
            }

            if !first && !coeff.starts_with('-') {
                f.write_char('+')?;
            }
            first = false;

            let mut factors = vec![];
            match coeff.as_str() {
                "1" if !is_constant => {}
                "-1" if !is_constant => f.write_char('-')?,
                _ => factors.push(coeff),
            }

            for (v, e) in self.variables.iter().zip(t.exponents) {
                match *e {
                    0 => {}
                    1 => factors.push(v.to_string()),
                    _ => factors.push(format!("{}^{}", v, e)),
                }
            }

            f.write_str(&factors.join(&opts.multiplication_operator.to_string()))?;
        }

        Ok(())
    }
}

impl<F: Ring> UnivariatePolynomial<F> {
    /// Convert to a sparse polynomial in the single variable of `self`.
    pub fn make_multivariate(&self) -> MultivariatePolynomial<F> {
        let mut p = MultivariatePolynomial::new(
            &self.field,
            Some(self.coefficients.len()),
            Arc::new(vec![self.variable.as_ref().clone()]),
        );

        for (e, c) in self.coefficients.iter().enumerate() {
            if !F::is_zero(c) {
                p.coefficients.push(c.clone());
                p.exponents.push(e as Exponent);
            }
        }

        p
    }
}

impl<F: Ring> std::fmt::Debug for MultivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "[]");
        }
        let mut first = true;
        write!(f, "[ ")?;
        for monomial in self {
            if first {
                first = false;
            } else {
                write!(f, ", ")?;
            }

            write!(
                f,
                "{{ {:?}, {:?} }}",
                monomial.coefficient, monomial.exponents
            )?;
        }
        write!(f, " ]")
    }
}

impl<F: Ring> Display for MultivariatePolynomial<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.format(&PrintOptions::default(), f)
    }
}

impl<F: Ring> PartialEq for MultivariatePolynomial<F> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        if self.variables != other.variables {
            // only constants are comparable across variable maps
            return self.is_constant()
                && other.is_constant()
                && self.coefficients == other.coefficients;
        }

        self.exponents == other.exponents && self.coefficients == other.coefficients
    }
}

impl<F: Ring> std::hash::Hash for MultivariatePolynomial<F> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.coefficients.hash(state);
        self.exponents.hash(state);
        self.variables.hash(state);
    }
}

impl<F: Ring> Eq for MultivariatePolynomial<F> {}

impl<'a, 'b, F: Ring> Add<&'a MultivariatePolynomial<F>> for &'b MultivariatePolynomial<F> {
    type Output = MultivariatePolynomial<F>;

    fn add(self, other: &'a MultivariatePolynomial<F>) -> Self::Output {
        assert_eq!(
            self.variables, other.variables,
            "Polynomials must have the same variable map"
        );

        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }

        // merge the two sorted term lists
        let mut res = self.zero();
        let (mut i, mut j) = (0, 0);
        while i < self.nterms() && j < other.nterms() {
            match self.exponents(i).cmp(other.exponents(j)) {
                Ordering::Less => {
                    res.coefficients.push(self.coefficients[i].clone());
                    res.exponents.extend_from_slice(self.exponents(i));
                    i += 1;
                }
                Ordering::Greater => {
                    res.coefficients.push(other.coefficients[j].clone());
                    res.exponents.extend_from_slice(other.exponents(j));
                    j += 1;
                }
                Ordering::Equal => {
                    let coeff = self
                        .field
                        .add(&self.coefficients[i], &other.coefficients[j]);
                    if !F::is_zero(&coeff) {
                        res.coefficients.push(coeff);
                        res.exponents.extend_from_slice(self.exponents(i));
                    }
                    i += 1;
                    j += 1;
                }
            }
        }

        for k in i..self.nterms() {
            res.coefficients.push(self.coefficients[k].clone());
            res.exponents.extend_from_slice(self.exponents(k));
        }

        for k in j..other.nterms() {
            res.coefficients.push(other.coefficients[k].clone());
            res.exponents.extend_from_slice(other.exponents(k));
        }

        res
    }
}

impl<F: Ring> Add for MultivariatePolynomial<F> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        &self + &other
    }
}

impl<F: Ring> Sub for MultivariatePolynomial<F> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.add(other.neg())
    }
}

impl<'a, 'b, F: Ring> Sub<&'a MultivariatePolynomial<F>> for &'b MultivariatePolynomial<F> {
    type Output = MultivariatePolynomial<F>;

    fn sub(self, other: &'a MultivariatePolynomial<F>) -> Self::Output {
        self + &other.clone().neg()
    }
}

impl<F: Ring> Neg for MultivariatePolynomial<F> {
    type Output = Self;
    fn neg(mut self) -> Self::Output {
        for c in &mut self.coefficients {
            *c = self.field.neg(c);
        }
        self
    }
}

impl<'a, 'b, F: Ring> Mul<&'a MultivariatePolynomial<F>> for &'b MultivariatePolynomial<F> {
    type Output = MultivariatePolynomial<F>;

    fn mul(self, rhs: &'a MultivariatePolynomial<F>) -> Self::Output {
        assert_eq!(
            self.variables, rhs.variables,
            "Polynomials must have the same variable map"
        );

        let mut res = self.zero();
        if self.is_zero() || rhs.is_zero() {
            return res;
        }

        let mut exp = vec![0; self.nvars()];
        for t1 in self {
            for t2 in rhs {
                for ((e, e1), e2) in exp.iter_mut().zip(t1.exponents).zip(t2.exponents) {
                    *e = e1 + e2;
                }
                res.append_monomial(self.field.mul(t1.coefficient, t2.coefficient), &exp);
            }
        }

        res
    }
}

impl<'a, F: Ring> Mul<&'a MultivariatePolynomial<F>> for MultivariatePolynomial<F> {
    type Output = MultivariatePolynomial<F>;

    fn mul(self, rhs: &'a MultivariatePolynomial<F>) -> Self::Output {
        (&self) * rhs
    }
}

/// View object for a term in a multivariate polynomial.
#[derive(Copy, Clone, Debug)]
pub struct MonomialView<'a, F: 'a + Ring> {
    pub coefficient: &'a F::Element,
    pub exponents: &'a [Exponent],
}

/// Iterator over terms in a multivariate polynomial.
pub struct MonomialViewIterator<'a, F: Ring> {
    poly: &'a MultivariatePolynomial<F>,
    index: usize,
}

impl<'a, F: Ring> Iterator for MonomialViewIterator<'a, F> {
    type Item = MonomialView<'a, F>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.poly.nterms() {
            None
        } else {
            let view = MonomialView {
                coefficient: &self.poly.coefficients[self.index],
                exponents: self.poly.exponents(self.index),
            };
            self.index += 1;
            Some(view)
        }
    }
}

impl<'a, F: Ring> IntoIterator for &'a MultivariatePolynomial<F> {
    type Item = MonomialView<'a, F>;
    type IntoIter = MonomialViewIterator<'a, F>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            poly: self,
            index: 0,
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::rational::{Rational, Q},
        poly::{univariate::UnivariatePolynomial, Variable},
    };

    use super::{ConversionError, MultivariatePolynomial};

    fn vars() -> Arc<Vec<Variable>> {
        Arc::new(vec![Variable::new("a"), Variable::new("x")])
    }

    #[test]
    fn sorted_terms() {
        let z = MultivariatePolynomial::new(&Q, None, vars());
        let a = z.variable(0, 1);
        let x = z.variable(1, 1);

        let p = &(&a * &x) + &(&x.pow(2) - &z.constant(Rational::from(3)));
        assert_eq!(p.nterms(), 3);
        assert_eq!(p.exponents(0), &[0, 0]);
        assert_eq!(p.exponents(2), &[1, 1]);
        assert_eq!(p.degree(1), 2);
        assert_eq!(format!("{}", p), "a*x+x^2-3");

        let zero = &p - &p;
        assert!(zero.is_zero());
        assert_eq!(&(&a + &x) * &(&a - &x), &a.pow(2) - &x.pow(2));
    }

    #[test]
    fn make_univariate() {
        let z = MultivariatePolynomial::new(&Q, None, vars());
        let x = z.variable(1, 1);
        let p = &x.pow(2) - &z.constant(Rational::from(2));

        let u = p.make_univariate().unwrap();
        assert_eq!(u.degree(), 2);
        assert_eq!(*u.variable, Variable::new("x"));
        assert_eq!(u.coefficients[0], -2);

        let q = &p + &z.variable(0, 1);
        assert_eq!(
            q.make_univariate(),
            Err(ConversionError::NotUnivariate {
                variables: vec!["a".into(), "x".into()]
            })
        );

        let c = z.constant(Rational::from(5)).make_univariate().unwrap();
        assert!(c.is_constant());
        assert_eq!(*c.variable, Variable::new("a"));
    }

    #[test]
    fn round_trip() {
        let p = UnivariatePolynomial::from_coefficients(
            &Q,
            vec![Rational::from(1), Rational::from(0), Rational::from((3, 2))],
            Arc::new(Variable::new("y")),
        );
        let m = p.make_multivariate();
        assert_eq!(m.nterms(), 2);
        assert_eq!(m.make_univariate(), Ok(p));
    }
}
