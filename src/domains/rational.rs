use std::{
    fmt::{Display, Error, Formatter},
    ops::Neg,
};

use rug::ops::Pow;

use crate::printer::PrintOptions;

use super::{integer::Integer, EuclideanDomain, Field, Ring};

/// An arbitrary precision rational number.
pub type Rational = rug::Rational;

/// The field of rational numbers.
pub type Q = RationalField;
/// The field of rational numbers.
pub const Q: RationalField = RationalField::new();

/// The field of rational numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalField;

impl Default for RationalField {
    fn default() -> Self {
        Self::new()
    }
}

impl RationalField {
    pub const fn new() -> RationalField {
        RationalField
    }
}

impl Display for RationalField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Q")
    }
}

/// The least common multiple of the denominators of `r`.
pub fn denominator_lcm<'a>(r: impl IntoIterator<Item = &'a Rational>) -> Integer {
    let mut l = Integer::from(1);
    for x in r {
        if *x.denom() != 1 {
            l = l.lcm(x.denom());
        }
    }
    l
}

impl Ring for RationalField {
    type Element = Rational;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.clone() + b
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.clone() - b
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.clone() * b
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a -= b;
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a *= b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += b.clone() * c;
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= b.clone() * c;
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        a.clone().neg()
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Rational::new()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Rational::from(1)
    }

    #[inline]
    fn nth(&self, n: i64) -> Self::Element {
        Rational::from(n)
    }

    #[inline]
    fn pow(&self, b: &Self::Element, e: u64) -> Self::Element {
        if e > i32::MAX as u64 {
            panic!("Power of exponentation is larger than 2^31: {}", e);
        }
        b.clone().pow(e as i32)
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        *a == 0
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }

    fn one_is_gcd_unit() -> bool {
        false
    }

    fn characteristic(&self) -> Integer {
        Integer::new()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if *b == 0 {
            None
        } else {
            Some(a.clone() / b)
        }
    }

    fn fmt_display(
        &self,
        element: &Self::Element,
        _opts: &PrintOptions,
        in_product: bool,
        f: &mut Formatter<'_>,
    ) -> Result<(), Error> {
        if f.sign_plus() && *element >= 0 {
            f.write_str("+")?;
        }

        if in_product && (*element < 0 || *element.denom() != 1) {
            write!(f, "({})", element)
        } else {
            write!(f, "{}", element)
        }
    }
}

impl EuclideanDomain for RationalField {
    fn rem(&self, _a: &Self::Element, _b: &Self::Element) -> Self::Element {
        Rational::new()
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (a.clone() / b, Rational::new())
    }

    /// The gcd of two rationals, `gcd(a.num, b.num) / lcm(a.den, b.den)`.
    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let num = a.numer().clone().gcd(b.numer());
        let den = a.denom().clone().lcm(b.denom());
        Rational::from((num, den))
    }
}

impl Field for RationalField {
    #[inline]
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.clone() / b
    }

    #[inline]
    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a /= b;
    }

    #[inline]
    fn inv(&self, a: &Self::Element) -> Self::Element {
        if *a == 0 {
            panic!("Division by zero");
        }

        a.clone().recip()
    }
}

#[cfg(test)]
mod test {
    use super::{denominator_lcm, Rational, Q};
    use crate::domains::{EuclideanDomain, Field, Ring};

    #[test]
    fn arithmetic() {
        let a = Rational::from((3, 4));
        let b = Rational::from((-5, 6));
        assert_eq!(Q.add(&a, &b), Rational::from((-1, 12)));
        assert_eq!(Q.mul(&a, &b), Rational::from((-5, 8)));
        assert_eq!(Q.inv(&b), Rational::from((-6, 5)));
        assert_eq!(Q.pow(&b, 2), Rational::from((25, 36)));
        assert_eq!(Q.gcd(&a, &b), Rational::from((1, 12)));
    }

    #[test]
    fn denominators() {
        let v = [Rational::from((1, 4)), Rational::from((5, 6)), Rational::from(3)];
        assert_eq!(denominator_lcm(&v), 12);
    }
}
