//! Prime fields `Z/pZ` with word-sized primes, used for modular images in factorization.

use std::fmt::{Display, Error, Formatter};

use crate::printer::PrintOptions;

use super::{integer::Integer, EuclideanDomain, Field, Ring};

/// The prime field `Z/pZ` for a prime `p < 2^32`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Zp {
    p: u64,
}

impl Zp {
    /// Create a new prime field. The primality of `p` is not checked.
    pub fn new(p: u32) -> Zp {
        assert!(p > 1, "The modulus must be larger than 1");
        Zp { p: p as u64 }
    }

    pub fn get_prime(&self) -> u64 {
        self.p
    }

    /// Map an integer to its image in the field.
    pub fn to_element(&self, a: &Integer) -> u64 {
        a.mod_u(self.p as u32) as u64
    }

    /// Map an element to the integer in the symmetric range `(-p/2, p/2]`.
    pub fn to_symmetric_integer(&self, a: u64) -> Integer {
        if a * 2 > self.p {
            Integer::from(a) - self.p
        } else {
            Integer::from(a)
        }
    }
}

impl Display for Zp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Z_{}", self.p)
    }
}

impl Ring for Zp {
    type Element = u64;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let r = a + b;
        if r >= self.p {
            r - self.p
        } else {
            r
        }
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if a >= b {
            a - b
        } else {
            a + self.p - b
        }
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        ((*a as u128 * *b as u128) % self.p as u128) as u64
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    #[inline]
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    #[inline]
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.add(a, &self.mul(b, c));
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = self.sub(a, &self.mul(b, c));
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        if *a == 0 {
            0
        } else {
            self.p - a
        }
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        0
    }

    #[inline]
    fn one(&self) -> Self::Element {
        1
    }

    fn nth(&self, n: i64) -> Self::Element {
        n.rem_euclid(self.p as i64) as u64
    }

    fn pow(&self, b: &Self::Element, mut e: u64) -> Self::Element {
        let mut b = *b;
        let mut r = 1;
        while e > 0 {
            if e & 1 == 1 {
                r = self.mul(&r, &b);
            }
            b = self.mul(&b, &b);
            e >>= 1;
        }
        r
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
        true
    }

    fn characteristic(&self) -> Integer {
        Integer::from(self.p)
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if *b == 0 {
            None
        } else {
            Some(self.div(a, b))
        }
    }

    fn fmt_display(
        &self,
        element: &Self::Element,
        _opts: &PrintOptions,
        _in_product: bool,
        f: &mut Formatter<'_>,
    ) -> Result<(), Error> {
        if f.sign_plus() {
            f.write_str("+")?;
        }
        write!(f, "{}", element)
    }
}

impl EuclideanDomain for Zp {
    fn rem(&self, _a: &Self::Element, _b: &Self::Element) -> Self::Element {
        0
    }

    fn quot_rem(&self, a: &Self::Element, b: &Self::Element) -> (Self::Element, Self::Element) {
        (self.div(a, b), 0)
    }

    fn gcd(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        if *a == 0 && *b == 0 {
            0
        } else {
            1
        }
    }
}

impl Field for Zp {
    fn div(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        self.mul(a, &self.inv(b))
    }

    fn div_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.div(a, b);
    }

    fn inv(&self, a: &Self::Element) -> Self::Element {
        if *a == 0 {
            panic!("Division by zero in {}", self);
        }

        // extended Euclid on machine words
        let (mut t, mut new_t) = (0i64, 1i64);
        let (mut r, mut new_r) = (self.p as i64, *a as i64);
        while new_r != 0 {
            let q = r / new_r;
            (t, new_t) = (new_t, t - q * new_t);
            (r, new_r) = (new_r, r - q * new_r);
        }

        t.rem_euclid(self.p as i64) as u64
    }
}

#[cfg(test)]
mod test {
    use super::Zp;
    use crate::domains::{integer::Integer, Field, Ring};

    #[test]
    fn arithmetic() {
        let f = Zp::new(17);
        assert_eq!(f.add(&10, &9), 2);
        assert_eq!(f.sub(&3, &9), 11);
        assert_eq!(f.mul(&5, &7), 1);
        assert_eq!(f.inv(&5), 7);
        assert_eq!(f.pow(&3, 16), 1);
        assert_eq!(f.nth(-1), 16);
        assert_eq!(f.to_element(&Integer::from(-3)), 14);
        assert_eq!(f.to_symmetric_integer(14), -3);
    }
}
