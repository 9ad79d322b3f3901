//! Orders of number fields: subrings that are free Z-modules of full rank.
//!
//! An order is stored by a basis `e_1, ..., e_(n-1), 1` of field elements. Its elements are
//! integer coordinate vectors in that basis, with the coordinate of `1` last.

use std::{
    fmt::{Display, Error, Formatter},
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::{
    printer::PrintOptions,
    tensors::matrix::Matrix,
};

use super::{
    algebraic_number::{AlgebraicExtension, AlgebraicNumber},
    integer::{Integer, IntegerRing, Z},
    rational::{denominator_lcm, Rational, RationalField, Q},
    Field, Ring,
};

/// An element of an order, as integer coordinates in the basis of the order.
pub type OrderElement = Vec<Integer>;

/// Errors that occur when constructing an order from a basis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderError {
    WrongSize { expected: usize, found: usize },
    /// The last basis element is not `1`.
    MissingOne,
    Singular,
    /// The product of basis elements `i` and `j` is not in the lattice.
    NotClosed { i: usize, j: usize },
}

impl Display for OrderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderError::WrongSize { expected, found } => write!(
                f,
                "An order of a field of degree {} needs {} basis elements, but {} were given",
                expected, expected, found
            ),
            OrderError::MissingOne => write!(f, "The last basis element must be 1"),
            OrderError::Singular => write!(f, "The basis elements are linearly dependent"),
            OrderError::NotClosed { i, j } => write!(
                f,
                "The product of basis elements {} and {} is not in the order",
                i, j
            ),
        }
    }
}

impl std::error::Error for OrderError {}

/// An order of a number field, a subring that is a free Z-module of rank equal to the
/// degree of the field. The order is a [Ring] with elements of type [OrderElement].
#[derive(Clone)]
pub struct Order {
    field: AlgebraicExtension,
    basis: Arc<Vec<AlgebraicNumber>>,
    /// Maps power basis coordinates to order coordinates.
    to_order: Arc<Matrix<RationalField>>,
    /// `table[i][j]` holds the coordinates of `e_i*e_j`.
    table: Arc<Vec<Vec<OrderElement>>>,
}

impl Order {
    /// Create an order from a basis of field elements, whose last element must be `1`.
    pub fn new(field: &AlgebraicExtension, basis: Vec<AlgebraicNumber>) -> Result<Order, OrderError> {
        let n = field.degree();
        if basis.len() != n {
            return Err(OrderError::WrongSize {
                expected: n,
                found: basis.len(),
            });
        }

        if !field.is_one(&basis[n - 1]) {
            return Err(OrderError::MissingOne);
        }

        let mut data = Vec::with_capacity(n * n);
        for b in &basis {
            data.extend(field.coefficients(b));
        }

        let m = Matrix {
            data,
            nrows: n as u32,
            ncols: n as u32,
            field: Q,
        };
        let to_order = m.inv().map_err(|_| OrderError::Singular)?;

        let mut order = Order {
            field: field.clone(),
            basis: Arc::new(basis),
            to_order: Arc::new(to_order),
            table: Arc::new(vec![]),
        };

        let mut table = vec![vec![vec![]; n]; n];
        for i in 0..n {
            for j in i..n {
                let (o, d) = order.to_order_element(&field.mul(&order.basis[i], &order.basis[j]));
                if d != 1 {
                    return Err(OrderError::NotClosed { i, j });
                }

                table[i][j] = o.clone();
                table[j][i] = o;
            }
        }

        order.table = Arc::new(table);
        Ok(order)
    }

    /// The equation order `Z[θ]`, with basis `θ^(n-1), ..., θ, 1`.
    pub fn equation_order(field: &AlgebraicExtension) -> Order {
        let theta = field.generator();
        let basis = (0..field.degree())
            .rev()
            .map(|i| field.pow(&theta, i as u64))
            .collect();

        match Order::new(field, basis) {
            Ok(o) => o,
            Err(e) => unreachable!("The powers of an integral generator form an order: {}", e),
        }
    }

    /// The rank of the order.
    pub fn degree(&self) -> usize {
        self.basis.len()
    }

    pub fn field(&self) -> &AlgebraicExtension {
        &self.field
    }

    pub fn basis(&self) -> &[AlgebraicNumber] {
        &self.basis
    }

    pub fn multiplication_table(&self) -> &[Vec<OrderElement>] {
        &self.table
    }

    /// Convert an order element to a field element.
    pub fn to_field(&self, o: &[Integer]) -> AlgebraicNumber {
        let mut res = self.field.zero();
        for (c, b) in o.iter().zip(self.basis.iter()) {
            if *c != 0 {
                res = self.field.add(&res, &b.clone().mul_coeff(&Rational::from(c.clone())));
            }
        }
        res
    }

    /// Get the rational coordinates of `x` in the basis of the order.
    pub fn to_order_coordinates(&self, x: &AlgebraicNumber) -> Vec<Rational> {
        let v = self.field.coefficients(x);
        let n = self.degree();

        (0..n)
            .map(|j| {
                let mut c = Rational::new();
                for (k, vk) in v.iter().enumerate() {
                    if *vk != 0 {
                        c += vk.clone() * &self.to_order[(k as u32, j as u32)];
                    }
                }
                c
            })
            .collect()
    }

    /// Write `x = o/d` with `o` in the order and `d` the smallest positive integer for which this is possible.
    pub fn to_order_element(&self, x: &AlgebraicNumber) -> (OrderElement, Integer) {
        let c = self.to_order_coordinates(x);
        let d = denominator_lcm(&c);
        let o = c
            .into_iter()
            .map(|x| (x * Rational::from(d.clone())).into_numer_denom().0)
            .collect();
        (o, d)
    }

    /// Compute the field element `o/d`.
    pub fn from_order_element(&self, o: &[Integer], d: &Integer) -> AlgebraicNumber {
        self.to_field(o).mul_coeff(&Rational::from((Integer::from(1), d.clone())))
    }

    /// Test if `x` is an element of the order.
    pub fn contains(&self, x: &AlgebraicNumber) -> bool {
        self.to_order_coordinates(x)
            .iter()
            .all(|c| *c.denom() == 1)
    }

    /// Multiply two elements given by rational coordinates.
    pub fn mul_rational(&self, a: &[Rational], b: &[Rational]) -> Vec<Rational> {
        let mut res = vec![Rational::new(); self.degree()];
        for (i, ai) in a.iter().enumerate() {
            if *ai == 0 {
                continue;
            }

            for (j, bj) in b.iter().enumerate() {
                if *bj == 0 {
                    continue;
                }

                let c = ai.clone() * bj;
                for (r, t) in res.iter_mut().zip(&self.table[i][j]) {
                    if *t != 0 {
                        *r += c.clone() * t;
                    }
                }
            }
        }
        res
    }

    /// The matrix of multiplication by `o`, where row `k` holds the coordinates of `o*e_k`.
    pub fn multiplication_matrix(&self, o: &[Integer]) -> Matrix<IntegerRing> {
        let n = self.degree();
        let mut m = Matrix::new(n as u32, n as u32, Z);
        for (i, oi) in o.iter().enumerate() {
            if *oi == 0 {
                continue;
            }

            for k in 0..n {
                for (j, t) in self.table[i][k].iter().enumerate() {
                    m[(k as u32, j as u32)] += oi.clone() * t;
                }
            }
        }
        m
    }

    /// The unit vector of basis element `k`.
    pub(crate) fn basis_element(&self, k: usize) -> OrderElement {
        let mut e = vec![Integer::new(); self.degree()];
        e[k] = Integer::from(1);
        e
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.basis == other.basis
    }
}

impl Eq for Order {}

impl Hash for Order {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.field.hash(state);
        self.basis.hash(state);
    }
}

impl std::fmt::Debug for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Order({:?} in {:?})", self.basis, self.field)
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Z<")?;
        for (i, b) in self.basis.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", b)?;
        }
        write!(f, "> in {}", self.field)
    }
}

impl Ring for Order {
    type Element = OrderElement;

    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.iter().zip(b).map(|(x, y)| x.clone() + y).collect()
    }

    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.iter().zip(b).map(|(x, y)| x.clone() - y).collect()
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        let mut res = vec![Integer::new(); self.degree()];
        for (i, ai) in a.iter().enumerate() {
            if *ai == 0 {
                continue;
            }

            for (j, bj) in b.iter().enumerate() {
                if *bj == 0 {
                    continue;
                }

                let c = ai.clone() * bj;
                for (r, t) in res.iter_mut().zip(&self.table[i][j]) {
                    if *t != 0 {
                        *r += c.clone() * t;
                    }
                }
            }
        }
        res
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        for (x, y) in a.iter_mut().zip(b) {
            *x += y;
        }
    }

    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        for (x, y) in a.iter_mut().zip(b) {
            *x -= y;
        }
    }

    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        let p = self.mul(b, c);
        self.add_assign(a, &p);
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        let p = self.mul(b, c);
        self.sub_assign(a, &p);
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        a.iter().map(|x| -x.clone()).collect()
    }

    fn zero(&self) -> Self::Element {
        vec![Integer::new(); self.degree()]
    }

    fn one(&self) -> Self::Element {
        self.basis_element(self.degree() - 1)
    }

    fn nth(&self, n: i64) -> Self::Element {
        let mut e = self.zero();
        e[self.degree() - 1] = Integer::from(n);
        e
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
        a.iter().all(|x| *x == 0)
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        *a == self.one()
    }

    fn one_is_gcd_unit() -> bool {
        false
    }

    fn characteristic(&self) -> Integer {
        Integer::new()
    }

    fn try_div(&self, a: &Self::Element, b: &Self::Element) -> Option<Self::Element> {
        if Self::is_zero(b) {
            return None;
        }

        let x = self.field.div(&self.to_field(a), &self.to_field(b));
        let (o, d) = self.to_order_element(&x);
        if d == 1 {
            Some(o)
        } else {
            None
        }
    }

    fn fmt_display(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        in_product: bool,
        f: &mut Formatter<'_>,
    ) -> Result<(), Error> {
        self.field
            .fmt_display(&self.to_field(element), opts, in_product, f)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::{
        domains::{
            algebraic_number::AlgebraicExtension,
            integer::Integer,
            rational::{Rational, Q},
            Field, Ring,
        },
        poly::{univariate::UnivariatePolynomial, Variable},
    };

    use super::{Order, OrderError};

    fn quadratic(d: i64) -> AlgebraicExtension {
        AlgebraicExtension::new(&UnivariatePolynomial::from_coefficients(
            &Q,
            vec![Rational::from(-d), 0.into(), 1.into()],
            Arc::new(Variable::new("a")),
        ))
        .unwrap()
    }

    fn v(x: &[i64]) -> Vec<Integer> {
        x.iter().map(|x| Integer::from(*x)).collect()
    }

    #[test]
    fn equation_order() {
        let field = quadratic(-5);
        let o = Order::equation_order(&field);

        assert_eq!(o.degree(), 2);
        assert_eq!(o.multiplication_table()[0][0], v(&[0, -5]));
        assert_eq!(o.one(), v(&[0, 1]));

        // (1+a)^2 = 2a - 4
        assert_eq!(o.mul(&v(&[1, 1]), &v(&[1, 1])), v(&[2, -4]));
        assert_eq!(o.pow(&v(&[1, 1]), 2), v(&[2, -4]));
        assert_eq!(o.nth(3), v(&[0, 3]));
        assert_eq!(format!("{}", o.printer(&v(&[1, 1]))), "a+1");

        let m = o.multiplication_matrix(&v(&[1, 1]));
        assert_eq!(m.data(), &v(&[1, -5, 1, 1]));
    }

    #[test]
    fn maximal_order() {
        let field = quadratic(5);
        let phi = field.div(&field.add(&field.generator(), &field.one()), &field.nth(2));
        let o = Order::new(&field, vec![phi.clone(), field.one()]).unwrap();

        // phi^2 = phi + 1
        assert_eq!(o.multiplication_table()[0][0], v(&[1, 1]));
        assert!(o.contains(&phi));
        assert_eq!(o.to_field(&v(&[1, 0])), phi);

        // sqrt(5) = 2 phi - 1
        assert_eq!(o.to_order_element(&field.generator()), (v(&[2, -1]), Integer::from(1)));
        assert_eq!(
            o.to_order_coordinates(&field.inv(&field.nth(2))),
            vec![Rational::new(), Rational::from((1, 2))]
        );

        // phi is a unit with inverse phi - 1
        assert_eq!(o.try_div(&o.one(), &v(&[1, 0])), Some(v(&[1, -1])));
        assert_eq!(o.try_div(&o.one(), &v(&[0, 2])), None);
    }

    #[test]
    fn non_orders() {
        let field = quadratic(2);
        let a = field.generator();
        let half = field.inv(&field.nth(2));

        assert_eq!(
            Order::new(&field, vec![field.one()]),
            Err(OrderError::WrongSize {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Order::new(&field, vec![a.clone(), field.nth(2)]),
            Err(OrderError::MissingOne)
        );
        assert_eq!(
            Order::new(&field, vec![field.nth(3), field.one()]),
            Err(OrderError::Singular)
        );
        assert_eq!(
            Order::new(&field, vec![field.mul(&a, &half), field.one()]),
            Err(OrderError::NotClosed { i: 0, j: 0 })
        );

        let o = Order::equation_order(&field);
        let (e, d) = o.to_order_element(&field.mul(&a, &half));
        assert_eq!((e.clone(), d.clone()), (v(&[1, 0]), Integer::from(2)));
        assert_eq!(o.from_order_element(&e, &d), field.mul(&a, &half));
        assert!(!o.contains(&half));

        // a/2 * (a/2 + 1/3) = a/6 + 1/2
        let x = vec![Rational::from((1, 2)), Rational::new()];
        let y = vec![Rational::from((1, 2)), Rational::from((1, 3))];
        let xy = o.mul_rational(&x, &y);
        assert_eq!(xy, vec![Rational::from((1, 6)), Rational::from((1, 2))]);
        assert_eq!(
            xy,
            o.to_order_coordinates(&field.mul(
                &field.mul(&a, &half),
                &field.add(&field.mul(&a, &half), &field.inv(&field.nth(3)))
            ))
        );
    }
}
