//! Numfield is a library for computations in algebraic number fields.
//!
//! It can be used to perform arithmetic with algebraic numbers, to compute with
//! orders and their ideals, to refine ideals into coprime factors, to find
//! multiplicative relations that yield units, and to construct splitting fields.
//!
//! For example:
//!
//! ```
//! use std::sync::Arc;
//! use numfield::{
//!     domains::{algebraic_number::AlgebraicExtension, rational::Q, Field, Ring},
//!     poly::{univariate::UnivariatePolynomial, Variable},
//! };
//!
//! let poly = UnivariatePolynomial::from_coefficients(
//!     &Q,
//!     vec![(-2).into(), 0.into(), 1.into()],
//!     Arc::new(Variable::new("a")),
//! );
//! let field = AlgebraicExtension::new(&poly).unwrap();
//!
//! let a = field.generator();
//! assert_eq!(field.mul(&a, &a), field.nth(2));
//! println!("1/a = {}", field.printer(&field.inv(&a)));
//! ```

pub mod combinatorics;
pub mod domains;
pub mod poly;
pub mod printer;
pub mod tensors;
