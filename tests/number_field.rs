use std::sync::Arc;

use numfield::{
    domains::{
        algebraic_number::{AlgebraicExtension, NumberFieldError},
        rational::{Rational, RationalField, Q},
        Field, Ring,
    },
    poly::{factor::Factorize, univariate::UnivariatePolynomial, Variable},
};

fn poly(c: &[i64], var: &str) -> UnivariatePolynomial<RationalField> {
    UnivariatePolynomial::from_coefficients(
        &Q,
        c.iter().map(|x| Rational::from(*x)).collect(),
        Arc::new(Variable::new(var)),
    )
}

#[test]
fn sqrt_two() {
    let field = AlgebraicExtension::new(&poly(&[-2, 0, 1], "x")).unwrap();
    let a = field.generator();

    assert_eq!(field.degree(), 2);
    assert_eq!(field.compute_min_poly(&a), poly(&[-2, 0, 1], "x"));
    assert_eq!(field.mul(&a, &a), field.nth(2));

    let inv = field.inv(&a);
    assert_eq!(inv, field.div(&a, &field.nth(2)));
    assert_eq!(field.mul(&a, &inv), field.one());
    assert_eq!(field.pow(&a, 5), field.mul(&field.nth(4), &a));

    let b = field.add(&a, &field.one());
    assert_eq!(field.compute_min_poly(&b), poly(&[-1, -2, 1], "x"));
    assert_eq!(field.norm(&b), -1);
    assert!(field.is_integral(&b));
    assert!(!field.is_integral(&inv));
}

#[test]
fn non_integral_polynomial() {
    // 2x^2 - 3 has the root sqrt(6)/2 and is rescaled to x^2 - 6
    let field = AlgebraicExtension::new(&poly(&[-3, 0, 2], "x")).unwrap();
    assert_eq!(field.poly(), &poly(&[-6, 0, 1], "x"));

    let alpha = field.original_root();
    assert_eq!(
        field.mul(&alpha, &alpha),
        field.constant(Rational::from((3, 2)))
    );

    assert_eq!(
        AlgebraicExtension::new(&poly(&[5], "x")),
        Err(NumberFieldError::ConstantPolynomial)
    );
}

#[test]
fn factor_over_field() {
    let field = AlgebraicExtension::new(&poly(&[-2, 0, 1], "a")).unwrap();
    let p = field.lift_rational(&poly(&[-2, 0, 1], "x"));

    let factors = p.factor();
    assert_eq!(factors.len(), 2);

    let mut product = p.one();
    for (f, e) in &factors {
        assert_eq!(*e, 1);
        let r = field.extract_root_from_linear(f).unwrap();
        assert_eq!(field.mul(&r, &r), field.nth(2));
        product = &product * f;
    }
    assert_eq!(product, p);

    // x^2 - 3 remains irreducible
    let q = field.lift_rational(&poly(&[-3, 0, 1], "x"));
    assert_eq!(field.factor_square_free_poly(&q), vec![q.clone()]);
    assert!(matches!(
        field.extract_root_from_linear(&q),
        Err(NumberFieldError::NotLinear { degree: 2 })
    ));

    let lifted = field.lift(&field.de_lift(&q)).unwrap();
    assert_eq!(lifted, q);
}
