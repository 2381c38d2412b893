use pretty_assertions::assert_eq;

use super::*;

fn nums(values: &[f64]) -> Vector {
    Vector::numeric(values.to_vec())
}

#[test]
fn arithmetic_recycles_shorter_operand() {
    let out = arith(Arith::Mul, &nums(&[1.0, 5.0, 6.0]), &Vector::scalar(7.0), Mode::Scalar);
    assert_eq!(out, Ok(nums(&[7.0, 35.0, 42.0])));
}

#[test]
fn zero_length_operand_gives_empty_result() {
    let out = arith(Arith::Add, &nums(&[]), &nums(&[1.0, 2.0]), Mode::Scalar);
    assert_eq!(out, Ok(nums(&[])));
}

#[test]
fn exact_mode_rejects_mismatch() {
    let out = arith(Arith::Add, &nums(&[1.0]), &nums(&[1.0, 2.0]), Mode::Exact);
    assert_eq!(out, Err(VectorError::LengthMismatch { left: 1, right: 2 }));
}

#[test]
fn modulo_follows_divisor_sign() {
    let out = arith(Arith::Mod, &nums(&[5.0, -5.0]), &Vector::scalar(3.0), Mode::Scalar);
    assert_eq!(out, Ok(nums(&[2.0, 1.0])));
    let out = arith(Arith::IntDiv, &Vector::scalar(-5.0), &Vector::scalar(3.0), Mode::Scalar);
    assert_eq!(out, Ok(nums(&[-2.0])));
}

#[test]
fn text_in_arithmetic_is_an_error() {
    let out = arith(Arith::Add, &Vector::string("a"), &Vector::scalar(1.0), Mode::Scalar);
    assert_eq!(out, Err(VectorError::NonNumeric));
}

#[test]
fn datetime_plus_seconds_stays_datetime() {
    let t = Vector::datetime(vec![100.0]);
    let out = arith(Arith::Add, &t, &Vector::scalar(60.0), Mode::Scalar).unwrap();
    assert_eq!(out, Vector::datetime(vec![160.0]));

    let diff = arith(Arith::Sub, &t, &t, Mode::Scalar).unwrap();
    assert_eq!(diff, Vector::scalar(0.0));
}

#[test]
fn names_come_from_full_length_operand() {
    let named = nums(&[1.0, 2.0])
        .with_names(Some(vec!["a".into(), "b".into()]))
        .unwrap();
    let out = arith(Arith::Add, &Vector::scalar(1.0), &named, Mode::Scalar).unwrap();
    assert_eq!(out.names(), named.names());
}

#[test]
fn comparison_of_strings_is_lexical() {
    let out = compare(
        Comparison::Lt,
        &Vector::string("apple"),
        &Vector::string("banana"),
        Mode::Scalar,
    );
    assert_eq!(out, Ok(Vector::boolean(true)));
}

#[test]
fn comparison_recycles() {
    let out = compare(Comparison::Ge, &nums(&[1.0, 2.0, 3.0]), &Vector::scalar(2.0), Mode::Scalar);
    assert_eq!(out, Ok(Vector::logical(vec![false, true, true])));
}

#[test]
fn logical_ops() {
    let t = Vector::logical(vec![true, false]);
    assert_eq!(
        logical(Logic::And, &t, &Vector::boolean(true), Mode::Scalar),
        Ok(Vector::logical(vec![true, false]))
    );
    assert_eq!(
        logical(Logic::Or, &t, &Vector::boolean(true), Mode::Scalar),
        Ok(Vector::logical(vec![true, true]))
    );
    assert_eq!(
        logical(Logic::Or, &Vector::string("x"), &t, Mode::Scalar),
        Err(VectorError::NonLogical)
    );
}

#[test]
fn unary_maps() {
    assert_eq!(map1(&nums(&[4.0, 9.0]), f64::sqrt), Ok(nums(&[2.0, 3.0])));
    assert_eq!(map1(&Vector::string("x"), f64::sqrt), Err(VectorError::NonNumericMath));
    assert_eq!(not(&Vector::scalar(0.0)), Ok(Vector::boolean(true)));
    assert_eq!(not(&Vector::string("x")), Err(VectorError::InvalidUnary));
}

#[test]
fn symbols_resolve() {
    assert_eq!(Arith::from_symbol("%/%"), Some(Arith::IntDiv));
    assert_eq!(Comparison::from_symbol("!="), Some(Comparison::Ne));
    assert_eq!(Arith::from_symbol("=="), None);
}

// === Property tests ===

#[allow(
    clippy::disallowed_types,
    reason = "proptest macros internally use Arc"
)]
mod proptest_recycling {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn result_length_is_longer_operand(
            xs in proptest::collection::vec(-1e6f64..1e6, 1..20),
            ys in proptest::collection::vec(-1e6f64..1e6, 1..20),
        ) {
            let out = arith(Arith::Add, &nums(&xs), &nums(&ys), Mode::Scalar).unwrap();
            prop_assert_eq!(out.len(), xs.len().max(ys.len()));
        }

        #[test]
        fn addition_commutes(
            xs in proptest::collection::vec(-1e6f64..1e6, 1..20),
            ys in proptest::collection::vec(-1e6f64..1e6, 1..20),
        ) {
            let left = arith(Arith::Add, &nums(&xs), &nums(&ys), Mode::Scalar).unwrap();
            let right = arith(Arith::Add, &nums(&ys), &nums(&xs), Mode::Scalar).unwrap();
            prop_assert_eq!(left, right);
        }
    }
}
