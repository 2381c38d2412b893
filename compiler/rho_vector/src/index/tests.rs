use pretty_assertions::assert_eq;

use super::*;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_owned()).collect()
}

fn named() -> Vector {
    Vector::numeric(vec![1.0, 2.0, 3.0])
        .with_names(Some(strings(&["a", "b", "c"])))
        .unwrap()
}

// === [[ ===

#[test]
fn get_by_position_drops_names() {
    assert_eq!(named().get(&Index::Position(2)), Ok(Vector::scalar(2.0)));
}

#[test]
fn get_by_name() {
    assert_eq!(named().get(&Index::Name("c".into())), Ok(Vector::scalar(3.0)));
}

#[test]
fn get_out_of_bounds() {
    assert_eq!(named().get(&Index::Position(4)), Err(VectorError::SubscriptOutOfBounds));
    assert_eq!(
        named().get(&Index::Name("z".into())),
        Err(VectorError::SubscriptOutOfBounds)
    );
}

#[test]
fn index_from_vector() {
    assert_eq!(Index::from_vector(&Vector::scalar(2.9)), Ok(Index::Position(2)));
    assert_eq!(
        Index::from_vector(&Vector::string("a")),
        Ok(Index::Name("a".into()))
    );
    assert_eq!(
        Index::from_vector(&Vector::numeric(vec![1.0, 2.0])),
        Err(VectorError::SelectMany)
    );
    assert_eq!(
        Index::from_vector(&Vector::empty(VectorKind::Numeric)),
        Err(VectorError::SelectNone)
    );
}

// === [ ===

#[test]
fn subset_positive_positions() {
    let v = Vector::numeric(vec![10.0, 20.0, 30.0]);
    assert_eq!(
        v.subset(&Vector::numeric(vec![3.0, 1.0])),
        Ok(Vector::numeric(vec![30.0, 10.0]))
    );
}

#[test]
fn subset_zero_is_ignored() {
    let v = Vector::numeric(vec![10.0, 20.0]);
    assert_eq!(
        v.subset(&Vector::numeric(vec![0.0, 2.0])),
        Ok(Vector::numeric(vec![20.0]))
    );
}

#[test]
fn subset_negative_excludes() {
    let v = Vector::numeric(vec![10.0, 20.0, 30.0]);
    assert_eq!(
        v.subset(&Vector::scalar(-2.0)),
        Ok(Vector::numeric(vec![10.0, 30.0]))
    );
}

#[test]
fn subset_negative_with_zero_drops_the_zero() {
    let v = Vector::numeric(vec![10.0, 20.0, 30.0]);
    assert_eq!(
        v.subset(&Vector::numeric(vec![-1.0, 0.0])),
        Ok(Vector::numeric(vec![20.0, 30.0]))
    );
}

#[test]
fn subset_mixed_signs_rejected() {
    let v = Vector::numeric(vec![10.0, 20.0, 30.0]);
    assert_eq!(
        v.subset(&Vector::numeric(vec![-1.0, 2.0])),
        Err(VectorError::MixedSubscripts)
    );
}

#[test]
fn subset_logical_mask_recycles() {
    let v = Vector::numeric(vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(
        v.subset(&Vector::logical(vec![true, false])),
        Ok(Vector::numeric(vec![1.0, 3.0]))
    );
}

#[test]
fn subset_by_names_keeps_names() {
    let expected = Vector::numeric(vec![3.0, 1.0])
        .with_names(Some(strings(&["c", "a"])))
        .unwrap();
    assert_eq!(
        named().subset(&Vector::character(strings(&["c", "a"]))),
        Ok(expected)
    );
}

// === Assignment ===

#[test]
fn assign_recycles_value() {
    let v = Vector::numeric(vec![1.0, 2.0, 3.0, 4.0]);
    let out = v
        .assign(&Vector::numeric(vec![1.0, 3.0]), &Vector::scalar(0.0))
        .unwrap();
    assert_eq!(out, Vector::numeric(vec![0.0, 2.0, 0.0, 4.0]));
}

#[test]
fn assign_past_end_extends() {
    let v = Vector::numeric(vec![1.0]);
    let out = v.assign(&Vector::scalar(3.0), &Vector::scalar(9.0)).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out.as_f64s().unwrap()[2], 9.0);
    assert!(out.as_f64s().unwrap()[1].is_nan());
}

#[test]
fn assign_promotes_kind() {
    let v = Vector::numeric(vec![1.0, 2.0]);
    let out = v.assign(&Vector::scalar(2.0), &Vector::string("x")).unwrap();
    assert_eq!(out, Vector::character(strings(&["1", "x"])));
}

#[test]
fn assign_new_name_appends() {
    let out = named()
        .assign(&Vector::string("d"), &Vector::scalar(4.0))
        .unwrap();
    assert_eq!(out.names(), Some(strings(&["a", "b", "c", "d"]).as_slice()));
    assert_eq!(out.as_f64s(), Ok(vec![1.0, 2.0, 3.0, 4.0]));
}

#[test]
fn assign_into_factor_checks_levels() {
    let f = Vector::factor(&strings(&["a", "b"]), None).unwrap();
    let ok = f.assign(&Vector::scalar(1.0), &Vector::string("b")).unwrap();
    assert_eq!(ok.as_strings(), strings(&["b", "b"]));
    assert_eq!(
        f.assign(&Vector::scalar(1.0), &Vector::string("z")),
        Err(VectorError::InvalidFactorLevel)
    );
}

#[test]
fn assign_empty_value_rejected() {
    let v = Vector::numeric(vec![1.0]);
    assert_eq!(
        v.assign(&Vector::scalar(1.0), &Vector::empty(VectorKind::Numeric)),
        Err(VectorError::ReplacementLengthZero)
    );
}

#[test]
fn set_requires_single_value() {
    let v = Vector::numeric(vec![1.0]);
    assert_eq!(
        v.set(&Index::Position(1), &Vector::numeric(vec![1.0, 2.0])),
        Err(VectorError::ReplacementTooLong)
    );
    assert_eq!(
        v.set(&Index::Position(1), &Vector::scalar(5.0)),
        Ok(Vector::scalar(5.0))
    );
}

#[test]
fn offsets_for_callers_with_their_own_storage() {
    let shape = Vector::logical(vec![false; 3])
        .with_names(Some(vec!["a".into(), "b".into(), "c".into()]))
        .unwrap();
    assert_eq!(shape.subset_offsets(&Vector::scalar(-2.0)), Ok(vec![0, 2]));
    assert_eq!(shape.element_offset(&Index::Name("c".into())), Ok(2));
    assert_eq!(
        shape.assign_offsets(&Vector::string("d")),
        Ok((vec![3], vec![(3, "d".to_owned())]))
    );
}

#[test]
fn assign_far_past_end_is_an_error() {
    let v = Vector::numeric(vec![1.0]);
    assert_eq!(
        v.assign(&Vector::scalar(1e18), &Vector::scalar(2.0)),
        Err(VectorError::TooLong)
    );
}
