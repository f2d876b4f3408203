mod common;

use common::{s, ymd};
use mframe::{ArithOp, CompareOp, DType, Error, Series, Value};

#[test]
fn test_series_creation() {
    let series = Series::from(vec![1, 2, 3, 4, 5]);
    assert_eq!(series.len(), 5);
    assert_eq!(series.dtype(), DType::Object);
    assert_eq!(series[0], Value::Int(1));
    assert_eq!(series.get(4), Some(&Value::Int(5)));
    assert_eq!(series.get(5), None);

    let empty = Series::new(vec![]);
    assert!(empty.is_empty());
    assert_eq!(empty.dtype(), DType::Object);
}

#[test]
fn test_dtype_inferred_from_first_element() {
    let dates = Series::from(vec![ymd(2019, 1, 1), ymd(2019, 1, 2)]);
    assert_eq!(dates.dtype(), DType::DateTime);
    assert_eq!(dates.dtype().name(), "datetime");

    // only the first element counts
    let mixed = Series::new(vec![s("2019-01-01"), Value::from(ymd(2019, 1, 2))]);
    assert_eq!(mixed.dtype(), DType::Object);
}

#[test]
fn test_iteration_is_restartable() {
    let series = Series::from(vec!["a", "b", "c"]);
    let first: Vec<&Value> = series.iter().collect();
    let second: Vec<&Value> = (&series).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_broadcast_and_pairwise_addition() {
    let series = Series::from(vec![2; 10]);
    assert_eq!((&series + vec![2; 10]).unwrap(), vec![4; 10]);
    assert_eq!((&series + 2).unwrap(), vec![4; 10]);
    assert_eq!((2i64 + &series).unwrap(), vec![4; 10]);
    assert_eq!((&series + &series).unwrap(), vec![4; 10]);
}

#[test]
fn test_reflected_operand_order() {
    let series = Series::from(vec![1, 2, 4]);
    assert_eq!((10i64 - &series).unwrap(), vec![9, 8, 6]);
    assert_eq!((&series - 10).unwrap(), vec![-9, -8, -6]);
    assert_eq!((8.0 / &series).unwrap(), vec![8.0, 4.0, 2.0]);
    assert_eq!(
        series.arithmetic(1, ArithOp::Sub, true).unwrap(),
        vec![0, -1, -3]
    );
}

#[test]
fn test_division_produces_floats() {
    let series = Series::from(vec![1, 3]);
    let halves = (&series / 2).unwrap();
    assert_eq!(halves, vec![0.5, 1.5]);
    assert!(matches!(halves[0], Value::Float(_)));
    assert!((&series / 0).is_err());
}

#[test]
fn test_pairwise_arithmetic_truncates_to_shorter() {
    let series = Series::from(vec![1, 2, 3, 4]);
    let result = (&series * vec![10, 10]).unwrap();
    assert_eq!(result, vec![10, 20]);
}

#[test]
fn test_arithmetic_type_error() {
    let series = Series::from(vec!["aapl"]);
    let err = (&series + 1).unwrap_err();
    assert!(matches!(err, Error::InvalidOperation(_)));
    // string concatenation is defined
    assert_eq!((&series + "!").unwrap(), vec!["aapl!"]);
}

#[test]
fn test_broadcast_comparison() {
    let series = Series::from(vec![1, 5, 10]);
    assert_eq!(series.gt(4).unwrap(), vec![false, true, true]);
    assert_eq!(series.gt_eq(5).unwrap(), vec![false, true, true]);
    assert_eq!(series.lt(5).unwrap(), vec![true, false, false]);
    assert_eq!(series.lt_eq(5).unwrap(), vec![true, true, false]);
    assert_eq!(series.equal(5.0).unwrap(), vec![false, true, false]);
    assert_eq!(series.not_equal(5).unwrap(), vec![true, false, true]);
    assert_eq!(
        series.compare(10, CompareOp::Eq).unwrap(),
        vec![false, false, true]
    );
}

#[test]
fn test_pairwise_comparison_requires_equal_length() {
    let series = Series::from(vec![1, 2, 3]);
    assert_eq!(series.equal(vec![1, 0, 3]).unwrap(), vec![true, false, true]);

    let err = series.equal(vec![1, 2]).unwrap_err();
    assert_eq!(err, Error::LengthMismatch { expected: 3, actual: 2 });
}

#[test]
fn test_ordering_across_kinds_fails() {
    let series = Series::from(vec!["a", "b"]);
    assert!(series.gt(1).is_err());
    // equality across kinds is simply false
    assert_eq!(series.equal(1).unwrap(), vec![false, false]);
}

#[test]
fn test_datetime_series_coerces_operands() {
    let dates = Series::from(vec![ymd(2019, 1, 1), ymd(2019, 1, 3), ymd(2019, 1, 5)]);
    assert_eq!(
        dates.gt_eq("2019-01-03").unwrap(),
        dates.gt_eq(ymd(2019, 1, 3)).unwrap()
    );
    assert_eq!(
        dates.equal(vec!["2019-01-01", "03-01-2019", "2019-01-05T00:00:00"]).unwrap(),
        vec![true, true, true]
    );
    assert!(matches!(dates.equal("not a date"), Err(Error::Format(_))));
}

#[test]
fn test_logical_combinators() {
    let a = Series::from(vec![true, true, false, false]);
    let b = Series::from(vec![true, false, true, false]);
    assert_eq!(&a & &b, vec![true, false, false, false]);
    assert_eq!(a.and_(&b), vec![true, false, false, false]);
    assert_eq!(&a | &b, vec![true, true, true, false]);
    assert_eq!(!&a, vec![false, false, true, true]);

    // no broadcasting: the shorter side wins
    let short = Series::from(vec![true]);
    assert_eq!(a.and_(&short).len(), 1);
}

#[test]
fn test_apply_rewrites_receiver_in_place() {
    let mut series = Series::from(vec!["2019-01-01", "2019-01-02"]);
    let converted = series.apply(common::str_to_dt);

    assert_eq!(converted.dtype(), DType::DateTime);
    assert_eq!(converted, vec![ymd(2019, 1, 1), ymd(2019, 1, 2)]);

    // the receiver sees the new data but keeps its original dtype
    assert_eq!(series, vec![ymd(2019, 1, 1), ymd(2019, 1, 2)]);
    assert_eq!(series.dtype(), DType::Object);
}

#[test]
fn test_try_apply_is_all_or_nothing() {
    let mut series = Series::from(vec!["2019-01-01", "garbage"]);
    let result = series.try_apply(|v| mframe::temporal::DateParser::global().parse_value(v));
    assert!(result.is_err());
    assert_eq!(series, vec!["2019-01-01", "garbage"]);
}

#[test]
fn test_round_in_place_and_abs() {
    let mut series = Series::from(vec![1.234, -2.567, 3.0]);
    series.round(1).unwrap();
    assert_eq!(series, vec![1.2, -2.6, 3.0]);

    let magnitudes = series.abs().unwrap();
    assert_eq!(magnitudes, vec![1.2, 2.6, 3.0]);
    // abs returns a new series
    assert_eq!(series[1], Value::Float(-2.6));

    let mut text = Series::from(vec!["x"]);
    assert!(text.round(1).is_err());
    assert!(text.abs().is_err());
}

#[test]
fn test_round_never_produces_inf_or_nan() {
    let mut series = Series::from(vec![1e300, 1.5, 0.125]);
    series.round(10).unwrap();
    assert_eq!(series, vec![1e300, 1.5, 0.125]);

    let mut series = Series::from(vec![1.5]);
    series.round(400).unwrap();
    assert_eq!(series, vec![1.5]);

    // ties go away from zero
    let mut series = Series::from(vec![0.125, -0.125]);
    series.round(2).unwrap();
    assert_eq!(series, vec![0.13, -0.13]);
}

#[test]
fn test_display() {
    let series = Series::new(vec![s("aapl"), Value::Int(1), Value::Float(2.5), Value::Null]);
    assert_eq!(series.to_string(), "['aapl', 1, 2.5, None]");
}
