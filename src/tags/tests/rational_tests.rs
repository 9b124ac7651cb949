//! Tests for rational reduction

use crate::tags::rational::{reduce, reduce_signed, reduce_unsigned, Fraction};

#[test]
fn test_reduce_to_lowest_terms() {
    assert_eq!(reduce(10, 300, false), "1/30");
    assert_eq!(reduce(4, 6, false), "2/3");
    assert_eq!(reduce(28, 10, false), "14/5");
}

#[test]
fn test_reduce_whole_numbers() {
    assert_eq!(reduce(6, 3, false), "2");
    assert_eq!(reduce(7, 1, false), "7");
    assert_eq!(reduce(0, 5, false), "0");
}

#[test]
fn test_reduce_zero_denominator_reads_as_one() {
    assert_eq!(reduce(5, 0, false), "5");
    assert_eq!(reduce(0, 0, false), "0");
    assert_eq!(reduce_unsigned(3, 0), "3");
}

#[test]
fn test_reduce_signed_moves_sign_to_numerator() {
    assert_eq!(reduce(1, -30, true), "-1/30");
    assert_eq!(reduce(-1, 30, true), "-1/30");
    assert_eq!(reduce(-10, -300, true), "1/30");
    assert_eq!(reduce_signed(-2, 6), "-1/3");
    assert_eq!(reduce_signed(4, -2), "-2");
}

#[test]
fn test_reduce_unsigned_full_range() {
    assert_eq!(reduce_unsigned(u32::MAX, u32::MAX), "1");
    assert_eq!(reduce_unsigned(u32::MAX, 1), u32::MAX.to_string());
}

#[test]
fn test_fraction_parts() {
    let fraction = Fraction::reduce(10, 300, false);
    assert_eq!(fraction, Fraction { numerator: 1, denominator: 30 });
    assert!(!fraction.is_integer());

    let whole = Fraction::reduce(0, 7, false);
    assert_eq!(whole, Fraction { numerator: 0, denominator: 1 });
    assert!(whole.is_integer());
}
