//! Numeric parameter tests

use rust_motion_controller::console::number::{parse_number, si_scale};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

#[test]
fn test_plain_numbers() {
    assert_eq!(parse_number("10"), 10.0);
    assert_eq!(parse_number("-50"), -50.0);
    assert_eq!(parse_number("2.5"), 2.5);
}

#[test]
fn test_si_suffixes() {
    assert_eq!(parse_number("2k"), 2000.0);
    assert_eq!(parse_number("3M"), 3.0e6);
    assert_eq!(parse_number("1G"), 1.0e9);
    assert!(approx(parse_number("1.5m"), 0.0015));
    assert!(approx(parse_number("20u"), 20.0e-6));
    assert!(approx(parse_number("7n"), 7.0e-9));
    assert!(approx(parse_number("4p"), 4.0e-12));
}

#[test]
fn test_unknown_suffix_ignored() {
    assert_eq!(parse_number("12x"), 12.0);
    assert_eq!(parse_number("12kx"), 12000.0);
}

#[test]
fn test_unparseable_is_zero() {
    assert_eq!(parse_number(""), 0.0);
    assert_eq!(parse_number("abc"), 0.0);
    assert_eq!(parse_number("-"), 0.0);
    assert_eq!(parse_number("k"), 0.0);
}

#[test]
fn test_longest_parseable_prefix() {
    assert_eq!(parse_number("1.2.3"), 1.2);
    assert_eq!(parse_number("5-3"), 5.0);
}

#[test]
fn test_si_scale_table() {
    assert_eq!(si_scale(b'k'), Some(1.0e3));
    assert_eq!(si_scale(b'K'), None);
    assert_eq!(si_scale(b'x'), None);
}
