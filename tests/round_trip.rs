extern crate wstrffi;

macro_rules! here { () => { &format!(concat!(file!(), ":{:?}"), line!()) } }

use wstrffi::{RoundTrip, ValidationError};
use wstrffi::alloc::{Malloc, Rust};
use wstrffi::encoding::{Utf16, Utf32, Wide};
use wstrffi::validate::Step;

#[test]
fn test_reference_utf32() {
    let report = RoundTrip::<Utf32>::reference().run().expect(here!());

    assert_eq!(report.full.payload_units(), 23);
    assert_eq!(report.full.units_written(), 24);
    assert!(!report.full.is_truncated());

    assert_eq!(report.truncated.payload_units(), 5);
    assert_eq!(report.truncated.units_written(), 6);
    assert!(report.truncated.is_truncated());

    // "abc", snowman, euro, U+2007C, "123", space, dash.
    assert_eq!(report.substring.payload_units(), 11);
    assert_eq!(report.embedded_zero.payload_units(), 23);
}

#[test]
fn test_reference_utf16() {
    let report = RoundTrip::<Utf16, Malloc>::reference().run().expect(here!());

    assert_eq!(report.full.payload_units(), 25);
    assert_eq!(report.truncated.payload_units(), 5);
    assert_eq!(report.truncated.units_written(), 6);
    // U+2007C is a surrogate pair here, so the dash sits one unit later.
    assert_eq!(report.substring.payload_units(), 12);
    assert_eq!(report.embedded_zero.payload_units(), 25);
}

#[test]
fn test_reference_wide() {
    RoundTrip::<Wide, Rust>::reference().run().expect(here!());
}

#[test]
fn test_truncation_capacities() {
    for cap in 0..30 {
        let report = RoundTrip::<Utf32>::reference()
            .truncated_capacity(cap)
            .run()
            .expect(here!());
        let expected = if cap == 0 { 0 } else { (cap - 1).min(23) };
        assert_eq!(report.truncated.payload_units(), expected, "capacity {}", cap);
        assert_eq!(report.truncated.is_terminated(), cap > 0);
    }
}

#[test]
fn test_custom_anchor() {
    let report = RoundTrip::<Utf16>::new("key=value")
        .anchor('=')
        .run()
        .expect(here!());
    assert_eq!(report.substring.payload_units(), 4);
    assert_eq!(report.embedded_zero.payload_units(), 9);
}

#[test]
fn test_anchor_missing() {
    let err = RoundTrip::<Utf32>::new("no anchor here").run().unwrap_err();
    assert_eq!(err, ValidationError::AnchorMissing { anchor: '-' });
}

#[test]
fn test_embedded_zero_in_sample_is_caught() {
    // The null-terminated decode stops at the zero, so the full round trip comes up short.
    let err = RoundTrip::<Utf32>::new("ab\0-cd").run().unwrap_err();
    assert_eq!(err, ValidationError::LengthMismatch {
        step: Step::FullRoundTrip,
        expected: 6,
        actual: 2,
    });
    assert_eq!(err.to_string(), "full round trip: expected 6 units, got 2");
}

#[test]
fn test_supplementary_anchor() {
    // U+2007C takes both units of a surrogate pair in UTF-16.
    let report = RoundTrip::<Utf16>::new("ab\u{2007C}cd")
        .anchor('\u{2007C}')
        .run()
        .expect(here!());
    assert_eq!(report.substring.payload_units(), 4);
    assert_eq!(report.embedded_zero.payload_units(), 6);

    let report = RoundTrip::<Utf32>::new("ab\u{2007C}cd")
        .anchor('\u{2007C}')
        .run()
        .expect(here!());
    assert_eq!(report.substring.payload_units(), 3);
    assert_eq!(report.embedded_zero.payload_units(), 5);
}
