//! Tests for name sanitization policies

use rstest::rstest;

use outline_docs::domain::{sanitize, SanitizePolicy, ELLIPSIS};

const MAX: usize = 20;

#[rstest]
#[case::list_marker("- Getting started", "Getting started")]
#[case::dotted_marker("... Intro", "Intro")]
#[case::internal_dots("v1.2 notes", "v1_2 notes")]
#[case::extension_kept("notes.md", "notes.md")]
#[case::illegal_chars(r#"a<b>c:d"e|f?g*h"#, "abcdefgh")]
#[case::parentheses("(draft) Planning", "draft Planning")]
#[case::trailing_underscore("Intro_", "Intro")]
#[case::trailing_artifacts("Version 2.", "Version2")]
fn given_label_when_default_policy_then_cleaned(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize(input, MAX, SanitizePolicy::Default), expected);
}

#[rstest]
#[case::leading_digits("01 Intro", " Intro")]
#[case::dots_deleted("Chapter 1.2.3", "Chapter123")]
#[case::extension_kept("01 notes.md", " notes.md")]
#[case::no_digits("Appendix", "Appendix")]
fn given_label_when_strip_digits_policy_then_cleaned(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(sanitize(input, MAX, SanitizePolicy::StripDigits), expected);
}

#[rstest]
fn given_any_label_when_sanitized_twice_then_result_is_stable(
    #[values(SanitizePolicy::Default, SanitizePolicy::StripDigits)] policy: SanitizePolicy,
    #[values(1, 3, 8, 20)] max: usize,
    #[values(
        "- Getting started",
        "01. Intro.md",
        "a.b.c.d.e.f.g",
        "  _ . _ ",
        "Chapter 12 ___ end",
        "Mr. Smith goes to Washington.txt",
        "../../etc/passwd",
        "2024",
        "...",
        "x_y_z_w_v_u"
    )]
    input: &str,
) {
    let once = sanitize(input, max, policy);
    let twice = sanitize(&once, max, policy);
    assert_eq!(once, twice, "input {:?}, policy {}, max {}", input, policy, max);
}

#[rstest]
#[case("A very long chapter title about things.md", ".md")]
#[case("Quarterly numbers for the whole company.csv", ".csv")]
fn given_long_name_with_extension_when_sanitized_then_base_fits_and_extension_survives(
    #[case] input: &str,
    #[case] ext: &str,
) {
    let result = sanitize(input, MAX, SanitizePolicy::Default);

    assert!(result.ends_with(ext), "{}", result);
    let base = &result[..result.len() - ext.len()];
    assert!(base.chars().count() <= MAX, "{}", base);
    assert!(base.contains(ELLIPSIS));
}

#[test]
fn given_long_name_when_sanitized_then_start_and_end_are_kept() {
    let result = sanitize("abcdefghijklmnopqrstuvwxyz", MAX, SanitizePolicy::Default);

    assert_eq!(result, "abcdefghij…rstuvwxyz");
    assert_eq!(result.chars().count(), MAX);
}

#[rstest]
#[case("../../etc/passwd")]
#[case("..\\..\\windows\\system32")]
#[case("/absolute/path")]
#[case("..")]
fn given_traversal_sequence_when_sanitized_then_neutralized(
    #[case] input: &str,
    #[values(SanitizePolicy::Default, SanitizePolicy::StripDigits)] policy: SanitizePolicy,
) {
    let result = sanitize(input, MAX, policy);

    assert!(!result.contains('/'), "{}", result);
    assert!(!result.contains('\\'), "{}", result);
    assert_ne!(result, "..");
    assert_ne!(result, ".");
    assert!(!result.starts_with(".."), "{}", result);
}
