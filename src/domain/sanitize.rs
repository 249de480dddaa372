//! Filesystem name sanitization
//!
//! Two interchangeable policies turn an outline label into a file or
//! directory name:
//!
//! - [`SanitizePolicy::Default`]: strips leading list markers (`-`, `.`) and
//!   whitespace, removes illegal characters and turns internal dots into
//!   underscores.
//! - [`SanitizePolicy::StripDigits`]: removes illegal characters, deletes every
//!   dot and strips a leading run of digits (`01 Intro` → ` Intro`).
//!
//! Both then shorten over-long names by replacing the middle with `…` and
//! scrub dots, spaces and underscores from the last few characters so no
//! name ends in an artifact like `Intro.` or `Intro_`.
//!
//! A recognizable extension (`notes.md`, `data.csv`) survives all of this
//! unchanged.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Marker inserted where the middle of an over-long name was cut out.
pub const ELLIPSIS: char = '…';

/// Number of trailing characters checked for `.`, ` ` and `_`.
const SCRUB_WINDOW: usize = 5;
const SCRUB_CHARS: [char; 3] = ['.', ' ', '_'];

/// Longest extension (without the dot) that is kept apart from the base.
const MAX_EXTENSION_LEN: usize = 4;

static ILLEGAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*()\x00-\x1F\x7F]"#).unwrap());
static LIST_MARKERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s.\-]+").unwrap());
static LEADING_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+").unwrap());

/// Name cleaning policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SanitizePolicy {
    /// Strip list markers, replace dots with underscores.
    #[default]
    Default,
    /// Delete dots, strip leading digits.
    StripDigits,
}

impl std::str::FromStr for SanitizePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "strip-digits" | "strip_digits" => Ok(Self::StripDigits),
            other => Err(format!(
                "unknown sanitize policy {:?} (expected \"default\" or \"strip-digits\")",
                other
            )),
        }
    }
}

impl fmt::Display for SanitizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::StripDigits => f.write_str("strip-digits"),
        }
    }
}

/// Sanitize `name` into a filesystem-safe name of at most `max_length`
/// characters (excluding a preserved extension).
///
/// The result may be empty when nothing usable is left; see [`sanitize_name`]
/// for the checked variant.
///
/// # Examples
/// ```
/// use outline_docs::domain::{sanitize, SanitizePolicy};
///
/// assert_eq!(sanitize("- Getting started", 20, SanitizePolicy::Default), "Getting started");
/// assert_eq!(sanitize("v1.2 notes", 20, SanitizePolicy::Default), "v1_2 notes");
/// assert_eq!(sanitize("01 Intro", 20, SanitizePolicy::StripDigits), " Intro");
/// ```
pub fn sanitize(name: &str, max_length: usize, policy: SanitizePolicy) -> String {
    let max_length = max_length.max(1);
    // Scrubbing can expose a new leading marker or digit, so passes repeat
    // until the name is stable. Every repeat only removes characters.
    let mut current = sanitize_pass(name, max_length, policy);
    loop {
        let next = sanitize_pass(&current, max_length, policy);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Like [`sanitize`], but rejects names that sanitize to nothing.
pub fn sanitize_name(name: &str, max_length: usize, policy: SanitizePolicy) -> DomainResult<String> {
    let sanitized = sanitize(name, max_length, policy);
    if sanitized.is_empty() {
        return Err(DomainError::SanitizationDegenerate {
            name: name.to_string(),
        });
    }
    Ok(sanitized)
}

fn sanitize_pass(name: &str, max_length: usize, policy: SanitizePolicy) -> String {
    let cleaned = ILLEGAL_CHARS.replace_all(name, "");
    let cleaned = match policy {
        SanitizePolicy::Default => LIST_MARKERS.replace(&cleaned, "").trim().to_string(),
        SanitizePolicy::StripDigits => cleaned.into_owned(),
    };

    let (base, ext) = split_extension(&cleaned);
    let base = clean_base(base, policy);
    if base.is_empty() && !ext.is_empty() {
        // `.md` alone would be a hidden file: treat the extension as name.
        return finish(&clean_base(&cleaned, policy), "", max_length);
    }
    finish(&base, ext, max_length)
}

fn clean_base(base: &str, policy: SanitizePolicy) -> String {
    match policy {
        SanitizePolicy::Default => base.replace('.', "_").trim().to_string(),
        SanitizePolicy::StripDigits => LEADING_DIGITS
            .replace(&base.replace('.', ""), "")
            .trim_end()
            .to_string(),
    }
}

fn finish(base: &str, ext: &str, max_length: usize) -> String {
    if base.is_empty() {
        return String::new();
    }
    let base = truncate_middle(base, max_length);
    let base = scrub_tail(&base);
    format!("{}{}", base, ext)
}

/// Split off a recognizable extension: a final dot followed by 1-4 ASCII
/// alphanumerics with at least one letter. The returned extension keeps its dot.
fn split_extension(name: &str) -> (&str, &str) {
    if let Some(pos) = name.rfind('.') {
        let (base, ext) = name.split_at(pos);
        let suffix = &ext[1..];
        let recognizable = !base.is_empty()
            && !base.ends_with(char::is_whitespace)
            && (1..=MAX_EXTENSION_LEN).contains(&suffix.len())
            && suffix.chars().all(|c| c.is_ascii_alphanumeric())
            && suffix.chars().any(|c| c.is_ascii_alphabetic());
        if recognizable {
            return (base, ext);
        }
    }
    (name, "")
}

/// Replace the middle of `base` with [`ELLIPSIS`] so that it fits `max_length`.
fn truncate_middle(base: &str, max_length: usize) -> String {
    let chars: Vec<char> = base.chars().collect();
    if chars.len() <= max_length {
        return base.to_string();
    }
    let keep = max_length.saturating_sub(1);
    let tail = keep / 2;
    let head = keep - tail;

    let mut out: String = chars[..head].iter().collect();
    out.push(ELLIPSIS);
    out.extend(&chars[chars.len() - tail..]);
    out
}

/// Remove `.`, ` ` and `_` from the last [`SCRUB_WINDOW`] characters until
/// the window is clean. A base made only of such characters becomes `_`.
fn scrub_tail(base: &str) -> String {
    let mut chars: Vec<char> = base.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    loop {
        let start = chars.len().saturating_sub(SCRUB_WINDOW);
        if !chars[start..].iter().any(|c| SCRUB_CHARS.contains(c)) {
            break;
        }
        let kept: Vec<char> = chars
            .split_off(start)
            .into_iter()
            .filter(|c| !SCRUB_CHARS.contains(c))
            .collect();
        chars.extend(kept);
    }
    if chars.is_empty() {
        return "_".to_string();
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension_recognizable() {
        assert_eq!(split_extension("notes.md"), ("notes", ".md"));
        assert_eq!(split_extension("data.csv"), ("data", ".csv"));
    }

    #[test]
    fn test_split_extension_rejects_non_extensions() {
        assert_eq!(split_extension("v1.2"), ("v1.2", ""));
        assert_eq!(split_extension("Mr. Smith"), ("Mr. Smith", ""));
        assert_eq!(split_extension(".md"), (".md", ""));
        assert_eq!(split_extension("archive.tar12345"), ("archive.tar12345", ""));
    }

    #[test]
    fn test_truncate_middle_fits_budget() {
        let result = truncate_middle("abcdefghijklmnopqrstuvwxyz", 20);
        assert_eq!(result.chars().count(), 20);
        assert_eq!(result, "abcdefghij…rstuvwxyz");
    }

    #[test]
    fn test_truncate_middle_short_name_untouched() {
        assert_eq!(truncate_middle("short", 20), "short");
    }

    #[test]
    fn test_scrub_tail_removes_trailing_artifacts() {
        assert_eq!(scrub_tail("Intro_"), "Intro");
        assert_eq!(scrub_tail("Chapter a_b"), "Chapterab");
        assert_eq!(scrub_tail("keep_me_here"), "keep_mehere");
    }

    #[test]
    fn test_scrub_tail_repeats_until_window_clean() {
        // "ab_c_d_e_f": first window "d_e_f" -> "def", which pulls "_c" in
        assert_eq!(scrub_tail("ab_c_d_e_f"), "abcdef");
    }

    #[test]
    fn test_scrub_tail_all_artifacts_becomes_underscore() {
        assert_eq!(scrub_tail("___"), "_");
    }

    #[test]
    fn test_sanitize_name_rejects_degenerate() {
        let result = sanitize_name("???", 20, SanitizePolicy::Default);
        assert!(matches!(
            result,
            Err(DomainError::SanitizationDegenerate { .. })
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("strip-digits".parse::<SanitizePolicy>(), Ok(SanitizePolicy::StripDigits));
        assert_eq!(" Default ".parse::<SanitizePolicy>(), Ok(SanitizePolicy::Default));
        assert!("digits".parse::<SanitizePolicy>().is_err());
    }

    #[test]
    fn test_policy_deserializes_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: SanitizePolicy,
        }
        let w: Wrapper = toml::from_str(r#"policy = "strip-digits""#).unwrap();
        assert_eq!(w.policy, SanitizePolicy::StripDigits);
    }
}
