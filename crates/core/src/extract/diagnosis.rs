//! Differential diagnosis line parsing
//!
//! Each matcher turns a single line into a diagnosis entry or nothing.
//! Matchers are tried in order over the whole section and the first one
//! that recovers at least one entry decides the result; entries from
//! different matchers are never mixed.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::report::{DiagnosisEntry, Probability};

type LineMatcher = fn(&str) -> Option<DiagnosisEntry>;

/// Most structured first
const MATCHERS: [LineMatcher; 3] = [labelled_probability, trailing_probability, bare_numbered];

/// `1. Pneumonia - Probability: High`
static LABELLED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*\d+[.)]\s+(?P<dx>.+?)\s*[-–—(]\s*Probability\s*:\s*\**\s*(?P<p>High|Moderate|Low)\b",
    )
    .expect("valid labelled probability pattern")
});

/// `1. Pneumonia - High probability`
static TRAILING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\d+[.)]\s+(?P<dx>.+?)\s*[-–—(]\s*\**\s*(?P<p>High|Moderate|Low)\**\s+probability\b")
        .expect("valid trailing probability pattern")
});

/// `1. Pneumonia`
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+[.)]\s+(?P<dx>\S.*)$").expect("valid numbered line pattern")
});

/// Parse the body of a differential diagnosis section
pub fn parse_differential(body: &str) -> Vec<DiagnosisEntry> {
    MATCHERS
        .iter()
        .map(|matcher| body.lines().filter_map(matcher).collect::<Vec<_>>())
        .find(|entries| !entries.is_empty())
        .unwrap_or_default()
}

fn labelled_probability(line: &str) -> Option<DiagnosisEntry> {
    LABELLED.captures(line).and_then(|caps| with_probability(&caps))
}

fn trailing_probability(line: &str) -> Option<DiagnosisEntry> {
    TRAILING.captures(line).and_then(|caps| with_probability(&caps))
}

fn bare_numbered(line: &str) -> Option<DiagnosisEntry> {
    let caps = NUMBERED.captures(line)?;
    let diagnosis = diagnosis_name(&caps["dx"])?;
    Some(DiagnosisEntry::new(diagnosis, Probability::Moderate))
}

fn with_probability(caps: &Captures<'_>) -> Option<DiagnosisEntry> {
    let diagnosis = diagnosis_name(&caps["dx"])?;
    Some(DiagnosisEntry::new(
        diagnosis,
        Probability::parse_lenient(&caps["p"]),
    ))
}

/// Trim whitespace and surrounding emphasis; empty names are rejected
fn diagnosis_name(raw: &str) -> Option<&str> {
    let name = raw.trim().trim_matches(['*', '_']).trim();
    (!name.is_empty()).then_some(name)
}
