//! Labelled sub-blocks inside the investigations and treatment sections

use std::sync::LazyLock;

use regex::Regex;

use super::lists::bullet_list;
use crate::report::{RecommendedInvestigations, TreatmentPlan};

/// What may sit between a sub-label and the text it introduces
#[derive(Debug, Clone, Copy)]
enum Trailer {
    /// Up to three more words before a colon, or nothing else on the line
    Words,
    /// Any text up to the first colon on the line
    Clause,
    /// An optional colon; the rest of the line is already body
    Open,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct SubLabel {
    pub(super) pattern: &'static str,
    trailer: Trailer,
}

const fn label(pattern: &'static str, trailer: Trailer) -> SubLabel {
    SubLabel { pattern, trailer }
}

const ESSENTIAL_LABEL: SubLabel = label("essential", Trailer::Words);
const ADDITIONAL_LABEL: SubLabel = label("additional", Trailer::Clause);
const CONSIDER_IF_LABEL: SubLabel = label(r"consider[ \t]+if", Trailer::Open);
const CONSIDER_LABEL: SubLabel = label("consider", Trailer::Words);
const IMMEDIATE_LABEL: SubLabel = label(r"immediate[ \t]+management", Trailer::Words);
const PHARMACOLOGICAL_LABEL: SubLabel = label("pharmacological", Trailer::Words);
const NON_PHARMACOLOGICAL_LABEL: SubLabel = label("non[- ]?pharmacological", Trailer::Words);
const MONITORING_LABEL: SubLabel = label("monitoring", Trailer::Words);
const SUPPORTING_FEATURES_LABEL: SubLabel = label(r"supporting[ \t]+features", Trailer::Words);
const INVESTIGATIONS_NEEDED_LABEL: SubLabel = label(r"investigations[ \t]+needed", Trailer::Words);

/// Every label that can open a sub-block within a section. Bold lines with
/// these labels do not end the enclosing section.
pub(super) const SUB_LABELS: [SubLabel; 10] = [
    ESSENTIAL_LABEL,
    ADDITIONAL_LABEL,
    CONSIDER_IF_LABEL,
    CONSIDER_LABEL,
    IMMEDIATE_LABEL,
    PHARMACOLOGICAL_LABEL,
    NON_PHARMACOLOGICAL_LABEL,
    MONITORING_LABEL,
    SUPPORTING_FEATURES_LABEL,
    INVESTIGATIONS_NEEDED_LABEL,
];

static ESSENTIAL: LazyLock<Regex> = LazyLock::new(|| sub_label(&[ESSENTIAL_LABEL]));
static ADDITIONAL: LazyLock<Regex> =
    LazyLock::new(|| sub_label(&[CONSIDER_IF_LABEL, ADDITIONAL_LABEL, CONSIDER_LABEL]));
static IMMEDIATE: LazyLock<Regex> = LazyLock::new(|| sub_label(&[IMMEDIATE_LABEL]));
static PHARMACOLOGICAL: LazyLock<Regex> = LazyLock::new(|| sub_label(&[PHARMACOLOGICAL_LABEL]));
static NON_PHARMACOLOGICAL: LazyLock<Regex> =
    LazyLock::new(|| sub_label(&[NON_PHARMACOLOGICAL_LABEL]));
static MONITORING: LazyLock<Regex> = LazyLock::new(|| sub_label(&[MONITORING_LABEL]));

impl SubLabel {
    fn regex_fragment(&self) -> String {
        let pattern = self.pattern;
        match self.trailer {
            Trailer::Words => format!(
                r"(?:{pattern})\b(?:(?:[ \t]+[\w/()-]+){{0,3}}?[ \t]*(?:\*\*|__)?[ \t]*:[ \t]*(?:\*\*|__)?|[ \t]*(?:\*\*|__)?[ \t\r]*$)"
            ),
            Trailer::Clause => format!(
                r"(?:{pattern})\b(?:[^\n:]*?[ \t]*(?:\*\*|__)?[ \t]*:[ \t]*(?:\*\*|__)?|[ \t]*(?:\*\*|__)?[ \t\r]*$)"
            ),
            Trailer::Open => {
                format!(r"(?:{pattern})\b[ \t]*(?:\*\*|__)?[ \t]*:?[ \t]*(?:\*\*|__)?")
            }
        }
    }
}

/// Build a line-start matcher for one or more sub-labels.
///
/// Accepts an optional bullet and bold emphasis before the label. A short
/// label either ends its line or is followed (after at most three more
/// words) by a colon, so prose such as "Monitoring renal function daily" is
/// not taken for a label.
fn sub_label(labels: &[SubLabel]) -> Regex {
    let alternatives: Vec<String> = labels.iter().map(SubLabel::regex_fragment).collect();
    Regex::new(&format!(
        r"(?im)^[ \t]*(?:[-•*+][ \t]*)?(?:\*\*|__)?[ \t]*(?:{})",
        alternatives.join("|")
    ))
    .expect("valid sub-label pattern")
}

/// Slice `text` into the bodies that follow each label.
///
/// Only the first occurrence of each label counts. A body runs from the end
/// of its label to the start of the next label found, or to the end.
fn labelled_bodies<'a, const N: usize>(text: &'a str, labels: [&Regex; N]) -> [Option<&'a str>; N] {
    let spans: [Option<(usize, usize)>; N] =
        labels.map(|re| re.find(text).map(|m| (m.start(), m.end())));

    std::array::from_fn(|i| {
        let (_, end) = spans[i]?;
        let next = spans
            .iter()
            .flatten()
            .map(|(start, _)| *start)
            .filter(|start| *start >= end)
            .min()
            .unwrap_or(text.len());
        Some(&text[end..next])
    })
}

pub fn parse_investigations(body: &str) -> RecommendedInvestigations {
    let [essential, additional] = labelled_bodies(body, [&*ESSENTIAL, &*ADDITIONAL]);

    RecommendedInvestigations {
        essential: essential.map(bullet_list).unwrap_or_default(),
        additional: additional.map(bullet_list).unwrap_or_default(),
    }
}

pub fn parse_treatment_plan(body: &str) -> TreatmentPlan {
    let [immediate, pharmacological, non_pharmacological, monitoring] = labelled_bodies(
        body,
        [&*IMMEDIATE, &*PHARMACOLOGICAL, &*NON_PHARMACOLOGICAL, &*MONITORING],
    );

    TreatmentPlan {
        immediate_management: immediate.map(|s| s.trim().to_string()).unwrap_or_default(),
        pharmacological: pharmacological.map(bullet_list).unwrap_or_default(),
        non_pharmacological: non_pharmacological.map(bullet_list).unwrap_or_default(),
        monitoring: monitoring.map(bullet_list).unwrap_or_default(),
    }
}
