//! Locating the six report sections in free text
//!
//! Headers are found as anchors and the text is sliced between consecutive
//! anchors. A section is looked up in two tiers:
//!
//! - Primary: a bold header line (`**DIFFERENTIAL DIAGNOSIS**`, colon
//!   optional inside or after the emphasis).
//! - Fallback: the same header text at the start of a line without the
//!   emphasis, optionally behind markdown heading hashes or a number.
//!
//! A primary body runs to the next bold or markdown heading line. A fallback
//! body also stops at any plain section header, since nothing else marks
//! where it ends.

use std::sync::LazyLock;

use regex::Regex;

use super::subsections::SUB_LABELS;
use crate::report::ReportSection;

/// Which header form a section was found with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMatch<'a> {
    pub tier: Tier,
    pub body: &'a str,
}

struct SectionPattern {
    section: ReportSection,
    bold: Regex,
    plain: Regex,
}

fn label(section: ReportSection) -> &'static str {
    match section {
        ReportSection::ClinicalAssessment => r"CLINICAL[ \t]+ASSESSMENT",
        ReportSection::DifferentialDiagnosis => r"DIFFERENTIAL[ \t]+DIAGNOS[EI]S",
        ReportSection::RecommendedInvestigations => r"RECOMMENDED[ \t]+INVESTIGATIONS?",
        ReportSection::TreatmentPlan => r"TREATMENT[ \t]+PLAN",
        ReportSection::PatientCounseling => r"PATIENT[ \t]+COUNSELL?ING(?:[ \t]+POINTS?)?",
        ReportSection::RedFlags => r"RED[ \t]+FLAGS?",
    }
}

/// Text allowed after a label, e.g. "/ WHEN TO SEEK IMMEDIATE CARE".
///
/// Inside emphasis anything up to the closing `**` is header. Without it only
/// a slash or parenthesised qualifier is, so a prose line such as "Red flags
/// are absent" is not a header.
fn qualifier(section: ReportSection, bold: bool) -> &'static str {
    match (section, bold) {
        (ReportSection::RedFlags, true) => r"[^\n*:]*",
        (ReportSection::RedFlags, false) => r"(?:[ \t]*(?:/[^\n*:]*|\([^\n)]*\)))?",
        _ => "",
    }
}

static PATTERNS: LazyLock<Vec<SectionPattern>> = LazyLock::new(|| {
    ReportSection::ALL
        .into_iter()
        .map(|section| {
            let label = label(section);
            let bold_qualifier = qualifier(section, true);
            let plain_qualifier = qualifier(section, false);
            SectionPattern {
                section,
                bold: Regex::new(&format!(
                    r"(?im)^[ \t]*(?:#{{1,6}}[ \t]*)?\*\*[ \t]*(?:\d+[.)][ \t]*)?(?:{label}){bold_qualifier}[ \t]*:?[ \t]*\*\*[ \t]*:?"
                ))
                .expect("valid bold header pattern"),
                plain: Regex::new(&format!(
                    r"(?im)^[ \t]*(?:#{{1,6}}[ \t]*)?(?:\d+[.)][ \t]*)?(?:\*{{1,2}}|_{{1,2}})?[ \t]*(?:{label}){plain_qualifier}[ \t]*(?:\*{{1,2}}|_{{1,2}})?[ \t]*(?::[ \t]*(?:\*{{1,2}}|_{{1,2}})?|[ \t\r]*$)"
                ))
                .expect("valid plain header pattern"),
            }
        })
        .collect()
});

/// Any bold or markdown heading line, with its label captured
static HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:#{1,6}[ \t]+(?:\*\*)?|(?:#{1,6}[ \t]*)?\*\*)[ \t]*(?P<label>[^*\n]+)")
        .expect("valid heading line pattern")
});

static SUB_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    let labels: Vec<&str> = SUB_LABELS.iter().map(|l| l.pattern).collect();
    Regex::new(&format!(r"(?i)^(?:{})\b", labels.join("|"))).expect("valid sub-label prefix pattern")
});

/// Header anchors of one response, ready for section lookups
pub struct SectionIndex<'a> {
    text: &'a str,
    /// Bold or markdown heading lines, excluding sub-labels
    headings: Vec<usize>,
    /// Headings plus every plain section header
    anchors: Vec<usize>,
}

impl<'a> SectionIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let headings: Vec<usize> = HEADING_LINE
            .captures_iter(text)
            .filter(|caps| !SUB_LABEL.is_match(caps["label"].trim_start()))
            .filter_map(|caps| caps.get(0).map(|m| m.start()))
            .collect();

        let mut anchors = headings.clone();
        for pattern in PATTERNS.iter() {
            anchors.extend(pattern.plain.find_iter(text).map(|m| m.start()));
        }
        anchors.sort_unstable();
        anchors.dedup();

        Self {
            text,
            headings,
            anchors,
        }
    }

    /// Find a section's body, preferring the bold header form
    pub fn find(&self, section: ReportSection) -> Option<SectionMatch<'a>> {
        let pattern = PATTERNS.iter().find(|p| p.section == section)?;

        let (tier, header) = match pattern.bold.find(self.text) {
            Some(m) => (Tier::Primary, m),
            None => (Tier::Fallback, pattern.plain.find(self.text)?),
        };

        let boundaries = match tier {
            Tier::Primary => &self.headings,
            Tier::Fallback => &self.anchors,
        };

        let end = boundaries
            .iter()
            .copied()
            .find(|&b| b >= header.end())
            .unwrap_or(self.text.len());

        Some(SectionMatch {
            tier,
            body: &self.text[header.end()..end],
        })
    }
}
