use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Structured clinical report recovered from a model response.
///
/// Every field has a zero value so a report can always be produced, even
/// when the response could not be parsed at all. `raw_text` keeps the
/// untouched response for audit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalReport {
    pub clinical_assessment: String,
    pub differential_diagnosis: Vec<DiagnosisEntry>,
    pub recommended_investigations: RecommendedInvestigations,
    pub treatment_plan: TreatmentPlan,
    pub patient_counseling: Vec<String>,
    pub red_flags: Vec<String>,
    pub raw_text: String,
}

/// One candidate diagnosis, most likely first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisEntry {
    pub diagnosis: String,
    #[serde(default)]
    pub probability: Probability,
    // Not filled by extraction yet; kept so stored reports round-trip.
    #[serde(default)]
    pub supporting_features: Vec<String>,
    #[serde(default)]
    pub investigations_needed: Vec<String>,
}

impl DiagnosisEntry {
    pub fn new(diagnosis: impl Into<String>, probability: Probability) -> Self {
        Self {
            diagnosis: diagnosis.into(),
            probability,
            supporting_features: Vec::new(),
            investigations_needed: Vec::new(),
        }
    }
}

/// Qualitative likelihood of a diagnosis
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Probability {
    High,
    #[default]
    Moderate,
    Low,
}

impl Probability {
    /// Parse a probability word, falling back to `Moderate` for anything
    /// unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for Probability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Probability::High),
            "moderate" => Ok(Probability::Moderate),
            "low" => Ok(Probability::Low),
            other => Err(format!("Unknown probability: {}", other)),
        }
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Probability::High => "High",
            Probability::Moderate => "Moderate",
            Probability::Low => "Low",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedInvestigations {
    pub essential: Vec<String>,
    pub additional: Vec<String>,
}

impl RecommendedInvestigations {
    pub fn is_empty(&self) -> bool {
        self.essential.is_empty() && self.additional.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentPlan {
    pub immediate_management: String,
    pub pharmacological: Vec<String>,
    pub non_pharmacological: Vec<String>,
    pub monitoring: Vec<String>,
}

impl TreatmentPlan {
    pub fn is_empty(&self) -> bool {
        self.immediate_management.is_empty()
            && self.pharmacological.is_empty()
            && self.non_pharmacological.is_empty()
            && self.monitoring.is_empty()
    }
}

/// The six report sections, in the order the model is asked to write them
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ReportSection {
    ClinicalAssessment,
    DifferentialDiagnosis,
    RecommendedInvestigations,
    TreatmentPlan,
    PatientCounseling,
    RedFlags,
}

impl ReportSection {
    pub const ALL: [ReportSection; 6] = [
        ReportSection::ClinicalAssessment,
        ReportSection::DifferentialDiagnosis,
        ReportSection::RecommendedInvestigations,
        ReportSection::TreatmentPlan,
        ReportSection::PatientCounseling,
        ReportSection::RedFlags,
    ];

    /// Header text the model is instructed to use for this section
    pub fn header(self) -> &'static str {
        match self {
            ReportSection::ClinicalAssessment => "CLINICAL ASSESSMENT",
            ReportSection::DifferentialDiagnosis => "DIFFERENTIAL DIAGNOSIS",
            ReportSection::RecommendedInvestigations => "RECOMMENDED INVESTIGATIONS",
            ReportSection::TreatmentPlan => "TREATMENT PLAN",
            ReportSection::PatientCounseling => "PATIENT COUNSELING POINTS",
            ReportSection::RedFlags => "RED FLAGS / WHEN TO SEEK IMMEDIATE CARE",
        }
    }

    /// Short identifier used in logs and metric labels
    pub fn as_str(self) -> &'static str {
        match self {
            ReportSection::ClinicalAssessment => "clinical_assessment",
            ReportSection::DifferentialDiagnosis => "differential_diagnosis",
            ReportSection::RecommendedInvestigations => "recommended_investigations",
            ReportSection::TreatmentPlan => "treatment_plan",
            ReportSection::PatientCounseling => "patient_counseling",
            ReportSection::RedFlags => "red_flags",
        }
    }
}

impl fmt::Display for ReportSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ClinicalReport {
    /// A report with every section at its default
    pub fn empty(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    /// Whether a section was left at its default value
    pub fn is_missing(&self, section: ReportSection) -> bool {
        match section {
            ReportSection::ClinicalAssessment => self.clinical_assessment.is_empty(),
            ReportSection::DifferentialDiagnosis => self.differential_diagnosis.is_empty(),
            ReportSection::RecommendedInvestigations => self.recommended_investigations.is_empty(),
            ReportSection::TreatmentPlan => self.treatment_plan.is_empty(),
            ReportSection::PatientCounseling => self.patient_counseling.is_empty(),
            ReportSection::RedFlags => self.red_flags.is_empty(),
        }
    }

    /// Sections that came back empty, in report order.
    ///
    /// An incomplete report is still a valid report; this is for callers
    /// that want to flag it rather than hide it.
    pub fn missing_sections(&self) -> Vec<ReportSection> {
        ReportSection::ALL
            .into_iter()
            .filter(|s| self.is_missing(*s))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_sections().is_empty()
    }
}
