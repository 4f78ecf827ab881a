use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CaseError;

/// Oldest age accepted at case intake
pub const MAX_AGE: u8 = 150;

/// A patient case as submitted for analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CaseDescription {
    pub patient_info: PatientInfo,
    pub clinical_data: ClinicalData,
}

/// Patient demographics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub age: u8,
    pub gender: Gender,
    pub patient_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        };
        f.write_str(label)
    }
}

/// Clinical findings for a case.
///
/// Only the chief complaint and history of presenting illness are required;
/// every other field may be absent and is then left out of the prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalData {
    pub chief_complaint: String,
    pub history_of_presenting_illness: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_medical_history: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_surgical_history: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current_medications: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergies: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_history: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_history: Option<String>,

    #[serde(default)]
    pub examination_findings: ExaminationFindings,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investigation_results: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExaminationFindings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Vitals>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general_examination: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub systemic_examination: Option<String>,
}

/// Vital signs, recorded as free text. `None` means not recorded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<String>,
}

impl Vitals {
    /// Labelled vitals that were actually recorded, in prompt order
    pub fn recorded(&self) -> Vec<(&'static str, &str)> {
        [
            ("Temperature", &self.temperature),
            ("Blood Pressure", &self.blood_pressure),
            ("Heart Rate", &self.heart_rate),
            ("Respiratory Rate", &self.respiratory_rate),
            ("Oxygen Saturation", &self.oxygen_saturation),
        ]
        .into_iter()
        .filter_map(|(label, value)| present(value).map(|v| (label, v)))
        .collect()
    }
}

impl ExaminationFindings {
    /// True when there is nothing to report under examination findings
    pub fn is_empty(&self) -> bool {
        self.vitals.as_ref().is_none_or(|v| v.recorded().is_empty())
            && present(&self.general_examination).is_none()
            && present(&self.systemic_examination).is_none()
    }
}

impl CaseDescription {
    /// Check the intake constraints on a case.
    ///
    /// Rendering does not depend on this; callers run it before a case
    /// reaches the model.
    pub fn validate(&self) -> Result<(), CaseError> {
        if self.patient_info.age > MAX_AGE {
            return Err(CaseError::AgeOutOfRange(self.patient_info.age));
        }
        if self.patient_info.patient_id.trim().is_empty() {
            return Err(CaseError::MissingField("patientId"));
        }
        if self.clinical_data.chief_complaint.trim().is_empty() {
            return Err(CaseError::MissingField("chiefComplaint"));
        }
        if self.clinical_data.history_of_presenting_illness.trim().is_empty() {
            return Err(CaseError::MissingField("historyOfPresentingIllness"));
        }
        Ok(())
    }
}

/// A free-text value counts as present when it has non-whitespace content
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_case() -> CaseDescription {
        CaseDescription {
            patient_info: PatientInfo {
                age: 42,
                gender: Gender::Female,
                patient_id: "P-001".to_string(),
            },
            clinical_data: ClinicalData {
                chief_complaint: "Cough for 5 days".to_string(),
                history_of_presenting_illness: "Productive cough with fever".to_string(),
                ..ClinicalData::default()
            },
        }
    }

    #[test]
    fn minimal_case_is_valid() {
        assert_eq!(minimal_case().validate(), Ok(()));
    }

    #[test]
    fn rejects_age_over_limit() {
        let mut case = minimal_case();
        case.patient_info.age = 151;
        assert_eq!(case.validate(), Err(CaseError::AgeOutOfRange(151)));
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut case = minimal_case();
        case.clinical_data.chief_complaint = "   ".to_string();
        assert_eq!(
            case.validate(),
            Err(CaseError::MissingField("chiefComplaint"))
        );

        let mut case = minimal_case();
        case.patient_info.patient_id.clear();
        assert_eq!(case.validate(), Err(CaseError::MissingField("patientId")));
    }

    #[test]
    fn deserializes_camel_case_wire_shape() {
        let json = serde_json::json!({
            "patientInfo": {"age": 67, "gender": "Male", "patientId": "MRN-9"},
            "clinicalData": {
                "chiefComplaint": "Chest pain",
                "historyOfPresentingIllness": "Two hours of central chest pain",
                "currentMedications": ["Aspirin 75mg"],
                "examinationFindings": {
                    "vitals": {"heartRate": "112 bpm", "temperature": ""}
                }
            }
        });

        let case: CaseDescription = serde_json::from_value(json).unwrap();
        assert_eq!(case.patient_info.gender, Gender::Male);
        assert_eq!(case.clinical_data.current_medications, vec!["Aspirin 75mg"]);
        assert!(case.clinical_data.allergies.is_empty());

        let vitals = case.clinical_data.examination_findings.vitals.unwrap();
        assert_eq!(vitals.recorded(), vec![("Heart Rate", "112 bpm")]);
    }

    #[test]
    fn blank_findings_count_as_empty() {
        let findings = ExaminationFindings {
            vitals: Some(Vitals::default()),
            general_examination: Some(" ".to_string()),
            systemic_examination: None,
        };
        assert!(findings.is_empty());
    }
}
