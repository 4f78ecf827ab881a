//! Clinical report extraction from free-form model output
//!
//! The model is asked for six headed sections but its formatting drifts
//! between calls. Each section is located on its own (see `sections`) and
//! its body parsed according to the field it fills. Anything that cannot
//! be found keeps its default, so extraction always yields a full report.

pub mod diagnosis;
pub mod lists;
pub mod sections;
pub mod subsections;

use crate::report::{ClinicalReport, ReportSection};
use sections::SectionIndex;

/// Parse a model response into a `ClinicalReport`.
///
/// Never fails. The response is kept verbatim in `raw_text`.
pub fn extract(raw_text: &str) -> ClinicalReport {
    let index = SectionIndex::new(raw_text);
    let mut report = ClinicalReport::empty(raw_text);

    for section in ReportSection::ALL {
        let Some(found) = index.find(section) else {
            tracing::debug!(section = %section, "Section not found in response");
            continue;
        };

        tracing::debug!(
            section = %section,
            tier = ?found.tier,
            body_len = found.body.len(),
            "Section located"
        );

        let body = found.body;
        match section {
            ReportSection::ClinicalAssessment => {
                report.clinical_assessment = body.trim().to_string();
            }
            ReportSection::DifferentialDiagnosis => {
                report.differential_diagnosis = diagnosis::parse_differential(body);
            }
            ReportSection::RecommendedInvestigations => {
                report.recommended_investigations = subsections::parse_investigations(body);
            }
            ReportSection::TreatmentPlan => {
                report.treatment_plan = subsections::parse_treatment_plan(body);
            }
            ReportSection::PatientCounseling => {
                report.patient_counseling = lists::bullet_list(body);
            }
            ReportSection::RedFlags => {
                report.red_flags = lists::bullet_list(body);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Probability;

    const SAMPLE: &str = "**CLINICAL ASSESSMENT**
34-year-old man with 3 days of fever, productive cough and right basal crackles. SpO2 93% on air.

**DIFFERENTIAL DIAGNOSIS**
1. Community-acquired pneumonia - Probability: High
   - Supporting features: fever, focal crackles
   - Investigations needed: chest X-ray
2. Acute bronchitis - Probability: Moderate
3. Pulmonary embolism - Probability: Low

**RECOMMENDED INVESTIGATIONS**
- Essential: Chest X-ray
- FBC, CRP, U&E
- Consider if: no improvement in 48 hours, sputum culture

**TREATMENT PLAN**
- Immediate management: Oxygen to target SpO2 94-98%
- Pharmacological: Amoxicillin 500mg TDS for 5 days
- Non-pharmacological: Rest and oral fluids
- Monitoring: Temperature and SpO2 every 4 hours

**PATIENT COUNSELING POINTS**
- Complete the full antibiotic course
- Paracetamol can be used for fever

**RED FLAGS / WHEN TO SEEK IMMEDIATE CARE**
- Worsening breathlessness
- Confusion or drowsiness
";

    #[test]
    fn empty_input_yields_default_report() {
        let report = extract("");
        assert_eq!(report, ClinicalReport::default());
        assert_eq!(report.raw_text, "");
    }

    #[test]
    fn unstructured_input_keeps_raw_text_only() {
        let text = "I am unable to provide an assessment without more information.";
        let report = extract(text);
        assert_eq!(report, ClinicalReport::empty(text));
    }

    #[test]
    fn full_bold_report_populates_every_field() {
        let report = extract(SAMPLE);

        assert!(report.is_complete(), "missing {:?}", report.missing_sections());
        assert_eq!(report.raw_text, SAMPLE);
        assert!(report.clinical_assessment.starts_with("34-year-old man"));
        assert!(report.clinical_assessment.ends_with("SpO2 93% on air."));

        let dx: Vec<_> = report
            .differential_diagnosis
            .iter()
            .map(|d| (d.diagnosis.as_str(), d.probability))
            .collect();
        assert_eq!(
            dx,
            vec![
                ("Community-acquired pneumonia", Probability::High),
                ("Acute bronchitis", Probability::Moderate),
                ("Pulmonary embolism", Probability::Low),
            ]
        );

        assert_eq!(
            report.recommended_investigations.essential,
            vec!["Chest X-ray", "FBC, CRP, U&E"]
        );
        assert_eq!(
            report.recommended_investigations.additional,
            vec!["no improvement in 48 hours, sputum culture"]
        );

        let plan = &report.treatment_plan;
        assert_eq!(plan.immediate_management, "Oxygen to target SpO2 94-98%");
        assert_eq!(plan.pharmacological, vec!["Amoxicillin 500mg TDS for 5 days"]);
        assert_eq!(plan.non_pharmacological, vec!["Rest and oral fluids"]);
        assert_eq!(plan.monitoring, vec!["Temperature and SpO2 every 4 hours"]);

        assert_eq!(
            report.patient_counseling,
            vec![
                "Complete the full antibiotic course",
                "Paracetamol can be used for fever"
            ]
        );
        assert_eq!(
            report.red_flags,
            vec!["Worsening breathlessness", "Confusion or drowsiness"]
        );
    }

    #[test]
    fn removing_red_flags_leaves_other_sections_unchanged() {
        let cut = SAMPLE
            .find("**RED FLAGS")
            .expect("sample has red flags");
        let without = &SAMPLE[..cut];

        let full = extract(SAMPLE);
        let partial = extract(without);

        assert!(partial.red_flags.is_empty());
        assert_eq!(partial.clinical_assessment, full.clinical_assessment);
        assert_eq!(partial.differential_diagnosis, full.differential_diagnosis);
        assert_eq!(
            partial.recommended_investigations,
            full.recommended_investigations
        );
        assert_eq!(partial.treatment_plan, full.treatment_plan);
        assert_eq!(partial.patient_counseling, full.patient_counseling);
        assert_eq!(
            partial.missing_sections(),
            vec![ReportSection::RedFlags]
        );
    }

    #[test]
    fn each_header_is_extractable_on_its_own() {
        let blocks: Vec<&str> = SAMPLE.split("\n\n").collect();
        assert_eq!(blocks.len(), ReportSection::ALL.len());

        let full = extract(SAMPLE);
        for (section, block) in ReportSection::ALL.into_iter().zip(blocks) {
            let single = extract(block);
            assert!(!single.is_missing(section), "{section} not extracted alone");
            assert_eq!(
                single.missing_sections().len(),
                ReportSection::ALL.len() - 1,
                "{section} leaked into other fields"
            );
            match section {
                ReportSection::ClinicalAssessment => {
                    assert_eq!(single.clinical_assessment, full.clinical_assessment)
                }
                ReportSection::DifferentialDiagnosis => {
                    assert_eq!(single.differential_diagnosis, full.differential_diagnosis)
                }
                ReportSection::RecommendedInvestigations => assert_eq!(
                    single.recommended_investigations,
                    full.recommended_investigations
                ),
                ReportSection::TreatmentPlan => {
                    assert_eq!(single.treatment_plan, full.treatment_plan)
                }
                ReportSection::PatientCounseling => {
                    assert_eq!(single.patient_counseling, full.patient_counseling)
                }
                ReportSection::RedFlags => assert_eq!(single.red_flags, full.red_flags),
            }
        }
    }

    #[test]
    fn plain_headers_without_emphasis() {
        let text = "CLINICAL ASSESSMENT: Likely viral upper respiratory infection.
DIFFERENTIAL DIAGNOSIS:
1. Viral URTI
2. Streptococcal pharyngitis
RECOMMENDED INVESTIGATIONS:
Essential: none
TREATMENT PLAN:
Immediate management: supportive care
PATIENT COUNSELING:
- Fluids and rest
RED FLAGS:
- Drooling or stridor";

        let report = extract(text);
        assert_eq!(
            report.clinical_assessment,
            "Likely viral upper respiratory infection."
        );
        assert_eq!(report.differential_diagnosis.len(), 2);
        assert!(
            report
                .differential_diagnosis
                .iter()
                .all(|d| d.probability == Probability::Moderate)
        );
        assert_eq!(report.recommended_investigations.essential, vec!["none"]);
        assert_eq!(report.treatment_plan.immediate_management, "supportive care");
        assert_eq!(report.patient_counseling, vec!["Fluids and rest"]);
        assert_eq!(report.red_flags, vec!["Drooling or stridor"]);
    }

    #[test]
    fn mixed_tiers_in_one_response() {
        let text = "**CLINICAL ASSESSMENT**\nChest pain, likely musculoskeletal.\n\n### Red Flags\n- Pain radiating to the jaw\n";
        let report = extract(text);
        assert_eq!(
            report.clinical_assessment,
            "Chest pain, likely musculoskeletal."
        );
        assert_eq!(report.red_flags, vec!["Pain radiating to the jaw"]);
        assert!(report.differential_diagnosis.is_empty());
    }

    #[test]
    fn assessment_prose_mentioning_sections_stays_in_assessment() {
        let text = "**CLINICAL ASSESSMENT**\nFebrile adult with cough.\nRed flags are absent at present.\nObservations otherwise stable.\n\n**DIFFERENTIAL DIAGNOSIS**\n1. Pneumonia - Probability: High\n";
        let report = extract(text);
        assert_eq!(
            report.clinical_assessment,
            "Febrile adult with cough.\nRed flags are absent at present.\nObservations otherwise stable."
        );
        assert!(report.red_flags.is_empty());
        assert_eq!(report.differential_diagnosis.len(), 1);

        let text = "**CLINICAL ASSESSMENT**\nLikely CAP.\nTreatment plan: see below, guided by CURB-65.\nSpO2 93%.\n\n**TREATMENT PLAN**\n- Monitoring: SpO2 4-hourly\n";
        let report = extract(text);
        assert_eq!(
            report.clinical_assessment,
            "Likely CAP.\nTreatment plan: see below, guided by CURB-65.\nSpO2 93%."
        );
        assert_eq!(report.treatment_plan.monitoring, vec!["SpO2 4-hourly"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        assert_eq!(extract(SAMPLE), extract(SAMPLE));
    }
}
