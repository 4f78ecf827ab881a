//! Case-to-prompt rendering
//!
//! The section headers written here, and the output format requested in
//! `SYSTEM_PROMPT`, are matched literally by the extractor. Changing the
//! wording on one side means changing it on the other.

use crate::case::{CaseDescription, present};

pub const SYSTEM_PROMPT: &str = r#"You are a clinical decision support system assisting qualified physicians with case examination, diagnosis, treatment planning and patient counseling. You support clinical decision-making; you do not replace physician judgment.

For each patient case:
- Review the presenting complaint, history and examination findings systematically
- Point out missing information that matters for the diagnosis
- Rank a differential diagnosis and suggest investigations to confirm or exclude each
- Recommend evidence-based treatment, accounting for age, comorbidities, allergies and interactions
- Give patient-friendly counseling points and the warning signs that need urgent care

## Output Format

Structure responses as:

**CLINICAL ASSESSMENT**
[Summary of case presentation and key findings]

**DIFFERENTIAL DIAGNOSIS**
1. [Most likely diagnosis] - Probability: [High/Moderate/Low]
   - Supporting features: ...
   - Investigations needed: ...
2. [Second possibility]
   ...

**RECOMMENDED INVESTIGATIONS**
- Essential: [list]
- Consider if: [conditions]

**TREATMENT PLAN**
- Immediate management: ...
- Pharmacological: ...
- Non-pharmacological: ...
- Monitoring: ...

**PATIENT COUNSELING POINTS**
- [Key points for patient education]

**RED FLAGS / WHEN TO SEEK IMMEDIATE CARE**
- [Warning signs]

## Safety

- State that this is decision support, not a replacement for the treating physician
- Flag when specialist consultation or emergency care is needed
- Recommend verifying drug doses and interactions against current references
- Note when evidence is limited or a recommendation rests on expert consensus"#;

const PREAMBLE: &str = "Please analyze the following patient case:\n\n";

const CLOSING_INSTRUCTION: &str = "\nPlease provide a comprehensive clinical assessment with differential diagnosis, recommended investigations, treatment plan, patient counseling points, and red flags.";

pub const PATIENT_INFORMATION: &str = "## PATIENT INFORMATION";
pub const CHIEF_COMPLAINT: &str = "## CHIEF COMPLAINT";
pub const HISTORY_OF_PRESENTING_ILLNESS: &str = "## HISTORY OF PRESENTING ILLNESS";
pub const PAST_MEDICAL_HISTORY: &str = "## PAST MEDICAL HISTORY";
pub const PAST_SURGICAL_HISTORY: &str = "## PAST SURGICAL HISTORY";
pub const CURRENT_MEDICATIONS: &str = "## CURRENT MEDICATIONS";
pub const ALLERGIES: &str = "## ALLERGIES";
pub const FAMILY_HISTORY: &str = "## FAMILY HISTORY";
pub const SOCIAL_HISTORY: &str = "## SOCIAL HISTORY";
pub const EXAMINATION_FINDINGS: &str = "## EXAMINATION FINDINGS";
pub const VITALS: &str = "### Vitals:";
pub const GENERAL_EXAMINATION: &str = "### General Examination:";
pub const SYSTEMIC_EXAMINATION: &str = "### Systemic Examination:";
pub const INVESTIGATION_RESULTS: &str = "## INVESTIGATION RESULTS";

/// Render a case into the user message sent to the model.
///
/// Sections appear in a fixed order and are skipped when their data is
/// absent. The chief complaint and history are always written, even if
/// blank; rejecting those is the caller's job (`CaseDescription::validate`).
pub fn render(case: &CaseDescription) -> String {
    let patient = &case.patient_info;
    let clinical = &case.clinical_data;
    let findings = &clinical.examination_findings;

    let mut prompt = String::from(PREAMBLE);

    prompt.push_str(&format!(
        "{}\n- Age: {} years\n- Gender: {}\n- Patient ID: {}\n\n",
        PATIENT_INFORMATION, patient.age, patient.gender, patient.patient_id
    ));

    push_section(&mut prompt, CHIEF_COMPLAINT, &clinical.chief_complaint);
    push_section(
        &mut prompt,
        HISTORY_OF_PRESENTING_ILLNESS,
        &clinical.history_of_presenting_illness,
    );

    if let Some(text) = present(&clinical.past_medical_history) {
        push_section(&mut prompt, PAST_MEDICAL_HISTORY, text);
    }
    if let Some(text) = present(&clinical.past_surgical_history) {
        push_section(&mut prompt, PAST_SURGICAL_HISTORY, text);
    }
    if !clinical.current_medications.is_empty() {
        push_section(
            &mut prompt,
            CURRENT_MEDICATIONS,
            &clinical.current_medications.join(", "),
        );
    }
    if !clinical.allergies.is_empty() {
        push_section(&mut prompt, ALLERGIES, &clinical.allergies.join(", "));
    }
    if let Some(text) = present(&clinical.family_history) {
        push_section(&mut prompt, FAMILY_HISTORY, text);
    }
    if let Some(text) = present(&clinical.social_history) {
        push_section(&mut prompt, SOCIAL_HISTORY, text);
    }

    if !findings.is_empty() {
        prompt.push_str(EXAMINATION_FINDINGS);
        prompt.push('\n');

        let vitals = findings
            .vitals
            .as_ref()
            .map(|v| v.recorded())
            .unwrap_or_default();
        if !vitals.is_empty() {
            prompt.push_str(VITALS);
            prompt.push('\n');
            for (label, value) in vitals {
                prompt.push_str(&format!("- {}: {}\n", label, value));
            }
            prompt.push('\n');
        }

        if let Some(text) = present(&findings.general_examination) {
            push_section(&mut prompt, GENERAL_EXAMINATION, text);
        }
        if let Some(text) = present(&findings.systemic_examination) {
            push_section(&mut prompt, SYSTEMIC_EXAMINATION, text);
        }
    }

    if let Some(text) = present(&clinical.investigation_results) {
        push_section(&mut prompt, INVESTIGATION_RESULTS, text);
    }

    prompt.push_str(CLOSING_INSTRUCTION);
    prompt
}

fn push_section(prompt: &mut String, header: &str, body: &str) {
    prompt.push_str(header);
    prompt.push('\n');
    prompt.push_str(body);
    prompt.push_str("\n\n");
}
