//! Case analysis: render, ask the model, extract

use chrono::{DateTime, Utc};
use clinical_core::{CaseDescription, ClinicalReport, ReportSection, SYSTEM_PROMPT, extract, render};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::ClaudeClient;
use crate::error::AnalysisError;

/// Result of one successful model call for a case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseAnalysis {
    pub id: Uuid,
    pub patient_id: String,
    pub model: String,
    pub analyzed_at: DateTime<Utc>,
    pub report: ClinicalReport,
    /// Sections the extractor could not recover; empty for a complete report
    pub missing_sections: Vec<ReportSection>,
}

/// Analyze a case with Claude.
///
/// The case is validated and rendered, sent to the model, and the response
/// parsed into a `ClinicalReport`. A report with missing sections is still
/// returned as a success so the caller can show what was recovered.
pub async fn analyze_case(
    client: &ClaudeClient,
    case: &CaseDescription,
) -> Result<CaseAnalysis, AnalysisError> {
    let patient_id = case.patient_info.patient_id.as_str();

    if let Err(e) = case.validate() {
        tracing::warn!(patient_id = %patient_id, error = %e, "Case rejected");
        metrics::counter!("clinical_analyses_total", "outcome" => "rejected").increment(1);
        return Err(e.into());
    }

    let prompt = render(case);
    tracing::info!(
        patient_id = %patient_id,
        model = client.model(),
        prompt_len = prompt.len(),
        "Analyzing case"
    );

    let response = match client.message(Some(SYSTEM_PROMPT), &prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(patient_id = %patient_id, error = %e, "Model call failed");
            metrics::counter!("clinical_analyses_total", "outcome" => "failed").increment(1);
            return Err(e);
        }
    };

    let report = extract(&response);
    let missing_sections = report.missing_sections();
    record_completeness(patient_id, &missing_sections);

    Ok(CaseAnalysis {
        id: Uuid::new_v4(),
        patient_id: patient_id.to_string(),
        model: client.model().to_string(),
        analyzed_at: Utc::now(),
        report,
        missing_sections,
    })
}

/// Log and count a report's completeness
fn record_completeness(patient_id: &str, missing: &[ReportSection]) {
    if missing.is_empty() {
        tracing::info!(patient_id = %patient_id, "Report extracted");
        metrics::counter!("clinical_analyses_total", "outcome" => "complete").increment(1);
        return;
    }

    let names: Vec<&str> = missing.iter().map(|s| s.as_str()).collect();
    tracing::warn!(
        patient_id = %patient_id,
        missing = ?names,
        "Report extracted with missing sections"
    );
    metrics::counter!("clinical_analyses_total", "outcome" => "incomplete").increment(1);

    for section in missing {
        metrics::counter!(
            "clinical_report_missing_sections_total",
            "section" => section.as_str()
        )
        .increment(1);
    }
}
