//! clinical-core: Case rendering and clinical report extraction
//!
//! This crate turns a structured patient case into a natural-language prompt
//! and parses the free-form report a generative model writes back into a
//! typed `ClinicalReport`. Everything here is pure and synchronous.

pub mod case;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod report;

// Re-export our types
pub use case::{CaseDescription, ClinicalData, ExaminationFindings, Gender, PatientInfo, Vitals};
pub use error::CaseError;
pub use extract::extract;
pub use prompt::{SYSTEM_PROMPT, render};
pub use report::{
    ClinicalReport, DiagnosisEntry, Probability, RecommendedInvestigations, ReportSection,
    TreatmentPlan,
};
