//! Form draft builder.
//!
//! Assembles a markdown skeleton from the request fields so staff start
//! from a structured document instead of a blank page.

use serde::{Deserialize, Serialize};

/// Inputs for a form draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDraftRequest {
    pub title: String,
    /// Student display name, if the form is about one.
    pub student_name: Option<String>,
    /// Referral reason, if the form belongs to a case.
    pub referral_reason: Option<String>,
    /// Section headings the form should contain, in order.
    pub sections: Vec<String>,
}

/// Build a templated form draft.
///
/// Always returns a document: with no sections the result is the header
/// block alone. Each section gets a heading and a placeholder line.
pub fn draft_form_content(request: &FormDraftRequest) -> String {
    let mut content = format!("# {}\n", request.title.trim());

    if let Some(student) = &request.student_name {
        content.push_str(&format!("\nEstudiante: {student}\n"));
    }
    if let Some(reason) = &request.referral_reason {
        content.push_str(&format!("Motivo de derivación: {reason}\n"));
    }

    for (index, section) in request.sections.iter().enumerate() {
        content.push_str(&format!("\n## {}. {}\n", index + 1, section.trim()));
        content.push_str("\n_Completar durante la entrevista._\n");
    }

    content
}
