//! derivapp-assist
//!
//! Templated starting drafts for case forms. Assembles a skeleton
//! document from the request fields; there is no model call behind this,
//! the draft is a deterministic template for staff to fill in.

pub mod draft;

pub use draft::{draft_form_content, FormDraftRequest};
