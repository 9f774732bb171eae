//! Validator - stateless rule checks on raw milestone and release input.
//!
//! Both domain services call into this module; no other place re-checks
//! field presence or lengths.

mod field_errors;
mod policy;
mod rules;

pub use field_errors::{FieldError, FieldErrorView, FieldErrors};
pub use policy::{
    ValidationPolicy, MAX_MILESTONE_DESCRIPTION_LENGTH, MAX_RELEASE_DESCRIPTION_LENGTH,
    MAX_TITLE_LENGTH, MAX_VERSION_LENGTH,
};
pub use rules::{validate_milestone_input, validate_release_input, MilestoneInput, ReleaseInput};
