//! Client-side building blocks for interactive frontends.
//!
//! Format validation happens here, before a request is ever made; the
//! server re-checks presence/shape only. The AU/NZ phone-prefix rule is
//! deliberately client-only.

pub mod call_dialog;
pub mod form;

pub use call_dialog::{CallDialog, CallState};
pub use form::{ContactForm, FieldErrors, SubmitError};
