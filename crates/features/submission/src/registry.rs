//! # Submission Registry
//!
//! Accumulates one [`SubmissionInfo`] per submit control rendered inside a form. Names are
//! unique within the form: a blank or colliding name becomes `{form}_{n}`, `n` being the
//! 1-based ordinal of the submission among all submissions of the form.

use crate::error::SubmissionError;
use formgate_domain::form::FormState;
use formgate_domain::submission::{SubmissionInfo, SubmissionTarget};
use formgate_kernel::request_id::request_id_of;
use std::borrow::Cow;
use tracing::{debug, trace};

/// Registers a submit control and returns the name it was registered under.
///
/// The derived request id is recorded in the form's `request_ids_involved`.
pub fn register(form: &mut FormState, raw_name: Option<&str>, target: SubmissionTarget) -> String {
    let ordinal = form.submissions.len() + 1;
    let requested = raw_name.map(str::trim).filter(|n| !n.is_empty());

    let name = match requested {
        Some(name) if !form.has_submission(name) => name.to_owned(),
        _ => {
            let name = generated_name(form, ordinal);
            if let Some(requested) = requested {
                debug!(form = %form.form_name, requested, renamed = %name, "Submission name collision");
            }
            name
        },
    };

    let request_id = request_id_of(&target.uri);
    trace!(form = %form.form_name, submission = %name, request_id = %request_id, action = %target.action, "Submission registered");

    form.request_ids_involved.insert(request_id.clone());
    form.submissions.push(SubmissionInfo::new(name.clone(), request_id, target));
    name
}

/// Maps `input_name` to `param_name` for the submission named `submission`.
///
/// # Errors
/// [`SubmissionError::UnknownSubmission`] if the form has no such submission.
pub fn add_param_rename(
    form: &mut FormState,
    submission: &str,
    input_name: impl Into<String>,
    param_name: impl Into<String>,
) -> Result<(), SubmissionError> {
    let info = named(form, submission)?;
    info.param_renames.insert(input_name.into(), param_name.into());
    Ok(())
}

/// Adds a literal parameter carried only when `submission` triggers the form.
///
/// # Errors
/// [`SubmissionError::UnknownSubmission`] if the form has no such submission.
pub fn add_param(
    form: &mut FormState,
    submission: &str,
    name: impl Into<String>,
    value: impl Into<String>,
) -> Result<(), SubmissionError> {
    let info = named(form, submission)?;
    info.extra_params.push((name.into(), value.into()));
    Ok(())
}

/// [`add_param_rename`] on the most recently registered submission.
///
/// # Errors
/// [`SubmissionError::UnknownSubmission`] if nothing was registered yet.
pub fn add_param_rename_last(
    form: &mut FormState,
    input_name: impl Into<String>,
    param_name: impl Into<String>,
) -> Result<(), SubmissionError> {
    let info = last(form)?;
    info.param_renames.insert(input_name.into(), param_name.into());
    Ok(())
}

/// [`add_param`] on the most recently registered submission.
///
/// # Errors
/// [`SubmissionError::UnknownSubmission`] if nothing was registered yet.
pub fn add_param_last(
    form: &mut FormState,
    name: impl Into<String>,
    value: impl Into<String>,
) -> Result<(), SubmissionError> {
    let info = last(form)?;
    info.extra_params.push((name.into(), value.into()));
    Ok(())
}

fn generated_name(form: &FormState, ordinal: usize) -> String {
    // A caller may already have claimed `{form}_{n}` explicitly.
    (ordinal..)
        .map(|n| format!("{}_{n}", form.form_name))
        .find(|candidate| !form.has_submission(candidate))
        .unwrap_or_default()
}

fn named<'a>(form: &'a mut FormState, submission: &str) -> Result<&'a mut SubmissionInfo, SubmissionError> {
    let form_name = form.form_name.clone();
    form.submission_mut(submission).ok_or_else(|| SubmissionError::UnknownSubmission {
        message: Cow::Owned(format!("no submission named '{submission}'")),
        context: Some(Cow::Owned(form_name)),
    })
}

fn last(form: &mut FormState) -> Result<&mut SubmissionInfo, SubmissionError> {
    let form_name = form.form_name.clone();
    form.last_submission_mut().ok_or_else(|| SubmissionError::UnknownSubmission {
        message: Cow::Borrowed("no submission registered yet"),
        context: Some(Cow::Owned(form_name)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> SubmissionTarget {
        SubmissionTarget::transition("/app/action/R1.do")
    }

    #[test]
    fn colliding_and_blank_names_get_ordinals() {
        let mut form = FormState::new("f");

        assert_eq!(register(&mut form, Some("x"), target()), "x");
        assert_eq!(register(&mut form, Some("x"), target()), "f_2");
        assert_eq!(register(&mut form, Some(""), target()), "f_3");
        assert_eq!(register(&mut form, None, target()), "f_4");
    }

    #[test]
    fn generated_name_skips_explicitly_claimed_ones() {
        let mut form = FormState::new("f");
        register(&mut form, Some("f_2"), target());

        assert_eq!(register(&mut form, None, target()), "f_3");
    }

    #[test]
    fn request_ids_are_recorded_once() {
        let mut form = FormState::new("f");
        register(&mut form, Some("a"), target());
        register(&mut form, Some("b"), target());
        register(&mut form, Some("c"), SubmissionTarget::popup("/app/R2.do"));

        assert_eq!(form.request_ids_involved.iter().collect::<Vec<_>>(), ["R1", "R2"]);
    }

    #[test]
    fn params_keep_insertion_order() {
        let mut form = FormState::new("f");
        register(&mut form, Some("go"), target());
        add_param(&mut form, "go", "b", "2").unwrap();
        add_param(&mut form, "go", "a", "1").unwrap();
        add_param_rename(&mut form, "go", "z.in", "z.out").unwrap();
        add_param_rename_last(&mut form, "a.in", "a.out").unwrap();
        add_param_last(&mut form, "b", "3").unwrap();

        let info = form.submission("go").unwrap();
        let params: Vec<_> = info.extra_params.iter().map(|(n, v)| (n.as_str(), v.as_str())).collect();
        assert_eq!(params, [("b", "2"), ("a", "1"), ("b", "3")]);
        assert_eq!(info.param_renames.keys().collect::<Vec<_>>(), ["z.in", "a.in"]);
    }

    #[test]
    fn unknown_submission_is_an_error() {
        let mut form = FormState::new("f");
        assert!(matches!(add_param_last(&mut form, "a", "1"), Err(SubmissionError::UnknownSubmission { .. })));

        register(&mut form, Some("go"), target());
        let err = add_param(&mut form, "stop", "a", "1").unwrap_err();
        assert_eq!(err.to_string(), "Unknown submission (f): no submission named 'stop'");
    }
}
