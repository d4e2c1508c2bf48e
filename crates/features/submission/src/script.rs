//! # Submission Descriptor
//!
//! Serializes a form's submissions into the compact JSON object the client dispatcher reads.
//! Entry and field order are part of the contract, so the serialization is written by hand
//! instead of derived:
//!
//! ```text
//! {"go":{"action":"/app/R1.do","allowDoubleSubmission":true,"submissionAction":"TRANSITION","changeParamNames":{}}}
//! ```
//!
//! `popupWindowName` (null when absent) and `popupOption` (empty when absent) sit between
//! `submissionAction` and `changeParamNames`, for popup submissions only.

use crate::error::{SubmissionError, SubmissionErrorExt};
use formgate_domain::constants::SUBMISSION_INFO_VAR;
use formgate_domain::form::FormState;
use formgate_domain::submission::{SubmissionInfo, SubmitAction};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Renders the descriptor object for every submission of `form`. An empty form renders `{}`.
///
/// # Errors
/// Returns [`SubmissionError::Serialization`] if JSON serialization fails.
pub fn render(form: &FormState) -> Result<String, SubmissionError> {
    serde_json::to_string(&Descriptor(&form.submissions)).context("Failed to render descriptor")
}

/// Renders the client registration statement for `form`:
/// `nablarch_submission_info["{form}"] = {descriptor};`
///
/// # Errors
/// Returns [`SubmissionError::Serialization`] if JSON serialization fails.
pub fn render_script(form: &FormState) -> Result<String, SubmissionError> {
    let key = serde_json::to_string(&form.form_name).context("Failed to render form name")?;
    Ok(format!("{SUBMISSION_INFO_VAR}[{key}] = {};", render(form)?))
}

struct Descriptor<'a>(&'a [SubmissionInfo]);

impl Serialize for Descriptor<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for info in self.0 {
            map.serialize_entry(&info.name, &Entry(info))?;
        }
        map.end()
    }
}

struct Entry<'a>(&'a SubmissionInfo);

impl Serialize for Entry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let info = self.0;
        let popup = info.action == SubmitAction::Popup;

        let mut map = serializer.serialize_map(Some(if popup { 6 } else { 4 }))?;
        map.serialize_entry("action", &info.target_uri)?;
        map.serialize_entry("allowDoubleSubmission", &info.allow_double_submission)?;
        map.serialize_entry("submissionAction", info.action.as_str())?;
        if popup {
            map.serialize_entry("popupWindowName", &info.popup_window_name)?;
            map.serialize_entry("popupOption", info.popup_options.as_deref().unwrap_or_default())?;
        }
        map.serialize_entry("changeParamNames", &info.param_renames)?;
        map.end()
    }
}
