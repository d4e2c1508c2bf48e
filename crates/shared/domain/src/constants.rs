//! Wire-level field names. Renaming any of these breaks forms already rendered by deployed
//! nodes and the client-side dispatcher.

/// Packed or sealed carrier for token and per-submission parameters.
pub const HIDDEN: &str = "nablarch_hidden";
/// Name of the control that triggered the submission, filled in client-side.
pub const SUBMIT: &str = "nablarch_submit";
/// Resubmission-confirmation token.
pub const TOKEN: &str = "nablarch_token";
/// Presence marker requesting post-resubmit prevention.
pub const POST_RESUBMIT_PREVENT: &str = "nablarch_post_resubmit_prevent";
/// Literal value of [`POST_RESUBMIT_PREVENT`].
pub const POST_RESUBMIT_PREVENT_VALUE: &str = "true";
/// Presence marker: the form holds at least one field flagged for protection.
pub const HIDDEN_PROTECTED: &str = "nablarch_hidden_protected";

/// Prefix of per-submission parameter entries (`hidden_submit_{submission}`).
pub const SUBMIT_PARAM_PREFIX: &str = "hidden_submit_";

/// Comma-joined list of composite-key variables in a form.
pub const COMPOSITE_VARS: &str = "nablarch_cbx_composite_vars";
/// Prefix of the per-variable key-names field.
pub const COMPOSITE_KEYS_PREFIX: &str = "nablarch_cbx_composite_keys_";
/// Prefix of the per-variable candidate-row fields (one field instance per row).
pub const COMPOSITE_CANDIDATE_PREFIX: &str = "nablarch_cbx_composite_candidate_";
/// Separator for composite values, key lists and the variable registry.
pub const COMPOSITE_SEPARATOR: char = ',';

/// Prefix of synthetic names given to forms rendered without a name.
pub const FORM_NAME_PREFIX: &str = "nablarch_form";
/// Client-side global receiving the submission descriptors.
pub const SUBMISSION_INFO_VAR: &str = "nablarch_submission_info";

/// Name of the per-submission parameter entry for `submission`.
#[must_use]
pub fn submit_param_field(submission: &str) -> String {
    format!("{SUBMIT_PARAM_PREFIX}{submission}")
}

/// Name of the key-names field for `var_name`.
#[must_use]
pub fn composite_keys_field(var_name: &str) -> String {
    format!("{COMPOSITE_KEYS_PREFIX}{var_name}")
}

/// Name of the candidate-row fields for `var_name`.
#[must_use]
pub fn composite_candidate_field(var_name: &str) -> String {
    format!("{COMPOSITE_CANDIDATE_PREFIX}{var_name}")
}
