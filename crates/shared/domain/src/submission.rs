use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the client dispatcher does when a submission control fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SubmitAction {
    Transition,
    Popup,
    Download,
}

impl SubmitAction {
    /// Wire name used by the client dispatcher.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transition => "TRANSITION",
            Self::Popup => "POPUP",
            Self::Download => "DOWNLOAD",
        }
    }
}

impl fmt::Display for SubmitAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how a submission control submits, as declared by the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTarget {
    pub action: SubmitAction,
    pub uri: String,
    pub allow_double_submission: bool,
    pub popup_window_name: Option<String>,
    pub popup_options: Option<String>,
}

impl SubmissionTarget {
    /// A plain page transition to `uri`.
    pub fn transition(uri: impl Into<String>) -> Self {
        Self::with_action(SubmitAction::Transition, uri)
    }

    /// A submission opening `uri` in a popup window.
    pub fn popup(uri: impl Into<String>) -> Self {
        Self::with_action(SubmitAction::Popup, uri)
    }

    /// A submission whose response is a file download.
    pub fn download(uri: impl Into<String>) -> Self {
        Self::with_action(SubmitAction::Download, uri)
    }

    fn with_action(action: SubmitAction, uri: impl Into<String>) -> Self {
        Self {
            action,
            uri: uri.into(),
            allow_double_submission: true,
            popup_window_name: None,
            popup_options: None,
        }
    }

    #[must_use]
    pub const fn allow_double_submission(mut self, allow: bool) -> Self {
        self.allow_double_submission = allow;
        self
    }

    #[must_use]
    pub fn popup_window_name(mut self, name: impl Into<String>) -> Self {
        self.popup_window_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn popup_options(mut self, options: impl Into<String>) -> Self {
        self.popup_options = Some(options.into());
        self
    }
}

/// One submit-capable control registered in a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionInfo {
    /// Unique within the owning form.
    pub name: String,
    pub action: SubmitAction,
    pub target_uri: String,
    /// Logical handler id derived from `target_uri`.
    pub request_id: String,
    pub allow_double_submission: bool,
    pub popup_window_name: Option<String>,
    pub popup_options: Option<String>,
    /// Rendered input name -> name the server should see, in declaration order.
    pub param_renames: IndexMap<String, String>,
    /// Literal parameters contributed by the control, in declaration order.
    pub extra_params: Vec<(String, String)>,
}

impl SubmissionInfo {
    #[must_use]
    pub fn new(name: String, request_id: String, target: SubmissionTarget) -> Self {
        Self {
            name,
            action: target.action,
            target_uri: target.uri,
            request_id,
            allow_double_submission: target.allow_double_submission,
            popup_window_name: target.popup_window_name,
            popup_options: target.popup_options,
            param_renames: IndexMap::new(),
            extra_params: Vec::new(),
        }
    }
}
