use crate::composite::CompositeKeyField;
use crate::submission::SubmissionInfo;
use fxhash::FxHashSet;
use indexmap::IndexSet;

/// A hidden field collected while a form renders.
///
/// `protected` fields are sealed together whenever the form requires it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
    pub protected: bool,
}

impl HiddenField {
    pub fn plain(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into(), protected: false }
    }

    pub fn protected(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into(), protected: true }
    }
}

/// Everything a form accumulates during one render pass.
///
/// Created when the form opens, mutated by the controls nested in it, consumed when the form
/// closes. Never outlives the render pass.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub form_name: String,
    pub submissions: Vec<SubmissionInfo>,
    /// Input names whose registration side effects already ran.
    pub used_input_names: FxHashSet<String>,
    /// Hidden fields in render order, protected and plain interleaved.
    pub hidden_fields: Vec<HiddenField>,
    pub request_ids_involved: IndexSet<String>,
    pub token: Option<String>,
    pub post_resubmit_prevent: bool,
    /// Composite-key fields registered in this form, in render order.
    pub composite_fields: Vec<CompositeKeyField>,
}

impl FormState {
    pub fn new(form_name: impl Into<String>) -> Self {
        Self { form_name: form_name.into(), ..Self::default() }
    }

    /// Records `name` as emitted. Returns `false` if it was already recorded.
    pub fn track_input(&mut self, name: &str) -> bool {
        if self.used_input_names.contains(name) {
            return false;
        }
        self.used_input_names.insert(name.to_owned())
    }

    #[must_use]
    pub fn is_input_used(&self, name: &str) -> bool {
        self.used_input_names.contains(name)
    }

    pub fn add_hidden(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.hidden_fields.push(HiddenField::plain(name, value));
    }

    /// Adds a field that must be sealed whenever the form requires protection.
    pub fn add_protected_hidden(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.hidden_fields.push(HiddenField::protected(name, value));
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    #[must_use]
    pub fn submission(&self, name: &str) -> Option<&SubmissionInfo> {
        self.submissions.iter().find(|s| s.name == name)
    }

    pub fn submission_mut(&mut self, name: &str) -> Option<&mut SubmissionInfo> {
        self.submissions.iter_mut().find(|s| s.name == name)
    }

    pub fn last_submission_mut(&mut self) -> Option<&mut SubmissionInfo> {
        self.submissions.last_mut()
    }

    #[must_use]
    pub fn has_submission(&self, name: &str) -> bool {
        self.submissions.iter().any(|s| s.name == name)
    }
}

/// The finalized output of a form: hidden inputs to emit and the client descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForm {
    pub form_name: String,
    pub hidden_fields: Vec<(String, String)>,
    /// Descriptor object consumed by the client dispatcher.
    pub descriptor: String,
    /// Statement registering [`Self::descriptor`] under the form name.
    pub script: String,
}

impl RenderedForm {
    /// Values of every hidden field named `name`, in emission order.
    pub fn hidden_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.hidden_fields.iter().filter(move |(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn hidden_value(&self, name: &str) -> Option<&str> {
        self.hidden_fields.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }
}
