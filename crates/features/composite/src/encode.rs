use crate::error::CompositeError;
use formgate_domain::composite::{CompositeKeyField, join};
use formgate_domain::constants::{
    COMPOSITE_SEPARATOR, COMPOSITE_VARS, composite_candidate_field, composite_keys_field,
};
use formgate_domain::form::FormState;
use std::borrow::Cow;
use tracing::{trace, warn};

/// Hidden fields describing one composite-key variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCompositeKey {
    /// `nablarch_cbx_composite_keys_{var}`: scope-qualified key names, comma-joined.
    pub keys: (String, String),
    /// `nablarch_cbx_composite_candidate_{var}`: one entry per candidate row.
    pub candidates: Vec<(String, String)>,
}

impl EncodedCompositeKey {
    /// All fields in emission order.
    pub fn fields(&self) -> impl Iterator<Item = &(String, String)> {
        std::iter::once(&self.keys).chain(&self.candidates)
    }
}

/// Encodes `field` into its key-names and candidate fields.
///
/// # Errors
/// [`CompositeError::InvalidField`] if `field` has no key names or a candidate row whose
/// arity differs from the key count.
pub fn encode(field: &CompositeKeyField) -> Result<EncodedCompositeKey, CompositeError> {
    validate(field)?;

    let keys = (composite_keys_field(&field.var_name), join(&field.qualified_key_names()));
    let candidate_name = composite_candidate_field(&field.var_name);
    let candidates = field.candidate_values().map(|value| (candidate_name.clone(), value)).collect();

    Ok(EncodedCompositeKey { keys, candidates })
}

/// Registers `field` in `form` and adds its fields as protected hidden fields.
///
/// The variable name is tracked as a used input of the form. A variable registered again in
/// the same form only contributes its extra candidate rows, so the key-names field stays
/// unique.
///
/// # Errors
/// [`CompositeError::InvalidField`] if `field` is malformed, redeclares a registered variable
/// with different key names, or reuses an input name another control already took.
pub fn register(form: &mut FormState, field: CompositeKeyField) -> Result<(), CompositeError> {
    let encoded = encode(&field)?;

    if form.track_input(&field.var_name) {
        trace!(form = %form.form_name, var = %field.var_name, candidates = field.candidates.len(), "Composite key registered");
        for (name, value) in encoded.fields() {
            form.add_protected_hidden(name.as_str(), value.as_str());
        }
        form.composite_fields.push(field);
        return Ok(());
    }

    let Some(existing) = form.composite_fields.iter_mut().find(|f| f.var_name == field.var_name) else {
        return Err(CompositeError::InvalidField {
            message: Cow::Borrowed("input name already used by another control"),
            context: Some(Cow::Owned(field.var_name)),
        });
    };
    if existing.key_names != field.key_names {
        return Err(CompositeError::InvalidField {
            message: Cow::Borrowed("variable redeclared with different key names"),
            context: Some(Cow::Owned(field.var_name)),
        });
    }
    existing.candidates.extend(field.candidates);
    for (name, value) in encoded.candidates {
        form.add_protected_hidden(name, value);
    }
    Ok(())
}

/// Adds the form-wide variable registry once every composite field has been registered.
///
/// Does nothing for a form without composite fields.
pub fn finalize(form: &mut FormState) {
    if form.composite_fields.is_empty() {
        return;
    }
    let vars: Vec<String> = form.composite_fields.iter().map(|f| f.var_name.clone()).collect();
    form.add_protected_hidden(COMPOSITE_VARS, join(&vars));
}

fn validate(field: &CompositeKeyField) -> Result<(), CompositeError> {
    let invalid = |message: &'static str| CompositeError::InvalidField {
        message: Cow::Borrowed(message),
        context: Some(Cow::Owned(field.var_name.clone())),
    };

    if field.var_name.is_empty() || field.var_name.contains(COMPOSITE_SEPARATOR) {
        return Err(invalid("variable name must be non-empty and free of separators"));
    }
    if field.key_names.is_empty() || field.key_names.iter().any(|k| k.is_empty() || k.contains(COMPOSITE_SEPARATOR)) {
        return Err(invalid("key names must be non-empty and free of separators"));
    }
    if field.candidates.iter().any(|row| row.len() != field.key_names.len()) {
        return Err(invalid("candidate row arity differs from key count"));
    }
    if field.candidates.iter().flatten().any(|v| v.contains(COMPOSITE_SEPARATOR)) {
        // Such rows can never pass decode; the selection is still rendered.
        warn!(var = %field.var_name, "Candidate value contains the composite separator");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(var_name: &str, rows: &[[&str; 2]]) -> CompositeKeyField {
        CompositeKeyField {
            var_name: var_name.to_owned(),
            key_names: vec!["key1".to_owned(), "key2".to_owned()],
            candidates: rows.iter().map(|r| r.iter().map(|v| (*v).to_owned()).collect()).collect(),
        }
    }

    #[test]
    fn encodes_scoped_keys_and_one_field_per_row() {
        let encoded = encode(&field("form.sel", &[["v11", "v21"], ["v12", "v22"]])).unwrap();

        assert_eq!(encoded.keys, ("nablarch_cbx_composite_keys_form.sel".to_owned(), "form.key1,form.key2".to_owned()));
        let values: Vec<_> = encoded.candidates.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, ["v11,v21", "v12,v22"]);
        assert!(encoded.candidates.iter().all(|(n, _)| n == "nablarch_cbx_composite_candidate_form.sel"));
    }

    #[test]
    fn rejects_unusable_declarations() {
        let mut no_keys = field("sel", &[]);
        no_keys.key_names.clear();
        assert!(encode(&no_keys).is_err());

        let mut ragged = field("sel", &[["a", "b"]]);
        ragged.candidates.push(vec!["c".to_owned()]);
        assert!(matches!(encode(&ragged), Err(CompositeError::InvalidField { .. })));
    }

    #[test]
    fn registered_fields_are_protected_and_registry_is_form_wide() {
        let mut form = FormState::new("f");
        register(&mut form, field("a", &[["1", "2"]])).unwrap();
        register(&mut form, field("b", &[["3", "4"]])).unwrap();
        finalize(&mut form);

        assert!(form.hidden_fields.iter().all(|f| f.protected));
        let registry = form.hidden_fields.last().unwrap();
        assert_eq!((registry.name.as_str(), registry.value.as_str()), ("nablarch_cbx_composite_vars", "a,b"));
    }

    #[test]
    fn reregistering_a_variable_only_adds_candidates() {
        let mut form = FormState::new("f");
        register(&mut form, field("a", &[["1", "2"]])).unwrap();
        register(&mut form, field("a", &[["3", "4"]])).unwrap();

        let keys = form.hidden_fields.iter().filter(|f| f.name.starts_with("nablarch_cbx_composite_keys_")).count();
        assert_eq!(keys, 1);
        assert_eq!(form.composite_fields.len(), 1);
        assert_eq!(form.composite_fields[0].candidates.len(), 2);
        assert!(form.is_input_used("a"));
    }

    #[test]
    fn variable_name_taken_by_another_input_is_rejected() {
        let mut form = FormState::new("f");
        assert!(form.track_input("a"));

        let err = register(&mut form, field("a", &[["1", "2"]])).unwrap_err();
        assert!(matches!(err, CompositeError::InvalidField { .. }));
        assert!(form.hidden_fields.is_empty());
        assert!(form.composite_fields.is_empty());
    }

    #[test]
    fn empty_form_has_no_registry() {
        let mut form = FormState::new("f");
        finalize(&mut form);
        assert!(form.hidden_fields.is_empty());
    }
}
