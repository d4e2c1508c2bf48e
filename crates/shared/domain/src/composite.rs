use crate::constants::COMPOSITE_SEPARATOR;

/// A group of multi-valued controls whose selected value is a tuple of properties.
///
/// `candidates` are fixed at render time; decoding only filters submitted values against
/// them and never adds to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeKeyField {
    pub var_name: String,
    pub key_names: Vec<String>,
    pub candidates: Vec<Vec<String>>,
}

impl CompositeKeyField {
    /// Scope owning the variable: everything before the last `.` of `var_name`.
    #[must_use]
    pub fn scope(&self) -> Option<&str> {
        self.var_name.rsplit_once('.').map(|(scope, _)| scope).filter(|s| !s.is_empty())
    }

    /// Key names as the server should receive them, qualified by [`Self::scope`].
    #[must_use]
    pub fn qualified_key_names(&self) -> Vec<String> {
        match self.scope() {
            Some(scope) => self.key_names.iter().map(|k| format!("{scope}.{k}")).collect(),
            None => self.key_names.clone(),
        }
    }

    /// Wire form of each candidate row: values joined in key order.
    pub fn candidate_values(&self) -> impl Iterator<Item = String> + '_ {
        self.candidates.iter().map(|row| join(row))
    }
}

/// Joins tuple components with the composite separator.
#[must_use]
pub fn join(parts: &[String]) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push(COMPOSITE_SEPARATOR);
        }
        out.push_str(part);
    }
    out
}
