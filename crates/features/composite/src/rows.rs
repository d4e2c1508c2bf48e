use crate::error::{CompositeError, CompositeErrorExt};
use formgate_domain::composite::CompositeKeyField;
use formgate_kernel::resolve::{PropertyPath, Resolvable};
use std::borrow::Cow;

/// Builds a composite field whose candidates are read from `rows`, one row per candidate.
///
/// Each key name is a property path into a row (`id`, `owner.code`, `ids[0]`). Null values
/// render as the empty string.
///
/// # Errors
/// [`CompositeError::Path`] for a key name that is not a property path, and
/// [`CompositeError::MissingProperty`] if a row lacks a key or holds a non-scalar under it.
pub fn from_rows<'r, R, I>(
    var_name: impl Into<String>,
    key_names: &[&str],
    rows: I,
) -> Result<CompositeKeyField, CompositeError>
where
    R: Resolvable + 'r,
    I: IntoIterator<Item = &'r R>,
{
    let var_name = var_name.into();
    let paths = key_names
        .iter()
        .map(|key| key.parse::<PropertyPath>())
        .collect::<Result<Vec<_>, _>>()
        .context(Cow::Owned(var_name.clone()))?;

    let mut candidates = Vec::new();
    for (index, row) in rows.into_iter().enumerate() {
        let values = paths
            .iter()
            .map(|path| {
                let resolved = path.resolve(row).ok_or_else(|| missing(&var_name, index, path, "absent"))?;
                resolved
                    .as_text()
                    .map(str::to_owned)
                    .ok_or_else(|| missing(&var_name, index, path, "not a scalar"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        candidates.push(values);
    }

    Ok(CompositeKeyField {
        var_name,
        key_names: key_names.iter().map(|k| (*k).to_owned()).collect(),
        candidates,
    })
}

fn missing(var_name: &str, row: usize, path: &PropertyPath, reason: &str) -> CompositeError {
    CompositeError::MissingProperty {
        message: Cow::Owned(format!("row {row}: '{path}' is {reason}")),
        context: Some(Cow::Owned(var_name.to_owned())),
    }
}
