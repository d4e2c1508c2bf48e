//! # Plain Pack
//!
//! Wire format of an unsealed `nablarch_hidden` value: `name=value|name=value|...`, with `=`,
//! `|` and `\` inside names and values escaped by a backslash. The format bounds the number of
//! hidden inputs; it gives no confidentiality.

use crate::error::HiddenError;
use std::borrow::Cow;

const ESCAPE: char = '\\';
const ASSIGN: char = '=';
const ITEM: char = '|';

/// Packs `fields` in order.
pub fn pack<I, N, V>(fields: I) -> String
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: AsRef<str>,
{
    let mut out = String::new();
    for (i, (name, value)) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(ITEM);
        }
        escape_into(&mut out, name.as_ref());
        out.push(ASSIGN);
        escape_into(&mut out, value.as_ref());
    }
    out
}

/// Restores the fields packed into `packed`. An empty string holds no fields.
///
/// # Errors
/// [`HiddenError::MalformedPack`] on a trailing lone backslash, an unknown escape, an item
/// without an unescaped `=`, or an unescaped `=` inside a value.
pub fn unpack(packed: &str) -> Result<Vec<(String, String)>, HiddenError> {
    let mut fields = Vec::new();
    if packed.is_empty() {
        return Ok(fields);
    }

    let mut name = String::new();
    let mut value = String::new();
    let mut in_value = false;
    let mut chars = packed.chars();

    while let Some(c) = chars.next() {
        let literal = match c {
            ESCAPE => match chars.next() {
                Some(escaped @ (ESCAPE | ASSIGN | ITEM)) => escaped,
                Some(other) => return Err(malformed(format!("unknown escape '\\{other}'"))),
                None => return Err(malformed("trailing backslash")),
            },
            ASSIGN if in_value => return Err(malformed("unescaped '=' inside a value")),
            ASSIGN => {
                in_value = true;
                continue;
            },
            ITEM => {
                fields.push(finish_item(&mut name, &mut value, &mut in_value)?);
                continue;
            },
            other => other,
        };

        if in_value { value.push(literal) } else { name.push(literal) }
    }

    fields.push(finish_item(&mut name, &mut value, &mut in_value)?);
    Ok(fields)
}

fn escape_into(out: &mut String, raw: &str) {
    for c in raw.chars() {
        if matches!(c, ESCAPE | ASSIGN | ITEM) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

fn finish_item(
    name: &mut String,
    value: &mut String,
    in_value: &mut bool,
) -> Result<(String, String), HiddenError> {
    if !*in_value {
        return Err(malformed(format!("item '{name}' has no '='")));
    }
    *in_value = false;
    Ok((std::mem::take(name), std::mem::take(value)))
}

fn malformed(message: impl Into<Cow<'static, str>>) -> HiddenError {
    HiddenError::MalformedPack { message: message.into(), context: None }
}
