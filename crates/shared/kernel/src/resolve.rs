//! # Property Paths
//!
//! Dotted/indexed property access (`rows[0].owner.id`) over row objects supplied by callers,
//! without reflection: anything that can hand out named or indexed children implements
//! [`Resolvable`], and leaf values implement [`ToResolved`].
//!
//! A lookup distinguishes *not found* (`None`) from *found but null* (`Some(Resolved::Null)`).

use indexmap::IndexMap;
use serde_json::Value;
use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::str::FromStr;

#[formgate_derive::formgate_error]
pub enum ResolveError {
    /// The path text does not follow `name(.name|[index])*`.
    #[error("Invalid property path{}: {message}", format_context(.context))]
    InvalidPath { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Outcome of a successful lookup step.
#[derive(Clone)]
pub enum Resolved<'a> {
    Null,
    Scalar(Cow<'a, str>),
    Node(&'a dyn Resolvable),
}

impl Resolved<'_> {
    /// Textual form of a leaf: `Some("")` for null, `None` for an inner node.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Null => Some(""),
            Self::Scalar(s) => Some(s),
            Self::Node(_) => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Scalar(s) => f.debug_tuple("Scalar").field(s).finish(),
            Self::Node(_) => f.write_str("Node(..)"),
        }
    }
}

/// A value with named or indexed children.
pub trait Resolvable {
    fn resolve_key(&self, key: &str) -> Option<Resolved<'_>>;

    fn resolve_index(&self, index: usize) -> Option<Resolved<'_>> {
        self.resolve_key(&index.to_string())
    }
}

/// Conversion of a stored value into a lookup result.
pub trait ToResolved {
    fn to_resolved(&self) -> Resolved<'_>;
}

// --- Leaves ---

impl ToResolved for str {
    fn to_resolved(&self) -> Resolved<'_> {
        Resolved::Scalar(Cow::Borrowed(self))
    }
}

impl ToResolved for String {
    fn to_resolved(&self) -> Resolved<'_> {
        Resolved::Scalar(Cow::Borrowed(self))
    }
}

impl ToResolved for Cow<'_, str> {
    fn to_resolved(&self) -> Resolved<'_> {
        Resolved::Scalar(Cow::Borrowed(self))
    }
}

macro_rules! display_to_resolved {
    ($($ty:ty),*) => {
        $(impl ToResolved for $ty {
            fn to_resolved(&self) -> Resolved<'_> {
                Resolved::Scalar(Cow::Owned(self.to_string()))
            }
        })*
    };
}

display_to_resolved!(bool, char, i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: ToResolved + ?Sized> ToResolved for &T {
    fn to_resolved(&self) -> Resolved<'_> {
        (**self).to_resolved()
    }
}

impl<T: ToResolved> ToResolved for Option<T> {
    fn to_resolved(&self) -> Resolved<'_> {
        self.as_ref().map_or(Resolved::Null, ToResolved::to_resolved)
    }
}

// --- JSON ---

impl ToResolved for Value {
    fn to_resolved(&self) -> Resolved<'_> {
        match self {
            Self::Null => Resolved::Null,
            Self::String(s) => Resolved::Scalar(Cow::Borrowed(s)),
            Self::Bool(b) => Resolved::Scalar(Cow::Owned(b.to_string())),
            Self::Number(n) => Resolved::Scalar(Cow::Owned(n.to_string())),
            Self::Array(_) | Self::Object(_) => Resolved::Node(self),
        }
    }
}

impl Resolvable for Value {
    fn resolve_key(&self, key: &str) -> Option<Resolved<'_>> {
        match self {
            Self::Object(map) => map.get(key).map(ToResolved::to_resolved),
            Self::Array(_) => key.parse().ok().and_then(|i| self.resolve_index(i)),
            _ => None,
        }
    }

    fn resolve_index(&self, index: usize) -> Option<Resolved<'_>> {
        match self {
            Self::Array(items) => items.get(index).map(ToResolved::to_resolved),
            _ => None,
        }
    }
}

// --- Collections ---

impl<K, V, S> Resolvable for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: ToResolved,
    S: BuildHasher,
{
    fn resolve_key(&self, key: &str) -> Option<Resolved<'_>> {
        self.get(key).map(ToResolved::to_resolved)
    }
}

impl<K, V, S> ToResolved for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: ToResolved,
    S: BuildHasher,
{
    fn to_resolved(&self) -> Resolved<'_> {
        Resolved::Node(self)
    }
}

impl<K, V> Resolvable for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: ToResolved,
{
    fn resolve_key(&self, key: &str) -> Option<Resolved<'_>> {
        self.get(key).map(ToResolved::to_resolved)
    }
}

impl<K, V> ToResolved for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: ToResolved,
{
    fn to_resolved(&self) -> Resolved<'_> {
        Resolved::Node(self)
    }
}

impl<K, V, S> Resolvable for IndexMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: ToResolved,
    S: BuildHasher,
{
    fn resolve_key(&self, key: &str) -> Option<Resolved<'_>> {
        self.get(key).map(ToResolved::to_resolved)
    }
}

impl<K, V, S> ToResolved for IndexMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: ToResolved,
    S: BuildHasher,
{
    fn to_resolved(&self) -> Resolved<'_> {
        Resolved::Node(self)
    }
}

impl<V: ToResolved> Resolvable for Vec<V> {
    fn resolve_key(&self, key: &str) -> Option<Resolved<'_>> {
        key.parse().ok().and_then(|i| self.resolve_index(i))
    }

    fn resolve_index(&self, index: usize) -> Option<Resolved<'_>> {
        self.get(index).map(ToResolved::to_resolved)
    }
}

impl<V: ToResolved> ToResolved for Vec<V> {
    fn to_resolved(&self) -> Resolved<'_> {
        Resolved::Node(self)
    }
}

// --- Paths ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A parsed property path such as `owner.addresses[1].zip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<Segment>,
}

impl PropertyPath {
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walks the path from `root`. `None` if any step is missing or lands on a leaf too early.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a dyn Resolvable) -> Option<Resolved<'a>> {
        let mut current = Resolved::Node(root);
        for segment in &self.segments {
            let Resolved::Node(node) = current else {
                return None;
            };
            current = match segment {
                Segment::Key(key) => node.resolve_key(key)?,
                Segment::Index(index) => node.resolve_index(*index)?,
            };
        }
        Some(current)
    }
}

impl FromStr for PropertyPath {
    type Err = ResolveError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        if path.is_empty() {
            return Err(invalid("empty path", path));
        }

        let mut segments = Vec::new();
        for (position, part) in path.split('.').enumerate() {
            let (name, mut rest) = part.find('[').map_or((part, ""), |i| part.split_at(i));

            if name.contains(']') {
                return Err(invalid("unbalanced index brackets", path));
            }
            if name.is_empty() {
                // Only a leading `[n]` may omit the name.
                if position > 0 || rest.is_empty() {
                    return Err(invalid("empty segment", path));
                }
            } else {
                segments.push(Segment::Key(name.to_owned()));
            }

            while !rest.is_empty() {
                let Some(close) = rest.find(']').filter(|_| rest.starts_with('[')) else {
                    return Err(invalid("unbalanced index brackets", path));
                };
                let index = rest[1..close]
                    .parse::<usize>()
                    .map_err(|_| invalid("index is not a non-negative integer", path))?;
                segments.push(Segment::Index(index));
                rest = &rest[close + 1..];
            }
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => f.write_str(key)?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Parses `path` and walks it from `root`.
///
/// # Errors
/// Returns [`ResolveError::InvalidPath`] if `path` is not a well-formed property path.
/// A well-formed path that leads nowhere is `Ok(None)`.
pub fn resolve_path<'a, R>(root: &'a R, path: &str) -> Result<Option<Resolved<'a>>, ResolveError>
where
    R: Resolvable,
{
    Ok(path.parse::<PropertyPath>()?.resolve(root))
}

fn invalid(message: &'static str, path: &str) -> ResolveError {
    ResolveError::InvalidPath { message: Cow::Borrowed(message), context: Some(path.to_owned().into()) }
}
