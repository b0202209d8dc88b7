//! Shared node pieces: source spans, leading comments, identifiers, literals.
//!
//! Every declaration node carries a [`NodeMeta`] flattened from the Babel
//! JSON (`start`, `end`, `leadingComments`). Fields Babel emits as `null`
//! deserialize to their defaults through [`nullable`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field that Babel may emit as `null` into its default value.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read the `type` tag of a raw node.
pub(crate) fn node_kind<E: serde::de::Error>(value: &Value) -> Result<String, E> {
    value
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| E::custom("node is missing its `type` tag"))
}

/// Deserialize the payload of a tagged node once its kind is known.
pub(crate) fn payload<T, E>(value: Value) -> Result<T, E>
where
    T: serde::de::DeserializeOwned,
    E: serde::de::Error,
{
    serde_json::from_value(value).map_err(E::custom)
}

/// Source span and leading comments common to all nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMeta {
    #[serde(default, deserialize_with = "nullable")]
    pub start: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub end: u32,
    #[serde(default, deserialize_with = "nullable")]
    pub leading_comments: Vec<Comment>,
}

impl NodeMeta {
    pub fn with_comments(comments: Vec<Comment>) -> Self {
        Self {
            leading_comments: comments,
            ..Self::default()
        }
    }
}

/// Kind of an attached comment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum CommentKind {
    /// `// text`
    CommentLine,
    /// `/* text */`
    CommentBlock,
    /// Anything else the front end attaches; dropped at render time.
    #[serde(other)]
    Unknown,
}

/// A comment record as attached by the front end. `value` excludes the
/// delimiters but keeps all inner whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Comment {
    #[serde(rename = "type")]
    pub kind: CommentKind,
    pub value: String,
}

impl Comment {
    pub fn line(value: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::CommentLine,
            value: value.into(),
        }
    }

    pub fn block(value: impl Into<String>) -> Self {
        Self {
            kind: CommentKind::CommentBlock,
            value: value.into(),
        }
    }
}

/// `@decorator` applied to a class, method, or function.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Decorator {
    #[serde(flatten)]
    pub meta: NodeMeta,
}

/// Identifier, optionally annotated (`name?: T`) when used as a binding.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub name: String,
    #[serde(default)]
    pub type_annotation: Option<crate::TypeAnnotation>,
    #[serde(default, deserialize_with = "nullable")]
    pub optional: bool,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Raw source text Babel keeps in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RawExtra {
    #[serde(default)]
    pub raw: Option<String>,
}

/// `'text'` literal; used for module sources and quoted member names.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StringLiteral {
    #[serde(flatten)]
    pub meta: NodeMeta,
    pub value: String,
    #[serde(default)]
    pub extra: Option<RawExtra>,
}

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    /// Source text including quotes, falling back to a single-quoted value.
    pub fn raw(&self) -> String {
        self.extra
            .as_ref()
            .and_then(|extra| extra.raw.clone())
            .unwrap_or_else(|| format!("'{}'", self.value))
    }
}
