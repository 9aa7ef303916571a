//! Rendered output fragments.
//!
//! A [`SerializationValue`] is either a growable text buffer (JSON and HTML
//! targets) or an object-graph value (scalar, list or dict). Visitors return
//! fragments and the traversal engine folds them together with
//! [`SerializationValue::concat`].

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Declared kind of a serialization value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializationKind {
    Text,
    Null,
    Integer,
    Float,
    Boolean,
    Str,
    List,
    Dict,
}

/// The content of a serialization value.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// String buffer for textual targets.
    Text(String),
    Null,
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Str(String),
    List(Vec<SerializationValue>),
    /// Key/value pairs in insertion order.
    Dict(Vec<(String, SerializationValue)>),
}

/// Errors raised when concatenating incompatible values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConcatError {
    /// The target is a scalar and cannot absorb anything.
    #[error("Cannot concatenate onto scalar value of kind {0:?}")]
    ScalarTarget(SerializationKind),

    /// A dict only accepts labelled values.
    #[error("Cannot insert unlabelled {0:?} value into a dict")]
    MissingLabel(SerializationKind),

    /// Text buffers only accept text.
    #[error("Cannot append {found:?} value onto {target:?} value")]
    Mismatch {
        target: SerializationKind,
        found: SerializationKind,
    },
}

/// A fragment of rendered output, optionally labelled with the key it
/// takes when inserted into a dict.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializationValue {
    label: Option<String>,
    body: Body,
}

impl SerializationValue {
    /// Creates an empty value of the declared kind.
    ///
    /// Numeric scalars start at zero and booleans at `false`.
    pub fn new(kind: SerializationKind) -> Self {
        let body = match kind {
            SerializationKind::Text => Body::Text(String::new()),
            SerializationKind::Null => Body::Null,
            SerializationKind::Integer => Body::Integer(0),
            SerializationKind::Float => Body::Float(0.0),
            SerializationKind::Boolean => Body::Boolean(false),
            SerializationKind::Str => Body::Str(String::new()),
            SerializationKind::List => Body::List(Vec::new()),
            SerializationKind::Dict => Body::Dict(Vec::new()),
        };
        Self { label: None, body }
    }

    pub fn from_body(body: Body) -> Self {
        Self { label: None, body }
    }

    /// A text buffer holding `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_body(Body::Text(text.into()))
    }

    pub fn null() -> Self {
        Self::from_body(Body::Null)
    }

    pub fn integer(value: i64) -> Self {
        Self::from_body(Body::Integer(value))
    }

    pub fn float(value: f64) -> Self {
        Self::from_body(Body::Float(value))
    }

    pub fn boolean(value: bool) -> Self {
        Self::from_body(Body::Boolean(value))
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::from_body(Body::Str(value.into()))
    }

    pub fn list() -> Self {
        Self::new(SerializationKind::List)
    }

    pub fn dict() -> Self {
        Self::new(SerializationKind::Dict)
    }

    /// Attaches the label used when this value is inserted into a collection.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// The declared kind of this value.
    pub fn kind(&self) -> SerializationKind {
        match &self.body {
            Body::Text(_) => SerializationKind::Text,
            Body::Null => SerializationKind::Null,
            Body::Integer(_) => SerializationKind::Integer,
            Body::Float(_) => SerializationKind::Float,
            Body::Boolean(_) => SerializationKind::Boolean,
            Body::Str(_) => SerializationKind::Str,
            Body::List(_) => SerializationKind::List,
            Body::Dict(_) => SerializationKind::Dict,
        }
    }

    /// The text buffer, for text values.
    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Consumes the value, returning its text buffer.
    pub fn into_text(self) -> Option<String> {
        match self.body {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Appends `other` onto this value.
    ///
    /// - `None` and empty text are no-ops.
    /// - Text is appended onto text.
    /// - Anything is pushed onto a list; a labelled item is wrapped as a
    ///   single-entry dict.
    /// - A labelled value is inserted into a dict under its label.
    /// - Scalars cannot absorb anything.
    pub fn concat(&mut self, other: Option<SerializationValue>) -> Result<(), ConcatError> {
        let Some(other) = other else {
            return Ok(());
        };
        if matches!(&other.body, Body::Text(text) if text.is_empty()) {
            return Ok(());
        }

        let target = self.kind();
        match &mut self.body {
            Body::Text(buffer) => match other.body {
                Body::Text(text) => buffer.push_str(&text),
                _ => {
                    return Err(ConcatError::Mismatch {
                        target,
                        found: other.kind(),
                    });
                }
            },
            Body::List(items) => match other.label {
                Some(label) => {
                    let inner = SerializationValue::from_body(other.body);
                    items.push(SerializationValue::from_body(Body::Dict(vec![(label, inner)])));
                }
                None => items.push(other),
            },
            Body::Dict(entries) => {
                let kind = other.kind();
                let Some(label) = other.label else {
                    return Err(ConcatError::MissingLabel(kind));
                };
                entries.push((label, SerializationValue::from_body(other.body)));
            }
            Body::Null
            | Body::Integer(_)
            | Body::Float(_)
            | Body::Boolean(_)
            | Body::Str(_) => return Err(ConcatError::ScalarTarget(target)),
        }
        Ok(())
    }

    /// Converts this value into a `serde_json::Value`.
    ///
    /// Text buffers become JSON strings and non-finite floats become `null`.
    pub fn into_json_value(self) -> Value {
        match self.body {
            Body::Text(text) | Body::Str(text) => Value::String(text),
            Body::Null => Value::Null,
            Body::Integer(value) => Value::Number(value.into()),
            Body::Float(value) => Number::from_f64(value).map_or(Value::Null, Value::Number),
            Body::Boolean(value) => Value::Bool(value),
            Body::List(items) => Value::Array(
                items
                    .into_iter()
                    .map(SerializationValue::into_json_value)
                    .collect(),
            ),
            Body::Dict(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key, value.into_json_value());
                }
                Value::Object(map)
            }
        }
    }
}

/// Concatenates `other` onto an optional accumulator.
///
/// An empty accumulator adopts `other` as its base.
pub fn concat_into(
    acc: &mut Option<SerializationValue>,
    other: Option<SerializationValue>,
) -> Result<(), ConcatError> {
    match acc {
        Some(value) => value.concat(other),
        None => {
            *acc = other;
            Ok(())
        }
    }
}
