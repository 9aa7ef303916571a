//! Entity and payload types.

use std::borrow::Cow;

use serde::Serialize;

use crate::EntityKind;

/// A scalar value carried by an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Datum {
    /// A string.
    Text(String),
    /// A numeric literal, kept verbatim.
    Number(String),
    /// A boolean.
    Bool(bool),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl Datum {
    /// Returns the textual form of this datum, if it has one.
    ///
    /// Booleans and bytes have no text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Datum::Text(text) | Datum::Number(text) => Some(text),
            Datum::Bool(_) | Datum::Bytes(_) => None,
        }
    }

    /// Renders the datum for display, lossily for bytes.
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            Datum::Text(text) | Datum::Number(text) => Cow::Borrowed(text),
            Datum::Bool(true) => Cow::Borrowed("true"),
            Datum::Bool(false) => Cow::Borrowed("false"),
            Datum::Bytes(bytes) => String::from_utf8_lossy(bytes),
        }
    }
}

/// Payload of an entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// A bare datum, used by plain kinds.
    Datum(Datum),
    /// A datum remembering the key it came from, used by reference kinds.
    Pair {
        annotation: String,
        datum: Option<Datum>,
    },
}

/// An ordered leaf content item owned by a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// The kind of this entity.
    pub kind: EntityKind,
    /// The payload. `None` is a null value.
    pub payload: Option<Payload>,
}

impl Entity {
    /// Creates an entity with no payload.
    #[inline]
    pub const fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            payload: None,
        }
    }

    /// Creates an entity with a bare datum.
    pub fn with_datum(kind: EntityKind, datum: Datum) -> Self {
        Self {
            kind,
            payload: Some(Payload::Datum(datum)),
        }
    }

    /// Creates an entity with an annotation/datum pair.
    pub fn with_pair(kind: EntityKind, annotation: impl Into<String>, datum: Option<Datum>) -> Self {
        Self {
            kind,
            payload: Some(Payload::Pair {
                annotation: annotation.into(),
                datum,
            }),
        }
    }

    /// Shorthand for a [`EntityKind::Text`] entity.
    pub fn text(value: impl Into<String>) -> Self {
        Self::with_datum(EntityKind::Text, Datum::Text(value.into()))
    }

    /// Shorthand for an [`EntityKind::OntologyReference`] entity holding a string.
    pub fn reference(annotation: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_pair(
            EntityKind::OntologyReference,
            annotation,
            Some(Datum::Text(value.into())),
        )
    }

    /// Returns the pair annotation, if this entity carries one.
    pub fn annotation(&self) -> Option<&str> {
        match &self.payload {
            Some(Payload::Pair { annotation, .. }) => Some(annotation),
            _ => None,
        }
    }

    /// Returns the datum regardless of payload shape.
    pub fn datum(&self) -> Option<&Datum> {
        match &self.payload {
            Some(Payload::Datum(datum)) => Some(datum),
            Some(Payload::Pair { datum, .. }) => datum.as_ref(),
            None => None,
        }
    }

    /// Returns the textual content of this entity, if any.
    pub fn text_value(&self) -> Option<&str> {
        self.datum().and_then(Datum::as_text)
    }

    /// Number of characters this entity contributes to the document text.
    pub fn text_len(&self) -> usize {
        self.text_value().map_or(0, |text| text.chars().count())
    }
}
