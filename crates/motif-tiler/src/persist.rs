//! Flat, named-field persistence for pattern parameters.
//!
//! The host decides how a field set is stored (archive, JSON, SVG
//! attributes...). This module only defines the field names, their value
//! kinds and the defaulting rules when reading them back.
//!
//! Restoring is forgiving on purpose: a missing field takes its default, a
//! field of the wrong kind is logged and treated as missing. Documents
//! written before `motif_angle_is_relative_to_pattern` existed therefore
//! come back with it set to `true`.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Size;
use crate::params::PatternParameters;

/// Field names used in saved pattern data.
pub mod keys {
    pub const ALTERNATE_OFFSET: &str = "alternate_offset";
    pub const ANGLE: &str = "angle";
    pub const ANGLE_IS_RELATIVE_TO_OBJECT: &str = "angle_is_relative_to_object";
    pub const MOTIF_ANGLE: &str = "motif_angle";
    pub const MOTIF_ANGLE_IS_RELATIVE_TO_PATTERN: &str = "motif_angle_is_relative_to_pattern";
    pub const SUPPRESS_CLIPPED_ELEMENTS: &str = "suppress_clipped_elements";
    pub const MOTIF_ANGLE_RANDOMNESS: &str = "motif_angle_randomness";
    pub const SCALE: &str = "scale";
    pub const INTERVAL: &str = "interval";
    pub const WOBBLE: &str = "wobble";

    /// Every field `PatternParameters::save` writes.
    pub const ALL: &[&str] = &[
        ALTERNATE_OFFSET,
        ANGLE,
        ANGLE_IS_RELATIVE_TO_OBJECT,
        MOTIF_ANGLE,
        MOTIF_ANGLE_IS_RELATIVE_TO_PATTERN,
        SUPPRESS_CLIPPED_ELEMENTS,
        MOTIF_ANGLE_RANDOMNESS,
        SCALE,
        INTERVAL,
        WOBBLE,
    ];
}

/// Errors from turning text into field values.
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("field '{key}' has unparseable value '{value}'")]
    InvalidValue { key: String, value: String },
    #[error("field '{key}' has no value")]
    Empty { key: String },
}

/// A single persisted value.
///
/// ## Rust Lesson #19: Untagged Enums
///
/// `#[serde(untagged)]` makes serde try each variant in order, so JSON
/// `true`, `0.5` and `{"width": 0, "height": 0.5}` all deserialize
/// without a type tag. Order matters: Bool before Number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Size(Size),
}

impl FieldValue {
    /// Parse attribute-style text: `true`/`false`, a number, or two numbers
    /// (comma or space separated) for a size.
    pub fn parse(key: &str, text: &str) -> Result<Self, FieldError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FieldError::Empty { key: key.to_string() });
        }
        match text {
            "true" => return Ok(FieldValue::Bool(true)),
            "false" => return Ok(FieldValue::Bool(false)),
            _ => {}
        }

        let invalid = || FieldError::InvalidValue {
            key: key.to_string(),
            value: text.to_string(),
        };

        let numbers = svgtypes::NumberListParser::from(text)
            .collect::<Result<Vec<f64>, _>>()
            .map_err(|_| invalid())?;

        match numbers.as_slice() {
            [n] => Ok(FieldValue::Number(*n)),
            [w, h] => Ok(FieldValue::Size(Size::new(*w, *h))),
            _ => Err(invalid()),
        }
    }
}

/// A flat set of named values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: FieldValue) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn insert_number(&mut self, key: &str, value: f64) {
        self.insert(key, FieldValue::Number(value));
    }

    pub fn insert_bool(&mut self, key: &str, value: bool) {
        self.insert(key, FieldValue::Bool(value));
    }

    pub fn insert_size(&mut self, key: &str, value: Size) {
        self.insert(key, FieldValue::Size(value));
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Overlay `other` on top of this set; its values win.
    pub fn merge(&mut self, other: &FieldSet) {
        for (k, v) in &other.fields {
            self.fields.insert(k.clone(), *v);
        }
    }

    /// Keys that `PatternParameters::restore` will ignore.
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(|k| !keys::ALL.contains(k))
            .collect()
    }

    /// Numeric field. Integers stored as numbers are fine; a bool or size
    /// under this key is reported and ignored.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            FieldValue::Number(n) => Some(*n),
            other => {
                warn!("ignoring field '{}': expected number, found {:?}", key, other);
                None
            }
        }
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            FieldValue::Bool(b) => Some(*b),
            other => {
                warn!("ignoring field '{}': expected bool, found {:?}", key, other);
                None
            }
        }
    }

    pub fn size(&self, key: &str) -> Option<Size> {
        match self.get(key)? {
            FieldValue::Size(s) => Some(*s),
            other => {
                warn!("ignoring field '{}': expected size, found {:?}", key, other);
                None
            }
        }
    }
}

impl PatternParameters {
    /// Write every persisted field into `fields`, replacing existing values.
    pub fn save_into(&self, fields: &mut FieldSet) {
        fields.insert_size(keys::ALTERNATE_OFFSET, self.alternate_offset());
        fields.insert_number(keys::ANGLE, self.angle());
        fields.insert_bool(keys::ANGLE_IS_RELATIVE_TO_OBJECT, self.angle_is_relative_to_object());
        fields.insert_number(keys::MOTIF_ANGLE, self.motif_angle());
        fields.insert_bool(
            keys::MOTIF_ANGLE_IS_RELATIVE_TO_PATTERN,
            self.motif_angle_is_relative_to_pattern(),
        );
        fields.insert_bool(keys::SUPPRESS_CLIPPED_ELEMENTS, self.suppress_clipped_elements());
        fields.insert_number(keys::MOTIF_ANGLE_RANDOMNESS, self.motif_angle_randomness());
        fields.insert_number(keys::SCALE, self.scale());
        fields.insert_number(keys::INTERVAL, self.interval());
        fields.insert_number(keys::WOBBLE, self.wobble());
    }

    pub fn save(&self) -> FieldSet {
        let mut fields = FieldSet::new();
        self.save_into(&mut fields);
        fields
    }

    /// Rebuild parameters from saved fields. Values go through the normal
    /// setters, so out-of-range data is clamped on the way in.
    pub fn restore(fields: &FieldSet) -> Self {
        let mut params = PatternParameters::default();
        params.apply_fields(fields);
        params
    }

    /// Overwrite only the fields present in `fields`.
    pub fn apply_fields(&mut self, fields: &FieldSet) {
        if let Some(offset) = fields.size(keys::ALTERNATE_OFFSET) {
            self.set_alternate_offset(offset);
        }
        if let Some(angle) = fields.number(keys::ANGLE) {
            self.set_angle(angle);
        }
        if let Some(relative) = fields.bool(keys::ANGLE_IS_RELATIVE_TO_OBJECT) {
            self.set_angle_is_relative_to_object(relative);
        }
        if let Some(angle) = fields.number(keys::MOTIF_ANGLE) {
            self.set_motif_angle(angle);
        }
        if let Some(relative) = fields.bool(keys::MOTIF_ANGLE_IS_RELATIVE_TO_PATTERN) {
            self.set_motif_angle_is_relative_to_pattern(relative);
        }
        if let Some(suppress) = fields.bool(keys::SUPPRESS_CLIPPED_ELEMENTS) {
            self.set_suppress_clipped_elements(suppress);
        }
        if let Some(randomness) = fields.number(keys::MOTIF_ANGLE_RANDOMNESS) {
            self.set_motif_angle_randomness(randomness);
        }
        if let Some(scale) = fields.number(keys::SCALE) {
            self.set_scale(scale);
        }
        if let Some(interval) = fields.number(keys::INTERVAL) {
            self.set_interval(interval);
        }
        if let Some(wobble) = fields.number(keys::WOBBLE) {
            self.set_wobble(wobble);
        }
    }
}
