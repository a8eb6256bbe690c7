//! Typed field paths for validation errors and touched tracking.
//!
//! The original client kept errors in ad hoc nested objects
//! (`errors.ingredients[0].name`). Here every addressable form field is a
//! [`FieldPath`] value, and error/touched maps are keyed by it. The
//! `Display`/`FromStr` pair round-trips the server's flat Spring-style
//! paths (`title`, `ingredients[0].name`, `steps[1]`), so remote
//! validation errors parse into the same map the local engine produces.

use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Field paths
// ---------------------------------------------------------------------------

/// Sub-field of an ingredient row, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngredientField {
    Quantity,
    Unit,
    Name,
}

impl IngredientField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quantity => "quantity",
            Self::Unit => "unit",
            Self::Name => "name",
        }
    }
}

/// One addressable field of the recipe form.
///
/// The derived `Ord` follows the visual form order (basic info, categories,
/// ingredients, steps), which makes "first erroring field" a plain
/// `BTreeMap` first-key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldPath {
    Title,
    Difficulty,
    CookingTime,
    Categories,
    Ingredient(usize, IngredientField),
    Step(usize),
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Difficulty => f.write_str("difficulty"),
            Self::CookingTime => f.write_str("cookingTimeMinutes"),
            Self::Categories => f.write_str("categoryIds"),
            Self::Ingredient(idx, field) => write!(f, "ingredients[{idx}].{}", field.as_str()),
            Self::Step(idx) => write!(f, "steps[{idx}]"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => return Ok(Self::Title),
            "difficulty" => return Ok(Self::Difficulty),
            "cookingTimeMinutes" => return Ok(Self::CookingTime),
            "categoryIds" => return Ok(Self::Categories),
            _ => {}
        }

        if let Some(rest) = s.strip_prefix("ingredients[") {
            let (idx, field) = parse_indexed(rest)?;
            let field = field.ok_or_else(|| {
                CoreError::Parse(format!("Ingredient path '{s}' is missing a sub-field"))
            })?;
            let field = match field {
                "quantity" => IngredientField::Quantity,
                "unit" => IngredientField::Unit,
                "name" => IngredientField::Name,
                other => {
                    return Err(CoreError::Parse(format!(
                        "Unknown ingredient field '{other}' in path '{s}'"
                    )))
                }
            };
            return Ok(Self::Ingredient(idx, field));
        }

        if let Some(rest) = s.strip_prefix("steps[") {
            let (idx, field) = parse_indexed(rest)?;
            // Steps may arrive as `steps[1]` or `steps[1].instruction`.
            if let Some(field) = field {
                if field != "instruction" {
                    return Err(CoreError::Parse(format!(
                        "Unknown step field '{field}' in path '{s}'"
                    )));
                }
            }
            return Ok(Self::Step(idx));
        }

        Err(CoreError::Parse(format!("Unknown field path '{s}'")))
    }
}

/// Parse `"<idx>]"` or `"<idx>].<field>"` (the part after the `[`).
fn parse_indexed(rest: &str) -> Result<(usize, Option<&str>), CoreError> {
    let close = rest
        .find(']')
        .ok_or_else(|| CoreError::Parse(format!("Unclosed index in path suffix '{rest}'")))?;
    let idx: usize = rest[..close]
        .parse()
        .map_err(|_| CoreError::Parse(format!("Invalid index in path suffix '{rest}'")))?;
    let tail = &rest[close + 1..];
    if tail.is_empty() {
        Ok((idx, None))
    } else if let Some(field) = tail.strip_prefix('.') {
        Ok((idx, Some(field)))
    } else {
        Err(CoreError::Parse(format!(
            "Malformed path suffix '{rest}' after index"
        )))
    }
}

// ---------------------------------------------------------------------------
// Error map
// ---------------------------------------------------------------------------

/// Validation errors keyed by field path, in form order.
///
/// Absence of a key means the field is valid. Serializes as a flat
/// string-keyed map matching the server's wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FieldPath, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        self.errors.insert(path, message.into());
    }

    pub fn get(&self, path: FieldPath) -> Option<&str> {
        self.errors.get(&path).map(String::as_str)
    }

    pub fn contains(&self, path: FieldPath) -> bool {
        self.errors.contains_key(&path)
    }

    /// The first erroring field in form order (the one to focus).
    pub fn first(&self) -> Option<FieldPath> {
        self.errors.keys().next().copied()
    }

    /// Merge another error map into this one. Incoming messages win on
    /// conflicting paths (remote errors overwrite stale local ones).
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &str)> {
        self.errors.iter().map(|(p, m)| (*p, m.as_str()))
    }

    /// Parse a flat wire map (`{"ingredients[0].name": "..."}`) into typed
    /// paths. Keys that don't address a known form field are skipped; the
    /// view has nowhere to attach them.
    pub fn from_wire<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut out = Self::new();
        for (key, message) in entries {
            if let Ok(path) = key.parse::<FieldPath>() {
                out.insert(path, message);
            }
        }
        out
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (path, message) in &self.errors {
            map.serialize_entry(&path.to_string(), message)?;
        }
        map.end()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = (FieldPath, String);
    type IntoIter = btree_map::IntoIter<FieldPath, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Touched tracking
// ---------------------------------------------------------------------------

/// Which fields have received and lost focus at least once.
///
/// Error visibility is gated on this: an error is surfaced only once its
/// field is touched or a submit was attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TouchedState {
    touched: BTreeSet<FieldPath>,
}

impl TouchedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, path: FieldPath) {
        self.touched.insert(path);
    }

    pub fn is_touched(&self, path: FieldPath) -> bool {
        self.touched.contains(&path)
    }

    pub fn clear(&mut self) {
        self.touched.clear();
    }
}
