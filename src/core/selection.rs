//! Selection state engine: owns the current (model, palette, orientation,
//! dark mode) tuple and applies partial updates against a validated catalog.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::{DeviceModel, Palette, ValidCatalog};
use crate::errors::PickerError;
use crate::storage::PersistedSelection;

/// Where a state change originated.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOrigin {
    /// The one-time emission at the end of construction.
    Initial,
    /// A user manipulating a bound control.
    Interaction,
    /// A direct API call.
    Programmatic,
}

impl fmt::Display for UpdateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Initial => "initial",
            Self::Interaction => "interaction",
            Self::Programmatic => "programmatic",
        };
        write!(f, "{tag}")
    }
}

/// Partial update applied to the current selection. Unset fields keep their
/// value; a `model` field takes precedence over `palette` in the same update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionUpdate {
    pub model: Option<String>,
    pub palette: Option<String>,
    pub portrait: Option<bool>,
    pub dark_mode: Option<bool>,
}

impl SelectionUpdate {
    pub fn model(name: impl Into<String>) -> Self {
        Self {
            model: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn palette(id: impl Into<String>) -> Self {
        Self {
            palette: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn portrait(value: bool) -> Self {
        Self {
            portrait: Some(value),
            ..Self::default()
        }
    }

    pub fn dark_mode(value: bool) -> Self {
        Self {
            dark_mode: Some(value),
            ..Self::default()
        }
    }

    pub fn with_palette(mut self, id: impl Into<String>) -> Self {
        self.palette = Some(id.into());
        self
    }

    pub fn with_portrait(mut self, value: bool) -> Self {
        self.portrait = Some(value);
        self
    }

    pub fn with_dark_mode(mut self, value: bool) -> Self {
        self.dark_mode = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Builds an update from a loosely typed JSON payload.
    ///
    /// Only objects are accepted. Fields with unexpected types are dropped
    /// rather than rejected: partial updates are the normal usage pattern and
    /// a stray field must not invalidate the rest of the payload.
    pub fn from_json(value: &Value) -> Result<Self, PickerError> {
        let object = value
            .as_object()
            .ok_or(PickerError::InvalidUpdate(json_type_name(value)))?;

        let mut update = Self::default();
        if let Some(Value::String(name)) = object.get("model") {
            update.model = Some(name.clone());
        }
        if let Some(Value::String(id)) = object.get("palette") {
            update.palette = Some(id.clone());
        }
        if let Some(Value::Bool(portrait)) = object.get("portrait") {
            update.portrait = Some(*portrait);
        }
        if let Some(Value::Bool(dark_mode)) = object.get("dark_mode") {
            update.dark_mode = Some(*dark_mode);
        }
        Ok(update)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Resolved view of the current selection handed to class derivation, sinks,
/// and control adapters.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionSnapshot {
    pub model: DeviceModel,
    pub palette: Palette,
    pub portrait: bool,
    pub dark_mode: bool,
}

/// The mutable selection owned by the picker.
///
/// Invariant: `palette` is always a usable palette referenced by `model`;
/// switching models forces the palette to the new model's first usable one.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    model: DeviceModel,
    palette: Palette,
    portrait: bool,
    dark_mode: bool,
}

impl Selection {
    /// Resolves the initial selection from a persisted record and defaults.
    ///
    /// Persisted fields are accepted individually: the model only when still
    /// eligible, the palette only when usable and referenced by the accepted
    /// model. Each invalid field falls back to its computed default.
    pub fn initialize(
        catalog: &ValidCatalog,
        persisted: Option<&PersistedSelection>,
        preferred_model: Option<&str>,
    ) -> Result<Self, PickerError> {
        let mut model = catalog
            .default_model(preferred_model)
            .ok_or(PickerError::NoEligibleModels)?;
        if let Some(record) = persisted {
            if let Some(saved) = catalog.model(&record.model) {
                model = saved;
            }
        }

        let mut palette = catalog
            .first_usable_palette(model)
            .ok_or(PickerError::NoEligibleModels)?;
        if let Some(record) = persisted {
            if let Some(saved) = catalog.palette(&record.palette) {
                if saved.is_usable() && model.palette_ids.contains(&saved.id) {
                    palette = saved;
                }
            }
        }

        let (portrait, dark_mode) = persisted
            .map(|record| (record.portrait, record.dark_mode))
            .unwrap_or((false, false));

        Ok(Self {
            model: model.clone(),
            palette: palette.clone(),
            portrait,
            dark_mode,
        })
    }

    pub fn model(&self) -> &DeviceModel {
        &self.model
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn is_portrait(&self) -> bool {
        self.portrait
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Applies a partial update, returning whether anything changed.
    ///
    /// Unknown model names and palette ids outside the current model's usable
    /// list are ignored without error.
    pub fn apply(&mut self, catalog: &ValidCatalog, update: &SelectionUpdate) -> bool {
        let mut changed = false;

        if let Some(name) = update.model.as_deref() {
            if let Some(model) = catalog.model(name) {
                if model.name != self.model.name {
                    if let Some(palette) = catalog.first_usable_palette(model) {
                        self.model = model.clone();
                        self.palette = palette.clone();
                        changed = true;
                    }
                }
            }
        } else if let Some(id) = update.palette.as_deref() {
            if id != self.palette.id {
                if let Some(palette) = catalog.palette(id) {
                    if palette.is_usable() && self.model.palette_ids.iter().any(|p| p == id) {
                        self.palette = palette.clone();
                        changed = true;
                    }
                }
            }
        }

        if let Some(portrait) = update.portrait {
            if portrait != self.portrait {
                self.portrait = portrait;
                changed = true;
            }
        }

        if let Some(dark_mode) = update.dark_mode {
            if dark_mode != self.dark_mode {
                self.dark_mode = dark_mode;
                changed = true;
            }
        }

        changed
    }

    /// The reset convenience: first usable palette of the current model,
    /// landscape, dark mode off, routed through the regular apply path.
    pub fn reset_update(&self, catalog: &ValidCatalog) -> SelectionUpdate {
        SelectionUpdate {
            model: None,
            palette: catalog
                .first_usable_palette(&self.model)
                .map(|palette| palette.id.clone()),
            portrait: Some(false),
            dark_mode: Some(false),
        }
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            model: self.model.clone(),
            palette: self.palette.clone(),
            portrait: self.portrait,
            dark_mode: self.dark_mode,
        }
    }

    pub fn to_persisted(&self) -> PersistedSelection {
        PersistedSelection {
            model: self.model.name.clone(),
            palette: self.palette.id.clone(),
            portrait: self.portrait,
            dark_mode: self.dark_mode,
            saved_at: None,
        }
    }
}
