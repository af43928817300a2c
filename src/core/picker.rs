//! Facade that coordinates selection state, persistence, and notification.

use chrono::Utc;

use crate::catalog::{Catalog, ValidCatalog};
use crate::controls::{ControlOption, ControlSurface, OptionGroup, COMMUNITY_GROUP, OFFICIAL_GROUP};
use crate::core::classes::derive_classes;
use crate::core::selection::{Selection, SelectionSnapshot, SelectionUpdate, UpdateOrigin};
use crate::errors::PickerError;
use crate::notify::{ChangeEvent, ChangeSink};
use crate::storage::{self, PersistedSelection, SettingsStore};

/// Construction options for [`FramePicker`].
#[derive(Debug, Clone, Default)]
pub struct PickerConfig {
    /// Model selected when no valid persisted selection exists.
    pub preferred_model: Option<String>,
    /// Key used to persist selections. Persistence is disabled when unset.
    pub storage_key: Option<String>,
}

/// One preview picker instance: a validated catalog, the current selection,
/// and the collaborators reached through narrow contracts.
pub struct FramePicker {
    catalog: ValidCatalog,
    config: PickerConfig,
    store: Option<Box<dyn SettingsStore>>,
    sinks: Vec<Box<dyn ChangeSink>>,
    selection: Option<Selection>,
}

impl std::fmt::Debug for FramePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePicker")
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .field("store", &self.store.as_ref().map(|_| "<store>"))
            .field("sinks", &self.sinks.len())
            .field("selection", &self.selection)
            .finish()
    }
}

impl FramePicker {
    /// Constructs a picker without persistence or subscribers.
    pub fn new(catalog: Catalog, config: PickerConfig) -> Result<Self, PickerError> {
        Self::with_collaborators(catalog, config, None, Vec::new())
    }

    /// Constructs a picker wired to its collaborators.
    ///
    /// The persisted record is read exactly once, here. Construction ends by
    /// dispatching the single `initial` event to every sink, so consumers
    /// have first-paint data without waiting for an interaction.
    pub fn with_collaborators(
        catalog: Catalog,
        config: PickerConfig,
        store: Option<Box<dyn SettingsStore>>,
        sinks: Vec<Box<dyn ChangeSink>>,
    ) -> Result<Self, PickerError> {
        let catalog = catalog.validate()?;

        let persisted = match (&store, &config.storage_key) {
            (Some(store), Some(key)) => storage::load_selection(store.as_ref(), key),
            _ => None,
        };
        let selection =
            Selection::initialize(&catalog, persisted.as_ref(), config.preferred_model.as_deref())?;

        let picker = Self {
            catalog,
            config,
            store,
            sinks,
            selection: Some(selection),
        };
        picker.notify(UpdateOrigin::Initial);
        Ok(picker)
    }

    /// Registers a sink for subsequent change events.
    pub fn subscribe(&mut self, sink: Box<dyn ChangeSink>) {
        self.sinks.push(sink);
    }

    pub fn catalog(&self) -> &ValidCatalog {
        &self.catalog
    }

    /// Applies a partial update on behalf of a direct API caller.
    pub fn apply_update(&mut self, update: &SelectionUpdate) -> Result<bool, PickerError> {
        self.apply_with_origin(UpdateOrigin::Programmatic, update)
    }

    /// Applies a partial update originating from a bound control.
    pub fn apply_interaction(&mut self, update: &SelectionUpdate) -> Result<bool, PickerError> {
        self.apply_with_origin(UpdateOrigin::Interaction, update)
    }

    /// Applies a loosely typed JSON payload (programmatic origin).
    pub fn apply_json_update(&mut self, value: &serde_json::Value) -> Result<bool, PickerError> {
        let update = SelectionUpdate::from_json(value)?;
        self.apply_with_origin(UpdateOrigin::Programmatic, &update)
    }

    /// Restores the current model's first palette, landscape, and light mode.
    pub fn reset(&mut self) -> Result<bool, PickerError> {
        let update = self.selection()?.reset_update(&self.catalog);
        self.apply_with_origin(UpdateOrigin::Programmatic, &update)
    }

    pub fn snapshot(&self) -> Result<SelectionSnapshot, PickerError> {
        Ok(self.selection()?.snapshot())
    }

    pub fn derived_classes(&self) -> Result<Vec<String>, PickerError> {
        Ok(derive_classes(&self.snapshot()?))
    }

    /// The storage projection of the current selection, without a timestamp.
    pub fn persisted_selection(&self) -> Result<PersistedSelection, PickerError> {
        Ok(self.selection()?.to_persisted())
    }

    /// Model options grouped for a grouped dropdown, in default order.
    pub fn model_option_groups(&self) -> Vec<OptionGroup> {
        let (official, community) = self.catalog.grouped_models();
        let to_group = |title: &str, models: Vec<&crate::catalog::DeviceModel>| OptionGroup {
            title: title.to_string(),
            options: models
                .into_iter()
                .map(|model| ControlOption::new(model.name.clone(), model.display_label()))
                .collect(),
        };
        vec![
            to_group(OFFICIAL_GROUP, official),
            to_group(COMMUNITY_GROUP, community),
        ]
    }

    /// Palette options for the current model, in the model's own order.
    pub fn palette_options(&self) -> Result<Vec<ControlOption>, PickerError> {
        let selection = self.selection()?;
        Ok(self
            .catalog
            .usable_palettes(selection.model())
            .into_iter()
            .map(|palette| ControlOption::new(palette.id.clone(), palette.name.clone()))
            .collect())
    }

    /// Repopulates the surface's options and pushes the current values into
    /// its controls. Returns whether a displayed value had drifted from the
    /// engine state.
    pub fn sync_controls(&self, surface: &mut dyn ControlSurface) -> Result<bool, PickerError> {
        let snapshot = self.snapshot()?;
        surface.set_model_options(&self.model_option_groups());
        surface.set_palette_options(&self.palette_options()?);

        let drifted = surface.displayed_model().as_deref() != Some(snapshot.model.name.as_str())
            || surface.displayed_palette().as_deref() != Some(snapshot.palette.id.as_str());
        surface.apply_selection(&snapshot);
        Ok(drifted)
    }

    /// Releases the selection and collaborators. Safe to call repeatedly;
    /// every later operation fails with [`PickerError::TornDown`] instead of
    /// acting on stale state.
    pub fn teardown(&mut self) {
        self.selection = None;
        self.sinks.clear();
        self.store = None;
    }

    pub fn is_torn_down(&self) -> bool {
        self.selection.is_none()
    }

    fn selection(&self) -> Result<&Selection, PickerError> {
        self.selection.as_ref().ok_or(PickerError::TornDown)
    }

    fn apply_with_origin(
        &mut self,
        origin: UpdateOrigin,
        update: &SelectionUpdate,
    ) -> Result<bool, PickerError> {
        let selection = self.selection.as_mut().ok_or(PickerError::TornDown)?;
        let changed = selection.apply(&self.catalog, update);
        if changed {
            self.persist();
            self.notify(origin);
        }
        Ok(changed)
    }

    fn persist(&self) {
        let Some(selection) = &self.selection else {
            return;
        };
        let (Some(store), Some(key)) = (&self.store, &self.config.storage_key) else {
            return;
        };
        let mut record = selection.to_persisted();
        record.saved_at = Some(Utc::now());
        storage::save_selection(store.as_ref(), key, &record);
    }

    fn notify(&self, origin: UpdateOrigin) {
        let Some(selection) = &self.selection else {
            return;
        };
        let snapshot = selection.snapshot();
        let event = ChangeEvent {
            origin,
            classes: derive_classes(&snapshot),
            selection: snapshot,
        };
        for sink in &self.sinks {
            sink.dispatch(&event);
        }
    }
}
