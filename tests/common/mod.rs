#![allow(dead_code)]

use std::sync::RwLock;

use preview_core::catalog::{Catalog, DeviceModel, ModelKind, Palette};
use preview_core::notify::{ChangeEvent, ChangeSink};
use preview_core::storage::{SettingsStore, StoreError};

pub fn model(name: &str, label: &str, palette_ids: &[&str]) -> DeviceModel {
    DeviceModel {
        name: name.to_string(),
        label: Some(label.to_string()),
        size: None,
        width: 400,
        height: 800,
        palette_ids: palette_ids.iter().map(|id| id.to_string()).collect(),
        device_class: Some(format!("frame-{name}")),
        size_class: None,
        kind: ModelKind::Official,
    }
}

pub fn palette(id: &str, name: &str, display_class: &str) -> Palette {
    Palette {
        id: id.to_string(),
        name: name.to_string(),
        display_class: display_class.to_string(),
    }
}

/// Three-model catalog: `argon` references an unusable palette first,
/// `boron` has two usable palettes, `xenon` is community-contributed.
pub fn sample_catalog() -> Catalog {
    let mut xenon = model("xenon", "Xenon", &["p2", "p3"]);
    xenon.kind = ModelKind::Community;

    Catalog {
        models: vec![
            model("argon", "Argon", &["p1", "p2"]),
            model("boron", "Boron", &["p3", "p4"]),
            xenon,
        ],
        palettes: vec![
            palette("p1", "Blank", ""),
            palette("p2", "Slate", "slate"),
            palette("p3", "Sand", "sand"),
            palette("p4", "Olive", "olive"),
        ],
    }
}

/// Sink that records every dispatched event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: RwLock<Vec<ChangeEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ChangeEvent> {
        self.events.read().expect("sink lock poisoned").clone()
    }

    pub fn origins(&self) -> Vec<String> {
        self.events()
            .iter()
            .map(|event| event.origin.to_string())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.events.read().expect("sink lock poisoned").len()
    }
}

impl ChangeSink for RecordingSink {
    fn dispatch(&self, event: &ChangeEvent) {
        self.events
            .write()
            .expect("sink lock poisoned")
            .push(event.clone());
    }
}

/// Store whose every operation fails, for exercising fail-silent persistence.
#[derive(Debug, Default)]
pub struct FailingStore;

impl SettingsStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "store offline",
        )))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "store offline",
        )))
    }
}
