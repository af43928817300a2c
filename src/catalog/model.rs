use serde::{Deserialize, Serialize};

/// Kind tag used only for grouping and ordering models in pickers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// First-party device frames shipped with the stylesheet.
    #[default]
    Official,
    /// Frames contributed by the community.
    Community,
}

/// A device frame that can be previewed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceModel {
    /// Unique machine name (e.g. `iphone-x`).
    pub name: String,
    /// Human label shown in pickers; falls back to `name` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form screen size tag (e.g. `5.8in`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Logical viewport width in pixels.
    pub width: u32,
    /// Logical viewport height in pixels.
    pub height: u32,
    /// Ids of the palettes this frame ships in, in display order.
    #[serde(default)]
    pub palette_ids: Vec<String>,
    /// Display class naming the frame artwork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
    /// Display class naming the frame size variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_class: Option<String>,
    #[serde(default)]
    pub kind: ModelKind,
}

impl DeviceModel {
    /// Label rendered in pickers, falling back to the machine name.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}
