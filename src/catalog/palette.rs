use serde::{Deserialize, Serialize};

/// A color scheme a device frame can be rendered in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Palette {
    /// Unique machine id (e.g. `space-gray`).
    pub id: String,
    /// Human display name.
    pub name: String,
    /// Class applied to the rendered frame. Blank marks the palette unusable.
    pub display_class: String,
}

impl Palette {
    /// A palette is selectable only when its display class carries content.
    pub fn is_usable(&self) -> bool {
        !self.display_class.trim().is_empty()
    }
}
