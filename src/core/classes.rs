//! Display class derivation for rendered device frames.

use crate::core::selection::SelectionSnapshot;

/// Root class present on every rendered frame.
pub const FRAME_CLASS: &str = "device-frame";
/// Appended when the frame is rotated into portrait; landscape is implicit.
pub const PORTRAIT_CLASS: &str = "portrait";
/// Fixed preview scale marker consumed by the stylesheet.
pub const SCALED_CLASS: &str = "scaled";
/// Appended when dark mode styling is active.
pub const DARK_CLASS: &str = "dark";

/// Derives the ordered class list for the current selection.
///
/// Order is significant and consumers match positionally: base class, palette
/// class, device and size metadata, then the marker classes. Duplicates are
/// not suppressed.
pub fn derive_classes(snapshot: &SelectionSnapshot) -> Vec<String> {
    let mut classes = vec![
        FRAME_CLASS.to_string(),
        snapshot.palette.display_class.clone(),
    ];
    if let Some(device_class) = &snapshot.model.device_class {
        classes.push(device_class.clone());
    }
    if let Some(size_class) = &snapshot.model.size_class {
        classes.push(size_class.clone());
    }
    if snapshot.portrait {
        classes.push(PORTRAIT_CLASS.to_string());
    }
    classes.push(SCALED_CLASS.to_string());
    if snapshot.dark_mode {
        classes.push(DARK_CLASS.to_string());
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DeviceModel, ModelKind, Palette};

    fn snapshot() -> SelectionSnapshot {
        SelectionSnapshot {
            model: DeviceModel {
                name: "iphone-x".into(),
                label: Some("iPhone X".into()),
                size: None,
                width: 375,
                height: 812,
                palette_ids: vec!["silver".into()],
                device_class: Some("frame-iphone-x".into()),
                size_class: Some("size-5-8".into()),
                kind: ModelKind::Official,
            },
            palette: Palette {
                id: "silver".into(),
                name: "Silver".into(),
                display_class: "silver".into(),
            },
            portrait: false,
            dark_mode: false,
        }
    }

    #[test]
    fn landscape_light_omits_optional_markers() {
        assert_eq!(
            derive_classes(&snapshot()),
            ["device-frame", "silver", "frame-iphone-x", "size-5-8", "scaled"]
        );
    }

    #[test]
    fn portrait_and_dark_markers_keep_their_slots() {
        let mut snapshot = snapshot();
        snapshot.portrait = true;
        snapshot.dark_mode = true;
        assert_eq!(
            derive_classes(&snapshot),
            [
                "device-frame",
                "silver",
                "frame-iphone-x",
                "size-5-8",
                "portrait",
                "scaled",
                "dark"
            ]
        );
    }

    #[test]
    fn missing_model_metadata_is_skipped() {
        let mut snapshot = snapshot();
        snapshot.model.device_class = None;
        snapshot.model.size_class = None;
        assert_eq!(
            derive_classes(&snapshot),
            ["device-frame", "silver", "scaled"]
        );
    }
}
