//! Device and palette catalog: raw input shape plus the validated form the
//! picker engine operates on.

mod model;
mod palette;

pub use model::{DeviceModel, ModelKind};
pub use palette::Palette;

use serde::{Deserialize, Serialize};

use crate::errors::PickerError;

/// Raw catalog as supplied by the embedder or loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub models: Vec<DeviceModel>,
    pub palettes: Vec<Palette>,
}

impl Catalog {
    /// Parses a catalog from a JSON document.
    pub fn from_json(data: &str) -> Result<Self, PickerError> {
        serde_json::from_str(data).map_err(|err| PickerError::InvalidCatalog(err.to_string()))
    }

    /// The default device set embedded in the crate.
    pub fn builtin() -> Result<Self, PickerError> {
        Self::from_json(include_str!("data/devices.json"))
    }

    /// Filters the catalog down to selectable content.
    ///
    /// Models keep their palette references in order, but a model survives
    /// only when at least one referenced palette exists and is usable.
    /// Dangling or unusable references are skipped, never errors.
    pub fn validate(self) -> Result<ValidCatalog, PickerError> {
        if self.models.is_empty() {
            return Err(PickerError::InvalidCatalog(
                "no device models supplied".into(),
            ));
        }
        if self.palettes.is_empty() {
            return Err(PickerError::InvalidCatalog("no palettes supplied".into()));
        }

        let palettes = self.palettes;
        let models: Vec<DeviceModel> = self
            .models
            .into_iter()
            .filter(|model| {
                model
                    .palette_ids
                    .iter()
                    .any(|id| palettes.iter().any(|p| &p.id == id && p.is_usable()))
            })
            .collect();

        if models.is_empty() {
            return Err(PickerError::NoEligibleModels);
        }

        Ok(ValidCatalog { models, palettes })
    }
}

/// Catalog that passed validation: every retained model has at least one
/// usable palette. Immutable for the lifetime of a picker instance.
#[derive(Debug, Clone)]
pub struct ValidCatalog {
    models: Vec<DeviceModel>,
    palettes: Vec<Palette>,
}

impl ValidCatalog {
    /// Eligible models, in the order the catalog supplied them.
    pub fn models(&self) -> &[DeviceModel] {
        &self.models
    }

    /// All palettes, usable or not, for lookup by id.
    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn model(&self, name: &str) -> Option<&DeviceModel> {
        self.models.iter().find(|model| model.name == name)
    }

    pub fn palette(&self, id: &str) -> Option<&Palette> {
        self.palettes.iter().find(|palette| palette.id == id)
    }

    /// Usable palettes referenced by `model`, in the model's own order.
    pub fn usable_palettes(&self, model: &DeviceModel) -> Vec<&Palette> {
        model
            .palette_ids
            .iter()
            .filter_map(|id| self.palette(id))
            .filter(|palette| palette.is_usable())
            .collect()
    }

    /// First usable palette referenced by `model`. Always present for models
    /// retained by validation.
    pub fn first_usable_palette(&self, model: &DeviceModel) -> Option<&Palette> {
        model
            .palette_ids
            .iter()
            .filter_map(|id| self.palette(id))
            .find(|palette| palette.is_usable())
    }

    /// Models partitioned into the official and community groups, each sorted
    /// case-insensitively by display label.
    pub fn grouped_models(&self) -> (Vec<&DeviceModel>, Vec<&DeviceModel>) {
        let mut official: Vec<&DeviceModel> = self
            .models
            .iter()
            .filter(|model| model.kind == ModelKind::Official)
            .collect();
        let mut community: Vec<&DeviceModel> = self
            .models
            .iter()
            .filter(|model| model.kind == ModelKind::Community)
            .collect();
        official.sort_by_key(|model| model.display_label().to_lowercase());
        community.sort_by_key(|model| model.display_label().to_lowercase());
        (official, community)
    }

    /// The official group followed by the community group.
    pub fn ordered_models(&self) -> Vec<&DeviceModel> {
        let (official, community) = self.grouped_models();
        official.into_iter().chain(community).collect()
    }

    /// Default model: the preferred name when it names an eligible model,
    /// otherwise the first model in combined group order.
    pub fn default_model(&self, preferred: Option<&str>) -> Option<&DeviceModel> {
        let ordered = self.ordered_models();
        if let Some(name) = preferred {
            if let Some(model) = ordered.iter().find(|model| model.name == name) {
                return Some(*model);
            }
        }
        ordered.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog {
            models: vec![
                DeviceModel {
                    name: "alpha".into(),
                    label: Some("Alpha".into()),
                    size: None,
                    width: 400,
                    height: 800,
                    palette_ids: vec!["blank".into(), "slate".into()],
                    device_class: Some("frame-alpha".into()),
                    size_class: None,
                    kind: ModelKind::Official,
                },
                DeviceModel {
                    name: "omega".into(),
                    label: Some("omega".into()),
                    size: None,
                    width: 400,
                    height: 800,
                    palette_ids: vec!["missing".into()],
                    device_class: None,
                    size_class: None,
                    kind: ModelKind::Official,
                },
                DeviceModel {
                    name: "zeta".into(),
                    label: None,
                    size: None,
                    width: 400,
                    height: 800,
                    palette_ids: vec!["slate".into()],
                    device_class: None,
                    size_class: None,
                    kind: ModelKind::Community,
                },
            ],
            palettes: vec![
                Palette {
                    id: "blank".into(),
                    name: "Blank".into(),
                    display_class: "   ".into(),
                },
                Palette {
                    id: "slate".into(),
                    name: "Slate".into(),
                    display_class: "slate".into(),
                },
            ],
        }
    }

    #[test]
    fn validate_drops_models_without_usable_palettes() {
        let valid = catalog().validate().expect("catalog validates");
        let names: Vec<&str> = valid.models().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["alpha", "zeta"], "omega references nothing usable");
        assert_eq!(valid.palettes().len(), 2, "palettes stay for lookup");
    }

    #[test]
    fn validate_rejects_empty_collections() {
        let empty_models = Catalog {
            models: Vec::new(),
            palettes: catalog().palettes,
        };
        assert!(matches!(
            empty_models.validate(),
            Err(PickerError::InvalidCatalog(_))
        ));

        let empty_palettes = Catalog {
            models: catalog().models,
            palettes: Vec::new(),
        };
        assert!(matches!(
            empty_palettes.validate(),
            Err(PickerError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn validate_rejects_catalog_with_no_eligible_model() {
        let mut raw = catalog();
        raw.models.retain(|model| model.name == "omega");
        assert!(matches!(raw.validate(), Err(PickerError::NoEligibleModels)));
    }

    #[test]
    fn first_usable_palette_skips_blank_display_classes() {
        let valid = catalog().validate().unwrap();
        let alpha = valid.model("alpha").unwrap();
        let palette = valid.first_usable_palette(alpha).expect("usable palette");
        assert_eq!(palette.id, "slate");
        assert_eq!(
            valid
                .usable_palettes(alpha)
                .iter()
                .map(|p| p.id.as_str())
                .collect::<Vec<_>>(),
            ["slate"]
        );
    }

    #[test]
    fn default_model_prefers_configured_name() {
        let valid = catalog().validate().unwrap();
        assert_eq!(valid.default_model(None).unwrap().name, "alpha");
        assert_eq!(valid.default_model(Some("zeta")).unwrap().name, "zeta");
        assert_eq!(
            valid.default_model(Some("missing")).unwrap().name,
            "alpha",
            "unknown preferred name falls back to combined order"
        );
    }

    #[test]
    fn ordered_models_put_official_group_first() {
        let valid = catalog().validate().unwrap();
        let ordered: Vec<&str> = valid
            .ordered_models()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(ordered, ["alpha", "zeta"]);
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let valid = Catalog::builtin()
            .expect("embedded catalog parses")
            .validate()
            .expect("embedded catalog validates");
        assert!(valid.model("iphone-x").is_some());
        assert!(valid.models().len() >= 4);
    }
}
