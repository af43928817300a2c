use thiserror::Error;

/// Error type that captures picker construction and update failures.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Catalog shape problems detected before any filtering.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    /// Every supplied model was dropped for lacking a usable palette.
    #[error("no selectable device models in catalog")]
    NoEligibleModels,
    /// A loosely typed update payload was not a JSON object.
    #[error("update payload must be a JSON object, found {0}")]
    InvalidUpdate(&'static str),
    /// Operation attempted after the picker was torn down.
    #[error("picker has been torn down")]
    TornDown,
}
