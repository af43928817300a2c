pub mod classes;
pub mod picker;
pub mod selection;

pub use classes::derive_classes;
pub use picker::{FramePicker, PickerConfig};
pub use selection::{Selection, SelectionSnapshot, SelectionUpdate, UpdateOrigin};
