//! Vektor-Editor Model-Core.
//! Layer-Registry und Editing-Selektion als Library exportiert für UI-Frontends und Tests.

pub mod core;
pub mod model;

pub use core::{Dataset, GeometryKind, Layer, LayerHandle, LayerRegistry};
pub use model::{
    Channel, EditingSelector, EditingTarget, EditorModel, EventBus, EventLog, ModelEvent,
    UpdateFlags,
};
