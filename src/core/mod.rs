//! Core-Domänentypen: Layer, Dataset und die Layer-Registry.

pub mod dataset;
pub mod layer;
pub mod registry;

pub use dataset::Dataset;
pub use layer::{GeometryKind, Layer};
pub use registry::{LayerHandle, LayerRegistry};
