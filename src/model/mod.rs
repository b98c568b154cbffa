//! Model-Schicht: Facade, Editing-Selektor, Event-Bus und typisierte Events.

pub mod bus;
pub mod event_log;
pub mod events;
pub mod model;
pub mod selector;

pub use bus::{Channel, EventBus};
pub use event_log::EventLog;
pub use events::{ModelEvent, UpdateFlags};
pub use model::EditorModel;
pub use selector::{EditingSelector, EditingTarget};
