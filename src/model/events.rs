//! Typisierte Model-Benachrichtigungen für entkoppelte UI-Panels.
//!
//! Statt eines untypisierten Payloads gibt es eine tagged union aus zwei
//! expliziten Event-Arten: Konsumenten matchen auf die Variante, statt
//! Felder abzutasten. Events tragen IDs, keine geborgten Handles —
//! Listener fragen den aktuellen Zustand über die Lese-Oberfläche des
//! Models neu ab.

use super::Channel;

/// Flags, die eine `update`-Benachrichtigung begleiten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateFlags {
    /// Die Selektion hat sich geändert (wird beim Wechsel des Editing-Ziels
    /// erzwungen, unabhängig von der Absicht des Aufrufers)
    pub select: bool,
    /// Die Mutation stammt aus einem Dataset-Import
    pub import: bool,
}

/// Eine Model-Benachrichtigung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEvent {
    /// Das Editing-Ziel hat sich geändert.
    SelectionChanged {
        /// Ebene des neuen Editing-Ziels
        layer_id: u64,
        /// Besitzendes Dataset des neuen Editing-Ziels
        dataset_id: u64,
    },
    /// Der Modellzustand wurde aktualisiert.
    ///
    /// Folgt auf jede mutierende Operation, sofern ein Editing-Ziel existiert,
    /// stets nach einem eventuellen `SelectionChanged`.
    StateUpdated {
        /// Ebene des aktuellen Editing-Ziels
        layer_id: u64,
        /// Besitzendes Dataset des aktuellen Editing-Ziels
        dataset_id: u64,
        /// Auslösende Flags
        flags: UpdateFlags,
    },
}

impl ModelEvent {
    /// Gibt den Bus-Kanal zurück, auf dem das Event ausgeliefert wird.
    pub fn channel(&self) -> Channel {
        match self {
            ModelEvent::SelectionChanged { .. } => Channel::Select,
            ModelEvent::StateUpdated { .. } => Channel::Update,
        }
    }
}
