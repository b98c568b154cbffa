//! Minimales Event-Log für Diagnose und Tests.

use super::ModelEvent;

/// Speichert emittierte Model-Events in Reihenfolge.
///
/// Transient und nur für die laufende Session — wird nicht persistiert.
#[derive(Default)]
pub struct EventLog {
    entries: Vec<ModelEvent>,
}

impl EventLog {
    const MAX_ENTRIES: usize = 1000;
}

impl EventLog {
    /// Erstellt ein leeres Event-Log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fügt ein emittiertes Event hinzu.
    /// Begrenzt auf MAX_ENTRIES, ältere Einträge werden verworfen.
    pub fn record(&mut self, event: ModelEvent) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(event);
    }

    /// Gibt die Anzahl der geloggten Events zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Events vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Liefert eine read-only Sicht auf alle Einträge.
    pub fn entries(&self) -> &[ModelEvent] {
        &self.entries
    }

    /// Gibt das zuletzt geloggte Event zurück.
    pub fn last(&self) -> Option<&ModelEvent> {
        self.entries.last()
    }
}
