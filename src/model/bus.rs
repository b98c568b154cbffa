//! Generischer Publish/Subscribe-Bus mit benannten Kanälen.
//!
//! Listener werden pro Kanal in Registrierungs-Reihenfolge synchron
//! aufgerufen — keine Priorität, kein Abbruch. Dispatch läuft vollständig
//! innerhalb des auslösenden Mutators durch; Listener erhalten nur das
//! Event und stellen Folge-Mutationen zurück (z.B. als Intent-Queue im
//! Frontend), statt re-entrant ins Model zu greifen.

use super::ModelEvent;

/// Benannter Kanal des Event-Busses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Selektions-Änderungen (`ModelEvent::SelectionChanged`)
    Select,
    /// Zustands-Updates (`ModelEvent::StateUpdated`)
    Update,
}

type Listener = Box<dyn FnMut(&ModelEvent)>;

/// Geordneter Event-Bus für Model-Benachrichtigungen.
#[derive(Default)]
pub struct EventBus {
    select: Vec<Listener>,
    update: Vec<Listener>,
}

impl EventBus {
    /// Erstellt einen Bus ohne Listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Listener auf dem angegebenen Kanal.
    /// Aufruf-Reihenfolge = Registrierungs-Reihenfolge.
    pub fn subscribe<F>(&mut self, channel: Channel, listener: F)
    where
        F: FnMut(&ModelEvent) + 'static,
    {
        self.channel_mut(channel).push(Box::new(listener));
    }

    /// Liefert das Event synchron an alle Listener seines Kanals aus.
    pub fn emit(&mut self, event: &ModelEvent) {
        for listener in self.channel_mut(event.channel()) {
            listener(event);
        }
    }

    /// Gibt die Anzahl der Listener auf einem Kanal zurück.
    pub fn listener_count(&self, channel: Channel) -> usize {
        match channel {
            Channel::Select => self.select.len(),
            Channel::Update => self.update.len(),
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut Vec<Listener> {
        match channel {
            Channel::Select => &mut self.select,
            Channel::Update => &mut self.update,
        }
    }
}
