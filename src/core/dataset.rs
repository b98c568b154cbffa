//! Der Dataset-Datentyp: eine geordnete Sammlung von Ebenen als Import-Einheit.

use super::Layer;

/// Ein benanntes, geordnetes Bündel von Ebenen, das als eine Import-Einheit
/// behandelt wird.
///
/// Ebenen tragen keine Rückreferenz auf ihr Dataset — die Paarung kennt nur
/// die Registry. Identität ist die `id` (vergeben beim Registrieren,
/// 0 = noch nicht registriert).
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Eindeutige Registry-ID (0 = unregistriert)
    pub id: u64,
    /// Name der Import-Einheit, meist der Dateiname (optional)
    pub name: Option<String>,
    /// Quellformat des Imports, z.B. "geojson" (optional, für das Export-Panel)
    pub source_format: Option<String>,
    /// Geordnete Ebenen-Sequenz; Reihenfolge = Speicher-Reihenfolge
    pub layers: Vec<Layer>,
}

impl Dataset {
    /// Erstellt ein neues, leeres, unregistriertes Dataset.
    pub fn new(name: Option<&str>) -> Self {
        Self {
            id: 0,
            name: name.map(str::to_string),
            source_format: None,
            layers: Vec::new(),
        }
    }

    /// Erstellt ein unregistriertes Dataset mit den angegebenen Ebenen.
    pub fn with_layers(name: Option<&str>, layers: Vec<Layer>) -> Self {
        Self {
            id: 0,
            name: name.map(str::to_string),
            source_format: None,
            layers,
        }
    }

    /// Fügt eine Ebene am Ende der Sequenz hinzu.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Gibt die Anzahl der Ebenen zurück.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Prüft ob eine Ebene mit der angegebenen ID zur Sequenz gehört.
    pub fn contains_layer(&self, layer_id: u64) -> bool {
        self.layers.iter().any(|l| l.id == layer_id)
    }

    /// Gibt die Ebene mit der angegebenen ID zurück (falls vorhanden).
    pub fn find_layer(&self, layer_id: u64) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == layer_id)
    }
}
