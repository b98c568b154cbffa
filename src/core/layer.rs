//! Der Layer-Datentyp: eine einzelne benannte Geometrie-/Tabellen-Ebene.

/// Art der Geometrie einer Ebene.
///
/// Wird vom Model nicht interpretiert, nur durchgereicht (UI-Anzeige,
/// Export-Panel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryKind {
    /// Unbekannt bzw. noch nicht bestimmt
    #[default]
    Unknown,
    /// Punkt-Geometrie
    Point,
    /// Linien-Geometrie
    Polyline,
    /// Flächen-Geometrie
    Polygon,
    /// Reine Attribut-Tabelle ohne Geometrie
    Table,
}

/// Eine einzelne benannte Daten-Ebene innerhalb eines Datasets.
///
/// Identität ist ausschließlich die `id` (vergeben von der Registry beim
/// Registrieren, 0 = noch nicht registriert). Zwei Ebenen mit identischem
/// Inhalt (z.B. duplizierte Geometrie) bleiben dadurch unabhängig
/// selektier- und löschbar.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Eindeutige Registry-ID (0 = unregistriert)
    pub id: u64,
    /// Anzeigename (darf leer sein)
    pub name: String,
    /// Geometrie-Art (opaque Payload für die UI)
    pub geometry: GeometryKind,
    /// Anzahl der Features (opaque Payload für die UI)
    pub feature_count: usize,
}

impl Layer {
    /// Erstellt eine neue, noch unregistrierte Ebene.
    pub fn new(name: &str, geometry: GeometryKind, feature_count: usize) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            geometry,
            feature_count,
        }
    }

    /// Anzeigename mit Fallback für unbenannte Ebenen.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "[unnamed layer]"
        } else {
            &self.name
        }
    }
}
