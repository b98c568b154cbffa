//! Der Editing-Selektor: höchstens ein aktives Editing-Ziel samt
//! zyklischer Vor/Zurück-Navigation über die abgeflachte Ebenen-Reihenfolge.

use crate::core::LayerRegistry;

/// Das aktuelle Editing-Ziel: genau eine Ebene samt besitzendem Dataset.
///
/// Gespeichert als ID-Paar, nicht als geborgtes Handle — nach einer Löschung
/// kann das Ziel veralten (die Ebene existiert nicht mehr). Veraltete Ziele
/// sind beobachtbar (Auflösung liefert `None`, Navigation no-opt) statt
/// dangling; der Aufrufer selektiert nach einer Löschung einen Ersatz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditingTarget {
    /// Ebene, die gerade bearbeitet wird
    pub layer_id: u64,
    /// Besitzendes Dataset der Ebene
    pub dataset_id: u64,
}

/// Verwaltet das Editing-Ziel und die Navigations-Logik.
///
/// Es gibt bewusst keine "Deselektieren"-Operation: das Ziel wechselt nur
/// durch Selektion eines Ersatzes.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditingSelector {
    target: Option<EditingTarget>,
}

impl EditingSelector {
    /// Erstellt einen Selektor ohne Editing-Ziel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gibt das rohe Editing-Ziel zurück (kann nach Löschungen veraltet sein).
    pub fn target(&self) -> Option<EditingTarget> {
        self.target
    }

    /// Setzt das Editing-Ziel.
    ///
    /// Fataler Fehler, wenn die Ebene nicht zur Sequenz des angegebenen
    /// (registrierten) Datasets gehört — Aufrufer dürfen nur Ebenen
    /// selektieren, die sie selbst aus der Registry abgefragt haben. Die
    /// Validierung läuft vollständig vor der Mutation; auf dem Fehlerpfad
    /// bleibt das Ziel unverändert.
    ///
    /// Zeigt das Ziel bereits auf dieselbe Ebene, passiert nichts
    /// (Rückgabe `false`).
    pub fn set_editing_layer(
        &mut self,
        registry: &LayerRegistry,
        layer_id: u64,
        dataset_id: u64,
    ) -> anyhow::Result<bool> {
        if self.target.map(|t| t.layer_id) == Some(layer_id) {
            return Ok(false);
        }
        let Some(dataset) = registry.get_dataset(dataset_id) else {
            anyhow::bail!(
                "Selektierte Ebene {} nicht gefunden: Dataset {} ist nicht registriert",
                layer_id,
                dataset_id
            );
        };
        if !dataset.contains_layer(layer_id) {
            anyhow::bail!(
                "Selektierte Ebene {} nicht in Dataset {} gefunden",
                layer_id,
                dataset_id
            );
        }
        self.target = Some(EditingTarget {
            layer_id,
            dataset_id,
        });
        log::debug!("Editing-Ziel: Ebene {} (Dataset {})", layer_id, dataset_id);
        Ok(true)
    }

    /// Zyklischer Nachfolger des Editing-Ziels in abgeflachter Reihenfolge.
    ///
    /// `None` (stilles No-op) ohne Ziel, bei veraltetem Ziel oder mit
    /// weniger als zwei Ebenen insgesamt.
    pub fn next_in(&self, registry: &LayerRegistry) -> Option<EditingTarget> {
        self.step_in(registry, 1)
    }

    /// Zyklischer Vorgänger des Editing-Ziels in abgeflachter Reihenfolge.
    pub fn prev_in(&self, registry: &LayerRegistry) -> Option<EditingTarget> {
        self.step_in(registry, -1)
    }

    fn step_in(&self, registry: &LayerRegistry, offset: isize) -> Option<EditingTarget> {
        let target = self.target?;
        let layers = registry.layers();
        if layers.len() < 2 {
            return None;
        }
        let idx = layers.iter().position(|h| h.layer.id == target.layer_id)?;
        let len = layers.len() as isize;
        let step = (idx as isize + offset).rem_euclid(len) as usize;
        let handle = &layers[step];
        Some(EditingTarget {
            layer_id: handle.layer.id,
            dataset_id: handle.dataset.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dataset, GeometryKind, Layer};

    fn registry_abc() -> LayerRegistry {
        let mut registry = LayerRegistry::new();
        registry.register(Dataset::with_layers(
            Some("abc"),
            vec![
                Layer::new("a", GeometryKind::Point, 1),
                Layer::new("b", GeometryKind::Point, 1),
                Layer::new("c", GeometryKind::Point, 1),
            ],
        ));
        registry
    }

    #[test]
    fn set_editing_layer_verweigert_fremde_ebene() {
        let mut registry = registry_abc();
        let foreign = registry.register(Dataset::with_layers(
            None,
            vec![Layer::new("x", GeometryKind::Table, 0)],
        ));
        let a = registry.layers()[0].layer.id;

        let mut selector = EditingSelector::new();
        let result = selector.set_editing_layer(&registry, a, foreign);

        assert!(result.is_err(), "Ebene a gehört nicht zu Dataset x");
        assert!(selector.target().is_none(), "Ziel muss unverändert bleiben");
    }

    #[test]
    fn set_editing_layer_mit_gleicher_ebene_ist_noop() {
        let registry = registry_abc();
        let layers = registry.layers();
        let (a, d) = (layers[0].layer.id, layers[0].dataset.id);

        let mut selector = EditingSelector::new();
        assert!(selector.set_editing_layer(&registry, a, d).unwrap());
        assert!(!selector.set_editing_layer(&registry, a, d).unwrap());
    }

    #[test]
    fn navigation_ohne_ziel_oder_mit_veraltetem_ziel_ist_noop() {
        let mut registry = registry_abc();
        let layers = registry.layers();
        let (a, d) = (layers[0].layer.id, layers[0].dataset.id);

        let mut selector = EditingSelector::new();
        assert!(selector.next_in(&registry).is_none(), "Kein Ziel gesetzt");

        selector.set_editing_layer(&registry, a, d).unwrap();
        registry.delete_layer(a, d);
        assert!(
            selector.next_in(&registry).is_none(),
            "Veraltetes Ziel darf nicht navigieren"
        );
    }
}
