//! Die zentrale Layer-Registry: geordnete Datasets mit abgeflachter
//! Ebenen-Traversierung.
//!
//! Die Registry besitzt alle registrierten Datasets. Die Einfüge-Reihenfolge
//! bleibt erhalten und ist die Basis der "abgeflachten Ebenen-Reihenfolge"
//! (Datasets in Registrierungs-Reihenfolge, darin Ebenen in
//! Speicher-Reihenfolge), auf der Navigation und Export-Ebenen-Liste aufbauen.

use super::{Dataset, Layer};
use indexmap::IndexMap;

/// Transiente Sicht auf eine Ebene samt besitzendem Dataset.
///
/// Wird von jeder Abfrage neu konstruiert und nie gespeichert — nach einer
/// Mutation muss der Aufrufer neu abfragen.
#[derive(Debug, Clone, Copy)]
pub struct LayerHandle<'a> {
    /// Die Ebene selbst
    pub layer: &'a Layer,
    /// Das besitzende Dataset
    pub dataset: &'a Dataset,
}

/// Geordnete Sammlung aller geladenen Datasets, indexiert nach ihrer ID.
///
/// Vergibt beim Registrieren eindeutige IDs für Datasets und Ebenen
/// (auto-increment). Das Entfernen des gerade bearbeiteten Datasets wird
/// nicht hier, sondern in der [`EditorModel`](crate::model::EditorModel)-Facade
/// abgewehrt — nur sie kennt den Selektor.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    datasets: IndexMap<u64, Dataset>,
    next_id: u64,
}

impl LayerRegistry {
    /// Erstellt eine leere Registry.
    pub fn new() -> Self {
        Self {
            datasets: IndexMap::new(),
            next_id: 1,
        }
    }

    /// Erstellt eine neue ID (auto-increment, gemeinsam für Datasets und Ebenen).
    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Registriert ein Dataset und gibt die vergebene ID zurück.
    ///
    /// Der explizite Registrierungs-Schritt: vergibt frische IDs für das
    /// Dataset und alle noch unregistrierten Ebenen (`id == 0`) und hängt das
    /// Dataset ans Ende der Reihenfolge. Doppel-Registrierung desselben
    /// Datasets ist durch Move-Semantik ausgeschlossen — ein registriertes
    /// Dataset gehört der Registry.
    pub fn register(&mut self, mut dataset: Dataset) -> u64 {
        if dataset.id == 0 {
            dataset.id = self.next_id();
        }
        for layer in &mut dataset.layers {
            if layer.id == 0 {
                layer.id = self.next_id();
            }
        }
        let id = dataset.id;
        log::info!(
            "Dataset {} mit {} Ebenen registriert",
            id,
            dataset.layers.len()
        );
        self.datasets.insert(id, dataset);
        id
    }

    /// Entfernt ein Dataset samt aller Ebenen. No-op wenn die ID unbekannt ist.
    pub fn remove_dataset(&mut self, dataset_id: u64) -> bool {
        let removed = self.datasets.shift_remove(&dataset_id).is_some();
        if removed {
            log::info!("Dataset {} entfernt", dataset_id);
        }
        removed
    }

    /// Entfernt eine Ebene aus der Sequenz ihres Datasets.
    ///
    /// Wird das Dataset dadurch leer, wird es kaskadierend mit entfernt.
    /// No-op (Rückgabe `false`) wenn Dataset oder Ebene unbekannt sind.
    /// Ein Editing-Ziel, das auf die gelöschte Ebene zeigt, wird hier
    /// bewusst nicht angefasst — der Aufrufer selektiert einen Ersatz.
    pub fn delete_layer(&mut self, layer_id: u64, dataset_id: u64) -> bool {
        let Some(dataset) = self.datasets.get_mut(&dataset_id) else {
            return false;
        };
        let Some(pos) = dataset.layers.iter().position(|l| l.id == layer_id) else {
            return false;
        };
        dataset.layers.remove(pos);
        log::info!("Ebene {} aus Dataset {} gelöscht", layer_id, dataset_id);
        if dataset.layers.is_empty() {
            self.remove_dataset(dataset_id);
        }
        true
    }

    /// Gibt das Dataset mit der angegebenen ID zurück (falls vorhanden).
    pub fn get_dataset(&self, dataset_id: u64) -> Option<&Dataset> {
        self.datasets.get(&dataset_id)
    }

    /// Liefert eine read-only Sicht auf alle Datasets in Registrierungs-Reihenfolge.
    pub fn datasets(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.values()
    }

    /// Gibt die Anzahl der registrierten Datasets zurück.
    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    /// Gibt die Gesamtzahl der Ebenen über alle Datasets zurück.
    pub fn layer_count(&self) -> usize {
        self.datasets.values().map(Dataset::layer_count).sum()
    }

    /// Gibt `true` zurück, wenn keine Datasets registriert sind.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Besucht jede Ebene in abgeflachter Reihenfolge genau einmal.
    ///
    /// Der Besucher erhält Ebene, besitzendes Dataset und den laufenden
    /// abgeflachten Index. Jeder Aufruf traversiert den Zustand zum
    /// Aufrufzeitpunkt neu (Snapshot, kein Live-Abo).
    pub fn for_each_layer<F>(&self, mut visitor: F)
    where
        F: FnMut(&Layer, &Dataset, usize),
    {
        let mut index = 0;
        for dataset in self.datasets.values() {
            for layer in &dataset.layers {
                visitor(layer, dataset, index);
                index += 1;
            }
        }
    }

    /// Materialisiert die abgeflachte Traversierung in eine Handle-Liste.
    pub fn layers(&self) -> Vec<LayerHandle<'_>> {
        let mut handles = Vec::with_capacity(self.layer_count());
        for dataset in self.datasets.values() {
            for layer in &dataset.layers {
                handles.push(LayerHandle { layer, dataset });
            }
        }
        handles
    }

    /// Sucht eine Ebene irgendwo in der Registry.
    ///
    /// Kein Treffer ist ein normales Ergebnis, kein Fehler.
    pub fn find_layer(&self, layer_id: u64) -> Option<LayerHandle<'_>> {
        for dataset in self.datasets.values() {
            if let Some(layer) = dataset.find_layer(layer_id) {
                return Some(LayerHandle { layer, dataset });
            }
        }
        None
    }

    /// Sucht eine Ersatz-Ebene ungleich der angegebenen (für die Reselektion
    /// nach einer Löschung).
    ///
    /// Nimmt unter den ersten beiden Handles der abgeflachten Reihenfolge das
    /// erste, dessen Ebene nicht `exclude_id` ist. `None` wenn insgesamt
    /// weniger als zwei Ebenen existieren.
    pub fn find_another_layer(&self, exclude_id: u64) -> Option<LayerHandle<'_>> {
        let layers = self.layers();
        if layers.len() < 2 {
            return None;
        }
        if layers[0].layer.id == exclude_id {
            Some(layers[1])
        } else {
            Some(layers[0])
        }
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GeometryKind;

    fn layer(name: &str) -> Layer {
        Layer::new(name, GeometryKind::Polygon, 10)
    }

    fn registry_with_two_datasets() -> LayerRegistry {
        let mut registry = LayerRegistry::new();
        registry.register(Dataset::with_layers(
            Some("a.shp"),
            vec![layer("a1"), layer("a2")],
        ));
        registry.register(Dataset::with_layers(Some("b.json"), vec![layer("b1")]));
        registry
    }

    #[test]
    fn register_vergibt_eindeutige_ids_fuer_dataset_und_ebenen() {
        let registry = registry_with_two_datasets();

        let mut seen = std::collections::HashSet::new();
        for dataset in registry.datasets() {
            assert!(seen.insert(dataset.id), "Dataset-ID doppelt vergeben");
            for l in &dataset.layers {
                assert_ne!(l.id, 0, "Ebene blieb unregistriert");
                assert!(seen.insert(l.id), "Ebenen-ID doppelt vergeben");
            }
        }
    }

    #[test]
    fn abgeflachte_reihenfolge_folgt_registrierung_und_speicherung() {
        let registry = registry_with_two_datasets();

        let names: Vec<&str> = registry.layers().iter().map(|h| h.layer.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2", "b1"]);

        let mut indices = Vec::new();
        registry.for_each_layer(|_, _, i| indices.push(i));
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn loeschen_der_letzten_ebene_entfernt_das_dataset() {
        let mut registry = registry_with_two_datasets();
        let b1 = registry.layers()[2].layer.id;
        let dataset_b = registry.layers()[2].dataset.id;

        assert!(registry.delete_layer(b1, dataset_b));

        assert_eq!(registry.dataset_count(), 1);
        assert!(registry.get_dataset(dataset_b).is_none());
        assert!(registry.find_layer(b1).is_none());
    }

    #[test]
    fn delete_layer_mit_unbekannter_ebene_ist_noop() {
        let mut registry = registry_with_two_datasets();
        let dataset_a = registry.layers()[0].dataset.id;

        assert!(!registry.delete_layer(9999, dataset_a));
        assert!(!registry.delete_layer(9999, 8888));
        assert_eq!(registry.layer_count(), 3);
    }

    #[test]
    fn find_another_layer_braucht_mindestens_zwei_ebenen() {
        let mut registry = LayerRegistry::new();
        registry.register(Dataset::with_layers(None, vec![layer("solo")]));
        let solo = registry.layers()[0].layer.id;

        assert!(registry.find_another_layer(solo).is_none());

        registry.register(Dataset::with_layers(None, vec![layer("other")]));
        let other = registry
            .find_another_layer(solo)
            .expect("Ersatz-Ebene sollte gefunden werden");
        assert_ne!(other.layer.id, solo);
    }

    #[test]
    fn find_another_layer_nimmt_das_erste_handle_ungleich_der_ausgeschlossenen() {
        let registry = registry_with_two_datasets();
        let layers = registry.layers();
        let a1 = layers[0].layer.id;
        let b1 = layers[2].layer.id;

        // a1 ausgeschlossen -> a2 (zweites Handle)
        assert_eq!(registry.find_another_layer(a1).unwrap().layer.name, "a2");
        // b1 ausgeschlossen -> a1 (erstes Handle)
        assert_eq!(registry.find_another_layer(b1).unwrap().layer.name, "a1");
    }
}
