//! Die Model-Facade: einziger Mutations- und Benachrichtigungs-Engpass.
//!
//! `EditorModel` besitzt Registry, Selektor, Event-Bus und Event-Log und ist
//! die eine Quelle der Wahrheit für alle entkoppelten UI-Panels
//! (Export-Panel, Ebenen-Panel, Konsole). Es wird einmal beim Session-Start
//! konstruiert und per Referenz an jeden Konsumenten gereicht — kein
//! globaler Zustand.
//!
//! Jede Mutation läuft synchron bis zum Ende durch, inklusive aller
//! Listener-Aufrufe; kein Listener sieht je einen halb angewandten Zustand.

use super::{Channel, EditingSelector, EditingTarget, EventBus, EventLog, ModelEvent, UpdateFlags};
use crate::core::{Dataset, LayerHandle, LayerRegistry};

/// Registry- und Selektions-Zustand des Editors samt Benachrichtigung.
#[derive(Default)]
pub struct EditorModel {
    registry: LayerRegistry,
    selector: EditingSelector,
    bus: EventBus,
    event_log: EventLog,
}

impl EditorModel {
    /// Erstellt ein leeres Model ohne Datasets und ohne Editing-Ziel.
    pub fn new() -> Self {
        Self {
            registry: LayerRegistry::new(),
            selector: EditingSelector::new(),
            bus: EventBus::new(),
            event_log: EventLog::new(),
        }
    }

    // === Abonnements ===

    /// Registriert einen Listener für Selektions-Änderungen.
    pub fn on_select<F>(&mut self, listener: F)
    where
        F: FnMut(&ModelEvent) + 'static,
    {
        self.bus.subscribe(Channel::Select, listener);
    }

    /// Registriert einen Listener für Zustands-Updates.
    pub fn on_update<F>(&mut self, listener: F)
    where
        F: FnMut(&ModelEvent) + 'static,
    {
        self.bus.subscribe(Channel::Update, listener);
    }

    // === Mutationen ===

    /// Importiert ein Dataset: registriert es und selektiert seine erste Ebene.
    ///
    /// Gibt die vergebene Dataset-ID zurück. Ein Dataset ohne Ebenen ist eine
    /// Kontraktverletzung der Import-Pipeline, nicht dieses Models.
    pub fn add_dataset(&mut self, dataset: Dataset) -> anyhow::Result<u64> {
        anyhow::ensure!(
            !dataset.layers.is_empty(),
            "Import-Kontrakt verletzt: Dataset '{}' hat keine Ebenen",
            dataset.name.as_deref().unwrap_or("?")
        );
        let dataset_id = self.registry.register(dataset);
        let Some(first_layer_id) = self
            .registry
            .get_dataset(dataset_id)
            .and_then(|d| d.layers.first())
            .map(|l| l.id)
        else {
            anyhow::bail!("Dataset {} nach Registrierung nicht auffindbar", dataset_id);
        };
        self.updated(
            UpdateFlags {
                select: true,
                import: true,
            },
            Some((first_layer_id, dataset_id)),
        )?;
        Ok(dataset_id)
    }

    /// Selektiert eine bereits registrierte Ebene als Editing-Ziel.
    pub fn select_layer(&mut self, layer_id: u64, dataset_id: u64) -> anyhow::Result<()> {
        self.updated(
            UpdateFlags {
                select: true,
                import: false,
            },
            Some((layer_id, dataset_id)),
        )
    }

    /// Selektiert eine Ebene eines noch unregistrierten Datasets.
    ///
    /// Registriert das Dataset als expliziten ersten Schritt und selektiert
    /// dann die Ebene am angegebenen Index. Die Index-Prüfung läuft vor der
    /// Registrierung — auf dem Fehlerpfad bleibt die Registry unverändert.
    pub fn select_layer_of(
        &mut self,
        dataset: Dataset,
        layer_index: usize,
    ) -> anyhow::Result<EditingTarget> {
        anyhow::ensure!(
            layer_index < dataset.layers.len(),
            "Selektierte Ebene (Index {}) nicht in Dataset '{}' gefunden",
            layer_index,
            dataset.name.as_deref().unwrap_or("?")
        );
        let dataset_id = self.registry.register(dataset);
        let Some(layer_id) = self
            .registry
            .get_dataset(dataset_id)
            .and_then(|d| d.layers.get(layer_index))
            .map(|l| l.id)
        else {
            anyhow::bail!("Dataset {} nach Registrierung nicht auffindbar", dataset_id);
        };
        self.select_layer(layer_id, dataset_id)?;
        Ok(EditingTarget {
            layer_id,
            dataset_id,
        })
    }

    /// Selektiert den zyklischen Nachfolger in abgeflachter Reihenfolge.
    ///
    /// Stilles No-op ohne Editing-Ziel, bei veraltetem Ziel oder mit weniger
    /// als zwei Ebenen insgesamt.
    pub fn select_next_layer(&mut self) -> anyhow::Result<()> {
        if let Some(next) = self.selector.next_in(&self.registry) {
            self.select_layer(next.layer_id, next.dataset_id)?;
        }
        Ok(())
    }

    /// Selektiert den zyklischen Vorgänger in abgeflachter Reihenfolge.
    pub fn select_prev_layer(&mut self) -> anyhow::Result<()> {
        if let Some(prev) = self.selector.prev_in(&self.registry) {
            self.select_layer(prev.layer_id, prev.dataset_id)?;
        }
        Ok(())
    }

    /// Löscht eine Ebene aus ihrem Dataset.
    ///
    /// Wird das Dataset dadurch leer, wird es kaskadierend entfernt — es sei
    /// denn, es ist das Dataset des Editing-Ziels: dann schlägt der Aufruf
    /// fehl, bevor irgendetwas mutiert wurde. Ein Editing-Ziel, das auf die
    /// gelöschte Ebene zeigt, wird nicht angepasst; der Aufrufer selektiert
    /// unmittelbar einen Ersatz (`find_another_layer` + `select_layer`).
    /// Unbekannte IDs sind ein stilles No-op.
    pub fn delete_layer(&mut self, layer_id: u64, dataset_id: u64) -> anyhow::Result<()> {
        if let Some(dataset) = self.registry.get_dataset(dataset_id) {
            let would_empty = dataset.layer_count() == 1 && dataset.contains_layer(layer_id);
            if would_empty && self.is_editing_dataset(dataset_id) {
                anyhow::bail!(
                    "Dataset {} kann nicht entfernt werden, solange es bearbeitet wird",
                    dataset_id
                );
            }
        }
        self.registry.delete_layer(layer_id, dataset_id);
        Ok(())
    }

    /// Entfernt ein Dataset samt aller Ebenen.
    ///
    /// Fataler Fehler, wenn es das Dataset des Editing-Ziels ist; die
    /// Registry bleibt dann unverändert. Unbekannte IDs sind ein stilles No-op.
    pub fn remove_dataset(&mut self, dataset_id: u64) -> anyhow::Result<()> {
        if self.is_editing_dataset(dataset_id) {
            anyhow::bail!(
                "Dataset {} kann nicht entfernt werden, solange es bearbeitet wird",
                dataset_id
            );
        }
        self.registry.remove_dataset(dataset_id);
        Ok(())
    }

    /// Der einzige Mutations-/Benachrichtigungs-Engpass.
    ///
    /// Ist ein Ziel angegeben und unterscheidet sich dessen Ebene vom
    /// aktuellen Editing-Ziel, wird das Ziel gesetzt und `flags.select`
    /// erzwungen — ein Ebenen-Wechsel zählt immer als Selektions-Event,
    /// auch wenn der Aufrufer nur ein generisches Update wollte.
    ///
    /// Existiert danach ein Editing-Ziel, wird bei gesetztem `select`-Flag
    /// zuerst `SelectionChanged` und danach stets `StateUpdated` emittiert
    /// (strikte Reihenfolge). Ohne jemals gesetztes Ziel feuert nichts —
    /// ein gültiger Ruhezustand, kein Fehler.
    pub fn updated(
        &mut self,
        mut flags: UpdateFlags,
        target: Option<(u64, u64)>,
    ) -> anyhow::Result<()> {
        if let Some((layer_id, dataset_id)) = target {
            let differs = self.selector.target().map(|t| t.layer_id) != Some(layer_id);
            if differs {
                self.selector
                    .set_editing_layer(&self.registry, layer_id, dataset_id)?;
                flags.select = true;
            }
        }
        if let Some(current) = self.selector.target() {
            if flags.select {
                self.emit(ModelEvent::SelectionChanged {
                    layer_id: current.layer_id,
                    dataset_id: current.dataset_id,
                });
            }
            self.emit(ModelEvent::StateUpdated {
                layer_id: current.layer_id,
                dataset_id: current.dataset_id,
                flags,
            });
        }
        Ok(())
    }

    // === Lese-Oberfläche ===

    /// Liefert alle Datasets in Registrierungs-Reihenfolge.
    pub fn datasets(&self) -> impl Iterator<Item = &Dataset> {
        self.registry.datasets()
    }

    /// Materialisiert die abgeflachte Ebenen-Reihenfolge als Handle-Liste.
    pub fn layers(&self) -> Vec<LayerHandle<'_>> {
        self.registry.layers()
    }

    /// Sucht eine Ebene irgendwo in der Registry.
    pub fn find_layer(&self, layer_id: u64) -> Option<LayerHandle<'_>> {
        self.registry.find_layer(layer_id)
    }

    /// Sucht eine Ersatz-Ebene ungleich der angegebenen (Reselektion nach
    /// einer Löschung). `None` bei weniger als zwei Ebenen.
    pub fn find_another_layer(&self, exclude_id: u64) -> Option<LayerHandle<'_>> {
        self.registry.find_another_layer(exclude_id)
    }

    /// Gibt das rohe Editing-Ziel zurück (kann nach Löschungen veraltet sein).
    pub fn editing_target(&self) -> Option<EditingTarget> {
        self.selector.target()
    }

    /// Löst das Editing-Ziel gegen die Registry auf.
    ///
    /// `None` wenn nie etwas selektiert wurde oder das Ziel veraltet ist —
    /// Aufrufer prüfen auf Abwesenheit, bevor sie dereferenzieren.
    pub fn editing_layer(&self) -> Option<LayerHandle<'_>> {
        let target = self.selector.target()?;
        self.registry
            .find_layer(target.layer_id)
            .filter(|h| h.dataset.id == target.dataset_id)
    }

    /// Löst eine komma-separierte Liste von Ebenen-Kennungen (1-basierte
    /// abgeflachte Indizes, wie sie das Export-Panel als Checkbox-Werte
    /// führt) in Handles auf. Ungültige oder unbekannte Kennungen werden
    /// still übersprungen.
    pub fn find_command_targets(&self, ids: &str) -> Vec<LayerHandle<'_>> {
        let wanted: std::collections::HashSet<usize> = ids
            .split(',')
            .filter_map(|part| part.trim().parse::<usize>().ok())
            .collect();
        self.registry
            .layers()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| wanted.contains(&(i + 1)))
            .map(|(_, handle)| handle)
            .collect()
    }

    /// Liefert das Event-Log der Session (für Diagnose und Tests).
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    fn is_editing_dataset(&self, dataset_id: u64) -> bool {
        self.selector
            .target()
            .is_some_and(|t| t.dataset_id == dataset_id)
    }

    fn emit(&mut self, event: ModelEvent) {
        log::debug!("Model-Event: {:?}", event);
        self.event_log.record(event);
        self.bus.emit(&event);
    }
}
