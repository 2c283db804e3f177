//! Eier av dokumentet i minnet for én aktiv UI-økt.
//!
//! Lagring er best-effort: feil logges og telles, men minnet forblir sannheten for økten.
use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};

use crate::chart::{render_entries, ChartGeometry, HoverState};
use crate::entries::{remove_at, undo_remove, upsert_sample, Deleted};
use crate::error::StoreResult;
use crate::formulas::weight_to_lb;
use crate::measurements::{current_for_date, edit_field, upsert_measurement};
use crate::metrics::{build_report, DashboardReport};
use crate::models::{Document, MeasureKey, MeasurementSample, Profile, Sample};
use crate::series::PreparedSeries;
use crate::storage::{
    load_length_unit, load_snapshot, load_weight_unit, save_length_unit, save_snapshot,
    save_weight_unit, KeyValueStore,
};
use crate::telemetry::{store_metrics, Outcome, StoreOp};
use crate::types::{ChartLayout, ChartOptions, LengthUnit, WeightUnit};

pub struct Session<S: KeyValueStore> {
    store: S,
    doc: Document,
    from_store: bool,
    weight_unit: WeightUnit,
    length_unit: LengthUnit,
    last_deleted_entry: Option<Deleted<Sample>>,
    last_deleted_measure: Option<Deleted<MeasurementSample>>,
}

/// Logger og teller utfallet; feil svelges.
fn swallow<T>(op: StoreOp, res: StoreResult<Option<T>>) -> Option<T> {
    match res {
        Ok(Some(v)) => {
            store_metrics().record(op, Outcome::Ok);
            Some(v)
        }
        Ok(None) => {
            store_metrics().record(op, Outcome::Missing);
            None
        }
        Err(e) => {
            warn!("⚠️ {:?} feilet, fortsetter uten: {}", op, e);
            store_metrics().record(op, Outcome::Failed);
            None
        }
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Leser snapshot + enhetspreferanser. Manglende/ugyldige data gir default.
    pub fn open(store: S) -> Self {
        let loaded = swallow(StoreOp::Load, load_snapshot(&store));
        let weight_unit = swallow(StoreOp::LoadPref, load_weight_unit(&store)).unwrap_or_default();
        let length_unit = swallow(StoreOp::LoadPref, load_length_unit(&store)).unwrap_or_default();

        let from_store = loaded.is_some();
        let doc = loaded.unwrap_or_default();
        info!(
            "Økt åpnet (snapshot={}, entries={}, unit={})",
            from_store,
            doc.entries.len(),
            weight_unit
        );

        Self {
            store,
            doc,
            from_store,
            weight_unit,
            length_unit,
            last_deleted_entry: None,
            last_deleted_measure: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// `true` når lageret har et snapshot (lest ved åpning eller skrevet vellykket siden).
    pub fn has_snapshot(&self) -> bool {
        self.from_store
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn weight_unit(&self) -> WeightUnit {
        self.weight_unit
    }

    pub fn length_unit(&self) -> LengthUnit {
        self.length_unit
    }

    fn persist(&mut self) {
        match save_snapshot(&self.store, &self.doc) {
            Ok(()) => {
                store_metrics().record(StoreOp::Save, Outcome::Ok);
                self.from_store = true;
            }
            Err(e) => {
                warn!("⚠️ Lagring feilet, beholder dokumentet i minnet: {}", e);
                store_metrics().record(StoreOp::Save, Outcome::Failed);
            }
        }
    }

    fn persist_pref(&self, res: StoreResult<()>) {
        match res {
            Ok(()) => store_metrics().record(StoreOp::SavePref, Outcome::Ok),
            Err(e) => {
                warn!("⚠️ Kunne ikke lagre enhet: {}", e);
                store_metrics().record(StoreOp::SavePref, Outcome::Failed);
            }
        }
    }

    pub fn set_weight_unit(&mut self, unit: WeightUnit) {
        self.weight_unit = unit;
        self.persist_pref(save_weight_unit(&self.store, unit));
    }

    pub fn set_length_unit(&mut self, unit: LengthUnit) {
        self.length_unit = unit;
        self.persist_pref(save_length_unit(&self.store, unit));
    }

    /// Logger vekt (i gjeldende visningsenhet) for `date`. Upsert per dato.
    ///
    /// Ignorerer 0, negative og ikke-endelige verdier; returnerer om noe ble lagret.
    pub fn log_weight(&mut self, date: NaiveDate, value: f64) -> bool {
        if !(value.is_finite() && value > 0.0) {
            return false;
        }
        let lb = weight_to_lb(value, self.weight_unit);
        self.doc.entries = upsert_sample(&self.doc.entries, Sample::new(date, lb));
        self.persist();
        true
    }

    pub fn remove_entry(&mut self, index: usize) -> Option<Deleted<Sample>> {
        let (next, deleted) = remove_at(&self.doc.entries, index)?;
        self.doc.entries = next;
        self.last_deleted_entry = Some(deleted);
        self.persist();
        Some(deleted)
    }

    pub fn undo_remove_entry(&mut self) -> bool {
        let Some(deleted) = self.last_deleted_entry.take() else {
            return false;
        };
        self.doc.entries = undo_remove(&self.doc.entries, &deleted);
        self.persist();
        true
    }

    pub fn save_measurement(&mut self, patch: &MeasurementSample) {
        self.doc.measures = upsert_measurement(&self.doc.measures, patch);
        self.persist();
    }

    /// Klikk-for-å-redigere fra silhuetten, verdi i gjeldende lengdeenhet.
    pub fn edit_measure(&mut self, date: NaiveDate, key: MeasureKey, value: f64) {
        self.doc.measures = edit_field(&self.doc.measures, date, key, value, self.length_unit);
        self.persist();
    }

    pub fn measures_for(&self, date: NaiveDate) -> MeasurementSample {
        current_for_date(&self.doc.measures, date)
    }

    pub fn remove_measurement(&mut self, index: usize) -> Option<Deleted<MeasurementSample>> {
        let (next, deleted) = remove_at(&self.doc.measures, index)?;
        self.doc.measures = next;
        self.last_deleted_measure = Some(deleted);
        self.persist();
        Some(deleted)
    }

    pub fn undo_remove_measurement(&mut self) -> bool {
        let Some(deleted) = self.last_deleted_measure.take() else {
            return false;
        };
        self.doc.measures = undo_remove(&self.doc.measures, &deleted);
        self.persist();
        true
    }

    pub fn edit_profile(&mut self, edit: impl FnOnce(&mut Profile)) {
        edit(&mut self.doc.profile);
        self.persist();
    }

    pub fn set_targets(&mut self, start_weight_lb: f64, target_weight_lb: f64) {
        self.doc.start_weight_lb = start_weight_lb;
        self.doc.target_weight_lb = target_weight_lb;
        self.persist();
    }

    pub fn set_dates(&mut self, start: Option<NaiveDate>, target: Option<NaiveDate>) {
        self.doc.start_date = start;
        self.doc.target_date = target;
        self.persist();
    }

    pub fn report(&self, today: NaiveDate) -> DashboardReport {
        build_report(&self.doc, today)
    }

    /// Full pipeline + geometri fra gjeldende dokument og valg.
    pub fn chart(
        &self,
        opts: &ChartOptions,
        layout: ChartLayout,
        hover: &HoverState,
        now: DateTime<Utc>,
    ) -> (PreparedSeries, ChartGeometry) {
        render_entries(
            &self.doc.entries,
            self.doc.profile.height_in,
            opts,
            layout,
            hover,
            self.weight_unit,
            now,
        )
    }
}
