//! Veiinger: upsert per dato, sletting med angre.
//!
//! Funksjonene muterer aldri input; de returnerer en ny liste som gis tilbake til lagring.
use chrono::NaiveDate;

use crate::models::Sample;

/// Det som trengs for å angre en sletting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deleted<T> {
    pub entry: T,
    pub index: usize,
}

/// Setter inn eller erstatter veiingen for `sample.date`. Lengden vokser ikke ved treff.
pub fn upsert_sample(entries: &[Sample], sample: Sample) -> Vec<Sample> {
    let mut next = entries.to_vec();
    match next.iter_mut().find(|e| e.date == sample.date) {
        Some(existing) => existing.weight_lb = sample.weight_lb,
        None => next.push(sample),
    }
    next
}

pub fn find_by_date(entries: &[Sample], date: NaiveDate) -> Option<(usize, &Sample)> {
    entries.iter().enumerate().find(|(_, e)| e.date == date)
}

/// Fjerner elementet på `index` (lagringsrekkefølge). `None` hvis indeksen ikke finnes.
pub fn remove_at<T: Clone>(items: &[T], index: usize) -> Option<(Vec<T>, Deleted<T>)> {
    let entry = items.get(index)?.clone();
    let mut next = items.to_vec();
    next.remove(index);
    Some((next, Deleted { entry, index }))
}

/// Setter slettet element tilbake på opprinnelig plass (klemmes til lengden).
pub fn undo_remove<T: Clone>(items: &[T], deleted: &Deleted<T>) -> Vec<T> {
    let mut next = items.to_vec();
    let at = deleted.index.min(next.len());
    next.insert(at, deleted.entry.clone());
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn remove_and_undo_restores_order() {
        let entries = vec![Sample::new(d(1), 200.0), Sample::new(d(2), 199.0), Sample::new(d(3), 198.0)];
        let (next, del) = remove_at(&entries, 1).unwrap();
        assert_eq!(next.len(), 2);
        assert_eq!(del.entry.date, d(2));
        assert_eq!(undo_remove(&next, &del), entries);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let entries = vec![Sample::new(d(1), 200.0)];
        assert!(remove_at(&entries, 5).is_none());
    }

    #[test]
    fn undo_clamps_index() {
        let del = Deleted { entry: Sample::new(d(9), 180.0), index: 10 };
        let out = undo_remove(&[Sample::new(d(1), 200.0)], &del);
        assert_eq!(out.last().unwrap().date, d(9));
    }
}
