use crate::models::{ActivityEntry, FoodEntry, WeightEntry};
use chrono::NaiveDate;
use serde::Deserialize;

/// Records that carry a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for WeightEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for FoodEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Dated for ActivityEntry {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

/// Returns a copy ordered by date. Equal dates keep their input order.
pub fn sort_by_date<T: Dated + Clone>(items: &[T], direction: SortDirection) -> Vec<T> {
    let mut sorted = items.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by_key(|item| item.date()),
        SortDirection::Descending => sorted.sort_by(|a, b| b.date().cmp(&a.date())),
    }
    sorted
}

pub fn most_recent<T: Dated + Clone>(items: &[T], limit: usize) -> Vec<T> {
    let mut sorted = sort_by_date(items, SortDirection::Descending);
    sorted.truncate(limit);
    sorted
}

/// Chronological series for the weight chart.
pub fn weight_series(weights: &[WeightEntry]) -> Vec<WeightEntry> {
    sort_by_date(weights, SortDirection::Ascending)
}
