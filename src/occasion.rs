//! Lookup of occasions (holy days, anniversaries) by Badí' date.

use std::collections::BTreeMap;

use crate::types::{Day, MonthRef};
use crate::BadiYmd;

/// A catalog of occasions keyed by Badí' date.
pub trait OccasionCatalog {
    type Occasion;

    /// All occasions falling on `ymd`, in catalog order.
    fn occasions_on(&self, ymd: &BadiYmd) -> Vec<Self::Occasion>;
}

/// In-memory catalog holding occasions that recur every year on the same
/// month and day, and occasions tied to a single year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccasionTable<T> {
    annual: BTreeMap<(MonthRef, Day), Vec<T>>,
    dated:  BTreeMap<BadiYmd, Vec<T>>,
}

impl<T> Default for OccasionTable<T> {
    fn default() -> Self {
        Self {
            annual: BTreeMap::new(),
            dated:  BTreeMap::new(),
        }
    }
}

impl<T> OccasionTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an occasion observed every year on `month`/`day`
    pub fn insert_annual(&mut self, month: MonthRef, day: Day, occasion: T) {
        self.annual.entry((month, day)).or_default().push(occasion);
    }

    /// Adds an occasion observed only on `ymd`
    pub fn insert_on(&mut self, ymd: BadiYmd, occasion: T) {
        self.dated.entry(ymd).or_default().push(occasion);
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.annual.values().chain(self.dated.values()).map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> OccasionCatalog for OccasionTable<T> {
    type Occasion = T;

    fn occasions_on(&self, ymd: &BadiYmd) -> Vec<T> {
        let annual = self.annual.get(&(ymd.month(), ymd.day_typed()));
        let dated = self.dated.get(ymd);
        annual.into_iter().chain(dated).flatten().cloned().collect()
    }
}
