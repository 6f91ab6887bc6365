//! Controls - I tre controlli dei filtri
//!
//! Ogni controllo conosce solo la propria dimensione e scrive i flag
//! esclusivamente attraverso il bus. Il marcatore di orientamento non
//! appartiene a nessuna dimensione e non viene mai toccato.

use super::flags::{Dimension, FlagBus, FlagObserver};
use super::time::TimeSpan;
use crate::models::{FeedLetter, LetterType};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Checkbox per corso
#[derive(Debug, Clone)]
pub struct CourseFilter {
    enabled: BTreeSet<i64>,
}

impl CourseFilter {
    pub fn new(courseids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            enabled: courseids.into_iter().collect(),
        }
    }

    /// Insieme dei corsi attualmente selezionati
    pub fn enabled(&self) -> &BTreeSet<i64> {
        &self.enabled
    }

    pub fn toggle<O: FlagObserver>(
        &mut self,
        courseid: i64,
        checked: bool,
        letters: &[FeedLetter],
        bus: &mut FlagBus<O>,
    ) {
        if checked {
            self.enabled.insert(courseid);
        } else {
            self.enabled.remove(&courseid);
        }
        debug!(courseid, checked, "Course filter changed");

        for letter in letters
            .iter()
            .filter(|l| !l.is_marker() && l.courseid == Some(courseid))
        {
            bus.publish(letter.contentid, Dimension::Course, checked);
        }
    }
}

/// Radio button mutuamente esclusivi sugli intervalli nominali
#[derive(Debug, Clone, Default)]
pub struct TimeFilter {
    span: TimeSpan,
}

impl TimeFilter {
    pub fn span(&self) -> TimeSpan {
        self.span
    }

    pub fn select<O: FlagObserver>(
        &mut self,
        span: TimeSpan,
        now: i64,
        letters: &[FeedLetter],
        bus: &mut FlagBus<O>,
    ) {
        self.span = span;
        debug!(?span, "Time filter changed");

        for letter in letters.iter().filter(|l| !l.is_marker()) {
            bus.publish(
                letter.contentid,
                Dimension::Time,
                span.contains(now, letter.timestamp),
            );
        }
    }
}

/// Checkbox per tipo di lettera
#[derive(Debug, Clone)]
pub struct LetterTypeFilter {
    enabled: BTreeSet<LetterType>,
}

impl Default for LetterTypeFilter {
    fn default() -> Self {
        Self {
            enabled: LetterType::FILTERABLE.into_iter().collect(),
        }
    }
}

impl LetterTypeFilter {
    pub fn is_enabled(&self, lettertype: LetterType) -> bool {
        self.enabled.contains(&lettertype)
    }

    pub fn toggle<O: FlagObserver>(
        &mut self,
        lettertype: LetterType,
        checked: bool,
        letters: &[FeedLetter],
        bus: &mut FlagBus<O>,
    ) {
        if lettertype == LetterType::OrientationMarker {
            warn!("The orientation marker cannot be filtered");
            return;
        }
        if checked {
            self.enabled.insert(lettertype);
        } else {
            self.enabled.remove(&lettertype);
        }
        debug!(?lettertype, checked, "Letter type filter changed");

        for letter in letters.iter().filter(|l| l.lettertype == lettertype) {
            bus.publish(letter.contentid, Dimension::LetterType, checked);
        }
    }
}
