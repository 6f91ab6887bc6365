//! Filter module - Motore dei filtri lato client
//!
//! Lo stato vive interamente nel `FilterEngine`: i flag per lettera nel bus,
//! la visibilita' combinata nel suo unico osservatore, le selezioni nei
//! rispettivi controlli. Nessuna chiamata al server tranne il salvataggio
//! esplicito delle preferenze.

pub mod combiner;
pub mod controls;
pub mod flags;
pub mod time;

pub use combiner::{VisibilityCombiner, VisibilityListener};
pub use controls::{CourseFilter, LetterTypeFilter, TimeFilter};
pub use flags::{Dimension, FilterFlags, FlagBus, FlagObserver};
pub use time::TimeSpan;

use crate::models::{Feed, FeedLetter, LetterType, UserSettings};
use std::collections::BTreeSet;
use tracing::info;

pub struct FilterEngine {
    now: i64,
    letters: Vec<FeedLetter>,
    bus: FlagBus<VisibilityCombiner>,
    courses: CourseFilter,
    time: TimeFilter,
    types: LetterTypeFilter,
}

impl FilterEngine {
    /// Tutte le lettere partono visibili, con tutti i corsi e i tipi selezionati
    pub fn new(feed: &Feed) -> Self {
        let letters = feed.letters.clone();
        let bus = FlagBus::new(
            letters.iter().map(|l| l.contentid),
            VisibilityCombiner::new(),
        );
        info!("Filter engine ready with {} letters", letters.len());
        Self {
            now: feed.now,
            courses: CourseFilter::new(feed.courses.iter().map(|c| c.id)),
            time: TimeFilter::default(),
            types: LetterTypeFilter::default(),
            letters,
            bus,
        }
    }

    /// Registra un hook del renderer, chiamato a ogni cambio di visibilita'
    pub fn on_visibility_change(&mut self, listener: impl FnMut(usize, bool) + 'static) {
        self.bus.observer_mut().add_listener(Box::new(listener));
    }

    pub fn toggle_course(&mut self, courseid: i64, checked: bool) {
        self.courses
            .toggle(courseid, checked, &self.letters, &mut self.bus);
    }

    pub fn select_time_span(&mut self, span: TimeSpan) {
        self.time.select(span, self.now, &self.letters, &mut self.bus);
    }

    pub fn toggle_letter_type(&mut self, lettertype: LetterType, checked: bool) {
        self.types
            .toggle(lettertype, checked, &self.letters, &mut self.bus);
    }

    /// Inizializza filtro temporale e tipi da una preferenza salvata
    pub fn apply_preference(&mut self, settings: &UserSettings) {
        self.select_time_span(TimeSpan::from_preference(
            settings.timefilterpast,
            settings.timefilterfuture,
        ));
        for lettertype in LetterType::FILTERABLE {
            self.toggle_letter_type(lettertype, settings.letter_enabled(lettertype));
        }
    }

    /// La preferenza da salvare per lo stato corrente dei controlli
    pub fn current_preference(&self, userid: i64) -> UserSettings {
        let (timefilterpast, timefilterfuture) = self.time.span().to_preference();
        let flag = |lettertype| i64::from(self.types.is_enabled(lettertype));
        UserSettings {
            userid,
            timefilterpast,
            timefilterfuture,
            basicletter: flag(LetterType::Basic),
            completionletter: flag(LetterType::ActivityCompletion),
            postletter: flag(LetterType::Post),
        }
    }

    pub fn is_visible(&self, contentid: usize) -> bool {
        self.bus.observer().is_visible(contentid)
    }

    pub fn visible_letters(&self) -> Vec<usize> {
        self.bus.observer().visible_letters()
    }

    pub fn flags(&self, contentid: usize) -> Option<FilterFlags> {
        self.bus.flags(contentid)
    }

    pub fn enabled_courses(&self) -> &BTreeSet<i64> {
        self.courses.enabled()
    }

    pub fn time_span(&self) -> TimeSpan {
        self.time.span()
    }
}
