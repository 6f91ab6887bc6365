//! Flags - Stato per lettera e canale di pubblicazione degli aggiornamenti
//!
//! Ogni controllo scrive solo la propria dimensione attraverso il `FlagBus`;
//! l'unico osservatore ricalcola la visibilita' a ogni pubblicazione.

use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Course,
    Time,
    LetterType,
}

/// I tre flag indipendenti di una lettera renderizzata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterFlags {
    pub course_active: bool,
    pub time_active: bool,
    pub letter_active: bool,
}

impl Default for FilterFlags {
    fn default() -> Self {
        Self {
            course_active: true,
            time_active: true,
            letter_active: true,
        }
    }
}

impl FilterFlags {
    pub fn get(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Course => self.course_active,
            Dimension::Time => self.time_active,
            Dimension::LetterType => self.letter_active,
        }
    }

    pub fn set(&mut self, dimension: Dimension, active: bool) {
        match dimension {
            Dimension::Course => self.course_active = active,
            Dimension::Time => self.time_active = active,
            Dimension::LetterType => self.letter_active = active,
        }
    }

    pub fn visible(&self) -> bool {
        self.course_active && self.time_active && self.letter_active
    }
}

/// Sottoscrittore degli aggiornamenti dei flag
pub trait FlagObserver {
    fn flags_changed(&mut self, contentid: usize, flags: FilterFlags);
}

pub struct FlagBus<O: FlagObserver> {
    flags: BTreeMap<usize, FilterFlags>,
    observer: O,
}

impl<O: FlagObserver> FlagBus<O> {
    /// Registra le lettere con tutti i flag attivi e notifica lo stato iniziale
    pub fn new(contentids: impl IntoIterator<Item = usize>, mut observer: O) -> Self {
        let flags: BTreeMap<usize, FilterFlags> = contentids
            .into_iter()
            .map(|id| (id, FilterFlags::default()))
            .collect();
        for (id, state) in &flags {
            observer.flags_changed(*id, *state);
        }
        Self { flags, observer }
    }

    /// Scrive un flag e notifica l'osservatore prima di ritornare
    pub fn publish(&mut self, contentid: usize, dimension: Dimension, active: bool) {
        let Some(state) = self.flags.get_mut(&contentid) else {
            warn!("Flag update for unknown letter {}", contentid);
            return;
        };
        state.set(dimension, active);
        self.observer.flags_changed(contentid, *state);
    }

    pub fn flags(&self, contentid: usize) -> Option<FilterFlags> {
        self.flags.get(&contentid).copied()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
