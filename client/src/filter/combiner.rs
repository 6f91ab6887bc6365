//! VisibilityCombiner - Unico punto in cui le tre dimensioni vengono combinate

use super::flags::{FilterFlags, FlagObserver};
use std::collections::BTreeMap;
use tracing::trace;

/// Callback del renderer: (contentid, visibile)
pub type VisibilityListener = Box<dyn FnMut(usize, bool)>;

#[derive(Default)]
pub struct VisibilityCombiner {
    visible: BTreeMap<usize, bool>,
    listeners: Vec<VisibilityListener>,
}

impl VisibilityCombiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: VisibilityListener) {
        self.listeners.push(listener);
    }

    pub fn is_visible(&self, contentid: usize) -> bool {
        self.visible.get(&contentid).copied().unwrap_or(false)
    }

    /// Lettere visibili in ordine di feed
    pub fn visible_letters(&self) -> Vec<usize> {
        self.visible
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl FlagObserver for VisibilityCombiner {
    fn flags_changed(&mut self, contentid: usize, flags: FilterFlags) {
        let visible = flags.visible();
        let previous = self.visible.insert(contentid, visible);
        if previous == Some(visible) {
            return;
        }
        trace!(contentid, visible, "Visibility changed");
        for listener in &mut self.listeners {
            listener(contentid, visible);
        }
    }
}
