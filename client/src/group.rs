//! CollapsibleGroup - Gruppi di lettere espandibili
//!
//! Macchina a stati indipendente dai filtri: ogni gruppo ricorda solo se e'
//! espanso e produce la transizione di altezza da animare.

use tracing::debug;

/// Transizione dell'altezza del contenuto, in pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightTransition {
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone)]
pub struct CollapsibleGroup {
    id: String,
    expanded: bool,
    content_height: u32,
}

impl CollapsibleGroup {
    pub fn new(id: impl Into<String>, content_height: u32) -> Self {
        Self {
            id: id.into(),
            expanded: true,
            content_height,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Altezza corrente del contenitore
    pub fn height(&self) -> u32 {
        if self.expanded { self.content_height } else { 0 }
    }

    /// Il contenuto e' cambiato (es. lettere nascoste dai filtri)
    pub fn set_content_height(&mut self, content_height: u32) {
        self.content_height = content_height;
    }

    pub fn toggle(&mut self) -> HeightTransition {
        let from = self.height();
        self.expanded = !self.expanded;
        debug!(group = %self.id, expanded = self.expanded, "Group toggled");
        HeightTransition {
            from,
            to: self.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_collapses_and_expands() {
        let mut group = CollapsibleGroup::new("today", 240);
        assert!(group.is_expanded());

        assert_eq!(group.toggle(), HeightTransition { from: 240, to: 0 });
        assert!(!group.is_expanded());

        group.set_content_height(120);
        assert_eq!(group.toggle(), HeightTransition { from: 0, to: 120 });
        assert_eq!(group.height(), 120);
    }
}
