//! CourseModule - Regole di accesso di un'attività del corso

use serde::{Deserialize, Serialize};

/// Stato di visibilità e disponibilità di un'attività, come letto dal database
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct ModuleAccess {
    pub visible: i64,
    pub available_from: Option<i64>,
    pub available_until: Option<i64>,
}

impl ModuleAccess {
    /// L'attività è accessibile se visibile e dentro la finestra di disponibilità
    pub fn is_accessible(&self, now: i64) -> bool {
        if self.visible == 0 {
            return false;
        }
        if self.available_from.is_some_and(|from| now < from) {
            return false;
        }
        if self.available_until.is_some_and(|until| now > until) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_module_is_not_accessible() {
        let access = ModuleAccess {
            visible: 0,
            ..Default::default()
        };
        assert!(!access.is_accessible(100));
    }

    #[test]
    fn test_availability_window() {
        let access = ModuleAccess {
            visible: 1,
            available_from: Some(50),
            available_until: Some(150),
        };
        assert!(!access.is_accessible(49));
        assert!(access.is_accessible(50));
        assert!(access.is_accessible(150));
        assert!(!access.is_accessible(151));
    }
}
