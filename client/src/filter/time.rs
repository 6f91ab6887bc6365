//! TimeSpan - Intervalli nominali del filtro temporale

pub const DAY_SECS: i64 = 24 * 60 * 60;
pub const WEEK_SECS: i64 = 7 * DAY_SECS;
pub const MONTH_SECS: i64 = 30 * DAY_SECS;

/// Finestra relativa a "ora"; `All` non ha limiti.
///
/// Nelle preferenze salvate una finestra e' la coppia
/// (`timefilterpast`, `timefilterfuture`) in secondi e (0, 0) vale `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeSpan {
    #[default]
    All,
    Window { past: i64, future: i64 },
}

impl TimeSpan {
    pub fn last_days(days: i64) -> Self {
        Self::Window {
            past: days.saturating_mul(DAY_SECS),
            future: 0,
        }
    }

    pub fn next_days(days: i64) -> Self {
        Self::Window {
            past: 0,
            future: days.saturating_mul(DAY_SECS),
        }
    }

    pub fn last_week() -> Self {
        Self::Window {
            past: WEEK_SECS,
            future: 0,
        }
    }

    pub fn next_week() -> Self {
        Self::Window {
            past: 0,
            future: WEEK_SECS,
        }
    }

    pub fn last_month() -> Self {
        Self::Window {
            past: MONTH_SECS,
            future: 0,
        }
    }

    pub fn next_month() -> Self {
        Self::Window {
            past: 0,
            future: MONTH_SECS,
        }
    }

    pub fn from_preference(past: i64, future: i64) -> Self {
        if past <= 0 && future <= 0 {
            Self::All
        } else {
            Self::Window {
                past: past.max(0),
                future: future.max(0),
            }
        }
    }

    pub fn to_preference(&self) -> (i64, i64) {
        match self {
            Self::All => (0, 0),
            Self::Window { past, future } => (*past, *future),
        }
    }

    /// Estremi inclusivi `[timestart, timeend]` rispetto a `now`
    pub fn range(&self, now: i64) -> (i64, i64) {
        match self {
            Self::All => (i64::MIN, i64::MAX),
            Self::Window { past, future } => {
                (now.saturating_sub(*past), now.saturating_add(*future))
            }
        }
    }

    pub fn contains(&self, now: i64, timestamp: i64) -> bool {
        let (start, end) = self.range(now);
        (start..=end).contains(&timestamp)
    }
}
