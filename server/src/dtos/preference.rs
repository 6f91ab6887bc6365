//! Preference DTOs - Data Transfer Objects per le preferenze dei filtri

use crate::entities::UserFilterPreference;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Corpo di `record_usersettings`: i sei campi interi della preferenza
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Validate)]
pub struct UserSettingsDTO {
    pub userid: i64,
    #[validate(range(min = 0))]
    pub timefilterpast: i64,
    #[validate(range(min = 0))]
    pub timefilterfuture: i64,
    #[validate(range(min = 0, max = 1))]
    pub basicletter: i64,
    #[validate(range(min = 0, max = 1))]
    pub completionletter: i64,
    #[validate(range(min = 0, max = 1))]
    pub postletter: i64,
}

impl From<UserFilterPreference> for UserSettingsDTO {
    fn from(value: UserFilterPreference) -> Self {
        Self {
            userid: value.userid,
            timefilterpast: value.timefilterpast,
            timefilterfuture: value.timefilterfuture,
            basicletter: value.basicletter,
            completionletter: value.completionletter,
            postletter: value.postletter,
        }
    }
}

/// Corpo di `reset_usersettings`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ResetSettingsDTO {
    pub userid: i64,
}
