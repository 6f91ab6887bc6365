//! Enumerazioni - Tipi enumerati utilizzati nelle entità

use serde::{Deserialize, Serialize};

// ********************* ENUMERAZIONI UTILI **********************//

/// Livello di anonimato di un'istanza di forum
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnonymityLevel {
    #[default]
    NotAnonymous,
    /// Solo il primo post di ogni discussione e' anonimo
    TopicStarter,
    /// Tutti i post dell'istanza sono anonimi
    Everything,
}

impl AnonymityLevel {
    /// Valori sconosciuti vengono trattati come anonimato completo
    pub fn from_setting(value: i64) -> Self {
        match value {
            0 => Self::NotAnonymous,
            1 => Self::TopicStarter,
            _ => Self::Everything,
        }
    }

    pub fn redacts(&self, is_first_post: bool) -> bool {
        match self {
            Self::NotAnonymous => false,
            Self::TopicStarter => is_first_post,
            Self::Everything => true,
        }
    }
}

/// Implementazioni di forum che possono contribuire post al feed
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostModule {
    Forum,
    Moodleoverflow,
}

impl PostModule {
    pub fn modname(&self) -> &'static str {
        match self {
            Self::Forum => "forum",
            Self::Moodleoverflow => "moodleoverflow",
        }
    }

    pub fn from_modname(modname: &str) -> Option<Self> {
        match modname {
            "forum" => Some(Self::Forum),
            "moodleoverflow" => Some(Self::Moodleoverflow),
            _ => None,
        }
    }
}
