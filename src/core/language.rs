//! App display language.

use crate::platform::Storage;
use log::warn;

/// Storage key for the persisted UI language.
pub const LANGUAGE_KEY: &str = "@wedflow/app_language";

/// Languages the app ships copy for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Norwegian Bokmål, the app default.
    #[default]
    Nb,
    /// English.
    En,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::Nb => "nb",
            Language::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "nb" => Some(Language::Nb),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Read the persisted app language, defaulting to Norwegian when the
    /// key is missing or holds an unknown code.
    pub async fn load(storage: &dyn Storage) -> Self {
        match storage.get(LANGUAGE_KEY).await {
            Ok(Some(raw)) => match Language::from_code(raw.trim()) {
                Some(language) => language,
                None => {
                    warn!("Unknown app language {:?}, falling back to nb", raw);
                    Language::default()
                }
            },
            Ok(None) => Language::default(),
            Err(e) => {
                warn!("Failed to read app language, falling back to nb: {}", e);
                Language::default()
            }
        }
    }
}
