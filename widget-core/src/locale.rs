//! Language resolution and the per-language display strings.
//!
//! The string tables are process-wide statics shared by reference; nothing
//! mutates them after load, so every widget instance points at the same data.

use crate::units::UnitSystem;

/// Supported display languages. Anything the widget cannot match falls back
/// to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    It,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::It => "it",
            Language::En => "en",
        }
    }

    /// Unit system a widget starts with when the host does not pick one.
    pub fn default_units(&self) -> UnitSystem {
        match self {
            Language::It => UnitSystem::Metric,
            Language::En => UnitSystem::Imperial,
        }
    }

    pub fn strings(&self) -> &'static Strings {
        match self {
            Language::It => &IT,
            Language::En => &EN,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display strings for one language.
#[derive(Debug)]
pub struct Strings {
    pub server_error: &'static str,
    pub config_error: &'static str,
    /// Caption for the last-update line, e.g. "last update".
    pub updated_label: &'static str,
    /// Prefix put in front of the HH:MM timestamp, e.g. "at 14:05".
    pub updated_time_prefix: &'static str,
    pub new_location_prompt: &'static str,
}

static EN: Strings = Strings {
    server_error: "Server error, please retry later",
    config_error: "No location configured",
    updated_label: "last update",
    updated_time_prefix: "at",
    new_location_prompt: "Enter a new location",
};

static IT: Strings = Strings {
    server_error: "Errore del server, riprova più tardi",
    config_error: "Nessuna località configurata",
    updated_label: "ultimo aggiornamento",
    updated_time_prefix: "alle",
    new_location_prompt: "Inserisci una nuova località",
};

/// Resolve the widget language from an explicit override and the platform
/// default, in that order.
///
/// The match is a case-sensitive substring check: any resolved identifier
/// containing `"it"` anywhere selects Italian, everything else selects
/// English. This is intentionally loose (no locale-tag parsing) and the
/// widget's behavior depends on it staying that way.
pub fn resolve_language(explicit: Option<&str>, platform: Option<&str>) -> Language {
    let resolved = explicit.or(platform).unwrap_or("");

    if resolved.contains("it") {
        Language::It
    } else {
        Language::En
    }
}

/// Platform-default locale identifier, when the OS reports one.
pub fn platform_locale() -> Option<String> {
    sys_locale::get_locale()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_substring_anywhere_selects_italian() {
        assert_eq!(resolve_language(Some("it"), None), Language::It);
        assert_eq!(resolve_language(Some("it-IT"), None), Language::It);
        assert_eq!(resolve_language(Some("somewhereit"), None), Language::It);
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(resolve_language(Some("IT"), None), Language::En);
        assert_eq!(resolve_language(Some("It-IT"), None), Language::En);
        assert_eq!(resolve_language(Some("en-US.utf8-it"), None), Language::It);
    }

    #[test]
    fn everything_else_is_english() {
        assert_eq!(resolve_language(Some("en-US"), None), Language::En);
        assert_eq!(resolve_language(Some("fr"), None), Language::En);
        assert_eq!(resolve_language(None, None), Language::En);
    }

    #[test]
    fn explicit_override_wins_over_platform() {
        assert_eq!(resolve_language(Some("en-US"), Some("it-IT")), Language::En);
        assert_eq!(resolve_language(Some("it-IT"), Some("en-US")), Language::It);
    }

    #[test]
    fn platform_default_used_without_override() {
        assert_eq!(resolve_language(None, Some("it-CH")), Language::It);
        assert_eq!(resolve_language(None, Some("de-DE")), Language::En);
    }

    #[test]
    fn language_fixes_default_units() {
        assert_eq!(Language::It.default_units(), UnitSystem::Metric);
        assert_eq!(Language::En.default_units(), UnitSystem::Imperial);
    }
}
