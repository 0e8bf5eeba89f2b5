use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Relative words accepted wherever the user types a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    Today,
    Yesterday,
    Tomorrow,
    #[strum(serialize = "last week")]
    LastWeek,
    #[strum(serialize = "next week")]
    NextWeek,
    #[strum(serialize = "last month")]
    LastMonth,
    #[strum(serialize = "next month")]
    NextMonth,
}

pub struct Keywords;

impl Keywords {
    /// Returns the **global keyword registry** (input → canonical).
    ///
    /// The registry is:
    /// - **Initialized once** on first access (via [`once_cell::sync::Lazy`]).
    /// - **Thread-safe** (wrapped in [`RwLock`]): many readers or one writer.
    /// - **Lowercased**: all keys are stored lowercased for case-insensitive lookups.
    ///
    /// It is seeded with every canonical [`Keyword`]. Use [`extend`](Self::extend)
    /// to add synonyms and [`lookup`](Self::lookup) to resolve input.
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let seeded = Keyword::iter()
                .map(|keyword| (keyword.as_ref().to_string(), keyword))
                .collect();
            RwLock::new(seeded)
        });
        &REGISTRY
    }

    /// Extends the global registry with user-defined **synonyms**.
    ///
    /// Each pair is `(alias, target)`. The `target` must already be known to the
    /// registry (a canonical word or an earlier synonym); unknown targets are
    /// ignored. Typical call site is `Config::load()` reading `[synonyms]`:
    ///
    /// ```toml
    /// [synonyms]
    /// ayer = "yesterday"
    /// "mes pasado" = "last month"
    /// ```
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = Self::registry()
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&normalize_word(target)) {
                reg.insert(normalize_word(alias), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical word (eg "today").
    pub fn is_canonical(word: &str) -> bool {
        let word = normalize_word(word);
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Resolves `input` (case-insensitively) to its canonical keyword.
    pub fn lookup(input: &str) -> Option<Keyword> {
        let reg = Self::registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        reg.get(&normalize_word(input)).copied()
    }

    /// Returns `true` if `input` is the given keyword or one of its synonyms.
    pub fn matches(keyword: Keyword, input: &str) -> bool {
        Self::lookup(input) == Some(keyword)
    }
}

/// Lowercases and collapses inner whitespace, so `"Last   Week"` finds `"last week"`.
fn normalize_word(word: &str) -> String {
    word.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keywords() {
        assert!(Keywords::matches(Keyword::Today, "today"));
        assert!(Keywords::matches(Keyword::Yesterday, "YESTERDAY"));
        assert!(Keywords::matches(Keyword::LastMonth, "Last   Month"));
    }

    #[test]
    fn synonyms_extend() {
        Keywords::extend(&[
            ("ayer".into(), "yesterday".into()),
            ("mañana".into(), "tomorrow".into()),
            ("prev wk".into(), "last week".into()),
        ]);
        assert!(Keywords::matches(Keyword::Yesterday, "ayer"));
        assert!(Keywords::matches(Keyword::Tomorrow, "Mañana"));
        assert!(Keywords::matches(Keyword::LastWeek, "prev wk"));
    }

    #[test]
    fn synonyms_to_unknown_targets_are_ignored() {
        Keywords::extend(&[("whenever".into(), "someday".into())]);
        assert_eq!(Keywords::lookup("whenever"), None);
    }

    #[test]
    fn canonical_words_are_recognized() {
        assert!(Keywords::is_canonical("today"));
        assert!(Keywords::is_canonical("next month"));
        assert!(!Keywords::is_canonical("ayer"));
    }
}
