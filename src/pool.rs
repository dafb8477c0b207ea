use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, CatalogEntry, Deck};

/// Which decks currently feed the active pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnabledDecks(BTreeMap<Deck, bool>);

impl EnabledDecks {
    /// One key per deck present in `entries`, all enabled
    pub fn all_enabled(entries: &[CatalogEntry]) -> Self {
        Self(
            catalog::decks(entries)
                .into_iter()
                .map(|d| (d, true))
                .collect(),
        )
    }

    pub fn is_enabled(&self, deck: Deck) -> bool {
        self.0.get(&deck).copied().unwrap_or(false)
    }

    /// Flips `deck`. Decks unknown to the catalog are ignored.
    pub fn toggle(&mut self, deck: Deck) {
        if let Some(flag) = self.0.get_mut(&deck) {
            *flag = !*flag;
        }
    }

    pub fn set(&mut self, deck: Deck, enabled: bool) {
        if let Some(flag) = self.0.get_mut(&deck) {
            *flag = enabled;
        }
    }

    /// All known decks with their flag, in display order
    pub fn iter(&self) -> impl Iterator<Item = (Deck, bool)> + '_ {
        self.0.iter().map(|(d, on)| (*d, *on))
    }

    pub fn enabled(&self) -> impl Iterator<Item = Deck> + '_ {
        self.iter().filter(|(_, on)| *on).map(|(d, _)| d)
    }

    pub fn disabled(&self) -> impl Iterator<Item = Deck> + '_ {
        self.iter().filter(|(_, on)| !*on).map(|(d, _)| d)
    }

    pub fn all_disabled(&self) -> bool {
        self.enabled().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The deck at display position `idx`
    pub fn nth(&self, idx: usize) -> Option<Deck> {
        self.0.keys().nth(idx).copied()
    }
}

impl Default for EnabledDecks {
    fn default() -> Self {
        Self::all_enabled(catalog::CATALOG)
    }
}

/// Entries with at least one enabled deck, in catalog order
pub fn active_pool<'a>(catalog: &'a [CatalogEntry], enabled: &EnabledDecks) -> Vec<&'a CatalogEntry> {
    catalog
        .iter()
        .filter(|e| e.decks.iter().any(|d| enabled.is_enabled(*d)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CATALOG;

    #[test]
    fn test_default_enables_everything() {
        let enabled = EnabledDecks::default();
        assert_eq!(enabled.len(), 7);
        assert!(enabled.iter().all(|(_, on)| on));
        assert_eq!(active_pool(CATALOG, &enabled).len(), CATALOG.len());
    }

    #[test]
    fn test_toggle_flips_back_and_forth() {
        let mut enabled = EnabledDecks::default();
        enabled.toggle(Deck::German);
        assert!(!enabled.is_enabled(Deck::German));
        enabled.toggle(Deck::German);
        assert!(enabled.is_enabled(Deck::German));
    }

    #[test]
    fn test_unknown_deck_is_ignored() {
        let math_only: &[CatalogEntry] = &CATALOG[10..12];
        let mut enabled = EnabledDecks::all_enabled(math_only);
        assert_eq!(enabled.len(), 1);

        enabled.toggle(Deck::French);
        assert!(!enabled.is_enabled(Deck::French));
        assert_eq!(enabled.len(), 1);
    }

    #[test]
    fn test_pool_contains_exactly_entries_with_an_enabled_deck() {
        // Walk every subset of the seven decks
        let decks: Vec<Deck> = catalog::decks(CATALOG);
        for mask in 0u32..(1 << decks.len()) {
            let mut enabled = EnabledDecks::default();
            for (i, d) in decks.iter().enumerate() {
                enabled.set(*d, mask & (1 << i) != 0);
            }

            let pool = active_pool(CATALOG, &enabled);
            for e in CATALOG {
                let expected = e.decks.iter().any(|d| enabled.is_enabled(*d));
                assert_eq!(
                    pool.iter().any(|p| p.character == e.character),
                    expected,
                    "mask {mask:#b} entry {}",
                    e.character
                );
            }
        }
    }

    #[test]
    fn test_shared_entry_survives_partial_disable() {
        let mut enabled = EnabledDecks::default();
        for d in [Deck::Symbols, Deck::French, Deck::Portuguese] {
            enabled.set(d, false);
        }
        let pool = active_pool(CATALOG, &enabled);
        // « is tagged Spanish too
        assert!(pool.iter().any(|e| e.character == "«"));
        assert!(!pool.iter().any(|e| e.character == "©"));
    }

    #[test]
    fn test_all_disabled_yields_empty_pool() {
        let mut enabled = EnabledDecks::default();
        for d in catalog::decks(CATALOG) {
            enabled.toggle(d);
        }
        assert!(enabled.all_disabled());
        assert!(active_pool(CATALOG, &enabled).is_empty());
    }

    #[test]
    fn test_math_only_catalog_disabled() {
        let math_only: Vec<CatalogEntry> = CATALOG
            .iter()
            .filter(|e| e.decks == [Deck::Math])
            .copied()
            .collect();
        let mut enabled = EnabledDecks::all_enabled(&math_only);
        assert_eq!(active_pool(&math_only, &enabled).len(), math_only.len());

        enabled.toggle(Deck::Math);
        assert!(active_pool(&math_only, &enabled).is_empty());
    }

    #[test]
    fn test_nth_follows_display_order() {
        let enabled = EnabledDecks::default();
        assert_eq!(enabled.nth(0), Some(Deck::Currencies));
        assert_eq!(enabled.nth(6), Some(Deck::Symbols));
        assert_eq!(enabled.nth(7), None);
    }
}
