use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A user toggleable group of catalog entries
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
pub enum Deck {
    Currencies,
    French,
    German,
    Math,
    Portuguese,
    Spanish,
    Symbols,
}

impl Deck {
    pub fn label(&self) -> &'static str {
        match self {
            Deck::Currencies => "Currencies",
            Deck::French => "French",
            Deck::German => "German",
            Deck::Math => "Math",
            Deck::Portuguese => "Portuguese",
            Deck::Spanish => "Spanish",
            Deck::Symbols => "Symbols",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Deck::Currencies => "💰",
            Deck::French => "🇫🇷",
            Deck::German => "🇩🇪",
            Deck::Math => "🧮",
            Deck::Portuguese => "🇵🇹",
            Deck::Spanish => "🇪🇸",
            Deck::Symbols => "🔣",
        }
    }
}

/// One character to drill, the keys typed after compose, and its decks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub character: &'static str,
    pub sequence: &'static [&'static str],
    pub decks: &'static [Deck],
}

const fn entry(
    character: &'static str,
    sequence: &'static [&'static str],
    decks: &'static [Deck],
) -> CatalogEntry {
    CatalogEntry {
        character,
        sequence,
        decks,
    }
}

use Deck::*;

// https://help.ubuntu.com/community/GtkComposeTable
#[rustfmt::skip]
pub static CATALOG: &[CatalogEntry] = &[
    entry("¡", &["!", "!"], &[Symbols, Spanish]),
    entry("¢", &["c", "/"], &[Currencies]),
    entry("£", &["-", "L"], &[Currencies]),
    entry("¤", &["o", "x"], &[Currencies]),
    entry("¥", &["=", "Y"], &[Currencies]),
    entry("¦", &["|", "|"], &[Symbols]),
    entry("§", &["s", "o"], &[Symbols]),
    entry("©", &["o", "c"], &[Symbols]),
    entry("«", &["<", "<"], &[Symbols, French, Portuguese, Spanish]),
    entry("®", &["o", "r"], &[Symbols]),
    entry("°", &["o", "o"], &[Math]),
    entry("±", &["+", "-"], &[Math]),
    entry("·", &[".", "-"], &[Symbols]),
    entry("»", &[">", ">"], &[Symbols, French, Portuguese, Spanish]),
    entry("¼", &["1", "4"], &[Math]),
    entry("½", &["1", "2"], &[Math]),
    entry("¾", &["3", "4"], &[Math]),
    entry("¿", &["?", "?"], &[Symbols, Spanish]),
    entry("Á", &["'", "A"], &[Portuguese, Spanish]),
    entry("Â", &["^", "A"], &[Portuguese, French]),
    entry("Ã", &["~", "A"], &[Portuguese]),
    entry("Ä", &["\"", "A"], &[German]),
    entry("Ç", &[",", "C"], &[Portuguese, French, Spanish, German]),
    entry("É", &["'", "E"], &[Portuguese, French, Spanish]),
    entry("Ê", &["^", "E"], &[Portuguese, French]),
    entry("Í", &["'", "I"], &[Portuguese, Spanish]),
    entry("Ñ", &["~", "N"], &[Spanish]),
    entry("Ó", &["'", "O"], &[Portuguese, Spanish]),
    entry("Ô", &["^", "O"], &[Portuguese, French]),
    entry("Õ", &["~", "O"], &[Portuguese]),
    entry("Ö", &["\"", "O"], &[German]),
    entry("×", &["x", "x"], &[Math]),
    entry("Ú", &["'", "U"], &[Portuguese, Spanish]),
    entry("Ü", &["\"", "U"], &[German]),
    entry("ß", &["s", "s"], &[German]),
    entry("à", &["`", "a"], &[French]),
    entry("á", &["'", "a"], &[Portuguese, Spanish]),
    entry("â", &["^", "a"], &[Portuguese, French]),
    entry("ã", &["~", "a"], &[Portuguese]),
    entry("ä", &["\"", "a"], &[German]),
    entry("ç", &[",", "c"], &[French, Portuguese, Spanish, German]),
    entry("è", &["`", "e"], &[French]),
    entry("é", &["'", "e"], &[French, Portuguese, Spanish]),
    entry("ê", &["^", "e"], &[Portuguese, French]),
    entry("ë", &["\"", "e"], &[French, German]),
    entry("ì", &["`", "i"], &[French]),
    entry("í", &["'", "i"], &[Portuguese, Spanish]),
    entry("ñ", &["~", "n"], &[Spanish]),
    entry("ò", &["`", "o"], &[French]),
    entry("ó", &["'", "o"], &[Portuguese, Spanish]),
    entry("ô", &["^", "o"], &[Portuguese, French]),
    entry("õ", &["~", "o"], &[Portuguese]),
    entry("ö", &["\"", "o"], &[German]),
    entry("÷", &[":", "-"], &[Math]),
    entry("ù", &["`", "u"], &[French]),
    entry("ú", &["'", "u"], &[Portuguese, Spanish]),
    entry("ü", &["\"", "u"], &[German]),
    entry("…", &[".", "."], &[Symbols]),
    entry("₤", &["=", "L"], &[Currencies]),
    entry("€", &["=", "e"], &[Currencies]),
    entry("™", &["t", "m"], &[Symbols]),
    entry("←", &["<", "-"], &[Symbols]),
    entry("↑", &["^", "|"], &[Symbols]),
    entry("→", &["-", ">"], &[Symbols]),
    entry("↓", &["v", "|"], &[Symbols]),
    entry("∞", &["8", "8"], &[Math]),
    entry("≠", &["/", "="], &[Math]),
    entry("≤", &["<", "="], &[Math]),
    entry("≥", &[">", "="], &[Math]),
];

/// Label of the key that starts every sequence
pub const COMPOSE_KEY: &str = "compose";

/// Distinct decks used by `catalog`, sorted
pub fn decks(catalog: &[CatalogEntry]) -> Vec<Deck> {
    catalog
        .iter()
        .flat_map(|e| e.decks.iter().copied())
        .unique()
        .sorted()
        .collect()
}

/// Entry shown when nothing is eligible for drawing
pub fn fallback() -> &'static CatalogEntry {
    &CATALOG[0]
}

/// Full sequence including the leading compose key
pub fn display_sequence(entry: &CatalogEntry) -> Vec<&'static str> {
    std::iter::once(COMPOSE_KEY)
        .chain(entry.sequence.iter().copied())
        .collect()
}
