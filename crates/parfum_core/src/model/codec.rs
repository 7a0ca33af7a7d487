//! Persisted-string codecs for medley/ingredient enumerations.
//!
//! # Responsibility
//! - Map every enum variant to exactly one canonical persisted string.
//! - Provide display nouns (label, singular, plural) for UI projections.
//!
//! # Invariants
//! - `TABLE` lists variants in declaration order, one row per variant.
//! - Decoding is total: unknown strings resolve to `FALLBACK`, never an error.
//! - `decode(encode(x)) == x` for every variant.

use serde::{Deserialize, Serialize};

/// One row of an enum's bidirectional mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecEntry<T: 'static> {
    /// Variant this row describes.
    pub value: T,
    /// Canonical string written to storage.
    pub persisted: &'static str,
    /// Extra strings accepted on decode (legacy spellings).
    pub aliases: &'static [&'static str],
    /// Picker label shown to the user.
    pub label: &'static str,
    /// Noun used when the quantity is exactly one.
    pub singular: &'static str,
    /// Noun used for every other quantity.
    pub plural: &'static str,
}

/// Enumeration persisted as a display string.
pub trait PersistedEnum: Copy + Eq + Sized + 'static {
    /// Mapping table in declaration order.
    const TABLE: &'static [CodecEntry<Self>];
    /// Variant used when a stored string is not recognised.
    const FALLBACK: Self;

    /// Position of this variant inside `TABLE`.
    fn index(self) -> usize;

    /// Returns the mapping row for this variant.
    fn entry(self) -> &'static CodecEntry<Self> {
        &Self::TABLE[self.index()]
    }

    /// Canonical persisted form.
    fn encode(self) -> &'static str {
        self.entry().persisted
    }

    /// Strict decode; `None` for strings outside the table.
    fn parse(value: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|entry| entry.persisted == value || entry.aliases.contains(&value))
            .map(|entry| entry.value)
    }

    /// Total decode used by hydration paths.
    fn decode(value: &str) -> Self {
        Self::parse(value).unwrap_or(Self::FALLBACK)
    }

    fn label(self) -> &'static str {
        self.entry().label
    }

    fn singular(self) -> &'static str {
        self.entry().singular
    }

    fn plural(self) -> &'static str {
        self.entry().plural
    }

    /// Picks the noun matching `amount`: singular only for exactly one.
    fn display_name(self, amount: f64) -> &'static str {
        if amount == 1.0 {
            self.singular()
        } else {
            self.plural()
        }
    }

    /// All variants in table order, for pickers.
    fn all() -> Vec<Self> {
        Self::TABLE.iter().map(|entry| entry.value).collect()
    }
}

/// Unit of measure for one ingredient quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Pipette,
    Millilitre,
    Tablespoon,
    Gram,
    Cup,
}

impl PersistedEnum for Unit {
    const TABLE: &'static [CodecEntry<Self>] = &[
        CodecEntry {
            value: Unit::Pipette,
            persisted: "Drops",
            aliases: &[],
            label: "Drops",
            singular: "drop",
            plural: "drops",
        },
        CodecEntry {
            value: Unit::Millilitre,
            persisted: "Millilitre",
            aliases: &[],
            label: "Millilitre",
            singular: "ml",
            plural: "ml",
        },
        CodecEntry {
            value: Unit::Tablespoon,
            persisted: "Tablespoon",
            aliases: &[],
            label: "Tablespoon",
            singular: "tbsp",
            plural: "tbsps",
        },
        CodecEntry {
            value: Unit::Gram,
            persisted: "Grams",
            aliases: &[],
            label: "Grams",
            singular: "g",
            plural: "g",
        },
        CodecEntry {
            value: Unit::Cup,
            persisted: "Cup",
            aliases: &[],
            label: "Cup",
            singular: "cup",
            plural: "cups",
        },
    ];
    const FALLBACK: Self = Unit::Pipette;

    fn index(self) -> usize {
        self as usize
    }
}

/// Time unit that `Medley::maturity` counts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Hour,
    Day,
    Week,
}

impl PersistedEnum for Period {
    const TABLE: &'static [CodecEntry<Self>] = &[
        CodecEntry {
            value: Period::Hour,
            persisted: "hour",
            aliases: &["hours"],
            label: "Hour",
            singular: "hour",
            plural: "hours",
        },
        CodecEntry {
            value: Period::Day,
            persisted: "day",
            aliases: &["days"],
            label: "Day",
            singular: "day",
            plural: "days",
        },
        CodecEntry {
            value: Period::Week,
            persisted: "week",
            aliases: &["weeks"],
            label: "Week",
            singular: "week",
            plural: "weeks",
        },
    ];
    const FALLBACK: Self = Period::Day;

    fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of a medley experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Still maturing, no verdict yet.
    Tbd,
    Pass,
    Fail,
}

impl PersistedEnum for Status {
    const TABLE: &'static [CodecEntry<Self>] = &[
        CodecEntry {
            value: Status::Tbd,
            persisted: "tbd",
            aliases: &[],
            label: "TBD",
            singular: "tbd",
            plural: "tbd",
        },
        CodecEntry {
            value: Status::Pass,
            persisted: "pass",
            aliases: &[],
            label: "Pass",
            singular: "pass",
            plural: "passes",
        },
        CodecEntry {
            value: Status::Fail,
            persisted: "fail",
            aliases: &[],
            label: "Fail",
            singular: "fail",
            plural: "fails",
        },
    ];
    const FALLBACK: Self = Status::Tbd;

    fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{Period, PersistedEnum, Status, Unit};

    fn assert_table_is_consistent<T: PersistedEnum + std::fmt::Debug>() {
        for (position, entry) in T::TABLE.iter().enumerate() {
            assert_eq!(entry.value.index(), position, "{:?} out of order", entry.value);
            assert_eq!(T::decode(entry.value.encode()), entry.value);
            for alias in entry.aliases {
                assert_eq!(T::decode(alias), entry.value);
            }
        }
    }

    #[test]
    fn tables_round_trip_every_variant() {
        assert_table_is_consistent::<Unit>();
        assert_table_is_consistent::<Period>();
        assert_table_is_consistent::<Status>();
        assert_eq!(Unit::all().len(), 5);
        assert_eq!(Period::all().len(), 3);
        assert_eq!(Status::all().len(), 3);
    }

    #[test]
    fn unknown_strings_fall_back_to_defaults() {
        assert_eq!(Unit::decode("xyz"), Unit::Pipette);
        assert_eq!(Unit::decode(""), Unit::Pipette);
        assert_eq!(Period::decode("fortnight"), Period::Day);
        assert_eq!(Status::decode("PASS"), Status::Tbd);
        assert_eq!(Unit::parse("xyz"), None);
    }

    #[test]
    fn unit_decode_uses_persisted_labels() {
        assert_eq!(Unit::decode("Drops"), Unit::Pipette);
        assert_eq!(Unit::decode("Grams"), Unit::Gram);
        // Plural nouns are display-only and are not accepted on decode.
        assert_eq!(Unit::decode("cups"), Unit::Pipette);
    }

    #[test]
    fn period_accepts_singular_and_plural_spellings() {
        assert_eq!(Period::decode("hours"), Period::Hour);
        assert_eq!(Period::decode("week"), Period::Week);
        assert_eq!(Period::Week.encode(), "week");
        // Labels are capitalised and are not a persisted form.
        assert_eq!(Period::decode("Week"), Period::Day);
    }

    #[test]
    fn display_name_is_singular_only_for_exactly_one() {
        assert_eq!(Unit::Pipette.display_name(1.0), "drop");
        assert_eq!(Unit::Pipette.display_name(0.0), "drops");
        assert_eq!(Unit::Pipette.display_name(1.5), "drops");
        assert_eq!(Unit::Tablespoon.display_name(2.0), "tbsps");
        assert_eq!(Period::Week.display_name(1.0), "week");
        assert_eq!(Period::Hour.display_name(14.0), "hours");
    }
}
