//! Fixed field schema shared by display, search, and edit.
//!
//! Every contact carries exactly the six fields of [`Field::ALL`]. The
//! canonical labels double as the JSON keys of the backing file, so they
//! must never change.
//!
//! # Name normalization
//!
//! Users type field names free-form. Input is trimmed, the first character
//! upper-cased and the rest lower-cased before matching against the
//! canonical labels, so `"рабочий ТЕЛЕФОН"` selects [`Field::WorkPhone`].

use std::str::FromStr;

use crate::error::Error;

/// JSON key of the optional last-updated timestamp.
pub const LAST_UPDATED_LABEL: &str = "Обновлен";

/// Placeholder shown for contacts that were never edited.
pub const NOT_UPDATED: &str = "Не обновлялся";

/// `chrono` format of the last-updated timestamp (`DD/MM/YYYY HH:MM`).
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

// ============================================================================
// Field enum
// ============================================================================

/// One of the six required contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Фамилия
    LastName,
    /// Имя
    FirstName,
    /// Отчество
    MiddleName,
    /// Организация
    Organization,
    /// Рабочий телефон
    WorkPhone,
    /// Личный телефон
    PersonalPhone,
}

impl Field {
    /// All fields in canonical order.
    pub const ALL: [Field; 6] = [
        Field::LastName,
        Field::FirstName,
        Field::MiddleName,
        Field::Organization,
        Field::WorkPhone,
        Field::PersonalPhone,
    ];

    /// Canonical label, also used as the JSON key.
    pub fn label(self) -> &'static str {
        match self {
            Self::LastName => "Фамилия",
            Self::FirstName => "Имя",
            Self::MiddleName => "Отчество",
            Self::Organization => "Организация",
            Self::WorkPhone => "Рабочий телефон",
            Self::PersonalPhone => "Личный телефон",
        }
    }

    /// Prompt shown when collecting this field for a new contact.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::LastName => "Введите фамилию: ",
            Self::FirstName => "Введите имя: ",
            Self::MiddleName => "Введите отчество: ",
            Self::Organization => "Введите название организации: ",
            Self::WorkPhone => "Введите рабочий телефон: ",
            Self::PersonalPhone => "Введите личный телефон: ",
        }
    }

    /// Resolve a user-typed field name.
    ///
    /// Returns `None` when the normalized name matches no canonical label.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = normalize_name(name);
        Self::ALL.into_iter().find(|f| f.label() == normalized)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| Error::unknown_field(s.trim()))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Normalize a field name: trim, upper-case the first character and
/// lower-case the rest.
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.trim().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Comma-separated list of all canonical labels.
pub fn field_list() -> String {
    Field::ALL
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}
