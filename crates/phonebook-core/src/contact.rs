//! Contact record type.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::schema::{Field, NOT_UPDATED, TIMESTAMP_FORMAT};

/// One directory entry: six required text fields and an optional
/// last-updated stamp.
///
/// Field order in this struct is the key order of the backing file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    #[serde(rename = "Фамилия")]
    last_name: String,

    #[serde(rename = "Имя")]
    first_name: String,

    #[serde(rename = "Отчество")]
    middle_name: String,

    #[serde(rename = "Организация")]
    organization: String,

    #[serde(rename = "Рабочий телефон")]
    work_phone: String,

    #[serde(rename = "Личный телефон")]
    personal_phone: String,

    #[serde(rename = "Обновлен", default, skip_serializing_if = "Option::is_none")]
    updated: Option<String>,
}

impl Contact {
    /// Creates a never-edited contact from the six field values.
    pub fn new(
        last_name: impl Into<String>,
        first_name: impl Into<String>,
        middle_name: impl Into<String>,
        organization: impl Into<String>,
        work_phone: impl Into<String>,
        personal_phone: impl Into<String>,
    ) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
            middle_name: middle_name.into(),
            organization: organization.into(),
            work_phone: work_phone.into(),
            personal_phone: personal_phone.into(),
            updated: None,
        }
    }

    /// Returns the value of a schema field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::LastName => &self.last_name,
            Field::FirstName => &self.first_name,
            Field::MiddleName => &self.middle_name,
            Field::Organization => &self.organization,
            Field::WorkPhone => &self.work_phone,
            Field::PersonalPhone => &self.personal_phone,
        }
    }

    /// Overwrites a schema field. Does not touch the timestamp.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::LastName => &mut self.last_name,
            Field::FirstName => &mut self.first_name,
            Field::MiddleName => &mut self.middle_name,
            Field::Organization => &mut self.organization,
            Field::WorkPhone => &mut self.work_phone,
            Field::PersonalPhone => &mut self.personal_phone,
        };
        *slot = value.into();
    }

    /// Last-updated stamp, if the contact was ever edited.
    pub fn updated(&self) -> Option<&str> {
        self.updated.as_deref()
    }

    /// Stamps the contact as updated at `now`.
    pub fn touch(&mut self, now: NaiveDateTime) {
        self.updated = Some(now.format(TIMESTAMP_FORMAT).to_string());
    }
}

impl std::fmt::Display for Contact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "ФИО: {} {} {}",
            self.last_name, self.first_name, self.middle_name
        )?;
        writeln!(f, "{}: {}", Field::Organization, self.organization)?;
        writeln!(f, "{}: {}", Field::WorkPhone, self.work_phone)?;
        writeln!(f, "{}: {}", Field::PersonalPhone, self.personal_phone)?;
        write!(f, "Обновление: {}", self.updated().unwrap_or(NOT_UPDATED))
    }
}
