mod error_body;
mod form;
mod note;
mod validation;

pub use error_body::{ErrorBody, ErrorMessage};
pub use form::{validate_form, NoteForm, MIN_FORM_DESCRIPTION_LENGTH, MIN_FORM_TITLE_LENGTH};
pub use note::{DeleteAcknowledgement, Note, NoteFields, NoteInput};
pub use validation::{FieldError, ValidationErrors, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};

use chrono::{DateTime, SubsecRound, Utc};

/// Current time at the precision notes are stored and serialized with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(ts: &DateTime<Utc>) -> String {
        ts.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|ts| ts.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }
}
