//! Google People API request models.
//!
//! These types shape the `people:createContact` body and the sparse
//! field bag users configure. They are internal to the Google
//! Contacts node.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::{NodeError, NodeResult};

/// Every person field the People API can return; the `*` selector in
/// a `fields` parameter expands to this list.
pub const ALL_PERSON_FIELDS: &[&str] = &[
    "addresses",
    "biographies",
    "birthdays",
    "coverPhotos",
    "emailAddresses",
    "events",
    "genders",
    "imClients",
    "interests",
    "locales",
    "memberships",
    "metadata",
    "names",
    "nicknames",
    "occupations",
    "organizations",
    "phoneNumbers",
    "photos",
    "relations",
    "residences",
    "sipAddresses",
    "skills",
    "urls",
    "userDefined",
];

/// A calendar date split into the separate string components the
/// People API expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateComponents {
    /// Zero-padded day of month, e.g. "15".
    pub day: String,
    /// Zero-padded month, e.g. "05".
    pub month: String,
    /// Four-digit year, e.g. "1990".
    pub year: String,
}

/// Reformat a free-form date string into [`DateComponents`].
///
/// Accepts ISO dates (`1990-05-15`), RFC 3339 timestamps, and
/// US-style `05/15/1990`.
pub fn split_date(input: &str) -> NodeResult<DateComponents> {
    let date = parse_date(input).ok_or_else(|| NodeError::InvalidDate(input.to_string()))?;
    Ok(DateComponents {
        day: date.format("%d").to_string(),
        month: date.format("%m").to_string(),
        year: date.format("%Y").to_string(),
    })
}

fn parse_date(input: &str) -> Option<chrono::NaiveDate> {
    let input = input.trim();
    if let Ok(date) = chrono::NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    chrono::NaiveDate::parse_from_str(input, "%m/%d/%Y").ok()
}

/// A dated event attached to a contact (anniversary etc.).
#[derive(Debug, Clone, Deserialize)]
pub struct ContactEvent {
    /// Free-form date string, split before it goes on the wire.
    pub date: String,
    /// Event type tag (e.g. "anniversary").
    #[serde(rename = "type")]
    pub event_type: String,
}

/// Sparse optional attributes of `contact.create`.
///
/// Keys the user configured are forwarded to the request body; absent
/// keys are omitted entirely.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactFields {
    pub middle_name: Option<String>,
    /// Company/organization entries, forwarded as `organizations`.
    pub companies: Option<Vec<Value>>,
    /// Phone entries, forwarded as `phoneNumbers`.
    pub phones: Option<Vec<Value>>,
    pub addresses: Option<Vec<Value>>,
    pub relations: Option<Vec<Value>>,
    /// Dated events; each date is split into day/month/year components.
    pub events: Option<Vec<ContactEvent>>,
    /// Birthday date string, split like event dates.
    pub birthday: Option<String>,
    /// Email entries, forwarded as `emailAddresses`.
    pub emails: Option<Vec<Value>>,
    /// Plain-text biography.
    pub biography: Option<String>,
    /// User-defined key/value entries, forwarded as `userDefined`.
    pub custom_fields: Option<Vec<Value>>,
    /// Contact group resource names, forwarded as `memberships`.
    pub groups: Option<Vec<String>>,
}

/// Listing options of `contact.get_all`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListOptions {
    /// Connection sort order (e.g. "LAST_MODIFIED_DESCENDING").
    pub sort_order: Option<String>,
}

/// A contact group presented as a selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOption {
    /// Display name of the group.
    pub name: String,
    /// The group's `resourceName`, used as the option value.
    pub value: String,
}
