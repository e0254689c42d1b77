//! Record types for the CCB `individual_search` response.
//!
//! The structs deserialize from the XML envelope (attributes are read through
//! `@name` keys) and serialize to JSON using the same snake_case names, so an
//! attribute and an element look identical on the JSON side. Every field is
//! optional; blank values are read as absent and skipped on output.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Envelope ============

/// Top-level `<ccb_api>` document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<Request>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
}

/// Echo of the parameters CCB received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    #[serde(
        deserialize_with = "argument_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub parameters: Option<Vec<Argument>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Argument {
    #[serde(
        rename(deserialize = "@name"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        rename(deserialize = "@value"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub service_action: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// API-level errors CCB reports inside a successful HTTP response.
    #[serde(deserialize_with = "error_list", skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ApiError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individuals: Option<Individuals>,
}

/// `<error number=".." type="..">message</error>`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiError {
    #[serde(
        rename(deserialize = "@number"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<String>,
    #[serde(
        rename(serialize = "type", deserialize = "@type"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub error_type: Option<String>,
    #[serde(
        rename(deserialize = "$text"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

/// Search results: the reported `count` and at most one individual.
///
/// When CCB lists several matches only the first is kept; `count` still
/// carries the remote total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndividualsXml")]
pub struct Individuals {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<Individual>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct IndividualsXml {
    #[serde(rename = "@count", deserialize_with = "text")]
    count: Option<String>,
    individual: Vec<Individual>,
}

impl From<IndividualsXml> for Individuals {
    fn from(xml: IndividualsXml) -> Self {
        let total = xml.individual.len();
        if total > 1 {
            tracing::debug!("CCB returned {} individuals, keeping the first", total);
        }

        Self {
            count: xml.count,
            individual: xml.individual.into_iter().next(),
        }
    }
}

// ============ Individual ============

/// One person record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Individual {
    #[serde(
        rename(deserialize = "@id"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub sync_id: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub other_id: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub giving_number: Option<String>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub campus: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub family: Option<Reference>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub family_image: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub family_position: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub family_members: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub legal_first_name: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub salutation: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub confirmed_no_allergies: Option<String>,
    #[serde(deserialize_with = "address_list", skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<Address>>,
    #[serde(deserialize_with = "phone_list", skip_serializing_if = "Option::is_none")]
    pub phones: Option<Vec<Phone>>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub mobile_carrier: Option<Reference>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub anniversary: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub baptized: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub deceased: Option<String>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<Reference>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub membership_date: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub membership_end: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub receive_email_from_church: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub default_new_group_messages: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub default_new_group_comments: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub default_new_group_digest: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub default_new_group_sms: Option<String>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub privacy_settings: Option<PrivacySettings>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub active: Option<String>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub creator: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Reference>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub user_defined_text_fields: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub user_defined_date_fields: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub user_defined_pulldown_fields: Option<String>,
}

/// Foreign key to another CCB entity (campus, family, carrier, ...).
///
/// Only the identifier is kept; it is never resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    #[serde(
        rename(deserialize = "@id"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
}

impl Reference {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(
        rename(serialize = "type", deserialize = "@type"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub address_type: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub line_1: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub line_2: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    #[serde(
        rename(deserialize = "@code"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phone {
    #[serde(
        rename(serialize = "type", deserialize = "@type"),
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone_type: Option<String>,
}

/// Visibility flags, each keyed by the id of the privacy level it uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacySettings {
    #[serde(deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub profile_listed: Option<String>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub mailing_address: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub home_address: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub home_phone: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub work_phone: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub emergency_phone: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub birthday: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub anniversary: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub gender: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub user_defined_fields: Option<Reference>,
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Reference>,
}

// ============ Field helpers ============

/// Records that serialize to nothing when every field is absent.
trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for Reference {
    fn is_blank(&self) -> bool {
        self.id.is_none()
    }
}

impl Blank for Country {
    fn is_blank(&self) -> bool {
        self.code.is_none()
    }
}

impl Blank for PrivacySettings {
    fn is_blank(&self) -> bool {
        *self == PrivacySettings::default()
    }
}

/// Reads a nested record, dropping it when it carries no values.
fn non_blank<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Blank,
{
    Ok(Option::<T>::deserialize(deserializer)?.filter(|value| !value.is_blank()))
}

/// Reads the text of an attribute or a leaf element.
///
/// Surrounding whitespace is trimmed and whitespace-only text counts as
/// absent. Child elements the schema does not describe are skipped so
/// unexpected nesting never fails the document.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = deserializer.deserialize_any(TextVisitor)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

struct TextVisitor;

impl<'de> Visitor<'de> for TextVisitor {
    type Value = Option<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("text content")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(Some(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut text: Option<String> = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == "$text" {
                let part: String = map.next_value()?;
                text.get_or_insert_with(String::new).push_str(&part);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(text)
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ArgumentList {
    argument: Vec<Argument>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct AddressList {
    address: Vec<Address>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PhoneList {
    phone: Vec<Phone>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ErrorList {
    error: Vec<ApiError>,
}

// A present wrapper element always yields a list, even an empty one, so
// `<addresses/>` and a missing `<addresses>` stay distinguishable.

fn argument_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<Argument>>, D::Error> {
    Ok(Some(ArgumentList::deserialize(d)?.argument))
}

fn address_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<Address>>, D::Error> {
    Ok(Some(AddressList::deserialize(d)?.address))
}

fn phone_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<Phone>>, D::Error> {
    Ok(Some(PhoneList::deserialize(d)?.phone))
}

fn error_list<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<ApiError>>, D::Error> {
    Ok(Some(ErrorList::deserialize(d)?.error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_serializes_id_only() {
        let value = serde_json::to_value(Reference::new("42")).unwrap();
        assert_eq!(value, json!({"id": "42"}));
    }

    #[test]
    fn test_type_attributes_serialize_as_type() {
        let address = Address {
            address_type: Some("mailing".to_string()),
            city: Some("Springfield".to_string()),
            ..Default::default()
        };
        let phone = Phone {
            phone_type: Some("mobile".to_string()),
        };

        assert_eq!(
            serde_json::to_value(address).unwrap(),
            json!({"type": "mailing", "city": "Springfield"})
        );
        assert_eq!(serde_json::to_value(phone).unwrap(), json!({"type": "mobile"}));
    }

    #[test]
    fn test_empty_individual_serializes_empty_object() {
        let value = serde_json::to_value(Individual::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_blank_privacy_settings() {
        assert!(PrivacySettings::default().is_blank());
        let settings = PrivacySettings {
            birthday: Some(Reference::new("3")),
            ..Default::default()
        };
        assert!(!settings.is_blank());
    }
}
