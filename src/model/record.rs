use bson::Bson;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::errors::CrmError;

/// Record attribute names as stored: the spreadsheet column headers, kept
/// verbatim so imported rows and API payloads share one vocabulary.
pub mod fields {
    pub const ROLE: &str = "I'm Model/Photographer/MUA";
    pub const MAGAZINE: &str = "Magazine";
    pub const CURRENCY: &str = "Currency";
    pub const AMOUNT: &str = "Amount";
    pub const STATUS: &str = "Status";
    pub const PAYMENT_TYPE: &str = "Payment Type";
    pub const PAYMENT_METHOD: &str = "Payment Method";
    pub const FIRST_NAME: &str = "First Name";
    pub const LAST_NAME: &str = "Last Name";
    pub const COUNTRY_CODE: &str = "Country Code";
    pub const EMAIL: &str = "Email";
    pub const PHONE: &str = "Phone";
    pub const ADDRESS: &str = "Address";
    pub const STATE: &str = "State";
    pub const ZIP_CODE: &str = "ZIP Code";
    pub const ORDER_ID: &str = "Order ID";
    pub const PRODUCT: &str = "Product";
    pub const QUANTITY: &str = "Quantity";
    pub const DISCOUNT: &str = "Discount";
    pub const SHIPPING: &str = "Shipping";
    pub const ROLE_ALT: &str = "I Am model/photographer";
    pub const STAGE_NAME: &str = "MODEL: Stage Name";
    pub const MODEL_INSTA_LINK: &str = "Model Insta Link 1";
    pub const EMAIL_ADDRESS: &str = "Email Address";
    pub const PHOTOGRAPHER_INSTA_LINK: &str = "Photographer Insta Link 1";
    pub const MUA_STAGE_NAME: &str = "MUA's : Stage Name";
    pub const MUA_INSTA_LINK: &str = "Mua Insta Link-";
    pub const PHONE_NUMBER: &str = "Phone number";
    pub const COUNTRY: &str = "Country";
    pub const DATE_OF_BIRTH: &str = "Date of Birth";
    pub const NOTES: &str = "Notes";
}

use fields::*;

/// The string-typed attributes, i.e. the fields the free-text search spans.
/// Maintained alongside the schema instead of reflecting over it at runtime.
pub const SEARCHABLE_FIELDS: &[&str] = &[
    ROLE,
    MAGAZINE,
    CURRENCY,
    STATUS,
    PAYMENT_TYPE,
    PAYMENT_METHOD,
    FIRST_NAME,
    LAST_NAME,
    COUNTRY_CODE,
    EMAIL,
    PHONE,
    ADDRESS,
    STATE,
    ZIP_CODE,
    ORDER_ID,
    PRODUCT,
    ROLE_ALT,
    STAGE_NAME,
    MODEL_INSTA_LINK,
    EMAIL_ADDRESS,
    PHOTOGRAPHER_INSTA_LINK,
    MUA_STAGE_NAME,
    MUA_INSTA_LINK,
    PHONE_NUMBER,
    COUNTRY,
    NOTES,
];

pub const NUMERIC_FIELDS: &[&str] = &[AMOUNT, QUANTITY, DISCOUNT, SHIPPING];

pub const DATE_FIELDS: &[&str] = &[DATE_OF_BIRTH];

/// A payment/transaction entry tied to a model, photographer or MUA.
/// Every attribute is optional; the stricter create path goes through
/// [`NewRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "I'm Model/Photographer/MUA", skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    #[serde(rename = "Magazine", skip_serializing_if = "Option::is_none", default)]
    pub magazine: Option<String>,
    #[serde(rename = "Currency", skip_serializing_if = "Option::is_none", default)]
    pub currency: Option<String>,
    #[serde(rename = "Amount", skip_serializing_if = "Option::is_none", default)]
    pub amount: Option<f64>,
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none", default)]
    pub status: Option<String>,
    #[serde(rename = "Payment Type", skip_serializing_if = "Option::is_none", default)]
    pub payment_type: Option<String>,
    #[serde(rename = "Payment Method", skip_serializing_if = "Option::is_none", default)]
    pub payment_method: Option<String>,
    #[serde(rename = "First Name", skip_serializing_if = "Option::is_none", default)]
    pub first_name: Option<String>,
    #[serde(rename = "Last Name", skip_serializing_if = "Option::is_none", default)]
    pub last_name: Option<String>,
    #[serde(rename = "Country Code", skip_serializing_if = "Option::is_none", default)]
    pub country_code: Option<String>,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(rename = "Phone", skip_serializing_if = "Option::is_none", default)]
    pub phone: Option<String>,
    #[serde(rename = "Address", skip_serializing_if = "Option::is_none", default)]
    pub address: Option<String>,
    #[serde(rename = "State", skip_serializing_if = "Option::is_none", default)]
    pub state: Option<String>,
    #[serde(rename = "ZIP Code", skip_serializing_if = "Option::is_none", default)]
    pub zip_code: Option<String>,
    #[serde(rename = "Order ID", skip_serializing_if = "Option::is_none", default)]
    pub order_id: Option<String>,
    #[serde(rename = "Product", skip_serializing_if = "Option::is_none", default)]
    pub product: Option<String>,
    #[serde(rename = "Quantity", skip_serializing_if = "Option::is_none", default)]
    pub quantity: Option<f64>,
    #[serde(rename = "Discount", skip_serializing_if = "Option::is_none", default)]
    pub discount: Option<f64>,
    #[serde(rename = "Shipping", skip_serializing_if = "Option::is_none", default)]
    pub shipping: Option<f64>,
    #[serde(rename = "I Am model/photographer", skip_serializing_if = "Option::is_none", default)]
    pub role_alt: Option<String>,
    #[serde(rename = "MODEL: Stage Name", skip_serializing_if = "Option::is_none", default)]
    pub stage_name: Option<String>,
    #[serde(rename = "Model Insta Link 1", skip_serializing_if = "Option::is_none", default)]
    pub model_insta_link: Option<String>,
    #[serde(rename = "Email Address", skip_serializing_if = "Option::is_none", default)]
    pub email_address: Option<String>,
    #[serde(rename = "Photographer Insta Link 1", skip_serializing_if = "Option::is_none", default)]
    pub photographer_insta_link: Option<String>,
    #[serde(rename = "MUA's : Stage Name", skip_serializing_if = "Option::is_none", default)]
    pub mua_stage_name: Option<String>,
    #[serde(rename = "Mua Insta Link-", skip_serializing_if = "Option::is_none", default)]
    pub mua_insta_link: Option<String>,
    #[serde(rename = "Phone number", skip_serializing_if = "Option::is_none", default)]
    pub phone_number: Option<String>,
    #[serde(rename = "Country", skip_serializing_if = "Option::is_none", default)]
    pub country: Option<String>,
    #[serde(rename = "Date of Birth", skip_serializing_if = "Option::is_none", default)]
    pub date_of_birth: Option<bson::DateTime>,
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none", default)]
    pub notes: Option<String>,
}

impl Record {
    pub fn to_document(&self) -> Result<bson::Document, CrmError> {
        Ok(bson::to_document(self)?)
    }
}

/// Validated create-path input. Only these keys are accepted; `LeadSource`
/// passes validation but is not part of the stored schema and is dropped.
#[derive(Debug, Clone)]
pub struct NewRecord {
    pub first_name: String,
    pub last_name: String,
    pub magazine: String,
    pub amount: f64,
    pub email: String,
    pub model_insta_link: String,
    pub lead_source: Option<String>,
    pub notes: Option<String>,
}

const CREATE_ALLOWED: &[&str] =
    &[FIRST_NAME, LAST_NAME, MAGAZINE, AMOUNT, EMAIL, MODEL_INSTA_LINK, "LeadSource", NOTES];

impl NewRecord {
    /// Validate a raw create body. The first failing field produces the
    /// error message, unknown keys are rejected.
    pub fn from_value(body: &JsonValue) -> Result<Self, CrmError> {
        let obj = body
            .as_object()
            .ok_or_else(|| CrmError::Validation("\"value\" must be of type object".into()))?;
        for key in obj.keys() {
            if !CREATE_ALLOWED.contains(&key.as_str()) {
                return Err(CrmError::Validation(format!("\"{key}\" is not allowed")));
            }
        }
        let first_name = required_string(obj, FIRST_NAME)?;
        let last_name = required_string(obj, LAST_NAME)?;
        let magazine = required_string(obj, MAGAZINE)?;
        let amount = required_number(obj, AMOUNT)?;
        let email = required_string(obj, EMAIL)?;
        if !looks_like_email(&email) {
            return Err(CrmError::Validation(format!("\"{EMAIL}\" must be a valid email")));
        }
        let model_insta_link = required_string(obj, MODEL_INSTA_LINK)?;
        if !looks_like_uri(&model_insta_link) {
            return Err(CrmError::Validation(format!(
                "\"{MODEL_INSTA_LINK}\" must be a valid uri"
            )));
        }
        let lead_source = optional_string(obj, "LeadSource")?;
        let notes = optional_string(obj, NOTES)?;
        Ok(Self { first_name, last_name, magazine, amount, email, model_insta_link, lead_source, notes })
    }

    /// The schema-shaped record that actually gets stored.
    #[must_use]
    pub fn into_record(self) -> Record {
        Record {
            first_name: Some(self.first_name),
            last_name: Some(self.last_name),
            magazine: Some(self.magazine),
            amount: Some(self.amount),
            email: Some(self.email),
            model_insta_link: Some(self.model_insta_link),
            notes: self.notes,
            ..Record::default()
        }
    }
}

/// Reduce a sparse update body to the fields that will actually be applied:
/// keys with null or empty-string values are dropped first (an empty result
/// at that point is an error), then keys outside the schema are silently
/// discarded, and the survivors are type-checked and cast.
pub fn filter_update_fields(body: &JsonMap<String, JsonValue>) -> Result<Vec<(String, Bson)>, CrmError> {
    let present: Vec<(&String, &JsonValue)> = body
        .iter()
        .filter(|(_, v)| !matches!(v, JsonValue::Null) && v.as_str() != Some(""))
        .collect();
    if present.is_empty() {
        return Err(CrmError::InvalidArgument("no valid fields to update".into()));
    }
    let mut out = Vec::with_capacity(present.len());
    for (key, value) in present {
        if let Some(cast) = cast_field(key, value)? {
            out.push((key.clone(), cast));
        }
    }
    Ok(out)
}

/// Cast a single update value to its schema type. `None` for keys that are
/// not part of the schema.
fn cast_field(key: &str, value: &JsonValue) -> Result<Option<Bson>, CrmError> {
    if NUMERIC_FIELDS.contains(&key) {
        let n = match value {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        return match n {
            Some(n) => Ok(Some(Bson::Double(n))),
            None => Err(CrmError::Validation(format!("\"{key}\" must be a number"))),
        };
    }
    if DATE_FIELDS.contains(&key) {
        let parsed = value.as_str().and_then(super::parse_date);
        return match parsed {
            Some(dt) => Ok(Some(Bson::DateTime(dt))),
            None => Err(CrmError::Validation(format!("\"{key}\" must be a valid date"))),
        };
    }
    if SEARCHABLE_FIELDS.contains(&key) {
        return match value {
            JsonValue::String(s) => Ok(Some(Bson::String(s.clone()))),
            _ => Err(CrmError::Validation(format!("\"{key}\" must be a string"))),
        };
    }
    Ok(None)
}

fn required_string(obj: &JsonMap<String, JsonValue>, key: &str) -> Result<String, CrmError> {
    match obj.get(key) {
        None | Some(JsonValue::Null) => {
            Err(CrmError::Validation(format!("\"{key}\" is required")))
        }
        Some(JsonValue::String(s)) if s.is_empty() => {
            Err(CrmError::Validation(format!("\"{key}\" is not allowed to be empty")))
        }
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(_) => Err(CrmError::Validation(format!("\"{key}\" must be a string"))),
    }
}

fn optional_string(obj: &JsonMap<String, JsonValue>, key: &str) -> Result<Option<String>, CrmError> {
    match obj.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) if s.is_empty() => {
            Err(CrmError::Validation(format!("\"{key}\" is not allowed to be empty")))
        }
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(CrmError::Validation(format!("\"{key}\" must be a string"))),
    }
}

fn required_number(obj: &JsonMap<String, JsonValue>, key: &str) -> Result<f64, CrmError> {
    match obj.get(key) {
        None | Some(JsonValue::Null) => {
            Err(CrmError::Validation(format!("\"{key}\" is required")))
        }
        Some(JsonValue::Number(n)) => n
            .as_f64()
            .ok_or_else(|| CrmError::Validation(format!("\"{key}\" must be a number"))),
        // numeric strings convert
        Some(JsonValue::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CrmError::Validation(format!("\"{key}\" must be a number"))),
        Some(_) => Err(CrmError::Validation(format!("\"{key}\" must be a number"))),
    }
}

fn looks_like_email(s: &str) -> bool {
    let mut parts = s.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !s.contains(char::is_whitespace)
        }
        _ => false,
    }
}

fn looks_like_uri(s: &str) -> bool {
    match s.split_once("://") {
        Some((scheme, rest)) => {
            !scheme.is_empty()
                && scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
                && !rest.is_empty()
        }
        None => false,
    }
}
