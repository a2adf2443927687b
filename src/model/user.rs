use serde::{Deserialize, Serialize};

use crate::errors::CrmError;

/// User attribute names as stored.
pub mod fields {
    pub const MODEL_TYPE: &str = "Model_Type";
    pub const STAGE_NAME: &str = "Stage_Name";
    pub const MODEL_INSTA_LINK: &str = "Model_Insta_Link";
    pub const EMAIL_ADDRESS: &str = "Email_Address";
    pub const PHOTOGRAPHER_INSTA_LINK: &str = "Photographer_Insta_Link";
    pub const MUA_STAGE_NAME: &str = "Mua_Stage_Name";
    pub const MUA_INSTA_LINK: &str = "Mua_Insta_link";
    pub const PHONE_NUMBER_2: &str = "Phone_Number_2";
    pub const EMAIL_ADDRESS_2: &str = "Email_Address_2";
    pub const COUNTRY: &str = "Country";
    pub const DATE_OF_BIRTH: &str = "Date_Of_Birth";
}

use fields::*;

/// The fields the users listing searches over. `Email_Address_2` is
/// deliberately absent: only the primary email participates in search.
pub const SEARCHABLE_FIELDS: &[&str] = &[
    MODEL_TYPE,
    STAGE_NAME,
    MODEL_INSTA_LINK,
    EMAIL_ADDRESS,
    PHOTOGRAPHER_INSTA_LINK,
    MUA_STAGE_NAME,
    MUA_INSTA_LINK,
    PHONE_NUMBER_2,
    COUNTRY,
];

/// Every stored attribute except the birth date is a string; the import
/// mapper keys off these two lists.
pub const STRING_FIELDS: &[&str] = &[
    MODEL_TYPE,
    STAGE_NAME,
    MODEL_INSTA_LINK,
    EMAIL_ADDRESS,
    PHOTOGRAPHER_INSTA_LINK,
    MUA_STAGE_NAME,
    MUA_INSTA_LINK,
    PHONE_NUMBER_2,
    EMAIL_ADDRESS_2,
    COUNTRY,
];

pub const DATE_FIELDS: &[&str] = &[DATE_OF_BIRTH];

/// A profile entry describing a person, keyed loosely by email. No
/// referential tie to records exists; association happens at query time by
/// equal email strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "Model_Type", skip_serializing_if = "Option::is_none", default)]
    pub model_type: Option<String>,
    #[serde(rename = "Stage_Name", skip_serializing_if = "Option::is_none", default)]
    pub stage_name: Option<String>,
    #[serde(rename = "Model_Insta_Link", skip_serializing_if = "Option::is_none", default)]
    pub model_insta_link: Option<String>,
    #[serde(rename = "Email_Address", skip_serializing_if = "Option::is_none", default)]
    pub email_address: Option<String>,
    #[serde(rename = "Photographer_Insta_Link", skip_serializing_if = "Option::is_none", default)]
    pub photographer_insta_link: Option<String>,
    #[serde(rename = "Mua_Stage_Name", skip_serializing_if = "Option::is_none", default)]
    pub mua_stage_name: Option<String>,
    #[serde(rename = "Mua_Insta_link", skip_serializing_if = "Option::is_none", default)]
    pub mua_insta_link: Option<String>,
    #[serde(rename = "Phone_Number_2", skip_serializing_if = "Option::is_none", default)]
    pub phone_number_2: Option<String>,
    #[serde(rename = "Email_Address_2", skip_serializing_if = "Option::is_none", default)]
    pub email_address_2: Option<String>,
    #[serde(rename = "Country", skip_serializing_if = "Option::is_none", default)]
    pub country: Option<String>,
    #[serde(rename = "Date_Of_Birth", skip_serializing_if = "Option::is_none", default)]
    pub date_of_birth: Option<bson::DateTime>,
}

impl User {
    pub fn to_document(&self) -> Result<bson::Document, CrmError> {
        Ok(bson::to_document(self)?)
    }
}
