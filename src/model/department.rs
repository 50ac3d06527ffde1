use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Department {
    Hr,
    Iot,
    Software,
    Financial,
    Business,
}

impl Department {
    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().to_lowercase().parse().ok()
    }
}
