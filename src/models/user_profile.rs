use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "lbs" => WeightUnit::Lbs,
            _ => WeightUnit::Kg,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            WeightUnit::Kg => WeightUnit::Lbs,
            WeightUnit::Lbs => WeightUnit::Kg,
        }
    }
}

/// The single local profile. One row per install, at a fixed id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub weight_unit: WeightUnit,
}

impl FromSqliteRow for UserProfile {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let unit: String = row.get("weight_unit")?;
        Ok(Self {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            weight_unit: WeightUnit::parse(&unit),
        })
    }
}
