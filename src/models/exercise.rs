use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{FromSqliteRow, WeightUnit};

/// How an exercise is loaded. Drives the weight increment a set input
/// should step by, which differs between machines and free weights in lbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentType {
    FreeWeight,
    Machine,
    Bodyweight,
}

impl EquipmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::FreeWeight => "free-weight",
            EquipmentType::Machine => "machine",
            EquipmentType::Bodyweight => "bodyweight",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free-weight" => Some(EquipmentType::FreeWeight),
            "machine" => Some(EquipmentType::Machine),
            "bodyweight" => Some(EquipmentType::Bodyweight),
            _ => None,
        }
    }

    /// Weight change for a single +/- step in the given unit. Kilogram
    /// plates move in 1s; pound stacks move in 5s on machines and 2.5s
    /// elsewhere.
    pub fn weight_step(&self, unit: WeightUnit) -> f64 {
        match unit {
            WeightUnit::Kg => 1.0,
            WeightUnit::Lbs => match self {
                EquipmentType::Machine => 5.0,
                _ => 2.5,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    pub muscle_group: Option<String>,
    pub equipment_type: Option<EquipmentType>,
    /// User-added rather than part of the preset catalog. Only custom
    /// exercises can be deleted.
    pub is_custom: bool,
    /// Tracked as independent left/right limb reps instead of one shared
    /// count.
    pub is_isolation: bool,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let equipment: Option<String> = row.get("equipment_type")?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            muscle_group: row.get("muscle_group")?,
            equipment_type: equipment.as_deref().and_then(EquipmentType::parse),
            is_custom: row.get("is_custom")?,
            is_isolation: row.get("is_isolation")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_type_round_trip() {
        for et in [
            EquipmentType::FreeWeight,
            EquipmentType::Machine,
            EquipmentType::Bodyweight,
        ] {
            assert_eq!(EquipmentType::parse(et.as_str()), Some(et));
        }
        assert_eq!(EquipmentType::parse("cables"), None);
        assert_eq!(EquipmentType::parse(""), None);
    }

    #[test]
    fn test_weight_step() {
        assert_eq!(
            EquipmentType::FreeWeight.weight_step(WeightUnit::Kg),
            1.0
        );
        assert_eq!(EquipmentType::Machine.weight_step(WeightUnit::Lbs), 5.0);
        assert_eq!(
            EquipmentType::FreeWeight.weight_step(WeightUnit::Lbs),
            2.5
        );
        assert_eq!(
            EquipmentType::Bodyweight.weight_step(WeightUnit::Lbs),
            2.5
        );
    }
}
