use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::decimal;

/// One body-weight measurement. At most one entry exists per user and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyWeightEntry {
    pub id: i64,
    #[serde(deserialize_with = "decimal::number")]
    pub weight: f64, // kg
    pub date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl fmt::Display for BodyWeightEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {:.1} kg", self.date, self.weight)?;
        if !self.notes.is_empty() {
            write!(f, "  ({})", self.notes)?;
        }
        Ok(())
    }
}

/// Body of `POST users/body-weight/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBodyWeight {
    pub weight: f64,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl NewBodyWeight {
    pub fn new(weight: f64, date: NaiveDate) -> Self {
        Self {
            weight,
            date,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_decodes_string_weight() {
        let entry: BodyWeightEntry =
            serde_json::from_str(r#"{"id": 1, "weight": "72.40", "date": "2025-03-02", "notes": ""}"#)
                .unwrap();
        assert_eq!(entry.weight, 72.4);
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
        assert_eq!(format!("{}", entry), "2025-03-02  72.4 kg");
    }

    #[test]
    fn test_new_entry_payload() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let json = serde_json::to_value(NewBodyWeight::new(72.5, date)).unwrap();
        assert_eq!(json, serde_json::json!({"weight": 72.5, "date": "2025-03-02"}));

        let json = serde_json::to_value(NewBodyWeight::new(72.5, date).with_notes("am")).unwrap();
        assert_eq!(json["notes"], "am");
    }
}
