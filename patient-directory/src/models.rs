use serde::{Deserialize, Serialize};

use backend_client::PatientRecord;

/// Patient directory entry used by the selection UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub patient_id: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

impl Patient {
    /// Display name rendered in the pick list
    pub fn display_name(&self) -> String {
        format!("{} {} {}", self.title, self.first_name, self.last_name)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<PatientRecord> for Patient {
    fn from(record: PatientRecord) -> Self {
        Self {
            id: record.id,
            patient_id: record.patient_id,
            title: record.title,
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            email: record.email,
            age: record.age,
            gender: record.gender,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_collapses_missing_title() {
        let patient = Patient {
            id: 1,
            patient_id: "PAT-0001".to_string(),
            title: String::new(),
            first_name: "Anya".to_string(),
            last_name: "Sharma".to_string(),
            phone: "9876543210".to_string(),
            email: None,
            age: None,
            gender: None,
        };
        assert_eq!(patient.display_name(), "Anya Sharma");
    }
}
