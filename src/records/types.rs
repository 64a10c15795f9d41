use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type RecordId = String;

pub const RECORD_ID_PREFIX: &str = "dtc_";
pub const RECORD_ID_SUFFIX_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Vehicle,
    Student,
    Credential,
    PilotCredential,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vehicle => "vehicle",
            Self::Student => "student",
            Self::Credential => "credential",
            Self::PilotCredential => "pilot_credential",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Vehicle => "vehicle title",
            Self::Student => "diploma",
            Self::Credential => "credential",
            Self::PilotCredential => "pilot certificate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    #[serde(default)]
    pub size_bytes: Option<usize>,
}

/// Per-flow scratch buffer: cleaned field values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Draft {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.fields.remove(key);
    }

    /// Field value or a placeholder for summaries.
    pub fn display(&self, key: &str) -> &str {
        self.get(key).unwrap_or("not provided")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogbookEntry {
    pub entry: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub hash: String,
    pub created_at: String,
    #[serde(default)]
    pub uploaded_files: Vec<UploadedFile>,
    pub logbook: Vec<LogbookEntry>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Record {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Headline shown on dtc and vault cards.
    pub fn title(&self) -> String {
        match self.kind {
            RecordKind::Vehicle => {
                let parts: Vec<&str> = ["year", "make", "model"]
                    .iter()
                    .filter_map(|key| self.field(key))
                    .collect();
                if parts.is_empty() {
                    "Vehicle".to_string()
                } else {
                    parts.join(" ")
                }
            }
            RecordKind::Student => match (self.field("degree"), self.field("school")) {
                (Some(degree), Some(school)) => format!("{degree}, {school}"),
                (Some(degree), None) => degree.to_string(),
                (None, Some(school)) => school.to_string(),
                (None, None) => "Diploma".to_string(),
            },
            RecordKind::Credential => self.field("name").unwrap_or("Credential").to_string(),
            RecordKind::PilotCredential => self
                .field("certificateType")
                .unwrap_or("Pilot Certificate")
                .to_string(),
        }
    }

    pub fn subtitle(&self) -> String {
        match self.kind {
            RecordKind::Vehicle => match (self.field("vin"), self.field("mileage")) {
                (Some(vin), Some(miles)) => format!("VIN {vin} · {miles} mi"),
                (Some(vin), None) => format!("VIN {vin}"),
                (None, Some(miles)) => format!("{miles} mi"),
                (None, None) => String::new(),
            },
            RecordKind::Student => {
                let field = self.field("fieldOfStudy").unwrap_or_default();
                match self.field("graduationYear") {
                    Some(year) if !field.is_empty() => format!("{field} · Class of {year}"),
                    Some(year) => format!("Class of {year}"),
                    None => field.to_string(),
                }
            }
            RecordKind::Credential => self.field("issuer").unwrap_or_default().to_string(),
            RecordKind::PilotCredential => self
                .field("certificateNumber")
                .map(|number| format!("Certificate #{number}"))
                .unwrap_or_default(),
        }
    }
}
