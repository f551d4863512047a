//! Knowledge store schema and record types

use serde::{Deserialize, Serialize};

/// SQL schema for initialization
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS rooms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    "type" TEXT NOT NULL,
    description TEXT NOT NULL,
    price REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS packages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    details TEXT NOT NULL,
    price REAL NOT NULL
);
"#;

/// Room record as exposed to the prompt (internal id projected out)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub price: f64,
}

#[allow(dead_code)] // Used in tests
impl RoomRecord {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            price,
        }
    }
}

/// Package record as exposed to the prompt (internal id projected out)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub details: String,
    pub price: f64,
}

#[allow(dead_code)] // Used in tests
impl PackageRecord {
    pub fn new(name: impl Into<String>, details: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
            price,
        }
    }
}

/// Seed file contents: `{"rooms": [...], "packages": [...]}`
#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeSeed {
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    #[serde(default)]
    pub packages: Vec<PackageRecord>,
}
