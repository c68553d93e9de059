use serde::{Deserialize, Serialize};

use crate::domain::validation::{Validate, ValidationIssue};

// Summary returned after a spreadsheet import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub groups_created: u32,
    pub categories_created: u32,
    pub activities_created: u32,
    pub errors: Vec<String>,
}

impl Validate for ImportResponse {
    fn validate(&self) -> Result<(), ValidationIssue> {
        Ok(())
    }
}

// File selected for upload; kept in memory so the request can be replayed.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
