use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: String,
}

impl Driver {
    pub fn new(name: &str) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }
}
