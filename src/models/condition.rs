use serde::{Deserialize, Serialize};

/// Vehicle condition noted at the end of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    #[default]
    Good,
    Issue,
}

impl Condition {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            Condition::Good => "good",
            Condition::Issue => "issue",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "good" => Some(Condition::Good),
            "issue" => Some(Condition::Issue),
            _ => None,
        }
    }

    pub fn is_issue(&self) -> bool {
        matches!(self, Condition::Issue)
    }
}
