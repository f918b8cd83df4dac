use serde::{Deserialize, Serialize};

/// A registered vehicle.
///
/// `element_change_parity` alternates on every committed oil change:
/// `1` means the last oil change skipped the filter element, so the next
/// one must replace it; `0` means the element was replaced last time.
///
/// `last_known_km` is a cache of the latest odometer reading. It is kept in
/// sync on report writes when possible, but the report history is the only
/// authority (see `core::ledger::detect_drift`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub oil_change_baseline_km: i64,
    #[serde(default)]
    pub element_change_parity: u8,
    #[serde(default)]
    pub last_known_km: i64,
    #[serde(default)]
    pub created_at: String,
}

impl Vehicle {
    pub fn new(name: &str, oil_change_baseline_km: i64, element_changed: bool) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
            oil_change_baseline_km,
            element_change_parity: Self::parity_from_element_changed(element_changed),
            last_known_km: 0,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// Whether the filter element was replaced at the last oil change.
    pub fn element_changed(&self) -> bool {
        self.element_change_parity == 0
    }

    pub fn parity_from_element_changed(changed: bool) -> u8 {
        if changed { 0 } else { 1 }
    }
}
