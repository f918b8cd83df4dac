use super::condition::Condition;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// One daily trip report for a vehicle.
///
/// `vehicle_id` and `driver_id` are weak references: the referenced rows
/// may have been deleted and lookups must tolerate that.
///
/// `last_odometer_km` is `None` when the stored reading is missing or not a
/// number. The ledger treats it as `0` and flags the row.
///
/// `run_km` is the value computed when the row was last written. Display
/// code never trusts it and recomputes through the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripReport {
    pub id: i64,
    pub vehicle_id: i64,
    pub driver_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, deserialize_with = "lenient_km")]
    pub last_odometer_km: Option<i64>,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub issue_detail: Option<String>,
    #[serde(default)]
    pub run_km: Option<i64>,
    #[serde(default)]
    pub created_at: String,
}

impl TripReport {
    pub fn new(vehicle_id: i64, driver_id: i64, date: NaiveDate, last_odometer_km: i64) -> Self {
        Self {
            id: 0,
            vehicle_id,
            driver_id,
            date,
            site_name: String::new(),
            destination: String::new(),
            last_odometer_km: Some(last_odometer_km),
            condition: Condition::Good,
            issue_detail: None,
            run_km: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    /// Set condition and detail together. A `good` condition always clears
    /// the detail; an empty detail is stored as `None`.
    pub fn set_condition(&mut self, condition: Condition, detail: Option<String>) {
        self.condition = condition;
        self.issue_detail = match condition {
            Condition::Good => None,
            Condition::Issue => detail
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        };
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Accept integers, floats and numeric strings; anything else becomes `None`.
fn lenient_km<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TripReport {
        TripReport::new(1, 1, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), 1200)
    }

    #[test]
    fn good_condition_clears_issue_detail() {
        let mut r = sample();
        r.set_condition(Condition::Issue, Some("brake noise".into()));
        assert_eq!(r.issue_detail.as_deref(), Some("brake noise"));

        r.set_condition(Condition::Good, Some("ignored".into()));
        assert_eq!(r.condition, Condition::Good);
        assert!(r.issue_detail.is_none());
    }

    #[test]
    fn blank_issue_detail_is_none() {
        let mut r = sample();
        r.set_condition(Condition::Issue, Some("   ".into()));
        assert!(r.issue_detail.is_none());
    }

    #[test]
    fn lenient_odometer_parsing() {
        let json = r#"[
            {"id":1,"vehicleId":1,"driverId":1,"date":"2025-03-01","lastOdometerKm":"420"},
            {"id":2,"vehicleId":1,"driverId":1,"date":"2025-03-02","lastOdometerKm":"n/a"},
            {"id":3,"vehicleId":1,"driverId":1,"date":"2025-03-03","lastOdometerKm":515.0},
            {"id":4,"vehicleId":1,"driverId":1,"date":"2025-03-04"}
        ]"#;
        let reports: Vec<TripReport> = serde_json::from_str(json).unwrap();
        let km: Vec<Option<i64>> = reports.iter().map(|r| r.last_odometer_km).collect();
        assert_eq!(km, vec![Some(420), None, Some(515), None]);
    }
}
