//! Per-report run distance derived from a vehicle's odometer history.

use crate::models::report::TripReport;
use serde::Serialize;

/// Non-fatal data problems found while annotating a vehicle's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataIntegrityWarning {
    /// The stored reading was missing or not a number; `0` was used.
    UnreadableOdometer,
    /// The reading is lower than the previous one (rollback or typo).
    NegativeRun,
}

impl DataIntegrityWarning {
    pub fn label(&self) -> &'static str {
        match self {
            DataIntegrityWarning::UnreadableOdometer => "odometer unreadable",
            DataIntegrityWarning::NegativeRun => "odometer went backwards",
        }
    }
}

/// A report in chronological position, with its derived run distance.
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedReport {
    pub report: TripReport,
    /// Reading used for the computation (`0` when unreadable).
    pub odometer_km: i64,
    pub run_km: i64,
    pub warnings: Vec<DataIntegrityWarning>,
}

impl AnnotatedReport {
    pub fn is_flagged(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has_readable_odometer(&self) -> bool {
        !self
            .warnings
            .contains(&DataIntegrityWarning::UnreadableOdometer)
    }
}

/// Order a vehicle's reports chronologically and derive `run_km` for each.
///
/// Ordering is ascending by date, then by id, whatever the input order.
/// The oldest report has no previous reading and its run equals its own
/// reading. Every later report runs `reading - previous reading`; negative
/// values are kept and flagged. The result is always oldest first; reverse
/// it for newest-first display.
pub fn compute_run_distances(reports: &[TripReport]) -> Vec<AnnotatedReport> {
    let mut sorted: Vec<&TripReport> = reports.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let mut previous: Option<i64> = None;
    let mut out = Vec::with_capacity(sorted.len());

    for report in sorted {
        let mut warnings = Vec::new();

        let odometer_km = match report.last_odometer_km {
            Some(km) => km,
            None => {
                warnings.push(DataIntegrityWarning::UnreadableOdometer);
                0
            }
        };

        let run_km = match previous {
            None => odometer_km,
            Some(prev) => odometer_km - prev,
        };

        if run_km < 0 {
            warnings.push(DataIntegrityWarning::NegativeRun);
            tracing::debug!(
                report_id = report.id,
                vehicle_id = report.vehicle_id,
                run_km,
                "negative run distance"
            );
        }

        previous = Some(odometer_km);

        out.push(AnnotatedReport {
            report: report.clone(),
            odometer_km,
            run_km,
            warnings,
        });
    }

    out
}

/// Highest readable reading in an annotated history.
pub fn current_odometer(annotated: &[AnnotatedReport]) -> Option<i64> {
    annotated
        .iter()
        .filter(|a| a.has_readable_odometer())
        .map(|a| a.odometer_km)
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn report(id: i64, day: u32, km: Option<i64>) -> TripReport {
        let mut r = TripReport::new(1, 1, NaiveDate::from_ymd_opt(2025, 4, day).unwrap(), 0);
        r.id = id;
        r.last_odometer_km = km;
        r
    }

    fn runs(annotated: &[AnnotatedReport]) -> Vec<i64> {
        annotated.iter().map(|a| a.run_km).collect()
    }

    fn ids(annotated: &[AnnotatedReport]) -> Vec<i64> {
        annotated.iter().map(|a| a.report.id).collect()
    }

    #[test]
    fn first_run_equals_reading() {
        let reports = vec![
            report(1, 1, Some(100)),
            report(2, 2, Some(250)),
            report(3, 3, Some(400)),
        ];
        let out = compute_run_distances(&reports);
        assert_eq!(runs(&out), vec![100, 150, 150]);
        assert!(out.iter().all(|a| !a.is_flagged()));
    }

    #[test]
    fn rollback_is_preserved_and_flagged() {
        let reports = vec![report(1, 1, Some(300)), report(2, 2, Some(200))];
        let out = compute_run_distances(&reports);
        assert_eq!(runs(&out), vec![300, -100]);
        assert_eq!(out[1].warnings, vec![DataIntegrityWarning::NegativeRun]);
    }

    #[test]
    fn descending_input_gives_same_result_as_ascending() {
        let asc = vec![
            report(1, 1, Some(1000)),
            report(2, 5, Some(1040)),
            report(3, 9, Some(1100)),
        ];
        let mut desc = asc.clone();
        desc.reverse();

        let a = compute_run_distances(&asc);
        let d = compute_run_distances(&desc);
        assert_eq!(runs(&a), runs(&d));
        assert_eq!(ids(&a), ids(&d));
        assert_eq!(runs(&d), vec![1000, 40, 60]);
    }

    #[test]
    fn every_permutation_orders_the_same() {
        let base = vec![
            report(7, 3, Some(500)),
            report(2, 1, Some(100)),
            report(5, 3, Some(450)),
            report(9, 2, Some(300)),
        ];
        let expected = compute_run_distances(&base);

        let perms: [[usize; 4]; 6] = [
            [0, 1, 2, 3],
            [3, 2, 1, 0],
            [1, 3, 0, 2],
            [2, 0, 3, 1],
            [1, 0, 2, 3],
            [3, 1, 2, 0],
        ];
        for p in perms {
            let shuffled: Vec<TripReport> = p.iter().map(|&i| base[i].clone()).collect();
            let out = compute_run_distances(&shuffled);
            assert_eq!(ids(&out), ids(&expected));
            assert_eq!(runs(&out), runs(&expected));
        }
        // same date (day 3): id 5 before id 7
        assert_eq!(ids(&expected), vec![2, 9, 5, 7]);
        assert_eq!(runs(&expected), vec![100, 200, 150, 50]);
    }

    #[test]
    fn unreadable_reading_counts_as_zero_and_is_flagged() {
        let reports = vec![
            report(1, 1, Some(100)),
            report(2, 2, None),
            report(3, 3, Some(180)),
        ];
        let out = compute_run_distances(&reports);
        assert_eq!(out[1].odometer_km, 0);
        assert!(
            out[1]
                .warnings
                .contains(&DataIntegrityWarning::UnreadableOdometer)
        );
        assert!(out[1].warnings.contains(&DataIntegrityWarning::NegativeRun));
        assert_eq!(runs(&out), vec![100, -100, 180]);
        assert_eq!(current_odometer(&out), Some(180));
    }

    #[test]
    fn empty_history() {
        let out = compute_run_distances(&[]);
        assert!(out.is_empty());
        assert_eq!(current_odometer(&out), None);
    }
}
