use crate::config::Config;
use crate::core::ledger::{MaintenanceThresholds, VehicleLedger};
use crate::core::status::StatusLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{hint, info, warning};
use crate::utils::colors::{GREEN, RED, YELLOW, color_for_status, paint};
use crate::utils::formatting::bold;
use crate::utils::km2readable;
use crate::utils::table::{Column, Table};

pub fn handle(vehicle: Option<i64>, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;
    let thresholds = MaintenanceThresholds::from(cfg);

    let ledgers = StatusLogic::dashboard(&pool, &thresholds, vehicle)?;
    if ledgers.is_empty() {
        info("No vehicles registered.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Vehicle"),
        Column::right("Odometer"),
        Column::right("Next change"),
        Column::right("Remaining"),
        Column::left("Oil"),
        Column::left("Element"),
    ])
    .with_separator(&cfg.separator_char);

    for l in &ledgers {
        table.add_row(row(l, &thresholds));
    }
    print!("{}", table.render());

    let flagged: usize = ledgers
        .iter()
        .map(|l| l.history.iter().filter(|a| a.is_flagged()).count())
        .sum();
    if flagged > 0 {
        warning(format!(
            "{flagged} reports have odometer problems; see `fleetlog report list`."
        ));
    }

    let drifted = ledgers.iter().filter(|l| l.drift.is_some()).count();
    if drifted > 0 {
        hint(format!(
            "{drifted} cached odometers differ from the report history; run `fleetlog vehicle sync`."
        ));
    }

    Ok(())
}

fn row(l: &VehicleLedger, thresholds: &MaintenanceThresholds) -> Vec<String> {
    let s = &l.status;
    let oil = if s.urgent {
        paint("URGENT", RED)
    } else if s.oil_due {
        paint("due", YELLOW)
    } else {
        paint("ok", GREEN)
    };

    vec![
        l.vehicle.id.to_string(),
        bold(&l.vehicle.name),
        km2readable(l.current_km, false),
        km2readable(
            l.vehicle.oil_change_baseline_km + thresholds.service_interval_km,
            false,
        ),
        paint(&km2readable(s.remaining_km, false), color_for_status(s)),
        oil,
        if s.element_due {
            paint("replace", YELLOW)
        } else {
            "--".into()
        },
    ]
}
