use crate::cli::parser::VehicleCmd;
use crate::config::Config;
use crate::core::lookup::UNKNOWN_VEHICLE;
use crate::core::vehicle::{self, VehicleForm, VehicleLogic};
use crate::db::pool::DbPool;
use crate::db::queries::vehicles;
use crate::errors::AppResult;
use crate::ui::messages::{hint, info, success, warning};
use crate::ui::prompt::confirm_or_yes;
use crate::utils::km2readable;
use crate::utils::table::{Column, Table};

pub fn handle(action: &VehicleCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        VehicleCmd::Add {
            name,
            baseline,
            element_changed,
        } => {
            let form = VehicleForm {
                name: name.clone(),
                baseline_km: *baseline,
                element_changed: Some(*element_changed),
            };
            let v = VehicleLogic::add(&mut pool, &form)?;
            success(format!(
                "Vehicle #{} '{}' registered, last oil change at {}.",
                v.id,
                v.name,
                km2readable(v.oil_change_baseline_km, false)
            ));
        }

        VehicleCmd::Edit {
            id,
            name,
            baseline,
            element_changed,
        } => {
            let form = VehicleForm {
                name: name.clone(),
                baseline_km: *baseline,
                element_changed: *element_changed,
            };
            if form.name.is_none() && form.baseline_km.is_none() && form.element_changed.is_none()
            {
                warning("Nothing to change.");
                return Ok(());
            }
            let v = VehicleLogic::edit(&mut pool, *id, &form)?;
            success(format!("Vehicle #{} '{}' updated.", v.id, v.name));
        }

        VehicleCmd::Del { id, yes } => {
            let v = vehicle::load(&pool, *id)?;
            let prompt = format!(
                "Delete vehicle #{} '{}'? Its reports are kept and will show {}.",
                v.id, v.name, UNKNOWN_VEHICLE
            );
            if !confirm_or_yes(&prompt, *yes) {
                info("Operation cancelled.");
                return Ok(());
            }

            let orphaned = VehicleLogic::delete(&mut pool, *id)?;
            success(format!("Vehicle #{} '{}' has been deleted.", v.id, v.name));
            if orphaned > 0 {
                hint(format!("{orphaned} reports kept without a vehicle."));
            }
        }

        VehicleCmd::List => print_list(&pool, cfg)?,

        VehicleCmd::OilChange { id, odometer } => {
            let v = VehicleLogic::oil_change(&mut pool, *id, *odometer)?;
            success(format!(
                "Oil change recorded for '{}' at {}.",
                v.name,
                km2readable(v.oil_change_baseline_km, false)
            ));
            info(format!(
                "Next oil change at {}{}.",
                km2readable(v.oil_change_baseline_km + cfg.service_interval_km, false),
                if v.element_changed() {
                    ""
                } else {
                    ", with filter element"
                }
            ));
        }

        VehicleCmd::Sync { id } => {
            let repaired = VehicleLogic::sync(&mut pool, *id)?;
            if repaired.is_empty() {
                success("Cached odometers match the report history.");
            }
            for (v, drift) in repaired {
                info(format!(
                    "'{}': {} -> {}",
                    v.name,
                    km2readable(drift.cached_km, false),
                    km2readable(drift.actual_km, false)
                ));
            }
        }
    }

    Ok(())
}

fn print_list(pool: &DbPool, cfg: &Config) -> AppResult<()> {
    let list = vehicles::select_all(&pool.conn)?;
    if list.is_empty() {
        info("No vehicles registered.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::right("Last oil change"),
        Column::left("Element"),
        Column::right("Last reading"),
    ])
    .with_separator(&cfg.separator_char);

    for v in &list {
        table.add_row(vec![
            v.id.to_string(),
            v.name.clone(),
            km2readable(v.oil_change_baseline_km, false),
            if v.element_changed() {
                "replaced".into()
            } else {
                "kept".into()
            },
            km2readable(v.last_known_km, false),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
