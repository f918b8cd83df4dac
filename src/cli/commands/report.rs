use super::{parse_date_opt, resolve_driver, resolve_vehicle};
use crate::cli::parser::ReportCmd;
use crate::config::Config;
use crate::core::ledger::AnnotatedReport;
use crate::core::lookup::Directory;
use crate::core::report::{ReportInput, ReportLogic, VehicleReports};
use crate::db::pool::DbPool;
use crate::db::queries::SortOrder;
use crate::db::queries::reports::{self, ReportFilter, TextColumn};
use crate::errors::{AppError, AppResult};
use crate::models::condition::Condition;
use crate::ui::messages::{header, hint, info, success, warning};
use crate::ui::prompt::confirm_or_yes;
use crate::utils::colors::{BOLD_RED, RESET, YELLOW, color_for_run, paint};
use crate::utils::date::parse_period;
use crate::utils::km2readable;
use crate::utils::table::{Column, Table};

pub fn handle(action: &ReportCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        ReportCmd::Add {
            vehicle,
            driver,
            odometer,
            date,
            site,
            destination,
            issue,
        } => {
            let dir = Directory::load(&pool.conn)?;
            let vehicle_id = vehicle
                .as_deref()
                .map(|v| resolve_vehicle(&dir, v))
                .transpose()?;

            if odometer.is_none()
                && let Some(id) = vehicle_id
                && let Some(prev) = ReportLogic::previous_reading(&pool, id)?
            {
                hint(format!(
                    "Previous reading for {}: {} on {}",
                    dir.vehicle_label(id),
                    km2readable(prev.odometer_km, false),
                    prev.date
                ));
            }

            let input = ReportInput {
                vehicle_id,
                driver_id: driver
                    .as_deref()
                    .map(|d| resolve_driver(&dir, d))
                    .transpose()?,
                odometer_km: *odometer,
                date: parse_date_opt(date.as_deref())?,
                site_name: site.clone(),
                destination: destination.clone(),
                issue: issue.clone(),
                good: false,
            };

            let r = ReportLogic::add(&mut pool, &input)?;
            success(format!(
                "Report #{} saved for '{}' on {}.",
                r.id,
                dir.vehicle_label(r.vehicle_id),
                r.date
            ));
            print_run_feedback(r.run_km);
            if r.condition.is_issue() {
                warning("Issue reported; the vehicle is flagged until a report marks it good.");
            }
        }

        ReportCmd::Edit {
            id,
            vehicle,
            driver,
            odometer,
            date,
            site,
            destination,
            issue,
            good,
        } => {
            let dir = Directory::load(&pool.conn)?;
            let input = ReportInput {
                vehicle_id: vehicle
                    .as_deref()
                    .map(|v| resolve_vehicle(&dir, v))
                    .transpose()?,
                driver_id: driver
                    .as_deref()
                    .map(|d| resolve_driver(&dir, d))
                    .transpose()?,
                odometer_km: *odometer,
                date: parse_date_opt(date.as_deref())?,
                site_name: site.clone(),
                destination: destination.clone(),
                issue: issue.clone(),
                good: *good,
            };

            let r = ReportLogic::edit(&mut pool, *id, &input)?;
            success(format!("Report #{} updated.", r.id));
            print_run_feedback(r.run_km);
        }

        ReportCmd::Del { id, yes } => {
            let r = reports::get(&pool.conn, *id)?
                .ok_or_else(|| AppError::not_found("Report", *id))?;
            let prompt = format!(
                "Delete report #{} of {}? Run distances of later reports will change.",
                r.id, r.date
            );
            if !confirm_or_yes(&prompt, *yes) {
                info("Operation cancelled.");
                return Ok(());
            }
            ReportLogic::delete(&mut pool, *id)?;
            success(format!("Report #{} has been deleted.", r.id));
        }

        ReportCmd::List {
            vehicle,
            driver,
            date,
            period,
            oldest_first,
        } => {
            let dir = Directory::load(&pool.conn)?;
            let date_range = match (parse_date_opt(date.as_deref())?, period) {
                (Some(d), _) => Some((d, d)),
                (None, Some(p)) => Some(parse_period(p)?),
                (None, None) => None,
            };
            let filter = ReportFilter {
                vehicle_id: vehicle
                    .as_deref()
                    .map(|v| resolve_vehicle(&dir, v))
                    .transpose()?,
                driver_id: driver
                    .as_deref()
                    .map(|d| resolve_driver(&dir, d))
                    .transpose()?,
                date_range,
            };
            let order = if *oldest_first {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            };

            let listing = ReportLogic::list(&pool, &filter, order)?;
            if listing.is_empty() {
                info("No reports found.");
                return Ok(());
            }
            for group in &listing.groups {
                print_group(group, &listing.directory, cfg);
            }
        }

        ReportCmd::Suggest {
            sites,
            destinations,
        } => {
            let both = !sites && !destinations;
            if *sites || both {
                print_suggestions(
                    "Sites",
                    &ReportLogic::suggestions(&pool, TextColumn::SiteName)?,
                );
            }
            if *destinations || both {
                print_suggestions(
                    "Destinations",
                    &ReportLogic::suggestions(&pool, TextColumn::Destination)?,
                );
            }
        }
    }

    Ok(())
}

fn print_run_feedback(run_km: Option<i64>) {
    match run_km {
        Some(run) if run < 0 => warning(format!(
            "Odometer is lower than the previous reading (run {}).",
            km2readable(run, true)
        )),
        Some(run) => info(format!("Run: {}", km2readable(run, false))),
        None => {}
    }
}

fn print_suggestions(title: &str, values: &[String]) {
    header(title);
    if values.is_empty() {
        hint("(none yet)");
    }
    for v in values {
        println!("  {v}");
    }
}

fn condition_cell(a: &AnnotatedReport) -> String {
    match a.report.condition {
        Condition::Good => "good".into(),
        Condition::Issue => {
            let detail = a.report.issue_detail.as_deref().unwrap_or("");
            format!("{YELLOW}issue{RESET} {detail}").trim_end().to_string()
        }
    }
}

fn print_group(group: &VehicleReports, dir: &Directory, cfg: &Config) {
    let title = if group.known {
        format!("{} (#{})", group.label, group.vehicle_id)
    } else {
        format!("{BOLD_RED}{}{RESET} (#{})", group.label, group.vehicle_id)
    };
    header(title);

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Driver"),
        Column::left("Site"),
        Column::left("Destination"),
        Column::right("Odometer"),
        Column::right("Run"),
        Column::left("Condition"),
    ])
    .with_separator(&cfg.separator_char);

    let mut notes = Vec::new();
    for a in &group.rows {
        let r = &a.report;
        let odometer = match r.last_odometer_km {
            Some(km) => km2readable(km, false),
            None => paint("--", RESET),
        };
        let mut run = paint(&km2readable(a.run_km, false), color_for_run(a.run_km));
        if a.is_flagged() {
            run.push_str(&paint(" !", BOLD_RED));
            let labels: Vec<&str> = a.warnings.iter().map(|w| w.label()).collect();
            notes.push(format!("#{}: {}", r.id, labels.join(", ")));
        }

        table.add_row(vec![
            r.id.to_string(),
            r.date_str(),
            dir.driver_label(r.driver_id),
            r.site_name.clone(),
            r.destination.clone(),
            odometer,
            run,
            condition_cell(a),
        ]);
    }

    print!("{}", table.render());
    for n in notes {
        warning(n);
    }
}
