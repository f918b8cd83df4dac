use crate::cli::parser::DataCmd;
use crate::config::Config;
use crate::core::data::DataLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::ui::prompt::confirm_or_yes;
use crate::utils::path::resolve;

pub fn handle(action: &DataCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        DataCmd::Export { file, force } => {
            let path = resolve(file);
            let doc = DataLogic::export(&mut pool, &path, *force)?;
            success(format!(
                "Backup written to {}: {} vehicles, {} drivers, {} reports.",
                path.display(),
                doc.vehicles.as_ref().map_or(0, Vec::len),
                doc.drivers.as_ref().map_or(0, Vec::len),
                doc.reports.as_ref().map_or(0, Vec::len),
            ));
        }

        DataCmd::Import { file, yes } => {
            let path = resolve(file);
            let doc = DataLogic::read(&path)?;

            let mut parts = Vec::new();
            if let Some(v) = &doc.vehicles {
                parts.push(format!("{} vehicles", v.len()));
            }
            if let Some(d) = &doc.drivers {
                parts.push(format!("{} drivers", d.len()));
            }
            if let Some(r) = &doc.reports {
                parts.push(format!("{} reports", r.len()));
            }
            if parts.is_empty() {
                warning("The backup file holds no vehicles, drivers or reports; nothing to do.");
                return Ok(());
            }

            let prompt = format!(
                "Stored data will be replaced by {}. This action is irreversible.",
                parts.join(", ")
            );
            if !confirm_or_yes(&prompt, *yes) {
                info("Operation cancelled.");
                return Ok(());
            }

            let summary = DataLogic::import(&mut pool, &doc)?;
            success(format!(
                "Imported {} from {}.",
                parts.join(", "),
                path.display()
            ));
            if summary.vehicles.is_some() || summary.reports.is_some() {
                info("Run `fleetlog vehicle sync` if cached odometers look out of date.");
            }
        }
    }

    Ok(())
}
