use crate::cli::parser::DriverCmd;
use crate::config::Config;
use crate::core::driver::DriverLogic;
use crate::core::lookup::UNKNOWN_DRIVER;
use crate::db::pool::DbPool;
use crate::db::queries::drivers;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::ui::prompt::confirm_or_yes;
use crate::utils::table::{Column, Table};

pub fn handle(action: &DriverCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match action {
        DriverCmd::Add { name } => {
            let d = DriverLogic::add(&mut pool, name.as_deref().unwrap_or(""))?;
            success(format!("Driver #{} '{}' registered.", d.id, d.name));
        }

        DriverCmd::Edit { id, name } => {
            let d = DriverLogic::rename(&mut pool, *id, name)?;
            success(format!("Driver #{} renamed to '{}'.", d.id, d.name));
        }

        DriverCmd::Del { id, yes } => {
            let d = drivers::get(&pool.conn, *id)?
                .ok_or_else(|| AppError::not_found("Driver", *id))?;
            let prompt = format!(
                "Delete driver #{} '{}'? Their reports are kept and will show {}.",
                d.id, d.name, UNKNOWN_DRIVER
            );
            if !confirm_or_yes(&prompt, *yes) {
                info("Operation cancelled.");
                return Ok(());
            }
            DriverLogic::delete(&mut pool, *id)?;
            success(format!("Driver #{} '{}' has been deleted.", d.id, d.name));
        }

        DriverCmd::List => {
            let list = drivers::select_all(&pool.conn)?;
            if list.is_empty() {
                info("No drivers registered.");
                return Ok(());
            }

            let mut table = Table::new(vec![Column::right("ID"), Column::left("Name")])
                .with_separator(&cfg.separator_char);
            for d in list {
                table.add_row(vec![d.id.to_string(), d.name]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
