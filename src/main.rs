// Interactive tracker for departments, roles and employees.  Pick an action from the menu;
// every action reads or writes the database directly and then returns to the menu.
use anyhow::{Context, Result};
use std::io;
use tracing::info;

use employee_tracker::config::Config;
use employee_tracker::data_handling::ProgramData;
use employee_tracker::gateway::Gateway;
use employee_tracker::logging;
use employee_tracker::textinterface::TextInterface;

fn main() -> Result<()> {
    let config = Config::load().context("loading configuration")?;
    logging::init(&config.log_filter);

    let gateway = Gateway::open(&config.database)
        .with_context(|| format!("opening database {}", config.database.display()))?;
    gateway.ensure_schema().context("creating schema")?;
    info!(database = %config.database.display(), "connected");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let interface = TextInterface::new(ProgramData::new(gateway), stdin.lock(), stdout.lock());

    interface.run()?;
    Ok(())
}
