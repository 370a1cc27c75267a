use std::path::Path;

use anyhow::Result;

use promptkit_core::session::Session;

use crate::output;
use crate::values::{self, ValueArgs};

/// Report missing required variables without generating anything.
pub fn run(config_path: &Path, id: &str, args: &ValueArgs) -> Result<()> {
    let ctx = super::load_context(config_path)?;
    let template = ctx.catalog.require(id)?;

    let mut session = Session::start(template);
    values::fill_session(&mut session, args)?;

    output::print_header(&format!("promptkit validate: {id}"));
    let validation = session.validate();
    if validation.is_valid {
        output::print_success("All required variables are filled in");
        return Ok(());
    }

    for error in &validation.errors {
        output::print_error(error);
    }
    anyhow::bail!("{} required variable(s) missing", validation.errors.len());
}
