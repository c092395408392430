//! Seed handler: write the demo clients to the data file.

use std::path::Path;

use chrono::Utc;

use streamline_core::fixtures::demo_clients;
use streamline_core::store::{load_clients, save_clients};

use crate::cli::{GlobalOpts, SeedArgs};
use crate::error::CliError;
use crate::output;

pub fn handle(args: SeedArgs, data_file: &Path, global: &GlobalOpts) -> Result<(), CliError> {
    let existing = match load_clients(data_file) {
        Ok(existing) => existing,
        // An unreadable file is replaced when forced.
        Err(err) if args.force => {
            tracing::warn!(error = %err, "ignoring unreadable client data");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };
    if !existing.is_empty() && !args.force {
        return Err(CliError::DataExists {
            path: data_file.display().to_string(),
        });
    }

    let clients = demo_clients(Utc::now());
    save_clients(data_file, &clients)?;
    tracing::info!(path = %data_file.display(), replaced = existing.len(), "demo data written");

    output::print_notice(
        &format!(
            "Wrote {} demo clients to {}",
            clients.len(),
            data_file.display()
        ),
        global.quiet,
    );
    Ok(())
}
