//! Carriers command handler for listing supported platforms.

use anyhow::Result;

use parcel_tracker_cli::output::render_carriers;

/// Handle the carriers subcommand.
pub fn handle_carriers() -> Result<()> {
    println!("{}", render_carriers());
    Ok(())
}
