//! Track command handler for single parcel lookups.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use parcel_tracker_cli::output::{render_json, render_text};
use parcel_tracker_lib::{
    track_parcel, Carrier, Error as LibError, HttpTracker, StaticTracker, Tracker, TrackingQuery,
    DEFAULT_TIMEOUT,
};

/// Arguments for the `track` subcommand.
#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Carrier-issued tracking number.
    pub order_id: String,

    /// Carrier id: seven_eleven, family_mart, okmart, or shopee.
    #[arg(long, short)]
    pub platform: String,

    /// Base URL of the remote tracking gateway.
    #[arg(long, env = "TRACKER_UPSTREAM_URL")]
    pub upstream: Option<String>,

    /// JSON fixture answering lookups offline. Takes precedence over --upstream.
    #[arg(long, env = "TRACKER_FIXTURE_PATH")]
    pub fixture: Option<PathBuf>,

    /// Gateway request timeout in seconds.
    #[arg(long, env = "TRACKER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Emit the result as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Handle the track subcommand.
///
/// A parcel the tracker does not know about is reported as an error so the
/// process exits non-zero.
pub fn handle_track(args: &TrackArgs) -> Result<()> {
    let carrier: Carrier = args.platform.parse()?;
    let query = TrackingQuery::new(&args.order_id, carrier)?;
    let tracker = build_tracker(args)?;

    let result = track_parcel(tracker.as_ref(), &query)
        .with_context(|| format!("failed to track {} with {}", query.order_id(), carrier))?
        .ok_or_else(|| {
            anyhow::anyhow!("No such tracking number: {} ({})", query.order_id(), carrier)
        })?;

    if args.json {
        println!("{}", render_json(&result)?);
    } else {
        println!("{}", render_text(&result));
    }
    Ok(())
}

fn build_tracker(args: &TrackArgs) -> Result<Box<dyn Tracker>> {
    if let Some(path) = &args.fixture {
        let tracker = StaticTracker::from_path(path)
            .with_context(|| format!("failed to load tracker fixture from {}", path.display()))?;
        return Ok(Box::new(tracker));
    }

    let base_url = args
        .upstream
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| LibError::TrackerNotConfigured {
            hint: "--upstream/TRACKER_UPSTREAM_URL or --fixture/TRACKER_FIXTURE_PATH".to_string(),
        })?;

    let tracker = HttpTracker::new(base_url, Duration::from_secs(args.timeout))
        .context("failed to build tracking gateway client")?;
    tracing::debug!(endpoint = tracker.endpoint(), "using remote tracking gateway");
    Ok(Box::new(tracker))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        track: TrackArgs,
    }

    #[test]
    fn timeout_defaults_to_library_default() {
        let cli = Cli::try_parse_from(["track", "TEST123", "--platform", "seven_eleven"]).unwrap();
        assert_eq!(cli.track.timeout, DEFAULT_TIMEOUT.as_secs());
        assert!(!cli.track.json);
    }

    #[test]
    fn timeout_flag_overrides_default() {
        let cli =
            Cli::try_parse_from(["track", "A1", "-p", "okmart", "--timeout", "5"]).unwrap();
        assert_eq!(cli.track.timeout, 5);
    }
}
