//! Command-line interface for recording cafeteria ratings and ranking menus.
//!
//! Every subcommand works against a single SQLite ratings database. Options
//! are layered from CLI flags, `CAFETERIA_*` environment variables and
//! configuration files before any data is touched.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod database;
mod error;
mod fs;
mod logging;
mod rate;
mod recommend;
mod views;

pub use error::CliError;
pub use logging::init_logging;

use rate::{RateMenuArgs, RateVenueArgs};
use recommend::RecommendArgs;
use views::{VenueRatingArgs, WholeMenuArgs};

const ARG_DATABASE: &str = "database";
const ARG_DIMENSIONS: &str = "dimensions";
const ARG_LIMIT: &str = "limit";
const ARG_MENU: &str = "menu";
const ARG_SCORE: &str = "score";
const ARG_STARS: &str = "stars";
const ARG_VENUE: &str = "venue";
const ARG_WEIGHT: &str = "weight";

const ENV_RECOMMEND_DATABASE: &str = "CAFETERIA_CMDS_RECOMMEND_DATABASE";
const ENV_RATE_MENU_DATABASE: &str = "CAFETERIA_CMDS_RATE_MENU_DATABASE";
const ENV_RATE_MENU_VENUE: &str = "CAFETERIA_CMDS_RATE_MENU_VENUE";
const ENV_RATE_MENU_MENU: &str = "CAFETERIA_CMDS_RATE_MENU_MENU";
const ENV_RATE_MENU_SCORE: &str = "CAFETERIA_CMDS_RATE_MENU_SCORE";
const ENV_RATE_VENUE_DATABASE: &str = "CAFETERIA_CMDS_RATE_VENUE_DATABASE";
const ENV_RATE_VENUE_VENUE: &str = "CAFETERIA_CMDS_RATE_VENUE_VENUE";
const ENV_RATE_VENUE_STARS: &str = "CAFETERIA_CMDS_RATE_VENUE_STARS";
const ENV_WHOLE_MENU_DATABASE: &str = "CAFETERIA_CMDS_WHOLE_MENU_DATABASE";
const ENV_WHOLE_MENU_VENUE: &str = "CAFETERIA_CMDS_WHOLE_MENU_VENUE";
const ENV_VENUE_RATING_DATABASE: &str = "CAFETERIA_CMDS_VENUE_RATING_DATABASE";
const ENV_VENUE_RATING_VENUE: &str = "CAFETERIA_CMDS_VENUE_RATING_VENUE";

/// Run the cafeteria CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when parsing, configuration, storage or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Recommend(args) => recommend::run_recommend(args, writer),
        Command::RateMenu(args) => rate::run_rate_menu(args),
        Command::RateVenue(args) => rate::run_rate_venue(args),
        Command::WholeMenu(args) => views::run_whole_menu(args, writer),
        Command::VenueRating(args) => views::run_venue_rating(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "cafeteria",
    about = "Record cafeteria ratings and recommend menus",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank menus by a weighted preference vector.
    Recommend(RecommendArgs),
    /// Append a structured rating for one menu.
    RateMenu(RateMenuArgs),
    /// Append a star rating for a whole venue.
    RateVenue(RateVenueArgs),
    /// Show every rating recorded against a venue's menus.
    WholeMenu(WholeMenuArgs),
    /// Summarise the star ratings of a venue.
    VenueRating(VenueRatingArgs),
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<T>(writer: &mut dyn Write, value: &T) -> Result<(), CliError>
where
    T: Serialize + ?Sized,
{
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

/// Treat blank strings as absent so they fall through to the missing-option
/// error.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests;
