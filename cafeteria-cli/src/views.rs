//! `whole-menu` and `venue-rating` commands: read-only venue views.

use std::io::Write;

use cafeteria_core::SqliteRatingStore;
use cafeteria_scorer::Recommender;
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_VENUE, CliError, ENV_VENUE_RATING_DATABASE, ENV_VENUE_RATING_VENUE,
    ENV_WHOLE_MENU_DATABASE, ENV_WHOLE_MENU_VENUE, database, non_blank, write_json,
};

/// CLI arguments for the `whole-menu` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Show every rating recorded against a venue's menus")]
#[ortho_config(prefix = "CAFETERIA")]
pub(crate) struct WholeMenuArgs {
    /// Path to the SQLite ratings database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Venue to show.
    #[arg(long = ARG_VENUE, value_name = "name")]
    #[serde(default)]
    pub(crate) venue: Option<String>,
}

/// CLI arguments for the `venue-rating` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Summarise the star ratings of a venue")]
#[ortho_config(prefix = "CAFETERIA")]
pub(crate) struct VenueRatingArgs {
    /// Path to the SQLite ratings database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Venue to summarise.
    #[arg(long = ARG_VENUE, value_name = "name")]
    #[serde(default)]
    pub(crate) venue: Option<String>,
}

/// Resolved configuration shared by the venue views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VenueViewConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) venue: String,
}

impl VenueViewConfig {
    fn resolve(
        database: Option<Utf8PathBuf>,
        venue: Option<String>,
        database_env: &'static str,
        venue_env: &'static str,
    ) -> Result<Self, CliError> {
        let database = database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: database_env,
        })?;
        let venue = non_blank(venue).ok_or(CliError::MissingArgument {
            field: ARG_VENUE,
            env: venue_env,
        })?;
        Ok(Self { database, venue })
    }

    fn recommender(&self) -> Result<Recommender<SqliteRatingStore>, CliError> {
        database::open_for_reading(&self.database).map(Recommender::new)
    }
}

impl TryFrom<WholeMenuArgs> for VenueViewConfig {
    type Error = CliError;

    fn try_from(args: WholeMenuArgs) -> Result<Self, Self::Error> {
        Self::resolve(
            args.database,
            args.venue,
            ENV_WHOLE_MENU_DATABASE,
            ENV_WHOLE_MENU_VENUE,
        )
    }
}

impl TryFrom<VenueRatingArgs> for VenueViewConfig {
    type Error = CliError;

    fn try_from(args: VenueRatingArgs) -> Result<Self, Self::Error> {
        Self::resolve(
            args.database,
            args.venue,
            ENV_VENUE_RATING_DATABASE,
            ENV_VENUE_RATING_VENUE,
        )
    }
}

pub(crate) fn run_whole_menu(args: WholeMenuArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = VenueViewConfig::try_from(merged)?;
    let menu = config.recommender()?.whole_menu(&config.venue)?;
    write_json(writer, &menu)
}

pub(crate) fn run_venue_rating(
    args: VenueRatingArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = VenueViewConfig::try_from(merged)?;
    let summary = config.recommender()?.venue_summary(&config.venue)?;
    write_json(writer, &summary)
}
