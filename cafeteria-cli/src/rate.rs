//! `rate-menu` and `rate-venue` commands: append ratings to the database.

use cafeteria_core::{MenuKey, RatingSink, RatingSubmission, VenueRating};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_MENU, ARG_SCORE, ARG_STARS, ARG_VENUE, CliError, ENV_RATE_MENU_DATABASE,
    ENV_RATE_MENU_MENU, ENV_RATE_MENU_SCORE, ENV_RATE_MENU_VENUE, ENV_RATE_VENUE_DATABASE,
    ENV_RATE_VENUE_STARS, ENV_RATE_VENUE_VENUE, database, non_blank,
};

/// CLI arguments for the `rate-menu` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Append one structured rating for a menu. Each score is a \
                 name=value pair; names are case-insensitive and values are \
                 stored as given, so out-of-range scores are kept but ignored \
                 when averaging.",
    about = "Append a structured rating for one menu"
)]
#[ortho_config(prefix = "CAFETERIA")]
pub(crate) struct RateMenuArgs {
    /// Path to the SQLite ratings database; created when missing.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Venue offering the menu.
    #[arg(long = ARG_VENUE, value_name = "name")]
    #[serde(default)]
    pub(crate) venue: Option<String>,
    /// Menu identifier within the venue.
    #[arg(long = ARG_MENU, value_name = "name")]
    #[serde(default)]
    pub(crate) menu: Option<String>,
    /// Score as `name=value`; repeat for each dimension.
    #[arg(long = ARG_SCORE, value_name = "name=value")]
    #[serde(default)]
    pub(crate) score: Vec<String>,
}

impl RateMenuArgs {
    pub(crate) fn into_config(self) -> Result<RateMenuConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RateMenuConfig::try_from(merged)
    }
}

/// Resolved `rate-menu` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RateMenuConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) submission: RatingSubmission,
}

impl TryFrom<RateMenuArgs> for RateMenuConfig {
    type Error = CliError;

    fn try_from(args: RateMenuArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_RATE_MENU_DATABASE,
        })?;
        let venue = non_blank(args.venue).ok_or(CliError::MissingArgument {
            field: ARG_VENUE,
            env: ENV_RATE_MENU_VENUE,
        })?;
        let menu = non_blank(args.menu).ok_or(CliError::MissingArgument {
            field: ARG_MENU,
            env: ENV_RATE_MENU_MENU,
        })?;
        if args.score.is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_SCORE,
                env: ENV_RATE_MENU_SCORE,
            });
        }
        let mut submission = RatingSubmission::new(MenuKey::new(venue, menu));
        for pair in &args.score {
            let (name, value) = parse_score(pair)?;
            submission = submission.with_score(name, value);
        }
        Ok(Self {
            database,
            submission,
        })
    }
}

/// Split a `name=value` score, normalising the name.
pub(crate) fn parse_score(pair: &str) -> Result<(String, f64), CliError> {
    let malformed = || CliError::MalformedScore {
        pair: pair.to_owned(),
    };
    let (name, value) = pair.split_once('=').ok_or_else(malformed)?;
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return Err(malformed());
    }
    let value: f64 = value.trim().parse().map_err(|_| malformed())?;
    if !value.is_finite() {
        return Err(malformed());
    }
    Ok((name, value))
}

pub(crate) fn run_rate_menu(args: RateMenuArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut store = database::open_for_writing(&config.database)?;
    store.record_menu_rating(&config.submission)?;
    info!(
        "recorded {} scores for {}",
        config.submission.scores.len(),
        config.submission.key
    );
    Ok(())
}

/// CLI arguments for the `rate-venue` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Append a star rating for a whole venue")]
#[ortho_config(prefix = "CAFETERIA")]
pub(crate) struct RateVenueArgs {
    /// Path to the SQLite ratings database; created when missing.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Venue being rated.
    #[arg(long = ARG_VENUE, value_name = "name")]
    #[serde(default)]
    pub(crate) venue: Option<String>,
    /// Star rating to append.
    #[arg(long = ARG_STARS, value_name = "stars")]
    #[serde(default)]
    pub(crate) stars: Option<f64>,
}

impl RateVenueArgs {
    pub(crate) fn into_config(self) -> Result<RateVenueConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RateVenueConfig::try_from(merged)
    }
}

/// Resolved `rate-venue` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RateVenueConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) venue: String,
    pub(crate) stars: VenueRating,
}

impl TryFrom<RateVenueArgs> for RateVenueConfig {
    type Error = CliError;

    fn try_from(args: RateVenueArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_RATE_VENUE_DATABASE,
        })?;
        let venue = non_blank(args.venue).ok_or(CliError::MissingArgument {
            field: ARG_VENUE,
            env: ENV_RATE_VENUE_VENUE,
        })?;
        let stars = args.stars.ok_or(CliError::MissingArgument {
            field: ARG_STARS,
            env: ENV_RATE_VENUE_STARS,
        })?;
        if !stars.is_finite() {
            return Err(CliError::InvalidStars { stars });
        }
        Ok(Self {
            database,
            venue,
            stars: VenueRating(stars),
        })
    }
}

pub(crate) fn run_rate_venue(args: RateVenueArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut store = database::open_for_writing(&config.database)?;
    store.record_venue_rating(&config.venue, config.stars)?;
    info!("recorded {} stars for {}", config.stars.0, config.venue);
    Ok(())
}
