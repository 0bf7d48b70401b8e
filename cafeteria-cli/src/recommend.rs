//! `recommend` command: rank menus for a preference vector.

use std::io::Write;

use cafeteria_core::{DimensionSet, ScoreBounds};
use cafeteria_scorer::{
    Aggregator, RankLimit, RawPreferences, RecommendError, Recommender, normalise,
};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_DIMENSIONS, ARG_LIMIT, ARG_WEIGHT, CliError, ENV_RECOMMEND_DATABASE,
    database, write_json,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Average every stored menu rating per dimension, weight the \
                 averages by the supplied preferences and print the best \
                 menus as JSON. Weights are rescaled to sum to one, so only \
                 their ratios matter.",
    about = "Rank menus by a weighted preference vector"
)]
#[ortho_config(prefix = "CAFETERIA")]
pub(crate) struct RecommendArgs {
    /// Path to the SQLite ratings database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Preference weight as `name=value`; repeat for each dimension.
    #[arg(long = ARG_WEIGHT, value_name = "name=value")]
    #[serde(default)]
    pub(crate) weight: Vec<String>,
    /// Maximum number of menus to print (default 20).
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Comma-separated rating dimensions (default `taste,portion,price`).
    #[arg(long = ARG_DIMENSIONS, value_name = "list")]
    #[serde(default)]
    pub(crate) dimensions: Option<String>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecommendConfig {
    pub(crate) database: Utf8PathBuf,
    pub(crate) preferences: RawPreferences,
    pub(crate) limit: RankLimit,
    pub(crate) dimensions: DimensionSet,
}

impl RecommendConfig {
    /// Reject preferences and a missing database before anything is opened.
    pub(crate) fn validate(&self) -> Result<(), CliError> {
        normalise(&self.preferences, &self.dimensions).map_err(RecommendError::from)?;
        database::require_existing(&self.database)
    }
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let database = args.database.ok_or(CliError::MissingArgument {
            field: ARG_DATABASE,
            env: ENV_RECOMMEND_DATABASE,
        })?;
        let preferences = RawPreferences::from_pairs(&args.weight)?;
        let limit = args
            .limit
            .map_or_else(|| Ok(RankLimit::default()), RankLimit::new)?;
        let dimensions = match args.dimensions {
            Some(list) => list.parse::<DimensionSet>()?,
            None => DimensionSet::default(),
        };
        Ok(Self {
            database,
            preferences,
            limit,
            dimensions,
        })
    }
}

pub(crate) fn run_recommend(args: RecommendArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate()?;
    let store = database::open_for_reading(&config.database)?;
    let recommender = Recommender::new(store)
        .with_aggregator(Aggregator::new(config.dimensions, ScoreBounds::default()));
    let picks = recommender.recommend_with_limit(&config.preferences, config.limit)?;
    info!("recommending {} menus", picks.len());
    write_json(writer, &picks)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RecommendConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RecommendConfig::try_from(merged)
}
