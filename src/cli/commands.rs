// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `index`, `warm`, `fetch-model`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::fetch_use_case::FetchConfig;
use crate::application::index_use_case::IndexConfig;
use crate::application::warm_use_case::WarmConfig;
use crate::infra::model_fetcher::DEFAULT_MODEL_URL;
use crate::ml::DEFAULT_FEATURE_LEN;

/// The three top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the image tree and report the train/test/validation split
    Index(IndexArgs),

    /// Fill the bottleneck cache for every indexed image
    Warm(WarmArgs),

    /// Download and extract the pretrained model bundle
    FetchModel(FetchArgs),
}

/// All arguments for the `index` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Root directory — one subdirectory per class label
    #[arg(long, default_value = "data/images")]
    pub image_dir: PathBuf,

    /// Directory for cache sidecars, manifest and summary
    #[arg(long, default_value = "bottlenecks")]
    pub cache_dir: PathBuf,

    /// Percentage of each label's files held out for validation
    #[arg(long, default_value_t = 10.0)]
    pub validation_pct: f64,

    /// Percentage of each label's files held out for testing
    #[arg(long, default_value_t = 10.0)]
    pub testing_pct: f64,
}

impl From<IndexArgs> for IndexConfig {
    fn from(a: IndexArgs) -> Self {
        IndexConfig {
            image_dir:      a.image_dir,
            cache_dir:      a.cache_dir,
            validation_pct: a.validation_pct,
            testing_pct:    a.testing_pct,
        }
    }
}

/// All arguments for the `warm` command
#[derive(Args, Debug)]
pub struct WarmArgs {
    /// Root directory — one subdirectory per class label
    #[arg(long, default_value = "data/images")]
    pub image_dir: PathBuf,

    /// Directory the bottleneck sidecar files are written to
    #[arg(long, default_value = "bottlenecks")]
    pub cache_dir: PathBuf,

    /// Percentage of each label's files held out for validation
    #[arg(long, default_value_t = 10.0)]
    pub validation_pct: f64,

    /// Percentage of each label's files held out for testing
    #[arg(long, default_value_t = 10.0)]
    pub testing_pct: f64,

    /// Length of the feature vector the adapter produces
    #[arg(long, default_value_t = DEFAULT_FEATURE_LEN)]
    pub feature_len: usize,

    /// Warm independent cache entries across all CPU cores
    #[arg(long)]
    pub parallel: bool,
}

impl From<WarmArgs> for WarmConfig {
    fn from(a: WarmArgs) -> Self {
        WarmConfig {
            image_dir:      a.image_dir,
            cache_dir:      a.cache_dir,
            validation_pct: a.validation_pct,
            testing_pct:    a.testing_pct,
            feature_len:    a.feature_len,
            parallel:       a.parallel,
        }
    }
}

/// All arguments for the `fetch-model` command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Directory the model bundle is downloaded and extracted into
    #[arg(long, default_value = "model")]
    pub model_dir: PathBuf,

    /// Bundle URL — the default is the Inception-v3 2015-12-05 build
    #[arg(long, default_value = DEFAULT_MODEL_URL)]
    pub url: String,
}

impl From<FetchArgs> for FetchConfig {
    fn from(a: FetchArgs) -> Self {
        FetchConfig {
            model_dir: a.model_dir,
            url:       a.url,
        }
    }
}
