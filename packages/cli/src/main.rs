#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Diagnostic CLI for the ASRS incident dashboard.
//!
//! Loads the configured CSV exports through the dataset cache, runs one
//! query, and prints the result as pretty JSON. Useful for checking a data
//! drop or a settings change without standing up a front end.

use std::path::PathBuf;

use asrs_dashboard_analytics::{
    factors::{DEFAULT_FACTOR_LIMIT, RiskThresholds, top_factors},
    incidents::{incident_detail, list_incidents},
    severity::SeverityRules,
    similarity::SimilarityScoring,
    summary::{dataset_summary, filter_options},
    timeline::incident_timeline,
    topics::{
        DEFAULT_KEYWORD_LIMIT, DEFAULT_NARRATIVE_LIMIT, topic_keywords, topic_narratives,
        topics_overview,
    },
    trends::{
        DEFAULT_COMPARISON_LIMIT, DEFAULT_EMERGING_LIMIT, comparison_chart, delta_kpis,
        emerging_patterns,
    },
};
use asrs_dashboard_analytics_models::{ComparisonView, ListIncidentsParams, TopicModelKind};
use asrs_dashboard_config::Settings;
use asrs_dashboard_dataset::{cache::DatasetCache, loader::DatasetLoader};
use asrs_dashboard_incident_models::{YearRange, YearSpan};
use asrs_dashboard_topics::StaticTopicModel;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "asrs_dashboard", about = "ASRS incident dashboard queries")]
struct Cli {
    /// TOML settings file. `ASRS_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Rebuild the cached dataset before running the query
    #[arg(long, global = true)]
    reload: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Optional inclusive year filter.
#[derive(Args)]
struct YearArgs {
    /// First year to include
    #[arg(long)]
    start_year: Option<i32>,
    /// Last year to include
    #[arg(long)]
    end_year: Option<i32>,
}

impl YearArgs {
    const fn range(&self) -> YearRange {
        YearRange::new(self.start_year, self.end_year)
    }
}

/// Baseline and inference periods. Unset bounds come from settings.
#[derive(Args)]
struct PeriodArgs {
    #[arg(long)]
    baseline_start: Option<i32>,
    #[arg(long)]
    baseline_end: Option<i32>,
    #[arg(long)]
    inference_start: Option<i32>,
    #[arg(long)]
    inference_end: Option<i32>,
}

impl PeriodArgs {
    fn spans(&self, settings: &Settings) -> (YearSpan, YearSpan) {
        (
            YearSpan::new(
                self.baseline_start.unwrap_or(settings.baseline.start),
                self.baseline_end.unwrap_or(settings.baseline.end),
            ),
            YearSpan::new(
                self.inference_start.unwrap_or(settings.inference.start),
                self.inference_end.unwrap_or(settings.inference.end),
            ),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Row count, year coverage, and primary risk
    Summary,
    /// Sidebar filter options
    Filters,
    /// Incidents per year
    Timeline {
        #[command(flatten)]
        years: YearArgs,
        /// Year marked as the benchmark split (defaults to settings)
        #[arg(long)]
        benchmark_year: Option<i32>,
    },
    /// Most frequent contributing factors with risk labels
    Factors {
        #[command(flatten)]
        years: YearArgs,
        #[arg(long, default_value_t = DEFAULT_FACTOR_LIMIT)]
        limit: usize,
    },
    /// Paginated incident list
    Incidents {
        #[command(flatten)]
        years: YearArgs,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
        /// Airport code
        #[arg(long)]
        location: Option<String>,
        /// `High`, `Medium`, or `Low`
        #[arg(long)]
        severity: Option<String>,
    },
    /// Full detail and similar incidents for one ACN
    Incident {
        acn: String,
    },
    /// Baseline vs inference KPI cards
    Kpis {
        #[command(flatten)]
        periods: PeriodArgs,
    },
    /// Baseline vs inference comparison chart
    Comparison {
        #[command(flatten)]
        periods: PeriodArgs,
        /// `factors` or `topics`
        #[arg(long, default_value = "factors")]
        view: String,
        #[arg(long, default_value_t = DEFAULT_COMPARISON_LIMIT)]
        limit: usize,
    },
    /// Topic clusters
    Topics {
        #[command(flatten)]
        years: YearArgs,
        /// `lda` or `bert`
        #[arg(long, default_value = "lda")]
        model: String,
    },
    /// Keywords for a topic
    Keywords {
        topic_id: u32,
        #[arg(long, default_value_t = DEFAULT_KEYWORD_LIMIT)]
        limit: usize,
    },
    /// Representative narratives for a topic
    Narratives {
        topic_id: u32,
        #[arg(long, default_value_t = DEFAULT_NARRATIVE_LIMIT)]
        limit: usize,
    },
    /// Topics that emerged in the inference period
    Emerging {
        #[command(flatten)]
        periods: PeriodArgs,
        #[arg(long, default_value_t = DEFAULT_EMERGING_LIMIT)]
        limit: usize,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[allow(clippy::too_many_lines)]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    log::debug!("Settings: {settings:?}");

    let loader = DatasetLoader::new(settings.csv_paths());
    log::debug!("CSV sources: {:?}", loader.paths());

    let cache = DatasetCache::new(loader, settings.cache_mode());
    log::debug!("Dataset cache mode: {}", cache.mode());

    // A forced reload already rebuilds the snapshot
    if !cli.reload {
        cache.preload()?;
    }
    let dataset = cache.load(cli.reload)?;

    let topics = StaticTopicModel::new();
    let rules = SeverityRules::default();

    match cli.command {
        Commands::Summary => print_json(&dataset_summary(&dataset))?,
        Commands::Filters => print_json(&filter_options(&dataset))?,
        Commands::Timeline {
            years,
            benchmark_year,
        } => print_json(&incident_timeline(
            &dataset,
            years.range(),
            benchmark_year.unwrap_or(settings.benchmark_year),
        ))?,
        Commands::Factors { years, limit } => print_json(&top_factors(
            &dataset,
            years.range(),
            limit,
            RiskThresholds::default(),
        ))?,
        Commands::Incidents {
            years,
            page,
            limit,
            location,
            severity,
        } => {
            let params = ListIncidentsParams {
                years: years.range(),
                page,
                limit,
                location,
                severity,
            };
            print_json(&list_incidents(&dataset, &params, &rules)?)?;
        }
        Commands::Incident { acn } => print_json(&incident_detail(
            &dataset,
            &acn,
            &rules,
            &SimilarityScoring::default(),
        )?)?,
        Commands::Kpis { periods } => {
            let (baseline, inference) = periods.spans(&settings);
            print_json(&delta_kpis(&dataset, baseline, inference))?;
        }
        Commands::Comparison {
            periods,
            view,
            limit,
        } => {
            let view: ComparisonView = view
                .parse()
                .map_err(|_| format!("Unknown comparison view '{view}'"))?;
            let (baseline, inference) = periods.spans(&settings);
            print_json(&comparison_chart(
                &dataset, &topics, view, baseline, inference, limit,
            ))?;
        }
        Commands::Topics { years, model } => {
            let kind: TopicModelKind = model
                .parse()
                .map_err(|_| format!("Unknown topic model '{model}'"))?;
            print_json(&topics_overview(&dataset, &topics, kind, years.range()))?;
        }
        Commands::Keywords { topic_id, limit } => {
            print_json(&topic_keywords(&topics, topic_id, limit))?;
        }
        Commands::Narratives { topic_id, limit } => {
            print_json(&topic_narratives(&dataset, &topics, topic_id, limit))?;
        }
        Commands::Emerging { periods, limit } => {
            let (_, inference) = periods.spans(&settings);
            print_json(&emerging_patterns(&topics, inference, limit))?;
        }
    }

    Ok(())
}
