// src/cli.rs
use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};

use crate::analysis::{batch_fit_model, get_fit_data};
use crate::config::consts::DATA_DIR_ENV;
use crate::config::options::{AnalysisOptions, AppOptions, ExportFormat, FitDataKind, ModelKind, Source};
use crate::csv::write_table;
use crate::data::{Dataset, Selection};
use crate::download::make_download;
use crate::file::{resolve_single_out_path, write_download, write_export_single};
use crate::growth::Transform;
use crate::log::{self, LogTarget};
use crate::progress::StderrProgress;
use crate::scrape::get_data;
use crate::store::Store;

/// Fetch COVID-19 case data, derive growth tables and fit trend curves.
#[derive(Parser, Debug)]
#[command(name = "covid19", author, version, about, long_about = None)]
pub struct Cli {
    /// Data directory holding one folder per source
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download and normalize source data (all sources when none is given)
    Fetch {
        #[arg(short, long = "source")]
        sources: Vec<String>,
    },
    /// Fit trend models on every region and write the fit artifacts
    Fit {
        #[arg(short, long = "source")]
        sources: Vec<String>,
        /// logistic_curve | exponential_curve (both when none is given)
        #[arg(short, long = "model")]
        models: Vec<String>,
        /// Days to extrapolate past the last observation
        #[arg(long)]
        days: Option<usize>,
        /// Initial sigma of the logistic curve
        #[arg(long)]
        sigma: Option<f64>,
    },
    /// Daily growth or growth rate of a source table
    Growth {
        #[arg(short, long)]
        source: String,
        /// daily | rate
        #[arg(short, long, default_value = "daily")]
        kind: String,
        #[command(flatten)]
        filter: RegionFilter,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Export the case table of a source
    Export {
        #[arg(short, long)]
        source: String,
        #[command(flatten)]
        filter: RegionFilter,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// List parent regions, or the regions below one parent
    Regions {
        #[arg(short, long)]
        source: String,
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Print a stored fit artifact (params by default)
    Params {
        #[arg(short, long)]
        source: String,
        #[arg(short, long, default_value = "logistic_curve")]
        model: String,
        /// plot | params | trend
        #[arg(short, long, default_value = "params")]
        kind: String,
        /// Only rows of this region
        #[arg(short, long)]
        region: Option<String>,
        #[command(flatten)]
        out: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct RegionFilter {
    /// Restrict to these parent regions
    #[arg(long = "parent")]
    parents: Vec<String>,
    /// Restrict to these regions
    #[arg(long = "region")]
    regions: Vec<String>,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output file or directory; stdout when omitted
    #[arg(short = 'o', long = "out")]
    out: Option<String>,
    /// csv | tsv
    #[arg(long, default_value = "csv")]
    format: String,
    #[arg(long)]
    no_headers: bool,
}

fn parse_sources(names: &[String]) -> Result<Vec<Source>> {
    if names.is_empty() {
        return Ok(Source::ALL.to_vec());
    }
    Ok(names.iter().map(|n| n.parse()).collect::<crate::Result<_>>()?)
}

fn parse_models(names: &[String]) -> Result<Vec<ModelKind>> {
    if names.is_empty() {
        return Ok(ModelKind::ALL.to_vec());
    }
    Ok(names.iter().map(|n| n.parse()).collect::<crate::Result<_>>()?)
}

fn apply_filter(data: Dataset, filter: &RegionFilter) -> Dataset {
    if filter.parents.is_empty() && filter.regions.is_empty() {
        return data;
    }
    let parents: BTreeSet<String> = if filter.parents.is_empty() {
        data.parent_regions().into_iter().collect()
    } else {
        filter.parents.iter().cloned().collect()
    };
    let regions = if filter.regions.is_empty() { data.regions_in(&parents) } else { filter.regions.clone() };
    data.select(&Selection { parents: &parents, regions: &regions })
}

fn emit(opts: &mut AppOptions, out: &OutputArgs, default_name: &str, headers: &[String], rows: &[Vec<String>]) -> Result<()> {
    let format: ExportFormat = out.format.parse()?;
    opts.export.format = format;
    opts.export.include_headers = !out.no_headers;

    match &out.out {
        None => {
            let headers = opts.export.include_headers.then_some(headers);
            write_table(io::stdout().lock(), headers, rows, format.delim())?;
        }
        Some(o) => {
            let default_file = join!(default_name, ".", format.ext());
            let path = resolve_single_out_path(o, &default_file)?;
            opts.export.set_path(&path.to_string_lossy());
            let written = write_export_single(&opts.export, headers, rows)?;
            eprintln!("Wrote {} rows to {}", rows.len(), written.display());
        }
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    log::init(LogTarget::Stderr, cli.verbose);

    let mut opts = AppOptions::from_env();
    if let Some(dir) = cli.data_dir {
        opts.data_dir = dir;
    }
    let store = Store::from_options(&opts);
    let mut progress = StderrProgress::default();
    logd!("data dir: {}", store.root().display());

    match cli.command {
        Command::Fetch { sources } => {
            let mut sources = parse_sources(&sources)?;
            // One download serves both Funke variants.
            if sources.contains(&Source::FunkeinteraktivDe) {
                sources.retain(|s| *s != Source::FunkeinteraktivEn);
            }
            for source in sources {
                let data = get_data(&store, source, true, &mut progress)?;
                eprintln!("{source}: {} rows, latest {}", data.len(), data.max_date().map(|d| d.to_string()).unwrap_or_default());
            }
        }

        Command::Fit { sources, models, days, sigma } => {
            let sources = parse_sources(&sources)?;
            for model in parse_models(&models)? {
                let mut analysis = AnalysisOptions { model, ..opts.analysis.clone() };
                if let Some(d) = days {
                    analysis.days_to_predict = d;
                }
                if let Some(s) = sigma {
                    analysis.logistic_sigma = s;
                }
                for s in batch_fit_model(&store, &sources, &analysis, &mut progress)? {
                    let how = if s.translated { "translated" } else { "fitted" };
                    eprintln!("{} {model}: {} {how}, {} skipped", s.source, s.fitted, s.failed);
                    for p in &s.paths {
                        eprintln!("  {}", p.display());
                    }
                }
            }
        }

        Command::Growth { source, kind, filter, out } => {
            let source: Source = source.parse()?;
            let transform = match kind.trim() {
                "daily" => Transform::DailyGrowth,
                "rate" => Transform::GrowthRate,
                other => return Err(eyre!("growth kind must be 'daily' or 'rate', got '{other}'")),
            };
            let data = apply_filter(get_data(&store, source, false, &mut progress)?, &filter);
            let (headers, rows) = transform.apply(&data).to_table();
            let name = join!(&kind, "_growth_", source.id());
            emit(&mut opts, &out, &name, &headers, &rows)?;
        }

        Command::Export { source, filter, out } => {
            let source: Source = source.parse()?;
            let data = apply_filter(get_data(&store, source, false, &mut progress)?, &filter);
            let format: ExportFormat = out.format.parse()?;
            let buf = make_download(source, &data, format, !out.no_headers)?;
            match &out.out {
                None => io::stdout().lock().write_all(&buf.bytes)?,
                Some(o) => {
                    let path = resolve_single_out_path(o, &buf.file_name)?;
                    opts.export.set_path(&path.to_string_lossy());
                    let written = write_download(&opts.export, &buf)?;
                    eprintln!("Wrote {} rows to {} ({})", buf.rows, written.display(), buf.mimetype);
                }
            }
        }

        Command::Regions { source, parent } => {
            let source: Source = source.parse()?;
            let data = get_data(&store, source, false, &mut progress)?;
            let names = match parent {
                None => data.parent_regions(),
                Some(p) => data.regions_in(&BTreeSet::from([p])),
            };
            for n in names {
                println!("{n}");
            }
        }

        Command::Params { source, model, kind, region, out } => {
            let source: Source = source.parse()?;
            let model: ModelKind = model.parse()?;
            let kind: FitDataKind = kind.parse()?;
            let (headers, mut rows) = get_fit_data(&store, source, model, kind)?.to_table();
            if let Some(r) = region {
                let col = headers.iter().position(|h| h == "region").unwrap_or(0);
                rows.retain(|row| row.get(col) == Some(&r));
            }
            let name = join!(model.id(), "_model_fit_", kind.file_suffix());
            emit(&mut opts, &out, &name, &headers, &rows)?;
        }
    }
    Ok(())
}
