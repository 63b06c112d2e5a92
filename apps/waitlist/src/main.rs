//! waitlist — batch runner for the multiple-listing transplant simulation.
//!
//! `run` simulates one advantage probability under several seeds and writes
//! one run-table row per seed:
//!
//! ```text
//! waitlist run 0 5 output/adv05.csv --registry data/registry.csv
//! ```
//!
//! `combine` merges a directory of run tables into one file sorted by
//! advantage probability:
//!
//! ```text
//! waitlist combine output            # writes output.csv
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wl_output::{CsvWriter, OutputWriter, SimOutputObserver, combine_run_tables, write_runs};
use wl_region::{RegionSelector, RegistryTable, load_registry_csv};
use wl_sim::{BatchPlan, DEFAULT_RUNS, ModelBuilder, ModelConfig, RunSummary, run_batch};

#[cfg(test)]
mod tests;

/// Average lifespan, in months, used for batch runs.
const BATCH_AVERAGE_LIFESPAN: f64 = 91.0;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "waitlist")]
#[command(about = "Simulate multiple listing on regional transplant waiting lists")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one advantage probability under several seeds.
    Run(RunArgs),

    /// Merge every run table in a directory, sorted by advantage probability.
    Combine {
        /// Directory holding the run tables (`*.csv`)
        dir: PathBuf,

        /// Combined file (default: the directory name with `.csv` appended)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// Base seed; runs use base, base + 100, base + 200, …
    seed: u64,

    /// Percentage of new patients who list on extra regions (0–100)
    advantage_percent: f64,

    /// Run table to write (`.db` needs the `sqlite` feature)
    output: PathBuf,

    /// Consolidated registry CSV
    #[arg(long, default_value = "data/registry.csv")]
    registry: PathBuf,

    /// Regions to simulate: `ALL` or codes like `CAOP,ILIP,INOP,MNOP`
    #[arg(long, default_value = "ALL")]
    dsas: RegionSelector,

    /// Horizon in years
    #[arg(long, default_value = "20")]
    years: u32,

    /// Average lifespan on the list, in months
    #[arg(long, default_value_t = BATCH_AVERAGE_LIFESPAN)]
    lifespan: f64,

    /// Choose secondary regions uniformly instead of by rate over queue size
    #[arg(long)]
    no_smart_listing: bool,

    /// Number of seeds to run
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    runs: usize,

    /// Also write per-month condition counts (runs sequentially).  CSV runs
    /// take the path of the monthly CSV; `.db` runs take no path and fill
    /// the database's `tick_summaries` table
    #[arg(long, num_args = 0..=1, value_name = "CSV")]
    tick_summaries: Option<Option<PathBuf>>,

    /// Log a summary report at the end of every run
    #[arg(long)]
    report: bool,
}

/// Destination of the per-month rows of a `run`.
#[derive(Debug, PartialEq)]
enum MonthlyRows {
    Off,
    Csv(PathBuf),
    Database,
}

impl RunArgs {
    fn is_db(&self) -> bool {
        self.output.extension().is_some_and(|ext| ext == "db")
    }

    fn monthly_rows(&self) -> Result<MonthlyRows> {
        match (&self.tick_summaries, self.is_db()) {
            (None, _) => Ok(MonthlyRows::Off),
            (Some(None), true) => Ok(MonthlyRows::Database),
            (Some(Some(path)), false) => Ok(MonthlyRows::Csv(path.clone())),
            (Some(Some(path)), true) => bail!(
                "--tick-summaries {}: monthly rows of a `.db` run go to its tick_summaries table, pass the flag without a path",
                path.display()
            ),
            (Some(None), false) => bail!("--tick-summaries needs a CSV path unless the output is a `.db`"),
        }
    }

    fn config(&self) -> ModelConfig {
        ModelConfig {
            regions:               self.dsas.clone(),
            advantage_probability: self.advantage_percent / 100.0,
            output:                self.report,
            average_lifespan:      self.lifespan,
            years:                 self.years,
            smart_listing:         !self.no_smart_listing,
            seed:                  self.seed,
            ..ModelConfig::default()
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match Cli::parse().command {
        Command::Run(args) => run(&args),
        Command::Combine { dir, out } => combine(&dir, out),
    }
}

fn run(args: &RunArgs) -> Result<()> {
    let table = load_registry_csv(&args.registry)
        .with_context(|| format!("loading registry {}", args.registry.display()))?;
    info!(regions = table.len(), "registry loaded");

    let monthly = args.monthly_rows()?;
    let plan = BatchPlan::new(args.config(), BatchPlan::default_seeds(args.seed, args.runs));
    let t0 = Instant::now();

    let rows = if args.is_db() {
        run_to_sqlite(&table, &plan, args, monthly == MonthlyRows::Database)?
    } else {
        let mut writer = CsvWriter::new(&args.output)?;
        if let MonthlyRows::Csv(path) = &monthly {
            writer = writer.with_tick_summaries(path)?;
        }
        run_with(writer, &table, &plan, monthly != MonthlyRows::Off)?
    };

    info!(
        runs = rows,
        elapsed_secs = t0.elapsed().as_secs_f64(),
        output = %args.output.display(),
        "batch complete"
    );
    Ok(())
}

#[cfg(feature = "sqlite")]
fn run_to_sqlite(
    table:     &RegistryTable,
    plan:      &BatchPlan,
    args:      &RunArgs,
    per_month: bool,
) -> Result<usize> {
    let writer = wl_output::SqliteWriter::new(&args.output)?;
    run_with(writer, table, plan, per_month)
}

#[cfg(not(feature = "sqlite"))]
fn run_to_sqlite(
    _table:     &RegistryTable,
    _plan:      &BatchPlan,
    args:       &RunArgs,
    _per_month: bool,
) -> Result<usize> {
    bail!("{}: SQLite output needs the `sqlite` feature", args.output.display())
}

/// Run the batch into `writer`.  With `per_month` every seed is driven
/// through an output observer so monthly rows are written too; otherwise
/// seeds go through [`run_batch`] (parallel with the `parallel` feature).
fn run_with<W: OutputWriter>(
    mut writer: W,
    table:      &RegistryTable,
    plan:       &BatchPlan,
    per_month:  bool,
) -> Result<usize> {
    if !per_month {
        let summaries = run_batch(table, plan)?;
        log_runs(&summaries);
        write_runs(&mut writer, &summaries)?;
        return Ok(summaries.len());
    }

    let mut obs = SimOutputObserver::new(writer);
    for &seed in &plan.seeds {
        let mut model = ModelBuilder::from_provider(table, plan.config.clone())?
            .seed(seed)
            .build()?;
        obs.begin_run(seed);
        model.run(&mut obs)?;
        let summary = model.summary();
        log_runs(std::slice::from_ref(&summary));
        obs.record_run(&summary);
    }
    obs.finish()?;
    Ok(plan.seeds.len())
}

fn log_runs(summaries: &[RunSummary]) {
    for s in summaries {
        info!(
            seed = s.seed,
            months = s.months,
            transplants = s.transplants,
            deceased = s.count_deceased,
            waiting = s.count_waiting,
            average_wait = s.average_wait,
            "run finished"
        );
    }
}

fn combine(dir: &Path, out: Option<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    let out = out.unwrap_or_else(|| dir.with_extension("csv"));
    let rows = combine_run_tables(dir, &out)
        .with_context(|| format!("combining run tables in {}", dir.display()))?;
    println!("{rows} rows written to {}", out.display());
    Ok(())
}
