use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use lentsurvey::buckets::NullPolicy;
use lentsurvey::config::ReportConfig;
use lentsurvey::dashboard::Dashboard;
use lentsurvey::frequency;
use lentsurvey::normalize::MalformedPolicy;
use lentsurvey::source::{DataSource, JsonlSource};
use lentsurvey::trend::local_date;
use lentsurvey::yearly::yearly_report;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

fn init_parallelism() {
    static START: Once = Once::new();
    START.call_once(|| {
        let n = num_cpus::get();
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    });
}

#[derive(Parser, Debug)]
#[command(name = "lentsurvey", version, about = "Buddhist Lent survey dashboards")]
struct Cli {
    /// TOML report configuration
    #[arg(long = "config", global = true)]
    config: Option<PathBuf>,
    /// Fixed UTC offset for calendar bucketing (e.g. +07:00)
    #[arg(long = "utc-offset", global = true)]
    utc_offset: Option<String>,
    /// Length of ranked lists
    #[arg(long = "top", global = true)]
    top: Option<usize>,
    /// Days in the daily trend window
    #[arg(long = "days", global = true)]
    days: Option<u32>,
    /// Count missing numeric values in an Unknown bucket
    #[arg(long = "include-unknown", global = true, default_value_t = false)]
    include_unknown: bool,
    /// Abort on the first undecodable input line
    #[arg(long = "fail-fast", global = true, default_value_t = false)]
    fail_fast: bool,
    /// Single-line JSON even on a terminal
    #[arg(long = "compact", global = true, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Every chart section for one snapshot
    Dashboard {
        #[arg(long = "records")]
        records: PathBuf,
        #[arg(long = "organizations")]
        organizations: Option<PathBuf>,
        /// Last day of the daily trend (YYYY-MM-DD), defaults to today
        #[arg(long = "today")]
        today: Option<NaiveDate>,
    },
    /// Month-by-month report for one year
    Yearly {
        #[arg(long = "records")]
        records: PathBuf,
        #[arg(long = "year")]
        year: i32,
    },
    /// Classify drinking-frequency answers
    Classify {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List records for table display
    Records {
        #[arg(long = "records")]
        records: PathBuf,
        #[arg(long = "limit")]
        limit: Option<usize>,
        /// json | table
        #[arg(long = "format", default_value = "json")]
        format: String,
    },
}

#[derive(Serialize)]
struct RecordRow {
    id: i64,
    date: String,
    gender: Option<String>,
    age: Option<i64>,
    province: String,
    drinking_frequency: Option<&'static str>,
    motivations: Vec<String>,
}

fn load_config(cli: &Cli) -> anyhow::Result<ReportConfig> {
    let mut cfg = match cli.config.as_deref() {
        Some(p) => ReportConfig::load(p).with_context(|| format!("loading {}", p.display()))?,
        None => ReportConfig::default(),
    };
    if let Some(o) = &cli.utc_offset {
        cfg.utc_offset = o.clone();
    }
    if let Some(n) = cli.top {
        cfg.top_n = n;
    }
    if let Some(d) = cli.days {
        cfg.trend_days = d;
    }
    if cli.include_unknown {
        cfg.null_policy = NullPolicy::BucketAsUnknown;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn emit<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    if compact || !atty::is(atty::Stream::Stdout) {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    init_parallelism();
    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    let offset = cfg.offset()?;

    match &cli.command {
        Command::Dashboard { records, organizations, today } => {
            let mut source = JsonlSource::new(records.clone()).fail_fast(cli.fail_fast);
            if let Some(o) = organizations {
                source = source.with_organizations(o.clone());
            }
            let today = today.unwrap_or_else(|| local_date(Utc::now(), offset));
            let dash = Dashboard::from_source(&source, &cfg, today)?;
            emit(&dash, cli.compact)?;
        }
        Command::Yearly { records, year } => {
            let rows = JsonlSource::new(records.clone()).fail_fast(cli.fail_fast).survey_records()?;
            emit(&yearly_report(&rows, *year, offset), cli.compact)?;
        }
        Command::Classify { text } => {
            for t in text {
                println!("{}\t{}", t, frequency::classify(t).label());
            }
        }
        Command::Records { records, limit, format } => {
            let rows = JsonlSource::new(records.clone()).fail_fast(cli.fail_fast).survey_records()?;
            let rows: Vec<RecordRow> = rows
                .iter()
                .take(limit.unwrap_or(usize::MAX))
                .map(|r| RecordRow {
                    id: r.id,
                    date: local_date(r.created_at, offset).format("%Y-%m-%d").to_string(),
                    gender: r.gender.clone(),
                    age: r.age,
                    province: r.province.clone(),
                    drinking_frequency: r.drinking_frequency.as_deref().map(|f| frequency::classify(f).label()),
                    motivations: r.motivations(MalformedPolicy::Verbatim),
                })
                .collect();
            match format.as_str() {
                "table" => print_table(&rows),
                "json" => emit(&rows, cli.compact)?,
                other => anyhow::bail!("unknown format '{other}', expected json or table"),
            }
        }
    }
    Ok(())
}

fn print_table(rows: &[RecordRow]) {
    println!(
        "{:>6}  {:<10}  {:<8}  {:>4}  {:<16}  {:<30}  MOTIVATIONS",
        "ID", "DATE", "GENDER", "AGE", "PROVINCE", "FREQUENCY"
    );
    for r in rows {
        println!(
            "{:>6}  {:<10}  {:<8}  {:>4}  {:<16}  {:<30}  {}",
            r.id,
            r.date,
            r.gender.as_deref().unwrap_or("-"),
            r.age.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
            r.province,
            r.drinking_frequency.unwrap_or("-"),
            r.motivations.join(", "),
        );
    }
}
