//! dash-runner: headless dashboard runner.
//!
//! Usage:
//!   dash-runner --data data.csv --view overview
//!   dash-runner --data data.csv --view timeline --age 26-35,36-45 --profile moderado --json
//!   dash-runner --data data.csv --from 01/01/2024 --to 31/03/2024
//!   dash-runner --generate 500 --seed 42 --out data/sample.csv

use anyhow::{Context, Result};
use chrono::NaiveDate;
use invest_dash_core::{
    config::DashboardConfig,
    distribution::Distribution,
    filter::FilterSet,
    kpi::{format_average, format_currency, KpiSummary},
    loader::DATE_FORMAT,
    pipeline::AggregationPipeline,
    report::{DashboardReport, ReportSection},
    sample_data,
    types::{AgeBand, DateRange, RiskProfile},
};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if let Some(n) = arg_value(&args, "--generate") {
        let n: usize = n.parse().with_context(|| format!("--generate expects a count, got '{n}'"))?;
        return generate(&args, n);
    }

    let config = match arg_value(&args, "--config") {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::builtin(),
    };

    if args.iter().any(|a| a == "--list-views") {
        for view in &config.views {
            println!("{:<14} {}", view.name, view.title);
        }
        return Ok(());
    }

    let data = arg_value(&args, "--data").unwrap_or("./data/sample_investments.csv");
    let view_name = arg_value(&args, "--view").unwrap_or("overview");
    let json = args.iter().any(|a| a == "--json");

    let filters = parse_filters(&args)?;
    let view = config.view(view_name)?;
    let pipeline = AggregationPipeline::load(data)?;
    log::info!("view={view_name} records={}", pipeline.len());

    let report = pipeline.run(view, &filters);
    if json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn generate(args: &[String], n: usize) -> Result<()> {
    let seed = parse_arg(args, "--seed", 42u64);
    let months = parse_arg(args, "--months", 12u32);
    let start = match arg_value(args, "--start") {
        Some(raw) => parse_date(raw)?,
        None => NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid default start date")?,
    };

    let records = sample_data::generate(n, seed, start, months);
    match arg_value(args, "--out") {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Cannot create {path}"))?;
            sample_data::write_csv(&records, BufWriter::new(file))?;
            eprintln!("wrote {n} records to {path} (seed {seed})");
        }
        None => sample_data::write_csv(&records, io::stdout().lock())?,
    }
    Ok(())
}

fn parse_filters(args: &[String]) -> Result<FilterSet> {
    let mut filters = FilterSet::new();

    if let Some(raw) = arg_value(args, "--age") {
        let bands = split_list(raw)
            .map(|s| s.parse::<AgeBand>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?;
        filters = filters.with_age_bands(bands);
    }
    if let Some(raw) = arg_value(args, "--profile") {
        let profiles = split_list(raw)
            .map(|s| s.parse::<RiskProfile>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?;
        filters = filters.with_risk_profiles(profiles);
    }

    let from = arg_value(args, "--from").map(parse_date).transpose()?;
    let to = arg_value(args, "--to").map(parse_date).transpose()?;
    match (from, to) {
        (None, None) => {}
        (Some(start), Some(end)) => filters = filters.with_date_range(DateRange::new(start, end)?),
        (Some(start), None) => filters = filters.with_date_range(DateRange::new(start, NaiveDate::MAX)?),
        (None, Some(end)) => filters = filters.with_date_range(DateRange::new(NaiveDate::MIN, end)?),
    }
    Ok(filters)
}

fn print_report(report: &DashboardReport) {
    println!("=== {} ({}) ===", report.title, report.view);
    if report.filters.is_unrestricted() {
        println!("  filters: none");
    } else {
        println!("  filters: {}", serde_json::to_string(&report.filters).unwrap_or_default());
    }
    println!();

    print_section("TOTAL", &report.total);
    if report.filters.is_unrestricted() {
        return;
    }
    println!();
    if report.is_empty() {
        println!("=== FILTERED ===");
        println!("  (No data for the current selection)");
    } else {
        print_section("FILTERED", &report.filtered);
    }
}

fn print_section(label: &str, section: &ReportSection) {
    println!("=== {label} ===");
    if let Some(kpis) = &section.kpis {
        print_kpis(kpis);
    }
    for named in &section.distributions {
        println!();
        println!("  -- by {} --", named.key);
        print_distribution(&named.distribution);
    }
    if let Some(monthly) = &section.monthly {
        println!();
        println!("  -- monthly amount --");
        if monthly.is_empty() {
            println!("  (no activity)");
        }
        for row in monthly {
            println!("  {} | {}", row.period, format_currency(row.total_amount));
        }
    }
    if let Some(rows) = &section.monthly_by_instrument {
        println!();
        println!("  -- monthly amount by instrument --");
        for row in rows {
            println!(
                "  {} | {:<22} | {}",
                row.period,
                row.instrument,
                format_currency(row.total_amount)
            );
        }
    }
}

fn print_kpis(kpis: &KpiSummary) {
    println!("  total users:    {}", kpis.total_users);
    println!("  active users:   {}", kpis.active_users);
    println!("  total amount:   {}", format_currency(kpis.total_amount_active));
    println!("  average amount: {}", format_average(kpis.average_amount_active));
}

fn print_distribution(distribution: &Distribution) {
    if distribution.is_empty() {
        println!("  (no data)");
    }
    for entry in distribution.iter() {
        println!("  {:<28} {:>6}", entry.category, entry.count);
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .with_context(|| format!("'{raw}' is not a dd/mm/yyyy date"))
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
