//! Outreach CLI
//!
//! Runs the five-stage outreach pipeline (companies, contacts, research,
//! emails, quality check) from the command line.

#![allow(clippy::print_stdout)]

mod progress;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use application::OutreachRequest;
use clap::{Args, Parser, Subcommand};
use domain::EmailStyle;
use infrastructure::{AppConfig, build_outreach_service, init_logging};
use tracing::{debug, info};

use crate::progress::ConsoleProgress;

/// Default description of the companies to prospect
const DEFAULT_TARGET: &str = "Fashion retailers and apparel brands (EU/US) with e-commerce \
    presence, 50–1000 employees. Prioritize buying/merchandising-led organizations and \
    fast-fashion or data-driven teams.";

/// Default description of the sender's offering
const DEFAULT_OFFERING: &str = "Livetrend provides data-driven trend analysis and competitive \
    intelligence to design better collections, plan assortments, and optimize pricing and \
    buying decisions. We analyze 1,040 fashion attributes from e-commerce, shows, and \
    Instagram, map colors to Pantone, and offer real-time competitive dashboards, trend feeds, \
    and retail search.";

/// Outreach CLI
#[derive(Parser)]
#[command(name = "outreach")]
#[command(author, version, about = "Multi-stage LLM outreach pipeline", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./outreach.toml if present)
    #[arg(short, long, global = true, env = "OUTREACH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find companies and contacts, research them and draft emails
    ///
    /// Example: outreach run --sender-name "Ada Lovelace" --companies 3 --style cold
    Run(Box<RunArgs>),

    /// List the available email styles
    Styles,
}

/// Options of the `run` command; unset options keep their configured value
#[derive(Args, Debug)]
struct RunArgs {
    /// Description of the companies to prospect
    #[arg(long, default_value = DEFAULT_TARGET, hide_default_value = true)]
    target: String,

    /// Description of what you offer
    #[arg(long, default_value = DEFAULT_OFFERING, hide_default_value = true)]
    offering: String,

    /// Your name, used in signatures
    #[arg(long)]
    sender_name: Option<String>,

    /// Your company, used in signatures and excluded from prospects
    #[arg(long)]
    sender_company: Option<String>,

    /// Number of companies to find (1-10)
    #[arg(long)]
    companies: Option<usize>,

    /// Email style (professional, casual, cold, consultative)
    #[arg(long)]
    style: Option<EmailStyle>,

    /// Follow-up lines per email (0-3)
    #[arg(long)]
    followups: Option<u8>,

    /// Extra model attempts per stage (0-3)
    #[arg(long)]
    retries: Option<u8>,

    /// Do not fall back to web-search heuristics
    #[arg(long)]
    no_fallbacks: bool,

    /// Skip the quality check
    #[arg(long)]
    no_qc: bool,

    /// Model for every agent without a specific override
    #[arg(long)]
    model: Option<String>,

    /// Model for the company finder
    #[arg(long)]
    company_model: Option<String>,

    /// Model for the contact finder
    #[arg(long)]
    contact_model: Option<String>,

    /// Model for the researcher
    #[arg(long)]
    research_model: Option<String>,

    /// Model for the email writer
    #[arg(long)]
    email_model: Option<String>,

    /// Model for the quality checker
    #[arg(long)]
    qc_model: Option<String>,

    /// Industries to focus on (comma separated)
    #[arg(long, value_delimiter = ',')]
    industries: Vec<String>,

    /// Regions to focus on (comma separated)
    #[arg(long, value_delimiter = ',')]
    regions: Vec<String>,

    /// Domains never proposed (comma separated)
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Export directory
    #[arg(long)]
    out: Option<PathBuf>,

    /// Do not write export files
    #[arg(long)]
    no_export: bool,
}

impl RunArgs {
    /// Override configured values with the options given on the command line
    fn apply(&self, config: &mut AppConfig) {
        let pipeline = &mut config.pipeline;
        if let Some(name) = &self.sender_name {
            pipeline.sender.name.clone_from(name);
        }
        if let Some(company) = &self.sender_company {
            pipeline.sender.company.clone_from(company);
        }
        if let Some(companies) = self.companies {
            pipeline.num_companies = companies;
        }
        if let Some(style) = self.style {
            pipeline.email_style = style;
        }
        if let Some(followups) = self.followups {
            pipeline.followups = followups;
        }
        if let Some(retries) = self.retries {
            pipeline.retries = retries;
        }
        if self.no_fallbacks {
            pipeline.allow_fallbacks = false;
        }
        if self.no_qc {
            pipeline.quality_check = false;
        }

        let models = &mut pipeline.models;
        for (slot, value) in [
            (&mut models.default, &self.model),
            (&mut models.company_finder, &self.company_model),
            (&mut models.contact_finder, &self.contact_model),
            (&mut models.researcher, &self.research_model),
            (&mut models.email_writer, &self.email_model),
            (&mut models.quality_checker, &self.qc_model),
        ] {
            if value.is_some() {
                slot.clone_from(value);
            }
        }

        for (list, values) in [
            (&mut pipeline.industries, &self.industries),
            (&mut pipeline.regions, &self.regions),
            (&mut pipeline.exclude_domains, &self.exclude),
        ] {
            let values = clean_list(values);
            if !values.is_empty() {
                *list = values;
            }
        }

        if let Some(out) = &self.out {
            config.export.out_dir.clone_from(out);
        }
        if self.no_export {
            config.export.enabled = false;
        }
    }

    fn request(&self) -> OutreachRequest {
        OutreachRequest::new(self.target.trim(), self.offering.trim())
    }
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Determine log filter override from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

async fn run(config_path: Option<&Path>, verbose: u8, args: &RunArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::load(config_path).context("Failed to load configuration")?;
    args.apply(&mut config);
    if let Some(filter) = log_filter_from_verbosity(verbose) {
        config.logging.filter = filter.to_string();
    }
    init_logging(&config.logging)?;
    debug!(
        num_companies = config.pipeline.num_companies,
        style = %config.pipeline.email_style,
        export = config.export.enabled,
        "Configuration loaded"
    );

    let service = build_outreach_service(&config)?.with_progress(Arc::new(ConsoleProgress));
    let report = service.run(&args.request()).await?;
    info!(
        companies = report.companies.companies.len(),
        emails = report.emails.emails.len(),
        "Outreach run finished"
    );

    render::print_report(&report);
    Ok(())
}

fn print_styles() {
    println!("✉️  Email styles:");
    for style in EmailStyle::ALL {
        println!();
        println!("  {}", style.label());
        println!("    {}", style.instruction());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run(args) => run(cli.config.as_deref(), cli.verbose, args).await,
        Commands::Styles => {
            print_styles();
            Ok(())
        },
    }
}
