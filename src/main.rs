//! SBA Calculator CLI
//!
//! Command-line interface for quoting SBA 7(a) loan payments

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use sba_calculator::{
    batch, format_currency, CalculatorConfig, EditOutcome, LoanQuoteRequest,
    LoanQuoteResult, LoanTerms, Locale, PrincipalInput, QuoteView,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "sba_calculator", version, about = "SBA 7(a) loan payment estimator")]
struct Cli {
    /// Config file (defaults to config/calculator.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Display language: en or es
    #[arg(long, global = true)]
    lang: Option<Locale>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Quote a loan amount
    Quote {
        /// Loan amount; non-digit characters are ignored
        amount: String,

        /// Annual rate as a decimal, overriding prime + spread
        #[arg(long)]
        rate: Option<f64>,

        /// Term in years
        #[arg(long)]
        term: Option<u32>,

        /// Print JSON instead of the formatted widget
        #[arg(long)]
        json: bool,
    },

    /// Print or export the amortization schedule for a loan amount
    Schedule {
        amount: String,

        #[arg(long)]
        rate: Option<f64>,

        #[arg(long)]
        term: Option<u32>,

        /// Summarize by loan year instead of by month
        #[arg(long)]
        yearly: bool,

        /// Write CSV to this file instead of printing a table
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Quote every row of a CSV file
    Batch {
        input: PathBuf,
        output: PathBuf,
    },

    /// Re-quote on every line typed on stdin, like the live amount box
    Live,
}

#[derive(Serialize)]
struct QuoteOutput<'a> {
    request: LoanQuoteRequest,
    result: LoanQuoteResult,
    formatted: &'a QuoteView,
}

fn terms_with(base: &LoanTerms, rate: Option<f64>, term: Option<u32>) -> Result<LoanTerms> {
    let mut terms = *base;
    if let Some(rate) = rate {
        terms = terms.with_annual_rate(rate);
    }
    if let Some(term) = term {
        terms = terms.with_term_years(term);
    }
    terms.validate().context("Invalid loan terms")?;
    Ok(terms)
}

fn run_quote(terms: &LoanTerms, locale: Locale, amount: &str, json: bool) -> Result<()> {
    let request = LoanQuoteRequest::from_input(amount, terms);
    let result = terms.quote(request.principal);
    let view = QuoteView::new(request.principal, &result, terms, locale);

    if json {
        let output = QuoteOutput {
            request,
            result,
            formatted: &view,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", view.render_text(terms));
    }
    Ok(())
}

fn run_schedule(
    terms: &LoanTerms,
    locale: Locale,
    amount: &str,
    yearly: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let request = LoanQuoteRequest::from_input(amount, terms);
    let schedule = terms.schedule(request.principal);
    if schedule.is_empty() {
        println!("No quote for amount '{}'", amount);
        return Ok(());
    }

    if let Some(path) = output {
        let file = File::create(&path)
            .with_context(|| format!("Unable to create {}", path.display()))?;
        if yearly {
            schedule.write_yearly_csv(file)?;
        } else {
            schedule.write_csv(file)?;
        }
        println!("Schedule written to: {}", path.display());
        return Ok(());
    }

    let money = |v: f64| format_currency(v, locale);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if yearly {
        writeln!(out, "{:>4} {:>16} {:>16} {:>16} {:>16}", "Year", "Payments", "Interest", "Principal", "Balance")?;
        writeln!(out, "{}", "-".repeat(72))?;
        for year in schedule.yearly_summary() {
            writeln!(
                out,
                "{:>4} {:>16} {:>16} {:>16} {:>16}",
                year.year,
                money(year.payments),
                money(year.interest),
                money(year.principal),
                money(year.ending_balance),
            )?;
        }
    } else {
        writeln!(out, "{:>5} {:>16} {:>14} {:>14} {:>16}", "Month", "BOP Balance", "Interest", "Principal", "EOP Balance")?;
        writeln!(out, "{}", "-".repeat(69))?;
        for row in &schedule.rows {
            writeln!(
                out,
                "{:>5} {:>16} {:>14} {:>14} {:>16}",
                row.month,
                money(row.beginning_balance),
                money(row.interest),
                money(row.principal),
                money(row.ending_balance),
            )?;
        }
    }

    writeln!(out, "\nTotal interest: {}", money(schedule.total_interest()))?;
    Ok(())
}

fn run_batch(terms: &LoanTerms, input: PathBuf, output: PathBuf) -> Result<()> {
    let start = Instant::now();
    let quotes = batch::run_batch(&input, &output, terms)
        .with_context(|| format!("Batch quoting {} failed", input.display()))?;
    println!(
        "Quoted {} rows in {:?}; output written to {}",
        quotes.len(),
        start.elapsed(),
        output.display()
    );
    Ok(())
}

fn run_live(terms: &LoanTerms, locale: Locale) -> Result<()> {
    let mut input = PrincipalInput::for_terms(terms);
    print!("{}", QuoteView::from_input(&input, terms, locale).render_text(terms));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if input.apply_edit(&line) == EditOutcome::Rejected {
            println!("(over the maximum; keeping {})", input.display(locale));
            continue;
        }
        let view = QuoteView::from_input(&input, terms, locale);
        println!("\n$ {}", input.display(locale));
        print!("{}", view.render_text(terms));
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = CalculatorConfig::resolve(cli.config.as_deref())
        .context("Failed to load calculator config")?;
    let locale = cli.lang.unwrap_or(config.locale);
    info!("Using terms {:?} ({})", config.terms, locale);

    match cli.command {
        Command::Quote { amount, rate, term, json } => {
            let terms = terms_with(&config.terms, rate, term)?;
            run_quote(&terms, locale, &amount, json)
        }
        Command::Schedule { amount, rate, term, yearly, output } => {
            let terms = terms_with(&config.terms, rate, term)?;
            run_schedule(&terms, locale, &amount, yearly, output)
        }
        Command::Batch { input, output } => run_batch(&config.terms, input, output),
        Command::Live => run_live(&config.terms, locale),
    }
}
