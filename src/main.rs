use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{bail, eyre, WrapErr};
use color_eyre::Result;
use simplelog::LevelFilter;

use prop_rs::dot::DotConfig;
use prop_rs::parser::parse_program;
use prop_rs::statement::{Program, RunConfig, RunReport};
use prop_rs::table::TableConfig;

#[derive(Parser)]
#[command(author, version, about = "Evaluate, tabulate and normalize propositional formulas")]
struct Cli {
    /// Program file (reads standard input if omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print a description of each statement before its output
    #[arg(long)]
    echo: bool,

    /// Minimum truth-table column width
    #[arg(long, value_name = "INT", default_value_t = 2)]
    min_width: usize,

    /// Omit the line under the truth-table header
    #[arg(long)]
    no_separator: bool,

    /// Write the formula trees of all statements to a DOT file
    #[arg(long, value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Exit with a failure status if any statement failed
    #[arg(long)]
    strict: bool,

    /// Log level for diagnostics on standard error
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        cli.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let source = match &cli.input {
        Some(path) => {
            log::info!("Reading program from {:?}", path);
            std::fs::read_to_string(path).wrap_err_with(|| format!("Failed to read {:?}", path))?
        }
        None => {
            log::info!("Reading program from standard input");
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };

    let statements = parse_program(&source).map_err(|e| eyre!(e))?;
    log::info!("Parsed {} statements", statements.len());

    if let Some(path) = &cli.dot {
        let config = DotConfig::default();
        let mut dot = String::new();
        for (i, statement) in statements.iter().enumerate() {
            log::debug!("DOT for statement #{}: {}", i + 1, statement);
            dot.push_str(&statement.formula().to_dot_with_config(&config)?);
        }
        std::fs::write(path, dot).wrap_err_with(|| format!("Failed to write {:?}", path))?;
        log::info!("Wrote DOT output to {:?}", path);
    }

    let config = RunConfig {
        table: TableConfig::default()
            .with_min_width(cli.min_width)
            .with_separator(!cli.no_separator),
        echo: cli.echo,
    };

    let mut program = Program::from(statements);
    let stdout = io::stdout();
    let report = program.run(&config, &mut stdout.lock())?;

    log::info!("Executed {} of {} statements", report.executed, program.len());
    finish(&report, program.len(), cli.strict)
}

/// Summarize failed statements on stderr. Only a strict run turns them into a
/// failure status.
fn finish(report: &RunReport, total: usize, strict: bool) -> Result<()> {
    if report.is_success() {
        return Ok(());
    }
    for (index, error) in &report.failures {
        eprintln!("statement #{}: {}", index + 1, error);
    }
    let summary = format!("{} of {} statements failed", report.failures.len(), total);
    if strict {
        bail!(summary);
    }
    log::error!("{}", summary);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use prop_rs::error::Error;

    fn report_with_failure() -> RunReport {
        RunReport {
            executed: 1,
            failures: vec![(0, Error::MalformedStatement("empty target".to_string()))],
        }
    }

    #[test]
    fn test_failures_keep_success_status() {
        assert!(finish(&report_with_failure(), 2, false).is_ok());
        assert!(finish(&RunReport::default(), 2, false).is_ok());
    }

    #[test]
    fn test_strict_run_fails_on_failures() {
        let err = finish(&report_with_failure(), 2, true).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 statements failed");
        assert!(finish(&RunReport::default(), 2, true).is_ok());
    }
}
