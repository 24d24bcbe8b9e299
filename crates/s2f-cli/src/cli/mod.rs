use anyhow::Context;
use clap::Parser;
use s2f_core::convert::{CONVERTER_VERSION, run_conversion};
use s2f_core::domain::{ConversionReport, ConvertError, ConvertRequest};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run_from_env() -> i32 {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        // Help path, not an error: banner on stdout, exit 0.
        print!("{}", usage_banner());
        return 0;
    }

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let converted = error.as_convert_error();
            eprintln!("{}", converted.diagnostic_line());
            if let Some(summary_line) = converted.fatal_exit_line() {
                eprintln!("{summary_line}");
            }
            converted.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("shield2fluka-rs".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    let cli = match Cli::try_parse_from(&full_args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{err}");
                return Ok(0);
            }
            _ => return Err(CliError::Usage(err.to_string())),
        },
    };

    let request = ConvertRequest::new(cli.input);
    let report = run_conversion(&request).map_err(CliError::Convert)?;

    if report.dropped_tail_values > 0 {
        warn!(
            dropped = report.dropped_tail_values,
            "numeric tail had an odd element count; the final unpaired value was ignored"
        );
    }
    info!(
        zones = report.assignment_cards,
        geometry_cards = report.geometry_cards,
        "wrote {}",
        report.output_path
    );

    if let Some(report_path) = cli.report.as_deref() {
        write_report(report_path, &report)?;
    }
    Ok(0)
}

#[derive(Parser)]
#[command(
    name = "shield2fluka-rs",
    version = CONVERTER_VERSION,
    about = "Convert SHIELD pasin.dat geometry decks to FLUKA .inp files"
)]
struct Cli {
    /// SHIELD geometry input file (pasin.dat style)
    input: PathBuf,

    /// Write a JSON conversion summary to this path
    #[arg(long, value_name = "path")]
    report: Option<PathBuf>,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Diagnostics go to stderr; stdout carries only the usage banner.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn usage_banner() -> String {
    format!(
        "This is shield2fluka-rs v.{CONVERTER_VERSION}\n\
         Report bugs to Niels Bassler <bassler@phys.au.dk>.\n\
         \n\
         Please specify input filename as argument, e.g.:\n\
         \n\
         \x20 shield2fluka-rs pasin.dat\n"
    )
}

fn write_report(path: &Path, report: &ConversionReport) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(report)
        .context("failed to render conversion report JSON")
        .map_err(CliError::Internal)?;
    std::fs::write(path, rendered)
        .with_context(|| format!("failed to write conversion report '{}'", path.display()))
        .map_err(CliError::Internal)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Convert(ConvertError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_convert_error(&self) -> ConvertError {
        match self {
            Self::Usage(message) => {
                ConvertError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Convert(error) => error.clone(),
            Self::Internal(error) => ConvertError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, usage_banner};
    use s2f_core::domain::ConvertError;

    #[test]
    fn banner_names_the_tool_version_and_an_example_invocation() {
        let banner = usage_banner();

        assert!(banner.starts_with("This is shield2fluka-rs v.1.1\n"));
        assert!(banner.contains("Report bugs to"));
        assert!(banner.contains("  shield2fluka-rs pasin.dat\n"));
    }

    #[test]
    fn cli_errors_map_to_category_exit_codes() {
        let usage = CliError::Usage("bad flag".to_string());
        assert_eq!(usage.as_convert_error().exit_code(), 2);

        let convert = CliError::Convert(ConvertError::io_system("IO.INPUT_OPEN", "gone"));
        assert_eq!(convert.as_convert_error().exit_code(), 3);
    }
}
