use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::{App, Arg, ArgMatches};
use log::info;
use ndtest::suite::{Suite, SuiteReport};
use ndtest::VersionInfo;
use toml::Value;

use crate::subcommands::NdtestApp;

static REPORT: &str = "report";
static SUITES: &str = "SUITES";

/// Subcommand for running check suites.
pub struct CheckApp {
    report: Option<String>,
    suites: Vec<String>,
}

impl CheckApp {
    fn write_report(&self, path: &str, report: &SuiteReport) -> Result<()> {
        let mut value = Value::try_from(report)?;
        let version_info = Value::try_from(VersionInfo::new())?;
        value
            .as_table_mut()
            .ok_or_else(|| anyhow!("Report has to be 'Table'."))?
            .insert("version_info".to_string(), version_info);

        let mut writer = BufWriter::new(
            File::create(path)
                .with_context(|| format!("Cannot open report file for writing: {}", path))?,
        );
        write!(writer, "{}", value).context("Cannot write report")?;
        writer.flush().context("Cannot write report")
    }
}

impl NdtestApp for CheckApp {
    fn app() -> App<'static, 'static> {
        Self::common_opts("check")
            .about("Run check suites")
            .arg(
                Arg::with_name(REPORT)
                    .long("report")
                    .value_name("FILE")
                    .help("Write a TOML report of all outcomes")
                    .takes_value(true),
            )
            .arg(
                Arg::with_name(SUITES)
                    .help("Check suites (TOML)")
                    .multiple(true)
                    .required(true),
            )
    }

    fn parse(matches: &ArgMatches) -> Result<Self> {
        let suites = matches
            .values_of(SUITES)
            .ok_or_else(|| anyhow!("No check suites given"))?
            .map(ToOwned::to_owned)
            .collect();
        let report = matches.value_of(REPORT).map(ToOwned::to_owned);

        Ok(CheckApp { report, suites })
    }

    fn run(&self) -> Result<()> {
        let mut report = SuiteReport::default();
        for path in &self.suites {
            let suite = Suite::read(path)?;
            info!("Running {} check(s) from {}", suite.checks().len(), path);
            report.merge(suite.run()?);
        }

        for outcome in report.outcomes() {
            match &outcome.message {
                None => println!("ok      {}", outcome.name),
                Some(message) => println!("FAILED  {}: {}", outcome.name, message),
            }
        }

        println!(
            "\n{} passed, {} failed",
            report.passed(),
            report.failed()
        );

        if let Some(path) = &self.report {
            self.write_report(path, &report)?;
        }

        if report.failed() != 0 {
            bail!("{} check(s) failed", report.failed());
        }

        Ok(())
    }
}
