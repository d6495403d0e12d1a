use std::io::stdout;
use std::process;

use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg, ArgMatches, Shell, SubCommand};

mod subcommands;
use subcommands::{CheckApp, NdtestApp};

static DEFAULT_CLAP_SETTINGS: &[AppSettings] = &[
    AppSettings::DontCollapseArgsInUsage,
    AppSettings::UnifiedHelpMessage,
    AppSettings::SubcommandRequiredElseHelp,
];

fn main() {
    env_logger::init();

    // Known subapplications.
    let apps = vec![CheckApp::app()];

    let cli = App::new("ndtest")
        .settings(DEFAULT_CLAP_SETTINGS)
        .about("Approximate numerical predicates over arrays")
        .subcommands(apps)
        .subcommand(
            SubCommand::with_name("completions")
                .about("Generate completion scripts for your shell")
                .setting(AppSettings::ArgRequiredElseHelp)
                .arg(Arg::with_name("shell").possible_values(&Shell::variants())),
        );
    let matches = cli.clone().get_matches();

    if let Err(err) = dispatch(cli, &matches) {
        eprintln!("{:#}", err);
        process::exit(1);
    }
}

fn dispatch(cli: App<'static, 'static>, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        ("completions", Some(matches)) => {
            let shell = matches
                .value_of("shell")
                .ok_or_else(|| anyhow!("No shell given"))?
                .parse::<Shell>()
                .map_err(|err| anyhow!("{}", err))?;
            write_completion_script(cli, shell);
            Ok(())
        }
        ("check", Some(matches)) => CheckApp::parse(matches)?.run(),
        _unknown => unreachable!(),
    }
}

fn write_completion_script(mut cli: App, shell: Shell) {
    cli.gen_completions_to("ndtest", shell, &mut stdout());
}
