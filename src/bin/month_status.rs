use std::{env, path::PathBuf, process};

use chrono::NaiveDate;
use month_status::{
    cli::render_report,
    config::ConfigManager,
    core::services::MonthStatusService,
    init,
    period::MonthVocabulary,
    storage::Snapshot,
    time::{Clock, FixedClock, SystemClock},
    utils::build_info,
};

struct Options {
    snapshot: PathBuf,
    user_id: String,
    date: Option<NaiveDate>,
    locale: Option<String>,
    config: Option<PathBuf>,
    json: bool,
}

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_args(env::args().skip(1))?;

    let mut config = match &options.config {
        Some(path) => ConfigManager::new(path.clone()).load()?,
        None => ConfigManager::from_env().load()?,
    };
    if let Some(locale) = options.locale {
        config.locale = locale;
    }
    colored::control::set_override(config.ui_color_enabled);

    let snapshot = Snapshot::load(&options.snapshot)?;
    let clock: Box<dyn Clock> = match options.date {
        Some(date) => {
            let noon = date.and_hms_opt(12, 0, 0).ok_or("invalid date")?;
            Box::new(FixedClock(noon.and_utc()))
        }
        None => Box::new(SystemClock),
    };
    let report = MonthStatusService::evaluate_for_user(
        &snapshot,
        &options.user_id,
        clock.as_ref(),
        &config,
        MonthVocabulary::shared(),
    )?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report, &config.currency));
    }
    Ok(())
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, Box<dyn std::error::Error>> {
    let mut positional = Vec::new();
    let mut date = None;
    let mut locale = None;
    let mut config = None;
    let mut json = false;

    let mut args = args;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("month-status {}", build_info::current().summary());
                process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--json" => json = true,
            "--date" => {
                let raw = args.next().ok_or("--date needs a value")?;
                date = Some(NaiveDate::parse_from_str(&raw, "%Y-%m-%d")?);
            }
            "--locale" => locale = Some(args.next().ok_or("--locale needs a value")?),
            "--config" => {
                let raw = args.next().ok_or("--config needs a value")?;
                config = Some(PathBuf::from(raw));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(snapshot), Some(user_id), None) =
        (positional.next(), positional.next(), positional.next())
    else {
        print_usage();
        process::exit(2);
    };

    Ok(Options {
        snapshot: PathBuf::from(snapshot),
        user_id,
        date,
        locale,
        config,
        json,
    })
}

fn print_usage() {
    eprintln!(
        "Usage: month-status <snapshot.json> <user-id> [options]\n\
         Options:\n  \
         --date <YYYY-MM-DD>   evaluate as of this date instead of today\n  \
         --locale <tag>        month-name language, e.g. es or en-US\n  \
         --config <file.json>  load preferences from this file\n  \
         --json                print the report as JSON\n  \
         --version             print build information"
    );
}
