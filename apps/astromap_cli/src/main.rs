use anyhow::Context;
use astromap::astrocartography::LineProjector;
use astromap::chart::{BirthData, BirthLocation, ChartBuilder, FullChart};
use astromap::places::{rank_all_categories, rank_places, LifeCategory};
use astromap::scoring::{calendar_month, monthly_outlook, rank_days, score_day, weekly_forecast};
use astromap::transits::{current_transits, global_engine, year_cache};
use astromap_config::{load_settings, AstromapSettings};
use chrono::{Datelike, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Natal charts, astrocartography lines and daily power scores")]
struct Cli {
    /// Config file (default: configs/astromap.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct BirthArgs {
    /// Birth date, YYYY-MM-DD.
    #[arg(long)]
    date: String,

    /// Local birth time, HH:MM.
    #[arg(long, conflicts_with = "window")]
    time: Option<String>,

    /// Approximate time of day when the exact time is unknown: morning, afternoon, evening.
    #[arg(long)]
    window: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    lat: f64,

    #[arg(long, allow_negative_numbers = true)]
    lng: f64,

    /// IANA time zone of the birth place.
    #[arg(long, default_value = "UTC")]
    tz: String,

    #[arg(long, default_value = "Birthplace")]
    place: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full natal chart.
    Chart(BirthArgs),
    /// MC/IC/AC/DC lines for every body.
    Lines(BirthArgs),
    /// Transit positions for a date (noon UTC), or right now.
    Transits {
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Power score for one day.
    Day {
        #[command(flatten)]
        birth: BirthArgs,
        /// Day to score (default: today, UTC).
        #[arg(long)]
        on: Option<NaiveDate>,
    },
    /// Seven days of scores.
    Week {
        #[command(flatten)]
        birth: BirthArgs,
        #[arg(long)]
        start: Option<NaiveDate>,
    },
    /// Every day of one month.
    Month {
        #[command(flatten)]
        birth: BirthArgs,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u32>,
    },
    /// Twelve monthly scores plus the best and worst days of the year.
    Outlook {
        #[command(flatten)]
        birth: BirthArgs,
        #[arg(long)]
        year: Option<i32>,
        /// Best/worst days to list.
        #[arg(long, default_value_t = 5)]
        days: usize,
    },
    /// Cities where relevant lines pass close by.
    Places {
        #[command(flatten)]
        birth: BirthArgs,
        /// love, career, growth or home (default: all four).
        #[arg(long)]
        category: Option<LifeCategory>,
    },
}

fn build_chart(args: &BirthArgs, settings: &AstromapSettings) -> anyhow::Result<FullChart> {
    let location = BirthLocation::new(args.place.clone(), args.lat, args.lng, args.tz.clone());
    let birth = BirthData::parse(
        &args.date,
        args.time.as_deref(),
        args.window.as_deref(),
        location,
    )?;
    let chart = ChartBuilder::with_house_system(settings.house_system)
        .build(&birth)
        .with_context(|| format!("Failed to build chart for {}", args.date))?;
    for note in &chart.notes {
        log::info!("Chart note: {:?}", note);
    }
    Ok(chart)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn run(command: Command, settings: &AstromapSettings) -> anyhow::Result<()> {
    match command {
        Command::Chart(birth) => print_json(&build_chart(&birth, settings)?),
        Command::Lines(birth) => {
            let chart = build_chart(&birth, settings)?;
            let projection = LineProjector::new(settings.projection)?.project(&chart);
            print_json(&projection)
        }
        Command::Transits { on } => match on {
            Some(date) => {
                let cache = year_cache(date.year())?;
                let snapshot = cache
                    .get_date(date)
                    .with_context(|| format!("No transit snapshot for {date}"))?;
                print_json(snapshot)
            }
            None => print_json(&current_transits()?),
        },
        Command::Day { birth, on } => {
            let natal = build_chart(&birth, settings)?.natal_positions();
            let date = on.unwrap_or_else(today);
            let cache = year_cache(date.year())?;
            print_json(&score_day(&natal, &date.to_string(), &cache)?)
        }
        Command::Week { birth, start } => {
            let natal = build_chart(&birth, settings)?.natal_positions();
            let start = start.unwrap_or_else(today);
            print_json(&weekly_forecast(&natal, start, global_engine())?)
        }
        Command::Month { birth, year, month } => {
            let natal = build_chart(&birth, settings)?.natal_positions();
            let now = today();
            let cache = year_cache(year.unwrap_or(now.year()))?;
            print_json(&calendar_month(&natal, month.unwrap_or(now.month()), &cache)?)
        }
        Command::Outlook { birth, year, days } => {
            let natal = build_chart(&birth, settings)?.natal_positions();
            let cache = year_cache(year.unwrap_or(today().year()))?;
            let months = monthly_outlook(&natal, &cache)?;
            let ranked = rank_days(&natal, &cache, days)?;
            print_json(&serde_json::json!({
                "year": cache.year(),
                "months": months,
                "bestDays": ranked.best,
                "worstDays": ranked.worst,
            }))
        }
        Command::Places { birth, category } => {
            let chart = build_chart(&birth, settings)?;
            let projection = LineProjector::new(settings.projection)?.project(&chart);
            match category {
                Some(category) => {
                    print_json(&rank_places(&projection.lines, category, &settings.places))
                }
                None => print_json(&rank_all_categories(&projection.lines, &settings.places)),
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    let env = env_logger::Env::default().default_filter_or(settings.log_filter.as_str());
    env_logger::Builder::from_env(env).init();

    run(cli.command, &settings)
}
