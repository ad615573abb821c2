use std::fmt;

use lms_core::Clock;
use services::{AppServices, ModuleOverview, DEFAULT_PASSWORD};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- seed   [--db <sqlite_url>]");
    eprintln!("  cargo run -p app -- report [--db <sqlite_url>] [--email <email>] [--password <password>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://lms.sqlite3?mode=rwc");
    eprintln!("  --email alex@lms.com (the demo student)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LMS_DB_URL, LMS_EMAIL, LMS_PASSWORD");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Seed,
    Report,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "seed" => Some(Self::Seed),
            "report" => Some(Self::Report),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    email: String,
    password: String,
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw.starts_with("sqlite:") {
        raw
    } else {
        format!("sqlite://{raw}")
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("LMS_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://lms.sqlite3?mode=rwc".into(), normalize_sqlite_url);
        let mut email = std::env::var("LMS_EMAIL")
            .ok()
            .unwrap_or_else(|| "alex@lms.com".into());
        let mut password = std::env::var("LMS_PASSWORD")
            .ok()
            .unwrap_or_else(|| DEFAULT_PASSWORD.into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--email" => email = require_value(args, "--email")?,
                "--password" => password = require_value(args, "--password")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            email,
            password,
        })
    }
}

async fn seed(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let services = AppServices::new_sqlite(&args.db_url, Clock::default()).await?;
    let seeded = services.ensure_seeded().await?;

    if seeded.is_empty() {
        println!("store already seeded, nothing to do");
    } else {
        for key in seeded {
            println!("seeded {key}");
        }
    }
    Ok(())
}

async fn report(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let services = AppServices::new_sqlite(&args.db_url, Clock::default()).await?;
    services.ensure_seeded().await?;

    let Some(user) = services
        .users()
        .authenticate(&args.email, &args.password)
        .await?
    else {
        return Err(format!("no account matches {} with that password", args.email).into());
    };

    let course = services.course().course().await?;
    let progress = services.progress();

    println!("{} — progress for {} <{}>", course.title(), user.name(), user.email());
    println!();

    let mut completed_modules = 0;
    for module in course.modules() {
        let entry = progress.entry(user.id(), module.id()).await?;
        let overview = ModuleOverview::derive(&entry, module);
        if overview.badge == services::StatusBadge::Completed {
            completed_modules += 1;
        }

        let quiz = overview
            .last_quiz_score
            .map_or_else(String::new, |score| format!("  quiz: {score:.0}%"));
        println!(
            "  {:>4}  {:<45} {:<12} {:>3}%  ({}/{} items){quiz}",
            module.id().as_str(),
            module.title(),
            overview.badge.label(),
            overview.percentage,
            overview.items_completed,
            overview.items_total,
        );
    }

    println!();
    println!("{completed_modules}/{} modules completed", course.modules().len());
    if completed_modules == course.modules().len() {
        println!("Certificate of Completion earned: Certified AI Engineer");
    }
    Ok(())
}

#[tokio::main]
async fn run(command: Command, args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Seed => seed(&args).await,
        Command::Report => report(&args).await,
    }
}

fn main() {
    let mut raw = std::env::args().skip(1);
    let command = match raw.next() {
        Some(arg) if arg == "--help" || arg == "-h" => {
            print_usage();
            return;
        }
        Some(arg) => match Command::from_arg(&arg) {
            Some(command) => command,
            None => {
                eprintln!("{}", ArgsError::UnknownCommand(arg));
                print_usage();
                std::process::exit(1);
            }
        },
        None => {
            print_usage();
            std::process::exit(1);
        }
    };

    let args = match Args::parse(&mut raw) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(err) = run(command, args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
