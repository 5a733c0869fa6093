//! drivelog - Driver's daily log
//!
//! Logs each day's km, revenue, and hours, and shows what is actually left
//! after fuel and fixed costs.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use drivelog::display::{render_config, render_day, render_report, Colors, CONSUMPTION_HELP};
use drivelog::input::{parse_amount, parse_date, DailyTotals};
use drivelog::report::entries_to_csv;
use drivelog::users::UserError;
use drivelog::{
    compute_daily_metrics, ConfigView, CostSettings, LogDatabase, LogStore, Report, Session,
};
use drivelog_core::{ConfigStore, FuelType, JsonConfigStore, Paths};

#[derive(Parser)]
#[command(name = "drivelog")]
#[command(about = "Driver's daily log - revenue per km, per hour, and real net profit")]
#[command(version)]
#[command(after_help = r#"EXAMPLES:
    drivelog register maria --password s3nha
    drivelog login maria --password s3nha
    drivelog config set --fuel-type Gasoline --consumption 10 --price 5.89 --weekly 400
    drivelog log --km 182 --revenue 310,50 --hours 9.5
    drivelog log --date 2025-01-10 --km 150 --revenue 280 --hours 8
    drivelog report
    drivelog export --csv > history.csv

Values are the TOTALS for the day so far, not increments. Logging the same
day again replaces what was saved before.
"#)]
struct Cli {
    /// Keep database, config, and session in this directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user
    Register {
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Log in as an existing user
    Login {
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Log out the current user
    Logout,

    /// Show the logged in user
    Whoami,

    /// Save a day's totals and show its performance
    Log {
        /// Day in YYYY-MM-DD format (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Total km driven that day
        #[arg(long, value_parser = parse_amount)]
        km: f64,

        /// Total gross revenue that day
        #[arg(long, value_parser = parse_amount)]
        revenue: f64,

        /// Total hours worked that day
        #[arg(long, value_parser = parse_amount)]
        hours: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one day's performance
    Show {
        /// Day in YYYY-MM-DD format (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Every logged day plus overall totals and averages
    Report {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fuel and fixed cost settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Export the raw daily totals
    Export {
        /// Output as CSV instead of JSON
        #[arg(long)]
        csv: bool,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current settings (default)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update settings
    #[command(after_help = CONSUMPTION_HELP)]
    Set {
        /// Gasoline, Ethanol, Diesel, Electric, or anything else
        #[arg(long)]
        fuel_type: String,

        /// Average consumption in km/L (default: keep current)
        #[arg(long, value_parser = parse_amount)]
        consumption: Option<f64>,

        /// Fuel price per liter (default: keep current)
        #[arg(long, value_parser = parse_amount)]
        price: Option<f64>,

        /// Weekly fixed cost: rental, fees. 0 for an owned car (default: keep current)
        #[arg(long, value_parser = parse_amount)]
        weekly: Option<f64>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = cli.data_dir.map(Paths::with_root).unwrap_or_default();

    match cli.command {
        Commands::Register { username, password } => cmd_register(&paths, &username, &password),
        Commands::Login { username, password } => cmd_login(&paths, &username, &password),
        Commands::Logout => cmd_logout(&paths),
        Commands::Whoami => cmd_whoami(&paths),
        Commands::Log {
            date,
            km,
            revenue,
            hours,
            json,
        } => cmd_log(&paths, date.as_deref(), km, revenue, hours, json),
        Commands::Show { date, json } => cmd_show(&paths, date.as_deref(), json),
        Commands::Report { json } => cmd_report(&paths, json),
        Commands::Config { action } => match action {
            Some(ConfigAction::Show { json }) => cmd_config_show(&paths, json),
            Some(ConfigAction::Set {
                fuel_type,
                consumption,
                price,
                weekly,
            }) => cmd_config_set(&paths, &fuel_type, consumption, price, weekly),
            None => cmd_config_show(&paths, false),
        },
        Commands::Export { csv } => cmd_export(&paths, csv),
    }
}

fn open_db(paths: &Paths) -> Result<LogDatabase> {
    let path = paths.database();
    LogDatabase::open(&path).with_context(|| format!("Failed to open database {}", path.display()))
}

fn cmd_register(paths: &Paths, username: &str, password: &str) -> Result<()> {
    let db = open_db(paths)?;
    match db.register_user(username, password) {
        Ok(_) => {
            println!("Registered '{}'. Log in with 'drivelog login {}'.", username, username);
            Ok(())
        }
        Err(e @ (UserError::Taken(_) | UserError::EmptyCredentials)) => bail!(e),
        Err(e) => Err(e).context("Failed to register user"),
    }
}

fn cmd_login(paths: &Paths, username: &str, password: &str) -> Result<()> {
    let db = open_db(paths)?;
    let Some(user_id) = db
        .verify_login(username, password)
        .context("Failed to verify login")?
    else {
        bail!("Invalid username or password");
    };

    Session::new(user_id, username).save(&paths.session_file())?;
    println!("Welcome, {}!", username);
    Ok(())
}

fn cmd_logout(paths: &Paths) -> Result<()> {
    if Session::clear(&paths.session_file())? {
        println!("Logged out.");
    } else {
        println!("Nobody was logged in.");
    }
    Ok(())
}

fn cmd_whoami(paths: &Paths) -> Result<()> {
    let session = Session::require(&paths.session_file())?;
    println!(
        "{} (user {}, since {})",
        session.username,
        session.user_id,
        session.logged_in_at.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

/// Save a day's totals and show its performance
fn cmd_log(
    paths: &Paths,
    date: Option<&str>,
    km: f64,
    revenue: f64,
    hours: f64,
    json: bool,
) -> Result<()> {
    let colors = Colors::auto();
    let session = Session::require(&paths.session_file())?;
    let date = parse_date(date)?;
    let totals = DailyTotals::new(km, revenue, hours)?;
    let db = open_db(paths)?;

    let previous = db.get(session.user_id, date)?;
    db.upsert(
        session.user_id,
        date,
        totals.distance_km,
        totals.gross_revenue,
        totals.hours_worked,
    )
    .context("Failed to save the day; nothing was changed, try again")?;

    let config = JsonConfigStore::from_paths(paths).read();
    let metrics = compute_daily_metrics(
        totals.distance_km,
        totals.gross_revenue,
        totals.hours_worked,
        &config,
    );

    if json {
        let output = serde_json::json!({
            "date": date,
            "distance_km": totals.distance_km,
            "gross_revenue": totals.gross_revenue,
            "hours_worked": totals.hours_worked,
            "replaced": previous.is_some(),
            "metrics": metrics,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(previous) = previous {
        println!(
            "{}Replaced previous totals: {:.2} km, R$ {:.2}, {:.2} h{}",
            colors.yellow,
            previous.distance_km,
            previous.gross_revenue,
            previous.hours_worked,
            colors.reset
        );
        println!();
    }
    print!(
        "{}",
        render_day(
            date,
            totals.distance_km,
            totals.gross_revenue,
            totals.hours_worked,
            &metrics,
            &colors
        )
    );
    Ok(())
}

/// One day's performance
fn cmd_show(paths: &Paths, date: Option<&str>, json: bool) -> Result<()> {
    let colors = Colors::auto();
    let session = Session::require(&paths.session_file())?;
    let date = parse_date(date)?;
    let db = open_db(paths)?;

    let Some(entry) = db.get(session.user_id, date)? else {
        if json {
            println!("null");
        } else {
            println!("Nothing logged for {} yet.", date);
        }
        return Ok(());
    };

    let config = JsonConfigStore::from_paths(paths).read();
    let metrics = compute_daily_metrics(
        entry.distance_km,
        entry.gross_revenue,
        entry.hours_worked,
        &config,
    );

    if json {
        let output = serde_json::json!({
            "entry": entry,
            "metrics": metrics,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!(
        "{}",
        render_day(
            entry.date,
            entry.distance_km,
            entry.gross_revenue,
            entry.hours_worked,
            &metrics,
            &colors
        )
    );
    Ok(())
}

/// Full history report
fn cmd_report(paths: &Paths, json: bool) -> Result<()> {
    let colors = Colors::auto();
    let session = Session::require(&paths.session_file())?;
    let db = open_db(paths)?;

    let entries = db.all_for_user(session.user_id)?;
    let config = JsonConfigStore::from_paths(paths).read();
    let report = Report::build(&entries, &config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render_report(&report, &colors));
    Ok(())
}

fn cmd_config_show(paths: &Paths, json: bool) -> Result<()> {
    let colors = Colors::auto();
    let view = ConfigView::from(&JsonConfigStore::from_paths(paths).read());

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print!("{}", render_config(&view, &colors));
    Ok(())
}

fn cmd_config_set(
    paths: &Paths,
    fuel_type: &str,
    consumption: Option<f64>,
    price: Option<f64>,
    weekly: Option<f64>,
) -> Result<()> {
    let colors = Colors::auto();
    let store = JsonConfigStore::from_paths(paths);
    let current = store.read();

    for (name, value) in [
        ("consumption", consumption),
        ("price", price),
        ("weekly", weekly),
    ] {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                bail!("{} must be a non-negative number, got {}", name, value);
            }
        }
    }

    let settings = CostSettings {
        fuel_type: FuelType::parse(fuel_type),
        fuel_consumption_km_per_liter: consumption,
        fuel_price_per_liter: price,
        weekly_fixed_cost: weekly,
    };
    if settings.fuel_type.is_electric() {
        println!(
            "{}Electric vehicle: consumption and fuel price are set to zero.{}",
            colors.dim, colors.reset
        );
    }

    let config = settings.apply_to(&current);
    store
        .write(&config)
        .context("Failed to save the settings")?;

    println!("{}Settings saved.{}", colors.green, colors.reset);
    println!();
    print!("{}", render_config(&ConfigView::from(&config), &colors));
    Ok(())
}

/// Raw data export
fn cmd_export(paths: &Paths, csv: bool) -> Result<()> {
    let session = Session::require(&paths.session_file())?;
    let db = open_db(paths)?;
    let entries = db.all_for_user(session.user_id)?;

    if csv {
        print!("{}", entries_to_csv(&entries));
        return Ok(());
    }

    let output = serde_json::json!({
        "user": session.username,
        "generated": chrono::Utc::now().to_rfc3339(),
        "daily": entries,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["drivelog", "--help"]);
        // --help returns an error (it exits), but shouldn't panic
        assert!(cli.is_err());
    }

    #[test]
    fn test_log_command_decimal_comma() {
        let cli = Cli::try_parse_from([
            "drivelog", "log", "--date", "2025-01-10", "--km", "182,5", "--revenue", "310,50",
            "--hours", "9.5",
        ])
        .unwrap();
        match cli.command {
            Commands::Log {
                date,
                km,
                revenue,
                hours,
                json,
            } => {
                assert_eq!(date.as_deref(), Some("2025-01-10"));
                assert_eq!(km, 182.5);
                assert_eq!(revenue, 310.5);
                assert_eq!(hours, 9.5);
                assert!(!json);
            }
            _ => panic!("Expected Log command"),
        }
    }

    #[test]
    fn test_log_requires_totals() {
        let cli = Cli::try_parse_from(["drivelog", "log", "--km", "100"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_log_rejects_bad_amount() {
        let cli = Cli::try_parse_from([
            "drivelog", "log", "--km", "abc", "--revenue", "10", "--hours", "1",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_config_set_defaults_keep_current() {
        let cli = Cli::try_parse_from([
            "drivelog", "config", "set", "--fuel-type", "Gasolina", "--price", "6",
        ])
        .unwrap();
        match cli.command {
            Commands::Config {
                action:
                    Some(ConfigAction::Set {
                        fuel_type,
                        consumption,
                        price,
                        weekly,
                    }),
            } => {
                assert_eq!(fuel_type, "Gasolina");
                assert_eq!(consumption, None);
                assert_eq!(price, Some(6.0));
                assert_eq!(weekly, None);
            }
            _ => panic!("Expected Config Set command"),
        }
    }

    #[test]
    fn test_config_without_action() {
        let cli = Cli::try_parse_from(["drivelog", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { action: None }));
    }

    #[test]
    fn test_export_csv() {
        let cli = Cli::try_parse_from(["drivelog", "export", "--csv"]).unwrap();
        match cli.command {
            Commands::Export { csv } => assert!(csv),
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_global_data_dir() {
        let cli = Cli::try_parse_from(["drivelog", "report", "--data-dir", "/tmp/drivelog-test"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/drivelog-test")));
        assert!(matches!(cli.command, Commands::Report { json: false }));
    }

    #[test]
    fn test_config_set_keeps_weekly_cost() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::with_root(dir.path());

        cmd_config_set(&paths, "Gasolina", Some(10.0), Some(5.0), Some(400.0)).unwrap();
        cmd_config_set(&paths, "Gasolina", None, Some(6.0), None).unwrap();

        let config = JsonConfigStore::from_paths(&paths).read();
        assert_eq!(config.fuel_consumption_km_per_liter, 10.0);
        assert_eq!(config.fuel_price_per_liter, 6.0);
        assert_eq!(config.fixed_daily_cost, 57.14);
    }

    #[test]
    fn test_config_set_rejects_negative_weekly() {
        let dir = tempfile::tempdir().unwrap();
        let paths = Paths::with_root(dir.path());
        assert!(cmd_config_set(&paths, "Diesel", None, None, Some(-1.0)).is_err());
    }
}
