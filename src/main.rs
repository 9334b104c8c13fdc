//! AC + Ceiling Fan Comfort CLI
//!
//! Command-line interface for computing AC setpoint and fan speed
//! recommendations.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use ac_fan_comfort::comfort::{ComfortConditions, ComfortGridSearch, Iso7730Pmv, LookupTable};
use ac_fan_comfort::config::{CLOTHING_TABLE, FAN_PREFERENCE_ORDER};
use ac_fan_comfort::cooling::catalog;
use ac_fan_comfort::physiology::PhysiologicalParams;
use ac_fan_comfort::storage::{self, AppConfig};
use ac_fan_comfort::utils::parsing::{parse_clothing_choice, parse_numeric_field};
use ac_fan_comfort::{ComfortError, ComfortOutcome, ComfortRequest, ComfortSettingsCalculator};

// =============================================================================
// CLI Arguments
// =============================================================================

/// AC + ceiling fan comfort advisor
#[derive(Parser, Debug)]
#[command(name = "ac-fan-comfort-cli")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (default: user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend an AC temperature and fan speed
    Recommend {
        /// Desired feels-like temperature (°C)
        #[arg(short, long)]
        desired_temp: f64,

        /// Outdoor temperature (°C)
        #[arg(short, long)]
        outdoor_temp: f64,

        /// Outdoor relative humidity (%)
        #[arg(short = 'u', long)]
        humidity: f64,

        /// Heart rate (bpm)
        #[arg(short = 'r', long)]
        heart_rate: f64,

        /// Clothing type, e.g. "summer clothing" or "light blanket"
        #[arg(short, long, default_value = "summer clothing")]
        clothing: String,

        /// Warmest AC temperature to consider (°C)
        #[arg(long)]
        init_ac_temp: Option<f64>,

        /// Save the lookup table as CSV
        #[arg(short, long)]
        export: bool,
    },

    /// Prompt for inputs on the terminal
    Interactive {
        /// Save the lookup table as CSV after each calculation
        #[arg(short, long)]
        export: bool,
    },

    /// Print the full PMV lookup table for given conditions
    Table {
        /// Desired feels-like temperature (°C)
        #[arg(short, long)]
        desired_temp: f64,

        /// Outdoor relative humidity (%)
        #[arg(short = 'u', long)]
        humidity: f64,

        /// Heart rate (bpm)
        #[arg(short = 'r', long, default_value = "80")]
        heart_rate: f64,

        /// Clothing type
        #[arg(short, long, default_value = "summer clothing")]
        clothing: String,

        /// Warmest AC temperature to consider (°C)
        #[arg(long)]
        init_ac_temp: Option<f64>,

        /// Save the table as CSV instead of printing it
        #[arg(short, long)]
        export: bool,
    },

    /// List fan speeds with RPM, air delivery and velocity
    Fans,

    /// List clothing types and insulation values
    Clothing,

    /// Show the config file path and effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config_path = match args.config {
        Some(path) => path,
        None => storage::get_config_path().context("Failed to locate config directory")?,
    };
    let config = storage::load_config_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    match args.command {
        Command::Recommend {
            desired_temp,
            outdoor_temp,
            humidity,
            heart_rate,
            clothing,
            init_ac_temp,
            export,
        } => {
            let request =
                ComfortRequest::new(desired_temp, outdoor_temp, humidity, heart_rate, clothing);
            cmd_recommend(&config, &request, init_ac_temp, export)
        }
        Command::Interactive { export } => cmd_interactive(&config, export),
        Command::Table {
            desired_temp,
            humidity,
            heart_rate,
            clothing,
            init_ac_temp,
            export,
        } => cmd_table(
            &config,
            desired_temp,
            humidity,
            heart_rate,
            &clothing,
            init_ac_temp,
            export,
        ),
        Command::Fans => cmd_fans(),
        Command::Clothing => cmd_clothing(),
        Command::Config { init } => cmd_config(&config_path, &config, init),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn build_calculator(
    config: &AppConfig,
    init_ac_temp: Option<f64>,
) -> Result<ComfortSettingsCalculator> {
    let mut config = config.clone();
    if let Some(init) = init_ac_temp {
        config.search = config.search.with_init_ac_temp(init);
    }
    ComfortSettingsCalculator::from_config(&config).context("Invalid search settings")
}

fn export_table(
    config: &AppConfig,
    table: &LookupTable,
    desired_temp: f64,
    humidity: f64,
) -> Result<()> {
    let dir = config.export.directory_or_cwd()?;
    let path = storage::export_lookup_table(table, &dir, desired_temp, humidity)
        .context("Failed to export lookup table")?;
    println!("📄 Lookup table saved to {}", path.display());
    Ok(())
}

fn cmd_recommend(
    config: &AppConfig,
    request: &ComfortRequest,
    init_ac_temp: Option<f64>,
    export: bool,
) -> Result<()> {
    let calculator = build_calculator(config, init_ac_temp)?;
    let outcome = calculator.calculate(request)?;
    print_outcome(config, request, &outcome, export)
}

fn print_outcome(
    config: &AppConfig,
    request: &ComfortRequest,
    outcome: &ComfortOutcome,
    export: bool,
) -> Result<()> {
    match outcome {
        ComfortOutcome::Recommendation(rec) => {
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            println!("{}", rec);
            println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
            if export || config.export.enabled {
                export_table(
                    config,
                    &rec.lookup_table,
                    request.desired_temp,
                    request.outdoor_humidity,
                )?;
            }
        }
        ComfortOutcome::Advisory(advisory) => println!("⚠️  {}", advisory),
    }
    Ok(())
}

fn cmd_interactive(config: &AppConfig, export: bool) -> Result<()> {
    let calculator = build_calculator(config, None)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    println!("🌡️  AC + Fan Comfort Advisor (Ctrl+D to quit)\n");

    loop {
        let Some(request) = read_request(&mut input)? else {
            break;
        };

        match calculator.calculate(&request) {
            Ok(outcome) => print_outcome(config, &request, &outcome, export)?,
            Err(e) => println!("❌ Error: {}", e),
        }

        println!();
        match prompt(&mut input, "Calculate again? [y/N]: ")? {
            Some(answer) if answer.trim().eq_ignore_ascii_case("y") => println!(),
            _ => break,
        }
    }

    println!("👋 Bye.");
    Ok(())
}

/// Read one request from the prompt. `None` on end of input.
fn read_request(input: &mut impl BufRead) -> Result<Option<ComfortRequest>> {
    const FIELDS: [&str; 4] = [
        "Desired feel-like temperature (°C)",
        "Outdoor temperature (°C)",
        "Outdoor humidity (%)",
        "Heart rate (bpm)",
    ];

    loop {
        let mut values = [0.0; 4];
        let mut invalid = false;
        for (value, label) in values.iter_mut().zip(FIELDS) {
            let Some(raw) = prompt(input, &format!("{}: ", label))? else {
                return Ok(None);
            };
            match parse_numeric_field(label, &raw) {
                Ok(v) => *value = v,
                Err(ComfortError::InvalidNumber { .. }) => {
                    invalid = true;
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        if invalid {
            println!("❌ Invalid input. Please enter numeric values.\n");
            continue;
        }

        println!("Clothing type:");
        for (i, (name, clo)) in CLOTHING_TABLE.iter().enumerate() {
            println!("  {}. {} ({} clo)", i + 1, name, clo);
        }
        let Some(raw) = prompt(input, "Choice [1]: ")? else {
            return Ok(None);
        };
        let clothing = if raw.trim().is_empty() {
            CLOTHING_TABLE[0].0.to_string()
        } else {
            parse_clothing_choice(&raw)
        };

        let [desired, outdoor, humidity, heart_rate] = values;
        return Ok(Some(ComfortRequest::new(
            desired, outdoor, humidity, heart_rate, clothing,
        )));
    }
}

/// Print a label and read a line. `None` on end of input.
fn prompt(input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    print!("{}", label);
    std::io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn cmd_table(
    config: &AppConfig,
    desired_temp: f64,
    humidity: f64,
    heart_rate: f64,
    clothing: &str,
    init_ac_temp: Option<f64>,
    export: bool,
) -> Result<()> {
    let mut params = config.search;
    if let Some(init) = init_ac_temp {
        params = params.with_init_ac_temp(init);
    }
    params.validate().context("Invalid search settings")?;

    let physiology = PhysiologicalParams::estimate(heart_rate, clothing);
    let conditions = ComfortConditions {
        desired_temp,
        outdoor_temp: desired_temp,
        outdoor_humidity: humidity,
        met: physiology.met,
        clo: physiology.clo,
    };
    let search = ComfortGridSearch::new(params, Iso7730Pmv::default());
    let outcome = search.search(&conditions)?;

    if export {
        return export_table(config, &outcome.lookup_table, desired_temp, humidity);
    }

    println!(
        "🔍 {} cells, target PMV {:.2} (met {:.2}, clo {:.2})",
        outcome.lookup_table.len(),
        outcome.target_pmv,
        physiology.met,
        physiology.clo
    );
    println!("   {:>10} | {:>10} | {:>8}", "AC (°C)", "Air (m/s)", "PMV");
    println!("{}", "─".repeat(40));
    for sample in &outcome.lookup_table {
        let marker = if *sample == outcome.optimal { "👉" } else { "  " };
        println!(
            "{} {:>10.1} | {:>10.2} | {:>8.3}",
            marker, sample.ac_temp, sample.air_velocity, sample.pmv
        );
    }
    println!("{}", "─".repeat(40));
    Ok(())
}

fn cmd_fans() -> Result<()> {
    println!("🌀 Ceiling fan speeds:");
    println!(
        "{:<8} | {:>5} | {:>14} | {:>10} | {:>10}",
        "Speed", "RPM", "Delivery", "Velocity", "Preference"
    );
    println!("{}", "─".repeat(60));
    for point in catalog::catalog() {
        let rank = FAN_PREFERENCE_ORDER
            .iter()
            .position(|&rpm| rpm == point.rpm)
            .map(|i| i + 1)
            .unwrap_or(0);
        println!(
            "{:<8} | {:>5} | {:>8.0} m³/min | {:>6.2} m/s | {:>10}",
            format!("Speed {}", point.speed_level),
            point.rpm,
            point.rated_air_delivery,
            point.velocity(),
            rank
        );
    }
    println!("{}", "─".repeat(60));
    Ok(())
}

fn cmd_clothing() -> Result<()> {
    println!("👕 Clothing types:");
    for (i, (name, clo)) in CLOTHING_TABLE.iter().enumerate() {
        println!("  {}. {:<22} {:.1} clo", i + 1, name, clo);
    }
    println!("   Anything else is treated as summer clothing.");
    Ok(())
}

fn cmd_config(path: &Path, config: &AppConfig, init: bool) -> Result<()> {
    if init {
        if storage::ensure_config_exists(path)? {
            println!("✅ Created default config at {}", path.display());
        } else {
            println!("Config already exists at {}", path.display());
        }
    }

    println!("📁 Config file: {}", path.display());
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", json);
    Ok(())
}
