use clap::{Args, Parser, Subcommand};
use ovuflow_core::input::format_date;
use ovuflow_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ovuflow")]
#[command(about = "Ovulation and cycle landmark calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override where the result record is saved
    #[arg(long, global = true)]
    record_path: Option<PathBuf>,

    /// Don't write the result record
    #[arg(long, global = true)]
    no_save: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct CycleArgs {
    /// First day of the last period (YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// Days from one period start to the next (default from config)
    #[arg(long, allow_hyphen_values = true)]
    cycle_length: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show predicted ovulation and upcoming fertile windows
    Fertile {
        #[command(flatten)]
        cycle: CycleArgs,
    },

    /// Show when to take a pregnancy test
    PregnancyTest {
        #[command(flatten)]
        cycle: CycleArgs,
    },

    /// Show the estimated due date
    DueDate {
        #[command(flatten)]
        cycle: CycleArgs,
    },

    /// Show every landmark date
    Summary {
        #[command(flatten)]
        cycle: CycleArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show illustrative hormone levels across the cycle
    Hormones {
        #[command(flatten)]
        cycle: CycleArgs,

        /// Health condition (normal, pcos, thyroid-issues)
        #[arg(long)]
        condition: Option<HealthCondition>,

        /// Exercise level (very-active, normal, sedentary)
        #[arg(long)]
        exercise: Option<ExerciseLevel>,

        /// Also export the series to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the last saved record
    Show,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        ovuflow_core::logging::init_with_level("debug");
    } else {
        ovuflow_core::logging::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_validation() => {
            eprintln!("Invalid input: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let record_path = cli
        .record_path
        .unwrap_or_else(|| config.output.record_path.clone());
    let save_to = (!cli.no_save).then_some(record_path.as_path());
    tracing::debug!("Record path: {:?} (save: {})", record_path, save_to.is_some());

    match cli.command {
        Commands::Fertile { cycle } => {
            let (_, landmarks) = calculate(&cycle, &config, save_to)?;
            display_fertile(&landmarks);
        }
        Commands::PregnancyTest { cycle } => {
            let (_, landmarks) = calculate(&cycle, &config, save_to)?;
            println!(
                "You can take a pregnancy test on:\n{}",
                format_date(landmarks.pregnancy_test_date)
            );
        }
        Commands::DueDate { cycle } => {
            let (_, landmarks) = calculate(&cycle, &config, save_to)?;
            println!(
                "Your estimated due date is:\n{}",
                format_date(landmarks.due_date)
            );
        }
        Commands::Summary { cycle, json } => {
            let (input, landmarks) = calculate(&cycle, &config, save_to)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&landmarks)?);
            } else {
                display_summary(&input, &landmarks);
            }
        }
        Commands::Hormones {
            cycle,
            condition,
            exercise,
            csv,
            json,
        } => cmd_hormones(
            &cycle,
            &config,
            condition.unwrap_or(config.profile.health_condition),
            exercise.unwrap_or(config.profile.exercise_level),
            csv.as_deref(),
            json,
        )?,
        Commands::Show => {
            if !record_path.exists() {
                println!("No saved record at {}", record_path.display());
                return Ok(());
            }
            let record = load_record(&record_path)?;
            display_summary(&record.input, &record.landmarks);
        }
    }

    Ok(())
}

/// Validate the raw arguments once, compute landmarks, and save the record
fn calculate(
    cycle: &CycleArgs,
    config: &Config,
    save_to: Option<&Path>,
) -> Result<(CycleInput, LandmarkResult)> {
    let input = resolve_input(cycle, config)?;
    let landmarks = compute(&input);

    if let Some(path) = save_to {
        save_record(path, &input, &landmarks)?;
    }

    Ok((input, landmarks))
}

fn resolve_input(cycle: &CycleArgs, config: &Config) -> Result<CycleInput> {
    match &cycle.cycle_length {
        Some(raw) => CycleInput::parse(&cycle.start, raw),
        None => CycleInput::new(
            ovuflow_core::input::parse_date(&cycle.start)?,
            config.profile.cycle_length,
        ),
    }
}

fn cmd_hormones(
    cycle: &CycleArgs,
    config: &Config,
    condition: HealthCondition,
    exercise: ExerciseLevel,
    csv_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let input = resolve_input(cycle, config)?;
    let landmarks = compute(&input);
    let series = synthesize(&input, &landmarks.fertile_windows, condition, exercise);

    if json {
        println!("{}", serde_json::to_string_pretty(&series)?);
    } else {
        display_series(&input, &series);
    }

    if let Some(path) = csv_path {
        let count = export_series_csv(&series, path)?;
        if !json {
            println!("\n✓ Exported {} days to {}", count, path.display());
        }
    }

    Ok(())
}

fn display_fertile(landmarks: &LandmarkResult) {
    println!(
        "You will likely ovulate on {}.",
        format_date(landmarks.ovulation_date)
    );
    println!("Your upcoming fertile windows are:");
    for (i, window) in landmarks.fertile_windows.iter().enumerate() {
        println!(
            "Fertile Window {}: {} to {}",
            i + 1,
            format_date(window.start),
            format_date(window.end)
        );
    }
}

fn display_summary(input: &CycleInput, landmarks: &LandmarkResult) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CYCLE LANDMARKS");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Cycle start:        {} ({} days)",
        format_date(input.start_date()),
        input.cycle_length()
    );
    println!("  Ovulation:          {}", format_date(landmarks.ovulation_date));
    for (i, window) in landmarks.fertile_windows.iter().enumerate() {
        println!(
            "  Fertile window {}:   {} to {}",
            i + 1,
            format_date(window.start),
            format_date(window.end)
        );
    }
    println!("  Next period:        {}", format_date(landmarks.next_period_date));
    println!(
        "  Pregnancy test:     {}",
        format_date(landmarks.pregnancy_test_date)
    );
    println!("  Estimated due date: {}", format_date(landmarks.due_date));
    println!();
}

fn display_series(input: &CycleInput, series: &HormoneSeries) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  HORMONE LEVELS");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Condition: {}, Exercise Level: {} ({}-day cycle)",
        series.health_condition,
        series.exercise_level,
        input.cycle_length()
    );
    println!();
    println!(
        "  {:>4}  {:>9}  {:>12}  {:>6}",
        "Day", "Estrogen", "Progesterone", "LH"
    );

    for sample in &series.samples {
        let day = i64::from(sample.day);
        let marker = if day == series.ovulation_day() {
            "  ← ovulation"
        } else if series.is_fertile_day(day) {
            "  fertile"
        } else {
            ""
        };
        println!(
            "  {:>4}  {:>9.3}  {:>12.3}  {:>6.3}{}",
            sample.day, sample.estrogen, sample.progesterone, sample.lh, marker
        );
    }

    println!();
    for hormone in Hormone::ALL {
        if let Some(peak) = series.peak(hormone) {
            println!(
                "  Peak {}: {:.3} on day {}",
                series.legend(hormone),
                peak.level(hormone),
                peak.day
            );
        }
    }
    println!();
}
