use clap::{Parser, Subcommand};
use ggos_core::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "ggos")]
#[command(about = "Turn gaming deaths into a bodyweight workout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workout for a number of deaths
    Generate {
        /// Deaths to convert into exercise
        #[arg(allow_negative_numbers = true)]
        deaths: i64,

        /// Dry run - show the workout without recording it
        #[arg(long)]
        dry_run: bool,

        /// Auto-complete (for scripting) - record without prompting
        #[arg(long, conflicts_with = "dry_run")]
        auto_complete: bool,
    },

    /// Manage the exercise catalog
    Exercises {
        #[command(subcommand)]
        action: Option<ExerciseAction>,
    },

    /// Show workout history and statistics
    History {
        /// Which workouts to show (all, recent, high, low)
        #[arg(long, default_value = "all")]
        filter: String,

        /// Delete the whole history
        #[arg(long)]
        clear: bool,
    },

    /// Export workout history to CSV
    Export {
        /// Destination CSV file (appended to if it exists)
        path: PathBuf,
    },

    /// Show or change front-end settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Subcommand)]
enum ExerciseAction {
    /// List exercises (default)
    List,
    /// Add an exercise
    Add {
        name: String,
        /// reps or seconds
        #[arg(long, default_value = "reps")]
        unit: String,
        /// Amount per death
        #[arg(long)]
        amount: u32,
    },
    /// Edit an exercise by id or name
    Edit {
        exercise: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        unit: Option<String>,
        #[arg(long)]
        amount: Option<u32>,
    },
    /// Remove an exercise by id or name
    Remove { exercise: String },
    /// Replace the catalog with the starter exercises
    Reset,
    /// Remove every exercise
    Clear,
    /// Add starter exercises that are not already present
    Presets,
}

#[derive(Subcommand)]
enum SettingsAction {
    /// List settings (default)
    List,
    /// Set a value; JSON literals (true, 3) are parsed, anything else is a string
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    ggos_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);
    let storage = Storage::new(data_dir);

    match cli.command {
        Commands::Generate {
            deaths,
            dry_run,
            auto_complete,
        } => cmd_generate(storage, &config, deaths, dry_run, auto_complete),
        Commands::Exercises { action } => {
            cmd_exercises(storage, &config, action.unwrap_or(ExerciseAction::List))
        }
        Commands::History { filter, clear } => cmd_history(&storage, &filter, clear),
        Commands::Export { path } => cmd_export(&storage, &path),
        Commands::Settings { action } => {
            cmd_settings(&storage, action.unwrap_or(SettingsAction::List))
        }
    }
}

fn cmd_generate(
    storage: Storage,
    config: &Config,
    deaths: i64,
    dry_run: bool,
    auto_complete: bool,
) -> Result<()> {
    let session = WorkoutSession::open(storage, config)?;

    loop {
        let workout = session.generate(deaths);
        display_workout(&workout);

        if dry_run {
            println!("\n[Dry run - not recording workout]");
            return Ok(());
        }

        if workout.is_empty() {
            println!("\nNothing to record.");
            return Ok(());
        }

        let action = if auto_complete {
            UserAction::Done
        } else {
            prompt_user_action()?
        };

        match action {
            UserAction::Reroll => {
                println!("\nRerolling...\n");
                continue;
            }
            UserAction::Quit => {
                println!("\nWorkout discarded.");
                return Ok(());
            }
            UserAction::Done => {
                session.record_completion(&workout)?;
                println!("\n✓ Workout logged!");
                return Ok(());
            }
        }
    }
}

fn cmd_exercises(storage: Storage, config: &Config, action: ExerciseAction) -> Result<()> {
    let mut session = WorkoutSession::open(storage, config)?;

    match action {
        ExerciseAction::List => {
            display_catalog(session.catalog());
        }
        ExerciseAction::Add { name, unit, amount } => {
            let definition = ExerciseDefinition::new(name, parse_unit(&unit)?, amount)?;
            let added = format!(
                "✓ Added '{}' ({} {} per death)",
                definition.name, definition.amount_per_death, definition.unit_kind
            );
            session.add_exercise(definition)?;
            println!("{}", added);
        }
        ExerciseAction::Edit {
            exercise,
            name,
            unit,
            amount,
        } => {
            let id = resolve_exercise(session.catalog(), &exercise)?;
            let changes = ExerciseChanges {
                name,
                unit_kind: unit.as_deref().map(parse_unit).transpose()?,
                amount_per_death: amount,
            };
            if changes.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }
            let updated = session.update_exercise(id, changes)?;
            println!(
                "✓ Updated '{}' ({} {} per death)",
                updated.name, updated.amount_per_death, updated.unit_kind
            );
        }
        ExerciseAction::Remove { exercise } => {
            let id = resolve_exercise(session.catalog(), &exercise)?;
            let removed = session.remove_exercise(id)?;
            println!("✓ Removed '{}'", removed.name);
        }
        ExerciseAction::Reset => {
            session.reset_to_defaults()?;
            println!("✓ Restored {} default exercises", session.catalog().len());
        }
        ExerciseAction::Clear => {
            session.clear_exercises()?;
            println!("✓ Removed all exercises");
        }
        ExerciseAction::Presets => {
            let added = session.merge_defaults()?;
            println!("✓ Added {} preset exercises", added);
        }
    }

    Ok(())
}

fn cmd_history(storage: &Storage, filter: &str, clear: bool) -> Result<()> {
    if clear {
        storage.clear_history()?;
        println!("✓ Workout history cleared");
        return Ok(());
    }

    let filter = HistoryFilter::parse(filter).unwrap_or_else(|| {
        eprintln!("Unknown filter: {}. Showing all workouts.", filter);
        HistoryFilter::All
    });

    let history = storage.load_history()?;
    let shown = filter.apply(&history);

    if shown.is_empty() {
        println!("No workout history found.");
    }

    for snapshot in &shown {
        let local = snapshot.timestamp.with_timezone(&chrono::Local);
        println!("{}", local.format("%Y-%m-%d %H:%M"));
        println!(
            "  Deaths: {} ({} accounted)",
            snapshot.requested_deaths, snapshot.total_deaths_accounted
        );
        println!("  Summary: {}", snapshot.summary);
        for entry in &snapshot.entries {
            println!(
                "    • {} {} ({} deaths)",
                entry.allocated_amount, entry.name, entry.deaths_allocated
            );
        }
        println!();
    }

    let stats = HistoryStats::from_snapshots(&history);
    println!("─────────────────────────────────────────");
    println!("Total workouts: {}", stats.total_workouts);
    println!("Total deaths:   {}", stats.total_deaths);
    println!("Avg deaths:     {:.1}", stats.average_deaths);
    println!("Total reps:     {}", stats.total_reps);
    println!("Total seconds:  {}", stats.total_seconds);

    Ok(())
}

fn cmd_export(storage: &Storage, path: &Path) -> Result<()> {
    let history = storage.load_history()?;
    if history.is_empty() {
        println!("No workout history - nothing to export.");
        return Ok(());
    }

    let rows = export_history(&history, path)?;
    println!("✓ Exported {} rows from {} workouts", rows, history.len());
    println!("  CSV: {}", path.display());
    Ok(())
}

fn cmd_settings(storage: &Storage, action: SettingsAction) -> Result<()> {
    let settings = match action {
        SettingsAction::List => storage.load_settings()?,
        SettingsAction::Set { key, value } => {
            let parsed = serde_json::from_str::<serde_json::Value>(&value)
                .ok()
                .filter(|v| !v.is_array() && !v.is_object())
                .unwrap_or(serde_json::Value::String(value));
            let settings = storage.set_setting(&key, parsed)?;
            println!("✓ Saved setting '{}'", key);
            settings
        }
    };

    for (key, value) in &settings {
        println!("{} = {}", key, value);
    }
    Ok(())
}

fn parse_unit(s: &str) -> Result<UnitKind> {
    UnitKind::parse(s).ok_or_else(|| {
        Error::InvalidExercise(format!("unknown unit '{}' (expected reps or seconds)", s))
    })
}

/// Accept either an exercise id or its (case-insensitive) name
fn resolve_exercise(catalog: &ExerciseCatalog, key: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(key) {
        return catalog.get(id).map(|e| e.id).ok_or(Error::NotFound(id));
    }
    catalog
        .find_by_name(key)
        .map(|e| e.id)
        .ok_or_else(|| Error::Other(format!("No exercise named '{}'", key)))
}

fn display_catalog(catalog: &ExerciseCatalog) {
    if catalog.is_empty() {
        println!("No exercises. Run `ggos exercises reset` to load the starter set.");
        return;
    }

    for (i, exercise) in catalog.all().iter().enumerate() {
        println!(
            "{:>2}. {} - {} {} per death",
            i + 1,
            exercise.name,
            exercise.amount_per_death,
            exercise.unit_kind
        );
        println!("    id: {}", exercise.id);
    }
}

fn display_workout(workout: &Workout) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  WORKOUT FOR {} DEATHS", workout.requested_deaths);
    println!("╰─────────────────────────────────────────╯");
    println!();

    let groups = workout.grouped_by_unit();
    for (label, entries) in [("Reps", &groups.reps), ("Timed", &groups.seconds)] {
        if entries.is_empty() {
            continue;
        }
        println!("  {}:", label);
        for entry in entries.iter() {
            println!("  → {}", entry.display_text());
        }
        println!();
    }

    println!("  Total: {}", workout.summary());
    let shortfall = workout.shortfall();
    if shortfall > 0 && !workout.is_empty() {
        println!("  ({} deaths left unassigned)", shortfall);
    }
}

enum UserAction {
    Done,
    Reroll,
    Quit,
}

fn prompt_user_action() -> Result<UserAction> {
    println!("─────────────────────────────────────────");
    println!("Press Enter when done");
    println!("  'r' + Enter to reroll");
    println!("  'q' + Enter to quit without logging");
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let action = match input.trim().to_lowercase().as_str() {
        "r" => UserAction::Reroll,
        "q" => UserAction::Quit,
        _ => UserAction::Done,
    };

    Ok(action)
}
