//! World Tree CLI
//!
//! Usage:
//!   worldtree --text "today I..."            # Analyze one entry
//!   worldtree --interactive                  # Journal loop, one entry per line
//!   worldtree --suggest                      # Writing prompts
//!   worldtree --prompts                      # Behavioral prompts
//!   worldtree --trends                       # Trends across saved entries
//!   worldtree --serve                        # HTTP API server
//!   worldtree log sleep --hours 7.5          # Log a behavioral signal
//!   worldtree --text "..." --json            # JSON output

use clap::{Parser, Subcommand};
use colored::Colorize;
use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::EnvFilter;

use worldtree::core::{
    run_server, BehavioralPromptGenerator, JsonStore, ReflectionService,
    SuggestionRanker,
};
use worldtree::error::StoreError;
use worldtree::types::{
    Analysis, Coordinates, JournalEntry, LocationRecord, MusicRecord, ScreenTimeRecord,
    SleepRecord, Suggestion, TrendReport, WorkoutRecord,
};
use worldtree::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "worldtree",
    version = VERSION,
    about = "World Tree - reflective journaling prompts and insights",
    long_about = "World Tree analyzes journal entries for themes and thinking patterns,\n\
                  asks follow-up questions, and suggests what to write about next.\n\n\
                  Modes:\n  \
                  --text         Analyze one entry\n  \
                  --interactive  Journal loop (one entry per line)\n  \
                  --suggest      Writing prompts for right now\n  \
                  --prompts      Prompts from logged sleep, workouts, music, places, screen time\n  \
                  --trends       Themes across saved entries\n  \
                  --serve        HTTP API server mode"
)]
struct Args {
    /// Entry text to analyze
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive journal mode - read entries from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Show ranked writing suggestions
    #[arg(long)]
    suggest: bool,

    /// Show behavioral prompts
    #[arg(long)]
    prompts: bool,

    /// Show trends across saved analyses
    #[arg(long)]
    trends: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Directory for journal data
    #[arg(long, default_value = "./worldtree-data")]
    data_dir: String,

    /// Analyze without saving entries
    #[arg(long)]
    no_save: bool,

    /// Seed for question and prompt selection
    #[arg(long)]
    seed: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show matched keywords and pattern triggers
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log a behavioral signal
    Log {
        #[command(subcommand)]
        signal: Signal,
    },
}

#[derive(Subcommand, Debug)]
enum Signal {
    /// Hours slept last night
    Sleep {
        #[arg(long)]
        hours: f64,
        /// Quality 1-5
        #[arg(long)]
        quality: Option<u8>,
    },
    /// A workout session
    Workout {
        #[arg(long = "type")]
        workout_type: String,
        #[arg(long, default_value_t = 30)]
        duration: u32,
        #[arg(long, default_value = "medium")]
        intensity: String,
    },
    /// A track you listened to
    Music {
        #[arg(long)]
        track: String,
        #[arg(long, default_value = "")]
        genre: String,
        #[arg(long, default_value = "")]
        mood: String,
    },
    /// A place you visited
    Location {
        #[arg(long)]
        name: String,
        #[arg(long, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lon: Option<f64>,
    },
    /// Screen time today
    Screen {
        #[arg(long)]
        hours: f64,
        /// Comma-separated app categories
        #[arg(long, value_delimiter = ',')]
        apps: Vec<String>,
    },
    /// Clear all behavioral logs
    Clear,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("worldtree=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if args.serve {
        run_serve(&args).await
    } else {
        run_local(&args).map_err(Into::into)
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

/// Every mode except the server
fn run_local(args: &Args) -> Result<(), StoreError> {
    if let Some(Command::Log { ref signal }) = args.command {
        open_store(args).and_then(|mut store| run_log(signal, &mut store))
    } else if let Some(ref text) = args.text {
        open_journal(args).and_then(|mut store| run_single(text, args, store.as_mut()))
    } else if args.suggest {
        open_store(args).map(|store| run_suggest(args, &store))
    } else if args.prompts {
        open_store(args).map(|store| run_prompts(args, &store))
    } else if args.trends {
        open_store(args).map(|store| run_trends(args, &store))
    } else {
        // Default to interactive if no mode specified
        open_journal(args).and_then(|mut store| run_interactive(args, store.as_mut()))
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn make_rng(args: &Args) -> StdRng {
    match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn open_store(args: &Args) -> Result<JsonStore, StoreError> {
    JsonStore::open(&args.data_dir)
}

/// The store entries are written to; none with `--no-save`
fn open_journal(args: &Args) -> Result<Option<JsonStore>, StoreError> {
    if args.no_save {
        return Ok(None);
    }
    open_store(args).map(Some)
}

/// Analyze (and save) one entry
fn run_single(text: &str, args: &Args, store: Option<&mut JsonStore>) -> Result<(), StoreError> {
    let service = ReflectionService::new();
    let mut rng = make_rng(args);
    let analysis = record_entry(text, &service, &mut rng, store)?;

    if args.json {
        print_json(&analysis);
    } else {
        print_analysis(&analysis, args.verbose);
    }
    Ok(())
}

/// Interactive journal loop
fn run_interactive(args: &Args, mut store: Option<&mut JsonStore>) -> Result<(), StoreError> {
    let service = ReflectionService::new();
    let mut rng = make_rng(args);

    print_header("Journal");
    println!("Write an entry and press Enter. Type 'quit' to exit.");
    if store.is_some() {
        println!("Entries are saved to: {}", args.data_dir);
    }
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut written = 0usize;

    loop {
        print!("{} ", "✎".green());
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Entries: {}", written);
            break;
        }
        if line.is_empty() {
            continue;
        }

        let analysis = record_entry(line, &service, &mut rng, store.as_deref_mut())?;
        written += 1;

        if args.json {
            print_json_line(&analysis);
        } else {
            print_analysis(&analysis, args.verbose);
        }
    }

    Ok(())
}

fn record_entry(
    text: &str,
    service: &ReflectionService,
    rng: &mut StdRng,
    store: Option<&mut JsonStore>,
) -> Result<Analysis, StoreError> {
    let date = now();
    let analysis = service.analyze(text, date, rng);
    if let Some(store) = store {
        store.add_analyzed_entry(JournalEntry::new(date, text), analysis.clone())?;
    }
    Ok(analysis)
}

fn run_suggest(args: &Args, store: &JsonStore) {
    let ranker = SuggestionRanker::new();
    let mut rng = make_rng(args);
    let suggestions = ranker.generate_suggestions(now(), store, &mut rng);

    if args.json {
        print_json(&suggestions);
    } else {
        print_header("Suggestions");
        print_suggestions(&suggestions);
    }
}

fn run_prompts(args: &Args, store: &JsonStore) {
    let generator = BehavioralPromptGenerator::new();
    let prompts = generator.generate_contextual_prompts(store, now());

    if args.json {
        print_json(&prompts);
    } else {
        print_header("Behavioral prompts");
        if prompts.is_empty() {
            println!("{}", "Nothing stands out yet. Keep logging sleep, workouts, music, places and screen time.".dimmed());
        } else {
            print_suggestions(&prompts);
        }
    }
}

fn run_trends(args: &Args, store: &JsonStore) {
    let report = ReflectionService::new().generate_trends(store);

    if args.json {
        print_json(&report);
    } else {
        print_header("Trends");
        print_trends(&report);
    }
}

fn run_log(signal: &Signal, store: &mut JsonStore) -> Result<(), StoreError> {
    let timestamp = now();
    let (label, count) = match signal {
        Signal::Sleep { hours, quality } => {
            let record = SleepRecord { timestamp, hours: *hours, quality: *quality };
            store.update_behavior(|log| log.log_sleep(record))?;
            ("sleep", store.behavior().sleep().len())
        }
        Signal::Workout { workout_type, duration, intensity } => {
            let record = WorkoutRecord {
                timestamp,
                workout_type: workout_type.clone(),
                duration_minutes: *duration,
                intensity: intensity.clone(),
            };
            store.update_behavior(|log| log.log_workout(record))?;
            ("workout", store.behavior().workouts().len())
        }
        Signal::Music { track, genre, mood } => {
            let record = MusicRecord {
                timestamp,
                track: track.clone(),
                genre: genre.clone(),
                mood: mood.clone(),
            };
            store.update_behavior(|log| log.log_music(record))?;
            ("music", store.behavior().music().len())
        }
        Signal::Location { name, lat, lon } => {
            let coordinates = match (lat, lon) {
                (Some(latitude), Some(longitude)) => Some(Coordinates { latitude: *latitude, longitude: *longitude }),
                _ => None,
            };
            let record = LocationRecord { timestamp, name: name.clone(), coordinates };
            store.update_behavior(|log| log.log_location(record))?;
            ("location", store.behavior().locations().len())
        }
        Signal::Screen { hours, apps } => {
            let record = ScreenTimeRecord { timestamp, hours: *hours, app_categories: apps.clone() };
            store.update_behavior(|log| log.log_screen_time(record))?;
            ("screen time", store.behavior().screen_time().len())
        }
        Signal::Clear => {
            store.clear_behavior()?;
            println!("{}", "Behavioral logs cleared.".yellow());
            return Ok(());
        }
    };

    println!("{} Logged {} ({} records kept)", "✓".green(), label, count);
    Ok(())
}

/// Run HTTP API server
async fn run_serve(args: &Args) -> Result<(), Box<dyn Error>> {
    println!();
    println!("{}", format!("World Tree v{} - API Server", VERSION).bold());
    println!();

    run_server(&args.addr, &args.data_dir).await
}

// =============================================================================
// OUTPUT
// =============================================================================

fn print_header(mode: &str) {
    println!("{}", "════════════════════════════════════════".green());
    println!("{}", format!("  🌳 World Tree v{} - {}", VERSION, mode).bold());
    println!("{}", "════════════════════════════════════════".green());
    println!();
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("JSON error: {}", e),
    }
}

fn print_json_line<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("JSON error: {}", e),
    }
}

fn print_analysis(analysis: &Analysis, verbose: bool) {
    println!("{} {} words", "│".dimmed(), analysis.word_count);

    if analysis.themes.is_empty() {
        println!("{} {}", "│".dimmed(), "No themes detected".dimmed());
    } else {
        let themes: Vec<String> = analysis
            .themes
            .iter()
            .map(|m| format!("{} {} ({})", m.theme.icon(), m.theme, m.strength))
            .collect();
        println!("{} Themes: {}", "│".dimmed(), themes.join("  "));
    }

    if verbose {
        for m in &analysis.themes {
            println!("{}   {}: {}", "│".dimmed(), m.theme, m.keywords.join(", ").dimmed());
        }
        let p = &analysis.patterns;
        println!("{}   negative: {:?}", "│".dimmed(), p.negative);
        println!("{}   absolute: {:?}", "│".dimmed(), p.absolute);
        println!("{}   passive:  {:?}", "│".dimmed(), p.passive);
    }

    for insight in &analysis.insights {
        println!("{} {} {}", "│".dimmed(), insight.icon, insight.message.cyan());
    }

    if !analysis.questions.is_empty() {
        println!("{} Questions to explore:", "│".dimmed());
        for (i, q) in analysis.questions.iter().enumerate() {
            println!("{}   {}. {}", "│".dimmed(), i + 1, q.yellow());
        }
    }
    println!();
}

fn print_suggestions(suggestions: &[Suggestion]) {
    for s in suggestions {
        println!(
            "{} [{}] {}",
            s.icon,
            s.priority.to_string().bold(),
            s.prompt
        );
        println!("     {}", format!("{} · {}", s.kind, s.context).dimmed());
    }
}

fn print_trends(report: &TrendReport) {
    println!("{}", report.message.cyan());
    if !report.has_trends() {
        return;
    }
    println!();
    for trend in &report.trends {
        let bar = "█".repeat((trend.percentage / 10.0).round() as usize);
        println!(
            "  {} {:<14} {:>5.1}%  {}",
            trend.theme.icon(),
            trend.theme.to_string(),
            trend.percentage,
            bar.green()
        );
    }
    println!();
    println!("  Average length: {:.0} words over {} entries", report.average_word_count, report.analyses_count);
    if let Some(pattern) = report.dominant_pattern {
        println!("  Most frequent thinking pattern: {}", pattern);
    }
}
