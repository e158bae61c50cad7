//! Luna Meter CLI
//!
//! Usage:
//!   luna-meter --text "your message"              # Single message update
//!   luna-meter --interaction focus --intensity 0.2 # Single interaction update
//!   luna-meter --interactive                       # Interactive mode
//!   luna-meter --serve                             # HTTP API server
//!   luna-meter --text "msg" --json                 # JSON output

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use luna_meter::core::{EmotionalMeter, MeterConfig, run_server};
use luna_meter::types::{MeterError, UpdateResult};
use luna_meter::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "luna-meter",
    version = VERSION,
    about = "Luna emotional meter - score messages between desire and work",
    long_about = "Luna Meter tracks a mood level between 0.0 (pure lust) and 1.0 (pure work).\n\n\
                  Lust keywords pull the level down, work keywords pull it up.\n\
                  Crossing 0.1 or 0.9 fires a release back to 0.5.\n\n\
                  Modes:\n  \
                  --text         Single message\n  \
                  --interaction  Single interaction-type update\n  \
                  --interactive  One message per line\n  \
                  --serve        HTTP API server mode"
)]
struct Args {
    /// Message to score (single mode)
    #[arg(short, long)]
    text: Option<String>,

    /// Interaction kind: lustful|sexual|desire|passion|work|achievement|focus|creation|release
    #[arg(long)]
    interaction: Option<String>,

    /// Step size for --interaction
    #[arg(long)]
    intensity: Option<f64>,

    /// Interactive mode - read lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Meter state file, loaded on start and saved after updates
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Meter configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show lexicon breakdown
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(&args).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let meter = build_meter(args)?;

    if args.serve {
        print_header("API Server");
        run_server(&args.addr, meter, args.state_file.clone()).await?;
    } else if let Some(ref kind) = args.interaction {
        run_interaction(meter, kind, args)?;
    } else if let Some(ref text) = args.text {
        run_single(meter, text, args)?;
    } else {
        run_interactive(meter, args)?;
    }
    Ok(())
}

/// Meter from config file (if any) with state loaded from the state file (if any)
fn build_meter(args: &Args) -> Result<EmotionalMeter, MeterError> {
    let config = match args.config {
        Some(ref path) => MeterConfig::load(path)?,
        None => MeterConfig::default(),
    };
    let mut meter = EmotionalMeter::with_config(config)?;
    if let Some(ref path) = args.state_file {
        meter.load_state(path)?;
    }
    Ok(meter)
}

fn persist(meter: &EmotionalMeter, args: &Args) -> Result<(), MeterError> {
    match args.state_file {
        Some(ref path) => meter.save_state(path),
        None => Ok(()),
    }
}

/// Run single message evaluation
fn run_single(mut meter: EmotionalMeter, text: &str, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let result = meter.update_with_message(text);
    print_result(&result, args)?;
    persist(&meter, args)?;
    Ok(())
}

/// Run single interaction-type update
fn run_interaction(mut meter: EmotionalMeter, kind: &str, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let result = meter.update_with_interaction_label(kind, args.intensity);
    print_result(&result, args)?;
    persist(&meter, args)?;
    Ok(())
}

/// Run interactive mode
fn run_interactive(mut meter: EmotionalMeter, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    print_header("Interactive");
    println!("Type a message and press Enter. Commands:");
    println!("  /interact <kind> [intensity]   /decay   /reset   /status   /history   /save   quit");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let state = meter.state();
        print!("{} ", format!("{} [{} {:.3}] >", state.emoji(), state, meter.level()).color(state.color()));
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Updates: {}", meter.update_count());
            break;
        }
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            run_command(&mut meter, command, args)?;
            continue;
        }

        let result = meter.update_with_message(line);
        print_result(&result, args)?;
    }

    persist(&meter, args)?;
    Ok(())
}

/// Handle a REPL command
fn run_command(meter: &mut EmotionalMeter, command: &str, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or_default() {
        "interact" => {
            let Some(kind) = parts.next() else {
                println!("{}", "usage: /interact <kind> [intensity]".yellow());
                return Ok(());
            };
            let intensity = match parts.next().map(str::parse::<f64>) {
                Some(Ok(v)) => Some(v),
                Some(Err(_)) => {
                    println!("{}", "intensity must be a number".yellow());
                    return Ok(());
                }
                None => None,
            };
            let result = meter.update_with_interaction_label(kind, intensity);
            print_result(&result, args)?;
        }
        "decay" => print_result(&meter.decay_toward_balance(), args)?,
        "reset" => print_result(&meter.reset(), args)?,
        "status" => println!("{}", serde_json::to_string_pretty(&meter.status())?),
        "history" => {
            let recent = meter.recent_releases(10);
            if recent.is_empty() {
                println!("No releases yet.");
            }
            for event in recent {
                println!(
                    "  {} from={:.3} trigger={} after {:.1}s",
                    event.kind, event.from_level, event.trigger, event.duration
                );
            }
        }
        "save" => match args.state_file {
            Some(ref path) => {
                meter.save_state(path)?;
                println!("Saved to {}", path.display());
            }
            None => println!("{}", "no --state-file given".yellow()),
        },
        other => println!("{}", format!("unknown command: /{}", other).yellow()),
    }
    Ok(())
}

/// Print header
fn print_header(mode: &str) {
    println!("{}", format!("Luna Meter v{} - {}", VERSION, mode).bold());
    println!("{}", "========================================".bold());
    println!();
}

/// Print an update result in the selected format
fn print_result(result: &UpdateResult, args: &Args) -> Result<(), serde_json::Error> {
    if args.json {
        println!("{}", serde_json::to_string(result)?);
        return Ok(());
    }

    if args.no_color {
        println!("{}", result.to_parseable_string());
    } else {
        println!("{}", result.to_terminal_string());
    }

    if args.verbose {
        print_breakdown(result);
    }

    if let Some(ref event) = result.release_event {
        let line = format!(
            "  ✦ {} release at {:.3} ({}) - back to balance",
            event.kind, event.from_level, event.trigger
        );
        println!("{}", line.bright_yellow().bold());
    }
    Ok(())
}

/// Print lexicon hits
fn print_breakdown(result: &UpdateResult) {
    let b = &result.breakdown;
    println!("  {} {:.3} avg", "lust:".magenta(), b.lust_average);
    for hit in &b.lust_hits {
        println!("    {:<12} {:.2}", hit.keyword, hit.weight);
    }
    println!("  {} {:.3} avg", "work:".blue(), b.work_average);
    for hit in &b.work_hits {
        println!("    {:<12} {:.2}", hit.keyword, hit.weight);
    }
    println!("  {} {}", "state:".dimmed(), result.description);
}
