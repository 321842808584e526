use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ghosttype::config::TypingConfig;
use ghosttype::model::Script;
use ghosttype::playback::{Outcome, Player};
use ghosttype::script::generate_script;
use ghosttype::sim;
use ghosttype::surface::TerminalSurface;

#[derive(Debug, Args, Clone)]
struct ConfigArgs {
    /// Minimum per-character delay (ms)
    #[arg(long, default_value_t = 60)]
    char_delay_min: u64,

    /// Maximum per-character delay (ms)
    #[arg(long, default_value_t = 140)]
    char_delay_max: u64,

    /// Minimum pause after a sentence (ms)
    #[arg(long, default_value_t = 30_000)]
    break_min: u64,

    /// Maximum pause after a sentence (ms)
    #[arg(long, default_value_t = 120_000)]
    break_max: u64,

    /// Typo probability per character (0.0-1.0)
    #[arg(long, default_value_t = 0.05)]
    typo_rate: f64,
}

impl ConfigArgs {
    fn to_config(&self) -> TypingConfig {
        TypingConfig {
            min_char_delay_ms: self.char_delay_min,
            max_char_delay_ms: self.char_delay_max,
            min_sentence_break_ms: self.break_min,
            max_sentence_break_ms: self.break_max,
            typo_probability: self.typo_rate,
        }
        .normalized()
    }
}

#[derive(Debug, Parser)]
#[command(name = "ghosttype")]
#[command(about = "Human-like typing simulator with randomized delays and typos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a typing script (JSON)
    Script {
        /// Input text file, or '-' for stdin
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Output script file (defaults to stdout)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Optional RNG seed (for debugging)
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Play a script into the terminal
    Play {
        /// Script file (JSON)
        #[arg(long, value_name = "PATH")]
        script: PathBuf,

        /// Countdown seconds before playback starts
        #[arg(long, default_value_t = 5)]
        countdown: u64,

        /// Disable console typing trace output
        #[arg(long)]
        no_trace: bool,

        /// Skip playback and print the replayed text instead
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate a script then immediately play it
    Run {
        /// Input text file, or '-' for stdin
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Countdown seconds before playback starts
        #[arg(long, default_value_t = 5)]
        countdown: u64,

        /// Disable console typing trace output
        #[arg(long)]
        no_trace: bool,

        /// Optional output script file to save
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Optional RNG seed (for debugging)
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == std::ffi::OsStr::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: &PathBuf, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn print_stats(verb: &str, script: &Script) {
    let stats = sim::stats(script);
    eprintln!(
        "{verb}: {} actions, {} inserts, {} deletions, ~{:.1} min",
        stats.actions,
        stats.inserts,
        stats.deletions,
        (stats.total_wait_ms as f64) / 1000.0 / 60.0
    );
}

fn play_script(script: &Script, countdown: u64, trace: bool) -> Result<()> {
    let player = Player::new();
    let cancel = player.cancel_flag();
    ctrlc::set_handler(move || {
        cancel.cancel();
    })
    .context("failed to install Ctrl+C handler")?;

    let mut surface = TerminalSurface;
    let outcome = player.play(script, &mut surface, countdown, trace)?;
    println!();

    match outcome {
        Outcome::Completed => eprintln!("Done."),
        Outcome::Cancelled => eprintln!("Typing cancelled."),
        Outcome::Busy => eprintln!("A typing session is already running."),
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Script {
            input,
            output,
            seed,
            config,
        } => {
            let text = read_input(&input)?;
            let mut rng = rng_from_seed(seed);
            let script = generate_script(&text, &config.to_config(), &mut rng)?;

            print_stats("Scripted", &script);

            let json =
                serde_json::to_string_pretty(&script).context("failed to serialize script")?;
            if let Some(out) = output {
                write_output(&out, &json)?;
            } else {
                println!("{json}");
            }
        }
        Command::Play {
            script,
            countdown,
            no_trace,
            dry_run,
        } => {
            let json = fs::read_to_string(&script)
                .with_context(|| format!("failed to read {}", script.display()))?;
            let script: Script =
                serde_json::from_str(&json).context("failed to parse script JSON")?;

            if dry_run {
                println!("{}", sim::replay_text(&script.actions));
                return Ok(());
            }

            print_stats("Playing", &script);
            play_script(&script, countdown, !no_trace)?;
        }
        Command::Run {
            input,
            countdown,
            no_trace,
            output,
            seed,
            config,
        } => {
            let text = read_input(&input)?;
            let mut rng = rng_from_seed(seed);
            let script = generate_script(&text, &config.to_config(), &mut rng)?;

            print_stats("Scripted", &script);

            if let Some(out) = output {
                let json =
                    serde_json::to_string_pretty(&script).context("failed to serialize script")?;
                write_output(&out, &json)?;
            }

            play_script(&script, countdown, !no_trace)?;
        }
    }

    Ok(())
}
