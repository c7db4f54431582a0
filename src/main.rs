use anyhow::Context;
use clap::Parser;
use glyphreveal::scramble::LetterCase;
use glyphreveal::{Config, ConfigFile, ScrambleSession, terminal};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Scramble random glyphs in the terminal and reveal words in the middle of them.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Comma separated list of words to cycle through.
    words: Option<String>,

    /// How long a fully revealed word stays on screen, in milliseconds (at least 500).
    #[clap(long)]
    hold_time: Option<u64>,

    /// Frames drawn per second (1-60).
    #[clap(long)]
    fps: Option<u32>,

    /// Milliseconds between revealing two characters.
    #[clap(long)]
    reveal_speed: Option<u64>,

    /// Milliseconds between scrambling two characters back.
    #[clap(long)]
    unreveal_speed: Option<u64>,

    /// How long only noise is shown before a word starts being revealed, in milliseconds.
    #[clap(long)]
    scramble_duration: Option<u64>,

    /// The case every character is shown in.
    #[clap(long, value_enum)]
    letter_case: Option<LetterCase>,

    /// The path to the configuration file.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Don't show the input panel; only the quit keys work.
    #[clap(long)]
    no_input: bool,

    /// Seed for the noise characters.
    #[clap(long)]
    seed: Option<u64>,

    /// Write logs to this file instead of stderr.
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Build the configuration: defaults, then the configuration file, then the command line.
    fn build_config(&self) -> anyhow::Result<Config> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::load_default()?,
        };
        let mut config = Config::default();
        config.merge_file(file);

        if let Some(letter_case) = self.letter_case {
            config.set_letter_case(letter_case);
        }
        if let Some(words) = &self.words {
            config.set_word_text(words);
        }
        if let Some(hold_time) = self.hold_time {
            config.set_hold_time_millis(hold_time.min(i64::MAX as u64) as i64);
        }
        if let Some(fps) = self.fps {
            config.set_fps(fps as i64);
        }
        if let Some(speed) = self.reveal_speed {
            config.set_reveal_speed_millis(speed);
        }
        if let Some(speed) = self.unreveal_speed {
            config.set_unreveal_speed_millis(speed);
        }
        if let Some(duration) = self.scramble_duration {
            config.set_scramble_duration_millis(duration);
        }
        Ok(config)
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path).with_context(|| format!("failed to create log file '{}'", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("failed to initialize logging")?;
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.log_file.as_deref())?;
    let config = cli.build_config()?;
    let rng = match cli.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let session = ScrambleSession::new(config, rng, Duration::ZERO);
    terminal::run(session, !cli.no_input).context("animation failed")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("[glyphreveal] error: {e:#}");
        std::process::exit(1);
    }
}
