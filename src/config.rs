use crate::scramble::LetterCase;
use crate::terminal::style::ColorScheme;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The word shown when nothing else is configured
pub const DEFAULT_WORDS: &str = "HALANS.DEV";
pub const DEFAULT_HOLD_TIME: Duration = Duration::from_millis(2000);
pub const DEFAULT_SCRAMBLE_DURATION: Duration = Duration::from_millis(1000);
pub const DEFAULT_REVEAL_SPEED: Duration = Duration::from_millis(100);
pub const DEFAULT_UNREVEAL_SPEED: Duration = Duration::from_millis(50);
pub const DEFAULT_FPS: u32 = 15;

pub const MIN_HOLD_TIME_MILLIS: u64 = 500;
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 60;

/// The animation configuration.
///
/// Every setter clamps its input, so a `Config` is always valid: the word list is never empty,
/// the hold time is at least 500ms, step speeds are at least 1ms and the frame rate is within
/// `[1, 60]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    word_text: String,
    words: Vec<String>,
    hold_time: Duration,
    scramble_duration: Duration,
    reveal_speed: Duration,
    unreveal_speed: Duration,
    fps: u32,
    letter_case: LetterCase,
    colors: ColorScheme,
}

impl Default for Config {
    fn default() -> Self {
        let letter_case = LetterCase::default();
        Self {
            word_text: DEFAULT_WORDS.to_string(),
            words: parse_words(DEFAULT_WORDS, letter_case),
            hold_time: DEFAULT_HOLD_TIME,
            scramble_duration: DEFAULT_SCRAMBLE_DURATION,
            reveal_speed: DEFAULT_REVEAL_SPEED,
            unreveal_speed: DEFAULT_UNREVEAL_SPEED,
            fps: DEFAULT_FPS,
            letter_case,
            colors: ColorScheme::default(),
        }
    }
}

impl Config {
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The raw word list text the words were parsed from
    pub fn word_text(&self) -> &str {
        &self.word_text
    }

    /// The word at `index`, or the empty word if the index is stale.
    pub fn word(&self, index: usize) -> &str {
        self.words.get(index).map(String::as_str).unwrap_or("")
    }

    /// Length in characters of the longest word
    pub fn max_word_length(&self) -> usize {
        self.words.iter().map(|w| w.chars().count()).max().unwrap_or(0)
    }

    /// Width of every grid row: the longest word plus one noise cell on each side
    pub fn grid_width(&self) -> usize {
        self.max_word_length() + 2
    }

    pub fn hold_time(&self) -> Duration {
        self.hold_time
    }

    pub fn scramble_duration(&self) -> Duration {
        self.scramble_duration
    }

    pub fn reveal_speed(&self) -> Duration {
        self.reveal_speed
    }

    pub fn unreveal_speed(&self) -> Duration {
        self.unreveal_speed
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Minimum time between two renders
    pub fn frame_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / self.fps as u64)
    }

    pub fn letter_case(&self) -> LetterCase {
        self.letter_case
    }

    pub fn colors(&self) -> &ColorScheme {
        &self.colors
    }

    pub fn set_word_text(&mut self, text: &str) {
        self.word_text = text.to_string();
        self.words = parse_words(text, self.letter_case);
    }

    pub fn set_letter_case(&mut self, letter_case: LetterCase) {
        self.letter_case = letter_case;
        self.words = parse_words(&self.word_text, letter_case);
    }

    pub fn set_hold_time_millis(&mut self, millis: i64) {
        let millis = u64::try_from(millis).unwrap_or(0).max(MIN_HOLD_TIME_MILLIS);
        self.hold_time = Duration::from_millis(millis);
    }

    pub fn set_fps(&mut self, fps: i64) {
        self.fps = fps.clamp(MIN_FPS as i64, MAX_FPS as i64) as u32;
    }

    pub fn set_scramble_duration_millis(&mut self, millis: u64) {
        self.scramble_duration = Duration::from_millis(millis);
    }

    pub fn set_reveal_speed_millis(&mut self, millis: u64) {
        self.reveal_speed = Duration::from_millis(millis.max(1));
    }

    pub fn set_unreveal_speed_millis(&mut self, millis: u64) {
        self.unreveal_speed = Duration::from_millis(millis.max(1));
    }

    /// Apply every value present in a configuration file.
    pub fn merge_file(&mut self, file: ConfigFile) {
        if let Some(letter_case) = file.letter_case {
            self.letter_case = letter_case;
        }
        match file.words {
            Some(words) => self.set_word_text(&words.join(",")),
            None => self.set_letter_case(self.letter_case),
        }
        if let Some(hold_time) = file.hold_time {
            self.set_hold_time_millis(hold_time.min(i64::MAX as u64) as i64);
        }
        if let Some(duration) = file.scramble_duration {
            self.set_scramble_duration_millis(duration);
        }
        if let Some(speed) = file.reveal_speed {
            self.set_reveal_speed_millis(speed);
        }
        if let Some(speed) = file.unreveal_speed {
            self.set_unreveal_speed_millis(speed);
        }
        if let Some(fps) = file.fps {
            self.set_fps(fps as i64);
        }
        if let Some(colors) = file.colors {
            self.colors = colors;
        }
    }
}

/// Split comma separated word list text into words.
///
/// The text is folded to `letter_case` first; pieces are trimmed and empty ones dropped. When
/// nothing is left the list is a single empty word so that there's always a current word.
pub fn parse_words(text: &str, letter_case: LetterCase) -> Vec<String> {
    let folded = letter_case.fold(text);
    let words: Vec<String> =
        folded.split(',').map(str::trim).filter(|word| !word.is_empty()).map(ToString::to_string).collect();
    if words.is_empty() { vec![String::new()] } else { words }
}

/// A change coming from one of the input controls
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigUpdate {
    /// Raw text of the word list control, emitted on every edit
    WordList(String),
    /// Raw text of the hold time control, emitted on commit
    HoldTime(String),
    /// Raw text of the frame rate control, emitted on commit
    FrameRate(String),
    LetterCase(LetterCase),
}

/// What a reduced update changed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigChange {
    Unchanged,
    Timing,
    /// The parsed word list changed: the animation restarts and the grid is rebuilt
    Words,
}

/// Validate an update and merge it into a copy of `config`.
///
/// Numbers that don't parse keep the previous value.
pub fn reduce(config: &Config, update: ConfigUpdate) -> (Config, ConfigChange) {
    let mut next = config.clone();
    let change = match update {
        ConfigUpdate::WordList(text) => {
            next.set_word_text(&text);
            if next.words != config.words { ConfigChange::Words } else { ConfigChange::Unchanged }
        }
        ConfigUpdate::LetterCase(letter_case) => {
            next.set_letter_case(letter_case);
            if next.words != config.words { ConfigChange::Words } else { ConfigChange::Unchanged }
        }
        ConfigUpdate::HoldTime(text) => match parse_integer("hold time", &text) {
            Some(millis) => {
                next.set_hold_time_millis(millis);
                timing_change(config, &next)
            }
            None => ConfigChange::Unchanged,
        },
        ConfigUpdate::FrameRate(text) => match parse_integer("frame rate", &text) {
            Some(fps) => {
                next.set_fps(fps);
                timing_change(config, &next)
            }
            None => ConfigChange::Unchanged,
        },
    };
    log::debug!("config update applied: {change:?}");
    (next, change)
}

fn timing_change(before: &Config, after: &Config) -> ConfigChange {
    if before == after { ConfigChange::Unchanged } else { ConfigChange::Timing }
}

fn parse_integer(field: &str, text: &str) -> Option<i64> {
    match text.trim().parse::<i64>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring invalid {field} '{text}': {e}");
            None
        }
    }
}

/// The on disk configuration file. Every key is optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub words: Option<Vec<String>>,

    /// Milliseconds
    #[serde(default)]
    pub hold_time: Option<u64>,

    #[serde(default)]
    pub scramble_duration: Option<u64>,

    #[serde(default)]
    pub reveal_speed: Option<u64>,

    #[serde(default)]
    pub unreveal_speed: Option<u64>,

    #[serde(default)]
    pub fps: Option<u32>,

    #[serde(default)]
    pub letter_case: Option<LetterCase>,

    #[serde(default)]
    pub colors: Option<ColorScheme>,
}

impl ConfigFile {
    /// Load a configuration file, failing if it doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Load the configuration file from the default location, if there is one.
    pub fn load_default() -> Result<Self, ConfigError> {
        let Some(path) = Self::default_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            log::debug!("no config file at {}", path.display());
            return Ok(Self::default());
        }
        log::info!("loading config file {}", path.display());
        Self::load(&path)
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "glyphreveal").map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }
}

/// Errors that can occur when loading the configuration file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config file '{path}': {source}")]
    Parse { path: PathBuf, source: serde_yaml::Error },
}
