use crate::config::{Config, ConfigUpdate};
use crate::scramble::{AnimationState, LetterCase};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// An editable field in the input panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Words,
    HoldTime,
    FrameRate,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Self::Words => Self::HoldTime,
            Self::HoldTime => Self::FrameRate,
            Self::FrameRate => Self::Words,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Words => Self::FrameRate,
            Self::HoldTime => Self::Words,
            Self::FrameRate => Self::HoldTime,
        }
    }
}

/// What the host should do after a key press
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// The panel changed but the configuration didn't
    Redraw,
    Update(ConfigUpdate),
    Quit,
}

/// The controls shown below the grid.
///
/// The word list emits an update on every edit; the numeric fields only when committed with
/// enter. A disabled panel only reacts to quit keys.
#[derive(Clone, Debug)]
pub struct InputPanel {
    enabled: bool,
    focus: Field,
    words: String,
    hold_time: String,
    frame_rate: String,
}

impl InputPanel {
    pub fn new(config: &Config, enabled: bool) -> Self {
        let mut panel = Self {
            enabled,
            focus: Field::Words,
            words: config.word_text().to_string(),
            hold_time: String::new(),
            frame_rate: String::new(),
        };
        panel.sync_numbers(config);
        panel
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Words => &self.words,
            Field::HoldTime => &self.hold_time,
            Field::FrameRate => &self.frame_rate,
        }
    }

    /// Show the values the configuration actually holds in the numeric fields.
    pub fn sync_numbers(&mut self, config: &Config) {
        self.hold_time = config.hold_time().as_millis().to_string();
        self.frame_rate = config.fps().to_string();
    }

    pub fn handle_key(&mut self, key: KeyEvent, letter_case: LetterCase) -> InputAction {
        if key.kind == KeyEventKind::Release {
            return InputAction::None;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return InputAction::Quit,
            KeyCode::Char('c') if control => return InputAction::Quit,
            KeyCode::Char('q') if !self.enabled => return InputAction::Quit,
            _ if !self.enabled => return InputAction::None,
            _ => (),
        };

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                InputAction::Redraw
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                InputAction::Redraw
            }
            KeyCode::Char('l') if control => InputAction::Update(ConfigUpdate::LetterCase(letter_case.toggled())),
            KeyCode::Char(_) if control => InputAction::None,
            KeyCode::Char(c) => {
                self.field_mut().push(c);
                self.edited()
            }
            KeyCode::Backspace => match self.field_mut().pop() {
                Some(_) => self.edited(),
                None => InputAction::None,
            },
            KeyCode::Enter => match self.focus {
                Field::Words => InputAction::None,
                Field::HoldTime => InputAction::Update(ConfigUpdate::HoldTime(self.hold_time.clone())),
                Field::FrameRate => InputAction::Update(ConfigUpdate::FrameRate(self.frame_rate.clone())),
            },
            _ => InputAction::None,
        }
    }

    /// The lines describing the panel, top to bottom
    pub fn lines(&self, config: &Config, state: &AnimationState) -> Vec<String> {
        let status = format!(
            "case: {}  phase: {}  word {}/{}",
            config.letter_case(),
            state.phase(),
            state.word_index() + 1,
            config.words().len()
        );
        if !self.enabled {
            return vec![status, "q/esc: quit".to_string()];
        }
        let field = |field: Field, label: &str| {
            let marker = if self.focus == field { '>' } else { ' ' };
            format!("{marker} {label:<15}{}", self.text(field))
        };
        vec![
            field(Field::Words, "words"),
            field(Field::HoldTime, "hold time (ms)"),
            field(Field::FrameRate, "fps"),
            status,
            "tab: next field  enter: apply  ctrl-l: toggle case  esc: quit".to_string(),
        ]
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Words => &mut self.words,
            Field::HoldTime => &mut self.hold_time,
            Field::FrameRate => &mut self.frame_rate,
        }
    }

    fn edited(&self) -> InputAction {
        match self.focus {
            Field::Words => InputAction::Update(ConfigUpdate::WordList(self.words.clone())),
            Field::HoldTime | Field::FrameRate => InputAction::Redraw,
        }
    }
}
