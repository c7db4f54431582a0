use serde::Deserialize;
use strum::{Display, EnumString};

/// Noise characters: Latin letters and numbers
pub(crate) const GLYPHS: &[char] = &[
    // Letters
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V',
    'W', 'X', 'Y', 'Z',
    // Numbers
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// The case every displayed character is folded to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Display, EnumString, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LetterCase {
    #[default]
    Upper,
    Lower,
}

impl LetterCase {
    /// Fold a whole piece of text to this case
    pub fn fold(self, text: &str) -> String {
        match self {
            Self::Upper => text.to_uppercase(),
            Self::Lower => text.to_lowercase(),
        }
    }

    fn fold_glyph(self, ch: char) -> char {
        match self {
            Self::Upper => ch,
            Self::Lower => ch.to_ascii_lowercase(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Upper => Self::Lower,
            Self::Lower => Self::Upper,
        }
    }
}

/// Sample a uniformly random noise character in the given case
pub(crate) fn random_glyph(rng: &mut fastrand::Rng, case: LetterCase) -> char {
    let ch = GLYPHS[rng.usize(..GLYPHS.len())];
    case.fold_glyph(ch)
}
