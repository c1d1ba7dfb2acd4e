//! Musical vocabulary used inside prompt layers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Natural note letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    const fn natural_pitch_class(self) -> i8 {
        match self {
            Self::C => 0,
            Self::D => 2,
            Self::E => 4,
            Self::F => 5,
            Self::G => 7,
            Self::A => 9,
            Self::B => 11,
        }
    }

    const fn as_char(self) -> char {
        match self {
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::A => 'A',
            Self::B => 'B',
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    const fn offset(self) -> i8 {
        match self {
            Self::Natural => 0,
            Self::Sharp => 1,
            Self::Flat => -1,
        }
    }
}

/// A spelled pitch such as `C#` or `Db`.
///
/// Spelling is preserved through storage; [`Note::pitch_class`] is what
/// musical comparisons use, so `C#` and `Db` are distinct values but the
/// same sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Note {
    pub const fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    pub const fn natural(letter: Letter) -> Self {
        Self::new(letter, Accidental::Natural)
    }

    /// Semitone class in `0..12`, with C = 0.
    pub const fn pitch_class(self) -> u8 {
        (self.letter.natural_pitch_class() + self.accidental.offset()).rem_euclid(12) as u8
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        };
        write!(f, "{}{}", self.letter.as_char(), suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid note: {0:?}")]
pub struct InvalidNote(pub String);

impl FromStr for Note {
    type Err = InvalidNote;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars
            .next()
            .and_then(Letter::from_char)
            .ok_or_else(|| InvalidNote(s.to_string()))?;
        let accidental = match chars.as_str() {
            "" => Accidental::Natural,
            "#" => Accidental::Sharp,
            "b" => Accidental::Flat,
            _ => return Err(InvalidNote(s.to_string())),
        };
        Ok(Self::new(letter, accidental))
    }
}

impl TryFrom<String> for Note {
    type Error = InvalidNote;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    #[serde(rename = "maj")]
    Major,
    #[serde(rename = "m")]
    Minor,
    #[serde(rename = "7")]
    Dominant7,
    #[serde(rename = "maj7")]
    Major7,
    #[serde(rename = "m7")]
    Minor7,
    #[serde(rename = "m7b5")]
    HalfDiminished7,
    #[serde(rename = "dim7")]
    Diminished7,
    #[serde(rename = "aug")]
    Augmented,
    #[serde(rename = "sus4")]
    Suspended4,
}

impl ChordQuality {
    pub const ALL: [Self; 9] = [
        Self::Major,
        Self::Minor,
        Self::Dominant7,
        Self::Major7,
        Self::Minor7,
        Self::HalfDiminished7,
        Self::Diminished7,
        Self::Augmented,
        Self::Suspended4,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Major => "maj",
            Self::Minor => "m",
            Self::Dominant7 => "7",
            Self::Major7 => "maj7",
            Self::Minor7 => "m7",
            Self::HalfDiminished7 => "m7b5",
            Self::Diminished7 => "dim7",
            Self::Augmented => "aug",
            Self::Suspended4 => "sus4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chord {
    pub root: Note,
    pub quality: ChordQuality,
}

impl Chord {
    pub const fn new(root: Note, quality: ChordQuality) -> Self {
        Self { root, quality }
    }

    /// Same root pitch class and quality.
    pub fn sounds_like(&self, other: &Self) -> bool {
        self.root.pitch_class() == other.root.pitch_class() && self.quality == other.quality
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality.symbol())
    }
}

/// Widest interval a layer may prompt, two octaves.
pub const MAX_INTERVAL_SEMITONES: u8 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Interval {
    semitones: u8,
}

impl Interval {
    pub const fn semitones(self) -> u8 {
        self.semitones
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Interval of {0} semitones exceeds {MAX_INTERVAL_SEMITONES}")]
pub struct IntervalOutOfRange(pub u8);

impl TryFrom<u8> for Interval {
    type Error = IntervalOutOfRange;

    fn try_from(semitones: u8) -> Result<Self, Self::Error> {
        if semitones > MAX_INTERVAL_SEMITONES {
            return Err(IntervalOutOfRange(semitones));
        }
        Ok(Self { semitones })
    }
}

impl From<Interval> for u8 {
    fn from(interval: Interval) -> Self {
        interval.semitones
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalDirection {
    #[default]
    Ascending,
    Descending,
    Either,
}
