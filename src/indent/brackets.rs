//! Bracket families and the running tally used by the backward scan

/// A category of open/close bracket characters sharing one nesting counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BracketFamily {
    Paren,
    Square,
    Curly,
    Angle,
}

impl BracketFamily {
    fn index(self) -> usize {
        match self {
            BracketFamily::Paren => 0,
            BracketFamily::Square => 1,
            BracketFamily::Curly => 2,
            BracketFamily::Angle => 3,
        }
    }
}

/// Which side of a pair a bracket character is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketSide {
    Open,
    Close,
}

/// A bracket character found in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub family: BracketFamily,
    pub side: BracketSide,
}

impl Bracket {
    /// Classify a character. Angle brackets are only recognised when
    /// `include_angle` is set, since `<`/`>` are usually operators.
    pub fn classify(ch: char, include_angle: bool) -> Option<Self> {
        let (family, side) = match ch {
            '(' => (BracketFamily::Paren, BracketSide::Open),
            ')' => (BracketFamily::Paren, BracketSide::Close),
            '[' => (BracketFamily::Square, BracketSide::Open),
            ']' => (BracketFamily::Square, BracketSide::Close),
            '{' => (BracketFamily::Curly, BracketSide::Open),
            '}' => (BracketFamily::Curly, BracketSide::Close),
            '<' if include_angle => (BracketFamily::Angle, BracketSide::Open),
            '>' if include_angle => (BracketFamily::Angle, BracketSide::Close),
            _ => return None,
        };
        Some(Self { family, side })
    }

    pub fn is_open(&self) -> bool {
        self.side == BracketSide::Open
    }
}

/// Check whether `open` and `close` form a matched pair of one family
pub fn is_matched_pair(open: char, close: char, include_angle: bool) -> bool {
    match (
        Bracket::classify(open, include_angle),
        Bracket::classify(close, include_angle),
    ) {
        (Some(o), Some(c)) => o.is_open() && !c.is_open() && o.family == c.family,
        _ => false,
    }
}

/// Check whether a line (or prefix) ends with an opening bracket, ignoring
/// trailing whitespace
pub fn ends_with_open_bracket(text: &str, include_angle: bool) -> bool {
    text.trim_end()
        .chars()
        .next_back()
        .and_then(|ch| Bracket::classify(ch, include_angle))
        .is_some_and(|b| b.is_open())
}

/// Unmatched closing brackets seen so far in a backward scan, per family.
///
/// A closing bracket increments its family's count (it is owed a matching
/// open); a matching open decrements it. Zero means no unresolved bracket of
/// that family has been seen yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BracketTally {
    counts: [i32; 4],
}

impl BracketTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, family: BracketFamily, delta: i32) {
        self.counts[family.index()] += delta;
    }

    pub fn get(&self, family: BracketFamily) -> i32 {
        self.counts[family.index()]
    }

    pub fn all_closed(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }
}
