use phf::phf_map;
use std::fmt;
use std::ops::AddAssign;

/// Byte written into a code sequence at strand separators.
pub const SEPARATOR_CODE: u8 = b'+';

static BASE_SYMBOLS: phf::Map<char, BaseType> = phf_map! {
    'A' => BaseType::A,
    'a' => BaseType::A,
    'C' => BaseType::C,
    'c' => BaseType::C,
    'G' => BaseType::G,
    'g' => BaseType::G,
    'T' => BaseType::T,
    't' => BaseType::T,
    'U' => BaseType::T, // RNA uracil shares the T slot
    'u' => BaseType::T,
};

/// Nucleotide type, with the numeric code used in coded sequences.
///
/// Code `0` is reserved for "no base" and never produced by [`BaseType::code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BaseType {
    A = 1,
    C = 2,
    G = 3,
    T = 4,
}

impl BaseType {
    pub const ALL: [BaseType; 4] = [BaseType::A, BaseType::C, BaseType::G, BaseType::T];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(BaseType::A),
            2 => Some(BaseType::C),
            3 => Some(BaseType::G),
            4 => Some(BaseType::T),
            _ => None,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        BASE_SYMBOLS.get(&symbol).copied()
    }

    /// Encodes a printable sequence into its code sequence.
    ///
    /// Separators are kept as [`SEPARATOR_CODE`] so the result stays
    /// index-aligned with the input; unknown symbols encode to `0`.
    pub fn encode(sequence: &str) -> Vec<u8> {
        sequence
            .chars()
            .map(|c| match c {
                '+' => SEPARATOR_CODE,
                other => Self::from_symbol(other).map_or(0, BaseType::code),
            })
            .collect()
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                BaseType::A => "A",
                BaseType::C => "C",
                BaseType::G => "G",
                BaseType::T => "T",
            }
        )
    }
}

/// Per-nucleotide tally of free bases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseCounts {
    pub a: u32,
    pub c: u32,
    pub g: u32,
    pub t: u32,
}

/// The aggregate an ordering keeps for the free bases of its exterior loops.
pub type ExteriorBaseCounts = BaseCounts;

impl BaseCounts {
    pub fn new(a: u32, c: u32, g: u32, t: u32) -> Self {
        Self { a, c, g, t }
    }

    pub fn get(&self, base: BaseType) -> u32 {
        match base {
            BaseType::A => self.a,
            BaseType::C => self.c,
            BaseType::G => self.g,
            BaseType::T => self.t,
        }
    }

    pub fn total(&self) -> u32 {
        self.a + self.c + self.g + self.t
    }
}

impl AddAssign for BaseCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.a += rhs.a;
        self.c += rhs.c;
        self.g += rhs.g;
        self.t += rhs.t;
    }
}

impl fmt::Display for BaseCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A={} C={} G={} T={}", self.a, self.c, self.g, self.t)
    }
}

/// One position of a dot-bracket structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    Unpaired,
    Open,
    Close,
}

impl Bracket {
    pub fn from_symbol(symbol: u8) -> Option<Self> {
        match symbol {
            b'.' => Some(Bracket::Unpaired),
            b'(' => Some(Bracket::Open),
            b')' => Some(Bracket::Close),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Bracket::Unpaired => '.',
            Bracket::Open => '(',
            Bracket::Close => ')',
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
