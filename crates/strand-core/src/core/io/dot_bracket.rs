use crate::core::models::bases::Bracket;
use crate::core::models::ident::{IdentList, StrandId};
use crate::core::models::ordering::{Ordering, STRAND_SEPARATOR};
use crate::core::models::segment::{DEFAULT_TAG, DEFAULT_UID, Segment};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

const SEPARATOR: u8 = STRAND_SEPARATOR as u8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Input is empty")]
    Empty,
    #[error(
        "Input lengths differ (sequence {sequence}, structure {structure}, code sequence {code_sequence})"
    )]
    LengthMismatch {
        sequence: usize,
        structure: usize,
        code_sequence: usize,
    },
    #[error("Sequence must be ASCII")]
    NonAsciiSequence,
    #[error("Invalid structure symbol '{symbol}' at index {index}")]
    InvalidSymbol { index: usize, symbol: char },
    #[error("Sequence and structure disagree on the strand separator at index {index}")]
    SeparatorMismatch { index: usize },
    #[error("Identity list has {supplied} entries but the input has {required} strands")]
    IdListExhausted { supplied: usize, required: usize },
    #[error("Malformed structure: {0}")]
    Structure(#[from] StructureDiagnostic),
}

/// Structural problems tolerated in permissive mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureDiagnostic {
    #[error("Unconnected strand {strand} in initialized complex")]
    DisconnectedStrand { strand: usize },
    #[error("Mismatched ')' at index {index}")]
    UnmatchedClose { index: usize },
    #[error("Mismatched '(' in input ({open} left open)")]
    UnmatchedOpen { open: usize },
}

/// Bracket statistics of one strand, gathered during the scan.
#[derive(Debug, Clone, Copy)]
struct StrandSpan {
    start: usize,
    end: usize,
    balance: isize,
    went_negative: bool,
}

impl StrandSpan {
    /// A strand that neither closes into an earlier strand nor opens into a
    /// later one.
    fn is_disconnected(&self) -> bool {
        self.balance == 0 && !self.went_negative
    }
}

/// How the parser treats structurally suspicious dot-bracket input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Log diagnostics and keep the best-effort segmentation.
    #[default]
    Permissive,
    /// Reject the input on the first diagnostic.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ParseConfig {
    #[serde(default)]
    pub validation: ValidationMode,
    #[serde(default = "default_tag")]
    pub default_tag: String,
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            validation: ValidationMode::default(),
            default_tag: default_tag(),
        }
    }
}

/// Builds orderings from `+`-separated dot-bracket input.
#[derive(Debug, Clone, Default)]
pub struct DotBracketParser {
    config: ParseConfig,
}

impl DotBracketParser {
    pub fn new(config: ParseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    /// Parses parallel sequence, structure and code sequence strings.
    ///
    /// With an identity list, strand `i` takes the `i`-th entry; the list must
    /// hold at least one entry per strand. Without one, every strand gets the
    /// configured default tag.
    ///
    /// # Errors
    ///
    /// Fails on malformed input in every mode, and on structural diagnostics
    /// only in [`ValidationMode::Strict`].
    #[instrument(skip_all, fields(len = structure.len()))]
    pub fn parse(
        &self,
        sequence: &str,
        structure: &str,
        code_sequence: &[u8],
        ids: Option<IdentList>,
    ) -> Result<Ordering, ParseError> {
        if structure.is_empty() {
            return Err(ParseError::Empty);
        }
        if sequence.len() != structure.len() || code_sequence.len() != structure.len() {
            return Err(ParseError::LengthMismatch {
                sequence: sequence.len(),
                structure: structure.len(),
                code_sequence: code_sequence.len(),
            });
        }
        if !sequence.is_ascii() {
            return Err(ParseError::NonAsciiSequence);
        }

        let (spans, diagnostics) = scan(sequence.as_bytes(), structure)?;
        self.report(diagnostics)?;

        if let Some(ids) = &ids {
            if ids.len() < spans.len() {
                return Err(ParseError::IdListExhausted {
                    supplied: ids.len(),
                    required: spans.len(),
                });
            }
            if ids.len() > spans.len() {
                debug!(
                    unused = ids.len() - spans.len(),
                    "Identity list is longer than the strand count."
                );
            }
        }

        let mut identities = ids.map(IdentList::into_iter);
        let mut ordering = Ordering::new();
        for span in &spans {
            let identity = match identities.as_mut().and_then(Iterator::next) {
                Some(id) => id,
                None => StrandId::new(DEFAULT_UID, &self.config.default_tag),
            };
            let brackets = structure.as_bytes()[span.start..span.end]
                .iter()
                .filter_map(|&b| Bracket::from_symbol(b))
                .collect();
            ordering.push_segment(Segment::new(
                identity.uid,
                &identity.tag,
                &sequence[span.start..span.end],
                &code_sequence[span.start..span.end],
                brackets,
            ));
        }

        debug!(
            strands = ordering.strand_count(),
            "Constructed strand ordering from dot-bracket input."
        );
        Ok(ordering)
    }

    fn report(&self, diagnostics: Vec<StructureDiagnostic>) -> Result<(), ParseError> {
        match self.config.validation {
            ValidationMode::Strict => match diagnostics.into_iter().next() {
                Some(first) => Err(first.into()),
                None => Ok(()),
            },
            ValidationMode::Permissive => {
                for diagnostic in diagnostics {
                    warn!("{}", diagnostic);
                }
                Ok(())
            }
        }
    }
}

/// Single pass over the structure collecting strand spans and diagnostics.
fn scan(
    sequence: &[u8],
    structure: &str,
) -> Result<(Vec<StrandSpan>, Vec<StructureDiagnostic>), ParseError> {
    let mut spans = Vec::new();
    let mut diagnostics = Vec::new();
    let mut total: isize = 0;
    let mut current = StrandSpan {
        start: 0,
        end: 0,
        balance: 0,
        went_negative: false,
    };

    for (index, &symbol) in structure.as_bytes().iter().enumerate() {
        if (symbol == SEPARATOR) != (sequence[index] == SEPARATOR) {
            return Err(ParseError::SeparatorMismatch { index });
        }
        match symbol {
            b'(' => {
                total += 1;
                current.balance += 1;
            }
            b')' => {
                total -= 1;
                current.balance -= 1;
                if current.balance < 0 {
                    current.went_negative = true;
                }
                if total == -1 {
                    diagnostics.push(StructureDiagnostic::UnmatchedClose { index });
                }
            }
            b'.' => {}
            SEPARATOR => {
                current.end = index;
                // runs of separators never produce empty strands
                if current.end > current.start {
                    spans.push(current);
                }
                current = StrandSpan {
                    start: index + 1,
                    end: index + 1,
                    balance: 0,
                    went_negative: false,
                };
            }
            other => {
                // every earlier byte was ASCII, so `index` is a char boundary
                let symbol = structure[index..].chars().next().unwrap_or(other as char);
                return Err(ParseError::InvalidSymbol { index, symbol });
            }
        }
    }
    current.end = structure.len();
    if current.end > current.start {
        spans.push(current);
    }

    if spans.is_empty() {
        return Err(ParseError::Empty);
    }
    if spans.len() > 1 {
        diagnostics.extend(
            spans
                .iter()
                .enumerate()
                .filter(|(_, span)| span.is_disconnected())
                .map(|(strand, _)| StructureDiagnostic::DisconnectedStrand { strand }),
        );
    }
    if total > 0 {
        diagnostics.push(StructureDiagnostic::UnmatchedOpen {
            open: total as usize,
        });
    }
    Ok((spans, diagnostics))
}

impl Ordering {
    /// Parses a complex with default identities and permissive validation.
    pub fn parse(
        sequence: &str,
        structure: &str,
        code_sequence: &[u8],
    ) -> Result<Self, ParseError> {
        DotBracketParser::default().parse(sequence, structure, code_sequence, None)
    }

    /// Parses a complex, taking strand identities from `ids`.
    pub fn from_ident_list(
        sequence: &str,
        structure: &str,
        code_sequence: &[u8],
        ids: IdentList,
    ) -> Result<Self, ParseError> {
        DotBracketParser::default().parse(sequence, structure, code_sequence, Some(ids))
    }
}
