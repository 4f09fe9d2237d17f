pub mod inspect;
pub mod locate;
pub mod rotate;

use crate::cli::ComplexArgs;
use crate::config::resolve_parse_config;
use crate::error::Result;
use strandorder::core::io::dot_bracket::DotBracketParser;
use strandorder::core::models::bases::BaseType;
use strandorder::core::models::ident::IdentList;
use strandorder::core::models::ordering::Ordering;
use tracing::info;

/// Parses the complex described by the shared command-line arguments.
pub fn load_complex(args: &ComplexArgs) -> Result<Ordering> {
    let parser = DotBracketParser::new(resolve_parse_config(args)?);
    let ids = args.ids.as_deref().map(IdentList::from_tags);
    let code_sequence = BaseType::encode(&args.sequence);

    let ordering = parser.parse(&args.sequence, &args.structure, &code_sequence, ids)?;
    info!(
        "Parsed complex with {} strand(s) and {} base(s).",
        ordering.strand_count(),
        ordering.total_bases()
    );
    Ok(ordering)
}

/// The joined views of an ordering, one per line.
pub fn render_views(ordering: &Ordering) -> String {
    let flat = ordering.flat_sequence();
    format!(
        "Strands:   {}\nSequence:  {}\nStructure: {}\nNames:     {}\nFlat:      {}\n           {}\n",
        ordering.strand_count(),
        ordering.sequence(),
        ordering.structure(),
        ordering.strand_names(),
        flat.sequence,
        flat.structure,
    )
}

#[cfg(test)]
pub(crate) fn complex(sequence: &str, structure: &str) -> ComplexArgs {
    ComplexArgs {
        sequence: sequence.to_string(),
        structure: structure.to_string(),
        ids: None,
        config: None,
        strict: false,
    }
}
