use super::load_complex;
use crate::cli::LocateArgs;
use crate::error::{CliError, Result};
use strandorder::core::models::ordering::Ordering;
use tracing::info;

pub fn run(args: LocateArgs) -> Result<()> {
    let ordering = load_complex(&args.complex)?;
    info!("Resolving flat index {}.", args.index);
    println!("{}", describe_index(&ordering, args.index)?);
    Ok(())
}

fn describe_index(ordering: &Ordering, index: usize) -> Result<String> {
    let location = ordering.convert_index(index).ok_or_else(|| {
        CliError::Argument(format!(
            "index {} does not name a base (structure length {})",
            index,
            ordering.flat_len()
        ))
    })?;

    let position = ordering.position_of(location.segment).unwrap_or_default();
    let (tag, base) = ordering
        .segment(location.segment)
        .map(|s| {
            let base = s.sequence().as_bytes()[location.offset] as char;
            (s.tag.clone(), base)
        })
        .unwrap_or_default();
    let bracket = ordering
        .bracket_at(location)
        .map(|b| b.as_char())
        .unwrap_or(' ');

    Ok(format!(
        "index {} -> strand {} ({}), offset {}, base {}, structure '{}'",
        index, position, tag, location.offset, base, bracket
    ))
}
