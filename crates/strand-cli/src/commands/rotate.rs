use super::{load_complex, render_views};
use crate::cli::RotateArgs;
use crate::error::{CliError, Result};
use strandorder::core::loops::registry::LoopRegistry;
use strandorder::core::loops::traits::OpenLoop;
use strandorder::core::models::bases::{BaseCounts, BaseType, Bracket};
use strandorder::core::models::ids::{BaseLocation, LoopId, SegmentId};
use strandorder::core::models::ordering::Ordering;
use tracing::{debug, info};

/// Stand-in loop that exposes the unpaired bases of a single strand.
#[derive(Debug)]
struct StrandMarker {
    position: usize,
    free: Vec<(BaseType, BaseLocation)>,
}

impl StrandMarker {
    fn new(position: usize, segment: SegmentId, ordering: &Ordering) -> Self {
        let free = ordering
            .segment(segment)
            .map(|strand| {
                strand
                    .structure()
                    .iter()
                    .zip(strand.code_sequence())
                    .enumerate()
                    .filter(|(_, (bracket, _))| **bracket == Bracket::Unpaired)
                    .filter_map(|(offset, (_, &code))| {
                        BaseType::from_code(code)
                            .map(|base| (base, BaseLocation::new(segment, offset)))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { position, free }
    }
}

impl OpenLoop for StrandMarker {
    fn free_bases(&self) -> BaseCounts {
        let mut counts = BaseCounts::default();
        for (base, _) in &self.free {
            counts += match base {
                BaseType::A => BaseCounts::new(1, 0, 0, 0),
                BaseType::C => BaseCounts::new(0, 1, 0, 0),
                BaseType::G => BaseCounts::new(0, 0, 1, 0),
                BaseType::T => BaseCounts::new(0, 0, 0, 1),
            };
        }
        counts
    }

    fn base(&self, base: BaseType, index: usize) -> Option<BaseLocation> {
        self.free
            .iter()
            .filter(|(b, _)| *b == base)
            .nth(index)
            .map(|(_, location)| *location)
    }

    fn cleanup_adjacent(&mut self) {}

    fn update_local_context(&mut self) {}

    fn type_internals_to_string(&self) -> String {
        format!("Strand marker for input strand {}\n", self.position)
    }
}

/// Attaches one marker per strand, keyed by the strand's input position.
fn attach_markers(ordering: &mut Ordering, loops: &mut LoopRegistry) -> Result<Vec<LoopId>> {
    let strands: Vec<(SegmentId, usize)> =
        ordering.segments().map(|(id, s)| (id, s.size())).collect();

    let mut markers = Vec::with_capacity(strands.len());
    let mut flat_start = 0;
    for (position, (segment, size)) in strands.into_iter().enumerate() {
        let loop_id = loops.insert(StrandMarker::new(position, segment, ordering));
        ordering.add_open_loop(loop_id, flat_start)?;
        debug!(position, flat_start, "Attached strand marker.");
        markers.push(loop_id);
        flat_start += size + 1;
    }
    Ok(markers)
}

fn rotate(ordering: &mut Ordering, loops: &mut LoopRegistry, strand: usize) -> Result<String> {
    let markers = attach_markers(ordering, loops)?;
    let target = *markers.get(strand).ok_or_else(|| {
        CliError::Argument(format!(
            "strand {} out of range, complex has {} strand(s)",
            strand,
            markers.len()
        ))
    })?;

    ordering.reorder(target)?;
    info!("Re-rooted complex at input strand {}.", strand);

    let unpaired = *ordering.exterior_bases(loops)?;
    let mut out = render_views(ordering);
    out.push_str(&format!("Unpaired:  {}\n", unpaired));
    out.push_str(&ordering.report(loops)?);
    Ok(out)
}

pub fn run(args: RotateArgs) -> Result<()> {
    let mut ordering = load_complex(&args.complex)?;
    let mut loops = LoopRegistry::new();

    let output = rotate(&mut ordering, &mut loops, args.strand)?;
    print!("{}", output);

    ordering.release_loops(&mut loops);
    Ok(())
}
