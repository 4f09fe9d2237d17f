use super::{load_complex, render_views};
use crate::cli::InspectArgs;
use crate::error::Result;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let ordering = load_complex(&args.complex)?;
    info!("Rendering views of the parsed complex.");
    print!("{}", render_views(&ordering));
    Ok(())
}
