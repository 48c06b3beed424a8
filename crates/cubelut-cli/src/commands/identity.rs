//! Identity LUT generation.

use crate::IdentityArgs;
use anyhow::{Context, Result};
use cubelut_lut::LutTable;
use tracing::info;

pub fn run(args: IdentityArgs) -> Result<()> {
    let mut lut = LutTable::identity(args.size).context("Invalid LUT size")?;
    if let Some(title) = args.title {
        // titles are stored verbatim, so add the quotes the format expects
        let title = if title.starts_with('"') { title } else { format!("\"{}\"", title) };
        lut = lut.with_title(title);
    }

    cubelut_lut::write_cube(&args.output, &lut)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    info!(output = %args.output.display(), size = args.size, "Wrote identity LUT");
    Ok(())
}
