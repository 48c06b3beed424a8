//! LUT info command.
//!
//! Prints lattice size, title and domain for each `.cube` file.

use crate::InfoArgs;
use anyhow::{Context, Result};
use cubelut_lut::LutTable;
use std::path::Path;

/// Runs the info command. Stops at the first LUT that fails to parse.
pub fn run(args: InfoArgs) -> Result<()> {
    for (i, path) in args.input.iter().enumerate() {
        let lut = cubelut_lut::read_cube(path).with_context(|| format!("Failed to load LUT: {}", path.display()))?;
        if i > 0 {
            println!();
        }
        print!("{}", describe(path, &lut));
    }
    Ok(())
}

fn describe(path: &Path, lut: &LutTable) -> String {
    let n = lut.size();
    let domain = lut.domain();
    let mut out = format!("{}\n", path.display());
    out.push_str(&format!("  Size:     {}x{}x{}\n", n, n, n));
    out.push_str(&format!("  Entries:  {}\n", lut.entry_count()));
    out.push_str(&format!("  Title:    {}\n", lut.title().unwrap_or("-")));
    out.push_str(&format!(
        "  Domain:   {:?} - {:?}{}\n",
        domain.min,
        domain.max,
        if domain.is_default() { "" } else { " (nonstandard)" }
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubelut_lut::Domain;

    #[test]
    fn describes_size_and_domain() {
        let lut = LutTable::identity(3).unwrap().with_title("\"Neutral\"");
        let text = describe(Path::new("neutral.cube"), &lut);
        assert!(text.starts_with("neutral.cube\n"));
        assert!(text.contains("Size:     3x3x3"));
        assert!(text.contains("Entries:  27"));
        assert!(text.contains("Title:    \"Neutral\""));
        assert!(!text.contains("nonstandard"));

        let data = lut.data().to_vec();
        let wide = LutTable::new(3, data, Domain::new([0.0; 3], [2.0; 3])).unwrap();
        assert!(describe(Path::new("wide.cube"), &wide).contains("(nonstandard)"));
    }
}
