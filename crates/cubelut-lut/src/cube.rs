//! Adobe/Resolve .cube LUT format support.
//!
//! The .cube format is a line-oriented text format:
//!
//! ```text
//! # Comment
//! TITLE "LUT Name"
//! DOMAIN_MIN 0.0 0.0 0.0
//! DOMAIN_MAX 1.0 1.0 1.0
//! LUT_3D_SIZE 33
//! 0.0 0.0 0.0
//! ...
//! 1.0 1.0 1.0
//! ```
//!
//! Data rows are listed with red varying fastest and blue slowest: row `k`
//! belongs to lattice vertex `(k % N, (k / N) % N, k / N^2)`. Only 3D LUTs
//! are supported; a `LUT_1D_SIZE` declaration is rejected.
//!
//! # Example
//!
//! ```rust,ignore
//! use cubelut_lut::{cube, Interpolation};
//!
//! let lut = cube::load_lut("grade.cube", false)?;
//! let rgb = lut.apply([0.5, 0.3, 0.2], Interpolation::Tetrahedral);
//! ```

use crate::events::{LutEvent, LutEventSink, TracingSink};
use crate::{Domain, LutError, LutResult, LutTable, MAX_SIZE, MIN_SIZE};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Parses cube text, reporting events through `tracing`.
pub fn parse_cube(text: &str) -> LutResult<LutTable> {
    parse_cube_with(text, &TracingSink::default())
}

/// Parses cube text, reporting events to `sink`.
///
/// Either the whole table is returned or an error; nothing partial escapes.
pub fn parse_cube_with(text: &str, sink: &dyn LutEventSink) -> LutResult<LutTable> {
    let mut size: Option<usize> = None;
    let mut title: Option<String> = None;
    let mut domain = Domain::UNIT;
    let mut rows: Vec<[f32; 3]> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains("TITLE") {
            title = Some(line.split_whitespace().skip(1).collect::<Vec<_>>().join(" "));
        } else if line.contains("DOMAIN_MIN") {
            domain.min = parse_triple(keyword_args(line), line_no)?;
        } else if line.contains("DOMAIN_MAX") {
            domain.max = parse_triple(keyword_args(line), line_no)?;
        } else if line.contains("LUT_1D_SIZE") {
            return Err(LutError::UnsupportedDimension {
                keyword: "LUT_1D_SIZE".into(),
                line: line_no,
            });
        } else if line.contains("LUT_3D_SIZE") {
            if !rows.is_empty() {
                return Err(LutError::SizeAfterData { line: line_no });
            }
            let n = parse_size(line, line_no)?;
            rows.reserve_exact(n * n * n);
            size = Some(n);
        } else {
            if size.is_none() {
                return Err(LutError::MissingSize { line: Some(line_no) });
            }
            rows.push(parse_triple(line.split_whitespace(), line_no)?);
        }
    }

    let size = size.ok_or(LutError::MissingSize { line: None })?;
    let expected = size * size * size;
    if rows.len() != expected {
        return Err(LutError::RowCount {
            size,
            expected,
            found: rows.len(),
        });
    }

    // File order is red-fastest; memory order is [r][g][b] (blue-fastest).
    let mut data = vec![[0.0f32; 3]; expected];
    for (k, rgb) in rows.into_iter().enumerate() {
        let r = k % size;
        let g = (k / size) % size;
        let b = k / (size * size);
        data[(r * size + g) * size + b] = rgb;
    }

    let mut lut = LutTable::new(size, data, domain)?;
    if let Some(title) = title {
        lut = lut.with_title(title);
    }

    if !domain.is_default() {
        sink.event(&LutEvent::NonDefaultDomain(domain));
    }
    sink.event(&LutEvent::Loaded {
        size,
        title: lut.title().map(str::to_owned),
    });

    Ok(lut)
}

/// Reads a 3D LUT from a .cube file.
pub fn read_cube<P: AsRef<Path>>(path: P) -> LutResult<LutTable> {
    let path = path.as_ref();
    let text = read_text(path)?;
    parse_cube_with(&text, &TracingSink::for_source(path.display().to_string()))
}

/// Reads a cube file as text. Non-UTF-8 bytes (a Latin-1 title, say) are
/// replaced rather than failing the load.
fn read_text(path: &Path) -> LutResult<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Loads a LUT for processing, optionally clipping its stored values to the
/// declared domain.
///
/// # Example
///
/// ```rust,ignore
/// let lut = cube::load_lut("broken_export.cube", true)?;
/// ```
pub fn load_lut<P: AsRef<Path>>(path: P, clip: bool) -> LutResult<LutTable> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let sink = TracingSink::for_source(path.display().to_string());
    load_lut_with(&text, clip, &sink)
}

/// [`load_lut`] on in-memory text with an explicit sink.
pub fn load_lut_with(text: &str, clip: bool, sink: &dyn LutEventSink) -> LutResult<LutTable> {
    let lut = parse_cube_with(text, sink)?;
    if !clip {
        return Ok(lut);
    }
    let (lut, components) = lut.clipped();
    if components > 0 {
        sink.event(&LutEvent::Clipped { components });
    }
    Ok(lut)
}

/// Writes a 3D LUT to a .cube file.
///
/// # Example
///
/// ```rust,ignore
/// let lut = LutTable::identity(33)?;
/// cube::write_cube("identity.cube", &lut)?;
/// ```
pub fn write_cube<P: AsRef<Path>>(path: P, lut: &LutTable) -> LutResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_cube_to(&mut writer, lut)?;
    writer.flush()?;
    Ok(())
}

/// Writes cube text for `lut` to any writer.
pub fn write_cube_to<W: Write>(writer: &mut W, lut: &LutTable) -> LutResult<()> {
    writeln!(writer, "# Generated by cubelut")?;
    if let Some(title) = lut.title() {
        writeln!(writer, "TITLE {}", title)?;
    }

    let domain = lut.domain();
    if !domain.is_default() {
        let (min, max) = (domain.min, domain.max);
        writeln!(writer, "DOMAIN_MIN {} {} {}", min[0], min[1], min[2])?;
        writeln!(writer, "DOMAIN_MAX {} {} {}", max[0], max[1], max[2])?;
    }
    writeln!(writer, "LUT_3D_SIZE {}", lut.size())?;
    writeln!(writer)?;

    // Data - R fastest, then G, then B (file format requirement)
    let size = lut.size();
    for b in 0..size {
        for g in 0..size {
            for r in 0..size {
                let rgb = lut.get(r, g, b);
                writeln!(writer, "{:.6} {:.6} {:.6}", rgb[0], rgb[1], rgb[2])?;
            }
        }
    }

    Ok(())
}

// Helper functions

fn keyword_args(line: &str) -> std::iter::Skip<std::str::SplitWhitespace<'_>> {
    line.split_whitespace().skip(1)
}

fn parse_size(line: &str, line_no: usize) -> LutResult<usize> {
    let mut args = keyword_args(line);
    let token = match (args.next(), args.next()) {
        (Some(token), None) => token,
        _ => {
            return Err(LutError::MalformedLine {
                line: line_no,
                reason: "LUT_3D_SIZE takes exactly one integer".into(),
            });
        }
    };
    let n: usize = token.parse().map_err(|_| LutError::MalformedNumber {
        token: token.into(),
        line: line_no,
    })?;
    if !(MIN_SIZE..=MAX_SIZE).contains(&n) {
        return Err(LutError::SizeOutOfRange(n));
    }
    Ok(n)
}

fn parse_triple<'a>(mut tokens: impl Iterator<Item = &'a str>, line_no: usize) -> LutResult<[f32; 3]> {
    let mut out = [0.0f32; 3];
    for slot in out.iter_mut() {
        let token = tokens.next().ok_or_else(|| LutError::MalformedLine {
            line: line_no,
            reason: "expected three values".into(),
        })?;
        *slot = token.parse().map_err(|_| LutError::MalformedNumber {
            token: token.into(),
            line: line_no,
        })?;
    }
    if tokens.next().is_some() {
        return Err(LutError::MalformedLine {
            line: line_no,
            reason: "expected three values, found more".into(),
        });
    }
    Ok(out)
}
