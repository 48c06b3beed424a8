//! Batch LUT application.
//!
//! Every LUT is loaded once up front and shared read-only. Images are then
//! processed in parallel; each image is decoded (and thumbnailed) once and
//! fanned out over all LUTs.

use crate::ApplyArgs;
use anyhow::{Context, Result, bail};
use cubelut_color::{ColorPipeline, Interpolation, RgbImage, TransformOptions};
use cubelut_io::Format;
use cubelut_io::resize::{Filter, resize_rgb8, thumbnail_dims};
use cubelut_lut::LutTable;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, warn};

/// A loaded LUT and the name it contributes to output files.
struct NamedLut {
    name: String,
    table: LutTable,
}

pub fn run(args: ApplyArgs) -> Result<()> {
    trace!(input = %args.input.display(), lut = %args.lut.display(), "apply::run");

    let filter = Filter::from_name(&args.filter)
        .with_context(|| format!("Unknown filter: {}", args.filter))?;

    if let Some(out) = &args.output {
        if !out.is_dir() {
            bail!("Output folder does not exist: {}", out.display());
        }
    }

    let images = collect_images(&args.input, args.output.as_deref())?;
    let luts = load_luts(&args.lut, args.clip)?;

    if images.is_empty() {
        warn!(input = %args.input.display(), "No images to process");
        return Ok(());
    }

    let options = TransformOptions::default()
        .with_log_gamma(args.log)
        .with_interpolation(if args.tetrahedral {
            Interpolation::Tetrahedral
        } else {
            Interpolation::Trilinear
        });

    info!(
        images = images.len(),
        luts = luts.len(),
        interpolation = options.interpolation.name(),
        log = args.log,
        "Starting LUT application"
    );

    let job = Job {
        luts: &luts,
        options,
        out_dir: args.output.as_deref(),
        thumb: args.thumb,
        filter,
        quality: args.quality,
    };

    let results: Vec<Result<PathBuf>> = images
        .par_iter()
        .flat_map(|input| job.process_image(input))
        .collect();

    // Report results
    let mut success = 0;
    let mut failed = 0;
    for r in results {
        match r {
            Ok(_) => success += 1,
            Err(e) => {
                failed += 1;
                error!("{:#}", e);
            }
        }
    }

    info!(success, failed, "LUT application complete");
    println!("Processed: {} success, {} failed", success, failed);

    if failed > 0 {
        bail!("{} jobs failed", failed);
    }

    Ok(())
}

/// Settings shared by every (image, LUT) job.
struct Job<'a> {
    luts: &'a [NamedLut],
    options: TransformOptions,
    out_dir: Option<&'a Path>,
    thumb: Option<u32>,
    filter: Filter,
    quality: u8,
}

impl Job<'_> {
    /// Decodes one image and applies every LUT to it. A decode failure is
    /// reported once rather than per LUT.
    fn process_image(&self, input: &PathBuf) -> Vec<Result<PathBuf>> {
        let image = match self.prepare(input) {
            Ok(image) => image,
            Err(e) => return vec![Err(e)],
        };

        self.luts
            .par_iter()
            .map(|lut| {
                let output = output_path(input, self.out_dir, &lut.name, self.thumb.is_some());
                debug!(input = %input.display(), lut = %lut.name, output = %output.display(), "Applying");

                let graded = ColorPipeline::new(&lut.table, self.options).transform(&image);
                super::save_image(&output, &graded, self.quality)?;
                Ok(output)
            })
            .collect()
    }

    fn prepare(&self, input: &Path) -> Result<RgbImage> {
        let image = super::load_image(input)?;
        let Some(max_side) = self.thumb else {
            return Ok(image);
        };

        let (w, h) = thumbnail_dims(image.width(), image.height(), max_side);
        if (w, h) == (image.width(), image.height()) {
            return Ok(image);
        }
        trace!(from_w = image.width(), from_h = image.height(), w, h, "Thumbnail");
        let data = resize_rgb8(image.as_raw(), image.width(), image.height(), w, h, self.filter)
            .with_context(|| format!("Failed to resize: {}", input.display()))?;
        Ok(RgbImage::from_raw(w, h, data)?)
    }
}

/// Loads every LUT named by `path`, skipping ones that fail to parse.
fn load_luts(path: &Path, clip: bool) -> Result<Vec<NamedLut>> {
    let paths = collect_lut_paths(path)?;
    if paths.is_empty() {
        bail!("No .cube files found in {}", path.display());
    }

    let luts: Vec<NamedLut> = paths
        .iter()
        .filter_map(|p| match cubelut_lut::load_lut(p, clip) {
            Ok(table) => {
                info!(lut = %p.display(), size = table.size(), "Loaded LUT");
                Some(NamedLut {
                    name: super::lut_name(p),
                    table,
                })
            }
            Err(e) => {
                error!(lut = %p.display(), error = %e, "Skipping LUT");
                None
            }
        })
        .collect();

    if luts.is_empty() {
        bail!("None of the {} LUT(s) could be loaded", paths.len());
    }
    Ok(luts)
}

/// A single `.cube` file, or every `*.cube` (any case) in a directory.
fn collect_lut_paths(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("LUT not found: {}", path.display());
    }

    let dir = path.to_str().context("LUT folder path is not valid UTF-8")?;
    let pattern = Path::new(&glob::Pattern::escape(dir)).join("*.cube");
    let pattern = pattern.to_string_lossy();
    let options = glob::MatchOptions {
        case_sensitive: false,
        ..Default::default()
    };

    let mut paths: Vec<PathBuf> = glob::glob_with(&pattern, options)
        .with_context(|| format!("Bad LUT folder pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();
    paths.sort();
    Ok(paths)
}

/// Image files to process. A directory input requires an output folder.
fn collect_images(input: &Path, out_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        if Format::is_supported_path(input) {
            return Ok(vec![input.to_path_buf()]);
        }
        warn!(path = %input.display(), "Skipping non-image file");
        return Ok(Vec::new());
    }
    if !input.is_dir() {
        bail!("Input not found: {}", input.display());
    }
    if out_dir.is_none() {
        bail!("An output folder (-o) is required when the input is a folder");
    }

    let mut images = Vec::new();
    for entry in std::fs::read_dir(input).with_context(|| format!("Failed to list {}", input.display()))? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if Format::is_supported_path(&path) {
            images.push(path);
        } else {
            warn!(path = %path.display(), "Skipping non-image file");
        }
    }
    images.sort();
    Ok(images)
}

/// `<stem>_<lut>[_thumb].<ext>`, in `out_dir` or next to the input.
fn output_path(input: &Path, out_dir: Option<&Path>, lut_name: &str, thumb: bool) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let suffix = if thumb { "_thumb" } else { "" };
    let name = match input.extension() {
        Some(ext) => format!("{}_{}{}.{}", stem, lut_name, suffix, ext.to_string_lossy()),
        None => format!("{}_{}{}", stem, lut_name, suffix),
    };

    let dir = out_dir.or_else(|| input.parent()).unwrap_or_else(|| Path::new(""));
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubelut_lut::write_cube;

    #[test]
    fn output_naming() {
        let input = Path::new("/shots/beach.JPG");
        assert_eq!(
            output_path(input, None, "teal_orange", false),
            PathBuf::from("/shots/beach_teal_orange.JPG")
        );
        assert_eq!(
            output_path(input, Some(Path::new("/out")), "teal_orange", true),
            PathBuf::from("/out/beach_teal_orange_thumb.JPG")
        );
        assert_eq!(
            output_path(Path::new("frame.png"), None, "x", false),
            PathBuf::from("frame_x.png")
        );
    }

    #[test]
    fn lut_folder_scan_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let lut = LutTable::identity(2).unwrap();
        write_cube(dir.path().join("b.cube"), &lut).unwrap();
        write_cube(dir.path().join("A.CUBE"), &lut).unwrap();
        std::fs::write(dir.path().join("readme.txt"), "x").unwrap();

        let paths = collect_lut_paths(dir.path()).unwrap();
        let names: Vec<_> = paths.iter().map(|p| p.file_name().unwrap().to_str().unwrap()).collect();
        assert_eq!(names, ["A.CUBE", "b.cube"]);
    }

    #[test]
    fn bad_luts_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_cube(dir.path().join("good.cube"), &LutTable::identity(2).unwrap()).unwrap();
        std::fs::write(dir.path().join("bad.cube"), "LUT_1D_SIZE 2\n0 0 0\n1 1 1\n").unwrap();

        let luts = load_luts(dir.path(), false).unwrap();
        assert_eq!(luts.len(), 1);
        assert_eq!(luts[0].name, "good");

        std::fs::remove_file(dir.path().join("good.cube")).unwrap();
        assert!(load_luts(dir.path(), false).is_err());
    }

    #[test]
    fn folder_input_needs_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), "").unwrap();
        std::fs::write(dir.path().join("notes.md"), "").unwrap();

        assert!(collect_images(dir.path(), None).is_err());
        let images = collect_images(dir.path(), Some(dir.path())).unwrap();
        assert_eq!(images, vec![dir.path().join("a.png")]);
    }

    fn apply_args(input: &Path, lut: &Path, output: &Path) -> ApplyArgs {
        ApplyArgs {
            input: input.to_path_buf(),
            lut: lut.to_path_buf(),
            output: Some(output.to_path_buf()),
            log: false,
            thumb: Some(2),
            tetrahedral: false,
            clip: false,
            filter: "bicubic".into(),
            quality: 95,
        }
    }

    #[test]
    fn batch_continues_past_bad_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let (luts, shots, out) = (dir.path().join("luts"), dir.path().join("shots"), dir.path().join("out"));
        for d in [&luts, &shots, &out] {
            std::fs::create_dir(d).unwrap();
        }

        write_cube(luts.join("identity.cube"), &LutTable::identity(2).unwrap()).unwrap();
        let invert: String = (0..8)
            .map(|k| format!("{} {} {}\n", 1 - k % 2, 1 - (k / 2) % 2, 1 - k / 4))
            .collect();
        std::fs::write(luts.join("invert.cube"), format!("LUT_3D_SIZE 2\n{}", invert)).unwrap();
        std::fs::write(luts.join("curve.cube"), "LUT_1D_SIZE 2\n0 0 0\n1 1 1\n").unwrap();

        let good = RgbImage::filled(4, 4, [200, 100, 50]);
        crate::commands::save_image(&shots.join("good.png"), &good, 95).unwrap();
        std::fs::write(shots.join("bad.png"), b"not a png").unwrap();

        let err = run(apply_args(&shots, &luts, &out)).unwrap_err();
        assert_eq!(err.to_string(), "1 jobs failed");

        let mut written: Vec<_> = std::fs::read_dir(&out)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        written.sort();
        assert_eq!(written, ["good_identity_thumb.png", "good_invert_thumb.png"]);

        let graded = crate::commands::load_image(&out.join("good_invert_thumb.png")).unwrap();
        assert_eq!((graded.width(), graded.height()), (2, 2));
        for (got, want) in graded.pixel(1, 1).unwrap().iter().zip([55u8, 155, 205]) {
            assert!((*got as i32 - want as i32).abs() <= 1, "got {}", got);
        }
    }

    #[test]
    fn batch_succeeds_when_every_job_does() {
        let dir = tempfile::tempdir().unwrap();
        let lut = dir.path().join("identity.cube");
        write_cube(&lut, &LutTable::identity(2).unwrap()).unwrap();
        let shot = dir.path().join("shot.png");
        crate::commands::save_image(&shot, &RgbImage::filled(3, 1, [9, 9, 9]), 95).unwrap();

        let mut args = apply_args(&shot, &lut, dir.path());
        args.thumb = None;
        run(args).unwrap();
        assert!(dir.path().join("shot_identity.png").is_file());
    }

    #[test]
    fn non_image_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "").unwrap();
        assert!(collect_images(&path, None).unwrap().is_empty());
    }
}
