//! Deck assembly driver.
//!
//! Builds the architecture deck from its six HTML sources: fixed metadata,
//! one-shot resolution of the optional conversion helper (stub fallback),
//! a sequential per-slide loop that logs and continues on failure, and a
//! final serialization to the fixed output path.

use anyhow::{Context, Result};
use deck_core::{Presentation, Slide, SlideLayout};
use deck_html::{resolve_converter, SlideConverter};
use deck_pptx::PptxWriter;
use std::path::Path;

/// The slide sources, in deck order. Fixed at build time.
const SLIDE_FILES: [&str; 6] = [
    "slide1.html",
    "slide2.html",
    "slide3.html",
    "slide4.html",
    "slide5.html",
    "slide6.html",
];

/// Known relative location of the optional conversion helper settings.
const HELPER_PATH: &str = "skills/pptx/scripts/html2pptx.json";

/// Where the finished deck is written.
const OUTPUT_PATH: &str = "skills_mcp_architecture.pptx";

/// Deck metadata constants. No configuration surface.
const LAYOUT: SlideLayout = SlideLayout::Widescreen16x9;
const AUTHOR: &str = "Skills MCP";
const TITLE: &str = "Skills MCP Server Architecture";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run-level failures end the process; per-slide failures never reach here.
    if let Err(e) = run(Path::new("."), Path::new(HELPER_PATH), Path::new(OUTPUT_PATH)) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Assemble the deck and write it to `output_path`.
///
/// Every name in `SLIDE_FILES` contributes exactly one slide: the slide is
/// added before the conversion attempt and is never rolled back, so a
/// failed conversion leaves an empty slide in place and the loop moves on.
fn run(input_dir: &Path, helper_path: &Path, output_path: &Path) -> Result<()> {
    let mut presentation = Presentation::new(LAYOUT, AUTHOR, TITLE);
    let (width_in, height_in) = presentation.layout.dimensions_in();

    let converter = resolve_converter(helper_path);

    for slide_file in SLIDE_FILES {
        let html_path = input_dir.join(slide_file);
        presentation.add_slide(Slide::empty());

        match converter.convert(&html_path, width_in, height_in) {
            Ok(converted) => {
                if let Some(slide) = presentation.slides.last_mut() {
                    slide.blocks = converted.blocks;
                }
                log::info!("Processed {}", slide_file);
            }
            Err(e) => {
                log::warn!("Failed to convert {}: {}", slide_file, e);
            }
        }
    }

    PptxWriter::new()
        .write_to_file(&presentation, output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    log::info!("Presentation created successfully!");
    log::info!("Output: {}", output_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use zip::ZipArchive;

    fn write_slides(dir: &Path, count: usize) {
        for number in 1..=count {
            let html = format!(
                "<html><body><h1>Slide {}</h1><p>Body text</p></body></html>",
                number
            );
            fs::write(dir.join(format!("slide{}.html", number)), html).unwrap();
        }
    }

    fn open_output(path: &Path) -> ZipArchive<fs::File> {
        ZipArchive::new(fs::File::open(path).unwrap()).unwrap()
    }

    fn count_slide_parts(archive: &mut ZipArchive<fs::File>) -> usize {
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
            .count()
    }

    fn read_part(archive: &mut ZipArchive<fs::File>, name: &str) -> String {
        let mut part = archive.by_name(name).unwrap();
        let mut content = String::new();
        part.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_all_inputs_present() {
        let dir = tempfile::tempdir().unwrap();
        write_slides(dir.path(), 6);
        let helper = dir.path().join("html2pptx.json");
        fs::write(&helper, "{}").unwrap();
        let output = dir.path().join("deck.pptx");

        run(dir.path(), &helper, &output).unwrap();

        let mut archive = open_output(&output);
        assert_eq!(count_slide_parts(&mut archive), 6);

        let core = read_part(&mut archive, "docProps/core.xml");
        assert!(core.contains(TITLE));
        assert!(core.contains(AUTHOR));

        let slide1 = read_part(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide1.contains("Slide 1"));
    }

    #[test]
    fn test_helper_missing_stub_still_produces_six_slides() {
        let dir = tempfile::tempdir().unwrap();
        write_slides(dir.path(), 6);
        let output = dir.path().join("deck.pptx");

        run(dir.path(), &dir.path().join("no-such-helper.json"), &output).unwrap();

        let mut archive = open_output(&output);
        assert_eq!(count_slide_parts(&mut archive), 6);

        // The stub converts nothing, so slides carry no text shapes.
        let slide1 = read_part(&mut archive, "ppt/slides/slide1.xml");
        assert!(!slide1.contains("<p:sp>"));
    }

    #[test]
    fn test_missing_inputs_do_not_abort_the_run() {
        let dir = tempfile::tempdir().unwrap();
        // Only slides 1-3 exist; 4-6 fail conversion but stay in the deck.
        write_slides(dir.path(), 3);
        let helper = dir.path().join("html2pptx.json");
        fs::write(&helper, "{}").unwrap();
        let output = dir.path().join("deck.pptx");

        run(dir.path(), &helper, &output).unwrap();

        let mut archive = open_output(&output);
        assert_eq!(count_slide_parts(&mut archive), 6);

        let slide2 = read_part(&mut archive, "ppt/slides/slide2.xml");
        assert!(slide2.contains("Slide 2"));
        let slide5 = read_part(&mut archive, "ppt/slides/slide5.xml");
        assert!(!slide5.contains("<p:sp>"));
    }

    #[test]
    fn test_unwritable_output_is_a_run_level_error() {
        let dir = tempfile::tempdir().unwrap();
        write_slides(dir.path(), 6);
        let output = dir.path().join("missing-subdir").join("deck.pptx");

        let result = run(dir.path(), &dir.path().join("helper.json"), &output);

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_metadata_constants() {
        assert_eq!(LAYOUT, SlideLayout::Widescreen16x9);
        assert_eq!(SLIDE_FILES.len(), 6);
        assert_eq!(SLIDE_FILES[0], "slide1.html");
        assert_eq!(SLIDE_FILES[5], "slide6.html");
    }
}
