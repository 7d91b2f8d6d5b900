//! PPTX package writer.
//!
//! Builds the dynamic XML parts with quick-xml events and assembles the
//! package with a ZIP writer. Part wiring mirrors how PowerPoint itself
//! lays a package out: the root relationships point at the presentation
//! part, which points at its master and slides, and each slide points
//! back at the single blank layout.

use crate::parts::*;
use deck_core::types::inches_to_emu;
use deck_core::{Error, Presentation, Result, Slide, TextBlock};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

/// Writer for PPTX (Office Open XML) packages.
pub struct PptxWriter;

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize the presentation to a file at `path`.
    pub fn write_to_file(&self, presentation: &Presentation, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write(presentation, BufWriter::new(file))
    }

    /// Serialize the presentation to any seekable sink.
    pub fn write<W: Write + Seek>(&self, presentation: &Presentation, sink: W) -> Result<()> {
        let mut archive = ZipWriter::new(sink);
        let options =
            FileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let slide_count = presentation.slide_count();

        log::debug!("Writing PPTX package with {} slides", slide_count);

        self.put(
            &mut archive,
            options,
            "[Content_Types].xml",
            &content_types_xml(slide_count)?,
        )?;
        self.put(&mut archive, options, "_rels/.rels", &root_rels_xml()?)?;
        self.put(
            &mut archive,
            options,
            "docProps/core.xml",
            &core_properties_xml(presentation)?,
        )?;
        self.put(
            &mut archive,
            options,
            "docProps/app.xml",
            &app_properties_xml(slide_count)?,
        )?;
        self.put(
            &mut archive,
            options,
            "ppt/presentation.xml",
            &presentation_xml(presentation)?,
        )?;
        self.put(
            &mut archive,
            options,
            "ppt/_rels/presentation.xml.rels",
            &presentation_rels_xml(slide_count)?,
        )?;

        self.put(
            &mut archive,
            options,
            "ppt/slideMasters/slideMaster1.xml",
            SLIDE_MASTER_XML.as_bytes(),
        )?;
        self.put(
            &mut archive,
            options,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            SLIDE_MASTER_RELS_XML.as_bytes(),
        )?;
        self.put(
            &mut archive,
            options,
            "ppt/slideLayouts/slideLayout1.xml",
            SLIDE_LAYOUT_XML.as_bytes(),
        )?;
        self.put(
            &mut archive,
            options,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            SLIDE_LAYOUT_RELS_XML.as_bytes(),
        )?;
        self.put(
            &mut archive,
            options,
            "ppt/theme/theme1.xml",
            THEME_XML.as_bytes(),
        )?;

        for (idx, slide) in presentation.slides.iter().enumerate() {
            let number = idx + 1;
            self.put(&mut archive, options, &slide_part_path(number), &slide_xml(slide)?)?;
            self.put(
                &mut archive,
                options,
                &slide_rels_path(number),
                SLIDE_RELS_XML.as_bytes(),
            )?;
        }

        archive
            .finish()
            .map_err(|e| Error::ZipError(format!("cannot finalize package: {}", e)))?;

        Ok(())
    }

    /// Add one part to the package.
    fn put<W: Write + Seek>(
        &self,
        archive: &mut ZipWriter<W>,
        options: FileOptions,
        name: &str,
        content: &[u8],
    ) -> Result<()> {
        archive
            .start_file(name, options)
            .map_err(|e| Error::ZipError(format!("cannot start part '{}': {}", name, e)))?;
        archive.write_all(content)?;
        Ok(())
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn xml_err(e: quick_xml::Error) -> Error {
    Error::XmlError(e.to_string())
}

fn write_decl(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)
}

fn write_empty(writer: &mut Writer<Vec<u8>>, elem: BytesStart) -> Result<()> {
    writer.write_event(Event::Empty(elem)).map_err(xml_err)
}

fn write_start(writer: &mut Writer<Vec<u8>>, elem: BytesStart) -> Result<()> {
    writer.write_event(Event::Start(elem)).map_err(xml_err)
}

fn write_end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_err)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    write_start(writer, BytesStart::new(name))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_err)?;
    write_end(writer, name)
}

/// One entry in a relationships part.
struct Rel {
    id: String,
    rel_type: &'static str,
    target: String,
}

fn relationships_xml(rels: &[Rel]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("Relationships");
    root.push_attribute(("xmlns", NS_RELATIONSHIPS));
    write_start(&mut writer, root)?;

    for rel in rels {
        let mut elem = BytesStart::new("Relationship");
        elem.push_attribute(("Id", rel.id.as_str()));
        elem.push_attribute(("Type", rel.rel_type));
        elem.push_attribute(("Target", rel.target.as_str()));
        write_empty(&mut writer, elem)?;
    }

    write_end(&mut writer, "Relationships")?;
    Ok(writer.into_inner())
}

fn content_types_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("Types");
    root.push_attribute(("xmlns", NS_CONTENT_TYPES));
    write_start(&mut writer, root)?;

    for (ext, content_type) in [("rels", CT_RELATIONSHIPS), ("xml", "application/xml")] {
        let mut elem = BytesStart::new("Default");
        elem.push_attribute(("Extension", ext));
        elem.push_attribute(("ContentType", content_type));
        write_empty(&mut writer, elem)?;
    }

    let mut overrides: Vec<(String, &str)> = vec![
        ("/ppt/presentation.xml".to_string(), CT_PRESENTATION),
        (
            "/ppt/slideMasters/slideMaster1.xml".to_string(),
            CT_SLIDE_MASTER,
        ),
        (
            "/ppt/slideLayouts/slideLayout1.xml".to_string(),
            CT_SLIDE_LAYOUT,
        ),
        ("/ppt/theme/theme1.xml".to_string(), CT_THEME),
        ("/docProps/core.xml".to_string(), CT_CORE_PROPERTIES),
        ("/docProps/app.xml".to_string(), CT_APP_PROPERTIES),
    ];
    for number in 1..=slide_count {
        overrides.push((format!("/{}", slide_part_path(number)), CT_SLIDE));
    }

    for (part_name, content_type) in &overrides {
        let mut elem = BytesStart::new("Override");
        elem.push_attribute(("PartName", part_name.as_str()));
        elem.push_attribute(("ContentType", *content_type));
        write_empty(&mut writer, elem)?;
    }

    write_end(&mut writer, "Types")?;
    Ok(writer.into_inner())
}

fn root_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[
        Rel {
            id: "rId1".to_string(),
            rel_type: REL_OFFICE_DOCUMENT,
            target: "ppt/presentation.xml".to_string(),
        },
        Rel {
            id: "rId2".to_string(),
            rel_type: REL_CORE_PROPERTIES,
            target: "docProps/core.xml".to_string(),
        },
        Rel {
            id: "rId3".to_string(),
            rel_type: REL_APP_PROPERTIES,
            target: "docProps/app.xml".to_string(),
        },
    ])
}

fn core_properties_xml(presentation: &Presentation) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("cp:coreProperties");
    root.push_attribute((
        "xmlns:cp",
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
    ));
    root.push_attribute(("xmlns:dc", "http://purl.org/dc/elements/1.1/"));
    root.push_attribute(("xmlns:dcterms", "http://purl.org/dc/terms/"));
    root.push_attribute(("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"));
    root.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
    write_start(&mut writer, root)?;

    write_text_element(&mut writer, "dc:title", &presentation.title)?;
    write_text_element(&mut writer, "dc:creator", &presentation.author)?;

    write_end(&mut writer, "cp:coreProperties")?;
    Ok(writer.into_inner())
}

fn app_properties_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("Properties");
    root.push_attribute((
        "xmlns",
        "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
    ));
    root.push_attribute((
        "xmlns:vt",
        "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
    ));
    write_start(&mut writer, root)?;

    write_text_element(&mut writer, "Application", "deck-assemble")?;
    write_text_element(&mut writer, "Slides", &slide_count.to_string())?;

    write_end(&mut writer, "Properties")?;
    Ok(writer.into_inner())
}

fn presentation_xml(presentation: &Presentation) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("p:presentation");
    root.push_attribute(("xmlns:a", NS_DRAWINGML));
    root.push_attribute(("xmlns:r", NS_OFFICE_RELATIONSHIPS));
    root.push_attribute(("xmlns:p", NS_PRESENTATIONML));
    write_start(&mut writer, root)?;

    write_start(&mut writer, BytesStart::new("p:sldMasterIdLst"))?;
    let mut master_id = BytesStart::new("p:sldMasterId");
    master_id.push_attribute(("id", "2147483648"));
    master_id.push_attribute(("r:id", "rId1"));
    write_empty(&mut writer, master_id)?;
    write_end(&mut writer, "p:sldMasterIdLst")?;

    // Slide IDs start at 256; relationship IDs follow the master at rId1.
    write_start(&mut writer, BytesStart::new("p:sldIdLst"))?;
    for idx in 0..presentation.slide_count() {
        let id = (256 + idx).to_string();
        let r_id = format!("rId{}", idx + 2);
        let mut slide_id = BytesStart::new("p:sldId");
        slide_id.push_attribute(("id", id.as_str()));
        slide_id.push_attribute(("r:id", r_id.as_str()));
        write_empty(&mut writer, slide_id)?;
    }
    write_end(&mut writer, "p:sldIdLst")?;

    let (cx, cy) = presentation.layout.dimensions_emu();
    let cx = cx.to_string();
    let cy = cy.to_string();
    let mut slide_size = BytesStart::new("p:sldSz");
    slide_size.push_attribute(("cx", cx.as_str()));
    slide_size.push_attribute(("cy", cy.as_str()));
    write_empty(&mut writer, slide_size)?;

    let mut notes_size = BytesStart::new("p:notesSz");
    notes_size.push_attribute(("cx", "6858000"));
    notes_size.push_attribute(("cy", "9144000"));
    write_empty(&mut writer, notes_size)?;

    write_end(&mut writer, "p:presentation")?;
    Ok(writer.into_inner())
}

fn presentation_rels_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut rels = vec![Rel {
        id: "rId1".to_string(),
        rel_type: REL_SLIDE_MASTER,
        target: "slideMasters/slideMaster1.xml".to_string(),
    }];

    for number in 1..=slide_count {
        rels.push(Rel {
            id: format!("rId{}", number + 1),
            rel_type: REL_SLIDE,
            target: format!("slides/slide{}.xml", number),
        });
    }

    relationships_xml(&rels)
}

fn slide_xml(slide: &Slide) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());
    write_decl(&mut writer)?;

    let mut root = BytesStart::new("p:sld");
    root.push_attribute(("xmlns:a", NS_DRAWINGML));
    root.push_attribute(("xmlns:r", NS_OFFICE_RELATIONSHIPS));
    root.push_attribute(("xmlns:p", NS_PRESENTATIONML));
    write_start(&mut writer, root)?;

    write_start(&mut writer, BytesStart::new("p:cSld"))?;
    write_start(&mut writer, BytesStart::new("p:spTree"))?;

    write_start(&mut writer, BytesStart::new("p:nvGrpSpPr"))?;
    let mut group_props = BytesStart::new("p:cNvPr");
    group_props.push_attribute(("id", "1"));
    group_props.push_attribute(("name", ""));
    write_empty(&mut writer, group_props)?;
    write_empty(&mut writer, BytesStart::new("p:cNvGrpSpPr"))?;
    write_empty(&mut writer, BytesStart::new("p:nvPr"))?;
    write_end(&mut writer, "p:nvGrpSpPr")?;
    write_empty(&mut writer, BytesStart::new("p:grpSpPr"))?;

    // Shape IDs within a slide start after the group shape at id 1.
    for (idx, block) in slide.blocks.iter().enumerate() {
        write_text_shape(&mut writer, block, idx + 2)?;
    }

    write_end(&mut writer, "p:spTree")?;
    write_end(&mut writer, "p:cSld")?;

    write_start(&mut writer, BytesStart::new("p:clrMapOvr"))?;
    write_empty(&mut writer, BytesStart::new("a:masterClrMapping"))?;
    write_end(&mut writer, "p:clrMapOvr")?;

    write_end(&mut writer, "p:sld")?;
    Ok(writer.into_inner())
}

fn write_text_shape(writer: &mut Writer<Vec<u8>>, block: &TextBlock, id: usize) -> Result<()> {
    write_start(writer, BytesStart::new("p:sp"))?;

    write_start(writer, BytesStart::new("p:nvSpPr"))?;
    let id_str = id.to_string();
    let name = format!("TextBox {}", id);
    let mut shape_props = BytesStart::new("p:cNvPr");
    shape_props.push_attribute(("id", id_str.as_str()));
    shape_props.push_attribute(("name", name.as_str()));
    write_empty(writer, shape_props)?;
    let mut text_box = BytesStart::new("p:cNvSpPr");
    text_box.push_attribute(("txBox", "1"));
    write_empty(writer, text_box)?;
    write_empty(writer, BytesStart::new("p:nvPr"))?;
    write_end(writer, "p:nvSpPr")?;

    write_start(writer, BytesStart::new("p:spPr"))?;
    write_start(writer, BytesStart::new("a:xfrm"))?;
    let x = inches_to_emu(block.x).to_string();
    let y = inches_to_emu(block.y).to_string();
    let mut offset = BytesStart::new("a:off");
    offset.push_attribute(("x", x.as_str()));
    offset.push_attribute(("y", y.as_str()));
    write_empty(writer, offset)?;
    let cx = inches_to_emu(block.w).to_string();
    let cy = inches_to_emu(block.h).to_string();
    let mut extent = BytesStart::new("a:ext");
    extent.push_attribute(("cx", cx.as_str()));
    extent.push_attribute(("cy", cy.as_str()));
    write_empty(writer, extent)?;
    write_end(writer, "a:xfrm")?;
    let mut geometry = BytesStart::new("a:prstGeom");
    geometry.push_attribute(("prst", "rect"));
    write_start(writer, geometry)?;
    write_empty(writer, BytesStart::new("a:avLst"))?;
    write_end(writer, "a:prstGeom")?;
    write_end(writer, "p:spPr")?;

    write_start(writer, BytesStart::new("p:txBody"))?;
    let mut body_props = BytesStart::new("a:bodyPr");
    body_props.push_attribute(("wrap", "square"));
    write_empty(writer, body_props)?;
    write_empty(writer, BytesStart::new("a:lstStyle"))?;
    write_start(writer, BytesStart::new("a:p"))?;
    write_start(writer, BytesStart::new("a:r"))?;
    // Font size is expressed in hundredths of a point.
    let size = ((block.font_size * 100.0).round() as i64).to_string();
    let mut run_props = BytesStart::new("a:rPr");
    run_props.push_attribute(("lang", "en-US"));
    run_props.push_attribute(("sz", size.as_str()));
    if block.bold {
        run_props.push_attribute(("b", "1"));
    }
    write_empty(writer, run_props)?;
    write_text_element(writer, "a:t", &block.text)?;
    write_end(writer, "a:r")?;
    write_end(writer, "a:p")?;
    write_end(writer, "p:txBody")?;

    write_end(writer, "p:sp")?;
    Ok(())
}
