//! Open XML part emission for PPTX packages.
//!
//! Parts are emitted as strings; only content that can carry user data goes
//! through [`escape_xml`]. Geometry is written in EMU via [`super::emu`] so
//! identical placements always serialize to identical bytes.

use super::{emu, SlideTemplate};
use crate::layout::{ImagePlacement, TextPlacement, FONT_NAME};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PRESENTATION: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Accent color of the frame drawn around particle mask images.
const OUTLINE_COLOR: &str = "4472C4";

/// Frame width around particle mask images: 0.5 pt in EMU.
const OUTLINE_WIDTH_EMU: u32 = 6350;

/// Escape XML special characters in text content.
pub(super) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// `[Content_Types].xml`: defaults for the package plus one override per
/// part. Each distinct media extension gets a default content type.
pub(super) fn content_types(slide_count: usize, media_extensions: &[&str]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let mut seen: Vec<&str> = Vec::new();
    for ext in media_extensions {
        if seen.contains(ext) {
            continue;
        }
        seen.push(ext);
        let content_type = match *ext {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "tif" | "tiff" => "image/tiff",
            _ => "application/octet-stream",
        };
        xml.push_str(&format!(
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            ext, content_type
        ));
    }

    xml.push_str(r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#);
    xml.push_str(r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#);
    for number in 1..=slide_count {
        xml.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
            number
        ));
    }
    xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
    xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
    xml.push_str("</Types>");
    xml
}

/// Package-level relationships: the presentation part and document
/// properties.
pub(super) fn root_rels() -> String {
    format!(
        concat!(
            r#"{decl}"#,
            "\n",
            r#"<Relationships xmlns="{ns}">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECL,
        ns = NS_PKG_REL,
    )
}

/// `docProps/core.xml` with the creation timestamp.
pub(super) fn core_props() -> String {
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        concat!(
            r#"{decl}"#,
            "\n",
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            r#"<dc:title>PLA quantification summary</dc:title>"#,
            r#"<dc:creator>pla_deck</dc:creator>"#,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{now}</dcterms:created>"#,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{now}</dcterms:modified>"#,
            "</cp:coreProperties>"
        ),
        decl = XML_DECL,
        now = now,
    )
}

/// `docProps/app.xml` with the slide count.
pub(super) fn app_props(slide_count: usize) -> String {
    format!(
        concat!(
            r#"{decl}"#,
            "\n",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
            r#"<Application>pla_deck</Application>"#,
            r#"<Slides>{slides}</Slides>"#,
            "</Properties>"
        ),
        decl = XML_DECL,
        slides = slide_count,
    )
}

/// `ppt/presentation.xml`: master list, slide list, and slide size.
pub(super) fn presentation(template: SlideTemplate, slide_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(&format!(
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        NS_DRAWING, NS_REL, NS_PRESENTATION
    ));
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    xml.push_str("<p:sldIdLst>");
    for index in 0..slide_count {
        xml.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            256 + index,
            index + 2
        ));
    }
    xml.push_str("</p:sldIdLst>");
    xml.push_str(&format!(
        r#"<p:sldSz cx="{}" cy="{}"/>"#,
        emu(template.width_cm),
        emu(template.height_cm)
    ));
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    xml
}

/// Relationships for the presentation part: the master, then one slide per
/// `rId{n + 2}`.
pub(super) fn presentation_rels(slide_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, NS_PKG_REL));
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#);
    for index in 0..slide_count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            index + 2,
            index + 1
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Minimal theme part; slides place everything explicitly, so only the
/// scheme plumbing the format requires is present.
pub(super) fn theme() -> String {
    format!(
        concat!(
            r#"{decl}"#,
            "\n",
            r#"<a:theme xmlns:a="{ns}" name="Office Theme"><a:themeElements>"#,
            r#"<a:clrScheme name="Office">"#,
            r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
            r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
            r#"<a:dk2><a:srgbClr val="44546A"/></a:dk2>"#,
            r#"<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#,
            r#"<a:accent1><a:srgbClr val="4472C4"/></a:accent1>"#,
            r#"<a:accent2><a:srgbClr val="ED7D31"/></a:accent2>"#,
            r#"<a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>"#,
            r#"<a:accent4><a:srgbClr val="FFC000"/></a:accent4>"#,
            r#"<a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>"#,
            r#"<a:accent6><a:srgbClr val="70AD47"/></a:accent6>"#,
            r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink>"#,
            r#"<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#,
            "</a:clrScheme>",
            r#"<a:fontScheme name="Office">"#,
            r#"<a:majorFont><a:latin typeface="Times New Roman"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Times New Roman"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>",
            r#"<a:fmtScheme name="Office">"#,
            r#"<a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst>"#,
            r#"<a:lnStyleLst><a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst>"#,
            r#"<a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst>"#,
            r#"<a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst>"#,
            "</a:fmtScheme>",
            "</a:themeElements></a:theme>"
        ),
        decl = XML_DECL,
        ns = NS_DRAWING,
    )
}

/// Empty shape tree shared by the master, layout, and slide wrappers.
fn empty_sp_tree() -> &'static str {
    concat!(
        "<p:spTree>",
        r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
        r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
        "</p:spTree>"
    )
}

/// Blank slide master referencing the single layout and the theme.
pub(super) fn slide_master() -> String {
    format!(
        concat!(
            r#"{decl}"#,
            "\n",
            r#"<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            "<p:cSld>{tree}</p:cSld>",
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "</p:sldMaster>"
        ),
        decl = XML_DECL,
        a = NS_DRAWING,
        r = NS_REL,
        p = NS_PRESENTATION,
        tree = empty_sp_tree(),
    )
}

pub(super) fn slide_master_rels() -> String {
    format!(
        concat!(
            r#"{decl}"#,
            "\n",
            r#"<Relationships xmlns="{ns}">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECL,
        ns = NS_PKG_REL,
    )
}

/// The blank layout every slide uses.
pub(super) fn slide_layout() -> String {
    format!(
        concat!(
            r#"{decl}"#,
            "\n",
            r#"<p:sldLayout xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" type="blank" preserve="1">"#,
            r#"<p:cSld name="Blank">{tree}</p:cSld>"#,
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sldLayout>"
        ),
        decl = XML_DECL,
        a = NS_DRAWING,
        r = NS_REL,
        p = NS_PRESENTATION,
        tree = empty_sp_tree(),
    )
}

pub(super) fn slide_layout_rels() -> String {
    format!(
        concat!(
            r#"{decl}"#,
            "\n",
            r#"<Relationships xmlns="{ns}">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECL,
        ns = NS_PKG_REL,
    )
}

/// Wrap serialized shapes into a slide part.
pub(super) fn slide(shapes: &str) -> String {
    format!(
        concat!(
            r#"{decl}"#,
            "\n",
            r#"<p:sld xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            "<p:cSld><p:spTree>",
            r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
            r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
            "{shapes}",
            "</p:spTree></p:cSld>",
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sld>"
        ),
        decl = XML_DECL,
        a = NS_DRAWING,
        r = NS_REL,
        p = NS_PRESENTATION,
        shapes = shapes,
    )
}

/// Relationships for one slide: the layout, then its images in `rId` order.
pub(super) fn slide_rels(media: &[(usize, &str)]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECL);
    xml.push('\n');
    xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, NS_PKG_REL));
    xml.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#);
    for (position, (number, extension)) in media.iter().enumerate() {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image{}.{}"/>"#,
            position + 2,
            number,
            extension
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// A centered text box shape.
pub(super) fn text_shape(id: u32, text: &TextPlacement) -> String {
    let bold = if text.font.bold { r#" b="1""# } else { "" };
    format!(
        concat!(
            "<p:sp>",
            r#"<p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#,
            "<p:spPr>",
            r#"<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#,
            "<a:noFill/>",
            "</p:spPr>",
            "<p:txBody>",
            r#"<a:bodyPr wrap="square" rtlCol="0"/><a:lstStyle/>"#,
            r#"<a:p><a:pPr algn="ctr"/><a:r>"#,
            r#"<a:rPr lang="en-US" sz="{sz}"{bold}><a:latin typeface="{font}"/></a:rPr>"#,
            "<a:t>{text}</a:t>",
            "</a:r></a:p>",
            "</p:txBody>",
            "</p:sp>"
        ),
        id = id,
        x = emu(text.bbox.left),
        y = emu(text.bbox.top),
        cx = emu(text.bbox.width),
        cy = emu(text.bbox.height),
        sz = (text.font.size_pt * 100.0).round() as i32,
        bold = bold,
        font = FONT_NAME,
        text = escape_xml(&text.text),
    )
}

/// An embedded picture shape, optionally framed with the accent color.
pub(super) fn picture_shape(id: u32, image: &ImagePlacement, rel: u32) -> String {
    let outline = if image.outlined {
        format!(
            r#"<a:ln w="{}"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:ln>"#,
            OUTLINE_WIDTH_EMU, OUTLINE_COLOR
        )
    } else {
        String::new()
    };
    format!(
        concat!(
            "<p:pic>",
            r#"<p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}"/><p:cNvPicPr><a:picLocks noChangeAspect="0"/></p:cNvPicPr><p:nvPr/></p:nvPicPr>"#,
            r#"<p:blipFill><a:blip r:embed="rId{rel}"/><a:stretch><a:fillRect/></a:stretch></p:blipFill>"#,
            "<p:spPr>",
            r#"<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#,
            "{outline}",
            "</p:spPr>",
            "</p:pic>"
        ),
        id = id,
        rel = rel,
        x = emu(image.bbox.left),
        y = emu(image.bbox.top),
        cx = emu(image.bbox.width),
        cy = emu(image.bbox.height),
        outline = outline,
    )
}
