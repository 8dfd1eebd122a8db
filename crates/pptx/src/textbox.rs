//! Text box shape synthesis.

use crate::escape::escape_text;
use crate::shape_id::ShapeId;

/// Horizontal offset of the text box, in EMU.
pub const OFFSET_X: i64 = 187_890;
/// Vertical offset of the text box, in EMU.
pub const OFFSET_Y: i64 = 8_467_594;
/// Width of the text box, in EMU.
pub const EXTENT_CX: i64 = 14_779_616;
/// Height of the text box, in EMU.
pub const EXTENT_CY: i64 = 1_200_329;
/// Language tag of the generated runs.
pub const LANGUAGE: &str = "es-ES";

/// Display name prefix of generated shapes.
const SHAPE_NAME: &str = "CuadroTexto";

/// Build a `<p:sp>` text box holding `title` and `body` as two paragraphs.
///
/// The fragment declares its own namespaces so it stays well-formed on its
/// own. Text is escaped; its length is not checked.
pub fn text_box_xml(id: ShapeId, title: &str, body: &str) -> String {
    format!(
        r#"<p:sp xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:nvSpPr>
    <p:cNvPr id="{id}" name="{name} {name_number}"/>
    <p:cNvSpPr txBox="1"/>
    <p:nvPr/>
  </p:nvSpPr>
  <p:spPr>
    <a:xfrm>
      <a:off x="{x}" y="{y}"/>
      <a:ext cx="{cx}" cy="{cy}"/>
    </a:xfrm>
    <a:prstGeom prst="rect">
      <a:avLst/>
    </a:prstGeom>
    <a:noFill/>
  </p:spPr>
  <p:txBody>
    <a:bodyPr rot="0" spcFirstLastPara="0" vertOverflow="overflow" horzOverflow="overflow" vert="horz" wrap="square" lIns="91440" tIns="45720" rIns="91440" bIns="45720" numCol="1" spcCol="0" rtlCol="0" fromWordArt="0" anchor="t" anchorCtr="0" forceAA="0" compatLnSpc="1">
      <a:prstTxWarp prst="textNoShape">
        <a:avLst/>
      </a:prstTxWarp>
      <a:spAutoFit/>
    </a:bodyPr>
    <a:lstStyle/>
{title}
{body}
    <a:p>
      <a:endParaRPr lang="{lang}"/>
    </a:p>
  </p:txBody>
</p:sp>"#,
        id = id,
        name = SHAPE_NAME,
        name_number = id.name_number(),
        x = OFFSET_X,
        y = OFFSET_Y,
        cx = EXTENT_CX,
        cy = EXTENT_CY,
        title = paragraph_xml(title),
        body = paragraph_xml(body),
        lang = LANGUAGE,
    )
}

/// One paragraph with a single run.
fn paragraph_xml(text: &str) -> String {
    format!(
        r#"    <a:p>
      <a:r>
        <a:rPr lang="{}"/>
        <a:t>{}</a:t>
      </a:r>
    </a:p>"#,
        LANGUAGE,
        escape_text(text)
    )
}
