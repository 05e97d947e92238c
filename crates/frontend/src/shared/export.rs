//! CSV export of table rows (Excel-compatible: `;` separator, UTF-8 BOM)
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

const SEPARATOR: &str = ";";

/// Builds the CSV document for the given header and rows
pub fn build_csv(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut csv_content = String::new();

    // BOM so Excel detects UTF-8
    csv_content.push('\u{FEFF}');

    let header_line: Vec<String> = headers.iter().map(|h| escape_csv_cell(h)).collect();
    csv_content.push_str(&header_line.join(SEPARATOR));
    csv_content.push('\n');

    for row in rows {
        let escaped_row: Vec<String> = row.iter().map(|cell| escape_csv_cell(cell)).collect();
        csv_content.push_str(&escaped_row.join(SEPARATOR));
        csv_content.push('\n');
    }

    csv_content
}

/// Quotes a cell containing the separator, quotes or line breaks
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(';') || cell.contains('"') || cell.contains('\n') || cell.contains('\r') {
        let escaped = cell.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        cell.to_string()
    }
}

/// Offers `content` to the browser as a file download
pub fn download_csv(content: &str, filename: &str) -> Result<(), String> {
    let blob = create_csv_blob(content)?;
    download_blob(&blob, filename)
}

fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(&url);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;
    anchor.click();
    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    Ok(())
}
