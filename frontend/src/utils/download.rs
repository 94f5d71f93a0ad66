use wasm_bindgen::JsCast;

/// Guesses a MIME type from the attachment's extension.
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

fn blob_url(bytes: &[u8], mime: &str) -> Result<String, String> {
    let array = js_sys::Array::new();
    array.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&array, &options)
        .map_err(|_| "Failed to create blob".to_string())?;
    web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Failed to create object URL".to_string())
}

/// Opens downloaded attachment bytes in a new tab.
pub fn open_attachment(file_name: &str, bytes: &[u8]) -> Result<(), String> {
    let url = blob_url(bytes, mime_for_file_name(file_name))?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let anchor = document
        .create_element("a")
        .map_err(|_| "Failed to create link".to_string())?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "Failed to cast anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_target("_blank");
    anchor.set_rel("noopener");
    anchor.style().set_property("display", "none").ok();
    document
        .body()
        .ok_or("No body")?
        .append_child(&anchor)
        .map_err(|_| "Append failed".to_string())?;
    anchor.click();
    anchor.remove();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::mime_for_file_name;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for_file_name("don-xin-nghi.PDF"), "application/pdf");
        assert_eq!(mime_for_file_name("giay-kham.jpeg"), "image/jpeg");
        assert_eq!(mime_for_file_name("README"), "application/octet-stream");
    }
}
