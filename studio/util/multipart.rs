//! Minimal multipart/form-data parsing for the two studio upload forms
//! (CSV dataset and Hopfield pattern image). Only what those forms need:
//! one named file part plus plain text fields.

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|s| s.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_owned())
}

/// Raw bytes of the file part whose field is `field_name`.
pub fn file_field(body: &[u8], boundary: &str, field_name: &str) -> Option<Vec<u8>> {
    parts(body, boundary).into_iter().find_map(|(headers, data)| {
        let named = headers.contains(&format!("name=\"{}\"", field_name));
        if named && headers.contains("filename=") {
            Some(data.to_vec())
        } else {
            None
        }
    })
}

/// Value of the plain-text part whose field is `field_name`.
pub fn text_field(body: &[u8], boundary: &str, field_name: &str) -> Option<String> {
    parts(body, boundary).into_iter().find_map(|(headers, data)| {
        let named = headers.contains(&format!("name=\"{}\"", field_name));
        if named && !headers.contains("filename=") {
            String::from_utf8(data.to_vec()).ok()
        } else {
            None
        }
    })
}

/// Splits the body on the boundary and returns `(headers, data)` per part.
fn parts<'a>(body: &'a [u8], boundary: &str) -> Vec<(String, &'a [u8])> {
    let delimiter = format!("--{}", boundary);
    let mut found = Vec::new();

    for part in split_on(body, delimiter.as_bytes()) {
        if let Some(sep) = find(part, b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&part[..sep]).into_owned();
            let data = &part[sep + 4..];
            let data = data.strip_suffix(b"\r\n").unwrap_or(data);
            found.push((headers, data));
        }
    }
    found
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut pieces = Vec::new();
    let mut rest = haystack;
    while let Some(pos) = find(rest, needle) {
        pieces.push(&rest[..pos]);
        rest = &rest[pos + needle.len()..];
    }
    pieces.push(rest);
    pieces
}
