use std::io::{Cursor, Read};
use tiny_http::{Request, Response};

use neurolab::data::csv::{parse_csv, ParseOptions};

use crate::routes::redirect;
use crate::state::{Dataset, FlashMessage, SharedState};
use crate::util::form::{form_get, parse_form};
use crate::util::multipart::{extract_boundary, file_field, text_field};

/// Upload cap; these are teaching datasets, not bulk data.
const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

// ---------------------------------------------------------------------------
// POST /dataset/upload  (multipart: file + header/skip checkboxes)
// ---------------------------------------------------------------------------

pub fn handle_upload(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let boundary = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .and_then(|h| extract_boundary(h.value.as_str()));

    let mut body = Vec::new();
    let _ = request.as_reader().read_to_end(&mut body);

    let mut st = state.lock().unwrap();

    if body.len() > MAX_UPLOAD_BYTES {
        st.flash = Some(FlashMessage::error("Upload exceeds the 4 MB limit."));
        return redirect("/multilayer");
    }

    let boundary = match boundary {
        Some(b) => b,
        None => {
            st.flash = Some(FlashMessage::error("Malformed upload request."));
            return redirect("/multilayer");
        }
    };

    // Checkbox fields arrive only when ticked.
    let options = ParseOptions {
        has_header: text_field(&body, &boundary, "has_header").is_some(),
        skip_empty_lines: text_field(&body, &boundary, "skip_empty_lines").is_some(),
    };
    st.upload_options.has_header = options.has_header;
    st.upload_options.skip_empty_lines = options.skip_empty_lines;

    let name = text_field(&body, &boundary, "name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("dataset-{}", st.datasets.len() + 1));

    let bytes = match file_field(&body, &boundary, "file") {
        Some(b) if !b.is_empty() => b,
        _ => {
            st.flash = Some(FlashMessage::error("No CSV file in upload."));
            return redirect("/multilayer");
        }
    };

    match parse_csv(&bytes, options) {
        Ok(rows) => {
            let count = rows.len();
            st.datasets.push(Dataset { name: name.clone(), rows });
            st.flash = Some(FlashMessage::success(format!(
                "Dataset '{}' loaded: {} rows.",
                name, count
            )));
        }
        Err(e) => {
            st.flash = Some(FlashMessage::error(format!("CSV parse error: {}", e)));
        }
    }
    redirect("/multilayer")
}

// ---------------------------------------------------------------------------
// POST /dataset/select  (train/test set dropdowns)
// ---------------------------------------------------------------------------

pub fn handle_select(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);

    let parse_choice = |key: &str| -> Option<usize> {
        form_get(&pairs, key).and_then(|v| v.trim().parse().ok())
    };

    let mut st = state.lock().unwrap();
    let count = st.datasets.len();
    st.train_set = parse_choice("train_set").filter(|&i| i < count);
    st.test_set = parse_choice("test_set").filter(|&i| i < count);
    redirect("/multilayer")
}

// ---------------------------------------------------------------------------
// POST /dataset/delete
// ---------------------------------------------------------------------------

pub fn handle_delete(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);

    if let Some(id) = form_get(&pairs, "id").and_then(|v| v.trim().parse::<usize>().ok()) {
        let mut st = state.lock().unwrap();
        if id < st.datasets.len() {
            st.datasets.remove(id);
            // Selections index into the list; shift or drop them.
            st.train_set = adjust_selection(st.train_set, id);
            st.test_set = adjust_selection(st.test_set, id);
        }
    }
    redirect("/multilayer")
}

fn adjust_selection(selected: Option<usize>, removed: usize) -> Option<usize> {
    match selected {
        Some(i) if i == removed => None,
        Some(i) if i > removed => Some(i - 1),
        other => other,
    }
}
