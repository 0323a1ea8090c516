use std::io::{Cursor, Read};
use tiny_http::{Request, Response};

use crate::render::{render_page, Page};
use crate::routes::{html_response, redirect};
use crate::state::{FlashMessage, SharedState, MAX_GRID, MIN_GRID};
use crate::util::form::{form_get, parse_form};
use crate::util::multipart::{extract_boundary, file_field};
use crate::util::pattern::{encode_pattern, image_to_pattern, parse_pattern};

// ---------------------------------------------------------------------------
// GET /hopfield
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let flash = st.take_flash();
    let hop = &st.hopfield;

    let grid = hop.grid;
    let user_cells = grid_cells(&hop.pattern, grid, true);
    let net_cells = grid_cells(&hop.output, grid, false);
    let pattern_value = encode_pattern(&hop.pattern);
    let imprints = hop.imprint_count;
    let training = st.is_training();

    let page = render_page(Page::Hopfield, flash.as_ref(), training, |tmpl| {
        tmpl.replace("{{GRID_SIZE}}", &grid.to_string())
            .replace("{{GRID_MIN}}", &MIN_GRID.to_string())
            .replace("{{GRID_MAX}}", &MAX_GRID.to_string())
            .replace("{{USER_CELLS}}", &user_cells)
            .replace("{{NET_CELLS}}", &net_cells)
            .replace("{{PATTERN_VALUE}}", &pattern_value)
            .replace("{{IMPRINT_COUNT}}", &imprints.to_string())
    });

    html_response(page)
}

/// Renders one g×g grid as clickable (or inert) cell divs.
fn grid_cells(cells: &[i8], grid: usize, clickable: bool) -> String {
    let mut html = String::new();
    for (i, &cell) in cells.iter().enumerate() {
        let on = if cell == 1 { " on" } else { "" };
        if clickable {
            html.push_str(&format!(
                r#"<div class="cell{on}" data-idx="{i}" onclick="toggleCell(this)"></div>"#
            ));
        } else {
            html.push_str(&format!(r#"<div class="cell{on}"></div>"#));
        }
        if (i + 1) % grid == 0 {
            html.push('\n');
        }
    }
    html
}

// ---------------------------------------------------------------------------
// POST handlers
// ---------------------------------------------------------------------------

/// Reads the posted pattern string and stores it as the current painting.
/// Returns None (plus a flash) when the pattern does not match the grid.
fn read_pattern(request: &mut Request, state: &SharedState) -> Option<Vec<i8>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);
    let raw = form_get(&pairs, "pattern").unwrap_or("");

    let mut st = state.lock().unwrap();
    let units = st.hopfield.network.units;
    match parse_pattern(raw, units) {
        Some(cells) => {
            st.hopfield.pattern = cells.clone();
            Some(cells)
        }
        None => {
            st.flash = Some(FlashMessage::error(
                "Pattern does not match the current grid size.",
            ));
            None
        }
    }
}

pub fn handle_imprint(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    if let Some(cells) = read_pattern(request, &state) {
        let mut st = state.lock().unwrap();
        st.hopfield.network.imprint(&cells);
        st.hopfield.imprint_count += 1;
        let count = st.hopfield.imprint_count;
        st.flash = Some(FlashMessage::success(format!(
            "Pattern stored ({} imprinted so far).",
            count
        )));
    }
    redirect("/hopfield")
}

pub fn handle_recall(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    if let Some(cells) = read_pattern(request, &state) {
        let mut st = state.lock().unwrap();
        st.hopfield.output = st.hopfield.network.recall(&cells);
    }
    redirect("/hopfield")
}

pub fn handle_clear(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let units = st.hopfield.network.units;
    st.hopfield.pattern = vec![-1; units];
    st.hopfield.output = vec![-1; units];
    redirect("/hopfield")
}

/// Forgets every imprinted pattern but keeps the grid and the painting.
pub fn handle_reset(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    st.hopfield.network.reset();
    st.hopfield.imprint_count = 0;
    st.flash = Some(FlashMessage::success("Network weights cleared."));
    redirect("/hopfield")
}

pub fn handle_resize(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);

    match form_get(&pairs, "grid").and_then(|v| v.trim().parse::<usize>().ok()) {
        Some(grid) if (MIN_GRID..=MAX_GRID).contains(&grid) => {
            let mut st = state.lock().unwrap();
            st.hopfield.resize(grid);
            st.flash = Some(FlashMessage::success(format!(
                "Grid resized to {g}x{g}; stored patterns were discarded.",
                g = grid
            )));
        }
        _ => {
            let mut st = state.lock().unwrap();
            st.flash = Some(FlashMessage::error(format!(
                "Grid size must be between {} and {}.",
                MIN_GRID, MAX_GRID
            )));
        }
    }
    redirect("/hopfield")
}

/// Loads an uploaded image as the current painting, thresholded to the grid.
pub fn handle_upload(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let boundary = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .and_then(|h| extract_boundary(h.value.as_str()));

    let mut body = Vec::new();
    let _ = request.as_reader().read_to_end(&mut body);

    let result = boundary
        .as_deref()
        .and_then(|b| file_field(&body, b, "file"))
        .ok_or_else(|| "No image file in upload.".to_owned())
        .and_then(|bytes| {
            let grid = state.lock().unwrap().hopfield.grid;
            image_to_pattern(&bytes, grid)
        });

    let mut st = state.lock().unwrap();
    match result {
        Ok(cells) => {
            st.hopfield.pattern = cells;
            st.flash = Some(FlashMessage::success("Image loaded onto the grid."));
        }
        Err(reason) => {
            st.flash = Some(FlashMessage::error(format!("Image upload failed: {}", reason)));
        }
    }
    redirect("/hopfield")
}
