use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::handlers;
use crate::state::SharedState;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    let bytes = body.into_bytes();
    let len = bytes.len();
    Response::new(
        StatusCode(200),
        vec![Header::from_bytes(b"Content-Type", b"text/html; charset=utf-8").unwrap()],
        Cursor::new(bytes),
        Some(len),
        None,
    )
}

pub fn redirect(location: &str) -> Response<Cursor<Vec<u8>>> {
    Response::new(
        StatusCode(303),
        vec![
            Header::from_bytes(b"Location", location.as_bytes()).unwrap(),
            Header::from_bytes(b"Content-Length", b"0").unwrap(),
        ],
        Cursor::new(Vec::new()),
        Some(0),
        None,
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    let body = b"404 Not Found".to_vec();
    let len = body.len();
    Response::new(
        StatusCode(404),
        vec![Header::from_bytes(b"Content-Type", b"text/plain").unwrap()],
        Cursor::new(body),
        Some(len),
        None,
    )
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// All handlers except SSE receive a `&mut Request` so the dispatcher keeps
/// ownership and responds at the end; the SSE handler takes ownership to
/// stream for the lifetime of the training run.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or(&url).to_owned();

    if method == Method::Get && path == "/train/events" {
        handlers::train_sse::handle(request, state);
        return;
    }

    let response = match (method, path.as_str()) {
        (Method::Get, "/") => redirect("/hopfield"),

        // ── Hopfield tab ─────────────────────────────────────────────────
        (Method::Get,  "/hopfield")         => handlers::hopfield::handle_get(state),
        (Method::Post, "/hopfield/imprint") => handlers::hopfield::handle_imprint(&mut request, state),
        (Method::Post, "/hopfield/recall")  => handlers::hopfield::handle_recall(&mut request, state),
        (Method::Post, "/hopfield/clear")   => handlers::hopfield::handle_clear(state),
        (Method::Post, "/hopfield/reset")   => handlers::hopfield::handle_reset(state),
        (Method::Post, "/hopfield/resize")  => handlers::hopfield::handle_resize(&mut request, state),
        (Method::Post, "/hopfield/upload")  => handlers::hopfield::handle_upload(&mut request, state),

        // ── Multilayer tab ───────────────────────────────────────────────
        (Method::Get,  "/multilayer")               => handlers::multilayer::handle_get(state),
        (Method::Post, "/multilayer/settings")      => handlers::multilayer::handle_settings(&mut request, state),
        (Method::Post, "/multilayer/layer/add")     => handlers::multilayer::handle_add_layer(state),
        (Method::Post, "/multilayer/layer/remove")  => handlers::multilayer::handle_remove_layer(state),
        (Method::Post, "/multilayer/neuron/add")    => handlers::multilayer::handle_add_neuron(&mut request, state),
        (Method::Post, "/multilayer/neuron/remove") => handlers::multilayer::handle_remove_neuron(&mut request, state),

        // ── Datasets ─────────────────────────────────────────────────────
        (Method::Post, "/dataset/upload") => handlers::dataset::handle_upload(&mut request, state),
        (Method::Post, "/dataset/select") => handlers::dataset::handle_select(&mut request, state),
        (Method::Post, "/dataset/delete") => handlers::dataset::handle_delete(&mut request, state),

        // ── Training ─────────────────────────────────────────────────────
        (Method::Post, "/train/start") => handlers::train::handle_start(state),
        (Method::Post, "/train/stop")  => handlers::train::handle_stop(state),

        _ => not_found(),
    };

    let _ = request.respond(response);
}
