/// neurolab studio
///
/// A browser front end for the two lab networks, served by a synchronous
/// tiny_http server; no JavaScript frameworks required.
///
/// Run with:
///   cargo run --bin studio --release
/// Then open http://127.0.0.1:7878
///
/// Tabs:
///   1. Hopfield    — paint a bitmap, imprint it, recall noisy probes
///   2. Multilayer  — shape the network, upload CSV datasets, train, test

mod handlers;
mod render;
mod routes;
mod state;
mod util;

use std::sync::{Arc, Mutex};
use tiny_http::Server;

use state::StudioState;

fn main() {
    let addr = "127.0.0.1:7878";
    let server = Server::http(addr).expect("Failed to bind HTTP server");

    let shared_state = Arc::new(Mutex::new(StudioState::new()));

    println!("neurolab studio listening on http://{}", addr);
    println!("  /hopfield   — associative memory grid");
    println!("  /multilayer — feed-forward network trainer");

    // Each request gets its own thread so the SSE handler (which blocks for
    // the whole training run) does not stall page loads.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
}
