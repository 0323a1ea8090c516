use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Instant;
use tiny_http::Response;

use neurolab::data::columns::{class_count, extract_last_column};
use neurolab::multilayer::network::MAX_NEURONS_IN_LAYER;
use neurolab::{evaluate, train_loop, TrainConfig};

use crate::routes::redirect;
use crate::state::{FlashMessage, SharedState, TrainingStatus};

// ---------------------------------------------------------------------------
// POST /train/start
// ---------------------------------------------------------------------------

/// Validates the run, then trains on a background thread. The engine itself
/// checks nothing (preconditions only), so every user-facing rule lives
/// here: selected and distinct datasets, matching feature widths, class
/// count within the output layer bounds, and no run already in progress.
pub fn handle_start(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();

    if st.is_training() {
        st.flash = Some(FlashMessage::error("A training run is already in progress."));
        return redirect("/multilayer");
    }

    let (train_idx, test_idx) = match (st.train_set, st.test_set) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            st.flash = Some(FlashMessage::error("Select a training and a testing dataset."));
            return redirect("/multilayer");
        }
    };
    if train_idx == test_idx {
        st.flash = Some(FlashMessage::error(
            "Training and testing datasets must be different.",
        ));
        return redirect("/multilayer");
    }

    let train_rows = st.datasets[train_idx].rows.clone();
    let test_rows = st.datasets[test_idx].rows.clone();
    if train_rows.is_empty() || test_rows.is_empty() {
        st.flash = Some(FlashMessage::error("Selected datasets contain no rows."));
        return redirect("/multilayer");
    }

    let feature_count = train_rows[0].len() - 1;
    if test_rows[0].len() - 1 != feature_count {
        st.flash = Some(FlashMessage::error(
            "Training and testing datasets have different feature counts.",
        ));
        return redirect("/multilayer");
    }

    let labels = {
        let mut rows = train_rows.clone();
        extract_last_column(&mut rows)
    };
    let classes = class_count(&labels);
    if classes < 2 || classes > MAX_NEURONS_IN_LAYER || feature_count > MAX_NEURONS_IN_LAYER {
        st.flash = Some(FlashMessage::error(format!(
            "Dataset shape out of bounds: up to {} features and 2..={} classes.",
            MAX_NEURONS_IN_LAYER, MAX_NEURONS_IN_LAYER
        )));
        return redirect("/multilayer");
    }
    // Labels index the output layer, so they must be 0..classes exactly.
    let label_ok = |l: f64| l.fract() == 0.0 && l >= 0.0 && (l as usize) < classes;
    if !labels.iter().copied().all(label_ok) {
        st.flash = Some(FlashMessage::error(format!(
            "Class labels must be the integers 0 through {}.",
            classes - 1
        )));
        return redirect("/multilayer");
    }

    // Fit the terminal layers to the data before training.
    if st.mnn.input_size() != feature_count || st.mnn.output_size() != classes {
        st.mnn.resize_ends(feature_count, classes);
    }

    let mut network = st.mnn.clone();
    let epochs = st.epochs;
    let stop_flag = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();

    st.training = TrainingStatus::Running {
        stop_flag: stop_flag.clone(),
        epoch_rx: Arc::new(Mutex::new(rx)),
        total_epochs: epochs,
    };
    st.epoch_history.clear();
    drop(st);

    let thread_state = state.clone();
    thread::spawn(move || {
        let config = TrainConfig {
            epochs,
            progress_tx: Some(tx),
            stop_flag: Some(stop_flag.clone()),
        };

        let t_start = Instant::now();
        let cost = train_loop(&mut network, &train_rows, &config);
        let report = evaluate(&mut network, &test_rows);
        let elapsed_ms = t_start.elapsed().as_millis() as u64;
        let was_stopped = stop_flag.load(Ordering::Relaxed);

        let mut st = thread_state.lock().unwrap();
        st.mnn = network;
        st.training = TrainingStatus::Done { cost, report, elapsed_ms, was_stopped };
        // The sender in `config` drops here, which ends the SSE stream.
    });

    redirect("/multilayer")
}

// ---------------------------------------------------------------------------
// POST /train/stop
// ---------------------------------------------------------------------------

pub fn handle_stop(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    match &st.training {
        TrainingStatus::Running { stop_flag, .. } => {
            stop_flag.store(true, Ordering::Relaxed);
            st.flash = Some(FlashMessage::success(
                "Stop requested; finishing the current sample.",
            ));
        }
        _ => {
            st.flash = Some(FlashMessage::error("No training run to stop."));
        }
    }
    redirect("/multilayer")
}
