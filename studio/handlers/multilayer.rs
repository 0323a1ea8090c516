use std::io::{Cursor, Read};
use tiny_http::{Request, Response};

use neurolab::multilayer::network::{
    MAX_LAYERS, MAX_NEURONS_IN_LAYER, MIN_LAYERS, MIN_NEURONS_IN_LAYER,
};
use neurolab::{Activation, MultilayerNetwork};

use crate::render::{html_escape, render_page, Page};
use crate::routes::{html_response, redirect};
use crate::state::{FlashMessage, SharedState, StudioState, TrainingStatus};
use crate::util::form::{form_get, parse_form};

// ---------------------------------------------------------------------------
// GET /multilayer
// ---------------------------------------------------------------------------

pub fn handle_get(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    let flash = st.take_flash();
    let training = st.is_training();

    let act_options = activation_options(st.mnn.activation);
    let topology = topology_rows(&st.mnn);
    let dataset_rows = dataset_table(&st);
    let (train_opts, test_opts) = selector_options(&st);
    let status_html = status_block(&st);

    let lr = st.mnn.learning_rate;
    let epochs = st.epochs;
    let bias_checked = if st.mnn.use_bias { "checked" } else { "" };
    let header_checked = if st.upload_options.has_header { "checked" } else { "" };
    let skip_checked = if st.upload_options.skip_empty_lines { "checked" } else { "" };
    let input_size = st.mnn.input_size();
    let output_size = st.mnn.output_size();
    let layer_count = st.mnn.layers.len();

    let page = render_page(Page::Multilayer, flash.as_ref(), training, |tmpl| {
        tmpl.replace("{{ACT_OPTIONS}}", &act_options)
            .replace("{{LEARNING_RATE}}", &lr.to_string())
            .replace("{{EPOCHS}}", &epochs.to_string())
            .replace("{{BIAS_CHECKED}}", bias_checked)
            .replace("{{HEADER_CHECKED}}", header_checked)
            .replace("{{SKIP_CHECKED}}", skip_checked)
            .replace("{{INPUT_SIZE}}", &input_size.to_string())
            .replace("{{OUTPUT_SIZE}}", &output_size.to_string())
            .replace("{{LAYER_COUNT}}", &layer_count.to_string())
            .replace("{{MAX_LAYERS}}", &MAX_LAYERS.to_string())
            .replace("{{TOPOLOGY_ROWS}}", &topology)
            .replace("{{DATASET_ROWS}}", &dataset_rows)
            .replace("{{TRAIN_SET_OPTIONS}}", &train_opts)
            .replace("{{TEST_SET_OPTIONS}}", &test_opts)
            .replace("{{TRAIN_STATUS}}", &status_html)
    });

    html_response(page)
}

fn activation_options(current: Activation) -> String {
    Activation::ALL
        .iter()
        .map(|a| {
            let sel = if *a == current { " selected" } else { "" };
            format!(r#"<option value="{v}"{sel}>{v}</option>"#, v = a.as_str())
        })
        .collect()
}

/// One table row per layer: position, neuron count, rounded outputs, and
/// add/remove neuron buttons.
fn topology_rows(net: &MultilayerNetwork) -> String {
    let last = net.layers.len() - 1;
    net.layers
        .iter()
        .enumerate()
        .map(|(l, layer)| {
            let role = if l == 0 {
                "input"
            } else if l == last {
                "output"
            } else {
                "hidden"
            };
            let outputs: Vec<String> = layer
                .neurons
                .iter()
                .map(|n| format!("{:.2}", n.output))
                .collect();
            let add_disabled = if layer.size() >= MAX_NEURONS_IN_LAYER { "disabled" } else { "" };
            let rm_disabled = if layer.size() <= MIN_NEURONS_IN_LAYER { "disabled" } else { "" };
            format!(
                r#"<tr><td>{idx}</td><td>{role}</td><td>{count}</td><td class="outputs">{outs}</td>
<td><form method="post" action="/multilayer/neuron/add"><input type="hidden" name="layer" value="{idx}"><button {add_d}>+</button></form>
<form method="post" action="/multilayer/neuron/remove"><input type="hidden" name="layer" value="{idx}"><button {rm_d}>-</button></form></td></tr>"#,
                idx = l,
                role = role,
                count = layer.size(),
                outs = outputs.join(" "),
                add_d = add_disabled,
                rm_d = rm_disabled,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn dataset_table(st: &StudioState) -> String {
    if st.datasets.is_empty() {
        return r#"<tr><td colspan="4" class="hint">No datasets uploaded yet.</td></tr>"#.into();
    }
    st.datasets
        .iter()
        .enumerate()
        .map(|(i, ds)| {
            let columns = ds.rows.first().map(Vec::len).unwrap_or(0);
            format!(
                r#"<tr><td>{name}</td><td>{rows}</td><td>{cols}</td>
<td><form method="post" action="/dataset/delete"><input type="hidden" name="id" value="{i}"><button>delete</button></form></td></tr>"#,
                name = html_escape(&ds.name),
                rows = ds.rows.len(),
                cols = columns,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn selector_options(st: &StudioState) -> (String, String) {
    let build = |selected: Option<usize>| -> String {
        let mut html = String::from(r#"<option value="">—</option>"#);
        for (i, ds) in st.datasets.iter().enumerate() {
            let sel = if selected == Some(i) { " selected" } else { "" };
            html.push_str(&format!(
                r#"<option value="{i}"{sel}>{}</option>"#,
                html_escape(&ds.name)
            ));
        }
        html
    };
    (build(st.train_set), build(st.test_set))
}

fn status_block(st: &StudioState) -> String {
    match &st.training {
        TrainingStatus::Idle => r#"<p class="hint">Not trained yet.</p>"#.into(),
        TrainingStatus::Running { total_epochs, .. } => format!(
            r#"<p>Training… epoch <span id="live-epoch">0</span> of {total}, cost <span id="live-cost">—</span></p>"#,
            total = total_epochs
        ),
        TrainingStatus::Done { cost, report, elapsed_ms, was_stopped } => {
            let badge = if *was_stopped { "stopped early" } else { "done" };
            format!(
                r#"<p>Training {badge} in {elapsed} ms.</p>
<p>Final cost: <b>{cost:.6}</b></p>
<p>Test accuracy: <b>{acc:.2}%</b> ({wrong} of {total} wrong)</p>"#,
                badge = badge,
                elapsed = elapsed_ms,
                cost = cost,
                acc = report.accuracy,
                wrong = report.wrong,
                total = report.total,
            )
        }
        TrainingStatus::Failed { reason } => format!(
            r#"<p class="flash flash-error">Training failed: {}</p>"#,
            html_escape(reason)
        ),
    }
}

// ---------------------------------------------------------------------------
// POST /multilayer/settings
// ---------------------------------------------------------------------------

pub fn handle_settings(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);

    let activation = Activation::from_str_or_default(form_get(&pairs, "activation").unwrap_or(""));
    let lr = form_get(&pairs, "learning_rate").and_then(|v| v.trim().parse::<f64>().ok());
    let epochs = form_get(&pairs, "epochs").and_then(|v| v.trim().parse::<usize>().ok());
    let use_bias = form_get(&pairs, "use_bias").is_some();
    let input_size = form_get(&pairs, "input_size").and_then(|v| v.trim().parse::<usize>().ok());
    let output_size = form_get(&pairs, "output_size").and_then(|v| v.trim().parse::<usize>().ok());

    let mut st = state.lock().unwrap();
    if st.is_training() {
        st.flash = Some(FlashMessage::error("Settings are locked while training."));
        return redirect("/multilayer");
    }

    let lr = match lr {
        Some(v) if v >= 0.001 => v,
        _ => {
            st.flash = Some(FlashMessage::error("Learning rate must be at least 0.001."));
            return redirect("/multilayer");
        }
    };
    let epochs = match epochs {
        Some(v) if v >= 1 => v,
        _ => {
            st.flash = Some(FlashMessage::error("Epoch count must be at least 1."));
            return redirect("/multilayer");
        }
    };
    let size_ok = |v: usize| (MIN_NEURONS_IN_LAYER..=MAX_NEURONS_IN_LAYER).contains(&v);
    let (input_size, output_size) = match (input_size, output_size) {
        (Some(i), Some(o)) if size_ok(i) && size_ok(o) => (i, o),
        _ => {
            st.flash = Some(FlashMessage::error(format!(
                "Input and output sizes must be between {} and {}.",
                MIN_NEURONS_IN_LAYER, MAX_NEURONS_IN_LAYER
            )));
            return redirect("/multilayer");
        }
    };

    st.mnn.activation = activation;
    st.mnn.learning_rate = lr;
    st.mnn.use_bias = use_bias;
    st.epochs = epochs;
    if st.mnn.input_size() != input_size || st.mnn.output_size() != output_size {
        st.mnn.resize_ends(input_size, output_size);
    }
    st.flash = Some(FlashMessage::success("Network settings saved."));
    redirect("/multilayer")
}

// ---------------------------------------------------------------------------
// Topology mutation
// ---------------------------------------------------------------------------

fn mutate<F>(state: &SharedState, action: F, failure: &str) -> Response<Cursor<Vec<u8>>>
where
    F: FnOnce(&mut MultilayerNetwork) -> bool,
{
    let mut st = state.lock().unwrap();
    if st.is_training() {
        st.flash = Some(FlashMessage::error("Topology is locked while training."));
    } else if !action(&mut st.mnn) {
        st.flash = Some(FlashMessage::error(failure.to_owned()));
    }
    redirect("/multilayer")
}

pub fn handle_add_layer(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    mutate(
        &state,
        |net| net.add_layer(),
        &format!("At most {} layers.", MAX_LAYERS),
    )
}

pub fn handle_remove_layer(state: SharedState) -> Response<Cursor<Vec<u8>>> {
    mutate(
        &state,
        |net| net.remove_layer(),
        &format!("At least {} layers.", MIN_LAYERS),
    )
}

fn layer_id(request: &mut Request) -> Option<usize> {
    let mut body = String::new();
    let _ = request.as_reader().read_to_string(&mut body);
    let pairs = parse_form(&body);
    form_get(&pairs, "layer").and_then(|v| v.trim().parse().ok())
}

pub fn handle_add_neuron(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    match layer_id(request) {
        Some(id) => mutate(
            &state,
            |net| net.add_neuron(id),
            &format!("At most {} neurons per layer.", MAX_NEURONS_IN_LAYER),
        ),
        None => redirect("/multilayer"),
    }
}

pub fn handle_remove_neuron(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    match layer_id(request) {
        Some(id) => mutate(
            &state,
            |net| net.remove_neuron(id),
            &format!("At least {} neuron per layer.", MIN_NEURONS_IN_LAYER),
        ),
        None => redirect("/multilayer"),
    }
}
