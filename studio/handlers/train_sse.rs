use std::io::Write;
use std::time::Duration;
use tiny_http::Request;

use crate::state::{SharedState, TrainingStatus};

/// Server-Sent Events handler for `GET /train/events`.
///
/// Consumes `request` (ownership is needed for `into_writer`) and drives a
/// long-lived loop:
/// 1. Receive an `EpochStats` from the training channel (500 ms timeout).
/// 2. On success, write an `event: epoch` frame with the JSON stats.
/// 3. On timeout, write a keep-alive comment.
/// 4. On disconnect (training thread dropped its sender), write the final
///    `done` event and close.
pub fn handle(request: Request, state: SharedState) {
    let mut writer = request.into_writer();

    let header = "HTTP/1.1 200 OK\r\n\
                  Content-Type: text/event-stream\r\n\
                  Cache-Control: no-cache\r\n\
                  Connection: keep-alive\r\n\
                  \r\n";
    if write_all(&mut writer, header.as_bytes()).is_err() {
        return;
    }

    // Clone the receiver handle out so the state lock is not held while
    // blocking on the channel.
    let epoch_rx = {
        let st = state.lock().unwrap();
        match &st.training {
            TrainingStatus::Running { epoch_rx, .. } => Some(epoch_rx.clone()),
            _ => None,
        }
    };

    let rx_arc = match epoch_rx {
        Some(rx) => rx,
        None => {
            let _ = write_all(&mut writer, b"event: done\ndata: {}\n\n");
            return;
        }
    };

    // Replay epochs the client missed before subscribing.
    {
        let st = state.lock().unwrap();
        for stats in &st.epoch_history {
            if let Ok(json) = serde_json::to_string(stats) {
                let msg = format!("event: epoch\ndata: {}\n\n", json);
                if write_all(&mut writer, msg.as_bytes()).is_err() {
                    return;
                }
            }
        }
    }

    loop {
        let received = {
            let rx = rx_arc.lock().unwrap();
            rx.recv_timeout(Duration::from_millis(500))
        };

        match received {
            Ok(stats) => {
                state.lock().unwrap().epoch_history.push(stats.clone());
                if let Ok(json) = serde_json::to_string(&stats) {
                    let msg = format!("event: epoch\ndata: {}\n\n", json);
                    if write_all(&mut writer, msg.as_bytes()).is_err() {
                        return;
                    }
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                if write_all(&mut writer, b": ping\n\n").is_err() {
                    return;
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                let payload = {
                    let st = state.lock().unwrap();
                    match &st.training {
                        TrainingStatus::Done { cost, report, elapsed_ms, was_stopped } => format!(
                            "event: done\ndata: {{\"cost\":{},\"accuracy\":{},\"elapsed_ms\":{},\"stopped\":{}}}\n\n",
                            cost, report.accuracy, elapsed_ms, was_stopped
                        ),
                        _ => "event: done\ndata: {}\n\n".to_owned(),
                    }
                };
                let _ = write_all(&mut writer, payload.as_bytes());
                return;
            }
        }
    }
}

fn write_all<W: Write>(w: &mut W, data: &[u8]) -> std::io::Result<()> {
    w.write_all(data)?;
    w.flush()
}
