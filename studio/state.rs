use std::sync::{mpsc, Arc, Mutex, atomic::AtomicBool};

use neurolab::{EpochStats, EvalReport, HopfieldNetwork, MultilayerNetwork, Activation};

// ---------------------------------------------------------------------------
// Hopfield tab
// ---------------------------------------------------------------------------

pub const MIN_GRID: usize = 3;
pub const MAX_GRID: usize = 12;
pub const DEFAULT_GRID: usize = 10;

/// State backing the Hopfield tab: the network itself plus the last painted
/// pattern and the last recall result, both kept so the page can re-render
/// them after a redirect.
pub struct HopfieldState {
    pub grid: usize,
    pub network: HopfieldNetwork,
    pub pattern: Vec<i8>,
    pub output: Vec<i8>,
    pub imprint_count: usize,
}

impl HopfieldState {
    pub fn new(grid: usize) -> Self {
        let units = grid * grid;
        HopfieldState {
            grid,
            network: HopfieldNetwork::new(units),
            pattern: vec![-1; units],
            output: vec![-1; units],
            imprint_count: 0,
        }
    }

    /// Rebuilds everything for a new grid size; imprinted patterns are gone.
    pub fn resize(&mut self, grid: usize) {
        *self = HopfieldState::new(grid);
    }
}

// ---------------------------------------------------------------------------
// Multilayer tab
// ---------------------------------------------------------------------------

/// An uploaded dataset, already parsed to numeric rows (last column label).
pub struct Dataset {
    pub name: String,
    pub rows: Vec<Vec<f64>>,
}

/// Upload-form checkboxes, remembered between uploads.
#[derive(Clone, Copy)]
pub struct UploadOptions {
    pub has_header: bool,
    pub skip_empty_lines: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        UploadOptions { has_header: true, skip_empty_lines: true }
    }
}

pub enum TrainingStatus {
    /// No training has been started yet.
    Idle,
    /// Training is running in a background thread.
    Running {
        stop_flag: Arc<AtomicBool>,
        epoch_rx: Arc<Mutex<mpsc::Receiver<EpochStats>>>,
        total_epochs: usize,
    },
    /// Training completed (naturally or via Stop) and the test set was scored.
    Done {
        cost: f64,
        report: EvalReport,
        elapsed_ms: u64,
        was_stopped: bool,
    },
    Failed {
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Flash messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum FlashKind { Success, Error }

#[derive(Debug, Clone)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub text: String,
}

impl FlashMessage {
    pub fn success(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Success, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        FlashMessage { kind: FlashKind::Error, text: text.into() }
    }
}

// ---------------------------------------------------------------------------
// Main state struct
// ---------------------------------------------------------------------------

pub struct StudioState {
    pub hopfield: HopfieldState,
    pub mnn: MultilayerNetwork,
    pub epochs: usize,
    pub datasets: Vec<Dataset>,
    pub upload_options: UploadOptions,
    /// Indices into `datasets`.
    pub train_set: Option<usize>,
    pub test_set: Option<usize>,
    pub training: TrainingStatus,
    pub epoch_history: Vec<EpochStats>,
    /// One-shot flash message for the next page render.
    pub flash: Option<FlashMessage>,
}

impl StudioState {
    pub fn new() -> Self {
        StudioState {
            hopfield: HopfieldState::new(DEFAULT_GRID),
            mnn: MultilayerNetwork::new(2, 2, Activation::Tanh),
            epochs: 100,
            datasets: Vec::new(),
            upload_options: UploadOptions::default(),
            train_set: None,
            test_set: None,
            training: TrainingStatus::Idle,
            epoch_history: Vec::new(),
            flash: None,
        }
    }

    pub fn is_training(&self) -> bool {
        matches!(self.training, TrainingStatus::Running { .. })
    }

    /// Takes and returns the current flash message, clearing it.
    pub fn take_flash(&mut self) -> Option<FlashMessage> {
        self.flash.take()
    }
}

/// Shared state handle passed to every handler.
pub type SharedState = Arc<Mutex<StudioState>>;
