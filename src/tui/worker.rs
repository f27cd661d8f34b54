//! Background worker for prediction requests.
//!
//! Runs the outstanding request off the UI thread so the main loop keeps
//! drawing the loading state. Settlements come back over a channel that the
//! main loop drains every tick.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::{Dispatch, Settlement};
use crate::ports::{PredictionError, Predictor, ServiceStatus};

/// Receiving end for settlements of every request spawned through it.
pub struct SettlementInbox {
    tx: Sender<Settlement>,
    rx: Receiver<Settlement>,
}

impl Default for SettlementInbox {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl SettlementInbox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute `dispatch` on a worker thread.
    pub fn dispatch(&self, predictor: Arc<dyn Predictor>, dispatch: Dispatch) -> JoinHandle<()> {
        SubmissionWorker::spawn(predictor, dispatch, self.tx.clone())
    }

    /// Try to receive the next settlement (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<Settlement> {
        self.rx.try_recv().ok()
    }
}

/// Worker that performs one prediction request.
pub struct SubmissionWorker;

impl SubmissionWorker {
    /// Spawn a background request. The settlement is sent on `tx`.
    pub fn spawn(
        predictor: Arc<dyn Predictor>,
        dispatch: Dispatch,
        tx: Sender<Settlement>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            let ticket = dispatch.ticket;
            let settlement = dispatch.execute(predictor.as_ref());
            if tx.send(settlement).is_err() {
                tracing::debug!(%ticket, "Settlement dropped: client closed");
            }
        })
    }
}

/// One-off service status check running off the UI thread.
pub struct HealthProbe {
    rx: Receiver<Result<ServiceStatus, PredictionError>>,
}

impl HealthProbe {
    /// Start the check. The answer is picked up with [`try_recv`](Self::try_recv).
    #[must_use]
    pub fn spawn(predictor: Arc<dyn Predictor>) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            if tx.send(predictor.health()).is_err() {
                tracing::debug!("Status check result dropped: client closed");
            }
        });
        Self { rx }
    }

    /// Try to receive the status (non-blocking).
    ///
    /// A check whose thread died without answering reports a transport error.
    #[must_use]
    pub fn try_recv(&self) -> Option<Result<ServiceStatus, PredictionError>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PredictionError::Transport(
                "status check ended without an answer".into(),
            ))),
        }
    }
}
