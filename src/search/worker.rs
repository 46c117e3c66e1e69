//! Off-thread search dispatch.
//!
//! Each issued request runs on its own short-lived thread so the UI loop
//! never blocks on the network. Outcomes come back tagged with the sequence
//! number they were issued under; the session decides which one still counts.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::model::types::UserRecord;
use crate::search::gateway::{SearchFailure, SearchGateway};

#[derive(Debug)]
pub struct SearchOutcome {
    pub seq: u64,
    pub result: Result<Vec<UserRecord>, SearchFailure>,
}

pub struct SearchWorker {
    gateway: Arc<SearchGateway>,
    tx: Sender<SearchOutcome>,
    rx: Receiver<SearchOutcome>,
}

impl SearchWorker {
    pub fn new(gateway: SearchGateway) -> Self {
        let (tx, rx) = unbounded();
        Self {
            gateway: Arc::new(gateway),
            tx,
            rx,
        }
    }

    /// Run `query` in the background and report under `seq`.
    pub fn dispatch(&self, seq: u64, query: String) {
        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        std::thread::spawn(move || {
            let result = gateway.search(&query);
            // Receiver gone means the screen was torn down; nothing to do.
            let _ = tx.send(SearchOutcome { seq, result });
        });
    }

    /// Channel the UI loop drains between frames.
    pub fn outcomes(&self) -> &Receiver<SearchOutcome> {
        &self.rx
    }
}
