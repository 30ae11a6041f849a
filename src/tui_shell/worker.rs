use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::engine::{ContextId, CycleOutcome, CycleRequest};

use super::*;

pub(super) struct CycleDone {
    pub(super) context_id: ContextId,
    pub(super) outcome: CycleOutcome,
}

/// Runs poll cycles off the UI thread, one at a time, in submission order.
/// Results come back tagged with the context that asked for them.
pub(super) struct Worker {
    requests: Option<Sender<CycleRequest>>,
    done: Receiver<CycleDone>,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    pub(super) fn spawn<M>(market: M) -> Result<Self>
    where
        M: Marketplace + Send + 'static,
    {
        let (req_tx, req_rx) = mpsc::channel::<CycleRequest>();
        let (done_tx, done_rx) = mpsc::channel::<CycleDone>();
        let handle = std::thread::Builder::new()
            .name("courtcart-poll".to_string())
            .spawn(move || {
                for req in req_rx {
                    let outcome = req.run(&market);
                    let done = CycleDone {
                        context_id: req.context_id,
                        outcome,
                    };
                    if done_tx.send(done).is_err() {
                        break;
                    }
                }
                tracing::debug!("poll worker exiting");
            })
            .context("spawn poll worker")?;
        Ok(Self {
            requests: Some(req_tx),
            done: done_rx,
            handle: Some(handle),
        })
    }

    pub(super) fn submit(&self, req: CycleRequest) -> Result<()> {
        let tx = self.requests.as_ref().context("poll worker stopped")?;
        tx.send(req)
            .map_err(|_| anyhow::anyhow!("poll worker stopped"))
    }

    pub(super) fn drain(&self) -> Vec<CycleDone> {
        self.done.try_iter().collect()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the channel ends the worker after its current request. A
        // request can be blocked on the network, so it is not joined.
        self.requests = None;
        if let Some(handle) = self.handle.take()
            && handle.is_finished()
        {
            let _ = handle.join();
        }
    }
}
