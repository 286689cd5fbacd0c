//! Async-friendly session API backed by a dedicated worker thread.
//!
//! The worker owns the `Studio` and executes one command at a time, so at
//! most one batch can ever be running process-wide. Callers get an async
//! interface without the studio needing to be `Send` across await points;
//! triggers arriving while a batch runs are rejected as no-ops, matching the
//! disabled-controls contract of the UI.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread;

use serde::Serialize;
use tokio::sync::oneshot;

use crate::cards::Card;
use crate::deck::Progress;
use crate::error::{Error, Result};
use crate::studio::Studio;
use crate::ImageGenerator;

enum Command {
    Hand(oneshot::Sender<Result<()>>),
    Single(oneshot::Sender<Result<()>>),
    Deck(oneshot::Sender<Result<()>>),
    Export(PathBuf, oneshot::Sender<Result<()>>),
    Snapshot(oneshot::Sender<DeckSnapshot>),
    Close(oneshot::Sender<()>),
}

/// Everything the presentation layer needs to render one frame
#[derive(Debug, Clone, Serialize)]
pub struct DeckSnapshot {
    pub cards: Vec<Card>,
    pub busy: bool,
    pub progress: Option<Progress>,
    pub error: Option<String>,
}

/// A cloneable handle to a studio running on its own thread.
#[derive(Clone)]
pub struct Session {
    cmd_tx: Sender<Command>,
    busy: Arc<AtomicBool>,
}

impl Session {
    /// Spawn a worker thread that owns a `Studio` built around `generator`.
    pub fn spawn<G>(generator: G) -> Self
    where
        G: ImageGenerator + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let busy = Arc::new(AtomicBool::new(false));
        let busy_worker = Arc::clone(&busy);

        thread::spawn(move || {
            let mut studio = Studio::new(generator);

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Hand(resp) => {
                        busy_worker.store(true, Ordering::SeqCst);
                        let res = studio.generate_hand();
                        busy_worker.store(false, Ordering::SeqCst);
                        let _ = resp.send(res);
                    }
                    Command::Single(resp) => {
                        busy_worker.store(true, Ordering::SeqCst);
                        let res = studio.draw_single();
                        busy_worker.store(false, Ordering::SeqCst);
                        let _ = resp.send(res);
                    }
                    Command::Deck(resp) => {
                        busy_worker.store(true, Ordering::SeqCst);
                        let res = studio.generate_full_deck();
                        busy_worker.store(false, Ordering::SeqCst);
                        let _ = resp.send(res);
                    }
                    Command::Export(path, resp) => {
                        busy_worker.store(true, Ordering::SeqCst);
                        let res = studio.export_deck(&path);
                        busy_worker.store(false, Ordering::SeqCst);
                        let _ = resp.send(res);
                    }
                    Command::Snapshot(resp) => {
                        let _ = resp.send(DeckSnapshot {
                            cards: studio.cards().to_vec(),
                            busy: studio.is_running(),
                            progress: studio.progress(),
                            error: studio.last_error().map(str::to_string),
                        });
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(());
                        break;
                    }
                }
            }
        });

        Self { cmd_tx, busy }
    }

    /// Whether a batch is currently running. UI controls disable while true.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub async fn generate_hand(&self) -> Result<()> {
        if self.is_busy() {
            return Ok(());
        }
        self.batch(Command::Hand).await
    }

    pub async fn draw_single(&self) -> Result<()> {
        if self.is_busy() {
            return Ok(());
        }
        self.batch(Command::Single).await
    }

    pub async fn generate_full_deck(&self) -> Result<()> {
        if self.is_busy() {
            return Ok(());
        }
        self.batch(Command::Deck).await
    }

    pub async fn export_deck(&self, path: PathBuf) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Export(path, tx))?;
        rx.await.map_err(closed)?
    }

    pub async fn snapshot(&self) -> Result<DeckSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx))?;
        rx.await.map_err(closed)
    }

    /// Shut the worker down; outstanding clones become inert.
    pub async fn close(&self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Close(tx))?;
        rx.await.map_err(closed)
    }

    async fn batch(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<()>>) -> Command,
    ) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.send(make(tx))?;
        rx.await.map_err(closed)?
    }

    fn send(&self, cmd: Command) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| Error::Other("session worker is gone".into()))
    }
}

fn closed<E>(_: E) -> Error {
    Error::Other("session worker dropped the response".into())
}
