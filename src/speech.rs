//! Speech output boundary.
//!
//! The tracking loop only needs a `Speech` sink whose background dispatch
//! returns immediately. `SpeechQueue` provides one on top of any blocking
//! `Synthesizer` by feeding a single worker thread, so utterances never
//! overlap.

use crate::error::Error;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SpeakMode {
    /// Wait until the utterance has been rendered
    Blocking,
    /// Enqueue and return immediately
    Background,
}

pub trait Speech {
    fn speak(&self, text: &str, mode: SpeakMode) -> Result<(), Error>;
}

/// Blocking text-to-speech engine
pub trait Synthesizer: Send {
    fn render(&mut self, text: &str) -> Result<(), Error>;
}

/// Synthesizer that only writes the utterance to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSynthesizer;

impl Synthesizer for LogSynthesizer {
    fn render(&mut self, text: &str) -> Result<(), Error> {
        info!(text, "speaking");
        Ok(())
    }
}

struct Utterance {
    text: String,
    done: Option<Sender<Result<(), Error>>>,
}

pub struct SpeechQueue {
    tx: Option<Sender<Utterance>>,
    worker: Option<JoinHandle<()>>,
}

impl SpeechQueue {
    pub fn new<S: Synthesizer + 'static>(synth: S, queue_size: usize) -> Self {
        let (tx, rx) = bounded(queue_size.max(1));
        let worker = std::thread::spawn(move || Self::run(synth, rx));

        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    fn run<S: Synthesizer>(mut synth: S, rx: Receiver<Utterance>) {
        for utterance in rx.iter() {
            let res = synth.render(&utterance.text);

            match utterance.done {
                Some(done) => {
                    let _ = done.send(res);
                }
                None => {
                    if let Err(err) = res {
                        warn!(%err, "background speech failed");
                    }
                }
            }
        }

        debug!("speech worker stopped");
    }
}

impl Speech for SpeechQueue {
    fn speak(&self, text: &str, mode: SpeakMode) -> Result<(), Error> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let tx = self.tx.as_ref().ok_or(Error::SpeechClosed)?;

        match mode {
            SpeakMode::Background => {
                let utterance = Utterance {
                    text: text.to_string(),
                    done: None,
                };

                tx.try_send(utterance).map_err(|err| match err {
                    TrySendError::Full(_) => Error::SpeechBacklog,
                    TrySendError::Disconnected(_) => Error::SpeechClosed,
                })
            }
            SpeakMode::Blocking => {
                let (done_tx, done_rx) = bounded(1);
                let utterance = Utterance {
                    text: text.to_string(),
                    done: Some(done_tx),
                };

                tx.send(utterance).map_err(|_| Error::SpeechClosed)?;
                done_rx.recv().map_err(|_| Error::SpeechClosed)?
            }
        }
    }
}

impl Drop for SpeechQueue {
    fn drop(&mut self) {
        // closing the channel lets the worker drain and exit
        self.tx.take();

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("speech worker panicked");
            }
        }
    }
}
