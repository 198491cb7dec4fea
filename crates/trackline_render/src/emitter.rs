//! Debounced render-config emission.
//!
//! Rapid edits (drag, resize) produce a stream of overlay snapshots. The
//! emitter keeps only the newest one and translates it once the stream has
//! been quiet for the debounce window.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use trackline_core::store::{ListenerId, OverlayStore};
use trackline_core::types::{Overlay, ProjectSettings};

use crate::config::{to_render_config, RenderConfig};
use crate::error::{RenderError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    pub debounce: Duration,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(50),
        }
    }
}

#[derive(Debug)]
enum Message {
    Changed(Vec<Overlay>),
    Settings(ProjectSettings),
    Flush(oneshot::Sender<()>),
}

/// Cheap, cloneable sender side of a running [`ConfigEmitter`].
#[derive(Debug, Clone)]
pub struct EmitterHandle {
    tx: mpsc::UnboundedSender<Message>,
}

impl EmitterHandle {
    /// Report a new overlay collection. Restarts the debounce timer.
    pub fn notify(&self, overlays: Vec<Overlay>) -> Result<()> {
        self.send(Message::Changed(overlays))
    }

    /// Change canvas size or frame rate for subsequent emissions.
    pub fn set_settings(&self, settings: ProjectSettings) -> Result<()> {
        self.send(Message::Settings(settings))
    }

    /// Emit any pending snapshot now, e.g. before save or export.
    pub async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(Message::Flush(ack_tx))?;
        ack_rx.await.map_err(|_| RenderError::EmitterStopped)
    }

    fn send(&self, msg: Message) -> Result<()> {
        self.tx.send(msg).map_err(|_| RenderError::EmitterStopped)
    }
}

/// Background task translating overlay snapshots into [`RenderConfig`]s.
///
/// Dropping the emitter stops the task and discards a pending snapshot.
pub struct ConfigEmitter {
    handle: EmitterHandle,
    task: JoinHandle<()>,
}

impl ConfigEmitter {
    /// Spawn the emitter on the current tokio runtime. Translated configs
    /// are sent to `out`.
    pub fn start(
        settings: ProjectSettings,
        config: EmitterConfig,
        out: mpsc::UnboundedSender<RenderConfig>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(rx, out, settings, config.debounce));
        Self {
            handle: EmitterHandle { tx },
            task,
        }
    }

    pub fn handle(&self) -> EmitterHandle {
        self.handle.clone()
    }

    pub fn notify(&self, overlays: Vec<Overlay>) -> Result<()> {
        self.handle.notify(overlays)
    }

    pub async fn flush(&self) -> Result<()> {
        self.handle.flush().await
    }

    /// Forward every change of `store` to this emitter. The store's other
    /// listeners keep receiving the raw collection synchronously.
    pub fn connect(&self, store: &mut OverlayStore) -> ListenerId {
        let handle = self.handle();
        store.subscribe(Box::new(move |overlays| {
            if handle.notify(overlays.to_vec()).is_err() {
                tracing::debug!("config emitter stopped, dropping overlay change");
            }
        }))
    }

    /// Consume the emitter and abort its task. A snapshot still waiting
    /// for the debounce window is discarded; call [`Self::flush`] first to
    /// keep it.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ConfigEmitter {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<Message>,
    out: mpsc::UnboundedSender<RenderConfig>,
    mut settings: ProjectSettings,
    debounce: Duration,
) {
    let mut pending: Option<Vec<Overlay>> = None;
    let timer = sleep(debounce);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Some(Message::Changed(overlays)) => {
                    pending = Some(overlays);
                    timer.as_mut().reset(Instant::now() + debounce);
                }
                Some(Message::Settings(new_settings)) => settings = new_settings,
                Some(Message::Flush(ack)) => {
                    if let Some(overlays) = pending.take() {
                        if !emit(&out, &overlays, &settings) {
                            break;
                        }
                    }
                    let _ = ack.send(());
                }
                None => {
                    tracing::debug!(discarded = pending.is_some(), "config emitter shutting down");
                    break;
                }
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(overlays) = pending.take() {
                    if !emit(&out, &overlays, &settings) {
                        break;
                    }
                }
            }
        }
    }
}

/// Returns false once nobody is listening.
fn emit(out: &mpsc::UnboundedSender<RenderConfig>, overlays: &[Overlay], settings: &ProjectSettings) -> bool {
    let config = to_render_config(overlays, settings);
    tracing::trace!(
        layers = config.layers.len(),
        duration = config.duration_in_frames,
        "emitting render config"
    );
    if out.send(config).is_err() {
        tracing::debug!("render config receiver dropped");
        return false;
    }
    true
}
