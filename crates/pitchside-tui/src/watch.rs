//! "Watch" flow: resolve a card's stream reference, then open the viewer.
//!
//! `begin_watch` runs on the event loop and guards the control,
//! `spawn_resolution` does the network call off the loop, and `finish_watch`
//! runs back on the loop with the outcome. The control is restored first in
//! `finish_watch`, before any branch on the result.

use pitchside_proto::stream::NO_STREAM_PROVIDED;
use pitchside_proto::{Gateway, GatewayError, ResolveError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::surface::{ControlRef, SurfaceSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRequest {
    pub control: ControlRef,
    pub title: String,
    pub reference: String,
    /// Label the control showed before it switched to loading.
    pub restore_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchStart {
    /// Control missing, stale or already busy.
    Ignored,
    /// The card has nothing to resolve. Nothing was sent.
    NoStream(String),
    Started(WatchRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchOutcome {
    pub request: WatchRequest,
    pub result: Result<String, ResolveError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchResult {
    Play { title: String, link: String },
    Notice(String),
}

pub fn begin_watch(surfaces: &mut SurfaceSet, control: ControlRef) -> WatchStart {
    let Some(node) = surfaces.node_mut(control) else {
        return WatchStart::Ignored;
    };
    if !node.control.enabled {
        debug!("[watch] control {:?} busy, ignoring", control);
        return WatchStart::Ignored;
    }
    if !node.card.has_stream() {
        return WatchStart::NoStream(NO_STREAM_PROVIDED.to_string());
    }
    let restore_label = node.control.begin_loading();
    WatchStart::Started(WatchRequest {
        control,
        title: node.card.title.clone(),
        reference: node.card.stream_ref.clone(),
        restore_label,
    })
}

/// Resolve in a background task and post exactly one `WatchOutcome`.
///
/// The gateway call runs in its own inner task so a panic there still turns
/// into an outcome and the control gets restored.
pub fn spawn_resolution<M>(gateway: Gateway, request: WatchRequest, tx: mpsc::Sender<M>) -> JoinHandle<()>
where
    M: From<WatchOutcome> + Send + 'static,
{
    tokio::spawn(async move {
        let reference = request.reference.clone();
        let call = tokio::spawn(async move { gateway.resolve_stream(&reference).await });
        let result = match call.await {
            Ok(result) => result,
            Err(e) => {
                error!("[watch] resolution task failed: {}", e);
                Err(ResolveError::Gateway(GatewayError::Transport(e.to_string())))
            }
        };
        if tx.send(WatchOutcome { request, result }.into()).await.is_err() {
            warn!("[watch] event loop gone, dropping outcome");
        }
    })
}

pub fn finish_watch(surfaces: &mut SurfaceSet, outcome: WatchOutcome) -> WatchResult {
    let WatchOutcome { request, result } = outcome;
    match surfaces.node_mut(request.control) {
        Some(node) => node.control.restore(request.restore_label),
        None => debug!("[watch] control {:?} replaced by a reload", request.control),
    }
    match result {
        Ok(link) => WatchResult::Play {
            title: request.title,
            link,
        },
        Err(e) => {
            warn!("[watch] {:?} failed: {}", request.reference, e);
            WatchResult::Notice(e.notice())
        }
    }
}
