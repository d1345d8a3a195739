// SPDX-License-Identifier: MPL-2.0
//! Async event loop around a [`PlayerController`].
//!
//! Messages arrive on an unbounded channel; the loop sleeps until the
//! controller's next deadline and feeds it a `Tick` when that passes.
//! Every effect other than [`Effect::None`] is forwarded to the host.

use super::attachment::StreamBackend;
use super::controller::{Effect, Message, PlayerController};
use super::presentation::PresentationHost;
use super::session::PlaybackPreferences;
use super::surface::MediaSurface;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::Instant;

/// Drives `controller` until it unmounts or the inbox closes.
///
/// A closed inbox counts as an unmount. Returns the preferences exported
/// on unmount, if any.
pub async fn run<S, B, P>(
    mut controller: PlayerController<S, B, P>,
    mut inbox: UnboundedReceiver<Message>,
    effects: UnboundedSender<Effect>,
) -> Option<PlaybackPreferences>
where
    S: MediaSurface,
    B: StreamBackend,
    P: PresentationHost,
{
    loop {
        let deadline = controller.next_deadline();
        let effect = tokio::select! {
            msg = inbox.recv() => {
                let msg = msg.unwrap_or_else(|| {
                    tracing::debug!("player inbox closed");
                    Message::Unmount
                });
                controller.handle(msg)
            }
            () = sleep_until(deadline) => {
                controller.handle(Message::Tick(Instant::now().into_std()))
            }
        };

        match effect {
            Effect::None => {}
            Effect::Unmounted(prefs) => {
                // The host may already be gone at this point
                let _ = effects.send(Effect::Unmounted(prefs));
                return prefs;
            }
            effect => {
                if effects.send(effect).is_err() {
                    tracing::warn!("effect receiver dropped, unmounting player");
                    return controller.teardown();
                }
            }
        }
    }
}

async fn sleep_until(deadline: Option<std::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}
