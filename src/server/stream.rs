//! SSE tick stream. Every subscriber's first event is a full cross-market
//! snapshot; each processed tick then arrives as an incremental event. A
//! client that disconnects is dropped on its next failed write.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::{Stream, StreamExt};
use std::sync::Arc;

use crate::broadcast::InitSnapshot;

use super::AppState;

pub async fn stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let init = {
        let store = state.store.read().await;
        InitSnapshot::from_store(&store)
    };
    let (id, rx) = state.broadcaster.subscribe(init).await;
    tracing::debug!(subscriber = %id, "stream client connected");

    let events = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|message| (message, rx))
    })
    .map(|message| Event::default().json_data(&message));

    Sse::new(events).keep_alive(KeepAlive::default())
}
