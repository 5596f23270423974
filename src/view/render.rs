//! Render planning and the view loop
//!
//! Rendering is split in two: pure functions that turn view state plus
//! registry data into a [`RenderPlan`], and a loop that ticks on a fixed
//! cadence, feeds commands and ingest events into the state machine, and
//! hands finished plans to a [`DisplaySink`]. The sink (a desktop window,
//! an HTTP streamer, a test collector) draws tiles and nothing else.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::media::DisplayCodec;
use crate::registry::{ClientId, ClientRegistry, Frame};
use crate::server::IngestEvent;

use super::config::ViewConfig;
use super::selector::{ViewMode, ViewSelector};

/// One positioned image in a render plan
#[derive(Debug, Clone)]
pub struct Tile {
    /// Producer the image came from
    pub client_id: ClientId,
    /// Grid row (always 0 in single view)
    pub row: usize,
    /// Grid column (always 0 in single view)
    pub col: usize,
    /// Display-ready image bytes
    pub image: Bytes,
}

/// Output of one render tick
#[derive(Debug, Clone)]
pub struct RenderPlan {
    /// Mode the plan was built for
    pub mode: ViewMode,
    /// Tiles to draw; may be empty (nothing is fabricated for missing
    /// or undisplayable frames)
    pub tiles: Vec<Tile>,
}

impl RenderPlan {
    fn empty(mode: ViewMode) -> Self {
        Self {
            mode,
            tiles: Vec::new(),
        }
    }
}

/// Consumer of finished render plans
pub trait DisplaySink: Send {
    /// Present one plan; called once per tick
    fn present(&mut self, plan: RenderPlan);
}

/// Explicit view-state commands from the UI layer
#[derive(Debug, Clone)]
pub enum ViewCommand {
    /// Select a producer for single view
    Select(ClientId),
    /// Switch between single and grid mode
    SetMode(ViewMode),
}

/// Build the plan for single view
///
/// Renders only the selected producer's frame; with no selection, or no
/// frame for it, the plan is empty.
pub fn plan_single(
    selected: Option<&ClientId>,
    frame: Option<&Frame>,
    codec: &dyn DisplayCodec,
) -> RenderPlan {
    let (Some(id), Some(frame)) = (selected, frame) else {
        return RenderPlan::empty(ViewMode::Single);
    };

    match codec.encode_display(frame) {
        Ok(image) => RenderPlan {
            mode: ViewMode::Single,
            tiles: vec![Tile {
                client_id: id.clone(),
                row: 0,
                col: 0,
                image,
            }],
        },
        Err(e) => {
            tracing::warn!(producer = %id, error = %e, "Skipping undisplayable frame");
            RenderPlan::empty(ViewMode::Single)
        }
    }
}

/// Build the plan for grid view from a sorted registry snapshot
///
/// Tile positions follow the snapshot index: `(idx / columns,
/// idx % columns)`. Blank frames and codec failures produce no tile, but
/// their index — and therefore their grid slot — is still consumed, so
/// skipping never compacts the layout.
pub fn plan_grid(
    snapshot: &[(ClientId, Frame)],
    codec: &dyn DisplayCodec,
    config: &ViewConfig,
) -> RenderPlan {
    let columns = config.columns.max(1);
    let mut tiles = Vec::with_capacity(snapshot.len());

    for (idx, (id, frame)) in snapshot.iter().enumerate() {
        if frame.is_blank() {
            continue;
        }

        let image = match codec.thumbnail(frame, config.thumb_width, config.thumb_height) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(producer = %id, error = %e, "Skipping undisplayable frame");
                continue;
            }
        };

        tiles.push(Tile {
            client_id: id.clone(),
            row: idx / columns,
            col: idx % columns,
            image,
        });
    }

    RenderPlan {
        mode: ViewMode::Grid,
        tiles,
    }
}

/// Run the render tick loop
///
/// On each tick: drain pending commands and ingest events into the state
/// machine, build a plan from the current registry contents, and present
/// it. Never returns; spawn it alongside the ingest server.
pub async fn run_view_loop<C, S>(
    mut selector: ViewSelector,
    registry: Arc<ClientRegistry>,
    codec: C,
    mut sink: S,
    mut commands: mpsc::Receiver<ViewCommand>,
    mut events: mpsc::Receiver<IngestEvent>,
    config: ViewConfig,
) where
    C: DisplayCodec,
    S: DisplaySink,
{
    let mut ticker = tokio::time::interval(config.tick_interval);

    loop {
        ticker.tick().await;

        while let Ok(command) = commands.try_recv() {
            match command {
                ViewCommand::Select(id) => selector.select_client(id),
                ViewCommand::SetMode(mode) => selector.set_mode(mode),
            }
        }

        while let Ok(event) = events.try_recv() {
            match event {
                IngestEvent::NewClient(id) => {
                    if selector.on_new_client(id.clone()) {
                        tracing::info!(producer = %id, "Auto-selected first producer");
                    }
                }
            }
        }

        let plan = match selector.mode() {
            ViewMode::Single => {
                let frame = match selector.selected() {
                    Some(id) => registry.get(id).await,
                    None => None,
                };
                plan_single(selector.selected(), frame.as_ref(), &codec)
            }
            ViewMode::Grid => {
                let snapshot = registry.snapshot().await;
                plan_grid(&snapshot, &codec, &config)
            }
        };

        sink.present(plan);
    }
}

#[cfg(test)]
mod tests {
    use crate::media::{CodecError, PassthroughCodec};

    use super::*;

    fn frame(data: &'static [u8]) -> Frame {
        Frame::from_encoded(Bytes::from_static(data))
    }

    #[test]
    fn test_single_with_no_selection_renders_nothing() {
        let plan = plan_single(None, None, &PassthroughCodec);
        assert!(plan.tiles.is_empty());
    }

    #[test]
    fn test_single_with_missing_frame_renders_nothing() {
        let id = ClientId::new("cam-1");
        let plan = plan_single(Some(&id), None, &PassthroughCodec);
        assert!(plan.tiles.is_empty());
    }

    #[test]
    fn test_single_renders_selected_frame() {
        let id = ClientId::new("cam-1");
        let f = frame(b"jpeg");
        let plan = plan_single(Some(&id), Some(&f), &PassthroughCodec);

        assert_eq!(plan.tiles.len(), 1);
        assert_eq!(plan.tiles[0].client_id, id);
        assert_eq!((plan.tiles[0].row, plan.tiles[0].col), (0, 0));
        assert_eq!(plan.tiles[0].image.as_ref(), b"jpeg");
    }

    #[test]
    fn test_grid_positions_follow_sorted_order() {
        let config = ViewConfig::default().columns(2);
        let snapshot = vec![
            (ClientId::new("A"), frame(b"a")),
            (ClientId::new("B"), frame(b"b")),
            (ClientId::new("C"), frame(b"c")),
        ];

        let plan = plan_grid(&snapshot, &PassthroughCodec, &config);

        assert_eq!(plan.tiles.len(), 3);
        assert_eq!((plan.tiles[0].row, plan.tiles[0].col), (0, 0));
        assert_eq!((plan.tiles[1].row, plan.tiles[1].col), (0, 1));
        assert_eq!((plan.tiles[2].row, plan.tiles[2].col), (1, 0));
        assert_eq!(plan.tiles[0].client_id.as_str(), "A");
        assert_eq!(plan.tiles[1].client_id.as_str(), "B");
    }

    #[test]
    fn test_grid_skips_blank_frames_without_compacting() {
        let config = ViewConfig::default().columns(2);
        let snapshot = vec![
            (ClientId::new("A"), frame(b"a")),
            (ClientId::new("B"), frame(b"")), // blank
            (ClientId::new("C"), frame(b"c")),
        ];

        let plan = plan_grid(&snapshot, &PassthroughCodec, &config);

        // B's slot (0,1) stays empty; C keeps its index-derived position
        assert_eq!(plan.tiles.len(), 2);
        assert_eq!(plan.tiles[0].client_id.as_str(), "A");
        assert_eq!((plan.tiles[0].row, plan.tiles[0].col), (0, 0));
        assert_eq!(plan.tiles[1].client_id.as_str(), "C");
        assert_eq!((plan.tiles[1].row, plan.tiles[1].col), (1, 0));
    }

    #[test]
    fn test_grid_skips_codec_failures_without_compacting() {
        /// Codec that refuses one specific producer's frames
        struct Picky;

        impl DisplayCodec for Picky {
            fn encode_display(&self, frame: &Frame) -> Result<Bytes, CodecError> {
                Ok(frame.data.clone())
            }

            fn thumbnail(
                &self,
                frame: &Frame,
                _width: u32,
                _height: u32,
            ) -> Result<Bytes, CodecError> {
                if frame.data.as_ref() == b"bad" {
                    Err(CodecError::Resize("unsupported".into()))
                } else {
                    Ok(frame.data.clone())
                }
            }
        }

        let config = ViewConfig::default().columns(3);
        let snapshot = vec![
            (ClientId::new("A"), frame(b"ok")),
            (ClientId::new("B"), frame(b"bad")),
            (ClientId::new("C"), frame(b"ok")),
        ];

        let plan = plan_grid(&snapshot, &Picky, &config);

        assert_eq!(plan.tiles.len(), 2);
        assert_eq!((plan.tiles[1].row, plan.tiles[1].col), (0, 2));
    }

    #[tokio::test]
    async fn test_view_loop_auto_selects_and_presents() {
        use std::sync::Mutex;

        /// Sink that records every presented plan
        struct Collector(Arc<Mutex<Vec<RenderPlan>>>);

        impl DisplaySink for Collector {
            fn present(&mut self, plan: RenderPlan) {
                self.0.lock().unwrap().push(plan);
            }
        }

        let registry = Arc::new(ClientRegistry::new());
        registry
            .upsert(&ClientId::new("X"), frame(b"jpeg"))
            .await;

        let (_command_tx, command_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        event_tx
            .send(IngestEvent::NewClient(ClientId::new("X")))
            .await
            .unwrap();

        let plans = Arc::new(Mutex::new(Vec::new()));
        let sink = Collector(Arc::clone(&plans));

        let config = ViewConfig::default().tick_interval(std::time::Duration::from_millis(5));
        let loop_handle = tokio::spawn(run_view_loop(
            ViewSelector::new(),
            Arc::clone(&registry),
            PassthroughCodec,
            sink,
            command_rx,
            event_rx,
            config,
        ));

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        loop_handle.abort();

        let plans = plans.lock().unwrap();
        assert!(!plans.is_empty());
        let last = plans.last().unwrap();
        assert_eq!(last.tiles.len(), 1);
        assert_eq!(last.tiles[0].client_id.as_str(), "X");
    }
}
