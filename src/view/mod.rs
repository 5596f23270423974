//! View selection and rendering
//!
//! A single authoritative [`ViewSelector`] decides what the display shows;
//! the render loop turns it plus registry contents into [`RenderPlan`]s.
//! UI toolkits sit behind [`DisplaySink`] and draw plans verbatim, so the
//! display layer stays decoupled from networking and state.

pub mod config;
pub mod render;
pub mod selector;

pub use config::ViewConfig;
pub use render::{plan_grid, plan_single, run_view_loop, DisplaySink, RenderPlan, Tile, ViewCommand};
pub use selector::{ViewMode, ViewSelector};
