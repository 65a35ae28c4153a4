//! Force-directed topology visualization.
//!
//! Renders a [`Topology`](crate::topology::Topology) on an HTML canvas with:
//! - Physics-based node positioning via force simulation
//! - Pan, zoom, and node dragging interactions
//! - Uniform node circles labeled with their ids
//!
//! # Example
//!
//! ```ignore
//! let topology = RwSignal::new(Topology::new());
//! let color = Signal::derive(|| Color::LIGHT_BLUE);
//!
//! view! { <ForceGraphCanvas topology=topology node_color=color /> }
//! ```

mod component;
mod layout;
mod render;
mod scale;
mod state;
mod theme;

pub use component::ForceGraphCanvas;
pub use layout::{LayoutConfig, Placement, compute_layout};
pub use theme::{BackgroundStyle, Color, EdgeStyle, NodeStyle, Theme};
