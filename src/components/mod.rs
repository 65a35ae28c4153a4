//! Leptos components: the editing panels and the topology canvas.

pub mod editor;
pub mod force_graph;
