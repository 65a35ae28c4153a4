//! Live simulation state and interaction tracking for the canvas.
//!
//! Wraps the `force_graph` simulation built from a [`Topology`] together with
//! the pan/zoom transform and drag state. The simulation runs for the layout's
//! iteration budget after every rebuild, then stops until the user drags a
//! node.

use std::collections::HashMap;

use force_graph::{DefaultNodeIdx, ForceGraph};

use super::layout::{LayoutConfig, NodeInfo, Seed, build_simulation, compute_layout};
use super::scale::{ScaleConfig, ScaledValues};
use crate::topology::Topology;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Simulation plus view state for one canvas.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	layout: LayoutConfig,
	ticks_remaining: usize,
}

impl ForceGraphState {
	/// Starts from a settled layout of `topology`, centered in the canvas.
	pub fn new(topology: &Topology, layout: &LayoutConfig, width: f64, height: f64) -> Self {
		let seed = compute_layout(topology, layout)
			.into_iter()
			.map(|p| {
				let seed = Seed {
					x: p.x as f32,
					y: p.y as f32,
					pinned: false,
				};
				(p.id, seed)
			})
			.collect();

		Self {
			graph: build_simulation(topology, layout, &seed).graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			layout: layout.clone(),
			ticks_remaining: 0,
		}
	}

	/// Swaps in a changed topology. Nodes that survive keep their position
	/// and pin; new ones are seeded on the layout circle and the simulation
	/// restarts.
	pub fn rebuild(&mut self, topology: &Topology) {
		let seed = self.seeds();
		self.graph = build_simulation(topology, &self.layout, &seed).graph;
		self.drag = DragState::default();
		self.ticks_remaining = self.layout.iterations;
	}

	/// Current position and pin of every simulated node by id.
	pub fn seeds(&self) -> HashMap<String, Seed> {
		let mut seeds = HashMap::new();
		self.graph.visit_nodes(|node| {
			let seed = Seed {
				x: node.x(),
				y: node.y(),
				pinned: node.data.is_anchor,
			};
			seeds.insert(node.data.user_data.id.clone(), seed);
		});
		seeds
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < scale.hit_radius {
				found = Some(node.index());
			}
		});
		found
	}

	/// Pointer pressed at screen position `(x, y)`: grabs the node under it,
	/// or starts panning the view when there is none.
	pub fn press(&mut self, x: f64, y: f64, config: &ScaleConfig) {
		let Some(idx) = self.node_at_position(x, y, config) else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
			};
			return;
		};

		let mut start = (0.0, 0.0);
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				start = (node.x(), node.y());
			}
		});
		self.drag = DragState {
			active: true,
			node_idx: Some(idx),
			start_x: x,
			start_y: y,
			node_start_x: start.0,
			node_start_y: start.1,
		};
	}

	/// Pointer moved to `(x, y)`. A grabbed node follows and is pinned there.
	pub fn move_pointer(&mut self, x: f64, y: f64) {
		if let (true, Some(idx)) = (self.drag.active, self.drag.node_idx) {
			let nx = self.drag.node_start_x + ((x - self.drag.start_x) / self.transform.k) as f32;
			let ny = self.drag.node_start_y + ((y - self.drag.start_y) / self.transform.k) as f32;
			self.graph.visit_nodes_mut(|node| {
				if node.index() == idx {
					node.data.x = nx;
					node.data.y = ny;
					node.data.is_anchor = true;
				}
			});
			self.wake();
		} else if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	pub fn release(&mut self) {
		self.drag = DragState::default();
		self.pan.active = false;
	}

	/// Zooms one wheel notch around `(x, y)`, keeping that point fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = k;
	}

	/// Keeps the simulation running for another full budget.
	pub fn wake(&mut self) {
		self.ticks_remaining = self.layout.iterations;
	}

	/// True once the iteration budget is spent.
	pub fn is_settled(&self) -> bool {
		self.ticks_remaining == 0
	}

	/// Advances the simulation one step unless it has settled.
	pub fn tick(&mut self) {
		if self.is_settled() {
			return;
		}
		self.graph.update(self.layout.time_step);
		self.ticks_remaining -= 1;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::topology::{LinkAttrs, NodeAttrs};

	fn pair() -> Topology {
		let mut topology = Topology::new();
		topology.add_node("A", NodeAttrs::default());
		topology.add_node("B", NodeAttrs::default());
		topology.add_link("A", "B", LinkAttrs::default());
		topology
	}

	#[test]
	fn starts_settled_and_centered() {
		let state = ForceGraphState::new(&pair(), &LayoutConfig::default(), 800.0, 600.0);

		assert!(state.is_settled());
		assert_eq!(state.screen_to_graph(400.0, 300.0), (0.0, 0.0));
		assert_eq!(state.seeds().len(), 2);
	}

	#[test]
	fn rebuild_keeps_surviving_positions() {
		let mut state = ForceGraphState::new(&pair(), &LayoutConfig::default(), 800.0, 600.0);
		let before = state.seeds();

		let mut grown = pair();
		grown.add_node("C", NodeAttrs::default());
		state.rebuild(&grown);

		let after = state.seeds();
		assert_eq!(after.len(), 3);
		assert_eq!(after["A"], before["A"]);
		assert_eq!(after["B"], before["B"]);
		assert!(!state.is_settled());
	}

	#[test]
	fn ticks_stop_once_the_budget_is_spent() {
		let layout = LayoutConfig {
			iterations: 3,
			..LayoutConfig::default()
		};
		let mut state = ForceGraphState::new(&pair(), &layout, 800.0, 600.0);
		state.wake();

		for _ in 0..3 {
			assert!(!state.is_settled());
			state.tick();
		}
		assert!(state.is_settled());

		let settled = state.seeds();
		state.tick();
		assert_eq!(state.seeds(), settled);
	}

	#[test]
	fn finds_node_under_pointer() {
		let mut topology = Topology::new();
		topology.add_node("A", NodeAttrs::default());
		let state = ForceGraphState::new(&topology, &LayoutConfig::default(), 800.0, 600.0);
		let Seed { x, y, .. } = state.seeds()["A"];
		let (sx, sy) = (x as f64 + 400.0, y as f64 + 300.0);

		let hit = state.node_at_position(sx, sy, &ScaleConfig::default());
		let mut hit_id = None;
		state.graph.visit_nodes(|node| {
			if Some(node.index()) == hit {
				hit_id = Some(node.data.user_data.id.clone());
			}
		});
		assert_eq!(hit_id.as_deref(), Some("A"));
		assert_eq!(state.node_at_position(sx + 100.0, sy, &ScaleConfig::default()), None);
	}

	#[test]
	fn dragged_node_follows_pointer_and_stays_pinned() {
		let mut topology = Topology::new();
		topology.add_node("A", NodeAttrs::default());
		let mut state = ForceGraphState::new(&topology, &LayoutConfig::default(), 800.0, 600.0);
		let Seed { x, y, .. } = state.seeds()["A"];
		let (sx, sy) = (x as f64 + 400.0, y as f64 + 300.0);

		state.press(sx, sy, &ScaleConfig::default());
		state.move_pointer(sx + 30.0, sy - 10.0);
		state.release();

		assert_eq!(
			state.seeds()["A"],
			Seed {
				x: x + 30.0,
				y: y - 10.0,
				pinned: true,
			}
		);
		assert!(!state.drag.active);

		topology.add_node("B", NodeAttrs::default());
		state.rebuild(&topology);
		let seeds = state.seeds();
		assert!(seeds["A"].pinned);
		assert!(!seeds["B"].pinned);
		assert_eq!((seeds["A"].x, seeds["A"].y), (x + 30.0, y - 10.0));
	}

	#[test]
	fn background_press_pans_and_wheel_zooms_around_pointer() {
		let mut state = ForceGraphState::new(&Topology::new(), &LayoutConfig::default(), 800.0, 600.0);

		state.press(10.0, 10.0, &ScaleConfig::default());
		state.move_pointer(60.0, 30.0);
		state.release();
		assert_eq!((state.transform.x, state.transform.y), (450.0, 320.0));

		let before = state.screen_to_graph(100.0, 100.0);
		state.zoom_at(100.0, 100.0, -1.0);
		let after = state.screen_to_graph(100.0, 100.0);
		assert!((state.transform.k - 1.1).abs() < 1e-9);
		assert!((before.0 - after.0).abs() < 1e-9 && (before.1 - after.1).abs() < 1e-9);
	}
}
