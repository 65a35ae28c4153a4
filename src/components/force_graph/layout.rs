//! Force-directed placement of topology nodes.
//!
//! Nodes repel each other (charge) and links pull their endpoints together
//! (spring). The same simulation backs both the one-shot [`compute_layout`]
//! and the live canvas state.

use std::collections::HashMap;
use std::f32::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use serde::{Deserialize, Serialize};

use crate::topology::Topology;

/// Simulation constants and the iteration budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Repulsion between every pair of nodes.
	pub charge: f32,
	/// Attraction along links.
	pub spring: f32,
	/// Upper bound on the force applied to a node in one step.
	pub max_force: f32,
	/// Velocity scale of the integration step.
	pub node_speed: f32,
	/// Velocity kept per step, 0.0 to 1.0.
	pub damping: f32,
	/// Steps run before the layout is considered settled.
	pub iterations: usize,
	/// Simulated seconds per step.
	pub time_step: f32,
	/// Radius of the circle new nodes are seeded on.
	pub seed_radius: f32,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			charge: 150.0,
			spring: 0.05,
			max_force: 100.0,
			node_speed: 3000.0,
			damping: 0.9,
			iterations: 300,
			time_step: 0.016,
			seed_radius: 100.0,
		}
	}
}

impl LayoutConfig {
	fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.charge,
			force_spring: self.spring,
			force_max: self.max_force,
			node_speed: self.node_speed,
			damping_factor: self.damping,
		}
	}
}

/// Payload carried by each simulated node.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
	/// Referenced by a link but missing from the node set.
	pub implicit: bool,
}

/// Final position of one drawn node.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
	/// Node or endpoint identifier.
	pub id: String,
	/// Horizontal position, origin at the layout center.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
	/// A dangling link endpoint rather than a node entry.
	pub implicit: bool,
}

/// Starting point of a node carried into a rebuilt simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seed {
	pub x: f32,
	pub y: f32,
	/// Dropped there by the user; the simulation does not move it.
	pub pinned: bool,
}

/// A populated simulation and the index of each node id in it.
pub struct Simulation {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub index: HashMap<String, DefaultNodeIdx>,
}

/// Builds a simulation for `topology`.
///
/// Nodes found in `seed` start where they were, pinned ones stay anchored;
/// the rest are spread on a circle around the origin. Dangling link endpoints
/// become implicit nodes.
pub fn build_simulation(
	topology: &Topology,
	config: &LayoutConfig,
	seed: &HashMap<String, Seed>,
) -> Simulation {
	let mut graph = ForceGraph::new(config.parameters());
	let mut index = HashMap::new();

	let drawn: Vec<(String, bool)> = topology
		.nodes()
		.map(|(id, _)| (id.to_string(), false))
		.chain(topology.dangling_endpoints().into_iter().map(|id| (id, true)))
		.collect();
	let count = drawn.len().max(1) as f32;

	for (i, (id, implicit)) in drawn.into_iter().enumerate() {
		let start = seed.get(&id).copied().unwrap_or_else(|| {
			let angle = i as f32 * 2.0 * PI / count;
			Seed {
				x: config.seed_radius * angle.cos(),
				y: config.seed_radius * angle.sin(),
				pinned: false,
			}
		});
		let idx = graph.add_node(NodeData {
			x: start.x,
			y: start.y,
			mass: 10.0,
			is_anchor: start.pinned,
			user_data: NodeInfo {
				id: id.clone(),
				implicit,
			},
		});
		index.insert(id, idx);
	}

	for link in topology.links() {
		if link.node1 == link.node2 {
			continue;
		}
		if let (Some(&a), Some(&b)) = (index.get(&link.node1), index.get(&link.node2)) {
			graph.add_edge(a, b, EdgeData::default());
		}
	}

	Simulation { graph, index }
}

/// Runs the full iteration budget and returns one placement per drawn node,
/// in node order followed by implicit endpoints.
pub fn compute_layout(topology: &Topology, config: &LayoutConfig) -> Vec<Placement> {
	let mut simulation = build_simulation(topology, config, &HashMap::new());
	for _ in 0..config.iterations {
		simulation.graph.update(config.time_step);
	}

	let mut placements = Vec::with_capacity(simulation.index.len());
	simulation.graph.visit_nodes(|node| {
		placements.push(Placement {
			id: node.data.user_data.id.clone(),
			x: node.x() as f64,
			y: node.y() as f64,
			implicit: node.data.user_data.implicit,
		});
	});
	placements
}
