//! Editing session: the store plus the handlers that mutate it.

use chrono::NaiveDateTime;
use log::info;

use crate::config::EditorConfig;
use crate::export::{self, ExportArtifact, FileNaming, SaveArea, SaveResult};
use crate::forms::{FormError, FormResult, LinkForm, NodeForm};
use crate::topology::document::DocumentResult;
use crate::topology::{Topology, export_topology, import_topology};

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
	/// The action went through.
	Success,
	/// The action was rejected or failed.
	Error,
}

/// Feedback line shown after a user action.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
	/// Severity, used for styling.
	pub kind: NoticeKind,
	/// Message shown to the user.
	pub text: String,
}

impl Notice {
	/// Success notice.
	pub fn success(text: impl Into<String>) -> Self {
		Self {
			kind: NoticeKind::Success,
			text: text.into(),
		}
	}

	/// Error notice.
	pub fn error(text: impl Into<String>) -> Self {
		Self {
			kind: NoticeKind::Error,
			text: text.into(),
		}
	}
}

/// Owns the topology for one session and applies user commands to it.
#[derive(Clone, Debug, Default)]
pub struct Editor {
	topology: Topology,
	config: EditorConfig,
}

impl Editor {
	/// Empty session using `config`.
	pub fn new(config: EditorConfig) -> Self {
		Self {
			topology: Topology::new(),
			config,
		}
	}

	/// Starts the session from an existing topology.
	pub fn with_topology(mut self, topology: Topology) -> Self {
		self.topology = topology;
		self
	}

	/// Current store.
	pub fn topology(&self) -> &Topology {
		&self.topology
	}

	/// Session settings.
	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	/// Node ids offered by the link form's endpoint selects.
	pub fn selectable_endpoints(&self) -> Vec<String> {
		self.topology.node_ids()
	}

	/// Adds or overwrites the node described by `form`.
	pub fn on_add_node(&mut self, form: &NodeForm) -> FormResult<Notice> {
		let (id, attrs) = form.parse()?;
		self.topology.add_node(id.clone(), attrs);
		info!("topology-editor: node {:?} added ({:?})", id, attrs);
		Ok(Notice::success(format!("Node {} added.", id)))
	}

	/// Adds or overwrites the link described by `form`. Both endpoints must be
	/// among [`Editor::selectable_endpoints`].
	pub fn on_add_link(&mut self, form: &LinkForm) -> FormResult<Notice> {
		let (node1, node2, attrs) = form.parse()?;
		for id in [&node1, &node2] {
			if !self.topology.contains_node(id) {
				return Err(FormError::UnknownEndpoint(id.clone()));
			}
		}
		self.topology.add_link(&node1, &node2, attrs);
		info!(
			"topology-editor: link {:?} - {:?} added ({:?})",
			node1, node2, attrs
		);
		Ok(Notice::success(format!(
			"Link between {} and {} added.",
			node1, node2
		)))
	}

	/// Replaces the whole store with the topology in `yaml`. On error the
	/// current store is kept.
	pub fn import(&mut self, yaml: &str) -> DocumentResult<Notice> {
		let topology = import_topology(yaml)?;
		info!(
			"topology-editor: imported {} nodes, {} links",
			topology.node_count(),
			topology.link_count()
		);
		self.topology = topology;
		Ok(Notice::success("Topology loaded from YAML file."))
	}

	/// Serializes the store and names the file for an export made at `now`.
	pub fn export(&self, naming: &FileNaming, now: NaiveDateTime) -> DocumentResult<ExportArtifact> {
		Ok(ExportArtifact {
			file_name: export::file_name(&self.config, naming, now),
			document: export_topology(&self.topology)?,
		})
	}

	/// Writes an export into `area` and reports where it went.
	pub fn save(&self, artifact: &ExportArtifact, area: &dyn SaveArea) -> SaveResult<Notice> {
		let location = area.save(&artifact.file_name, &artifact.document)?;
		info!("topology-editor: saved {}", location);
		Ok(Notice::success(format!("YAML file saved to {}.", location)))
	}
}
