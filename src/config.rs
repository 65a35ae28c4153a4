//! Editor configuration.
//!
//! Every field has a default, so the host page only needs to override what it
//! cares about:
//!
//! ```html
//! <script id="editor-config" type="application/json">
//!   { "save_folder": "my_topologies", "delivery": "download" }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::components::force_graph::{Color, LayoutConfig};
use crate::export::{Delivery, FileNaming};

/// Export naming, delivery and layout settings for one editor session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	/// Save area that exports are written into.
	pub save_folder: String,
	/// Extension appended to every exported file name, without the dot.
	pub extension: String,
	/// Base name used by [`FileNaming::Fixed`].
	pub fixed_name: String,
	/// Prefix of timestamp-derived file names.
	pub timestamp_prefix: String,
	/// Naming mode preselected in the export panel.
	pub naming: FileNaming,
	/// Delivery preselected in the export panel.
	pub delivery: Delivery,
	/// CSS color of nodes built through the forms.
	pub node_color: String,
	/// CSS color of nodes after an import.
	pub imported_node_color: String,
	/// Canvas simulation settings.
	pub layout: LayoutConfig,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			save_folder: "saved_topologies".to_string(),
			extension: "yaml".to_string(),
			fixed_name: "topology".to_string(),
			timestamp_prefix: "topology_".to_string(),
			naming: FileNaming::Timestamp,
			delivery: Delivery::SaveArea,
			node_color: Color::LIGHT_BLUE.to_css(),
			imported_node_color: Color::LIGHT_GREEN.to_css(),
			layout: LayoutConfig::default(),
		}
	}
}

impl EditorConfig {
	/// Parses a JSON object; absent keys take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_yields_defaults() {
		let config = EditorConfig::from_json("{}").unwrap();
		assert_eq!(config, EditorConfig::default());
		assert_eq!(config.save_folder, "saved_topologies");
		assert_eq!(config.node_color, "#add8e6");
		assert_eq!(config.imported_node_color, "#90ee90");
	}

	#[test]
	fn overrides_are_partial() {
		let json = r#"{
			"save_folder": "exports",
			"naming": { "chosen": "lab" },
			"delivery": "download",
			"layout": { "iterations": 50 }
		}"#;
		let config = EditorConfig::from_json(json).unwrap();

		assert_eq!(config.save_folder, "exports");
		assert_eq!(config.extension, "yaml");
		assert_eq!(config.naming, FileNaming::Chosen("lab".into()));
		assert_eq!(config.delivery, Delivery::Download);
		assert_eq!(config.layout.iterations, 50);
		assert_eq!(config.layout.spring, LayoutConfig::default().spring);
	}
}
