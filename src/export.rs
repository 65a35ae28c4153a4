//! Export file naming and delivery.
//!
//! A document is either written into a save area or handed to the browser as
//! a download. Both paths share the same naming rules.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use gloo_storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EditorConfig;

/// Errors raised while writing an export into a save area.
#[derive(Error, Debug)]
pub enum SaveError {
	/// Creating the folder or writing the file failed.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// Local storage rejected the write.
	#[error("browser storage error: {0}")]
	Browser(#[from] gloo_storage::errors::StorageError),
}

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// How the exported file is named.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileNaming {
	/// `<prefix><YYYYmmdd_HHMMSS>.<ext>`
	Timestamp,
	/// `<base>.<ext>`, falling back to the timestamp name when blank.
	Chosen(String),
	/// `<fixed_name>.<ext>`
	Fixed,
}

/// Where the exported document goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
	/// Write into the configured save area.
	SaveArea,
	/// Offer the document as a browser download.
	Download,
}

/// A serialized topology ready for delivery.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportArtifact {
	/// Resolved file name including extension.
	pub file_name: String,
	/// YAML text.
	pub document: String,
}

/// Resolves the file name for an export made at `now`.
pub fn file_name(config: &EditorConfig, naming: &FileNaming, now: NaiveDateTime) -> String {
	let base = match naming {
		FileNaming::Chosen(base) if !base.trim().is_empty() => base.trim().to_string(),
		FileNaming::Fixed => config.fixed_name.clone(),
		FileNaming::Timestamp | FileNaming::Chosen(_) => format!(
			"{}{}",
			config.timestamp_prefix,
			now.format("%Y%m%d_%H%M%S")
		),
	};
	format!("{}.{}", base, config.extension)
}

/// A place exports can be written to.
pub trait SaveArea {
	/// Stores `document` as `file_name`, creating the area first if it does
	/// not exist, and returns the location written.
	fn save(&self, file_name: &str, document: &str) -> SaveResult<String>;
}

/// A directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct FolderArea {
	root: PathBuf,
}

impl FolderArea {
	/// Area rooted at `root`; created on first save.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}
}

impl SaveArea for FolderArea {
	fn save(&self, file_name: &str, document: &str) -> SaveResult<String> {
		fs::create_dir_all(&self.root)?;
		let path = self.root.join(file_name);
		fs::write(&path, document)?;
		Ok(path.display().to_string())
	}
}

/// A namespace in the browser's local storage.
///
/// Documents live under `<folder>/<file_name>`; the `<folder>` key holds the
/// list of saved file names.
#[derive(Clone, Debug)]
pub struct BrowserArea {
	folder: String,
}

impl BrowserArea {
	/// Area under the `folder` key prefix.
	pub fn new(folder: impl Into<String>) -> Self {
		Self {
			folder: folder.into(),
		}
	}

	/// File names saved so far, oldest first.
	pub fn saved(&self) -> Vec<String> {
		LocalStorage::get(&self.folder).unwrap_or_default()
	}
}

impl SaveArea for BrowserArea {
	fn save(&self, file_name: &str, document: &str) -> SaveResult<String> {
		let mut index = self.saved();
		let key = format!("{}/{}", self.folder, file_name);
		LocalStorage::set(&key, document)?;
		if !index.iter().any(|saved| saved == file_name) {
			index.push(file_name.to_string());
			LocalStorage::set(&self.folder, &index)?;
		}
		Ok(key)
	}
}

/// The save area for the current target: browser storage under WASM, a
/// directory everywhere else.
pub fn default_save_area(config: &EditorConfig) -> Box<dyn SaveArea> {
	if cfg!(target_arch = "wasm32") {
		Box::new(BrowserArea::new(&config.save_folder))
	} else {
		Box::new(FolderArea::new(&config.save_folder))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn noon() -> NaiveDateTime {
		NaiveDate::from_ymd_opt(2024, 3, 9)
			.unwrap()
			.and_hms_opt(12, 5, 7)
			.unwrap()
	}

	#[test]
	fn naming_modes() {
		let config = EditorConfig::default();

		assert_eq!(
			file_name(&config, &FileNaming::Timestamp, noon()),
			"topology_20240309_120507.yaml"
		);
		assert_eq!(
			file_name(&config, &FileNaming::Chosen("lab".into()), noon()),
			"lab.yaml"
		);
		assert_eq!(
			file_name(&config, &FileNaming::Chosen("  ".into()), noon()),
			"topology_20240309_120507.yaml"
		);
		assert_eq!(
			file_name(&config, &FileNaming::Fixed, noon()),
			"topology.yaml"
		);
	}

	#[test]
	fn folder_area_creates_missing_folder() -> Result<(), Box<dyn std::error::Error>> {
		let tmp = tempfile::tempdir()?;
		let root = tmp.path().join("saved_topologies");
		assert!(!root.exists());

		let area = FolderArea::new(&root);
		let location = area.save("t.yaml", "nodes: []\n")?;

		assert_eq!(location, root.join("t.yaml").display().to_string());
		assert_eq!(fs::read_to_string(root.join("t.yaml"))?, "nodes: []\n");

		area.save("t.yaml", "links: []\n")?;
		assert_eq!(fs::read_to_string(root.join("t.yaml"))?, "links: []\n");
		Ok(())
	}
}
