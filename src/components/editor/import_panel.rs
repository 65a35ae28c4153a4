use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Event, File, FileReader, HtmlInputElement};

use super::report;
use crate::editor::{Editor, Notice};

/// Reads `file` as text and passes the contents to `on_load`.
fn read_text<F>(file: &File, on_load: F) -> Result<(), JsValue>
where
	F: 'static + FnOnce(Result<String, JsValue>),
{
	let reader = FileReader::new()?;
	let onload = Closure::once(move |e: Event| {
		let text = e
			.target()
			.and_then(|target| target.dyn_into::<FileReader>().ok())
			.ok_or_else(|| JsValue::from_str("missing file reader"))
			.and_then(|reader| reader.result())
			.and_then(|value| {
				value
					.as_string()
					.ok_or_else(|| JsValue::from_str("file is not text"))
			});
		on_load(text);
	});

	reader.set_onload(Some(onload.as_ref().unchecked_ref()));
	reader.read_as_text(file)?;
	onload.forget();
	Ok(())
}

/// File picker importing a YAML topology. A successful import replaces the
/// store and switches the canvas to the imported node color.
#[component]
pub fn ImportPanel(
	/// Editing session.
	editor: RwSignal<Editor>,
	/// Receives the outcome of each action.
	notice: RwSignal<Option<Notice>>,
	/// Set once an import succeeds.
	imported: RwSignal<bool>,
) -> impl IntoView {
	let on_change = move |e: Event| {
		let Some(input) = e
			.target()
			.and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
		else {
			return;
		};
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};

		let name = file.name();
		let started = read_text(&file, move |text| {
			let result = match text {
				Ok(yaml) => match editor.try_update(|session| session.import(&yaml)) {
					Some(result) => result.map_err(|err| err.to_string()),
					None => return,
				},
				Err(err) => Err(format!("{:?}", err)),
			};
			if report(notice, &format!("import {}", name), result) {
				imported.set(true);
			}
		});
		if let Err(err) = started {
			warn!("topology-editor: could not read upload: {:?}", err);
			notice.set(Some(Notice::error("Could not read the uploaded file.")));
		}

		// Picking the same file again should re-import it.
		input.set_value("");
	};

	view! {
		<section class="panel">
			<h2>"Import Topology"</h2>
			<label class="field">
				<span>"Upload YAML file"</span>
				<input type="file" accept=".yaml,.yml" on:change=on_change />
			</label>
		</section>
	}
}
