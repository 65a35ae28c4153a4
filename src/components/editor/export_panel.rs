use leptos::prelude::*;
use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::report;
use crate::editor::{Editor, Notice};
use crate::export::{Delivery, ExportArtifact, FileNaming, default_save_area};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NamingChoice {
	Timestamp,
	Chosen,
	Fixed,
}

impl NamingChoice {
	const ALL: [(Self, &'static str); 3] = [
		(Self::Timestamp, "Save with current time"),
		(Self::Chosen, "Choose a file name"),
		(Self::Fixed, "Save as topology.yaml"),
	];
}

/// Hands `artifact` to the browser as a file download.
fn trigger_download(artifact: &ExportArtifact) -> Result<(), JsValue> {
	let parts = js_sys::Array::of1(&JsValue::from_str(&artifact.document));
	let options = BlobPropertyBag::new();
	options.set_type("application/x-yaml");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(&artifact.file_name);
	anchor.click();

	// The object URL has to outlive the click's task.
	let revoke = Closure::once(move || {
		let _ = Url::revoke_object_url(&url);
	});
	window.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.as_ref().unchecked_ref(), 0)?;
	revoke.forget();
	Ok(())
}

fn deliver(editor: &Editor, artifact: &ExportArtifact, delivery: Delivery) -> Result<Notice, String> {
	match delivery {
		Delivery::SaveArea => {
			let area = default_save_area(editor.config());
			editor.save(artifact, area.as_ref()).map_err(|err| err.to_string())
		}
		Delivery::Download => {
			trigger_download(artifact).map_err(|err| format!("{:?}", err))?;
			info!("topology-editor: download of {} started", artifact.file_name);
			Ok(Notice::success(format!("Downloading {}.", artifact.file_name)))
		}
	}
}

/// Export controls: file naming, delivery and the export button.
#[component]
pub fn ExportPanel(
	/// Editing session.
	editor: RwSignal<Editor>,
	/// Receives the outcome of each action.
	notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
	let (initial_naming, initial_delivery) =
		editor.with_untracked(|e| (e.config().naming.clone(), e.config().delivery));
	let (naming, chosen_name) = match initial_naming {
		FileNaming::Timestamp => (NamingChoice::Timestamp, String::new()),
		FileNaming::Chosen(name) => (NamingChoice::Chosen, name),
		FileNaming::Fixed => (NamingChoice::Fixed, String::new()),
	};
	let naming = RwSignal::new(naming);
	let chosen_name = RwSignal::new(chosen_name);
	let delivery = RwSignal::new(initial_delivery);

	let on_export = move |_| {
		let file_naming = match naming.get_untracked() {
			NamingChoice::Timestamp => FileNaming::Timestamp,
			NamingChoice::Chosen => FileNaming::Chosen(chosen_name.get_untracked()),
			NamingChoice::Fixed => FileNaming::Fixed,
		};
		let now = chrono::Local::now().naive_local();
		let result = editor.with_untracked(|e| {
			let artifact = e.export(&file_naming, now).map_err(|err| err.to_string())?;
			deliver(e, &artifact, delivery.get_untracked())
		});
		report(notice, "export topology", result);
	};

	let naming_options = NamingChoice::ALL
		.into_iter()
		.map(|(choice, label)| {
			view! {
				<label class="option">
					<input
						type="radio"
						name="file-naming"
						prop:checked=move || naming.get() == choice
						on:change=move |_| naming.set(choice)
					/>
					{label}
				</label>
			}
		})
		.collect_view();

	view! {
		<section class="panel export">
			<h2>"Export Topology"</h2>
			<div class="options">{naming_options}</div>
			<Show when=move || naming.get() == NamingChoice::Chosen>
				<label class="field">
					<span>"File name (without extension)"</span>
					<input
						type="text"
						prop:value=move || chosen_name.get()
						on:input=move |e| chosen_name.set(event_target_value(&e))
					/>
				</label>
			</Show>
			<div class="options">
				<label class="option">
					<input
						type="radio"
						name="delivery"
						prop:checked=move || delivery.get() == Delivery::SaveArea
						on:change=move |_| delivery.set(Delivery::SaveArea)
					/>
					"Save to folder"
				</label>
				<label class="option">
					<input
						type="radio"
						name="delivery"
						prop:checked=move || delivery.get() == Delivery::Download
						on:change=move |_| delivery.set(Delivery::Download)
					/>
					"Download"
				</label>
			</div>
			<button type="button" on:click=on_export>"Export to YAML"</button>
		</section>
	}
}
