use leptos::prelude::*;

use super::{NumberInput, report};
use crate::editor::{Editor, Notice};
use crate::forms::{self, LinkForm, resolve_endpoint};

/// Select over the current node ids. Shows the first id until the user picks
/// one, and again if the picked id disappears on import.
#[component]
fn EndpointSelect(
	label: &'static str,
	endpoints: Memo<Vec<String>>,
	choice: RwSignal<Option<String>>,
) -> impl IntoView {
	let options = move || {
		endpoints.with(|ids| {
			let selected = choice.with(|c| resolve_endpoint(c.as_deref(), ids));
			ids.iter()
				.map(|id| {
					let is_selected = selected.as_deref() == Some(id.as_str());
					view! { <option value=id.clone() selected=is_selected>{id.clone()}</option> }
				})
				.collect_view()
		})
	};

	view! {
		<label class="field">
			<span>{label}</span>
			<select on:change=move |e| choice.set(Some(event_target_value(&e)))>{options}</select>
		</label>
	}
}

/// Sidebar form adding or overwriting one link between existing nodes.
#[component]
pub fn LinkFormPanel(
	/// Editing session.
	editor: RwSignal<Editor>,
	/// Receives the outcome of each action.
	notice: RwSignal<Option<Notice>>,
	/// Cleared once the form changes the store.
	imported: RwSignal<bool>,
) -> impl IntoView {
	let endpoints = Memo::new(move |_| editor.with(|e| e.selectable_endpoints()));

	let defaults = LinkForm::default();
	let node1 = RwSignal::new(defaults.node1);
	let node2 = RwSignal::new(defaults.node2);
	let delay = RwSignal::new(defaults.delay);
	let bandwidth = RwSignal::new(defaults.bandwidth);
	let jitter_low = RwSignal::new(defaults.jitter_low);
	let jitter_high = RwSignal::new(defaults.jitter_high);
	let failure_rate = RwSignal::new(defaults.failure_rate);

	let on_submit = move |_| {
		let ids = endpoints.get_untracked();
		let form = LinkForm {
			node1: resolve_endpoint(node1.get_untracked().as_deref(), &ids),
			node2: resolve_endpoint(node2.get_untracked().as_deref(), &ids),
			delay: delay.get_untracked(),
			bandwidth: bandwidth.get_untracked(),
			jitter_low: jitter_low.get_untracked(),
			jitter_high: jitter_high.get_untracked(),
			failure_rate: failure_rate.get_untracked(),
		};
		let Some(result) = editor.try_update(|e| e.on_add_link(&form)) else {
			return;
		};
		if report(notice, "add link", result) {
			imported.set(false);
		}
	};

	view! {
		<section class="panel">
			<h2>"Add Link"</h2>
			<EndpointSelect label="Node 1" endpoints=endpoints choice=node1 />
			<EndpointSelect label="Node 2" endpoints=endpoints choice=node2 />
			<NumberInput label="Delay (ms)" value=delay bounds=forms::DELAY />
			<NumberInput label="Bandwidth (Mbps)" value=bandwidth bounds=forms::BANDWIDTH />
			<NumberInput label="Jitter Low" value=jitter_low bounds=forms::JITTER />
			<NumberInput label="Jitter High" value=jitter_high bounds=forms::JITTER />
			<NumberInput label="Failure Rate" value=failure_rate bounds=forms::FAILURE_RATE />
			<button
				type="button"
				disabled=move || endpoints.with(Vec::is_empty)
				on:click=on_submit
			>
				"Add Link"
			</button>
		</section>
	}
}
