use leptos::prelude::*;

use super::{NumberInput, report};
use crate::editor::{Editor, Notice};
use crate::forms::{self, NodeForm};

/// Sidebar form adding or overwriting one node.
#[component]
pub fn NodeFormPanel(
	/// Editing session.
	editor: RwSignal<Editor>,
	/// Receives the outcome of each action.
	notice: RwSignal<Option<Notice>>,
	/// Cleared once the form changes the store.
	imported: RwSignal<bool>,
) -> impl IntoView {
	let defaults = NodeForm::default();
	let id = RwSignal::new(defaults.id);
	let cpu_capacity = RwSignal::new(defaults.cpu_capacity);
	let memory_capacity = RwSignal::new(defaults.memory_capacity);
	let queue_size = RwSignal::new(defaults.queue_size);
	let failure_rate = RwSignal::new(defaults.failure_rate);

	let on_submit = move |_| {
		let form = NodeForm {
			id: id.get_untracked(),
			cpu_capacity: cpu_capacity.get_untracked(),
			memory_capacity: memory_capacity.get_untracked(),
			queue_size: queue_size.get_untracked(),
			failure_rate: failure_rate.get_untracked(),
		};
		let Some(result) = editor.try_update(|e| e.on_add_node(&form)) else {
			return;
		};
		if report(notice, "add node", result) {
			imported.set(false);
		}
	};

	view! {
		<section class="panel">
			<h2>"Add Node"</h2>
			<label class="field">
				<span>"Node ID"</span>
				<input
					type="text"
					prop:value=move || id.get()
					on:input=move |e| id.set(event_target_value(&e))
				/>
			</label>
			<NumberInput label="CPU Capacity (%)" value=cpu_capacity bounds=forms::CPU_CAPACITY />
			<NumberInput label="Memory Capacity (MB)" value=memory_capacity bounds=forms::MEMORY_CAPACITY />
			<NumberInput label="Queue Size (packets)" value=queue_size bounds=forms::QUEUE_SIZE />
			<NumberInput label="Failure Rate" value=failure_rate bounds=forms::FAILURE_RATE />
			<button type="button" on:click=on_submit>"Add Node"</button>
		</section>
	}
}
