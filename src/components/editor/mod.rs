//! Sidebar and panel widgets that drive an [`Editor`].
//!
//! Every widget takes the session signal plus the notice line it reports
//! into. Nothing here touches the store except through the editor's handlers.

mod export_panel;
mod import_panel;
mod link_form;
mod node_form;

use std::fmt::Display;

use leptos::prelude::*;
use log::warn;

pub use export_panel::ExportPanel;
pub use import_panel::ImportPanel;
pub use link_form::LinkFormPanel;
pub use node_form::NodeFormPanel;

use crate::editor::{Editor, Notice, NoticeKind};
use crate::forms::Bounds;

/// Shows `result` on the notice line and returns whether it succeeded.
fn report<E: Display>(
	notice: RwSignal<Option<Notice>>,
	action: &str,
	result: Result<Notice, E>,
) -> bool {
	match result {
		Ok(n) => {
			notice.set(Some(n));
			true
		}
		Err(err) => {
			warn!("topology-editor: {} failed: {}", action, err);
			notice.set(Some(Notice::error(format!("Could not {}: {}", action, err))));
			false
		}
	}
}

/// Number input bound to the text it holds.
///
/// The text is kept verbatim and only parsed on submit, so a half-typed value
/// never fights the user.
#[component]
fn NumberInput(label: &'static str, value: RwSignal<String>, bounds: Bounds) -> impl IntoView {
	let is_invalid = move || value.with(|value| value.trim().parse::<f64>().is_err());

	view! {
		<label class="field">
			<span>{label}</span>
			<input
				type="number"
				class=("error", is_invalid)
				prop:value=move || value.get()
				min=bounds.min.to_string()
				max=bounds.max.map(|max| max.to_string())
				step=bounds.step.to_string()
				on:input=move |e| value.set(event_target_value(&e))
			/>
		</label>
	}
}

/// The most recent notice, if any.
#[component]
pub fn NoticeLine(
	/// Notice to show; nothing is drawn while empty.
	notice: RwSignal<Option<Notice>>,
) -> impl IntoView {
	move || {
		notice.get().map(|n| {
			let class = match n.kind {
				NoticeKind::Success => "notice success",
				NoticeKind::Error => "notice error",
			};
			view! { <p class=class>{n.text}</p> }
		})
	}
}

/// Node and link counts of the current store.
#[component]
pub fn TopologySummary(
	/// Editing session.
	editor: RwSignal<Editor>,
) -> impl IntoView {
	let counts = move || {
		editor.with(|e| {
			let topology = e.topology();
			format!("{} nodes, {} links", topology.node_count(), topology.link_count())
		})
	};

	view! { <p class="summary">{counts}</p> }
}
