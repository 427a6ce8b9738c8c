use std::collections::BTreeSet;

use crate::models::lead::Lead;
use crate::services::template_service;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    DeleteLeads,
    GenerateMessage,
    EnrichGender,
    ImportCsv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Explicit model of the lead-table UI: selection set, visible modal,
/// template draft with its advisory warnings, and in-flight batch tracking.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub selected: BTreeSet<i64>,
    pub modal: Option<Modal>,
    pub template: String,
    pub template_warnings: Vec<String>,
    pub pending_ops: usize,
    batch_notice: Option<String>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone)]
pub enum Action {
    ToggleLead(i64),
    /// Select-all checkbox: selects every listed lead, or clears the
    /// selection when everything is already selected.
    ToggleAll,
    OpenModal(Modal),
    CloseModal,
    EditTemplate(String),
    /// A per-lead fan-out (delete/message/gender) was dispatched, one
    /// operation per selected lead.
    BatchDispatched { ops: usize, done_notice: String },
    /// One dispatched operation settled, successfully or not. The batch is
    /// complete only when all of them have settled, regardless of order.
    OpSettled { error: Option<String> },
}

/// Pure reducer over the UI state. `leads` is the currently listed table
/// content; selection and template warnings are derived from it.
pub fn reduce(mut state: UiState, action: Action, leads: &[Lead]) -> UiState {
    match action {
        Action::ToggleLead(id) => {
            if !state.selected.remove(&id) {
                state.selected.insert(id);
            }
            state.template_warnings = warnings_for(&state, leads);
        }
        Action::ToggleAll => {
            if state.selected.len() == leads.len() {
                state.selected.clear();
            } else {
                state.selected = leads.iter().map(|lead| lead.id).collect();
            }
            state.template_warnings = warnings_for(&state, leads);
        }
        Action::OpenModal(modal) => {
            state.modal = Some(modal);
        }
        Action::CloseModal => {
            state.modal = None;
        }
        Action::EditTemplate(template) => {
            state.template = template;
            state.template_warnings = warnings_for(&state, leads);
        }
        Action::BatchDispatched { ops, done_notice } => {
            state.pending_ops = ops;
            state.batch_notice = Some(done_notice);
        }
        Action::OpSettled { error } => {
            if let Some(text) = error {
                state.notices.push(Notice {
                    kind: NoticeKind::Error,
                    text,
                });
            }
            state.pending_ops = state.pending_ops.saturating_sub(1);
            if state.pending_ops == 0 {
                if let Some(text) = state.batch_notice.take() {
                    state.notices.push(Notice {
                        kind: NoticeKind::Info,
                        text,
                    });
                }
                state.selected.clear();
                state.modal = None;
            }
        }
    }
    state
}

fn warnings_for(state: &UiState, leads: &[Lead]) -> Vec<String> {
    let selected: Vec<Lead> = leads
        .iter()
        .filter(|lead| state.selected.contains(&lead.id))
        .cloned()
        .collect();
    template_service::missing_field_report(&state.template, &selected)
}
