//! Selector state machine
//!
//! Owns the entry snapshot, the ranked view derived from the query, the list
//! cursor and the current mode. Every input is handled to completion before
//! the next one; once an outcome is set the state is frozen.

use super::dialog::{self, Dialog, DialogKind};
use super::events::{EventResult, Input};
use super::outcome::Outcome;
use crate::entry::Entry;
use crate::fuzzy;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Environment the selector runs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorContext {
    /// Directory holding experiments; new ones are created here
    pub tries_path: PathBuf,
    /// Default parent for graduated projects
    pub projects_path: PathBuf,
    /// Home directory used to expand `~` in dialog input
    pub home: Option<PathBuf>,
    /// Clock reading taken when the selector starts
    pub now: DateTime<Local>,
}

impl SelectorContext {
    /// `YYYY-MM-DD` prefix for new experiments
    #[must_use]
    pub fn date_prefix(&self) -> String {
        self.now.format("%Y-%m-%d").to_string()
    }
}

/// An entry in the ranked view
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredEntry {
    /// Index into the selector's entry snapshot
    pub index: usize,
    /// Match score, or the recency score when the query is empty
    pub score: f64,
    /// Matched character positions in the entry name
    pub positions: Vec<usize>,
}

/// Current mode of the selector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing and filtering the list
    #[default]
    List,
    /// Choosing where to graduate an entry
    Graduate(Dialog),
    /// Confirming deletion of an entry
    Delete(Dialog),
    /// Choosing a new name for an entry
    Rename(Dialog),
}

impl Mode {
    fn open(kind: DialogKind, dialog: Dialog) -> Self {
        match kind {
            DialogKind::Graduate => Self::Graduate(dialog),
            DialogKind::Delete => Self::Delete(dialog),
            DialogKind::Rename => Self::Rename(dialog),
        }
    }

    /// The open dialog, if any
    #[must_use]
    pub const fn dialog(&self) -> Option<(DialogKind, &Dialog)> {
        match self {
            Self::List => None,
            Self::Graduate(d) => Some((DialogKind::Graduate, d)),
            Self::Delete(d) => Some((DialogKind::Delete, d)),
            Self::Rename(d) => Some((DialogKind::Rename, d)),
        }
    }

    const fn dialog_mut(&mut self) -> Option<(DialogKind, &mut Dialog)> {
        match self {
            Self::List => None,
            Self::Graduate(d) => Some((DialogKind::Graduate, d)),
            Self::Delete(d) => Some((DialogKind::Delete, d)),
            Self::Rename(d) => Some((DialogKind::Rename, d)),
        }
    }
}

/// What a dialog input led to
enum DialogAction {
    Stay,
    Ignore,
    Close,
    Finish(Outcome),
}

/// Interactive selector state
#[derive(Debug, Clone)]
pub struct Selector {
    entries: Vec<Entry>,
    filtered: Vec<FilteredEntry>,
    query: String,
    cursor: usize,
    show_create: bool,
    mode: Mode,
    outcome: Option<Outcome>,
    ctx: SelectorContext,
}

impl Selector {
    /// Create a selector over `entries` with an initial query
    #[must_use]
    pub fn new(entries: Vec<Entry>, query: impl Into<String>, ctx: SelectorContext) -> Self {
        let mut selector = Self {
            entries,
            filtered: Vec::new(),
            query: query.into(),
            cursor: 0,
            show_create: false,
            mode: Mode::List,
            outcome: None,
            ctx,
        };
        selector.refilter();
        selector
    }

    /// All entries, in snapshot order
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// The ranked view for the current query
    #[must_use]
    pub fn filtered(&self) -> &[FilteredEntry] {
        &self.filtered
    }

    /// Current query
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Cursor row in the view
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current mode
    #[must_use]
    pub const fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Run context
    #[must_use]
    pub const fn context(&self) -> &SelectorContext {
        &self.ctx
    }

    /// Outcome, once one has been produced
    #[must_use]
    pub const fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Whether the run is over
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Hand the outcome to the caller
    #[must_use]
    pub fn into_outcome(self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the synthetic "create new" row is shown
    #[must_use]
    pub const fn show_create(&self) -> bool {
        self.show_create
    }

    /// Rows in the view, including the create row
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.filtered.len() + self.show_create as usize
    }

    /// Whether the cursor sits on the create row
    #[must_use]
    pub const fn is_create_selected(&self) -> bool {
        self.show_create && self.cursor == self.filtered.len()
    }

    /// Name a new experiment would get: `{today}-{query}`
    #[must_use]
    pub fn new_name(&self) -> String {
        format!("{}-{}", self.ctx.date_prefix(), self.query)
    }

    /// Entry at `index` in the snapshot
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Snapshot index of the entry under the cursor
    ///
    /// `None` when the create row is selected or the view is empty.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        if self.is_create_selected() {
            return None;
        }
        self.filtered.get(self.cursor).map(|fe| fe.index)
    }

    /// Handle one input
    pub fn handle(&mut self, input: Input) -> EventResult {
        if self.outcome.is_some() {
            return EventResult::Ignored;
        }

        match self.mode {
            Mode::List => self.handle_list(input),
            Mode::Graduate(_) | Mode::Delete(_) | Mode::Rename(_) => self.handle_dialog(input),
        }
    }

    fn handle_list(&mut self, input: Input) -> EventResult {
        match input {
            Input::Cancel => self.finish(Outcome::Cancel),
            Input::Confirm => self.confirm_selection(),
            Input::Create => self.create_new(),
            Input::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                EventResult::Continue
            }
            Input::Down => {
                if self.cursor + 1 < self.total_items() {
                    self.cursor += 1;
                }
                EventResult::Continue
            }
            Input::Char(c) => {
                self.query.push(c);
                self.refilter();
                EventResult::Continue
            }
            Input::Backspace => {
                if self.query.pop().is_none() {
                    return EventResult::Ignored;
                }
                self.refilter();
                EventResult::Continue
            }
            Input::Graduate => self.enter_dialog(DialogKind::Graduate),
            Input::Delete => self.enter_dialog(DialogKind::Delete),
            Input::Rename => self.enter_dialog(DialogKind::Rename),
            Input::Left
            | Input::Right
            | Input::Home
            | Input::End
            | Input::KillToEnd
            | Input::DeleteWord => EventResult::Ignored,
        }
    }

    fn confirm_selection(&mut self) -> EventResult {
        match self.selected_index() {
            Some(index) => {
                let path = self.entries[index].path.clone();
                self.finish(Outcome::Cd(path))
            }
            None => self.create_new(),
        }
    }

    fn create_new(&mut self) -> EventResult {
        if self.query.is_empty() {
            return self.finish(Outcome::Cancel);
        }
        let path = self.ctx.tries_path.join(self.new_name());
        self.finish(Outcome::Mkdir(path))
    }

    fn enter_dialog(&mut self, kind: DialogKind) -> EventResult {
        let Some(index) = self.selected_index() else {
            return EventResult::Ignored;
        };

        let dialog = dialog::open(kind, index, &self.entries[index], &self.ctx);
        tracing::debug!(?kind, entry = %self.entries[index].name, "dialog opened");
        self.mode = Mode::open(kind, dialog);
        EventResult::Continue
    }

    fn handle_dialog(&mut self, input: Input) -> EventResult {
        let action = {
            let Some((kind, dialog)) = self.mode.dialog_mut() else {
                return EventResult::Ignored;
            };
            match input {
                Input::Cancel => DialogAction::Close,
                Input::Confirm => {
                    let entry = &self.entries[dialog.entry];
                    match dialog::validate(kind, dialog.editor.text(), entry, &self.ctx) {
                        Ok(outcome) => DialogAction::Finish(outcome),
                        Err(message) => {
                            tracing::debug!(?kind, %message, "dialog validation failed");
                            dialog.error = Some(message);
                            DialogAction::Stay
                        }
                    }
                }
                other => edit_dialog(kind, dialog, other),
            }
        };

        match action {
            DialogAction::Stay => EventResult::Continue,
            DialogAction::Ignore => EventResult::Ignored,
            DialogAction::Close => {
                self.mode = Mode::List;
                tracing::debug!("dialog closed");
                EventResult::Continue
            }
            DialogAction::Finish(outcome) => self.finish(outcome),
        }
    }

    fn finish(&mut self, outcome: Outcome) -> EventResult {
        tracing::debug!(action = outcome.action(), "selector finished");
        self.outcome = Some(outcome);
        EventResult::Finished
    }

    /// Recompute the ranked view from the snapshot and clamp the cursor
    fn refilter(&mut self) {
        if self.query.is_empty() {
            let now = self.ctx.now;
            self.filtered = self
                .entries
                .iter()
                .enumerate()
                .map(|(index, entry)| FilteredEntry {
                    index,
                    score: entry.recency_score(now),
                    positions: Vec::new(),
                })
                .collect();
            self.show_create = false;
        } else {
            let names: Vec<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
            self.filtered = fuzzy::search(&self.query, &names)
                .into_iter()
                .map(|m| FilteredEntry {
                    index: m.index,
                    score: m.score,
                    positions: m.positions,
                })
                .collect();

            let new_name = self.new_name();
            self.show_create = !self.entries.iter().any(|e| e.name == new_name);
        }

        self.cursor = self.cursor.min(self.total_items().saturating_sub(1));
    }
}

/// Apply an editing input to an open dialog
fn edit_dialog(kind: DialogKind, dialog: &mut Dialog, input: Input) -> DialogAction {
    let editor = &mut dialog.editor;
    let full = kind.full_editing();

    let mutated = match input {
        Input::Char(c) => {
            editor.insert_char(c);
            true
        }
        Input::Backspace => editor.backspace(),
        Input::KillToEnd if full => editor.kill_to_end(),
        Input::DeleteWord if full => editor.delete_word_backwards(),
        Input::Left if full => {
            editor.cursor_left();
            false
        }
        Input::Right if full => {
            editor.cursor_right();
            false
        }
        Input::Home if full => {
            editor.cursor_home();
            false
        }
        Input::End if full => {
            editor.cursor_end();
            false
        }
        _ => return DialogAction::Ignore,
    };

    if mutated {
        dialog.error = None;
    }
    DialogAction::Stay
}
