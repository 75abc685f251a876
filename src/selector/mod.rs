//! Interactive experiment selector
//!
//! A single-threaded state machine that filters entries with the fuzzy
//! matcher as the query changes and collects confirmation text for the
//! graduate, delete and rename dialogs. It yields exactly one [`Outcome`].
//!
//! # Architecture
//!
//! ```text
//!   crossterm KeyEvent
//!          │ events::translate
//!          ▼
//!       Input ──► Selector::handle ──► Outcome
//!                      │
//!                      ▼
//!             view::render_lines ──► ratatui Lines
//! ```
//!
//! The state machine and the view never touch the terminal; only
//! [`terminal::run`] does. Dialog validation reads the filesystem to check
//! that paths exist and nothing else.

pub mod dialog;
pub mod editor;
mod events;
mod outcome;
mod state;
pub mod terminal;
mod theme;
pub mod view;

pub use dialog::{Dialog, DialogKind};
pub use editor::LineEditor;
pub use events::{EventResult, Input, translate};
pub use outcome::Outcome;
pub use state::{FilteredEntry, Mode, Selector, SelectorContext};
pub use theme::Theme;
pub use view::{SelectorView, render_lines};
