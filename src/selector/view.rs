//! Selector view
//!
//! Projects selector state onto styled lines. Rendering never mutates the
//! selector, and the same state and size always produce the same lines;
//! ages are measured against the context clock, not the wall clock.

use super::dialog::{Dialog, DialogKind};
use super::editor::LineEditor;
use super::state::{FilteredEntry, Selector};
use super::theme::Theme;
use crate::entry::{DATE_PREFIX_LEN, Entry};
use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::collections::HashSet;

/// Rows taken by everything except the list itself
const CHROME_ROWS: usize = 8;
/// Fewest list rows shown, however small the terminal
const MIN_VISIBLE_ROWS: usize = 3;

const LIST_HINTS: &str =
    "↑/↓ Navigate  Enter Select  Ctrl-T New  Ctrl-G Graduate  Ctrl-D Delete  Ctrl-R Rename  Esc Cancel";
const DIALOG_HINTS: &str = "Enter Confirm  Esc Cancel";

/// Widget painting the selector over the whole area
pub struct SelectorView<'a> {
    selector: &'a Selector,
    theme: &'a Theme,
}

impl<'a> SelectorView<'a> {
    /// Create a new selector view
    #[must_use]
    pub const fn new(selector: &'a Selector, theme: &'a Theme) -> Self {
        Self { selector, theme }
    }
}

impl Widget for SelectorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = render_lines(self.selector, self.theme, area.width, area.height);
        Paragraph::new(lines).render(area, buf);
    }
}

/// Number of list rows that fit in `height`
#[must_use]
pub fn visible_rows(height: u16) -> usize {
    usize::from(height)
        .saturating_sub(CHROME_ROWS)
        .max(MIN_VISIBLE_ROWS)
}

/// First visible row so that `cursor` stays on screen
#[must_use]
pub const fn scroll_offset(cursor: usize, visible: usize) -> usize {
    (cursor + 1).saturating_sub(visible)
}

/// Render the selector into lines for an area of `width` x `height`
#[must_use]
pub fn render_lines(selector: &Selector, theme: &Theme, width: u16, height: u16) -> Vec<Line<'static>> {
    let painter = Painter {
        selector,
        theme,
        width,
    };

    match selector.mode().dialog() {
        Some((kind, dialog)) => painter.dialog(kind, dialog),
        None => painter.list(height),
    }
}

struct Painter<'a> {
    selector: &'a Selector,
    theme: &'a Theme,
    width: u16,
}

impl Painter<'_> {
    fn list(&self, height: u16) -> Vec<Line<'static>> {
        let theme = self.theme;
        let selector = self.selector;
        let mut lines = vec![
            Line::from(vec![
                Span::raw("  "),
                Span::styled("🏠 Try", theme.title_style()),
                Span::styled(" - Experiment Directory", theme.title_style()),
            ]),
            self.separator(),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("Search: ", theme.prompt_style()),
                Span::styled(selector.query().to_string(), theme.input_style()),
                Span::styled("█", theme.cursor_style()),
            ]),
            self.separator(),
        ];

        let visible = visible_rows(height);
        let total = selector.total_items();
        let start = scroll_offset(selector.cursor(), visible);
        let end = (start + visible).min(total);

        for row in start..end {
            let is_cursor = row == selector.cursor();
            let line = match selector.filtered().get(row) {
                Some(fe) => self.entry_row(fe, is_cursor),
                None => self.create_row(is_cursor),
            };
            lines.push(line);
        }
        for _ in end.saturating_sub(start)..visible {
            lines.push(Line::default());
        }

        lines.push(self.separator());
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(LIST_HINTS, theme.help_style()),
        ]));
        lines
    }

    fn entry_row(&self, fe: &FilteredEntry, is_cursor: bool) -> Line<'static> {
        let theme = self.theme;
        let Some(entry) = self.selector.entry(fe.index) else {
            return Line::default();
        };

        let mut spans = vec![self.arrow(is_cursor), Span::styled("📁 ", theme.folder_style())];

        let matched: HashSet<usize> = fe.positions.iter().copied().collect();
        let prefix_len = if entry.has_date && entry.name.chars().count() > DATE_PREFIX_LEN {
            DATE_PREFIX_LEN
        } else {
            0
        };
        let (date, rest) = split_chars(&entry.name, prefix_len);
        if !date.is_empty() {
            spans.push(Span::styled(date.to_string(), theme.date_style()));
        }
        spans.extend(self.highlight(rest, &matched, prefix_len));

        let age = format_age(entry.modified, self.selector.context().now);
        spans.push(Span::styled(
            format!("  {age}, {:.1}", fe.score),
            theme.meta_style(),
        ));
        if let Some(tag) = worktree_tag(entry) {
            spans.push(Span::styled(tag, theme.meta_style()));
        }

        let line = Line::from(spans);
        if is_cursor {
            line.style(theme.selected_style())
        } else {
            line
        }
    }

    /// Split `text` into runs of matched and unmatched characters
    ///
    /// `offset` is the character index of `text` within the full name.
    fn highlight(&self, text: &str, matched: &HashSet<usize>, offset: usize) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let mut run = String::new();
        let mut run_matched = false;

        for (i, c) in text.chars().enumerate() {
            let is_match = matched.contains(&(i + offset));
            if is_match != run_matched && !run.is_empty() {
                spans.push(self.name_span(std::mem::take(&mut run), run_matched));
            }
            run_matched = is_match;
            run.push(c);
        }
        if !run.is_empty() {
            spans.push(self.name_span(run, run_matched));
        }
        spans
    }

    fn name_span(&self, text: String, matched: bool) -> Span<'static> {
        let style = if matched {
            self.theme.match_style()
        } else {
            self.theme.name_style()
        };
        Span::styled(text, style)
    }

    fn create_row(&self, is_cursor: bool) -> Line<'static> {
        let theme = self.theme;
        let line = Line::from(vec![
            self.arrow(is_cursor),
            Span::styled("📂 ", theme.create_style()),
            Span::styled(
                format!("Create new: {}", self.selector.new_name()),
                theme.create_style(),
            ),
        ]);
        if is_cursor {
            line.style(theme.selected_style())
        } else {
            line
        }
    }

    fn arrow(&self, is_cursor: bool) -> Span<'static> {
        if is_cursor {
            Span::styled("→ ", self.theme.arrow_style())
        } else {
            Span::raw("  ")
        }
    }

    fn separator(&self) -> Line<'static> {
        let mut width = usize::from(self.width).saturating_sub(2);
        if width < 10 {
            width = 78;
        }
        Line::from(vec![
            Span::raw("  "),
            Span::styled("─".repeat(width), self.theme.separator_style()),
        ])
    }

    fn dialog(&self, kind: DialogKind, dialog: &Dialog) -> Vec<Line<'static>> {
        let theme = self.theme;
        let ctx = self.selector.context();
        let name = self
            .selector
            .entry(dialog.entry)
            .map(|e| e.name.clone())
            .unwrap_or_default();

        let (title, glyph_style, subtitle, hint, hint_style, prompt) = match kind {
            DialogKind::Graduate => (
                "🚀 Graduate",
                theme.folder_style(),
                " - Promote to Project",
                format!("Destination (projects: {})", ctx.projects_path.display()),
                theme.meta_style(),
                "Move to: ",
            ),
            DialogKind::Delete => (
                "🗑️  Delete",
                theme.delete_style(),
                " - Remove Directory",
                "⚠ This will permanently delete the directory and all its contents!".to_string(),
                theme.error_style(),
                "Type YES to confirm: ",
            ),
            DialogKind::Rename => (
                "✏️  Rename",
                theme.folder_style(),
                " - Rename Experiment",
                format!("Renaming inside {}", ctx.tries_path.display()),
                theme.meta_style(),
                "New name: ",
            ),
        };
        let title_style = match kind {
            DialogKind::Graduate => theme.graduate_style(),
            DialogKind::Delete => theme.delete_style(),
            DialogKind::Rename => theme.title_style(),
        };

        let mut input = vec![Span::raw("  "), Span::styled(prompt, theme.prompt_style())];
        input.extend(self.editor_spans(&dialog.editor));

        let mut lines = vec![
            Line::from(vec![
                Span::raw("  "),
                Span::styled(title, title_style),
                Span::styled(subtitle, theme.title_style()),
            ]),
            self.separator(),
            Line::default(),
            Line::from(vec![
                Span::raw("  "),
                Span::styled("📁 ", glyph_style),
                Span::styled(name, theme.name_style()),
            ]),
            Line::default(),
            Line::from(vec![Span::raw("  "), Span::styled(hint, hint_style)]),
            Line::default(),
            Line::from(input),
        ];

        if kind == DialogKind::Graduate {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("A symlink will be left in the tries directory", theme.meta_style()),
            ]));
        }

        if let Some(error) = &dialog.error {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("⚠ {error}"), theme.error_style()),
            ]));
        }

        lines.push(Line::default());
        lines.push(self.separator());
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(DIALOG_HINTS, theme.help_style()),
        ]));
        lines
    }

    fn editor_spans(&self, editor: &LineEditor) -> Vec<Span<'static>> {
        let theme = self.theme;
        let (before, under, after) = editor.split_at_cursor();
        let mut spans = vec![Span::styled(before.to_string(), theme.input_style())];
        match under {
            Some(c) => {
                spans.push(Span::styled(c.to_string(), theme.cursor_cell_style()));
                spans.push(Span::styled(after.to_string(), theme.input_style()));
            }
            None => spans.push(Span::styled("█", theme.cursor_style())),
        }
        spans
    }
}

/// Split `text` after its first `n` characters
fn split_chars(text: &str, n: usize) -> (&str, &str) {
    let at = text.char_indices().nth(n).map_or(text.len(), |(i, _)| i);
    text.split_at(at)
}

fn worktree_tag(entry: &Entry) -> Option<String> {
    if !entry.is_worktree {
        return None;
    }
    Some(match &entry.source_repo {
        Some(repo) => format!(" [wt: {repo}]"),
        None => " [wt]".to_string(),
    })
}

/// Human-relative age of `modified` as seen from `now`
#[must_use]
pub fn format_age(modified: DateTime<Local>, now: DateTime<Local>) -> String {
    let age = now.signed_duration_since(modified);
    let hours = age.num_hours();

    if hours < 1 {
        format!("{}m", age.num_minutes().max(0))
    } else if hours < 24 {
        format!("{hours}h")
    } else if hours < 24 * 7 {
        format!("{}d", age.num_days())
    } else if hours < 24 * 30 {
        format!("{}w", age.num_days() / 7)
    } else {
        modified.format("%b %d").to_string()
    }
}

/// Plain text of a line, for tests and snapshots
#[must_use]
pub fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

/// Concatenated text of every span in `line` styled with `style`
#[must_use]
pub fn styled_text(line: &Line<'_>, style: Style) -> String {
    line.spans
        .iter()
        .filter(|s| s.style == style)
        .map(|s| s.content.as_ref())
        .collect()
}
