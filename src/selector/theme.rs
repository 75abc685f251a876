//! Color theme for the selector
//!
//! Colors are 256-color palette indices so the selector looks the same on
//! any terminal that supports them.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the selector view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Header title
    pub title: Color,
    /// Horizontal separators
    pub separator: Color,
    /// `Search:` and dialog prompts
    pub prompt: Color,
    /// Typed text
    pub input: Color,
    /// Text cursor block
    pub cursor: Color,
    /// Background of the row under the cursor
    pub selection_bg: Color,
    /// `→` marker on the cursor row
    pub arrow: Color,
    /// Folder glyph
    pub folder: Color,
    /// Date prefix of entry names
    pub date: Color,
    /// Entry names
    pub name: Color,
    /// Matched characters in entry names
    pub match_highlight: Color,
    /// Age, score and worktree annotations
    pub meta: Color,
    /// The "create new" row
    pub create: Color,
    /// Footer key hints
    pub help: Color,
    /// Graduate dialog title
    pub graduate: Color,
    /// Validation errors and warnings
    pub error: Color,
    /// Delete dialog title and glyph
    pub delete: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            title: Color::Indexed(114),
            separator: Color::Indexed(240),
            prompt: Color::Indexed(244),
            input: Color::Indexed(255),
            cursor: Color::Indexed(214),
            selection_bg: Color::Indexed(238),
            arrow: Color::Indexed(214),
            folder: Color::Indexed(220),
            date: Color::Indexed(245),
            name: Color::Indexed(255),
            match_highlight: Color::Indexed(226),
            meta: Color::Indexed(245),
            create: Color::Indexed(114),
            help: Color::Indexed(244),
            graduate: Color::Indexed(208),
            error: Color::Indexed(196),
            delete: Color::Indexed(196),
        }
    }

    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.title).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn separator_style(&self) -> Style {
        Style::default().fg(self.separator)
    }

    #[must_use]
    pub fn prompt_style(&self) -> Style {
        Style::default().fg(self.prompt)
    }

    #[must_use]
    pub fn input_style(&self) -> Style {
        Style::default().fg(self.input).add_modifier(Modifier::BOLD)
    }

    /// Style for the text cursor cell
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default().fg(self.cursor)
    }

    /// Style for a character under the text cursor
    #[must_use]
    pub fn cursor_cell_style(&self) -> Style {
        Style::default()
            .fg(self.input)
            .bg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style laid over the whole cursor row
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default().bg(self.selection_bg)
    }

    #[must_use]
    pub fn arrow_style(&self) -> Style {
        Style::default().fg(self.arrow).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn folder_style(&self) -> Style {
        Style::default().fg(self.folder)
    }

    #[must_use]
    pub fn date_style(&self) -> Style {
        Style::default().fg(self.date)
    }

    #[must_use]
    pub fn name_style(&self) -> Style {
        Style::default().fg(self.name)
    }

    /// Style for matched characters in fuzzy search
    #[must_use]
    pub fn match_style(&self) -> Style {
        Style::default()
            .fg(self.match_highlight)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn meta_style(&self) -> Style {
        Style::default().fg(self.meta)
    }

    #[must_use]
    pub fn create_style(&self) -> Style {
        Style::default().fg(self.create)
    }

    #[must_use]
    pub fn help_style(&self) -> Style {
        Style::default().fg(self.help)
    }

    #[must_use]
    pub fn graduate_style(&self) -> Style {
        Style::default().fg(self.graduate).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    #[must_use]
    pub fn delete_style(&self) -> Style {
        Style::default().fg(self.delete).add_modifier(Modifier::BOLD)
    }
}
