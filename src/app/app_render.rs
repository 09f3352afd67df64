use std::mem;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_textarea::TextArea;
use unicode_width::UnicodeWidthChar;

use super::app_state::App;
use crate::api::CommandKind;
use crate::highlight::{Segment, highlight_query};
use crate::panel::Mode;
use crate::widgets::popup;

const IDLE_HINT: &str = "Type a word and press Enter to search";
const RESULTS_HINT: &str = "Enter: search | Ctrl+R: replace | Ctrl+D: delete | Esc: quit";
const REPLACE_HINT: &str = "Enter: replace | Esc: back";
const DONE_HINT: &str = "Enter/Esc: new search";

const DELETE_POPUP_WIDTH: u16 = 60;
const DELETE_POPUP_HEIGHT: u16 = 8;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Menu ")
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(frame.area());
        frame.render_widget(block, frame.area());

        let [input_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_search_input(frame, input_area);

        match self.panel.mode.clone() {
            Mode::Idle => render_hint(frame, body_area, IDLE_HINT),
            Mode::ShowingResults => self.render_results(frame, body_area),
            Mode::ReplaceForm => self.render_replace_form(frame, body_area),
            Mode::DeleteConfirm => {
                self.render_results(frame, body_area);
                self.render_delete_popup(frame, body_area);
            }
            Mode::ReplaceDone { old_word, new_word } => {
                let message = format!("Replaced \"{}\" with \"{}\".", old_word, new_word);
                self.render_done(frame, body_area, message);
            }
            Mode::DeleteDone { word } => {
                let message = format!("Deleted sentences with words similar to \"{}\".", word);
                self.render_done(frame, body_area, message);
            }
        }

        self.render_status(frame, status_area);
    }

    fn render_search_input(&mut self, frame: &mut Frame, area: Rect) {
        let enabled = self.panel.mode.accepts_query_input();
        set_input_style(&mut self.search_input, " Search ", enabled);
        frame.render_widget(&self.search_input, area);
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let [list_area, hint_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

        let mut lines: Vec<Line> = Vec::new();
        if let Some(error) = &self.panel.error {
            lines.push(Line::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ));
        }
        if self.panel.shows_no_results_notice() {
            lines.push(Line::styled(
                "No results found",
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.extend(
            self.panel
                .results
                .iter()
                .map(|sentence| highlighted_line(sentence, &self.panel.query)),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Results ({}) ", self.panel.result_count))
            .border_style(Style::default().fg(Color::DarkGray));

        let viewport = block.inner(list_area);
        let lines: Vec<Line> = lines
            .into_iter()
            .flat_map(|line| wrap_line(line, viewport.width))
            .collect();
        self.results_scroll
            .update_bounds(lines.len() as u32, viewport.height);

        let paragraph = Paragraph::new(lines)
            .block(block)
            .scroll((self.results_scroll.offset, 0));
        frame.render_widget(paragraph, list_area);

        if self.panel.mode == Mode::ShowingResults {
            render_hint(frame, hint_area, RESULTS_HINT);
        }
    }

    fn render_replace_form(&mut self, frame: &mut Frame, area: Rect) {
        let [info_area, input_area, error_area, _, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let info = Line::from(vec![
            Span::raw("Replace "),
            Span::styled(
                format!("\"{}\"", self.panel.query),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" in {} results", self.panel.result_count)),
        ]);
        frame.render_widget(Paragraph::new(info), info_area);

        let enabled = !self.panel.is_busy();
        set_input_style(&mut self.replace_input, " Replace with ", enabled);
        frame.render_widget(&self.replace_input, input_area);

        if let Some(error) = &self.panel.error {
            let error = Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red));
            frame.render_widget(error, error_area);
        }

        render_hint(frame, hint_area, REPLACE_HINT);
    }

    fn render_delete_popup(&self, frame: &mut Frame, area: Rect) {
        let popup_area = popup::centered_popup(area, DELETE_POPUP_WIDTH, DELETE_POPUP_HEIGHT);
        popup::clear_area(frame, popup_area);

        let mut lines = vec![
            Line::from(vec![
                Span::raw("Delete sentences with words similar to "),
                Span::styled(
                    format!("\"{}\"", self.panel.query),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("?"),
            ]),
            Line::from(format!("{} results matched", self.panel.result_count)),
        ];
        if let Some(error) = &self.panel.error {
            lines.push(Line::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            ));
        }
        lines.push(Line::default());
        lines.push(Line::styled(
            "y: delete | n: cancel",
            Style::default().fg(Color::DarkGray),
        ));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Delete ")
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }

    fn render_done(&self, frame: &mut Frame, area: Rect, message: String) {
        let lines = vec![
            Line::styled(message, Style::default().fg(Color::Green)),
            Line::default(),
            Line::styled(DONE_HINT, Style::default().fg(Color::DarkGray)),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let status = match self.panel.busy_with() {
            Some(CommandKind::Search) => Some("Searching..."),
            Some(CommandKind::Replace) => Some("Replacing..."),
            Some(CommandKind::Delete) => Some("Deleting..."),
            None => self.notice.as_deref(),
        };

        if let Some(status) = status {
            let line = Paragraph::new(status).style(Style::default().fg(Color::Yellow));
            frame.render_widget(line, area);
        }
    }
}

/// One result sentence with the query parts in bold yellow
fn highlighted_line(sentence: &str, query: &str) -> Line<'static> {
    let emphasis = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let spans: Vec<Span<'static>> = highlight_query(sentence, query)
        .into_iter()
        .map(|segment| match segment {
            Segment::Plain(text) => Span::raw(text),
            Segment::Emphasis(text) => Span::styled(text, emphasis),
        })
        .collect();
    Line::from(spans)
}

/// Break a styled line into rows at most `width` cells wide
///
/// Rows break after the last space that fits; a word wider than the row is
/// split. Span styles carry over to every row they touch.
fn wrap_line(line: Line<'static>, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width);
    let cells: Vec<(char, Style)> = line
        .spans
        .iter()
        .flat_map(|span| span.content.chars().map(move |c| (c, span.style)))
        .collect();
    if width == 0 || cells.is_empty() {
        return vec![line];
    }

    let mut rows = Vec::new();
    let mut start = 0;
    while start < cells.len() {
        let mut end = start;
        let mut row_width = 0;
        let mut last_space = None;

        while end < cells.len() {
            let char_width = cells[end].0.width().unwrap_or(0);
            if row_width + char_width > width && end > start {
                break;
            }
            row_width += char_width;
            if cells[end].0 == ' ' {
                last_space = Some(end);
            }
            end += 1;
        }

        if end < cells.len()
            && cells[end].0 != ' '
            && let Some(space) = last_space
        {
            end = space + 1;
        }

        rows.push(styled_row(&cells[start..end], line.style));
        start = end;
    }
    rows
}

/// Rebuild spans from per-character styles
fn styled_row(cells: &[(char, Style)], line_style: Style) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut text = String::new();
    let mut current: Option<Style> = None;

    for &(c, style) in cells {
        if let Some(previous) = current
            && previous != style
        {
            spans.push(Span::styled(mem::take(&mut text), previous));
        }
        current = Some(style);
        text.push(c);
    }
    if let Some(style) = current {
        spans.push(Span::styled(text, style));
    }

    Line::from(spans).style(line_style)
}

fn render_hint(frame: &mut Frame, area: Rect, hint: &str) {
    let hint = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, area);
}

fn set_input_style(textarea: &mut TextArea<'static>, title: &'static str, enabled: bool) {
    let (border_color, cursor_style) = if enabled {
        (Color::Cyan, Style::default().add_modifier(Modifier::REVERSED))
    } else {
        (Color::DarkGray, Style::default())
    };

    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color)),
    );
    textarea.set_cursor_style(cursor_style);
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
