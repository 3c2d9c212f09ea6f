use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::Component;
use crate::action::Action;
use crate::api::{format_dex_number, type_color};
use crate::state::{AppState, SummaryView};

const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
const ERROR_RED: Color = Color::Rgb(224, 108, 100);

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// Props for DexList - read-only view of state
pub struct DexListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Paginated dex list with a status-bar footer
#[derive(Default)]
pub struct DexList;

impl Component<Action> for DexList {
    type Props<'a> = DexListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let state = props.state;
        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    Some(Action::CursorSet(state.cursor.saturating_sub(1)))
                }
                KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorSet(state.cursor + 1)),
                KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => Some(Action::PagePrev),
                KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => Some(Action::PageNext),
                KeyCode::Enter => state.current_item().map(|item| Action::DetailFetch(item.id)),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DexListProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // List body
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        render_header(frame, chunks[0], state, props.is_focused);
        render_body(frame, chunks[1], state);

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("↑↓", "select"),
                    StatusBarHint::new("←→", "page"),
                    StatusBarHint::new("enter", "details"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, is_focused: bool) {
    let border_color = if is_focused { ACCENT_GOLD } else { TEXT_DIM };
    let page_info = if state.dex.is_loaded() {
        format!(
            "Page {}/{} · {} entries",
            state.current_page,
            state.total_pages(),
            state.items().len()
        )
    } else {
        String::new()
    };

    let title = Line::from(vec![
        Span::styled(
            "KANTODEX",
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(page_info, Style::default().fg(TEXT_DIM)),
    ]);

    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(header, area);
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.dex.is_loading() {
        let frame_index = (state.tick as usize) % SPINNER_FRAMES.len();
        let line = Line::from(vec![
            Span::styled(SPINNER_FRAMES[frame_index], Style::default().fg(ACCENT_GOLD)),
            Span::raw(" Loading dex..."),
        ]);
        let loading = Paragraph::new(line).alignment(Alignment::Center);
        frame.render_widget(loading, area);
        return;
    }

    if let Some(error) = state.dex.error() {
        let lines = vec![
            Line::from(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "The dex could not be loaded this session.",
                Style::default().fg(TEXT_DIM),
            )),
        ];
        let banner = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(banner, area);
        return;
    }

    if state.dex.is_empty() {
        let idle = Paragraph::new(Line::from(Span::styled(
            "Waiting for dex load...",
            Style::default().fg(TEXT_DIM),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(idle, area);
        return;
    }

    let lines: Vec<Line> = state
        .page_items()
        .iter()
        .enumerate()
        .map(|(index, item)| entry_line(item, index == state.cursor, state.is_detail_loading))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn entry_line(item: &SummaryView, is_selected: bool, detail_loading: bool) -> Line<'static> {
    let marker = if is_selected { "▸ " } else { "  " };
    let mut spans = vec![
        Span::raw(marker.to_string()),
        Span::styled(
            format_dex_number(item.id),
            Style::default().fg(ACCENT_GOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{:<14}", item.name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    for type_name in &item.types {
        spans.push(Span::styled(
            format!(" {type_name}"),
            Style::default().fg(type_color(type_name)),
        ));
    }
    if is_selected && detail_loading {
        spans.push(Span::styled("  …", Style::default().fg(TEXT_DIM)));
    }

    let line = Line::from(spans);
    if is_selected {
        line.style(Style::default().bg(BG_HIGHLIGHT))
    } else {
        line
    }
}
