use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::Component;
use crate::action::Action;
use crate::api::{format_dex_number, type_color};
use crate::state::DetailView;

const BG_MODAL: Color = Color::Rgb(20, 32, 46);
const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);

/// Moves shown before the list is truncated to a remainder count.
const MOVES_SHOWN: usize = 12;

pub struct DetailOverlayProps<'a> {
    pub detail: &'a DetailView,
    pub is_focused: bool,
}

/// Modal overlay for one dex entry
pub struct DetailOverlay {
    modal: Modal,
}

impl Default for DetailOverlay {
    fn default() -> Self {
        Self { modal: Modal::new() }
    }
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for DetailOverlay {
    type Props<'a> = DetailOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::ModalClose),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DetailOverlayProps<'_>) {
        if area.width < 30 || area.height < 10 {
            return;
        }

        let detail = props.detail;
        let modal_area = centered_rect(60, 16, area);
        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let body = Paragraph::new(detail_lines(detail)).wrap(Wrap { trim: true });
            frame.render_widget(body, content_area);
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: ModalStyle {
                    base: BaseStyle {
                        bg: Some(BG_MODAL),
                        padding: Padding::all(1),
                        border: None,
                        fg: None,
                    },
                    ..Default::default()
                },
                behavior: ModalBehavior::default(),
                on_close: || Action::ModalClose,
                render_content: &mut render_content,
            },
        );
    }
}

fn detail_lines(detail: &DetailView) -> Vec<Line<'static>> {
    let mut header = vec![
        Span::styled(
            format_dex_number(detail.id),
            Style::default().fg(ACCENT_GOLD),
        ),
        Span::raw(" "),
        Span::styled(
            detail.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    for type_name in &detail.types {
        header.push(Span::styled(
            format!("  {type_name}"),
            Style::default().fg(type_color(type_name)),
        ));
    }

    let abilities = if detail.abilities.is_empty() {
        Line::from(Span::styled("—", Style::default().fg(TEXT_DIM)))
    } else {
        Line::from(Span::raw(detail.abilities.join(" · ")))
    };

    vec![
        Line::from(header),
        Line::default(),
        Line::from(Span::styled(
            format!(
                "Height {:.1} m   Weight {:.1} kg",
                f32::from(detail.height) / 10.0,
                f32::from(detail.weight) / 10.0,
            ),
            Style::default().fg(TEXT_DIM),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Abilities",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        abilities,
        Line::default(),
        Line::from(Span::styled(
            "Moves",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(truncated_moves(&detail.moves))),
        Line::default(),
        Line::from(Span::styled("esc close", Style::default().fg(TEXT_DIM))),
    ]
}

fn truncated_moves(moves: &[String]) -> String {
    if moves.is_empty() {
        return "—".to_string();
    }
    let shown = moves.iter().take(MOVES_SHOWN).cloned().collect::<Vec<_>>();
    let mut text = shown.join(", ");
    let remainder = moves.len().saturating_sub(MOVES_SHOWN);
    if remainder > 0 {
        text.push_str(&format!(" (+{remainder} more)"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail() -> DetailView {
        DetailView {
            id: 25,
            name: "Pikachu".to_string(),
            image: None,
            types: vec!["Electric".to_string()],
            height: 4,
            weight: 60,
            abilities: vec!["Static".to_string(), "Lightning rod".to_string()],
            moves: (1..=20).map(|n| format!("Move {n}")).collect(),
        }
    }

    #[test]
    fn test_escape_closes_modal() {
        let mut component = DetailOverlay::new();
        let view = detail();
        let esc = EventKind::Key(crossterm::event::KeyEvent::from(KeyCode::Esc));

        let actions: Vec<_> = component
            .handle_event(
                &esc,
                DetailOverlayProps {
                    detail: &view,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::ModalClose]);
    }

    #[test]
    fn test_unfocused_ignores_close_keys() {
        let mut component = DetailOverlay::new();
        let view = detail();
        let esc = EventKind::Key(crossterm::event::KeyEvent::from(KeyCode::Esc));

        let actions: Vec<_> = component
            .handle_event(
                &esc,
                DetailOverlayProps {
                    detail: &view,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_moves_truncated_with_remainder() {
        let text = truncated_moves(&(1..=20).map(|n| format!("Move {n}")).collect::<Vec<_>>());
        assert!(text.contains("Move 12"));
        assert!(!text.contains("Move 13,"));
        assert!(text.ends_with("(+8 more)"));
    }

    #[test]
    fn test_no_moves_renders_placeholder() {
        assert_eq!(truncated_moves(&[]), "—");
    }

    #[test]
    fn test_no_abilities_renders_placeholder() {
        let mut view = detail();
        view.abilities.clear();

        let lines = detail_lines(&view);
        let abilities_line = &lines[5];
        assert_eq!(abilities_line.spans.len(), 1);
        assert_eq!(abilities_line.spans[0].content, "—");
    }

    #[test]
    fn test_abilities_joined_with_separator() {
        let lines = detail_lines(&detail());
        assert_eq!(lines[5].spans[0].content, "Static · Lightning rod");
    }
}
