use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Wrap},
};

use super::Component;
use crate::action::Action;
use crate::state::{BattleView, Combatant};
use crate::view;

const PANEL_BORDER: Color = Color::Rgb(222, 196, 120);
const PLAYER: Color = Color::Rgb(104, 204, 120);
const OPPONENT: Color = Color::Rgb(255, 107, 107);
const TEXT_DIM: Color = Color::Rgb(140, 150, 140);

/// Player and opponent side by side under the battle message
pub struct BattlePanel;

pub struct BattlePanelProps<'a> {
    pub battle: &'a BattleView,
}

impl Component<Action> for BattlePanel {
    type Props<'a> = BattlePanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(PANEL_BORDER))
            .title(" Battle ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Message
            Constraint::Min(1),    // Combatants
        ])
        .split(inner);

        let message = Line::from(Span::styled(
            props.battle.message.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(message).wrap(Wrap { trim: true }), chunks[0]);

        let sides = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .split(chunks[1]);
        render_side(frame, sides[0], &props.battle.player, PLAYER);
        frame.render_widget(Paragraph::new(Line::from("VS").centered()), sides[1]);
        render_side(frame, sides[2], &props.battle.opponent, OPPONENT);
    }
}

fn render_side(frame: &mut Frame, area: Rect, combatant: &Combatant, accent: Color) {
    let lines = vec![
        Line::from(Span::styled(
            combatant.name.as_str(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(combatant.power_label()).centered(),
        Line::from(Span::styled(
            view::sprite_label(&combatant.sprite),
            Style::default().fg(TEXT_DIM),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
