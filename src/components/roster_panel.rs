use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::state::{Creature, TEAM_CAPACITY};
use crate::view;

const CARD_BORDER: Color = Color::Rgb(74, 98, 82);
const CARD_SELECTED: Color = Color::Rgb(222, 196, 120);
const TEXT_DIM: Color = Color::Rgb(140, 150, 140);
const POWER: Color = Color::Rgb(104, 204, 120);
const CARDS_PER_ROW: usize = 3;

pub struct RosterPanel;

pub struct RosterPanelProps<'a> {
    pub roster: &'a [Creature],
    /// Battle enablement per roster entry
    pub battle_enabled: &'a [bool],
    pub selected: usize,
    pub team_size: usize,
}

impl Component<Action> for RosterPanel {
    type Props<'a> = RosterPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let title = format!(" Team {} ", view::team_counter(props.team_size));
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(CARD_BORDER))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if props.roster.is_empty() {
            let hint = Line::from(Span::styled(
                "No Pokemon yet. Press c to catch one.",
                Style::default().fg(TEXT_DIM),
            ))
            .centered();
            frame.render_widget(Paragraph::new(hint), inner);
            return;
        }

        let rows = props.roster.len().min(TEAM_CAPACITY).div_ceil(CARDS_PER_ROW);
        let row_areas = Layout::vertical(vec![Constraint::Fill(1); rows]).split(inner);
        for (row, chunk) in props.roster.chunks(CARDS_PER_ROW).enumerate() {
            let Some(row_area) = row_areas.get(row) else {
                break;
            };
            let cells =
                Layout::horizontal(vec![Constraint::Fill(1); CARDS_PER_ROW]).split(*row_area);
            for (creature, cell) in chunk.iter().zip(cells.iter()) {
                let enabled = props
                    .battle_enabled
                    .get(creature.index)
                    .copied()
                    .unwrap_or(false);
                render_card(
                    frame,
                    *cell,
                    creature,
                    enabled,
                    creature.index == props.selected,
                );
            }
        }
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    creature: &Creature,
    enabled: bool,
    selected: bool,
) {
    let border = if selected { CARD_SELECTED } else { CARD_BORDER };
    let block = Block::bordered()
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", creature.name),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_width = creature
        .stats
        .iter()
        .map(|stat| stat.label.len())
        .max()
        .unwrap_or(0);

    // Power and button first so small terminals clip stats, not controls
    let mut lines = Vec::with_capacity(creature.stats.len() + 3);
    lines.push(Line::from(Span::styled(
        view::total_power_label(creature.power),
        Style::default().fg(POWER).add_modifier(Modifier::BOLD),
    )));
    lines.push(battle_button(creature.index, enabled));
    for stat in &creature.stats {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<label_width$} ", stat.label)),
            Span::styled(
                stat.value.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    let sprite = creature.sprite.as_deref().map(view::sprite_label).unwrap_or("-");
    lines.push(Line::from(Span::styled(
        format!("sprite: {sprite}"),
        Style::default().fg(TEXT_DIM),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn battle_button(index: usize, enabled: bool) -> Line<'static> {
    let text = format!("[{}] Battle!", index + 1);
    let style = if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(CARD_SELECTED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(TEXT_DIM)
            .add_modifier(Modifier::CROSSED_OUT)
    };
    Line::from(Span::styled(text, style))
}
