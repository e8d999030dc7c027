use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    BattlePanel, BattlePanelProps, Component, NoticeBanner, NoticeBannerProps, RosterPanel,
    RosterPanelProps,
};
use crate::action::Action;
use crate::state::AppState;
use crate::view;

const TITLE: Color = Color::Rgb(222, 196, 120);
const TEXT_DIM: Color = Color::Rgb(140, 150, 140);

/// Props for GameScreen - read-only view of state
pub struct GameScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Root component: header, notice, roster, battle panel and key hints
#[derive(Default)]
pub struct GameScreen;

impl Component<Action> for GameScreen {
    type Props<'a> = GameScreenProps<'a>;

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
                KeyCode::Char('s') => Some(Action::SessionStart),
                KeyCode::Char('c') => Some(Action::CatchAttempt),
                KeyCode::Char('r') => Some(Action::TeamSync),
                KeyCode::Char(digit @ '1'..='6') => {
                    Some(Action::BattleStart(digit as usize - '1' as usize))
                }
                KeyCode::Right | KeyCode::Char('l') => Some(Action::RosterSelectNext),
                KeyCode::Left | KeyCode::Char('h') => Some(Action::RosterSelectPrev),
                KeyCode::Enter | KeyCode::Char('b') => Some(Action::RosterConfirm),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: GameScreenProps<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(2), // Header
            Constraint::Length(1), // Notice
            Constraint::Min(1),    // Roster + battle
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        render_header(frame, chunks[0], state);

        NoticeBanner.render(
            frame,
            chunks[1],
            NoticeBannerProps {
                notice: state.notice.as_ref(),
            },
        );

        let body = match &state.battle {
            Some(battle) => {
                let parts =
                    Layout::vertical([Constraint::Min(1), Constraint::Length(7)]).split(chunks[2]);
                BattlePanel.render(frame, parts[1], BattlePanelProps { battle });
                parts[0]
            }
            None => chunks[2],
        };

        RosterPanel.render(
            frame,
            body,
            RosterPanelProps {
                roster: &state.roster,
                battle_enabled: &state.affordances.battle,
                selected: state.selected,
                team_size: state.team_size,
            },
        );

        let hints = status_hints(state);
        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let session = match (&state.session, state.game_over) {
        (None, _) => "no session".to_string(),
        (Some(_), true) => "game over".to_string(),
        (Some(id), false) => format!("session {}", short_id(id)),
    };
    let title = Line::from(vec![
        Span::styled(
            "Pokemon Battle",
            Style::default().fg(TITLE).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("Score: {}", state.score), Style::default()),
        Span::raw("  "),
        Span::raw(view::team_counter(state.team_size)),
    ])
    .centered();
    let subtitle = Line::from(Span::styled(
        format!("{} | {}", state.server, session),
        Style::default().fg(TEXT_DIM),
    ))
    .centered();
    frame.render_widget(Paragraph::new(vec![title, subtitle]), area);
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Hints for the controls that are enabled right now
fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    let affordances = &state.affordances;
    let mut hints = Vec::new();
    if affordances.start {
        hints.push(StatusBarHint::new("s", "start"));
    }
    if affordances.catch {
        hints.push(StatusBarHint::new("c", "catch"));
    }
    if affordances.battle.iter().any(|enabled| *enabled) {
        hints.push(StatusBarHint::new("1-6", "battle"));
        hints.push(StatusBarHint::new("←/→", "select"));
    }
    if affordances.sync {
        hints.push(StatusBarHint::new("r", "sync"));
    }
    hints.push(StatusBarHint::new("q", "quit"));
    hints
}
