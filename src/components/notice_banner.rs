use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::{Notice, NoticeKind};

const SUCCESS_BG: Color = Color::Rgb(78, 205, 196);
const ERROR_BG: Color = Color::Rgb(255, 107, 107);
const BANNER_FG: Color = Color::Rgb(16, 26, 30);

pub struct NoticeBanner;

pub struct NoticeBannerProps<'a> {
    pub notice: Option<&'a Notice>,
}

impl Component<Action> for NoticeBanner {
    type Props<'a> = NoticeBannerProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(notice) = props.notice else {
            return;
        };
        let bg = match notice.kind {
            NoticeKind::Success => SUCCESS_BG,
            NoticeKind::Error => ERROR_BG,
        };
        let style = Style::default()
            .bg(bg)
            .fg(BANNER_FG)
            .add_modifier(Modifier::BOLD);
        let line = Line::from(notice.text.as_str()).centered();
        frame.render_widget(Paragraph::new(line).style(style), area);
    }
}
