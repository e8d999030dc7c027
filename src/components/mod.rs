pub mod battle_panel;
pub mod game_screen;
pub mod notice_banner;
pub mod roster_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use battle_panel::{BattlePanel, BattlePanelProps};
pub use game_screen::{GameScreen, GameScreenProps};
pub use notice_banner::{NoticeBanner, NoticeBannerProps};
pub use roster_panel::{RosterPanel, RosterPanelProps};
