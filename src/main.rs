//! Pokemon Battle TUI - client for the catch-and-battle Game Service

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pokebattle::action::Action;
use pokebattle::api::GameClient;
use pokebattle::components::{Component, GameScreen, GameScreenProps};
use pokebattle::effect::Effect;
use pokebattle::reducer::reducer;
use pokebattle::state::{AppState, NOTICE_TTL_MS};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Pokemon Battle - catch a team and battle random opponents
#[derive(Parser, Debug)]
#[command(name = "pokebattle")]
#[command(about = "Terminal client for the Pokemon catch-and-battle game server")]
struct Args {
    /// Game Service base URL
    #[arg(
        long,
        short,
        env = "POKEBATTLE_SERVER",
        default_value = "http://127.0.0.1:8000"
    )]
    server: String,

    /// Append logs to this file (logging is off without it)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum GameComponentId {
    Screen,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum GameContext {
    Main,
}

impl EventRoutingState<GameComponentId, GameContext> for AppState {
    fn focused(&self) -> Option<GameComponentId> {
        Some(GameComponentId::Screen)
    }

    fn modal(&self) -> Option<GameComponentId> {
        None
    }

    fn binding_context(&self, _id: GameComponentId) -> GameContext {
        GameContext::Main
    }

    fn default_context(&self) -> GameContext {
        GameContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        server,
        log_file,
        verbose,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = log_file.as_deref() {
        init_logging(path, verbose)?;
    }

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let client = GameClient::new(server);
    let base_url = client.base_url().to_string();
    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(base_url))
        })
        .await
        .map_err(debug_error)?;
    log::info!("using game service at {}", client.base_url());

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, client, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

fn init_logging(path: &Path, verbosity: u8) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                fmt.timestamp(),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)
}

struct GameUi {
    screen: GameScreen,
}

impl GameUi {
    fn new() -> Self {
        Self { screen: GameScreen }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<GameComponentId>,
    ) {
        event_ctx.set_component_area(GameComponentId::Screen, area);
        let props = GameScreenProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.screen.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = GameScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .screen
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: GameClient,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(GameUi::new()));
    let mut bus: EventBus<AppState, Action, GameComponentId, GameContext> = EventBus::new();
    let keybindings: Keybindings<GameContext> = Keybindings::new();

    let ui_screen = Rc::clone(&ui);
    bus.register(GameComponentId::Screen, move |event, state| {
        ui_screen.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            None,
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks; every failure becomes a `*DidError`
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &GameClient) {
    match effect {
        Effect::StartSession => {
            let client = client.clone();
            ctx.tasks().spawn("start", async move {
                match client.start().await {
                    Ok(response) => {
                        log::info!("session {} started", response.session_id);
                        Action::SessionDidStart(response)
                    }
                    Err(e) => {
                        log::warn!("start failed: {e}");
                        Action::SessionDidError(e.to_string())
                    }
                }
            });
        }
        Effect::Catch { session } => {
            let client = client.clone();
            ctx.tasks().spawn("catch", async move {
                match client.catch(&session).await {
                    Ok(response) => {
                        log::debug!("caught, team size {}", response.team_size);
                        Action::CatchDidLoad { session, response }
                    }
                    Err(e) => {
                        log::warn!("catch failed: {e}");
                        Action::CatchDidError {
                            session,
                            error: e.to_string(),
                        }
                    }
                }
            });
        }
        Effect::Battle { session, index } => {
            let client = client.clone();
            ctx.tasks().spawn("battle", async move {
                match client.battle(&session, index).await {
                    Ok(response) => {
                        if response.game_over {
                            log::info!("session {session} is over, score {}", response.score);
                        }
                        Action::BattleDidLoad { session, response }
                    }
                    Err(e) => {
                        log::warn!("battle with #{index} failed: {e}");
                        Action::BattleDidError {
                            session,
                            error: e.to_string(),
                        }
                    }
                }
            });
        }
        Effect::SyncTeam { session } => {
            let client = client.clone();
            ctx.tasks().spawn("sync", async move {
                let synced = async {
                    let team = client.team(&session).await?;
                    let score = client.score(&session).await?;
                    Ok::<_, pokebattle::api::ApiError>((team, score))
                };
                match synced.await {
                    Ok((team, score)) => Action::TeamDidLoad {
                        session,
                        team,
                        score,
                    },
                    Err(e) => {
                        log::warn!("team sync failed: {e}");
                        Action::TeamDidError {
                            session,
                            error: e.to_string(),
                        }
                    }
                }
            });
        }
        Effect::ExpireNotice { id } => {
            ctx.tasks().spawn("notice", async move {
                tokio::time::sleep(Duration::from_millis(NOTICE_TTL_MS)).await;
                Action::NoticeExpire(id)
            });
        }
    }
}
