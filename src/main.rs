#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use quadfall::Time;
use quadfall::app::{App, AppResult};
use quadfall::components::{GameState, Input};
use quadfall::config::Config;
use quadfall::menu_types::{MenuOption, MenuState};
use quadfall::{systems, ui};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it
    let log_path = "quadfall.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .expect("Failed to create log file");

    // Redirect stderr to the log file
    let stderr_handle = std::io::stderr();
    let stderr_fd = stderr_handle.as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Set RUST_BACKTRACE environment variable for detailed panic messages
    unsafe {
        std::env::set_var("RUST_BACKTRACE", "1");
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Quadfall");

    // Initialize configuration system
    if Config::force_reload() {
        info!("Configuration loaded successfully");
    } else {
        error!("Failed to load configuration, continuing with defaults");
    }

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(33); // ~30 FPS
    let game_tick_rate = Duration::from_millis(50); // Game logic updates less often

    let app = App::new();
    let res = run_app(&mut terminal, app, tick_rate, game_tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    Ok(())
}

#[allow(clippy::too_many_lines)]
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
    game_tick_rate: Duration,
) -> AppResult<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    // Flush any pending input events that might be in the buffer
    while crossterm::event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    // The hard drop key starts released
    {
        let mut input = app.world.resource_mut::<Input>();
        input.hard_drop_released = true;
    }

    debug!("Resources initialized");

    loop {
        // Draw the UI
        if last_render.elapsed() >= tick_rate {
            terminal.draw(|f| ui::render(f, &mut app))?;
            last_render = Instant::now();
        }

        if last_game_tick.elapsed() >= game_tick_rate {
            last_game_tick = Instant::now();

            let delta_seconds = {
                let mut time = app.world.resource_mut::<Time>();
                time.tick()
            };

            if app.should_quit {
                return Ok(());
            }

            if app.menu.state == MenuState::Game {
                systems::input_system(&mut app.world);
                systems::game_tick_system(&mut app.world, delta_seconds);
                systems::score_system(&mut app.world);
            } else {
                app.menu_renderer.update();
            }
        }

        // Process keyboard input
        if crossterm::event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                debug!("Key event: {key:?}");

                // Track key releases for the hard-drop edge trigger
                if key.kind == event::KeyEventKind::Release {
                    let mut input = app.world.resource_mut::<Input>();
                    if key.code == KeyCode::Enter {
                        input.hard_drop_released = true;
                    }
                    continue;
                }

                // Allow quitting with 'q' regardless of game state
                if key.code == KeyCode::Char('q') {
                    app.should_quit = true;
                    continue;
                }

                // Menu navigation when not in game
                if app.menu.state != MenuState::Game {
                    match key.code {
                        KeyCode::Up | KeyCode::Char('w') => {
                            app.menu_renderer.prev_option(&mut app.menu);
                        }
                        KeyCode::Down | KeyCode::Char('s') => {
                            app.menu_renderer.next_option(&mut app.menu);
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            if app.menu.state == MenuState::MainMenu {
                                match app.menu.selected_option {
                                    MenuOption::NewGame => {
                                        app.menu.state = MenuState::Game;
                                        app.reset();
                                    }
                                    MenuOption::HowTo => {
                                        app.menu.state = MenuState::HowTo;
                                    }
                                    MenuOption::Quit => {
                                        app.should_quit = true;
                                    }
                                }
                            }
                        }
                        KeyCode::Esc => {
                            if app.menu.state == MenuState::HowTo {
                                app.menu.state = MenuState::MainMenu;
                            }
                        }
                        _ => {}
                    }
                    continue;
                }

                let is_game_over = {
                    let game_state = app.world.resource::<GameState>();
                    game_state.game_over
                };

                if key.code == KeyCode::Esc {
                    app.menu.state = MenuState::MainMenu;
                    continue;
                }

                if is_game_over {
                    if key.code == KeyCode::Enter {
                        info!("Restarting game");
                        app.reset();
                    }
                } else {
                    // Update input state for normal gameplay. All four
                    // arrows are plain moves; the engine turns a move
                    // against gravity into a hard drop.
                    let mut input = app.world.resource_mut::<Input>();
                    match key.code {
                        KeyCode::Up => input.up = true,
                        KeyCode::Down => input.down = true,
                        KeyCode::Left => input.left = true,
                        KeyCode::Right => input.right = true,
                        KeyCode::Char('z') => input.rotate_ccw = true,
                        KeyCode::Char('x') => input.rotate_cw = true,
                        KeyCode::Enter => {
                            // Only fire if the key was previously released
                            if input.hard_drop_released {
                                input.hard_drop = true;
                                input.hard_drop_released = false;
                            }
                        }
                        _ => (),
                    }
                }

                // Update last key in game state
                let mut game_state = app.world.resource_mut::<GameState>();
                game_state.last_key = Some(key);
            }
        }
    }
}
