#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting board coordinates to terminal cells
    // since the playfield always fits a u16
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::app::App;
use crate::components::{ActivePiece, GameState, Position};
use crate::menu;
use crate::menu_types::MenuState;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(f: &mut Frame, app: &mut App) {
    if app.menu.state != MenuState::Game {
        menu::render_menu(f, &app.menu, &app.menu_renderer);
        return;
    }

    let half_extent = app.board_half_extent();
    let span = (half_extent * 2) as u16; // cells per axis
    let cell_width = 2; // Each cell is 2 characters wide
    let board_width = span * cell_width + 2; // +2 for borders
    let board_height = span + 2;
    let min_info_width = 22u16;
    let min_total_width = board_width + min_info_width;
    let min_total_height = board_height + 3;

    // Check if the terminal is too small to render the game properly
    if f.area().width < min_total_width || f.area().height < min_total_height {
        {
            let mut game_state = app.world.resource_mut::<GameState>();
            if !game_state.game_over {
                game_state.was_paused_for_resize = true;
            }
        }

        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Quadfall - Paused"),
        );

        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    } else if app.world.resource::<GameState>().was_paused_for_resize {
        let mut game_state = app.world.resource_mut::<GameState>();
        game_state.was_paused_for_resize = false;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Min(min_info_width),
        ])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board (fixed height)
            Constraint::Min(0),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("QUADFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);
    render_info_panel(f, app, main_layout[1]);
}

fn render_game_board(f: &mut Frame, app: &mut App, area: Rect) {
    let half_extent = app.board_half_extent();
    let span = (half_extent * 2) as u16;

    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    for (position, kind) in app.get_render_blocks() {
        // Board coordinates are origin-centered with y up; the terminal is
        // top-left with y down.
        let col = (position.x + half_extent) as u16;
        let row = (half_extent - 1 - position.y) as u16;

        if col < span && row < span {
            let block_x = inner_area.left() + col * 2;
            let block_y = inner_area.top() + row;

            if block_x < inner_area.right() && block_y < inner_area.bottom() {
                let color = kind.get_color();

                if let Some(cell) = f.buffer_mut().cell_mut((block_x, block_y)) {
                    cell.set_symbol("█");
                    cell.set_fg(color);
                    cell.set_bg(Color::Black);
                }

                // Make the block two cells wide for better proportions
                if let Some(cell) = f.buffer_mut().cell_mut((block_x + 1, block_y)) {
                    cell.set_symbol("█");
                    cell.set_fg(color);
                    cell.set_bg(Color::Black);
                }
            }
        }
    }

    // If game is over, overlay "GAME OVER" text
    let game_state = app.world.resource::<GameState>();
    if game_state.game_over {
        let game_over = Paragraph::new("GAME OVER")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let game_over_area = Rect {
            x: inner_area.x + (inner_area.width / 2).saturating_sub(5),
            y: inner_area.y + inner_area.height / 2,
            width: 10,
            height: 1,
        };

        f.render_widget(game_over, game_over_area);
    }
}

fn render_info_panel(f: &mut Frame, app: &mut App, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(7), // Stats
            Constraint::Min(5),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let gravity_arrow = {
        let mut query = app.world.query::<&ActivePiece>();
        query
            .iter(&app.world)
            .next()
            .map_or(" ", |piece| match piece.gravity {
                Position { x: 0, y: -1 } => "v",
                Position { x: 0, y: 1 } => "^",
                Position { x: 1, y: 0 } => ">",
                Position { x: -1, y: 0 } => "<",
                _ => "?",
            })
    };

    let game_state = app.world.resource::<GameState>();
    let stats = format!(
        "Score: {}\nClears: {}\nLevel: {}\nHigh Score: {}\nGravity: {}",
        game_state.score,
        game_state.clears,
        game_state.level,
        game_state.high_score,
        gravity_arrow,
    );

    let stats_widget = Paragraph::new(stats)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_widget, info_layout[1]);

    let controls_text = if game_state.game_over {
        "GAME OVER!\nPress Enter to restart\nEsc: menu  Q: quit"
    } else {
        "Controls:\n\
        Arrows: move piece\n\
        (against gravity = drop)\n\
        Z/X: rotate\n\
        Enter: hard drop\n\
        Esc: menu  Q: quit"
    };
    let controls = Paragraph::new(controls_text)
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[2]);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
