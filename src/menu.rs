use crate::menu_types::{Menu, MenuOption, MenuState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::time::{Duration, Instant};

pub struct MenuRenderer {
    pub title_colors: Vec<Color>,
    pub color_change_time: Instant,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self {
            title_colors: vec![Color::Cyan, Color::Yellow, Color::Green, Color::Magenta],
            color_change_time: Instant::now(),
        }
    }
}

impl MenuRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_option(&mut self, menu: &mut Menu) {
        if menu.state == MenuState::MainMenu {
            menu.selected_option = match menu.selected_option {
                MenuOption::NewGame => MenuOption::HowTo,
                MenuOption::HowTo => MenuOption::Quit,
                MenuOption::Quit => MenuOption::NewGame,
            };
        }
    }

    pub fn prev_option(&mut self, menu: &mut Menu) {
        if menu.state == MenuState::MainMenu {
            menu.selected_option = match menu.selected_option {
                MenuOption::NewGame => MenuOption::Quit,
                MenuOption::HowTo => MenuOption::NewGame,
                MenuOption::Quit => MenuOption::HowTo,
            };
        }
    }

    pub fn update(&mut self) {
        // Cycle the title color
        if self.color_change_time.elapsed() > Duration::from_millis(300) {
            self.color_change_time = Instant::now();
            let first_color = self.title_colors.remove(0);
            self.title_colors.push(first_color);
        }
    }
}

pub fn render_menu(f: &mut Frame, menu: &Menu, renderer: &MenuRenderer) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_title(f, chunks[0], &renderer.title_colors);
    match menu.state {
        MenuState::MainMenu => render_main_menu_options(f, chunks[1], menu),
        MenuState::HowTo => render_how_to(f, chunks[1]),
        MenuState::Game => {}
    }
}

fn render_title(f: &mut Frame, area: ratatui::layout::Rect, colors: &[Color]) {
    let title = "QUADFALL";
    let title_style = Style::default().fg(colors[0]).add_modifier(Modifier::BOLD);
    let title_line = Line::from(Span::styled(title, title_style));
    let title_block = Block::default().borders(Borders::ALL).title(title_line);
    f.render_widget(title_block, area);
}

fn render_main_menu_options(f: &mut Frame, area: ratatui::layout::Rect, menu: &Menu) {
    let options = ["New Game", "How To Play", "Quit"];
    let selected = match menu.selected_option {
        MenuOption::NewGame => 0,
        MenuOption::HowTo => 1,
        MenuOption::Quit => 2,
    };

    let mut lines = Vec::new();
    for (i, option) in options.iter().enumerate() {
        let style = if i == selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![Span::styled((*option).to_string(), style)]));
    }
    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_how_to(f: &mut Frame, area: ratatui::layout::Rect) {
    let text = "Pieces enter from all four edges and fall toward the center.\n\
        Ring a 3x3 box (the center cell doesn't count) to clear it.\n\
        Each cleared box is worth 100 points; every 10th clear speeds\n\
        the game up and raises the level.\n\
        \n\
        Arrows: move (pushing against gravity hard-drops)\n\
        Z / X: rotate counter-clockwise / clockwise\n\
        Enter: hard drop\n\
        Esc: back to menu   Q: quit\n\
        \n\
        Press Esc to go back.";
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
