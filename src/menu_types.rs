// Screen the app is currently showing
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    HowTo,
    Game,
}

// Main menu option selection
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    NewGame,
    HowTo,
    Quit,
}

#[derive(Clone)]
pub struct Menu {
    pub state: MenuState,
    pub selected_option: MenuOption,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            state: MenuState::MainMenu,
            selected_option: MenuOption::NewGame,
        }
    }
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
