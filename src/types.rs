//! Type definitions and enums for the application state and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the main menu screen of the game, with the currently highlighted
    /// entry.
    MainMenu(MainMenuItem),
    /// Rules of the game.
    ///
    /// This variant represents a static page explaining the hazards and the controls.
    Rules,
    /// In-game grid screen.
    ///
    /// This variant represents the screen where the grid is displayed and the turns are played.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "New Game" menu option.
    NewGame,
    /// "Rules" menu option.
    Rules,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Entries in the order they are listed on screen.
    pub(crate) const ALL: [Self; 3] = [Self::NewGame, Self::Rules, Self::Quit];

    /// Returns the label shown in the menu.
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::NewGame => "New Game",
            Self::Rules => "Rules",
            Self::Quit => "Quit",
        }
    }

    /// Returns the entry below this one, staying on the last entry.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::NewGame => Self::Rules,
            Self::Rules | Self::Quit => Self::Quit,
        }
    }

    /// Returns the entry above this one, staying on the first entry.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Quit => Self::Rules,
            Self::Rules | Self::NewGame => Self::NewGame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::NewGame);
        let rules = Screen::Rules;
        let in_game = Screen::InGame;

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::NewGame));
        assert_ne!(main_menu, in_game);
        assert_ne!(rules, in_game);
    }

    #[test]
    fn test_main_menu_item_navigation() {
        assert_eq!(MainMenuItem::NewGame.next(), MainMenuItem::Rules);
        assert_eq!(MainMenuItem::Rules.next(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.next(), MainMenuItem::Quit);

        assert_eq!(MainMenuItem::Quit.previous(), MainMenuItem::Rules);
        assert_eq!(MainMenuItem::Rules.previous(), MainMenuItem::NewGame);
        assert_eq!(MainMenuItem::NewGame.previous(), MainMenuItem::NewGame);
    }

    #[test]
    fn test_main_menu_item_labels() {
        let labels: Vec<&str> = MainMenuItem::ALL.iter().map(|item| item.label()).collect();

        assert_eq!(labels, vec!["New Game", "Rules", "Quit"]);
    }
}
