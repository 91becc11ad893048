//! Core application state for the terminal front end.

use color_eyre::eyre::Result;
use rand::rngs::StdRng;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    game::Game,
    random::RngSource,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Game being played.
    ///
    /// This field holds the turn engine. It is restarted from its layout every time the user picks
    /// "New Game" in the main menu or asks for a rematch after a finished game.
    pub(crate) game: Game<RngSource<StdRng>>,
    /// Feedback on the last key press.
    ///
    /// This field holds a short note shown under the grid, such as a bump into a wall. It is
    /// cleared on the next turn.
    pub(crate) notice: Option<&'static str>,
}

impl App {
    /// Creates a new instance of the App structure from the command line configuration.
    ///
    /// # Errors
    ///
    /// This function may return errors if the configured grid cannot hold the starting layout.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::NewGame),
            game: Game::new(config.scenario(), config.random_source())?,
            notice: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
