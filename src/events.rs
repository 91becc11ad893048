//! Event handling functions for user input and application state updates.

use std::time::Duration;

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    direction::Direction,
    game::Outcome,
    types::{MainMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to [`handle_key`]. It uses a
/// timeout to avoid blocking the UI.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    Ok(())
}

/// Dispatches a single key press based on the current screen.
///
/// The `q` key quits from every screen. Every other key is interpreted by the screen-specific
/// handlers.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return Ok(());
    }

    match app.screen {
        Screen::MainMenu(item) => handle_menu_key(app, item, code)?,
        Screen::Rules => {
            if matches!(code, KeyCode::Char('h') | KeyCode::Esc) {
                app.screen = Screen::MainMenu(MainMenuItem::Rules);
            }
        }
        Screen::InGame => handle_game_key(app, code)?,
    }

    Ok(())
}

/// Handles key presses in the main menu.
///
/// This function moves the highlighted entry with `j` and `k` and activates it with `l`. Starting a
/// new game always rebuilds the grid from its starting layout.
fn handle_menu_key(app: &mut App, item: MainMenuItem, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.screen = Screen::MainMenu(item.next()),
        KeyCode::Char('k') | KeyCode::Up => app.screen = Screen::MainMenu(item.previous()),
        KeyCode::Char('l') | KeyCode::Enter => match item {
            MainMenuItem::NewGame => {
                app.game.restart()?;
                app.notice = None;
                app.screen = Screen::InGame;
            }
            MainMenuItem::Rules => app.screen = Screen::Rules,
            MainMenuItem::Quit => app.exit = true,
        },
        _ => {}
    }

    Ok(())
}

/// Handles key presses on the in-game screen.
///
/// Lowercase `h`, `j`, `k` and `l` walk, their uppercase versions shoot. Once the game is over, `r`
/// starts a rematch. `Esc` goes back to the main menu.
fn handle_game_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Esc => {
            app.screen = Screen::MainMenu(MainMenuItem::NewGame);
        }
        KeyCode::Char('r') if app.game.outcome() != Outcome::InProgress => {
            app.game.restart()?;
            app.notice = None;
        }
        KeyCode::Char(key) => {
            if let Some(direction) = direction_for(key.to_ascii_lowercase()) {
                if app.game.outcome() != Outcome::InProgress {
                    return Ok(());
                }

                app.notice = if key.is_ascii_uppercase() {
                    app.game
                        .attack(direction)
                        .is_none()
                        .then_some("Your arrow flew off into the dark.")
                } else {
                    (!app.game.move_player(direction)).then_some("A wall blocks the way.")
                };
            }
        }
        _ => {}
    }

    Ok(())
}

/// Maps the vim-style movement keys to directions.
const fn direction_for(key: char) -> Option<Direction> {
    match key {
        'h' => Some(Direction::Left),
        'j' => Some(Direction::Down),
        'k' => Some(Direction::Up),
        'l' => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Config,
        entity::{EntityKind, Position},
        game::{Game, Scenario},
        random::RngSource,
    };

    /// Creates an app on a seeded, classic 5x5 layout.
    fn create_test_app() -> App {
        let config = Config {
            seed: Some(7),
            ..Config::default()
        };

        App::new(&config).expect("classic layout fits")
    }

    /// Creates an app that is already on the in-game screen.
    fn create_in_game_app() -> App {
        let mut app = create_test_app();
        app.screen = Screen::InGame;
        app
    }

    #[test]
    fn test_q_quits_from_every_screen() {
        for screen in [
            Screen::MainMenu(MainMenuItem::Rules),
            Screen::Rules,
            Screen::InGame,
        ] {
            let mut app = create_test_app();
            app.screen = screen;

            handle_key(&mut app, KeyCode::Char('q')).expect("key handled");

            assert!(app.exit);
        }
    }

    #[test]
    fn test_menu_navigation() {
        let mut app = create_test_app();

        handle_key(&mut app, KeyCode::Char('j')).expect("key handled");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Rules));

        handle_key(&mut app, KeyCode::Char('j')).expect("key handled");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));

        handle_key(&mut app, KeyCode::Char('k')).expect("key handled");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Rules));

        handle_key(&mut app, KeyCode::Char('l')).expect("key handled");
        assert_eq!(app.screen, Screen::Rules);

        handle_key(&mut app, KeyCode::Esc).expect("key handled");
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Rules));
    }

    #[test]
    fn test_menu_quit_entry() {
        let mut app = create_test_app();
        app.screen = Screen::MainMenu(MainMenuItem::Quit);

        handle_key(&mut app, KeyCode::Enter).expect("key handled");

        assert!(app.exit);
    }

    #[test]
    fn test_new_game_starts_fresh() {
        let mut app = create_in_game_app();
        handle_key(&mut app, KeyCode::Char('k')).expect("key handled");
        app.screen = Screen::MainMenu(MainMenuItem::NewGame);

        handle_key(&mut app, KeyCode::Char('l')).expect("key handled");

        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.game.player_position(), Some(Position::new(3, 2)));
    }

    #[test]
    fn test_lowercase_keys_walk() {
        let mut app = create_in_game_app();

        handle_key(&mut app, KeyCode::Char('k')).expect("key handled");

        assert_eq!(app.game.player_position(), Some(Position::new(3, 1)));
        assert_eq!(app.notice, None);
    }

    #[test]
    fn test_uppercase_keys_shoot() {
        let mut app = create_in_game_app();

        handle_key(&mut app, KeyCode::Char('K')).expect("key handled");

        assert_eq!(app.game.player_position(), Some(Position::new(3, 2)));
        assert!(app
            .game
            .grid()
            .find_kind(Position::new(3, 1), EntityKind::Arrow)
            .is_some());
    }

    #[test]
    fn test_walking_into_wall_sets_notice() {
        let mut app = create_in_game_app();
        app.game = Game::new(
            Scenario::new(5, Position::new(0, 1), Position::new(4, 4)),
            RngSource::seeded(7),
        )
        .expect("valid layout");

        handle_key(&mut app, KeyCode::Char('k')).expect("key handled");
        assert_eq!(app.game.player_position(), Some(Position::new(0, 0)));
        assert_eq!(app.notice, None);

        handle_key(&mut app, KeyCode::Char('k')).expect("key handled");

        assert_eq!(app.game.player_position(), Some(Position::new(0, 0)));
        assert_eq!(app.notice, Some("A wall blocks the way."));
    }

    #[test]
    fn test_arrow_off_grid_sets_notice() {
        let mut app = create_in_game_app();
        app.game = Game::new(
            Scenario::new(5, Position::new(0, 0), Position::new(4, 4)),
            RngSource::seeded(7),
        )
        .expect("valid layout");

        handle_key(&mut app, KeyCode::Char('H')).expect("key handled");

        assert_eq!(app.notice, Some("Your arrow flew off into the dark."));
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let mut app = create_in_game_app();
        handle_key(&mut app, KeyCode::Char('j')).expect("key handled");
        let after_move = app.game.player_position();

        handle_key(&mut app, KeyCode::Char('r')).expect("key handled");
        assert_eq!(app.game.player_position(), after_move);

        handle_key(&mut app, KeyCode::Char('h')).expect("key handled");
        handle_key(&mut app, KeyCode::Char('h')).expect("key handled");
        assert_eq!(app.game.outcome(), Outcome::InProgress);
        handle_key(&mut app, KeyCode::Char('h')).expect("key handled");
        assert_eq!(app.game.outcome(), Outcome::PlayerLost);

        handle_key(&mut app, KeyCode::Char('r')).expect("key handled");

        assert_eq!(app.game.outcome(), Outcome::InProgress);
        assert_eq!(app.game.player_position(), Some(Position::new(3, 2)));
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut app = create_in_game_app();

        handle_key(&mut app, KeyCode::Esc).expect("key handled");

        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::NewGame));
    }
}
