//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{canvas::Canvas, Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    entity::EntityKind,
    game::Outcome,
    grid::Snapshot,
    types::{MainMenuItem, Screen},
    App,
};

/// Horizontal distance between two rooms, in terminal cells.
pub(crate) const ROOM_WIDTH: u16 = 4;

/// Vertical distance between two rooms, in terminal cells.
pub(crate) const ROOM_HEIGHT: u16 = 2;

/// Rules page shown from the main menu.
const RULES: &str = "\
Somewhere in these rooms lurks the wumpus. Walk into it, or let it walk into you, and you are \
done for. Pits swallow whatever steps in, the wumpus included. Bats grab you and drop you in a \
random room. Every time you act the wumpus may wake up and wander one room.

(h/j/k/l) walk left, down, up, right
(H/J/K/L) shoot an arrow into the next room
(r) play again once the game is over
(esc) back to the menu / (q) quit";

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match &app.screen {
        Screen::MainMenu(item) => main_menu(frame, *item),
        Screen::Rules => rules(frame),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the centered, bordered box the main menu is drawn in.
///
/// This function returns one single-row area per menu entry, inside the box.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, title: &str, entries: u16) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(entries + 2)])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(title.to_owned())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); entries.into()]).split(inner_space)
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "New Game", "Rules", and "Quit". It
/// highlights the currently selected option.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let entries = MainMenuItem::ALL;
    let inner_layout = init_menu(frame, "Hunt the Wampus", 3);

    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (entry, area) in entries.into_iter().zip(inner_layout.iter()) {
        let style = if entry == item {
            active_content_style
        } else {
            content_style
        };

        frame.render_widget(Line::styled(entry.label(), style).centered(), *area);
    }
}

/// Renders the rules page.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn rules(frame: &mut Frame) {
    clear(frame);

    let space = Layout::horizontal([
        Constraint::Percentage(20),
        Constraint::Fill(1),
        Constraint::Percentage(20),
    ])
    .split(frame.area())[1];
    let space = Layout::vertical([Constraint::Max(12)])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title("Rules")
        .title_bottom("(h) return")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    frame.render_widget(
        Paragraph::new(RULES).wrap(Wrap { trim: false }).block(block),
        space,
    );
}

/// Renders the in-game screen with the grid and a status line.
///
/// This function draws every room on a [`Canvas`] as a single glyph, with a tooltip block holding
/// the controls and the outcome of the last turn below it.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion operations.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let snapshot = app.game.snapshot();
    let side = u16::try_from(snapshot.size())?;
    let board_width = side.saturating_mul(ROOM_WIDTH);
    let board_height = side.saturating_mul(ROOM_HEIGHT);

    // Grid area + tooltip at bottom
    let overall_layout = Layout::vertical([Constraint::Min(1), Constraint::Length(4)])
        .split(frame.area());

    let board_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get board content area from layout")?;
    let tooltip_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    if board_content_area.height < board_height || board_content_area.width < board_width {
        let warning = Paragraph::new(vec![
            Line::raw(format!("The terminal is too small for a {side}x{side} grid.")),
            Line::raw(format!(
                "Resize it to at least {board_width}x{} cells or pick a smaller --size.",
                board_height.saturating_add(tooltip_full_area.height),
            )),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });
        frame.render_widget(warning, board_content_area);
    } else {
        draw_board(&snapshot, frame, board_content_area, board_width, board_height)?;
    }

    let tooltip_area = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(board_width.max(48)),
        Constraint::Min(1),
    ])
    .split(tooltip_full_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered tooltip area from horizontal layout")?;

    let tooltip_block = Block::bordered()
        .title("(hjkl) walk / (HJKL) shoot / (esc) menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(
        Paragraph::new(status_line(app))
            .alignment(Alignment::Center)
            .block(tooltip_block),
        tooltip_area,
    );

    Ok(())
}

/// Draws every room of the grid, centered in the given area.
///
/// This function lays out a [`Canvas`] exactly as large as the board and prints one glyph per room
/// on it. The caller must have checked that the board fits in the area.
///
/// # Errors
///
/// This function may return errors from layout lookups or coordinate conversion operations.
pub(crate) fn draw_board(
    snapshot: &Snapshot,
    frame: &mut Frame,
    area: Rect,
    board_width: u16,
    board_height: u16,
) -> Result<()> {
    let board_area = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(board_height),
        Constraint::Fill(1),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get board area from layout")?;
    let space = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(board_width),
        Constraint::Fill(1),
    ])
    .split(board_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get board space from horizontal layout")?;

    let glyphs = room_glyphs(snapshot)?;
    let board = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Dot)
        .paint(|ctx| {
            for (x, y, glyph, color) in &glyphs {
                ctx.print(*x, *y, Line::styled(*glyph, Style::default().fg(*color)));
            }
        });

    frame.render_widget(board, space);

    Ok(())
}

/// Returns the message shown under the grid.
pub(crate) fn status_line(app: &App) -> &'static str {
    match app.game.outcome() {
        Outcome::PlayerWon => "The wumpus is dead. You win! Press (r) to play again",
        Outcome::PlayerLost => "You died. Press (r) to restart",
        Outcome::InProgress => app.notice.unwrap_or("You sense danger nearby..."),
    }
}

/// Returns the glyph and color shown for a room holding the given kinds.
///
/// The most important occupant wins: the player, then the wumpus, then the hazards and finally
/// arrows.
pub(crate) fn glyph_for(kinds: &[EntityKind]) -> (&'static str, Color) {
    const PRIORITY: [(EntityKind, &str, Color); 5] = [
        (EntityKind::Player, "@", Color::White),
        (EntityKind::Wumpus, "W", Color::Red),
        (EntityKind::Pit, "O", Color::Blue),
        (EntityKind::Bats, "B", Color::Magenta),
        (EntityKind::Arrow, "^", Color::Yellow),
    ];

    PRIORITY
        .iter()
        .find(|(kind, _, _)| kinds.contains(kind))
        .map_or((".", Color::DarkGray), |&(_, glyph, color)| (glyph, color))
}

/// Computes the canvas coordinates and glyph of every room.
///
/// Rooms are laid out around the canvas origin, with row zero at the top: the column transform is
/// `x * width - (n - 1) * width / 2` and the row transform is `(n - 1) * height / 2 - y * height`.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn room_glyphs(snapshot: &Snapshot) -> Result<Vec<(f64, f64, &'static str, Color)>> {
    let last = f64::from(u16::try_from(snapshot.size().saturating_sub(1))?);
    let width = f64::from(ROOM_WIDTH);
    let height = f64::from(ROOM_HEIGHT);

    let offset_x = last * width / 2.;
    let offset_y = last * height / 2.;

    let mut glyphs = Vec::new();
    for (row, rooms) in snapshot.rows().enumerate() {
        for (col, kinds) in rooms.iter().enumerate() {
            let (glyph, color) = glyph_for(kinds);
            let screen_x = f64::from(u16::try_from(col)?).mul_add(width, -offset_x);
            let screen_y = (-f64::from(u16::try_from(row)?)).mul_add(height, offset_y);

            glyphs.push((screen_x, screen_y, glyph, color));
        }
    }

    Ok(glyphs)
}
