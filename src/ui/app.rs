use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::game::{GameState, Player, StateSnapshot};
use crate::ui::theme::ThemeKind;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::Backend, Terminal};

pub struct App {
    game_state: GameState,
    /// Latest broadcast from the game state's observer registry; the UI is
    /// a listener like any other and reacts to what it observed
    observed: Rc<RefCell<Option<StateSnapshot>>>,
    selected_pit: usize,
    theme: ThemeKind,
    initial_stones: u8,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let mut game_state = GameState::with_stones(config.game.initial_stones);

        let observed: Rc<RefCell<Option<StateSnapshot>>> = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&observed);
        game_state.attach(move |snapshot: &StateSnapshot| {
            *sink.borrow_mut() = Some(snapshot.clone());
        });

        App {
            game_state,
            observed,
            selected_pit: 0,
            theme: config.ui.theme,
            initial_stones: config.game.initial_stones,
            should_quit: false,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                let range = self.game_state.current_player().pit_range();
                if self.selected_pit > range.start {
                    self.selected_pit -= 1;
                }
            }
            KeyCode::Right => {
                let range = self.game_state.current_player().pit_range();
                if self.selected_pit + 1 < range.end {
                    self.selected_pit += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.game_state.move_pit(self.selected_pit);
                self.sync_selection();
            }
            KeyCode::Char('u') => {
                self.game_state.undo();
                self.sync_selection();
            }
            KeyCode::Char('t') => {
                self.theme = self.theme.next();
            }
            KeyCode::Char('r') => {
                self.game_state.reset(self.initial_stones);
                self.sync_selection();
            }
            _ => {}
        }
    }

    /// Keep the cursor inside the observed mover's pits after any mutation
    fn sync_selection(&mut self) {
        let turn = match self.observed.borrow().as_ref() {
            Some(snapshot) => snapshot.turn,
            None => Player::A,
        };
        if !turn.owns_pit(self.selected_pit) {
            self.selected_pit = turn.pit_range().start;
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_pit,
            self.theme.theme(),
        );
    }
}
