pub mod state;
pub mod ui;

use crate::download;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::{DestMode, Screen, StatusLine, WizardState};
use std::io;

pub struct App {
    state: WizardState,
    client: reqwest::Client,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: WizardState::new(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| ui::render(f, &self.state))?;

            if self.state.should_quit {
                break;
            }

            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, terminal).await?;
                    }
                }
            }
        }

        Ok(())
    }

    async fn handle_key(
        &mut self,
        key: KeyEvent,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.state.back(),
            KeyCode::Tab if self.state.screen == Screen::Destination => {
                self.state.toggle_dest_mode();
            }
            KeyCode::Backspace => {
                self.state.active_input_mut().pop();
            }
            KeyCode::Enter => self.advance(terminal).await?,
            KeyCode::Char(c) => self.state.active_input_mut().push(c),
            _ => {}
        }

        Ok(())
    }

    async fn advance(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        match self.state.screen {
            Screen::Source => self.state.confirm_source(),
            Screen::Destination => match self.state.dest_mode {
                DestMode::Browse => self.state.confirm_dest_path(),
                DestMode::Url => self.download(terminal).await?,
            },
            Screen::Confirm => {
                let applied_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
                self.state.apply_update(&applied_at);
            }
        }

        Ok(())
    }

    /// Fetch the typed URL into a temp file. The await blocks the event loop
    /// for the whole download; on failure the user stays on the screen and
    /// may retry.
    async fn download(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> Result<()> {
        let url = self.state.dest_input.trim().to_string();
        if url.is_empty() {
            self.state.status = Some(StatusLine::Error(
                "Please enter a download link.".to_string(),
            ));
            return Ok(());
        }

        // Show the downloading status before the fetch blocks the loop.
        self.state.downloading = true;
        terminal.draw(|f| ui::render(f, &self.state))?;

        let result = download::fetch_to_temp(&self.client, &url).await;
        self.state.downloading = false;

        match result {
            Ok(path) => self.state.set_downloaded_dest(path),
            Err(e) => {
                tracing::warn!("Download failed for {}: {}", url, e);
                self.state.status = Some(StatusLine::Error(format!("Could not download file: {}", e)));
            }
        }

        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
