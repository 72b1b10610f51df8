use crate::error::TransferError;
use crate::preview::{self, Preview};
use crate::transfer;
use std::path::PathBuf;

/// The three wizard screens, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Source,
    Destination,
    Confirm,
}

/// How the destination screen is being filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestMode {
    Browse,
    Url,
}

/// Paths chosen so far. Held in memory only; reset only by restarting.
#[derive(Debug, Default)]
pub struct WizardSession {
    pub source_file: Option<PathBuf>,
    pub dest_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Info(String),
    Error(String),
}

/// All wizard state, mutated only by the UI loop.
pub struct WizardState {
    pub screen: Screen,
    pub session: WizardSession,
    pub source_input: String,
    pub dest_input: String,
    pub dest_mode: DestMode,
    pub notes_input: String,
    pub preview: Option<Preview>,
    pub status: Option<StatusLine>,
    pub downloading: bool,
    pub should_quit: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Source,
            session: WizardSession::default(),
            source_input: String::new(),
            dest_input: String::new(),
            dest_mode: DestMode::Browse,
            notes_input: String::new(),
            preview: None,
            status: None,
            downloading: false,
            should_quit: false,
        }
    }

    /// The text buffer the current screen types into.
    pub fn active_input_mut(&mut self) -> &mut String {
        match self.screen {
            Screen::Source => &mut self.source_input,
            Screen::Destination => &mut self.dest_input,
            Screen::Confirm => &mut self.notes_input,
        }
    }

    pub fn toggle_dest_mode(&mut self) {
        self.dest_mode = match self.dest_mode {
            DestMode::Browse => DestMode::Url,
            DestMode::Url => DestMode::Browse,
        };
    }

    /// Validate the source selection and advance to the destination screen.
    pub fn confirm_source(&mut self) {
        let input = self.source_input.trim();
        if input.is_empty() {
            self.fail_validation("Please select a source file.");
            return;
        }
        let path = PathBuf::from(input);
        if !path.is_file() {
            self.fail_validation(format!("No such file: {}", path.display()));
            return;
        }

        self.session.source_file = Some(path);
        self.enter_destination();
    }

    /// Validate the typed destination path and advance to confirmation.
    pub fn confirm_dest_path(&mut self) {
        let input = self.dest_input.trim();
        if input.is_empty() {
            self.fail_validation("Please select an update file.");
            return;
        }
        let path = PathBuf::from(input);
        if !path.is_file() {
            self.fail_validation(format!("No such file: {}", path.display()));
            return;
        }

        self.session.dest_file = Some(path);
        self.enter_confirm();
    }

    /// Record a finished download as the destination and advance.
    pub fn set_downloaded_dest(&mut self, path: PathBuf) {
        self.session.dest_file = Some(path);
        self.enter_confirm();
    }

    /// Run the transfer with the current session and notes. The session is
    /// kept as-is afterwards, success or not.
    pub fn apply_update(&mut self, applied_at: &str) {
        let (Some(source), Some(dest)) = (
            self.session.source_file.clone(),
            self.session.dest_file.clone(),
        ) else {
            self.fail_validation("Both a source and an update file are required.");
            return;
        };

        match transfer::transfer(&source, &dest, self.notes_input.trim(), applied_at) {
            Ok(()) => {
                self.status = Some(StatusLine::Info(
                    "Metadata updated. Notes and timestamp saved in Comments; \
                     the original file has been replaced."
                        .to_string(),
                ));
            }
            Err(e) => {
                tracing::error!("Transfer failed: {}", e);
                self.status = Some(StatusLine::Error(format!("Failed to update metadata: {}", e)));
            }
        }
    }

    /// Go back one screen; backing out of the first screen quits.
    pub fn back(&mut self) {
        match self.screen {
            Screen::Source => self.should_quit = true,
            Screen::Destination => {
                self.screen = Screen::Source;
                self.status = None;
            }
            Screen::Confirm => self.enter_destination(),
        }
    }

    /// Entering the destination screen recomputes the source preview.
    fn enter_destination(&mut self) {
        if let Some(source) = &self.session.source_file {
            self.preview = Some(preview::preview(source));
        }
        self.screen = Screen::Destination;
        self.status = None;
    }

    /// The notes field starts blank on every visit to the confirm screen.
    fn enter_confirm(&mut self) {
        self.notes_input.clear();
        self.screen = Screen::Confirm;
        self.status = None;
    }

    fn fail_validation(&mut self, message: impl Into<String>) {
        let err = TransferError::ValidationError(message.into());
        self.status = Some(StatusLine::Error(err.to_string()));
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
