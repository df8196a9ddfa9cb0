use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

use crate::api::{ApiError, HttpSignupClient, SignupApi};
use crate::config::Config;
use crate::signup::SignupFormData;
use crate::ui::terminal_guard::{self, TerminalGuard};
use crate::ui::{SignupAction, SignupScreen};

pub struct App {
    config: Config,
    screen: SignupScreen,
    api: Arc<dyn SignupApi>,
    /// Result channel for the request in flight, if any
    pending: Option<oneshot::Receiver<Result<(), ApiError>>>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let api: Arc<dyn SignupApi> = Arc::new(HttpSignupClient::new(&config.api)?);
        Ok(Self::with_api(config, api))
    }

    /// Build the app around any signup backend
    pub fn with_api(config: Config, api: Arc<dyn SignupApi>) -> Self {
        let screen = SignupScreen::from_config(&config);
        Self {
            config,
            screen,
            api,
            pending: None,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &SignupScreen {
        &self.screen
    }

    pub async fn run(&mut self) -> Result<()> {
        terminal_guard::install_panic_hook();
        let _guard = TerminalGuard::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms.max(1));
        tracing::info!(url = %self.config.api.signup_url, "Signup wizard started");

        while !self.should_quit {
            terminal.draw(|f| self.screen.render(f))?;

            // Blocking poll is bounded by the tick; the spawned request keeps
            // running on the runtime's worker threads meanwhile
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let action = self.screen.handle_key(key);
                        self.apply(action);
                    }
                }
            }

            self.poll_submission();
            self.screen.tick();
        }

        terminal.show_cursor()?;
        Ok(())
    }

    fn apply(&mut self, action: SignupAction) {
        match action {
            SignupAction::None => {}
            SignupAction::Submit(data) => self.spawn_submission(data),
            SignupAction::Quit => {
                tracing::debug!("Quit requested");
                self.should_quit = true;
            }
        }
    }

    fn spawn_submission(&mut self, data: SignupFormData) {
        let (tx, rx) = oneshot::channel();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            let result = api.register(&data).await;
            // Receiver is gone only if the user already quit
            let _ = tx.send(result);
        });
        self.pending = Some(rx);
    }

    /// Hand a finished request back to the screen
    fn poll_submission(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                self.pending = None;
                self.screen.finish_submission(result);
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending = None;
                self.screen
                    .finish_submission(Err(ApiError::Client("request task ended".to_string())));
            }
        }
    }
}
