//! Main TUI application loop.
//!
//! Handles:
//! - Input event handling, translated into intake events
//! - Dispatching submissions to the background worker
//! - Feeding settlements back into the controller
//! - Drawing the view the controller selects

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::http::HttpPredictor;
use crate::application::{IntakeController, IntakeEvent, View};
use crate::config::ClientConfig;
use crate::ports::Predictor;

use super::ui::{
    form::{render_form, FormState},
    render_disclaimer, render_error_banner, render_header,
    results::render_results,
    ServiceHealth,
};
use super::worker::{HealthProbe, SettlementInbox};

/// Main application state
pub struct App {
    /// Whether the app should quit
    should_quit: bool,

    /// Single owner of form, loading, error and result state
    controller: IntakeController,

    /// Cursor and typing buffers for the form view
    form: FormState,

    predictor: Arc<dyn Predictor>,

    /// Settlements from background submissions
    inbox: SettlementInbox,

    /// Shown in the header
    endpoint: String,
    service_health: ServiceHealth,

    /// Outstanding status check, if any
    health_probe: Option<HealthProbe>,
}

impl App {
    /// Create an application talking to the service configured in the
    /// environment.
    ///
    /// # Errors
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new() -> crate::Result<Self> {
        let config = ClientConfig::from_env()?;
        let predictor = HttpPredictor::new(&config)?;
        tracing::info!("Prediction service: {}", config.api_base());

        Ok(Self::with_predictor(
            Arc::new(predictor),
            config.api_base().to_string(),
        ))
    }

    /// Create application with an injected predictor.
    pub fn with_predictor(predictor: Arc<dyn Predictor>, endpoint: impl Into<String>) -> Self {
        let controller = IntakeController::new();
        let form = FormState::from_profile(controller.profile());

        Self {
            should_quit: false,
            controller,
            form,
            predictor,
            inbox: SettlementInbox::new(),
            endpoint: endpoint.into(),
            service_health: ServiceHealth::Unknown,
            health_probe: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        self.start_health_probe();

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

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

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_health();
            self.poll_settlements();

            terminal.draw(|f| self.draw(f))?;

            // Short poll to keep settlements flowing
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let error = self.controller.error();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(if error.is_some() { 3 } else { 0 }),
                Constraint::Length(2),
            ])
            .split(f.area());

        render_header(f, chunks[0], &self.endpoint, &self.service_health);

        match (self.controller.view(), self.controller.prediction()) {
            (View::Results, Some(result)) => render_results(f, chunks[1], result),
            _ => render_form(f, chunks[1], &self.controller, &self.form),
        }

        if let Some(message) = error {
            render_error_banner(f, chunks[2], message);
        }

        render_disclaimer(f, chunks[3]);
    }

    /// Check the service in the background so the header can show its status.
    fn start_health_probe(&mut self) {
        self.service_health = ServiceHealth::Unknown;
        self.health_probe = Some(HealthProbe::spawn(self.predictor.clone()));
    }

    /// Record the status check's answer once it arrives.
    fn poll_health(&mut self) {
        let Some(outcome) = self.health_probe.as_ref().and_then(HealthProbe::try_recv) else {
            return;
        };
        self.health_probe = None;

        self.service_health = match outcome {
            Ok(status) => {
                tracing::info!("Prediction service status: {}", status.status);
                ServiceHealth::Ready(status.status)
            }
            Err(e) => {
                tracing::warn!("Prediction service status check failed: {}", e);
                ServiceHealth::Unreachable
            }
        };
    }

    /// Feed every available settlement into the controller.
    fn poll_settlements(&mut self) {
        while let Some(settlement) = self.inbox.try_recv() {
            self.controller.apply(IntakeEvent::Settled(settlement));
        }
    }

    /// Apply an event and start the request it asks for, if any.
    fn apply(&mut self, event: IntakeEvent) {
        if let Some(dispatch) = self.controller.apply(event) {
            self.inbox.dispatch(self.predictor.clone(), dispatch);
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        match self.controller.view() {
            View::Form => self.handle_form_key(key),
            View::Results => self.handle_results_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        let edit = match key {
            KeyCode::Up | KeyCode::BackTab => {
                self.form.prev_field();
                None
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form.next_field();
                None
            }
            KeyCode::Left => self.form.step(self.controller.profile(), false),
            KeyCode::Right => self.form.step(self.controller.profile(), true),
            KeyCode::Backspace => self.form.delete_char(),
            KeyCode::Delete => self.form.clear_field(),
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char(c) => self.form.input_char(c),
            KeyCode::Enter => Some(IntakeEvent::Submit),
            KeyCode::Esc => Some(IntakeEvent::Reset),
            _ => None,
        };

        if let Some(event) = edit {
            self.apply(event);
        }
    }

    fn handle_results_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('b') => {
                self.apply(IntakeEvent::Reset);
            }
            KeyCode::Enter => self.apply(IntakeEvent::Submit),
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Lifecycle, SERVICE_UNREACHABLE_MESSAGE};
    use crate::domain::{DiseaseRisk, PatientProfile, PredictionResult, ProfileField, RiskLevel};
    use crate::ports::{PredictionError, ServiceStatus};
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    /// Succeeds unless the profile's age is missing.
    struct StubPredictor;

    impl Predictor for StubPredictor {
        fn predict(&self, profile: &PatientProfile) -> Result<PredictionResult, PredictionError> {
            if profile.age.is_nan() {
                return Err(PredictionError::Transport("connection reset".into()));
            }
            Ok(PredictionResult::from_entries(vec![DiseaseRisk {
                name: "Diabetes".into(),
                probability: 62.0,
                risk_level: RiskLevel::Moderate,
            }]))
        }

        fn health(&self) -> Result<ServiceStatus, PredictionError> {
            Ok(ServiceStatus {
                message: "Disease Prediction API is Online".into(),
                status: "Ready".into(),
            })
        }
    }

    /// Answers predictions at once but takes seconds to report its status.
    struct SlowStatusPredictor;

    impl Predictor for SlowStatusPredictor {
        fn predict(&self, profile: &PatientProfile) -> Result<PredictionResult, PredictionError> {
            StubPredictor.predict(profile)
        }

        fn health(&self) -> Result<ServiceStatus, PredictionError> {
            std::thread::sleep(Duration::from_secs(3));
            StubPredictor.health()
        }
    }

    fn test_app() -> App {
        App::with_predictor(Arc::new(StubPredictor), "http://localhost:8000/")
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    fn wait_for_settlement(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.controller.is_loading() {
            assert!(Instant::now() < deadline, "request never settled");
            std::thread::sleep(Duration::from_millis(5));
            app.poll_settlements();
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_health_probe_records_status() {
        let mut app = test_app();
        app.start_health_probe();
        assert_eq!(app.service_health, ServiceHealth::Unknown);

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.health_probe.is_some() {
            assert!(Instant::now() < deadline, "status check never answered");
            std::thread::sleep(Duration::from_millis(5));
            app.poll_health();
        }
        assert_eq!(app.service_health, ServiceHealth::Ready("Ready".into()));
    }

    #[test]
    fn test_slow_health_probe_does_not_delay_drawing() {
        let mut app = App::with_predictor(Arc::new(SlowStatusPredictor), "http://localhost:8000/");
        let mut terminal = Terminal::new(TestBackend::new(160, 40)).expect("terminal");

        let started = Instant::now();
        app.start_health_probe();
        app.poll_health();
        terminal.draw(|f| app.draw(f)).expect("draw");
        assert!(
            started.elapsed() < Duration::from_millis(500),
            "first frame waited for the status check"
        );

        assert_eq!(app.service_health, ServiceHealth::Unknown);
        assert!(screen_text(&terminal).contains("checking"));

        // The form stays usable while the check is outstanding.
        press(&mut app, KeyCode::Enter);
        wait_for_settlement(&mut app);
        assert_eq!(app.controller.view(), View::Results);
        assert!(app.health_probe.is_some());
    }

    #[test]
    fn test_submit_then_back_to_edit() {
        let mut app = test_app();

        // Sex is the second field: switch it to female.
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Right);
        assert!((app.controller.profile().sex - 2.0).abs() < f64::EPSILON);

        press(&mut app, KeyCode::Enter);
        assert!(app.controller.is_loading());
        let ticket = app.controller.in_flight();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.controller.in_flight(), ticket);

        wait_for_settlement(&mut app);
        assert_eq!(app.controller.view(), View::Results);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.controller.view(), View::Form);
        assert!((app.controller.profile().sex - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cleared_field_is_submitted_and_fails() {
        let mut app = test_app();

        press(&mut app, KeyCode::Delete);
        assert!(app.controller.profile().get(ProfileField::Age).is_nan());

        press(&mut app, KeyCode::Enter);
        wait_for_settlement(&mut app);
        assert_eq!(app.controller.lifecycle(), Lifecycle::Failed);
        assert_eq!(app.controller.error(), Some(SERVICE_UNREACHABLE_MESSAGE));

        // Fix the field; typing does not clear the banner, Esc does.
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('0'));
        assert!((app.controller.profile().age - 50.0).abs() < f64::EPSILON);
        assert!(app.controller.error().is_some());
        press(&mut app, KeyCode::Esc);
        assert!(app.controller.error().is_none());
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
