//! UI module: View components for the TUI.
//!
//! Views are stateless: they draw whatever the controller currently holds.

pub mod form;
pub mod results;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::VitalTheme;

/// Prediction service status as last probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceHealth {
    Unknown,
    Ready(String),
    Unreachable,
}

/// Render a field value the way a user would type it ("45", "25.5", "" for NaN).
#[must_use]
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

pub fn render_header(f: &mut Frame, area: Rect, endpoint: &str, health: &ServiceHealth) {
    let (marker, status) = match health {
        ServiceHealth::Unknown => (Span::styled("○ ", VitalTheme::text_muted()), "checking".to_string()),
        ServiceHealth::Ready(status) => (Span::styled("● ", VitalTheme::success()), status.clone()),
        ServiceHealth::Unreachable => (Span::styled("● ", VitalTheme::danger()), "unreachable".to_string()),
    };

    let line = Line::from(vec![
        Span::styled(" VITAL", VitalTheme::title()),
        Span::styled("RISK", VitalTheme::brand()),
        Span::styled(" │ Disease Prediction Dashboard │ ", VitalTheme::text_muted()),
        marker,
        Span::styled(format!("{endpoint} ({status})"), VitalTheme::text_dim()),
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(VitalTheme::border()),
    );

    f.render_widget(header, area);
}

/// Error banner shown beneath either view.
pub fn render_error_banner(f: &mut Frame, area: Rect, message: &str) {
    let banner = Paragraph::new(Line::from(vec![
        Span::styled(" ! ", VitalTheme::danger()),
        Span::styled(message, VitalTheme::danger()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(VitalTheme::danger()),
    );

    f.render_widget(banner, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![Span::styled(
        "This tool is for educational purposes and provides risk estimates, not clinical diagnoses.",
        VitalTheme::text_muted(),
    )])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(VitalTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(45.0), "45");
        assert_eq!(format_value(25.5), "25.5");
        assert_eq!(format_value(888.0), "888");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(f64::NAN), "");
    }
}
