//! Risk assessment report view.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::domain::{DiseaseRisk, PredictionResult};
use crate::tui::styles::VitalTheme;

use super::format_value;

/// Glyph shown next to a disease name. Unknown names get a generic pulse.
#[must_use]
pub fn disease_glyph(name: &str) -> &'static str {
    match name {
        "Diabetes" => "◉",
        "Hypertension" => "≋",
        "HeartDisease" => "♥",
        _ => "∿",
    }
}

/// Render the per-disease report
pub fn render_results(f: &mut Frame, area: Rect, result: &PredictionResult) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(9),    // Disease cards
            Constraint::Length(5), // Recommendations
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_results_header(f, chunks[0]);
    render_cards(f, chunks[1], result);
    render_recommendations(f, chunks[2]);
    render_results_footer(f, chunks[3]);
}

fn render_results_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", VitalTheme::text()),
        Span::styled("Risk Assessment Report", VitalTheme::title()),
        Span::styled(" │ Analysis complete", VitalTheme::text_dim()),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(VitalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_cards(f: &mut Frame, area: Rect, result: &PredictionResult) {
    if result.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "The service returned no disease estimates.",
            VitalTheme::text_dim(),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(VitalTheme::border()),
        );
        f.render_widget(empty, area);
        return;
    }

    let count = u32::try_from(result.len()).unwrap_or(u32::MAX);
    let constraints: Vec<Constraint> = result
        .iter()
        .map(|_| Constraint::Ratio(1, count))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (entry, column) in result.iter().zip(columns.iter()) {
        render_card(f, *column, entry);
    }
}

fn render_card(f: &mut Frame, area: Rect, entry: &DiseaseRisk) {
    let risk_style = VitalTheme::risk_level(entry.risk_level);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} {} ", disease_glyph(&entry.name), entry.name),
            VitalTheme::title(),
        ))
        .borders(Borders::ALL)
        .border_style(VitalTheme::border_focused());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Probability
            Constraint::Length(2), // Risk category
            Constraint::Length(1), // Meter
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let probability = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{}%", format_value(entry.probability)),
            VitalTheme::title(),
        )),
        Line::from(Span::styled("Probability Score", VitalTheme::text_dim())),
    ]);
    f.render_widget(probability, chunks[0]);

    let category = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} Risk Category", entry.risk_level),
            risk_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            entry.risk_level.description(),
            VitalTheme::text_muted(),
        )),
    ]);
    f.render_widget(category, chunks[1]);

    let meter = Gauge::default()
        .gauge_style(risk_style)
        .percent(meter_percent(entry.probability))
        .label("");
    f.render_widget(meter, chunks[2]);
}

/// Probability (0-100) as a gauge percentage, clamped.
fn meter_percent(probability: f64) -> u16 {
    if probability.is_nan() {
        return 0;
    }
    probability.clamp(0.0, 100.0).round() as u16
}

fn render_recommendations(f: &mut Frame, area: Rect) {
    let note = Paragraph::new(vec![
        Line::from(Span::styled("✔ Recommendations", VitalTheme::focused())),
        Line::from(Span::styled(
            "Based on your input, consider monitoring cholesterol intake and maintaining regular physical activity. \
             Consult a licensed medical professional for clinical guidance.",
            VitalTheme::text_dim(),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(VitalTheme::border()),
    );

    f.render_widget(note, area);
}

fn render_results_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[Esc] ", VitalTheme::key_hint()),
        Span::styled("Back to Edit ", VitalTheme::key_desc()),
        Span::styled("[Enter] ", VitalTheme::key_hint()),
        Span::styled("Resubmit ", VitalTheme::key_desc()),
        Span::styled("[Q] ", VitalTheme::key_hint()),
        Span::styled("Quit", VitalTheme::key_desc()),
    ]))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(VitalTheme::border()),
    );

    f.render_widget(footer, area);
}
