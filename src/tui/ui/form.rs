//! Patient profile input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::application::{IntakeController, IntakeEvent};
use crate::domain::{FieldControl, FormSection, PatientProfile, ProfileField};
use crate::tui::styles::VitalTheme;

use super::format_value;

const SECTIONS: [FormSection; 3] = [
    FormSection::PersonalMetrics,
    FormSection::ClinicalHistory,
    FormSection::LifestyleAccess,
];

/// Cursor position and typed text for the form.
///
/// Field values themselves live in the controller; this only keeps what the
/// user is typing into numeric fields so a half-typed "25." survives redraws.
pub struct FormState {
    selected: usize,
    buffers: Vec<String>,
}

impl FormState {
    /// Seed the typing buffers from the current profile.
    #[must_use]
    pub fn from_profile(profile: &PatientProfile) -> Self {
        Self {
            selected: 0,
            buffers: ProfileField::FORM_ORDER
                .iter()
                .map(|f| format_value(profile.get(*f)))
                .collect(),
        }
    }

    #[must_use]
    pub fn selected_field(&self) -> ProfileField {
        ProfileField::FORM_ORDER[self.selected]
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected = (self.selected + 1) % ProfileField::FORM_ORDER.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected == 0 {
            self.selected = ProfileField::FORM_ORDER.len() - 1;
        } else {
            self.selected -= 1;
        }
    }

    /// Type a character into the selected numeric field.
    pub fn input_char(&mut self, c: char) -> Option<IntakeEvent> {
        if !matches!(self.selected_field().control(), FieldControl::Number { .. }) {
            return None;
        }
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return None;
        }
        self.buffers[self.selected].push(c);
        Some(self.edit_from_buffer())
    }

    /// Delete the last typed character
    pub fn delete_char(&mut self) -> Option<IntakeEvent> {
        if !matches!(self.selected_field().control(), FieldControl::Number { .. }) {
            return None;
        }
        self.buffers[self.selected].pop();
        Some(self.edit_from_buffer())
    }

    /// Empty the selected numeric field (stored as NaN)
    pub fn clear_field(&mut self) -> Option<IntakeEvent> {
        if !matches!(self.selected_field().control(), FieldControl::Number { .. }) {
            return None;
        }
        self.buffers[self.selected].clear();
        Some(self.edit_from_buffer())
    }

    /// Cycle a choice, nudge a slider, or step a number by one.
    pub fn step(&mut self, profile: &PatientProfile, forward: bool) -> Option<IntakeEvent> {
        let field = self.selected_field();
        let current = profile.get(field);

        let raw = match field.control() {
            FieldControl::Choice(options) => {
                let len = options.len();
                let next = match options.iter().position(|o| o.code == current) {
                    Some(i) if forward => (i + 1) % len,
                    Some(i) => (i + len - 1) % len,
                    None => 0,
                };
                format_value(options[next].code)
            }
            FieldControl::Range { min, max, step } => {
                let base = if current.is_nan() { min } else { current };
                let moved = if forward { base + step } else { base - step };
                format!("{:.1}", ((moved * 10.0).round() / 10.0).clamp(min, max))
            }
            FieldControl::Number { .. } => {
                let base = if current.is_nan() { 0.0 } else { current };
                let raw = format_value(if forward { base + 1.0 } else { base - 1.0 });
                self.buffers[self.selected] = raw.clone();
                raw
            }
            FieldControl::Fixed => return None,
        };

        Some(IntakeEvent::Edit { field, raw })
    }

    fn edit_from_buffer(&self) -> IntakeEvent {
        IntakeEvent::Edit {
            field: self.selected_field(),
            raw: self.buffers[self.selected].clone(),
        }
    }

    fn buffer_for(&self, field: ProfileField) -> &str {
        ProfileField::FORM_ORDER
            .iter()
            .position(|f| *f == field)
            .map_or("", |i| self.buffers[i].as_str())
    }
}

/// Render the patient profile form
pub fn render_form(f: &mut Frame, area: Rect, controller: &IntakeController, state: &FormState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_form_header(f, chunks[0]);
    render_sections(f, chunks[1], controller.profile(), state);
    render_form_footer(f, chunks[2], controller.is_loading());
}

fn render_form_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", VitalTheme::text()),
        Span::styled("Patient Health Profile", VitalTheme::title()),
        Span::styled(
            " │ Complete the clinical health assessment",
            VitalTheme::text_dim(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(VitalTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_sections(f: &mut Frame, area: Rect, profile: &PatientProfile, state: &FormState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (section, column) in SECTIONS.iter().zip(columns.iter()) {
        render_section(f, *column, *section, profile, state);
    }
}

fn render_section(
    f: &mut Frame,
    area: Rect,
    section: FormSection,
    profile: &PatientProfile,
    state: &FormState,
) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", section.title()),
            VitalTheme::section(section),
        ))
        .borders(Borders::TOP)
        .border_style(VitalTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let fields: Vec<ProfileField> = ProfileField::FORM_ORDER
        .iter()
        .copied()
        .filter(|field| field.section() == section)
        .collect();

    let constraints: Vec<Constraint> = fields
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    let selected = state.selected_field();
    for (field, row) in fields.iter().zip(rows.iter()) {
        render_field(f, *row, *field, *field == selected, profile, state);
    }
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    field: ProfileField,
    is_selected: bool,
    profile: &PatientProfile,
    state: &FormState,
) {
    let (border_style, title_style) = if is_selected {
        (VitalTheme::border_focused(), VitalTheme::focused())
    } else {
        (VitalTheme::border(), VitalTheme::text_dim())
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", field.label()), title_style))
        .borders(Borders::ALL)
        .border_style(border_style);

    let value = profile.get(field);
    let mut spans = vec![Span::raw(" ")];
    match field.control() {
        FieldControl::Number { hint } => {
            let typed = state.buffer_for(field);
            if typed.is_empty() {
                spans.push(Span::styled(hint, VitalTheme::text_muted()));
            } else {
                spans.push(Span::styled(typed.to_string(), VitalTheme::text()));
            }
            if is_selected {
                spans.push(Span::styled("▌", VitalTheme::focused()));
            }
        }
        FieldControl::Range { min, max, .. } => {
            spans.push(Span::styled("◂ ", VitalTheme::key_hint()));
            spans.push(Span::styled(format_value(value), VitalTheme::text()));
            spans.push(Span::styled(" ▸", VitalTheme::key_hint()));
            spans.push(Span::styled(
                format!("  ({}-{})", format_value(min), format_value(max)),
                VitalTheme::text_muted(),
            ));
        }
        FieldControl::Choice(options) => {
            let label = options
                .iter()
                .find(|o| o.code == value)
                .map_or("?", |o| o.label);
            spans.push(Span::styled("◂ ", VitalTheme::key_hint()));
            spans.push(Span::styled(label, VitalTheme::text()));
            spans.push(Span::styled(" ▸", VitalTheme::key_hint()));
        }
        FieldControl::Fixed => {
            spans.push(Span::styled(format_value(value), VitalTheme::text_muted()));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_form_footer(f: &mut Frame, area: Rect, loading: bool) {
    let content = if loading {
        Line::from(vec![
            Span::styled("⟳ ", VitalTheme::focused()),
            Span::styled("Analyzing profile... ", VitalTheme::text()),
            Span::styled("[Esc] ", VitalTheme::key_hint()),
            Span::styled("Abandon", VitalTheme::key_desc()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", VitalTheme::key_hint()),
            Span::styled("Navigate ", VitalTheme::key_desc()),
            Span::styled("[←→] ", VitalTheme::key_hint()),
            Span::styled("Change ", VitalTheme::key_desc()),
            Span::styled("[Enter] ", VitalTheme::key_hint()),
            Span::styled("Predict Disease Risks ", VitalTheme::key_desc()),
            Span::styled("[Esc] ", VitalTheme::key_hint()),
            Span::styled("Dismiss ", VitalTheme::key_desc()),
            Span::styled("[Q] ", VitalTheme::key_hint()),
            Span::styled("Quit", VitalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(VitalTheme::border()),
    );

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit_of(event: Option<IntakeEvent>) -> (ProfileField, String) {
        match event {
            Some(IntakeEvent::Edit { field, raw }) => (field, raw),
            other => panic!("Expected an edit, got {other:?}"),
        }
    }

    fn select(state: &mut FormState, field: ProfileField) {
        while state.selected_field() != field {
            state.next_field();
        }
    }

    #[test]
    fn test_buffers_seeded_from_profile() {
        let state = FormState::from_profile(&PatientProfile::default());
        assert_eq!(state.buffer_for(ProfileField::Age), "45");
        assert_eq!(state.buffer_for(ProfileField::GenHealth), "3");
    }

    #[test]
    fn test_navigation_wraps() {
        let mut state = FormState::from_profile(&PatientProfile::default());
        state.prev_field();
        assert_eq!(state.selected_field(), ProfileField::HealthInsurance);
        state.next_field();
        assert_eq!(state.selected_field(), ProfileField::Age);
    }

    #[test]
    fn test_typing_emits_full_buffer() {
        let mut state = FormState::from_profile(&PatientProfile::default());
        assert_eq!(
            edit_of(state.input_char('7')),
            (ProfileField::Age, "457".to_string())
        );
        assert_eq!(
            edit_of(state.delete_char()),
            (ProfileField::Age, "45".to_string())
        );
        assert_eq!(
            edit_of(state.clear_field()),
            (ProfileField::Age, String::new())
        );
        assert!(state.input_char('x').is_none());
    }

    #[test]
    fn test_typing_ignored_on_choice_fields() {
        let mut state = FormState::from_profile(&PatientProfile::default());
        select(&mut state, ProfileField::Sex);
        assert!(state.input_char('2').is_none());
        assert!(state.delete_char().is_none());
    }

    #[test]
    fn test_step_cycles_choices() {
        let profile = PatientProfile::default();
        let mut state = FormState::from_profile(&profile);
        select(&mut state, ProfileField::Alcohol);

        assert_eq!(
            edit_of(state.step(&profile, true)),
            (ProfileField::Alcohol, "101".to_string())
        );
        assert_eq!(
            edit_of(state.step(&profile, false)),
            (ProfileField::Alcohol, "210".to_string())
        );
    }

    #[test]
    fn test_step_clamps_bmi_slider() {
        let profile = PatientProfile::default().with_field(ProfileField::Bmi, 50.0);
        let mut state = FormState::from_profile(&profile);
        select(&mut state, ProfileField::Bmi);

        assert_eq!(
            edit_of(state.step(&profile, true)),
            (ProfileField::Bmi, "50.0".to_string())
        );
        assert_eq!(
            edit_of(state.step(&profile, false)),
            (ProfileField::Bmi, "49.9".to_string())
        );
    }
}
