//! Color palette and preset styles for the intake client.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{FormSection, RiskLevel};

/// Clinical dashboard palette.
pub struct VitalTheme;

impl VitalTheme {
    /// Indigo - primary accent
    pub const PRIMARY: Color = Color::Rgb(99, 102, 241); // #6366F1

    /// Lighter indigo for focus and hints
    pub const PRIMARY_LIGHT: Color = Color::Rgb(165, 180, 252); // #A5B4FC

    /// Pink - clinical history accent
    pub const SECONDARY: Color = Color::Rgb(236, 72, 153); // #EC4899

    /// Cyan - lifestyle accent
    pub const ACCENT: Color = Color::Rgb(34, 211, 238); // #22D3EE

    pub const SUCCESS: Color = Color::Rgb(16, 185, 129); // #10B981
    pub const WARNING: Color = Color::Rgb(245, 158, 11); // #F59E0B
    pub const DANGER: Color = Color::Rgb(239, 68, 68); // #EF4444

    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252); // #F8FAFC
    pub const TEXT_DIM: Color = Color::Rgb(148, 163, 184); // #94A3B8
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139); // #64748B
    pub const BORDER: Color = Color::Rgb(71, 85, 105); // #475569

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Brand suffix next to the title
    #[must_use]
    pub fn brand() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    /// Heading color per form section
    #[must_use]
    pub fn section(section: FormSection) -> Style {
        let color = match section {
            FormSection::PersonalMetrics => Self::PRIMARY,
            FormSection::ClinicalHistory => Self::SECONDARY,
            FormSection::LifestyleAccess => Self::ACCENT,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Meter and badge color per risk level
    #[must_use]
    pub fn risk_level(level: RiskLevel) -> Style {
        match level {
            RiskLevel::Low => Self::success(),
            RiskLevel::Moderate => Style::default().fg(Self::WARNING),
            RiskLevel::High => Self::danger(),
        }
    }
}
