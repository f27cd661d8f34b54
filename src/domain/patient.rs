//! Patient profile submitted for multi-disease risk prediction.
//!
//! Field codes follow the BRFSS (CDC Behavioral Risk Factor Surveillance
//! System) conventions the prediction service was trained on: yes/no answers
//! are coded 1/2 and alcohol frequency uses the survey's sentinel codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The submission payload.
///
/// Every attribute is a plain `f64` so an unparsable edit can be carried as
/// `NaN` instead of being rejected. Categorical attributes hold their raw
/// survey code; use [`CodedChoice`] types to interpret them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age in years (AGE)
    pub age: f64,
    /// Biological sex, see [`Sex`] (SEX)
    pub sex: f64,
    /// Self-rated general health, 1 = excellent .. 5 = poor (GENHLTH)
    pub gen_health: f64,
    /// Body-mass index, 15.0-50.0 (_BMI5, already divided by 100)
    pub bmi: f64,
    /// Days of poor physical health in the last 30 (PHYSHLTH); not editable in the form
    pub phys_health: f64,
    /// Smoked 100+ cigarettes, see [`YesNo`] (SMOKE100)
    pub smoke_status: f64,
    /// High cholesterol diagnosis, see [`Cholesterol`] (BLOODCHO)
    pub high_chol: f64,
    /// Physical activity in the last 30 days, see [`Exercise`] (EXERANY2)
    pub exercise: f64,
    /// Blood pressure medication, see [`BpMedication`] (BPMEDS)
    pub bp_meds: f64,
    /// History of stroke, see [`YesNo`] (CVDSTRK3)
    pub stroke_hist: f64,
    /// History of heart attack, see [`YesNo`] (CVDINFR4)
    pub heart_attack: f64,
    /// Alcohol intake frequency, see [`Alcohol`] (ALCDAY5)
    pub alcohol: f64,
    /// Healthcare coverage, see [`Insurance`] (HLTHPLN1)
    pub health_insurance: f64,
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            age: 45.0,
            sex: Sex::Male.code(),
            gen_health: 3.0,
            bmi: 25.5,
            phys_health: 0.0,
            smoke_status: YesNo::No.code(),
            high_chol: Cholesterol::Healthy.code(),
            exercise: Exercise::Active.code(),
            bp_meds: BpMedication::NotTaking.code(),
            stroke_hist: YesNo::No.code(),
            heart_attack: YesNo::No.code(),
            alcohol: Alcohol::Rare.code(),
            health_insurance: Insurance::Covered.code(),
        }
    }
}

impl PatientProfile {
    /// Read a single attribute.
    #[must_use]
    pub fn get(&self, field: ProfileField) -> f64 {
        match field {
            ProfileField::Age => self.age,
            ProfileField::Sex => self.sex,
            ProfileField::GenHealth => self.gen_health,
            ProfileField::Bmi => self.bmi,
            ProfileField::PhysHealth => self.phys_health,
            ProfileField::SmokeStatus => self.smoke_status,
            ProfileField::HighChol => self.high_chol,
            ProfileField::Exercise => self.exercise,
            ProfileField::BpMeds => self.bp_meds,
            ProfileField::StrokeHist => self.stroke_hist,
            ProfileField::HeartAttack => self.heart_attack,
            ProfileField::Alcohol => self.alcohol,
            ProfileField::HealthInsurance => self.health_insurance,
        }
    }

    /// Return a new profile with one attribute replaced.
    #[must_use]
    pub fn with_field(&self, field: ProfileField, value: f64) -> Self {
        let mut next = *self;
        *next.slot_mut(field) = value;
        next
    }

    /// Interpret a categorical attribute as its named choice.
    ///
    /// Returns `None` if the stored code is not one of `C`'s codes.
    #[must_use]
    pub fn coded<C: CodedChoice>(&self, field: ProfileField) -> Option<C> {
        C::from_code(self.get(field))
    }

    /// Attributes in wire order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        ProfileField::ALL.iter().map(|f| self.get(*f)).collect()
    }

    fn slot_mut(&mut self, field: ProfileField) -> &mut f64 {
        match field {
            ProfileField::Age => &mut self.age,
            ProfileField::Sex => &mut self.sex,
            ProfileField::GenHealth => &mut self.gen_health,
            ProfileField::Bmi => &mut self.bmi,
            ProfileField::PhysHealth => &mut self.phys_health,
            ProfileField::SmokeStatus => &mut self.smoke_status,
            ProfileField::HighChol => &mut self.high_chol,
            ProfileField::Exercise => &mut self.exercise,
            ProfileField::BpMeds => &mut self.bp_meds,
            ProfileField::StrokeHist => &mut self.stroke_hist,
            ProfileField::HeartAttack => &mut self.heart_attack,
            ProfileField::Alcohol => &mut self.alcohol,
            ProfileField::HealthInsurance => &mut self.health_insurance,
        }
    }
}

/// Parse raw control input into an attribute value.
///
/// Anything that is not a floating-point literal becomes `NaN`; no range
/// checks are applied.
#[must_use]
pub fn parse_raw(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// The thirteen profile keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Age,
    Sex,
    GenHealth,
    Bmi,
    PhysHealth,
    SmokeStatus,
    HighChol,
    Exercise,
    BpMeds,
    StrokeHist,
    HeartAttack,
    Alcohol,
    HealthInsurance,
}

/// Form section a field is grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSection {
    PersonalMetrics,
    ClinicalHistory,
    LifestyleAccess,
}

impl FormSection {
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::PersonalMetrics => "Personal Metrics",
            Self::ClinicalHistory => "Clinical History",
            Self::LifestyleAccess => "Lifestyle & Socio-Economic Access",
        }
    }
}

/// How a field is edited in the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldControl {
    /// Free numeric entry
    Number { hint: &'static str },
    /// Bounded slider
    Range { min: f64, max: f64, step: f64 },
    /// One of a fixed set of coded options
    Choice(Vec<ChoiceOption>),
    /// Passed through with its default value
    Fixed,
}

/// A selectable option: the wire code and its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceOption {
    pub code: f64,
    pub label: &'static str,
}

impl ProfileField {
    /// All fields in wire order.
    pub const ALL: [ProfileField; 13] = [
        Self::Age,
        Self::Sex,
        Self::GenHealth,
        Self::Bmi,
        Self::PhysHealth,
        Self::SmokeStatus,
        Self::HighChol,
        Self::Exercise,
        Self::BpMeds,
        Self::StrokeHist,
        Self::HeartAttack,
        Self::Alcohol,
        Self::HealthInsurance,
    ];

    /// Editable fields in the order the form presents them.
    pub const FORM_ORDER: [ProfileField; 12] = [
        Self::Age,
        Self::Sex,
        Self::Bmi,
        Self::GenHealth,
        Self::HighChol,
        Self::BpMeds,
        Self::StrokeHist,
        Self::HeartAttack,
        Self::SmokeStatus,
        Self::Exercise,
        Self::Alcohol,
        Self::HealthInsurance,
    ];

    /// JSON key used on the wire.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Sex => "sex",
            Self::GenHealth => "gen_health",
            Self::Bmi => "bmi",
            Self::PhysHealth => "phys_health",
            Self::SmokeStatus => "smoke_status",
            Self::HighChol => "high_chol",
            Self::Exercise => "exercise",
            Self::BpMeds => "bp_meds",
            Self::StrokeHist => "stroke_hist",
            Self::HeartAttack => "heart_attack",
            Self::Alcohol => "alcohol",
            Self::HealthInsurance => "health_insurance",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Age => "Patient Age (Years)",
            Self::Sex => "Biological Sex",
            Self::GenHealth => "General Health Self-Score",
            Self::Bmi => "Calculated BMI",
            Self::PhysHealth => "Physical Health (days unwell)",
            Self::SmokeStatus => "Smoking History (100+ cigarettes)",
            Self::HighChol => "High Cholesterol Diagnosis",
            Self::Exercise => "Physical Activity (Last 30 days)",
            Self::BpMeds => "Blood Pressure Medication",
            Self::StrokeHist => "History of Stroke",
            Self::HeartAttack => "History of Heart Attack",
            Self::Alcohol => "Alcohol Intake Frequency",
            Self::HealthInsurance => "Healthcare Insurance Coverage",
        }
    }

    #[must_use]
    pub fn section(&self) -> FormSection {
        match self {
            Self::Age | Self::Sex | Self::GenHealth | Self::Bmi | Self::PhysHealth => {
                FormSection::PersonalMetrics
            }
            Self::HighChol | Self::BpMeds | Self::StrokeHist | Self::HeartAttack => {
                FormSection::ClinicalHistory
            }
            Self::SmokeStatus | Self::Exercise | Self::Alcohol | Self::HealthInsurance => {
                FormSection::LifestyleAccess
            }
        }
    }

    #[must_use]
    pub fn control(&self) -> FieldControl {
        match self {
            Self::Age => FieldControl::Number { hint: "years" },
            Self::GenHealth => FieldControl::Number {
                hint: "1: excellent .. 5: poor",
            },
            Self::Bmi => FieldControl::Range {
                min: 15.0,
                max: 50.0,
                step: 0.1,
            },
            Self::PhysHealth => FieldControl::Fixed,
            Self::Sex => FieldControl::Choice(options::<Sex>()),
            Self::SmokeStatus | Self::StrokeHist | Self::HeartAttack => {
                FieldControl::Choice(options::<YesNo>())
            }
            Self::HighChol => FieldControl::Choice(options::<Cholesterol>()),
            Self::Exercise => FieldControl::Choice(options::<Exercise>()),
            Self::BpMeds => FieldControl::Choice(options::<BpMedication>()),
            Self::Alcohol => FieldControl::Choice(options::<Alcohol>()),
            Self::HealthInsurance => FieldControl::Choice(options::<Insurance>()),
        }
    }

    #[must_use]
    pub fn is_editable(&self) -> bool {
        !matches!(self.control(), FieldControl::Fixed)
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A field name that is not one of the thirteen profile keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile field `{0}`")]
pub struct UnknownFieldError(pub String);

impl FromStr for ProfileField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// A categorical attribute with fixed survey codes.
pub trait CodedChoice: Copy + Sized + 'static {
    /// Every choice, in display order.
    const ALL: &'static [Self];

    fn code(self) -> f64;

    fn label(self) -> &'static str;

    fn from_code(code: f64) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.code() == code)
    }
}

fn options<C: CodedChoice>() -> Vec<ChoiceOption> {
    C::ALL
        .iter()
        .map(|c| ChoiceOption {
            code: c.code(),
            label: c.label(),
        })
        .collect()
}

macro_rules! coded_choice {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:expr => $label:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl CodedChoice for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn code(self) -> f64 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

coded_choice!(
    /// Biological sex (SEX)
    Sex {
        Male = 1.0 => "Male",
        Female = 2.0 => "Female",
    }
);

coded_choice!(
    /// Generic yes/no survey answer
    YesNo {
        Yes = 1.0 => "Yes",
        No = 2.0 => "No",
    }
);

coded_choice!(
    /// High cholesterol diagnosis
    Cholesterol {
        Confirmed = 1.0 => "Confirmed",
        Healthy = 2.0 => "None / Healthy",
    }
);

coded_choice!(
    /// Any physical activity in the last 30 days
    Exercise {
        Active = 1.0 => "Active",
        Sedentary = 2.0 => "Sedentary",
    }
);

coded_choice!(
    /// Blood pressure medication
    BpMedication {
        Taking = 1.0 => "Taking BP Medication",
        NotTaking = 2.0 => "No Medication",
    }
);

coded_choice!(
    /// Alcohol intake; 888 is the survey's "no drinks" sentinel
    Alcohol {
        Rare = 888.0 => "Zero / Rare",
        Moderate = 101.0 => "Moderate",
        Heavy = 210.0 => "Heavy",
    }
);

coded_choice!(
    /// Healthcare coverage
    Insurance {
        Covered = 1.0 => "Covered",
        Uninsured = 2.0 => "No Insurance",
    }
);
