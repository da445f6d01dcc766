//! The visit record and its categorical dimensions.

use chrono::NaiveDateTime;

/// Hospital department a visit is booked under.
///
/// ER and OPD carry most of the volume; the rest split the remainder
/// evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Department {
    Er,
    Opd,
    Cardiology,
    Orthopedics,
    Neurology,
    Pediatrics,
}

impl Department {
    /// Draw probabilities, in declaration order. Must sum to 1.
    pub const DRAW_PROBABILITIES: [(Department, f64); 6] = [
        (Department::Er, 0.25),
        (Department::Opd, 0.35),
        (Department::Cardiology, 0.10),
        (Department::Orthopedics, 0.10),
        (Department::Neurology, 0.10),
        (Department::Pediatrics, 0.10),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Er => "ER",
            Department::Opd => "OPD",
            Department::Cardiology => "Cardiology",
            Department::Orthopedics => "Orthopedics",
            Department::Neurology => "Neurology",
            Department::Pediatrics => "Pediatrics",
        }
    }

    /// Specialist departments run longer consultations.
    pub fn is_specialist(&self) -> bool {
        matches!(self, Department::Cardiology | Department::Neurology)
    }
}

/// Urgency classification assigned at intake.
///
/// Drawn independently of department, even though real-world triage
/// correlates with it (an ER skews Critical). The independence is a
/// deliberate simplification carried over from the source data model;
/// do not "fix" it without revisiting every test that pins generated
/// distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriageLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl TriageLevel {
    pub const DRAW_PROBABILITIES: [(TriageLevel, f64); 4] = [
        (TriageLevel::Low, 0.4),
        (TriageLevel::Medium, 0.3),
        (TriageLevel::High, 0.2),
        (TriageLevel::Critical, 0.1),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TriageLevel::Low => "Low",
            TriageLevel::Medium => "Medium",
            TriageLevel::High => "High",
            TriageLevel::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitType {
    Emergency,
    Scheduled,
}

impl VisitType {
    pub const DRAW_PROBABILITIES: [(VisitType, f64); 2] = [
        (VisitType::Emergency, 0.4),
        (VisitType::Scheduled, 0.6),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitType::Emergency => "Emergency",
            VisitType::Scheduled => "Scheduled",
        }
    }
}

/// How the visit ended. Statistically independent of every other field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Discharged,
    Admitted,
    Referred,
}

impl Outcome {
    pub const DRAW_PROBABILITIES: [(Outcome, f64); 3] = [
        (Outcome::Discharged, 0.7),
        (Outcome::Admitted, 0.2),
        (Outcome::Referred, 0.1),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Discharged => "Discharged",
            Outcome::Admitted => "Admitted",
            Outcome::Referred => "Referred",
        }
    }
}

/// One synthetic patient visit.
///
/// By construction `arrival_time <= registration_time <=
/// consultation_start_time <= consultation_end_time`; the missing-data
/// injection pass nulls `registration_time` on a small fraction of rows
/// and deliberately leaves the remaining timestamps untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub patient_id: String,
    pub department: Department,
    pub triage_level: TriageLevel,
    pub visit_type: VisitType,
    pub doctor_id: String,
    pub outcome: Outcome,
    pub arrival_time: NaiveDateTime,
    pub registration_time: Option<NaiveDateTime>,
    pub consultation_start_time: NaiveDateTime,
    pub consultation_end_time: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_mass<T>(probabilities: &[(T, f64)]) -> f64 {
        probabilities.iter().map(|(_, p)| p).sum()
    }

    #[test]
    fn draw_probabilities_sum_to_one() {
        assert!((total_mass(&Department::DRAW_PROBABILITIES) - 1.0).abs() < 1e-12);
        assert!((total_mass(&TriageLevel::DRAW_PROBABILITIES) - 1.0).abs() < 1e-12);
        assert!((total_mass(&VisitType::DRAW_PROBABILITIES) - 1.0).abs() < 1e-12);
        assert!((total_mass(&Outcome::DRAW_PROBABILITIES) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn specialist_departments() {
        assert!(Department::Cardiology.is_specialist());
        assert!(Department::Neurology.is_specialist());
        assert!(!Department::Er.is_specialist());
        assert!(!Department::Opd.is_specialist());
    }
}
