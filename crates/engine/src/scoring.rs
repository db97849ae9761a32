use strsim::jaro_winkler;

use crate::model::{Issue, MatchType, Person};
use crate::normalize;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Component weights for the confidence score.
#[derive(Debug, Clone, Copy)]
pub struct Weights {
    pub lastname: f64,
    pub firstname: f64,
    pub birth_day: f64,
    pub birth_month: f64,
    pub birth_year: f64,
    pub sex: f64,
    pub association: f64,
}

/// The fixed scoring weights. Their sum must stay exactly 1.0 so a perfect
/// match scores 1.0; the test suite pins this.
pub const WEIGHTS: Weights = Weights {
    lastname: 0.30,
    firstname: 0.25,
    birth_day: 0.10,
    birth_month: 0.10,
    birth_year: 0.15,
    sex: 0.05,
    association: 0.05,
};

impl Weights {
    pub fn sum(&self) -> f64 {
        self.lastname
            + self.firstname
            + self.birth_day
            + self.birth_month
            + self.birth_year
            + self.sex
            + self.association
    }
}

// ---------------------------------------------------------------------------
// Confidence
// ---------------------------------------------------------------------------

/// Round to 4 decimal places. Downstream tie-breaking and the report layer
/// compare rounded values, so this is part of the scoring contract.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

/// Weighted confidence score in [0, 1], rounded to 4 decimal places.
///
/// Name components use the supplied similarities directly. Date and code
/// components contribute their full weight only on equality, except that a
/// detected day/month transposition gives full credit for both date fields.
pub fn confidence(event: &Person, reference: &Person, lastname_sim: f64, firstname_sim: f64) -> f64 {
    let transposed = is_birth_date_transposed(event, reference);
    let day_matches = transposed || event.birth_day == reference.birth_day;
    let month_matches = transposed || event.birth_month == reference.birth_month;

    let score = WEIGHTS.lastname * lastname_sim
        + WEIGHTS.firstname * firstname_sim
        + if day_matches { WEIGHTS.birth_day } else { 0.0 }
        + if month_matches { WEIGHTS.birth_month } else { 0.0 }
        + if event.birth_year == reference.birth_year { WEIGHTS.birth_year } else { 0.0 }
        + if eq_ignore_case(&event.sex, &reference.sex) { WEIGHTS.sex } else { 0.0 }
        + if eq_ignore_case(&event.association, &reference.association) {
            WEIGHTS.association
        } else {
            0.0
        };

    round4(score)
}

/// Tolerant variant of [`confidence`]: each name similarity is replaced by
/// 1.0 when the tolerant-normalized forms are equal, otherwise by the
/// maximum of the original similarity and the similarity of the
/// tolerant-normalized forms.
pub fn confidence_tolerant(
    event: &Person,
    reference: &Person,
    lastname_sim: f64,
    firstname_sim: f64,
) -> f64 {
    let last = tolerant_similarity(&event.last_name, &reference.last_name, lastname_sim);
    let first = tolerant_similarity(&event.first_name, &reference.first_name, firstname_sim);
    confidence(event, reference, last, first)
}

fn tolerant_similarity(event_name: &str, reference_name: &str, sim: f64) -> f64 {
    let a = normalize::tolerant(event_name);
    let b = normalize::tolerant(reference_name);
    if a == b {
        1.0
    } else {
        sim.max(jaro_winkler(&a, &b))
    }
}

// ---------------------------------------------------------------------------
// Date transposition
// ---------------------------------------------------------------------------

/// True when the event's day/month are the reference's month/day with the
/// same year. A swap where day equals month carries no signal and is not
/// flagged.
pub fn is_birth_date_transposed(event: &Person, reference: &Person) -> bool {
    event.birth_day == reference.birth_month
        && event.birth_month == reference.birth_day
        && event.birth_year == reference.birth_year
        && event.birth_day != event.birth_month
}

// ---------------------------------------------------------------------------
// Issue detection
// ---------------------------------------------------------------------------

/// Enumerate discrepancy codes between an event record and a candidate.
///
/// Evaluated independently of the confidence score. Emission order is the
/// rendering order in reports. A detected date transposition suppresses the
/// two individual date mismatch codes.
pub fn detect_issues(
    event: &Person,
    reference: &Person,
    match_type: MatchType,
    lastname_sim: f64,
    firstname_sim: f64,
) -> Vec<Issue> {
    let mut issues = Vec::new();

    if match_type == MatchType::NameSwap {
        issues.push(Issue::NameSwapped);
    }

    if match_type == MatchType::Fuzzy {
        if lastname_sim < 1.0 {
            issues.push(Issue::LastnameFuzzy);
        }
        if firstname_sim < 1.0 {
            issues.push(Issue::FirstnameFuzzy);
        }
    }

    if is_birth_date_transposed(event, reference) {
        issues.push(Issue::DobMobSwapped);
    } else {
        if event.birth_day != reference.birth_day {
            issues.push(Issue::DobMismatch);
        }
        if event.birth_month != reference.birth_month {
            issues.push(Issue::MobMismatch);
        }
    }

    if event.birth_year != reference.birth_year {
        issues.push(Issue::YobMismatch);
    }
    if !eq_ignore_case(&event.sex, &reference.sex) {
        issues.push(Issue::SexMismatch);
    }
    if !eq_ignore_case(&event.association, &reference.association) {
        issues.push(Issue::AssocMismatch);
    }

    issues
}
