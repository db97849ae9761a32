use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single normalized person record from either the reference registry or
/// an event file. Birth date fields are 0 when unknown; 0 participates in
/// equality like any other value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub extern_id: String,
    pub last_name: String,
    pub first_name: String,
    pub sex: String,
    pub association: String,
    pub birth_day: u32,
    pub birth_month: u32,
    pub birth_year: u32,
}

// ---------------------------------------------------------------------------
// Match outcome
// ---------------------------------------------------------------------------

/// Which search stage produced the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Exact,
    NameSwap,
    Fuzzy,
    None,
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "EXACT"),
            Self::NameSwap => write!(f, "NAME_SWAP"),
            Self::Fuzzy => write!(f, "FUZZY"),
            Self::None => write!(f, "NONE"),
        }
    }
}

/// Discrepancy codes attached to a match. The Display strings are the report
/// contract; renderers and scripts key off them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Issue {
    NameSwapped,
    LastnameFuzzy,
    FirstnameFuzzy,
    DobMobSwapped,
    DobMismatch,
    MobMismatch,
    YobMismatch,
    SexMismatch,
    AssocMismatch,
    NoMatch,
}

impl std::fmt::Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameSwapped => write!(f, "NAME_SWAPPED"),
            Self::LastnameFuzzy => write!(f, "LASTNAME_FUZZY"),
            Self::FirstnameFuzzy => write!(f, "FIRSTNAME_FUZZY"),
            Self::DobMobSwapped => write!(f, "DOB_MOB_SWAPPED"),
            Self::DobMismatch => write!(f, "DOB_MISMATCH"),
            Self::MobMismatch => write!(f, "MOB_MISMATCH"),
            Self::YobMismatch => write!(f, "YOB_MISMATCH"),
            Self::SexMismatch => write!(f, "SEX_MISMATCH"),
            Self::AssocMismatch => write!(f, "ASSOC_MISMATCH"),
            Self::NoMatch => write!(f, "NO_MATCH"),
        }
    }
}

/// One result per event record, in event-file order.
///
/// `reference` is absent exactly when `match_type` is NONE, in which case
/// `issues` is `[NoMatch]` and both scores are 0.0. `confidence_tolerant`
/// stays at the 0.0 sentinel whenever it was not computed.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub event: Person,
    pub reference: Option<Person>,
    pub match_type: MatchType,
    pub confidence: f64,
    pub confidence_tolerant: f64,
    pub issues: Vec<Issue>,
}
