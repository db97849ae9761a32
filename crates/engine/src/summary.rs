use serde::Serialize;

use crate::model::{Issue, MatchResult, MatchType};

/// Aggregate counts over a result list, for the console summary, the HTML
/// stats block, and the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub total: usize,
    pub exact: usize,
    pub name_swap: usize,
    pub fuzzy: usize,
    pub none: usize,
    pub dob_mob_swapped: usize,
    pub dob_mismatch: usize,
    pub mob_mismatch: usize,
    pub yob_mismatch: usize,
    pub sex_mismatch: usize,
    pub assoc_mismatch: usize,
    /// Results carrying at least one issue other than NO_MATCH.
    pub with_issues: usize,
}

/// Compute summary statistics from match results.
pub fn compute_summary(results: &[MatchResult]) -> MatchSummary {
    let mut summary = MatchSummary {
        total: results.len(),
        exact: 0,
        name_swap: 0,
        fuzzy: 0,
        none: 0,
        dob_mob_swapped: 0,
        dob_mismatch: 0,
        mob_mismatch: 0,
        yob_mismatch: 0,
        sex_mismatch: 0,
        assoc_mismatch: 0,
        with_issues: 0,
    };

    for result in results {
        match result.match_type {
            MatchType::Exact => summary.exact += 1,
            MatchType::NameSwap => summary.name_swap += 1,
            MatchType::Fuzzy => summary.fuzzy += 1,
            MatchType::None => summary.none += 1,
        }

        for issue in &result.issues {
            match issue {
                Issue::DobMobSwapped => summary.dob_mob_swapped += 1,
                Issue::DobMismatch => summary.dob_mismatch += 1,
                Issue::MobMismatch => summary.mob_mismatch += 1,
                Issue::YobMismatch => summary.yob_mismatch += 1,
                Issue::SexMismatch => summary.sex_mismatch += 1,
                Issue::AssocMismatch => summary.assoc_mismatch += 1,
                _ => {}
            }
        }

        if !result.issues.is_empty() && result.issues != [Issue::NoMatch] {
            summary.with_issues += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;

    fn result(match_type: MatchType, issues: Vec<Issue>) -> MatchResult {
        let person = Person {
            extern_id: "P001".into(),
            last_name: "MUELLER".into(),
            first_name: "Hans".into(),
            sex: "M".into(),
            association: "GER".into(),
            birth_day: 15,
            birth_month: 6,
            birth_year: 1985,
        };
        let reference =
            (match_type != MatchType::None).then(|| person.clone());
        MatchResult {
            event: person,
            reference,
            match_type,
            confidence: if match_type == MatchType::None { 0.0 } else { 1.0 },
            confidence_tolerant: 0.0,
            issues,
        }
    }

    #[test]
    fn summary_counts() {
        let results = vec![
            result(MatchType::Exact, vec![]),
            result(MatchType::Exact, vec![Issue::DobMismatch, Issue::YobMismatch]),
            result(MatchType::NameSwap, vec![Issue::NameSwapped]),
            result(MatchType::Fuzzy, vec![Issue::LastnameFuzzy, Issue::DobMobSwapped]),
            result(MatchType::None, vec![Issue::NoMatch]),
        ];
        let summary = compute_summary(&results);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.exact, 2);
        assert_eq!(summary.name_swap, 1);
        assert_eq!(summary.fuzzy, 1);
        assert_eq!(summary.none, 1);
        assert_eq!(summary.dob_mob_swapped, 1);
        assert_eq!(summary.dob_mismatch, 1);
        assert_eq!(summary.yob_mismatch, 1);
        assert_eq!(summary.with_issues, 3);
    }

    #[test]
    fn no_match_results_do_not_count_as_issues() {
        let results = vec![result(MatchType::None, vec![Issue::NoMatch])];
        let summary = compute_summary(&results);
        assert_eq!(summary.with_issues, 0);
        assert_eq!(summary.none, 1);
    }
}
