use strsim::jaro_winkler;

use crate::config::{MatchConfig, FIRSTNAME_THRESHOLD};
use crate::index::{CandidateIndex, NameKey};
use crate::model::{Issue, MatchResult, MatchType, Person};
use crate::normalize;
use crate::scoring;

/// Match every event record against the reference registry.
///
/// Four-stage search per event record, terminal at the first stage that
/// yields a candidate:
/// 1. exact (last, first) index lookup
/// 2. swapped (first, last) index lookup
/// 3. full fuzzy scan with Jaro-Winkler, gated by both thresholds
/// 4. no match
///
/// Returns exactly one result per event record, in event order. Event
/// records are independent of each other; the output is invariant to their
/// processing order.
pub fn match_records(
    reference: &[Person],
    events: &[Person],
    config: &MatchConfig,
) -> Vec<MatchResult> {
    let index = CandidateIndex::build(reference);

    let mut results = Vec::with_capacity(events.len());
    for event in events {
        let key = NameKey::of(event);

        let exact = index.exact(&key);
        if !exact.is_empty() {
            results.push(pick_best(event, exact, reference, MatchType::Exact));
            continue;
        }

        let swapped = index.swapped(&key);
        if !swapped.is_empty() {
            results.push(pick_best(event, swapped, reference, MatchType::NameSwap));
            continue;
        }

        if let Some(result) = fuzzy_scan(event, reference, config) {
            results.push(result);
            continue;
        }

        results.push(MatchResult {
            event: event.clone(),
            reference: None,
            match_type: MatchType::None,
            confidence: 0.0,
            confidence_tolerant: 0.0,
            issues: vec![Issue::NoMatch],
        });
    }

    results
}

/// Select the best of one or more index candidates.
///
/// Index hits are perfect name matches by construction (a swap hit counts
/// as a perfect name match), so both name similarities are 1.0. Ties keep
/// the earliest reference entry: the comparison is a strict `>`, never
/// `>=`, which would silently change which duplicate wins.
fn pick_best(
    event: &Person,
    positions: &[usize],
    reference: &[Person],
    match_type: MatchType,
) -> MatchResult {
    let mut best_pos = positions[0];
    let mut best_confidence = scoring::confidence(event, &reference[best_pos], 1.0, 1.0);

    for &pos in &positions[1..] {
        let confidence = scoring::confidence(event, &reference[pos], 1.0, 1.0);
        if confidence > best_confidence {
            best_confidence = confidence;
            best_pos = pos;
        }
    }

    let winner = &reference[best_pos];
    MatchResult {
        event: event.clone(),
        reference: Some(winner.clone()),
        match_type,
        confidence: best_confidence,
        confidence_tolerant: scoring::confidence_tolerant(event, winner, 1.0, 1.0),
        issues: scoring::detect_issues(event, winner, match_type, 1.0, 1.0),
    }
}

/// Scan the whole reference set for the best fuzzy candidate.
///
/// O(|reference|) per event record; once exact keys fail, similarity is
/// not a hash-friendly relation. Candidates must clear the last-name
/// threshold AND the fixed first-name threshold; among survivors the
/// highest confidence wins, earliest reference entry on ties.
fn fuzzy_scan(event: &Person, reference: &[Person], config: &MatchConfig) -> Option<MatchResult> {
    let event_last = normalize::key(&event.last_name);
    let event_first = normalize::key(&event.first_name);

    let mut best: Option<(f64, usize, f64, f64)> = None;

    for (pos, candidate) in reference.iter().enumerate() {
        let lastname_sim = jaro_winkler(&event_last, &normalize::key(&candidate.last_name));
        let firstname_sim = jaro_winkler(&event_first, &normalize::key(&candidate.first_name));

        if lastname_sim < config.lastname_threshold || firstname_sim < FIRSTNAME_THRESHOLD {
            continue;
        }

        let confidence = scoring::confidence(event, candidate, lastname_sim, firstname_sim);
        match best {
            Some((best_confidence, ..)) if confidence <= best_confidence => {}
            _ => best = Some((confidence, pos, lastname_sim, firstname_sim)),
        }
    }

    best.map(|(confidence, pos, lastname_sim, firstname_sim)| {
        let winner = &reference[pos];
        MatchResult {
            event: event.clone(),
            reference: Some(winner.clone()),
            match_type: MatchType::Fuzzy,
            confidence,
            confidence_tolerant: scoring::confidence_tolerant(
                event,
                winner,
                lastname_sim,
                firstname_sim,
            ),
            issues: scoring::detect_issues(
                event,
                winner,
                MatchType::Fuzzy,
                lastname_sim,
                firstname_sim,
            ),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::WEIGHTS;

    fn person(extern_id: &str) -> Person {
        Person {
            extern_id: extern_id.into(),
            last_name: "MUELLER".into(),
            first_name: "Hans".into(),
            sex: "M".into(),
            association: "GER".into(),
            birth_day: 15,
            birth_month: 6,
            birth_year: 1985,
        }
    }

    fn config() -> MatchConfig {
        MatchConfig::default()
    }

    #[test]
    fn exact_match_found() {
        let reference = vec![person("P001")];
        let events = vec![person("E001")];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_type, MatchType::Exact);
        assert_eq!(results[0].confidence, 1.0);
        assert_eq!(results[0].confidence_tolerant, 1.0);
        assert!(results[0].issues.is_empty());
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let reference = vec![Person {
            last_name: "Mueller".into(),
            first_name: "HANS".into(),
            ..person("P001")
        }];
        let events = vec![person("E001")];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].match_type, MatchType::Exact);
    }

    #[test]
    fn exact_match_with_day_difference() {
        let reference = vec![person("P001")];
        let events = vec![Person { birth_day: 16, ..person("E001") }];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].match_type, MatchType::Exact);
        assert!(results[0].issues.contains(&Issue::DobMismatch));
        assert_eq!(results[0].confidence, 1.0 - WEIGHTS.birth_day);
    }

    #[test]
    fn name_swap_detected() {
        let reference = vec![Person {
            last_name: "SIMON".into(),
            first_name: "Csaba".into(),
            ..person("P001")
        }];
        let events = vec![Person {
            last_name: "Csaba".into(),
            first_name: "SIMON".into(),
            ..person("E001")
        }];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].match_type, MatchType::NameSwap);
        assert!(results[0].issues.contains(&Issue::NameSwapped));
        assert_eq!(results[0].confidence, 1.0);
    }

    #[test]
    fn fuzzy_match_on_typo() {
        let reference = vec![person("P001")];
        let events = vec![Person { last_name: "MULLER".into(), ..person("E001") }];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].match_type, MatchType::Fuzzy);
        assert!(results[0].issues.contains(&Issue::LastnameFuzzy));
        assert!(results[0].confidence < 1.0);
    }

    #[test]
    fn no_match_below_threshold() {
        let reference = vec![Person {
            last_name: "COMPLETELY_DIFFERENT".into(),
            ..person("P001")
        }];
        let events = vec![Person { last_name: "XYZ_SOMETHING".into(), ..person("E001") }];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].match_type, MatchType::None);
    }

    #[test]
    fn one_qualifying_axis_is_not_enough() {
        // Last names identical (similarity 1.0), first names unrelated:
        // the first-name threshold still gates the candidate out.
        let reference = vec![Person { first_name: "Wolfgang".into(), ..person("P001") }];
        let events = vec![Person { first_name: "Hans".into(), ..person("E001") }];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].match_type, MatchType::None);
    }

    #[test]
    fn empty_reference_yields_none() {
        let events = vec![person("E001")];
        let results = match_records(&[], &events, &config());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_type, MatchType::None);
        assert!(results[0].reference.is_none());
        assert_eq!(results[0].confidence, 0.0);
        assert_eq!(results[0].confidence_tolerant, 0.0);
        assert_eq!(results[0].issues, vec![Issue::NoMatch]);
    }

    #[test]
    fn one_result_per_event_in_input_order() {
        let reference = vec![person("P001")];
        let events = vec![
            person("E001"),
            Person { last_name: "Nobody".into(), first_name: "Known".into(), ..person("E002") },
            Person { birth_day: 16, ..person("E003") },
        ];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results.len(), events.len());
        for (result, event) in results.iter().zip(&events) {
            assert_eq!(result.event.extern_id, event.extern_id);
        }
    }

    #[test]
    fn tie_goes_to_earliest_reference_entry() {
        // Two reference entries with identical keys and identical fields:
        // same confidence, the first one must win.
        let reference = vec![person("P001"), person("P002")];
        let events = vec![person("E001")];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].reference.as_ref().unwrap().extern_id, "P001");
    }

    #[test]
    fn higher_confidence_beats_reference_order() {
        // Both share the event's name key, but the second also matches the
        // birth year, so it scores higher and wins despite coming later.
        let reference = vec![Person { birth_year: 1900, ..person("P001") }, person("P002")];
        let events = vec![person("E001")];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].reference.as_ref().unwrap().extern_id, "P002");
        assert_eq!(results[0].confidence, 1.0);
    }

    #[test]
    fn date_transposition_flagged_on_exact_match() {
        let reference = vec![Person { birth_day: 5, birth_month: 2, ..person("P001") }];
        let events = vec![Person { birth_day: 2, birth_month: 5, ..person("E001") }];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].match_type, MatchType::Exact);
        assert!(results[0].issues.contains(&Issue::DobMobSwapped));
        assert!(!results[0].issues.contains(&Issue::DobMismatch));
        assert!(!results[0].issues.contains(&Issue::MobMismatch));
        assert_eq!(results[0].confidence, 1.0);
    }

    #[test]
    fn swap_stage_only_runs_after_exact_misses() {
        // A record matching exactly must not be reported as a swap even
        // though its mirrored key also exists in the reference set.
        let reference = vec![
            Person { last_name: "Anna".into(), first_name: "Lena".into(), ..person("P001") },
            Person { last_name: "Lena".into(), first_name: "Anna".into(), ..person("P002") },
        ];
        let events = vec![Person {
            last_name: "Anna".into(),
            first_name: "Lena".into(),
            ..person("E001")
        }];
        let results = match_records(&reference, &events, &config());
        assert_eq!(results[0].match_type, MatchType::Exact);
        assert_eq!(results[0].reference.as_ref().unwrap().extern_id, "P001");
    }

    #[test]
    fn matching_is_deterministic() {
        let reference = vec![
            person("P001"),
            Person { last_name: "Schmidt".into(), ..person("P002") },
            person("P003"),
        ];
        let events = vec![
            person("E001"),
            Person { last_name: "MULLER".into(), ..person("E002") },
            Person { last_name: "Unrelated".into(), first_name: "Totally".into(), ..person("E003") },
        ];
        let first = match_records(&reference, &events, &config());
        let second = match_records(&reference, &events, &config());
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
