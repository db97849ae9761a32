use rostercheck_engine::MatchSummary;

/// Print the per-event console summary.
pub fn print_summary(summary: &MatchSummary, event_name: &str) {
    println!();
    println!("=== Match report: {event_name} ===");
    println!("Event records:           {:>6}", summary.total);
    println!("Exact matches:           {:>6}", summary.exact);
    println!("Name swaps detected:     {:>6}", summary.name_swap);
    println!("Fuzzy matches:           {:>6}", summary.fuzzy);
    println!("Day/month transposed:    {:>6}", summary.dob_mob_swapped);
    println!("No match found:          {:>6}", summary.none);
    println!("---");
    println!("Results with issues:     {:>6}", summary.with_issues);
    println!("  day mismatches:        {:>6}", summary.dob_mismatch);
    println!("  month mismatches:      {:>6}", summary.mob_mismatch);
    println!("  year mismatches:       {:>6}", summary.yob_mismatch);
    println!("  association mismatches:{:>6}", summary.assoc_mismatch);
    println!("  sex mismatches:        {:>6}", summary.sex_mismatch);
    println!();
}
