use crate::schedule::{Event, PendingSubstitution, Schedule};
use crate::summary::FairnessSummary;

/// One schedule line: date, kick-off, opponent (starred when high-profile)
pub fn format_event(event: &Event) -> String {
    format!(
        "{} {} {}{}",
        event.date,
        event.time.format("%H:%M"),
        event.opponent,
        if event.high_profile { " *" } else { "" }
    )
}

/// Prints the assignment table
pub fn print_schedule(events: &[Event], schedule: &Schedule) {
    println!("\n=== Schedule ===");
    for (event_id, assignment) in schedule.iter() {
        if let Some(event) = events.get(event_id) {
            println!("  {:>2}. {:<40} [{}] -> {}", event_id, format_event(event), event.day_type, assignment);
        }
    }
}

/// Prints per-person counters and pair counts
pub fn print_summary(summary: &FairnessSummary) {
    println!("\n=== Fairness ===");
    for person in &summary.people {
        let per_day: Vec<String> = person
            .per_day_type
            .iter()
            .map(|(day, count)| format!("{}={}", day, count))
            .collect();
        println!(
            "  {:<10} total={:<3} high-profile={:<3} {}",
            person.name,
            person.total,
            person.high_profile,
            per_day.join(" ")
        );
    }

    println!("\nTogether:");
    for pair in &summary.pairs {
        println!("  {} & {}: {}", pair.first, pair.second, pair.count);
    }
}

/// Prints the proposal feed
pub fn print_proposals(events: &[Event], feed: &[PendingSubstitution]) {
    if feed.is_empty() {
        return;
    }
    println!("\n=== Withdrawals ===");
    for pending in feed {
        let label = events.get(pending.event).map(format_event).unwrap_or_default();
        match &pending.replacement {
            Some(replacement) => println!("  {} withdrew from {}; proposed: {}", pending.withdrawn, label, replacement),
            None => println!("  {} withdrew from {}; no replacement available", pending.withdrawn, label),
        }
    }
}
