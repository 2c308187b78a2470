//! Stats command implementation.

use super::authorize;
use crate::config::Config;
use crate::output;
use campus_access::Route;
use campus_store::{EventLifecycleStore, StatsAggregator};

pub fn run(config: &Config, top: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (kv, manager) = config.session()?;
    authorize(&manager, Route::AdminReports)?;

    let store = EventLifecycleStore::open(kv);
    let report = StatsAggregator::new(store.events()).report(top);

    if json {
        println!("{}", output::format_json(&report));
        return Ok(());
    }

    println!("Events:        {}", report.total);
    println!("  published:   {}", report.active);
    println!("  pending:     {}", report.pending);
    println!("  rejected:    {}", report.rejected);
    println!("Registrations: {}", report.total_registrations);
    println!("Attendance:    {}", report.total_attendance);

    println!();
    println!("Top {} by registrations:", top);
    for (rank, entry) in report.top.iter().enumerate() {
        println!(
            "  {}. {} ({}) - {}",
            rank + 1,
            entry.title,
            entry.id,
            entry.registration_count
        );
    }

    println!();
    println!("By category:");
    for (category, count) in &report.by_category {
        println!("  {:<20} {}", category, count);
    }

    println!();
    println!("By modality:");
    for (modality, count) in &report.by_modality {
        println!("  {:<20} {}", modality.as_str(), count);
    }

    Ok(())
}
