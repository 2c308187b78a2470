//! Event catalog and lifecycle commands.

use super::{authorize, parse_label, read_json};
use crate::config::Config;
use crate::error::CliError;
use crate::output;
use campus_access::{Route, SessionManager};
use campus_core::{
    Comment, EventDraft, EventId, EventPatch, EventRecord, EventStatus, Modality, Role,
};
use campus_store::{
    AndFilter, CategoryFilter, DateRangeFilter, EventLifecycleStore, ModalityFilter,
    OrganizingUnitFilter, StatusFilter,
};
use chrono::NaiveDate;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum EventsCommand {
    /// List events (published only unless --all or --status is given)
    List {
        /// Only events in this state (pending, published, rejected)
        #[arg(long, value_parser = parse_label::<EventStatus>)]
        status: Option<EventStatus>,
        /// Only events in this category
        #[arg(long)]
        category: Option<String>,
        /// Only events with this modality (in_person, virtual, hybrid)
        #[arg(long, value_parser = parse_label::<Modality>)]
        modality: Option<Modality>,
        /// Only events hosted by this organizing unit
        #[arg(long)]
        unit: Option<String>,
        /// Only events on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Only events on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Include events in every state
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one event
    Show {
        /// Event id
        id: String,
    },
    /// Submit a new event for review
    Submit {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Publish a pending event
    Approve {
        /// Event id
        id: String,
    },
    /// Reject a pending event
    Reject {
        /// Event id
        id: String,
    },
    /// Apply a partial update to an event
    Update {
        /// Event id
        id: String,
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Remove an event
    Delete {
        /// Event id
        id: String,
    },
    /// Register the signed-in account for an event
    Enroll {
        /// Event id
        id: String,
    },
    /// Count one attendee at an event
    Attend {
        /// Event id
        id: String,
    },
    /// Leave a comment and rating on an event
    Comment {
        /// Event id
        id: String,
        /// Comment body
        #[arg(long)]
        text: String,
        /// Rating from 0 to 5
        #[arg(long)]
        rating: f64,
    },
}

pub fn run(config: &Config, command: EventsCommand) -> Result<(), Box<dyn std::error::Error>> {
    let (kv, mut manager) = config.session()?;
    let mut store = EventLifecycleStore::open(kv);

    match command {
        EventsCommand::List {
            status,
            category,
            modality,
            unit,
            from,
            to,
            all,
            json,
        } => {
            // Anything beyond the public catalog is part of the admin area.
            let public = !all && matches!(status, None | Some(EventStatus::Published));
            if !public {
                authorize(&manager, Route::AdminEvents)?;
            }

            let mut filter = AndFilter::default();
            if !all {
                filter.filters.push(Box::new(StatusFilter {
                    status: status.unwrap_or(EventStatus::Published),
                }));
            }
            if let Some(category) = category {
                filter.filters.push(Box::new(CategoryFilter { category }));
            }
            if let Some(modality) = modality {
                filter.filters.push(Box::new(ModalityFilter { modality }));
            }
            if let Some(organizing_unit) = unit {
                filter
                    .filters
                    .push(Box::new(OrganizingUnitFilter { organizing_unit }));
            }
            if from.is_some() || to.is_some() {
                filter.filters.push(Box::new(DateRangeFilter {
                    after: from,
                    before: to,
                }));
            }

            print_events(store.filtered(&filter), json)?;
        }
        EventsCommand::Show { id } => {
            let id = EventId::new(id);
            authorize(&manager, Route::EventDetail(id.clone()))?;
            let event = store
                .get(&id)
                .filter(|e| e.status == EventStatus::Published || is_admin(&manager))
                .ok_or_else(|| CliError::NotFound(format!("event {}", id)))?;
            println!("{}", output::format_json(event));
        }
        EventsCommand::Submit { input } => {
            authorize(&manager, Route::AdminEvents)?;
            let draft: EventDraft = read_json(input)?;
            let id = store.submit(draft)?;
            println!("Submitted {} (pending)", id);
        }
        EventsCommand::Approve { id } => {
            authorize(&manager, Route::AdminEvents)?;
            let status = store.approve(&EventId::new(id.clone()))?;
            println!("{} is {}", id, status);
        }
        EventsCommand::Reject { id } => {
            authorize(&manager, Route::AdminEvents)?;
            let status = store.reject(&EventId::new(id.clone()))?;
            println!("{} is {}", id, status);
        }
        EventsCommand::Update { id, input } => {
            authorize(&manager, Route::AdminEvents)?;
            let patch: EventPatch = read_json(input)?;
            store.update(&EventId::new(id.clone()), patch)?;
            println!("Updated {}", id);
        }
        EventsCommand::Delete { id } => {
            authorize(&manager, Route::AdminEvents)?;
            let removed = store.delete(&EventId::new(id))?;
            println!("Deleted {} ({})", removed.id, removed.title);
        }
        EventsCommand::Attend { id } => {
            authorize(&manager, Route::AdminEvents)?;
            let count = store.record_attendance(&EventId::new(id.clone()))?;
            println!("{} attendance: {}", id, count);
        }
        EventsCommand::Enroll { id } => {
            authorize(&manager, Route::MyEvents)?;
            let id = EventId::new(id);
            match enroll(&mut manager, &mut store, &id)? {
                Enrollment::AlreadyRegistered => println!("Already registered for {}", id),
                Enrollment::Registered(count) => {
                    println!("Registered for {} ({} registrations)", id, count)
                }
            }
        }
        EventsCommand::Comment { id, text, rating } => {
            authorize(&manager, Route::MyEvents)?;
            let author = manager
                .current_account()
                .map(|a| a.display_name.clone())
                .unwrap_or_default();
            let comment = Comment::new(author, text, rating)?;
            store.add_comment(&EventId::new(id.clone()), comment)?;
            println!("Comment added to {}", id);
        }
    }
    Ok(())
}

/// Outcome of enrolling the signed-in account in an event.
#[derive(Debug, PartialEq, Eq)]
enum Enrollment {
    /// Newly registered; carries the event's registration count.
    Registered(u32),
    /// The account already held this registration.
    AlreadyRegistered,
}

fn enroll(
    manager: &mut SessionManager,
    store: &mut EventLifecycleStore,
    id: &EventId,
) -> Result<Enrollment, Box<dyn std::error::Error>> {
    match store.get(id) {
        Some(event) if event.status == EventStatus::Published => {}
        _ => return Err(CliError::NotFound(format!("event {}", id)).into()),
    }
    let already = manager
        .current_account()
        .is_some_and(|a| a.is_registered_for(id));
    if already {
        return Ok(Enrollment::AlreadyRegistered);
    }

    // Counted before linking; a failed link gives the seat back.
    let count = store.record_registration(id)?;
    if let Err(e) = manager.link_event_registration(id.clone()) {
        if let Err(undo) = store.release_registration(id) {
            tracing::warn!(event_id = %id, error = %undo, "failed to release registration");
        }
        return Err(e.into());
    }
    Ok(Enrollment::Registered(count))
}

fn is_admin(manager: &SessionManager) -> bool {
    manager.session().role() == Some(Role::Admin)
}

fn print_events(
    events: Vec<&EventRecord>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }
    output::print_events_header();
    for event in events {
        println!("{}", output::format_event_row(event));
    }
    Ok(())
}
