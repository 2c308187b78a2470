use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identifiers::EventId;
use crate::validation::{require_text, ValidationError};

/// Capacity assigned to drafts that do not declare one.
pub const DEFAULT_CAPACITY: u32 = 100;

/// Highest rating a comment (or an event average) may carry.
pub const MAX_RATING: f64 = 5.0;

/// How an event is attended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// On campus.
    #[serde(alias = "Presencial")]
    InPerson,
    /// Online only.
    #[serde(alias = "Virtual")]
    Virtual,
    /// On campus with an online stream.
    #[serde(alias = "Híbrido", alias = "Hibrido")]
    Hybrid,
}

impl Modality {
    /// Stable lowercase label, identical to the persisted form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::InPerson => "in_person",
            Modality::Virtual => "virtual",
            Modality::Hybrid => "hybrid",
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval state of an event.
///
/// `Pending` is the only state with outgoing transitions; `Published` and
/// `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Submitted, awaiting review.
    Pending,
    /// Approved and visible in the public catalog.
    Published,
    /// Declined by a reviewer.
    Rejected,
}

impl EventStatus {
    /// Returns true for states without outgoing transitions.
    pub fn is_terminal(self) -> bool {
        !matches!(self, EventStatus::Pending)
    }

    /// Stable lowercase label, identical to the persisted form.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Pending => "pending",
            EventStatus::Published => "published",
            EventStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reviewer decision applied to a pending event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `Pending -> Published`.
    Approve,
    /// `Pending -> Rejected`.
    Reject,
}

impl Transition {
    /// State reached when the transition applies.
    pub fn target(self) -> EventStatus {
        match self {
            Transition::Approve => EventStatus::Published,
            Transition::Reject => EventStatus::Rejected,
        }
    }
}

/// Result of applying a [`Transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The record moved from `from` to `to`.
    Applied {
        /// State before the transition.
        from: EventStatus,
        /// State after the transition.
        to: EventStatus,
    },
    /// The record was already terminal and kept its state.
    Unchanged(EventStatus),
}

impl TransitionOutcome {
    /// State of the record after the transition attempt.
    pub fn status(self) -> EventStatus {
        match self {
            TransitionOutcome::Applied { to, .. } => to,
            TransitionOutcome::Unchanged(status) => status,
        }
    }
}

/// A comment left on an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Comment {
    /// Display name of the author.
    pub author_name: String,
    /// Comment body.
    pub text: String,
    /// Rating between 0 and 5.
    pub rating: f64,
}

impl Comment {
    /// Builds a comment, checking the rating range.
    pub fn new(
        author_name: impl Into<String>,
        text: impl Into<String>,
        rating: f64,
    ) -> Result<Self, ValidationError> {
        check_rating(rating)?;
        let comment = Self {
            author_name: author_name.into(),
            text: text.into(),
            rating,
        };
        require_text("text", &comment.text)?;
        Ok(comment)
    }
}

fn check_rating(rating: f64) -> Result<(), ValidationError> {
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfBounds {
            field: "rating",
            value: rating.to_string(),
        });
    }
    Ok(())
}

/// An event in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Unique identifier.
    pub id: EventId,
    /// Title shown in listings.
    pub title: String,
    /// Free-form category (e.g. "Cultural", "Deportivo").
    pub category: String,
    /// Organizational unit hosting the event.
    pub organizing_unit: String,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Human-friendly date label (e.g. "20 Noviembre").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_date: Option<String>,
    /// Venue.
    pub location: String,
    /// Attendance modality.
    pub modality: Modality,
    /// Price label (e.g. "$100 MXN", "Gratis").
    pub price: String,
    /// Cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Seats available; not enforced against registrations.
    pub capacity: u32,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Approval state.
    pub status: EventStatus,
    /// Number of registrations.
    #[serde(default)]
    pub registration_count: u32,
    /// Number of attendees; may exceed `registration_count`.
    #[serde(default)]
    pub attendance_count: u32,
    /// Average rating.
    #[serde(default)]
    pub rating: f64,
    /// Comments in submission order.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl EventRecord {
    /// Creates a `Pending` record from a draft with zeroed counters.
    pub fn from_draft(id: EventId, draft: EventDraft) -> Result<Self, ValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            title: draft.title,
            category: draft.category,
            organizing_unit: draft.organizing_unit,
            date: draft.date,
            display_date: draft.display_date,
            location: draft.location,
            modality: draft.modality,
            price: draft.price,
            image_url: draft.image_url,
            capacity: draft.capacity.unwrap_or(DEFAULT_CAPACITY),
            description: draft.description,
            status: EventStatus::Pending,
            registration_count: 0,
            attendance_count: 0,
            rating: 0.0,
            comments: Vec::new(),
        })
    }

    /// Applies a reviewer decision. Only `Pending` records move.
    pub fn transition(&mut self, transition: Transition) -> TransitionOutcome {
        if self.status.is_terminal() {
            return TransitionOutcome::Unchanged(self.status);
        }
        let from = self.status;
        self.status = transition.target();
        TransitionOutcome::Applied {
            from,
            to: self.status,
        }
    }

    /// Merges the fields present in `patch` into this record.
    ///
    /// `status` only changes when the patch names one. The patch is
    /// validated before any field is touched.
    pub fn apply_patch(&mut self, patch: EventPatch) -> Result<(), ValidationError> {
        patch.validate()?;
        let EventPatch {
            title,
            category,
            organizing_unit,
            date,
            display_date,
            location,
            modality,
            price,
            image_url,
            capacity,
            description,
            status,
            registration_count,
            attendance_count,
            rating,
            comments,
        } = patch;

        if let Some(v) = title {
            self.title = v;
        }
        if let Some(v) = category {
            self.category = v;
        }
        if let Some(v) = organizing_unit {
            self.organizing_unit = v;
        }
        if let Some(v) = date {
            self.date = v;
        }
        if let Some(v) = display_date {
            self.display_date = Some(v);
        }
        if let Some(v) = location {
            self.location = v;
        }
        if let Some(v) = modality {
            self.modality = v;
        }
        if let Some(v) = price {
            self.price = v;
        }
        if let Some(v) = image_url {
            self.image_url = Some(v);
        }
        if let Some(v) = capacity {
            self.capacity = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = status {
            self.status = v;
        }
        if let Some(v) = registration_count {
            self.registration_count = v;
        }
        if let Some(v) = attendance_count {
            self.attendance_count = v;
        }
        if let Some(v) = rating {
            self.rating = v;
        }
        if let Some(v) = comments {
            self.comments = v;
        }
        Ok(())
    }

    /// Appends a comment and refreshes the average rating.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
        let sum: f64 = self.comments.iter().map(|c| c.rating).sum();
        self.rating = sum / self.comments.len() as f64;
    }
}

/// Fields an organizer supplies when submitting an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventDraft {
    /// Title shown in listings.
    pub title: String,
    /// Free-form category.
    pub category: String,
    /// Organizational unit hosting the event.
    pub organizing_unit: String,
    /// Calendar date.
    pub date: NaiveDate,
    /// Human-friendly date label.
    #[serde(default)]
    pub display_date: Option<String>,
    /// Venue.
    pub location: String,
    /// Attendance modality.
    pub modality: Modality,
    /// Price label.
    pub price: String,
    /// Cover image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Seats; [`DEFAULT_CAPACITY`] when omitted.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Long description.
    #[serde(default)]
    pub description: String,
}

impl EventDraft {
    /// Checks required text fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("category", &self.category)?;
        require_text("organizing_unit", &self.organizing_unit)?;
        require_text("location", &self.location)?;
        Ok(())
    }
}

/// Partial update of an event. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventPatch {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New category.
    #[serde(default)]
    pub category: Option<String>,
    /// New organizing unit.
    #[serde(default)]
    pub organizing_unit: Option<String>,
    /// New date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// New date label.
    #[serde(default)]
    pub display_date: Option<String>,
    /// New venue.
    #[serde(default)]
    pub location: Option<String>,
    /// New modality.
    #[serde(default)]
    pub modality: Option<Modality>,
    /// New price label.
    #[serde(default)]
    pub price: Option<String>,
    /// New cover image.
    #[serde(default)]
    pub image_url: Option<String>,
    /// New capacity.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// Administrative status override; bypasses the transition rules.
    #[serde(default)]
    pub status: Option<EventStatus>,
    /// New registration count.
    #[serde(default)]
    pub registration_count: Option<u32>,
    /// New attendance count.
    #[serde(default)]
    pub attendance_count: Option<u32>,
    /// New average rating.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Replacement comment list.
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
}

impl EventPatch {
    /// Checks that the fields being set are well-formed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(category) = &self.category {
            require_text("category", category)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        if let Some(comments) = &self.comments {
            for comment in comments {
                check_rating(comment.rating)?;
            }
        }
        Ok(())
    }
}
