//! Built-in records written back to storage when a collection is missing
//! or cannot be parsed.

use chrono::NaiveDate;

use crate::account::{Account, AccountProfile};
use crate::dependency::{Dependency, DependencyKind};
use crate::digest::PasswordDigest;
use crate::event::{EventRecord, EventStatus, Modality};
use crate::identifiers::{DependencyId, EventId, Identity};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

/// Default accounts: one admin and one student.
pub fn accounts() -> Vec<Account> {
    vec![
        Account {
            identity: Identity::new("admin@uanl.edu.mx"),
            // sha256("admin123" || "admin@uanl.edu.mx")
            credential_digest: PasswordDigest::trusted(
                "4e18b812e1a878b963925a5431d9c853bf2534331952e259f65369cdbb74a8e6",
            ),
            display_name: "Administrador UANL".into(),
            registered_event_ids: Vec::new(),
            profile: AccountProfile::Admin {
                paternal_name: None,
                maternal_name: None,
                assigned_dependency: None,
            },
        },
        Account {
            identity: Identity::new("alumno@uanl.edu.mx"),
            // sha256("alumno123" || "alumno@uanl.edu.mx")
            credential_digest: PasswordDigest::trusted(
                "97e4e938fbac626d21f6a9f4383529e5701467da27208197915ea738890afae8",
            ),
            display_name: "Juan Pérez".into(),
            registered_event_ids: Vec::new(),
            profile: AccountProfile::Student,
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn published(
    id: &str,
    title: &str,
    category: &str,
    organizing_unit: &str,
    date: NaiveDate,
    display_date: &str,
    location: &str,
    modality: Modality,
    price: &str,
    description: &str,
) -> EventRecord {
    EventRecord {
        id: EventId::new(id),
        title: title.into(),
        category: category.into(),
        organizing_unit: organizing_unit.into(),
        date,
        display_date: Some(display_date.into()),
        location: location.into(),
        modality,
        price: price.into(),
        image_url: None,
        capacity: crate::event::DEFAULT_CAPACITY,
        description: description.into(),
        status: EventStatus::Published,
        registration_count: 0,
        attendance_count: 0,
        rating: 0.0,
        comments: Vec::new(),
    }
}

/// Default catalog, already published.
pub fn events() -> Vec<EventRecord> {
    vec![
        published(
            "1",
            "Taller de Certificación en Power BI Nivel Básico",
            "Académico",
            "FACPYA",
            date(2025, 11, 20),
            "20 Noviembre",
            "FACPYA",
            Modality::Hybrid,
            "$100 MXN",
            "Aprende las bases de datos con Microsoft Power BI.",
        ),
        published(
            "2",
            "Concierto de Gala de la Orquesta Sinfónica",
            "Cultural",
            "Artes Musicales",
            date(2025, 11, 25),
            "25 Noviembre",
            "Teatro Universitario",
            Modality::InPerson,
            "$350 MXN",
            "Noche de gala con invitados especiales.",
        ),
        published(
            "3",
            "Final de Voleibol Femenil: Tigres vs Lobas",
            "Deportivo",
            "Dirección de Deportes",
            date(2025, 11, 30),
            "30 Noviembre",
            "Gimnasio Principal",
            Modality::InPerson,
            "$50 MXN",
            "Gran final del torneo intra-universitario.",
        ),
        published(
            "4",
            "Torneo Inter-Facultades de Ajedrez",
            "Cultural",
            "Rectoría",
            date(2024, 5, 10),
            "10 Mayo",
            "Biblioteca",
            Modality::InPerson,
            "Gratis",
            "Torneo rápido de ajedrez.",
        ),
    ]
}

/// Default organizational units.
pub fn dependencies() -> Vec<Dependency> {
    vec![
        Dependency {
            id: DependencyId::new("1"),
            name: "Facultad de Ingeniería Mecánica y Eléctrica".into(),
            acronym: "FIME".into(),
            email: Identity::new("contacto@fime.uanl.mx"),
            description: "Ingeniería".into(),
            purpose: "Académico".into(),
            kind: DependencyKind::Faculty,
        },
        Dependency {
            id: DependencyId::new("2"),
            name: "Facultad de Contaduría Pública y Administración".into(),
            acronym: "FACPYA".into(),
            email: Identity::new("contacto@facpya.uanl.mx"),
            description: "Negocios".into(),
            purpose: "Académico".into(),
            kind: DependencyKind::Faculty,
        },
        Dependency {
            id: DependencyId::new("3"),
            name: "Dirección de Deportes".into(),
            acronym: "DIDE".into(),
            email: Identity::new("deportes@uanl.mx"),
            description: "Deportes UANL".into(),
            purpose: "Deportivo".into(),
            kind: DependencyKind::AdministrativeUnit,
        },
    ]
}
