//! Subcommand handlers over an open store.
//!
//! # Invariants
//! - Handlers write human-readable lines to `out`; diagnostics go to the log.
//! - An unknown id is an error, never a silent no-op.

use crate::args::{
    ClientCommand, ClientEdit, DogCommand, DogEdit, LessonCommand, LessonEdit, PaymentCommand,
    PaymentEdit,
};
use adestra_core::{
    Client, ClientPatch, DogFilter, DogPatch, KeyValueStorage, LessonFilter, LessonPatch,
    NewClient, NewDog, NewLesson, NewPayment, PaymentFilter, PaymentPatch, PaymentStatus, Store,
};
use anyhow::{bail, Context, Result};
use chrono::Local;
use log::info;
use std::io::Write;
use std::path::Path;

pub fn run_client<S: KeyValueStorage>(
    store: &mut Store<S>,
    command: ClientCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        ClientCommand::Add(fields) => {
            let client = store.create_client(NewClient {
                name: fields.name,
                phone: fields.phone,
                email: fields.email,
                notes: fields.notes,
            })?;
            writeln!(out, "added client {} ({})", client.name, client.id)?;
        }
        ClientCommand::Edit { id, fields } => {
            let ClientEdit {
                name,
                phone,
                email,
                notes,
            } = fields;
            let patch = ClientPatch {
                name,
                phone,
                email,
                notes,
            };
            let Some(client) = store.update_client(&id, &patch)? else {
                bail!("no client with id {id}");
            };
            writeln!(out, "updated client {} ({})", client.name, client.id)?;
        }
        ClientCommand::List => {
            for client in store.query_clients() {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    client.id, client.name, client.phone, client.email
                )?;
            }
        }
        ClientCommand::Show { id } => show_client(store, &id, out)?,
        ClientCommand::Delete { id } => {
            let summary = store.client_summary(&id);
            if !store.delete_client(&id)? {
                bail!("no client with id {id}");
            }
            writeln!(out, "deleted client {id}")?;
            if summary.dogs + summary.lessons + summary.payments > 0 {
                writeln!(
                    out,
                    "warning: {} dogs, {} lessons and {} payments still reference this client and were not removed",
                    summary.dogs, summary.lessons, summary.payments
                )?;
            }
        }
    }
    Ok(())
}

fn show_client<S: KeyValueStorage>(
    store: &Store<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    let Some(client) = store.client(id) else {
        bail!("no client with id {id}");
    };
    writeln!(out, "{} ({})", client.name, client.id)?;
    writeln!(out, "phone: {}", client.phone)?;
    writeln!(out, "email: {}", client.email)?;
    if !client.notes.is_empty() {
        writeln!(out, "notes: {}", client.notes)?;
    }

    let dogs = store.query_dogs(&DogFilter::for_client(id));
    writeln!(out, "dogs: {}", dogs.len())?;
    for dog in dogs {
        writeln!(out, "  {}\t{}\t{}", dog.id, dog.name, dog.breed)?;
    }

    let lessons = store.query_lessons(&LessonFilter::for_client(id));
    writeln!(out, "lessons: {}", lessons.len())?;
    for lesson in lessons {
        writeln!(
            out,
            "  {}\t{}\t{} min\t{}",
            lesson.id,
            lesson.date,
            lesson.duration_minutes,
            dog_name(store, &lesson.dog_id)
        )?;
    }

    let payments = store.query_payments(&PaymentFilter {
        client_id: Some(id.to_string()),
        status: None,
    });
    writeln!(out, "payments: {}", payments.len())?;
    for payment in payments {
        writeln!(
            out,
            "  {}\t{}\t{:.2}\t{}\t{}",
            payment.id, payment.date, payment.amount, payment.method, payment.status
        )?;
    }
    Ok(())
}

pub fn run_dog<S: KeyValueStorage>(
    store: &mut Store<S>,
    command: DogCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        DogCommand::Add(fields) => {
            let dog = store.create_dog(NewDog {
                name: fields.name,
                breed: fields.breed,
                age: fields.age,
                client_id: fields.client,
                notes: fields.notes,
            })?;
            writeln!(out, "added dog {} ({})", dog.name, dog.id)?;
        }
        DogCommand::Edit { id, fields } => {
            let DogEdit {
                client,
                name,
                breed,
                age,
                notes,
            } = fields;
            let patch = DogPatch {
                name,
                breed,
                age,
                client_id: client,
                notes,
            };
            let Some(dog) = store.update_dog(&id, &patch)? else {
                bail!("no dog with id {id}");
            };
            writeln!(out, "updated dog {} ({})", dog.name, dog.id)?;
        }
        DogCommand::List { client } => {
            let filter = DogFilter { client_id: client };
            for dog in store.query_dogs(&filter) {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    dog.id,
                    dog.name,
                    dog.breed,
                    dog.age,
                    client_name(store.client(&dog.client_id))
                )?;
            }
        }
        DogCommand::Delete { id } => {
            if !store.delete_dog(&id)? {
                bail!("no dog with id {id}");
            }
            writeln!(out, "deleted dog {id}")?;
        }
    }
    Ok(())
}

pub fn run_lesson<S: KeyValueStorage>(
    store: &mut Store<S>,
    command: LessonCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        LessonCommand::Add(fields) => {
            let lesson = store.create_lesson(NewLesson {
                date: fields.date.unwrap_or_else(today),
                duration_minutes: f64::from(fields.duration),
                client_id: fields.client,
                dog_id: fields.dog,
                notes: fields.notes,
            })?;
            writeln!(out, "added lesson on {} ({})", lesson.date, lesson.id)?;
        }
        LessonCommand::Edit { id, fields } => {
            let LessonEdit {
                client,
                dog,
                date,
                duration,
                notes,
            } = fields;
            let patch = LessonPatch {
                date,
                duration_minutes: duration.map(f64::from),
                client_id: client,
                dog_id: dog,
                notes,
            };
            let Some(lesson) = store.update_lesson(&id, &patch)? else {
                bail!("no lesson with id {id}");
            };
            writeln!(out, "updated lesson on {} ({})", lesson.date, lesson.id)?;
        }
        LessonCommand::List { client, dog } => {
            let filter = LessonFilter {
                client_id: client,
                dog_id: dog,
            };
            for lesson in store.query_lessons(&filter) {
                writeln!(
                    out,
                    "{}\t{}\t{} min\t{}\t{}",
                    lesson.id,
                    lesson.date,
                    lesson.duration_minutes,
                    client_name(store.client(&lesson.client_id)),
                    dog_name(store, &lesson.dog_id)
                )?;
            }
        }
        LessonCommand::Delete { id } => {
            if !store.delete_lesson(&id)? {
                bail!("no lesson with id {id}");
            }
            writeln!(out, "deleted lesson {id}")?;
        }
    }
    Ok(())
}

pub fn run_payment<S: KeyValueStorage>(
    store: &mut Store<S>,
    command: PaymentCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        PaymentCommand::Add(fields) => {
            let payment = store.create_payment(NewPayment {
                client_id: fields.client,
                amount: fields.amount,
                method: fields.method,
                installment: fields.installments > 1,
                installments: f64::from(fields.installments),
                date: fields.date.unwrap_or_else(today),
                notes: fields.notes,
                status: PaymentStatus::from(fields.status),
            })?;
            writeln!(
                out,
                "added payment of {:.2} ({})",
                payment.amount, payment.id
            )?;
        }
        PaymentCommand::Edit { id, fields } => {
            let PaymentEdit {
                client,
                amount,
                method,
                installments,
                date,
                status,
                notes,
            } = fields;
            let patch = PaymentPatch {
                client_id: client,
                amount,
                method,
                installment: installments.map(|count| count > 1),
                installments: installments.map(f64::from),
                date,
                notes,
                status: status.map(PaymentStatus::from),
            };
            let Some(payment) = store.update_payment(&id, &patch)? else {
                bail!("no payment with id {id}");
            };
            writeln!(
                out,
                "updated payment of {:.2} ({})",
                payment.amount, payment.id
            )?;
        }
        PaymentCommand::List { client, status } => {
            let filter = PaymentFilter {
                client_id: client,
                status: status.map(PaymentStatus::from),
            };
            for payment in store.query_payments(&filter) {
                let installments = if payment.installment {
                    format!("{}x", payment.installments)
                } else {
                    "1x".to_string()
                };
                writeln!(
                    out,
                    "{}\t{}\t{}\t{:.2}\t{}\t{}\t{}",
                    payment.id,
                    payment.date,
                    client_name(store.client(&payment.client_id)),
                    payment.amount,
                    payment.method,
                    installments,
                    payment.status
                )?;
            }
        }
        PaymentCommand::Delete { id } => {
            if !store.delete_payment(&id)? {
                bail!("no payment with id {id}");
            }
            writeln!(out, "deleted payment {id}")?;
        }
    }
    Ok(())
}

/// Writes the pretty-printed snapshot to `path`.
pub fn run_export<S: KeyValueStorage>(
    store: &Store<S>,
    path: &Path,
    out: &mut impl Write,
) -> Result<()> {
    let snapshot = store.export_snapshot()?;
    std::fs::write(path, snapshot)
        .with_context(|| format!("failed to write backup to {}", path.display()))?;
    info!("event=cli_export module=cli status=ok");
    writeln!(out, "exported to {}", path.display())?;
    Ok(())
}

/// Replaces the whole document with the backup at `path`.
pub fn run_import<S: KeyValueStorage>(
    store: &mut Store<S>,
    path: &Path,
    confirmed: bool,
    out: &mut impl Write,
) -> Result<()> {
    if !confirmed {
        bail!("import replaces all current records; rerun with --yes to confirm");
    }
    let blob = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read backup {}", path.display()))?;
    store
        .import_snapshot(&blob)
        .with_context(|| format!("backup {} was not imported", path.display()))?;
    let document = store.document();
    writeln!(
        out,
        "imported {} clients, {} dogs, {} lessons, {} payments",
        document.clients.len(),
        document.dogs.len(),
        document.lessons.len(),
        document.payments.len()
    )?;
    Ok(())
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn client_name(client: Option<&Client>) -> &str {
    client.map_or("(removed client)", |client| client.name.as_str())
}

fn dog_name<'a, S: KeyValueStorage>(store: &'a Store<S>, dog_id: &str) -> &'a str {
    store
        .dog(dog_id)
        .map_or("(removed dog)", |dog| dog.name.as_str())
}
