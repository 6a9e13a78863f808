//! Core record store for a dog-training business.
//! Clients, dogs, lessons and payments live in one JSON document persisted
//! under a single key; this crate owns that document and every rule on it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use config::{StoreConfig, APP_VERSION, STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::client::{Client, ClientPatch, NewClient};
pub use model::document::{Document, Meta};
pub use model::dog::{Dog, DogFilter, DogPatch, NewDog};
pub use model::id::{generate_id, RecordId};
pub use model::lesson::{Lesson, LessonFilter, LessonPatch, NewLesson};
pub use model::payment::{NewPayment, Payment, PaymentFilter, PaymentPatch, PaymentStatus};
pub use model::validation::ValidationError;
pub use model::{merge, EntityKind, Record};
pub use storage::{KeyValueStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};
pub use store::{
    export_file_name, ClientSummary, ImportError, LoadOutcome, Store, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
