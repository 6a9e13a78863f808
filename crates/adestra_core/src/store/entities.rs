//! Per-entity entry points over the generic store operations.

use super::error::StoreResult;
use super::Store;
use crate::model::client::{Client, ClientPatch, NewClient};
use crate::model::dog::{Dog, DogFilter, DogPatch, NewDog};
use crate::model::lesson::{Lesson, LessonFilter, LessonPatch, NewLesson};
use crate::model::payment::{NewPayment, Payment, PaymentFilter, PaymentPatch};
use crate::storage::KeyValueStorage;

/// How many records reference one client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientSummary {
    pub dogs: usize,
    pub lessons: usize,
    pub payments: usize,
}

impl<S: KeyValueStorage> Store<S> {
    pub fn create_client(&mut self, new: NewClient) -> StoreResult<Client> {
        self.create(new)
    }

    pub fn update_client(&mut self, id: &str, patch: &ClientPatch) -> StoreResult<Option<Client>> {
        self.update(id, patch)
    }

    /// Removes a client. Their dogs, lessons and payments are kept and keep
    /// pointing at the removed id.
    pub fn delete_client(&mut self, id: &str) -> StoreResult<bool> {
        self.delete::<Client>(id)
    }

    pub fn client(&self, id: &str) -> Option<&Client> {
        self.get(id)
    }

    /// All clients, ordered by name.
    pub fn query_clients(&self) -> Vec<&Client> {
        self.query(&())
    }

    /// Counts records referencing `client_id`, whether or not the client exists.
    pub fn client_summary(&self, client_id: &str) -> ClientSummary {
        let document = self.document();
        ClientSummary {
            dogs: document
                .dogs
                .iter()
                .filter(|dog| dog.client_id == client_id)
                .count(),
            lessons: document
                .lessons
                .iter()
                .filter(|lesson| lesson.client_id == client_id)
                .count(),
            payments: document
                .payments
                .iter()
                .filter(|payment| payment.client_id == client_id)
                .count(),
        }
    }

    pub fn create_dog(&mut self, new: NewDog) -> StoreResult<Dog> {
        self.create(new)
    }

    pub fn update_dog(&mut self, id: &str, patch: &DogPatch) -> StoreResult<Option<Dog>> {
        self.update(id, patch)
    }

    pub fn delete_dog(&mut self, id: &str) -> StoreResult<bool> {
        self.delete::<Dog>(id)
    }

    pub fn dog(&self, id: &str) -> Option<&Dog> {
        self.get(id)
    }

    pub fn query_dogs(&self, filter: &DogFilter) -> Vec<&Dog> {
        self.query(filter)
    }

    pub fn create_lesson(&mut self, new: NewLesson) -> StoreResult<Lesson> {
        self.create(new)
    }

    pub fn update_lesson(&mut self, id: &str, patch: &LessonPatch) -> StoreResult<Option<Lesson>> {
        self.update(id, patch)
    }

    pub fn delete_lesson(&mut self, id: &str) -> StoreResult<bool> {
        self.delete::<Lesson>(id)
    }

    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.get(id)
    }

    /// Lessons matching `filter`, oldest date first.
    pub fn query_lessons(&self, filter: &LessonFilter) -> Vec<&Lesson> {
        self.query(filter)
    }

    pub fn create_payment(&mut self, new: NewPayment) -> StoreResult<Payment> {
        self.create(new)
    }

    pub fn update_payment(
        &mut self,
        id: &str,
        patch: &PaymentPatch,
    ) -> StoreResult<Option<Payment>> {
        self.update(id, patch)
    }

    pub fn delete_payment(&mut self, id: &str) -> StoreResult<bool> {
        self.delete::<Payment>(id)
    }

    pub fn payment(&self, id: &str) -> Option<&Payment> {
        self.get(id)
    }

    pub fn query_payments(&self, filter: &PaymentFilter) -> Vec<&Payment> {
        self.query(filter)
    }
}
