use tracing::info;

use crate::api::{ActionResult, Success};
use crate::auth::Caller;
use crate::database::models::Journal;
use crate::database::store::{JournalStore, Store};
use crate::error::ActionError;
use crate::types::{Entity, Operation};
use crate::validation::{journal, RawInput};

use super::{ensure_owner_exists, Deleted};

pub async fn create(store: &dyn Store, caller: &Caller, input: &RawInput) -> ActionResult<Journal> {
    caller.require()?;
    let new_journal = journal::validate_new(input)?;
    ensure_owner_exists(store, &new_journal.user_id, Entity::Journal).await?;

    let journal = store
        .insert_journal(new_journal)
        .await
        .map_err(|e| ActionError::internal(Operation::Create, Entity::Journal, e))?;

    info!(journal_id = journal.id, user_id = %journal.user_id, "Created journal entry");
    Ok(Success::new("Journal created successfully", journal).created())
}

pub async fn get(store: &dyn Store, id: i32) -> ActionResult<Journal> {
    match store.find_journal(id).await {
        Ok(Some(journal)) => Ok(Success::new("Journal fetched successfully", journal)),
        Ok(None) => Err(ActionError::NotFound { entity: Entity::Journal, id }),
        Err(e) => Err(ActionError::internal(Operation::Select, Entity::Journal, e)),
    }
}

/// Every journal entry, newest first
pub async fn list(store: &dyn Store) -> ActionResult<Vec<Journal>> {
    let journals = store
        .list_journals()
        .await
        .map_err(|e| ActionError::internal(Operation::Select, Entity::Journal, e))?;
    Ok(Success::new("Journals fetched successfully", journals))
}

pub async fn update(store: &dyn Store, caller: &Caller, id: i32, input: &RawInput) -> ActionResult<Journal> {
    caller.require()?;
    let changes = journal::validate_changes(input)?;

    let result = if changes.is_empty() {
        store.find_journal(id).await
    } else {
        store.update_journal(id, &changes).await
    };

    match result.map_err(|e| ActionError::internal(Operation::Update, Entity::Journal, e))? {
        Some(journal) => {
            info!(journal_id = journal.id, "Updated journal entry");
            Ok(Success::new("Journal updated successfully", journal))
        }
        None => Err(ActionError::NotFound { entity: Entity::Journal, id }),
    }
}

pub async fn delete(store: &dyn Store, caller: &Caller, id: i32) -> ActionResult<Deleted> {
    caller.require()?;
    let removed = store
        .delete_journal(id)
        .await
        .map_err(|e| ActionError::internal(Operation::Delete, Entity::Journal, e))?;

    info!(journal_id = id, removed, "Deleted journal entry");
    Ok(Success::new("Journal deleted successfully", Deleted { id }))
}
