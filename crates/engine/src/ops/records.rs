use sea_orm::{ActiveValue, TransactionTrait, prelude::*};

use crate::{
    EngineError, ProductionInput, ProductionRecord, RecordId, ResultEngine, production,
};

use super::{Engine, with_tx};

/// What a form submission does: create a record or replace an existing one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    New,
    Editing(RecordId),
}

impl Engine {
    /// Validates `input` and writes it.
    ///
    /// With [`EditSession::New`] a record is inserted; with
    /// [`EditSession::Editing`] every field of that record is replaced. Returns
    /// the id of the written record. Nothing is written when validation fails.
    pub async fn submit(
        &self,
        input: &ProductionInput,
        session: EditSession,
    ) -> ResultEngine<RecordId> {
        let record = input.validate()?;

        with_tx!(self, |db_tx| {
            match session {
                EditSession::New => {
                    let inserted = production::Entity::insert(production::ActiveModel::from(
                        &record,
                    ))
                    .exec(&db_tx)
                    .await?;
                    tracing::info!(id = inserted.last_insert_id, "production record created");
                    Ok(inserted.last_insert_id)
                }
                EditSession::Editing(id) => {
                    if production::Entity::find_by_id(id)
                        .one(&db_tx)
                        .await?
                        .is_none()
                    {
                        return Err(EngineError::RecordNotFound(id));
                    }
                    let mut model = production::ActiveModel::from(&record);
                    model.id = ActiveValue::Unchanged(id);
                    model.update(&db_tx).await?;
                    tracing::info!(id, "production record updated");
                    Ok(id)
                }
            }
        })
    }

    /// Inserts a new record. Shorthand for [`Engine::submit`] with
    /// [`EditSession::New`].
    pub async fn register(&self, input: &ProductionInput) -> ResultEngine<RecordId> {
        self.submit(input, EditSession::New).await
    }

    pub async fn record(&self, id: RecordId) -> ResultEngine<ProductionRecord> {
        let model = production::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or(EngineError::RecordNotFound(id))?;
        ProductionRecord::try_from(model)
    }

    pub async fn delete_record(&self, id: RecordId) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let deleted = production::Entity::delete_by_id(id).exec(&db_tx).await?;
            if deleted.rows_affected == 0 {
                return Err(EngineError::RecordNotFound(id));
            }
            tracing::info!(id, "production record deleted");
            Ok(())
        })
    }
}
