use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, ResultEngine, ValidationError, branches};

use super::{Engine, with_tx};

impl Engine {
    /// Branch codes, in the order they were added.
    pub async fn branches(&self) -> ResultEngine<Vec<String>> {
        let rows = branches::Entity::find()
            .order_by_asc(branches::Column::Id)
            .all(&self.database)
            .await?;
        Ok(rows.into_iter().map(|row| row.name).collect())
    }

    /// Appends a branch code. Returns the stored (upper-cased) code.
    pub async fn add_branch(&self, name: &str) -> ResultEngine<String> {
        let name = name.trim().to_uppercase();
        if name.is_empty() {
            return Err(ValidationError::MissingField("branch").into());
        }

        with_tx!(self, |db_tx| {
            let existing = branches::Entity::find()
                .filter(branches::Column::Name.eq(name.as_str()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::ExistingKey(name));
            }
            branches::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name.clone()),
            }
            .insert(&db_tx)
            .await?;
            tracing::info!(branch = %name, "branch code added");
            Ok(name)
        })
    }
}
