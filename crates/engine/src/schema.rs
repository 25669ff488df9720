//! Store layout, created on first use.
//!
//! Both tables are created with `IF NOT EXISTS` every time the engine is
//! built; there is no versioned migration history.

use sea_orm::{
    ActiveValue, ConnectionTrait, DeriveIden, EntityTrait, PaginatorTrait,
    sea_query::{ColumnDef, Table, TableCreateStatement},
};

use crate::{ResultEngine, branches};

/// Learn more at https://docs.rs/sea-query#iden
#[derive(DeriveIden)]
enum Branches {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Production {
    Table,
    Id,
    Branch,
    Collaborator,
    Date,
    TaxId,
    Client,
    Product,
    Status,
    Amount,
    Notes,
}

fn branches_table() -> TableCreateStatement {
    Table::create()
        .table(Branches::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Branches::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Branches::Name).text().not_null().unique_key())
        .to_owned()
}

fn production_table() -> TableCreateStatement {
    Table::create()
        .table(Production::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Production::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Production::Branch).text().not_null())
        .col(ColumnDef::new(Production::Collaborator).text().not_null())
        .col(ColumnDef::new(Production::Date).text().not_null())
        .col(ColumnDef::new(Production::TaxId).text().not_null())
        .col(ColumnDef::new(Production::Client).text().not_null())
        .col(ColumnDef::new(Production::Product).text().not_null())
        .col(ColumnDef::new(Production::Status).text().not_null())
        .col(ColumnDef::new(Production::Amount).text().not_null())
        .col(ColumnDef::new(Production::Notes).text())
        .to_owned()
}

/// Creates missing tables and seeds the branch list when it is empty.
pub async fn ensure_schema<C>(db: &C) -> ResultEngine<()>
where
    C: ConnectionTrait,
{
    let backend = db.get_database_backend();
    db.execute(backend.build(&branches_table())).await?;
    db.execute(backend.build(&production_table())).await?;

    if branches::Entity::find().count(db).await? == 0 {
        let seed = branches::DEFAULT_BRANCHES
            .iter()
            .map(|name| branches::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set((*name).to_string()),
            });
        branches::Entity::insert_many(seed).exec(db).await?;
        tracing::info!(
            count = branches::DEFAULT_BRANCHES.len(),
            "seeded default branch codes"
        );
    }

    Ok(())
}
