//! Expenses table entity and its domain view.
//!
//! The `amount` column is a double while the domain (and the wire) treats
//! amounts as whole units; the conversion truncates on read. Inherited
//! contract, kept as-is.

use sea_orm::entity::prelude::*;

use crate::{EngineError, tags};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub amount: f64,
    pub note: String,
    pub tags: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A stored expense with its assigned id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: i32,
    pub title: String,
    pub amount: i64,
    pub note: String,
    pub tags: Vec<String>,
}

/// The mutable fields of an expense, used for both create and update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: i64,
    pub note: String,
    pub tags: Vec<String>,
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let tags = tags::decode(&model.tags)?;

        Ok(Expense {
            id: model.id,
            title: model.title,
            amount: model.amount as i64,
            note: model.note,
            tags,
        })
    }
}
