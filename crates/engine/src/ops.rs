//! Expense operations.
//!
//! Each operation is a single parameterized statement; no transactions are
//! opened and no ordering is imposed on listings.

use sea_orm::{ActiveValue, entity::prelude::*};

use crate::{Engine, EngineError, Expense, ExpenseDraft, ResultEngine, expenses, tags};

impl Engine {
    /// Insert a new expense and return it with its assigned id.
    pub async fn create_expense(&self, draft: ExpenseDraft) -> ResultEngine<Expense> {
        let model = expenses::ActiveModel {
            id: ActiveValue::NotSet,
            title: ActiveValue::Set(draft.title),
            amount: ActiveValue::Set(draft.amount as f64),
            note: ActiveValue::Set(draft.note),
            tags: ActiveValue::Set(tags::encode(&draft.tags)),
        };

        let model = model.insert(&self.database).await?;
        Expense::try_from(model)
    }

    /// Fetch a single expense by id.
    pub async fn expense(&self, id: i32) -> ResultEngine<Expense> {
        let model = expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;

        Expense::try_from(model)
    }

    /// Fetch every expense. Row order follows the table scan.
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find().all(&self.database).await?;

        models.into_iter().map(Expense::try_from).collect()
    }

    /// Replace every mutable field of the expense with the given id.
    pub async fn update_expense(&self, id: i32, draft: ExpenseDraft) -> ResultEngine<Expense> {
        let model = expenses::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))?;

        let mut model: expenses::ActiveModel = model.into();
        model.title = ActiveValue::Set(draft.title);
        model.amount = ActiveValue::Set(draft.amount as f64);
        model.note = ActiveValue::Set(draft.note);
        model.tags = ActiveValue::Set(tags::encode(&draft.tags));

        let model = model.update(&self.database).await?;
        Expense::try_from(model)
    }
}
