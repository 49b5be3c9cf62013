//! Expense API endpoints

use api_types::expense::{Expense, ExpenseNew};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn to_view(expense: engine::Expense) -> Expense {
    Expense {
        id: expense.id,
        title: expense.title,
        amount: expense.amount,
        note: expense.note,
        tags: expense.tags,
    }
}

fn to_draft(payload: ExpenseNew) -> engine::ExpenseDraft {
    engine::ExpenseDraft {
        title: payload.title,
        amount: payload.amount,
        note: payload.note,
        tags: payload.tags,
    }
}

// A body that does not deserialize is always a 400; axum's stock rejection
// would answer 422 for type mismatches inside valid JSON.
fn parse_body(payload: Result<Json<ExpenseNew>, JsonRejection>) -> Result<ExpenseNew, ServerError> {
    match payload {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => Err(ServerError::Generic(format!(
            "cannot unmarshal request body: {}",
            rejection.body_text()
        ))),
    }
}

pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), ServerError> {
    let payload = parse_body(payload)?;
    let expense = state.engine.create_expense(to_draft(payload)).await?;

    Ok((StatusCode::CREATED, Json(to_view(expense))))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<Expense>, ServerError> {
    let expense = state.engine.expense(id).await?;

    Ok(Json(to_view(expense)))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Expense>>, ServerError> {
    let expenses = state.engine.expenses().await?;

    Ok(Json(expenses.into_iter().map(to_view).collect()))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    payload: Result<Json<ExpenseNew>, JsonRejection>,
) -> Result<Json<Expense>, ServerError> {
    let payload = parse_body(payload)?;
    let expense = state.engine.update_expense(id, to_draft(payload)).await?;

    Ok(Json(to_view(expense)))
}
