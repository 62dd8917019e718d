use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Expense;
use crate::state::AppState;

fn check_expense(description: &str, amount: i64) -> Result<(), AppError> {
    if description.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "expense description is required".to_string(),
        ));
    }
    if amount < 0 {
        return Err(AppError::InvalidArgument(
            "expense amount cannot be negative".to_string(),
        ));
    }
    Ok(())
}

// GET /api/v1/expenses
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Expense>>, AppError> {
    let db = state.db.lock().unwrap();
    queries::list_expenses(&db).map(Json)
}

// POST /api/v1/expenses
#[derive(Deserialize)]
pub struct NewExpenseRequest {
    pub description: String,
    pub amount: i64,
    pub date_incurred: NaiveDate,
}

pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    check_expense(&body.description, body.amount)?;

    let db = state.db.lock().unwrap();
    let mut expense = Expense {
        id: 0,
        description: body.description.trim().to_string(),
        amount: body.amount,
        date_incurred: body.date_incurred,
    };
    expense.id = queries::insert_expense(&db, &expense)?;
    Ok((StatusCode::CREATED, Json(expense)))
}

// GET /api/v1/expenses/:id
pub async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Expense>, AppError> {
    let db = state.db.lock().unwrap();
    queries::get_expense(&db, id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("expense {id}")))
}

// PUT /api/v1/expenses/:id
#[derive(Deserialize)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub date_incurred: Option<NaiveDate>,
}

pub async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<ExpensePatch>,
) -> Result<Json<Expense>, AppError> {
    let db = state.db.lock().unwrap();
    let mut expense = queries::get_expense(&db, id)?
        .ok_or_else(|| AppError::NotFound(format!("expense {id}")))?;

    if let Some(description) = patch.description {
        expense.description = description.trim().to_string();
    }
    if let Some(amount) = patch.amount {
        expense.amount = amount;
    }
    if let Some(date_incurred) = patch.date_incurred {
        expense.date_incurred = date_incurred;
    }
    check_expense(&expense.description, expense.amount)?;

    queries::update_expense(&db, &expense)?;
    Ok(Json(expense))
}

// DELETE /api/v1/expenses/:id
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let db = state.db.lock().unwrap();
    if !queries::delete_expense(&db, id)? {
        return Err(AppError::NotFound(format!("expense {id}")));
    }
    Ok(StatusCode::NO_CONTENT)
}
