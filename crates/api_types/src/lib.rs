use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Request body for creating or replacing an expense.
    ///
    /// The record id is never part of the body: the server assigns it on
    /// create and takes it from the path on update.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub title: String,
        /// Amount in whole units. The stored column is a double; the wire
        /// representation stays integral.
        pub amount: i64,
        pub note: String,
        pub tags: Vec<String>,
    }

    /// An expense as returned by the server, id included.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i32,
        pub title: String,
        pub amount: i64,
        pub note: String,
        pub tags: Vec<String>,
    }
}
