mod account_statement;
pub mod table;

pub use account_statement::{
    FAILED_PREFIX, LOADING_TEXT, LOANS_HEADING, PAYMENTS_HEADING, PLACEHOLDER, RETRY_BUTTON,
    account_statement_view,
};
pub use table::{ACTIONS_HEADER, DELETE_BUTTON, DeleteColumn, TableResponse, render_table};
