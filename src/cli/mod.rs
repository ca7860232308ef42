pub mod convert;
pub mod history;
pub mod rates;
pub mod session;
pub mod setup;
pub mod ui;
