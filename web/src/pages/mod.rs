pub mod dashboard;
pub mod history;
pub mod reservation_edit;
