pub mod nav;
pub mod reservation_form;
pub mod reservation_table;
pub mod timeline;
pub mod upcoming;
