pub mod contact_form;
pub mod history;
pub mod main_window;
pub mod setup;
