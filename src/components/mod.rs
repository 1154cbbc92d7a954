pub mod feedback;
pub mod listing;
pub mod share;
pub mod ui;
pub mod user_menu;
