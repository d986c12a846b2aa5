pub mod capture_panel;
pub mod entry_list;
pub mod header;
pub mod loading;
pub mod name_modal;
pub mod photo_modal;
pub mod toast;
