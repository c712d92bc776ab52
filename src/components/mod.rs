pub mod context_menu;
