pub mod cli_main;
pub mod session_menu;
