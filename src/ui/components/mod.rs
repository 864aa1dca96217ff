pub mod leaderboard_table;
pub mod menu;
pub mod modal;
pub mod nav_bar;
pub mod progress_bar;
pub mod quiz_card;
pub mod text_panel;
