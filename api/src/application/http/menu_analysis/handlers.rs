pub mod analyze_menu;
