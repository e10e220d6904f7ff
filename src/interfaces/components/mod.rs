pub mod card;
pub mod chart_panel;
pub mod trades_table;
