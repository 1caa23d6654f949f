pub mod budget_list;
pub mod chart_canvas;
pub mod dashboard;
pub mod transaction_table;
