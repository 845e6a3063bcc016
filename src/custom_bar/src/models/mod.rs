pub mod bar;
pub mod bar_series;
pub mod gold;
pub mod trade;
