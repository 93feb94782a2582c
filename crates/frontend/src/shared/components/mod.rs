pub mod date_input;
pub mod stat_card;
