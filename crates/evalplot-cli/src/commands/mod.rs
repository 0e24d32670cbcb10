pub mod pivots;
pub mod plot;
