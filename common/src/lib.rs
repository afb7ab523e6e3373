pub mod bucket;
pub mod category;
pub mod collect;
pub mod plot;
