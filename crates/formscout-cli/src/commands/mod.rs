pub mod explore;
pub mod record;
