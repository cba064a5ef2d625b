pub mod ride;
pub mod search;
