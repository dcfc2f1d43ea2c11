pub mod content;
pub mod search;
pub mod shared;
