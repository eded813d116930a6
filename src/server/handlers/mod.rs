pub mod quotes;
pub mod selections;
