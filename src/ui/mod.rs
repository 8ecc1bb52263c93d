pub mod card;
pub mod panels;
