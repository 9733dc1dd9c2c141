pub mod card;
pub mod page_bar;
pub mod progress_bar;
pub mod search_results;
