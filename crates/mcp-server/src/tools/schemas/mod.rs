pub mod article;
pub mod facets;
pub mod prompts;
pub mod search;
pub mod similar;
pub mod subscriptions;
