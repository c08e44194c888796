//! Remote AI backend client (ask / recipe / feedback / health)

mod client;
mod fallback;

pub use client::{
    ApiError, AskResponse, BreadClient, FeedbackRequest, FeedbackResponse, Ingredient, Rating,
    Recipe,
};
pub use fallback::canned_answer;
