//! Terminal output formatting
//!
//! Coloured feedback, history listings and ASCII-art digits.

pub mod display;
pub mod formatters;

pub use display::{
    print_loss, print_phase, print_ranked, print_score, print_search_results, print_title,
    print_turn_result, print_win,
};
