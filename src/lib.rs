//! Giphy slash command library
//!
//! Search Giphy, sample a random preview from the results and post the chosen
//! gif. Host adapters (the `giphy` CLI, chat plugins) drive [`command::GiphyCommand`].

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod preview;
pub mod resolver;
pub mod sampler;
pub mod search;
pub mod validator;

pub use error::{GiphyError, Result};
