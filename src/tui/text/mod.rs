//! Line wrapping for the chat display.

mod wrap;

pub(crate) use wrap::{char_chunks, wrap_message};

#[cfg(test)]
mod tests;
