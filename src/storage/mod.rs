pub mod token_store;

pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
