//! Authentication state and token persistence.

mod state;
mod token_store;

pub use state::{AuthError, AuthState};
pub use token_store::{
    FileTokenStore, MemoryTokenStore, StorageError, TokenStore, TOKENS_FILENAME,
};
