//! External service integrations.

pub mod ccb_client {
    pub use crate::ccb_client::*;
}
