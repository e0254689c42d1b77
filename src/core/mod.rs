// Domain-layer modules and shared errors/models
pub mod name_query {
    pub use crate::name_query::*;
}

pub mod models {
    pub use crate::ccb_models::*;
}

pub mod services {
    pub use crate::services::*;
}

pub mod transcoder {
    pub use crate::transcoder::*;
}

pub mod errors {
    pub use crate::errors::*;
}
