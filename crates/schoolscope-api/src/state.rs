//! Shared state threaded through the router.

use crate::http::cors::CorsPolicy;
use crate::store::SharedStore;

pub(crate) struct ApiState {
    pub(crate) store: SharedStore,
    pub(crate) cors: CorsPolicy,
}
