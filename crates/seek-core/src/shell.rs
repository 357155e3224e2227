// ── Application shell ──
//
// Built once at startup and handed to every caller by reference, in
// place of module-level singletons.

use std::sync::Arc;

use tracing::{debug, warn};

use seek_api::ApiClient;

use crate::error::CoreError;
use crate::route::{Resolution, RouteTable};

/// Application context: route table, shared API client, and the client
/// id handed to the Google identity widget.
#[derive(Debug)]
pub struct Shell {
    routes: RouteTable,
    api: Arc<ApiClient>,
    google_client_id: String,
}

impl Shell {
    /// Build with the platform's standard route table.
    pub fn new(api: Arc<ApiClient>, google_client_id: impl Into<String>) -> Result<Self, CoreError> {
        Ok(Self::with_routes(RouteTable::standard()?, api, google_client_id))
    }

    pub fn with_routes(
        routes: RouteTable,
        api: Arc<ApiClient>,
        google_client_id: impl Into<String>,
    ) -> Self {
        Self {
            routes,
            api,
            google_client_id: google_client_id.into(),
        }
    }

    /// Resolve the view to mount for `url`.
    pub fn navigate(&self, url: &str) -> Resolution {
        let resolution = self.routes.resolve(url);
        if resolution.is_not_found() {
            warn!(url, "no route for url, showing not-found view");
        } else {
            debug!(url, view = %resolution.view, "navigated");
        }
        resolution
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Cheap handle for tasks that outlive a borrow of the shell.
    pub fn api_handle(&self) -> Arc<ApiClient> {
        Arc::clone(&self.api)
    }

    pub fn google_client_id(&self) -> &str {
        &self.google_client_id
    }
}
