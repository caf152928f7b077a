//! Per-client dashboard views
//!
//! Every client gets its own local key collection and visibility set, keyed
//! by the `dashboardView` cookie. Requests without a usable cookie are given
//! a fresh view id, returned as `Set-Cookie`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::api::session::read_cookie;
use crate::api::types::ApiError;
use crate::domain::{ApiKeyRepository, Notifier, VisibleKeys};
use crate::infrastructure::api_key::ApiKeyManager;

/// Cookie carrying the view id
pub const VIEW_COOKIE: &str = "dashboardView";

/// Views kept before the least recently used one is dropped
const MAX_VIEWS: usize = 1024;

const MAX_VIEW_ID_LEN: usize = 64;

/// View state of the key dashboard for one client.
///
/// The manager is the only writer of the key collection; the visibility set
/// only affects how keys are displayed.
#[derive(Debug)]
pub struct Dashboard {
    pub manager: ApiKeyManager,
    pub visible: VisibleKeys,
}

impl Dashboard {
    pub fn new(manager: ApiKeyManager) -> Self {
        Self {
            manager,
            visible: VisibleKeys::new(),
        }
    }
}

/// Identifier of one client's dashboard view
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewId(String);

impl ViewId {
    fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Accept a client-supplied id if it is short and cookie-safe
    fn parse(value: &str) -> Option<Self> {
        let usable = !value.is_empty()
            && value.len() <= MAX_VIEW_ID_LEN
            && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

        usable.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ViewId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ViewId>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Dashboard view is not available"))
    }
}

/// Resolve the view id for the request, issuing a cookie for new views
pub async fn view_middleware(mut request: Request<Body>, next: Next) -> Response {
    let existing = read_cookie(request.headers(), VIEW_COOKIE).and_then(|v| ViewId::parse(&v));
    let issued = existing.is_none();
    let view = existing.unwrap_or_else(ViewId::generate);

    request.extensions_mut().insert(view.clone());

    let mut response = next.run(request).await;

    if issued {
        let cookie = format!(
            "{}={}; Path=/; SameSite=Lax; HttpOnly",
            VIEW_COOKIE,
            view.as_str()
        );
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

#[derive(Debug)]
struct ViewSlot {
    dashboard: Arc<Mutex<Dashboard>>,
    last_used: u64,
}

#[derive(Debug, Default)]
struct ViewTable {
    slots: HashMap<ViewId, ViewSlot>,
    /// Bumped on every open; orders slots by recency
    clock: u64,
}

/// Registry of live dashboard views
#[derive(Clone)]
pub struct DashboardViews {
    repository: Arc<dyn ApiKeyRepository>,
    notifier: Arc<dyn Notifier>,
    views: Arc<Mutex<ViewTable>>,
}

impl DashboardViews {
    pub fn new(repository: Arc<dyn ApiKeyRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
            views: Arc::new(Mutex::new(ViewTable::default())),
        }
    }

    /// Dashboard for `id`, created on first use
    pub async fn open(&self, id: &ViewId) -> Arc<Mutex<Dashboard>> {
        let mut table = self.views.lock().await;
        table.clock += 1;
        let now = table.clock;

        if let Some(slot) = table.slots.get_mut(id) {
            slot.last_used = now;
            return slot.dashboard.clone();
        }

        if table.slots.len() >= MAX_VIEWS {
            let oldest = table
                .slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_used)
                .map(|(id, _)| id.clone());

            if let Some(oldest) = oldest {
                debug!(view = %oldest.as_str(), "Dropping least recently used dashboard view");
                table.slots.remove(&oldest);
            }
        }

        let manager = ApiKeyManager::new(self.repository.clone(), self.notifier.clone());
        let dashboard = Arc::new(Mutex::new(Dashboard::new(manager)));

        table.slots.insert(
            id.clone(),
            ViewSlot {
                dashboard: dashboard.clone(),
                last_used: now,
            },
        );

        dashboard
    }
}
