//! Wiring of the client core over a set of port adapters.

use std::sync::Arc;

use guesthouse_domain::RouteTable;

use crate::api::ApiClient;
use crate::auth::AuthService;
use crate::endpoints::{Beds, Bookings, Dashboard, GuestHouses, Rooms, Users};
use crate::guard::AccessGuard;
use crate::ports::{Clock, HttpTransport, KeyValueStorage, Navigator};
use crate::session::SessionStore;

/// Every core service, sharing one Session Store.
#[derive(Clone)]
pub struct ClientContext {
    /// Who is logged in.
    pub session: SessionStore,
    /// The network boundary.
    pub api: ApiClient,
    /// Credential actions.
    pub auth: AuthService,
    /// Route checks.
    pub guard: AccessGuard,
}

impl ClientContext {
    /// Builds the services. The session starts out resolving; call
    /// [`SessionStore::restore`] once at startup.
    #[must_use]
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn KeyValueStorage>,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
        routes: RouteTable,
    ) -> Self {
        let session = SessionStore::new(storage, clock);
        let api = ApiClient::new(transport, session.clone(), navigator.clone());
        let auth = AuthService::new(api.clone());
        let guard = AccessGuard::new(routes, session.clone(), navigator);
        Self {
            session,
            api,
            auth,
            guard,
        }
    }

    /// Guest house endpoints.
    #[must_use]
    pub fn guest_houses(&self) -> GuestHouses {
        GuestHouses::new(self.api.clone())
    }

    /// Room endpoints.
    #[must_use]
    pub fn rooms(&self) -> Rooms {
        Rooms::new(self.api.clone())
    }

    /// Bed endpoints and availability.
    #[must_use]
    pub fn beds(&self) -> Beds {
        Beds::new(self.api.clone())
    }

    /// Booking endpoints and status transitions.
    #[must_use]
    pub fn bookings(&self) -> Bookings {
        Bookings::new(self.api.clone())
    }

    /// Admin dashboard statistics and reports.
    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.api.clone())
    }

    /// User account endpoints.
    #[must_use]
    pub fn users(&self) -> Users {
        Users::new(self.api.clone())
    }
}
