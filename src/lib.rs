//! curator: terminal admin console for a paginated article curation API.
//!
//! The binary wires configuration and the API client into [`app::App`] and
//! hands control to [`ui::run`]. Everything else is the library: the
//! location/query binder ([`route`]), the page-keyed fetch state machine
//! ([`query`]), the backend client ([`api`]), and the renderers ([`ui`]).

pub mod api;
pub mod app;
pub mod config;
pub mod query;
pub mod route;
pub mod theme;
pub mod ui;
pub mod util;
