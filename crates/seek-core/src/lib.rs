//! Client-side application layer for the Seek learning platform.
//!
//! Sits between `seek-api` and front ends (the `seek` CLI, or any
//! embedding application):
//!
//! - **[`RouteTable`]**: Ordered list of route descriptors resolved by a
//!   pure matcher. [`RouteTable::standard()`] builds the platform table;
//!   [`RouteTable::resolve()`] turns a URL into a [`Resolution`] carrying
//!   the [`View`], bound path/query params, and view props. Unmatched
//!   URLs resolve to [`View::NotFound`].
//!
//! - **[`Session`]**: Login / logout flows. The only writer of the
//!   durable token store the API client reads from.
//!
//! - **[`Shell`]**: Explicit application context built once at startup:
//!   the route table plus a shared [`ApiClient`](seek_api::ApiClient).

pub mod error;
pub mod route;
pub mod session;
pub mod shell;

pub use error::CoreError;
pub use route::{
    PathPattern, PropsFn, ROUTES, Resolution, RouteDef, RouteEntry, RouteParams, RouteTable, View,
    ViewProps,
};
pub use session::Session;
pub use shell::Shell;
