//! Stationer
//!
//! Stationer is the domain core of a stationery storefront: catalog browsing,
//! per-user carts and wishlists, coupon evaluation, checkout pricing and the
//! order fulfillment lifecycle. Persistence and authentication are delegated
//! to pluggable collaborators — a document store and an identity provider —
//! with in-memory implementations bundled for tests and demos.

pub mod auth;
pub mod context;
pub mod domain;
pub mod fixtures;
pub mod pricing;
pub mod store;
