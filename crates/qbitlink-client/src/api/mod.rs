//! Endpoint methods grouped by daemon resource.
//!
//! Every method is a thin caller of the request executor with a fixed
//! path, method, and body shape; the daemon's JSON payloads are surfaced
//! untyped, plain-text payloads as strings.

mod app;
mod categories;
mod log;
mod rss;
mod search;
mod sync;
mod tags;
mod torrents;
mod transfer;
