//! RideList ride search service.
//!
//! Drivers publish rides along a route; riders search for rides whose route
//! passes near both their pickup and dropoff, in the driver's direction of
//! travel.

pub mod clients;
pub mod config;
pub mod geometry;
pub mod matcher;
pub mod net;
pub mod ride;
pub mod ride_geo;
pub mod search;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
