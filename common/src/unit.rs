//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a delivery to a customer.
#[derive(Clone, Copy, Debug)]
pub struct Delivery;
