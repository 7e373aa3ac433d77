//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: they are defined entirely by their
//! attribute values. A device's structured payload or a customer's short info
//! record are value objects; the device and the customer are entities.

/// Marker trait for value objects.
///
/// The trait requires:
/// - **Clone**: value objects are copied, never shared by reference
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: value objects show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
