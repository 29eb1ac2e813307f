//! Shared data layer: configuration, the request gateway, payload
//! normalization and the canonical card model.

pub mod card;
pub mod config;
pub mod gateway;
pub mod markup;
pub mod normalize;
pub mod platform;
pub mod stream;

pub use card::CanonicalCard;
pub use gateway::{Gateway, GatewayError};
pub use normalize::{normalize, Normalized, ResponseShape};
pub use stream::ResolveError;
