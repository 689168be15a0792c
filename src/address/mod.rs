//! Address pooling and binding (§4.3).

mod binder;
mod pool;
mod types;

pub use binder::bind_addresses;
pub use pool::AddressPool;
pub use types::AddressPoint;
