//! Services that drive the editor core outside a request.

pub mod session;
