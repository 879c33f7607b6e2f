//! Headless core of the fair map editor.
//!
//! The editor shows a town map with everything outside the fair boundary
//! greyed out, keeps the view locked to that boundary, and lets the user
//! place and remove stall markers by clicking. This crate owns all of that
//! state and logic without any I/O: the host loads the boundary and the
//! point list, feeds them in, forwards clicks, and serves the mask tiles the
//! core renders.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::EditorCore`]: load handling, click routing, mask lifecycle |
//! | [`viewport`] | Viewport state, fit-to-bounds and max-bounds clamping |
//! | [`mask`] | Boundary mask tile rasterizer and the cached mask layer |
//! | [`boundary`] | GeoJSON boundary parsing into an immutable multipolygon |
//! | [`store`] | Replace-only point store |
//! | [`input`] | Click handling and the confirmation capability |
//! | [`point`] | Point, coordinate and marker value types |
//! | [`projection`] | Web Mercator projection and tile addressing |
//! | [`records`] | Backend place record parsing |
//! | [`consts`] | Shared constants (proximity threshold, zoom limits, colours) |

pub mod boundary;
pub mod consts;
pub mod engine;
pub mod input;
pub mod mask;
pub mod point;
pub mod projection;
pub mod records;
pub mod store;
pub mod viewport;
