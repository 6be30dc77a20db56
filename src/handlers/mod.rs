// handlers/mod.rs
//
// Public (no auth): service info and health.
// Photos (Bearer JWT): gallery, view, rename, add, under /api/v1/photos/.
pub mod photos;
pub mod public;
