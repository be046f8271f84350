//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary following matklad's
//! best practices, reducing linking overhead from 3x to 1x.
//!
//! Structure:
//! - integration: full engine workflows (lift/collect/move/drop/cancel)
//! - unit: single-component tests and serialization snapshots
