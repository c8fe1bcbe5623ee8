//! Marker-delimited region synchronization for status-pulse.
//!
//! A status document carries a handful of generated regions inside otherwise
//! hand-written text:
//!
//! ```text
//! <!--SYNC-START-->
//! generated content
//! <!--SYNC-END-->
//! ```
//!
//! [`synchronize`] replaces each region with a freshly rendered payload while
//! leaving every byte outside the regions alone. It is idempotent, collapses
//! duplicated regions left behind by earlier tools, and never repairs
//! unpaired markers: those are left in place and reported as [`Anomaly`]s.
//!
//! Unmarked single elements (the last-sync badge) are handled by [`Element`]
//! with the same collapse-then-replace policy.

pub mod element;
pub mod error;
pub mod marker;
pub mod neutralize;
pub mod sync;
pub mod vocabulary;

pub use element::Element;
pub use error::{Error, Result};
pub use marker::{Marker, RegionScan, RegionState, Span, Stray, contains_marker, scan_regions};
pub use neutralize::neutralize;
pub use sync::{
    Anomaly, RegionReport, SyncOutcome, SyncReport, Target, Update, inspect, synchronize,
};
