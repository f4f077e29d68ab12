//! TOSID classification codes, KMAC knowledge statements and a semantic store
//! binding the two.
//!
//! * [`tosid`] parses, validates and compares classification codes.
//! * [`kmac`] defines the typed statement records.
//! * [`collection`] keeps statements by id and cross-checks their references.
//! * [`store`] registers classified entities and queries them by pattern or
//!   relationship.
//!
//! ```
//! use tosid_kmac::store::SemanticStore;
//!
//! let mut store = SemanticStore::new();
//! store.add_entity("E1", "Sun", "00B2-SOL-STR-SUN:000-000-000-001")?;
//! store.add_entity("E2", "Earth", "00C3-SOL-PLN-EAR:000-000-000-003")?;
//! store.create_assertion("F1", "E2", "ORBITS", "E1")?;
//!
//! assert_eq!(store.find_entities_by_tosid_pattern("00B").len(), 1);
//! assert_eq!(store.find_assertions_for_entity("E1").len(), 1);
//! # Ok::<(), tosid_kmac::Error>(())
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod kmac;
pub mod logger;
pub mod store;
pub mod tosid;

pub use error::{Error, Result};
