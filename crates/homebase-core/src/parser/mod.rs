//! HTML parsers for homebase.no pages
//!
//! This module contains parsers for extracting data from homebase pages:
//! - `program_id`: Parse slot identifiers into programs
//! - `epg`: Parse guide pages (entries and continuation token)
//! - `storage`: Parse the storage page for already-recorded identifiers
//! - `channels`: Parse the channel list

pub mod channels;
pub mod epg;
pub mod program_id;
pub mod storage;

// Re-export main parsing functions
pub use channels::parse_channels;
pub use epg::parse_epg_page;
pub use program_id::parse_program_id;
pub use storage::parse_recorded_ids;
