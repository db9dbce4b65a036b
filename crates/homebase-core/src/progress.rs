//! Progress reporting for guide fetching
//!
//! The guide is paged through one request at a time; front ends implement
//! [`Progress`] to show one marker per fetched page.

/// Receives page-level events while the guide is fetched.
pub trait Progress {
    /// Called once with the number of pages that will be fetched.
    fn begin(&mut self, _total_pages: u32) {}

    /// Called after each page, with its 1-based index and entry count.
    fn page_done(&mut self, _page: u32, _entries: usize) {}

    /// Called when the last page has been fetched.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
