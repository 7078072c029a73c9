//! Five-rows-at-a-time viewer over a loaded dataset.

use std::io::{BufRead, Write};

use bikeshare_core::error::Result;
use bikeshare_core::models::{Dataset, TripRecord};
use bikeshare_ui::prompt::Console;
use bikeshare_ui::table_view::render_rows;
use tracing::debug;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

pub const FIRST_PAGE_PROMPT: &str =
    "\nWould you like to see the first 5 rows of data? Enter yes or no.\n";
pub const CONTINUE_PROMPT: &str =
    "\nDo you wish to continue? Enter any key to continue or no to stop.\n";
pub const NO_MORE_ROWS: &str = "No more rows to display.";

// ── Pager ─────────────────────────────────────────────────────────────────────

/// Cursor over consecutive windows of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    offset: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Return the window at the current offset and advance past it.
    ///
    /// Past the end this yields an empty slice.
    pub fn next_page<'a>(&mut self, dataset: &'a Dataset) -> &'a [TripRecord] {
        let page = dataset.window(self.offset, self.page_size);
        self.offset = self.offset.saturating_add(self.page_size);
        page
    }
}

// ── Viewer loop ───────────────────────────────────────────────────────────────

/// Offer raw rows page by page until the user stops or rows run out.
///
/// Returns the number of pages printed, including a final empty one.
pub fn run_viewer<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    dataset: &Dataset,
) -> Result<usize> {
    if console.ask(FIRST_PAGE_PROMPT)?.as_deref() != Some("yes") {
        return Ok(0);
    }

    let mut pager = Pager::default();
    let mut pages = 0;
    loop {
        let start = pager.offset();
        let page = pager.next_page(dataset);
        pages += 1;
        debug!("showing rows {}..{} of {}", start, start + page.len(), dataset.len());

        if page.is_empty() {
            console.say(NO_MORE_ROWS)?;
            return Ok(pages);
        }
        console.say_all(&render_rows(dataset, page))?;

        match console.ask(CONTINUE_PROMPT)?.as_deref() {
            Some("no") | None => return Ok(pages),
            Some(_) => {}
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
