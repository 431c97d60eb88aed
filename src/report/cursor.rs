//! Vertical flow state and page-break decisions.
//!
//! Every layout function receives the [`PageCursor`] explicitly. The cursor
//! is only moved through [`PageCursor::ensure_space`], [`PageCursor::advance`]
//! and [`PageCursor::break_page`].

use crate::render::{PageId, PageSize, Surface};

/// Page geometry a cursor flows over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub size: PageSize,
    /// Distance from the top edge to the first baseline.
    pub top_margin: f32,
    /// Lowest y content may reach.
    pub bottom_margin: f32,
}

impl PageLayout {
    pub fn top_y(&self) -> f32 {
        self.size.height - self.top_margin
    }

    /// Height available on an empty page.
    pub fn usable_height(&self) -> f32 {
        self.top_y() - self.bottom_margin
    }
}

/// Strategy run right after a page break, e.g. redrawing table headers.
pub type Continuation<'a, S> = &'a mut dyn FnMut(&mut S, &mut PageCursor);

#[derive(Debug, Clone)]
pub struct PageCursor {
    page: PageId,
    y: f32,
    layout: PageLayout,
    /// Nothing has been placed since the page was added.
    fresh: bool,
}

impl PageCursor {
    /// Add a page to `surface` and place the cursor at its top margin.
    pub fn start<S: Surface + ?Sized>(surface: &mut S, layout: PageLayout) -> Self {
        let page = surface.add_page(layout.size);
        Self {
            page,
            y: layout.top_y(),
            layout,
            fresh: true,
        }
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn remaining(&self) -> f32 {
        self.y - self.layout.bottom_margin
    }

    /// Whether `height` fits between the cursor and the bottom margin.
    pub fn fits(&self, height: f32) -> bool {
        self.y - height >= self.layout.bottom_margin
    }

    /// Make sure `height` fits on the current page, breaking if it doesn't.
    ///
    /// On a break the cursor moves to the top of a new page and the
    /// continuation, if any, runs immediately. A cursor still on an untouched
    /// page never breaks again, so content taller than a whole page lands on
    /// its own page instead of looping. Returns true when a break happened.
    pub fn ensure_space<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        height: f32,
        continuation: Option<Continuation<'_, S>>,
    ) -> bool {
        if self.fits(height) || self.fresh {
            return false;
        }
        self.break_page(surface);
        if let Some(redraw) = continuation {
            redraw(surface, self);
        }
        true
    }

    /// Unconditionally move to the top of a new page.
    pub fn break_page<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.page = surface.add_page(self.layout.size);
        self.y = self.layout.top_y();
        self.fresh = true;
    }

    /// Move down by `dy` after drawing.
    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
        self.fresh = false;
    }
}
