// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// 1-based page actually shown after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 0-based index of the first item within the full list.
    pub first_index: usize,
}

impl<T> PageSlice<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `"6-10 of 12"`, or `"0 of 0"` for an empty list.
    pub fn range_label(&self) -> String {
        if self.items.is_empty() {
            return format!("0 of {}", self.total_items);
        }
        format!(
            "{}-{} of {}",
            self.first_index + 1,
            self.first_index + self.items.len(),
            self.total_items
        )
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slices out one page. Out-of-range pages clamp instead of failing and a
/// zero page size is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> PageSlice<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page = clamp_page(page, total_pages);
    let first_index = (page - 1) * page_size;
    let end = (first_index + page_size).min(total_items);
    PageSlice {
        items: items[first_index..end].to_vec(),
        page,
        total_pages,
        total_items,
        first_index,
    }
}
