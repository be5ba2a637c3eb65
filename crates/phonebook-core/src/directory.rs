//! Field-generic directory operations: paging, search, and display.
//!
//! These functions work on a borrowed slice of contacts and never mutate
//! it. [`Store`](crate::Store) exposes thin wrappers over them.

use crate::contact::Contact;
use crate::schema::Field;

/// Page size used by the interactive listing.
pub const DEFAULT_PAGE_SIZE: usize = 5;

// ============================================================================
// Paging
// ============================================================================

/// One page of a listing.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    number: usize,
    offset: usize,
    contacts: &'a [Contact],
}

impl<'a> Page<'a> {
    /// 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Number of contacts on this page.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Returns `true` if the page holds no contacts. Never true for a page
    /// produced by [`pages`].
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Contacts on this page paired with their 1-based directory index.
    pub fn entries(self) -> impl Iterator<Item = (usize, &'a Contact)> {
        let offset = self.offset;
        self.contacts
            .iter()
            .enumerate()
            .map(move |(i, contact)| (offset + i + 1, contact))
    }
}

/// Iterator over the pages of a listing. See [`pages`].
#[derive(Debug, Clone)]
pub struct Pages<'a> {
    chunks: std::slice::Chunks<'a, Contact>,
    offset: usize,
    number: usize,
}

impl<'a> Iterator for Pages<'a> {
    type Item = Page<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let contacts = self.chunks.next()?;
        self.number += 1;
        let page = Page {
            number: self.number,
            offset: self.offset,
            contacts,
        };
        self.offset += contacts.len();
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

/// Split the directory into pages of `page_size` contacts.
///
/// The last page may be shorter. An empty directory yields no pages, and a
/// `page_size` of zero is treated as one.
pub fn pages(contacts: &[Contact], page_size: usize) -> Pages<'_> {
    Pages {
        chunks: contacts.chunks(page_size.max(1)),
        offset: 0,
        number: 0,
    }
}

// ============================================================================
// Search and display
// ============================================================================

/// Contacts whose `field` equals `value` exactly (case-sensitive), in
/// directory order.
pub fn search<'a>(contacts: &'a [Contact], field: Field, value: &str) -> Vec<&'a Contact> {
    contacts.iter().filter(|c| c.get(field) == value).collect()
}

/// Render the detail block for one contact.
pub fn display_contact(contact: &Contact) -> String {
    contact.to_string()
}
