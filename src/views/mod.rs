//! Presentation logic for the dashboard sections: filtering, client-side
//! pagination and table rendering. Nothing here talks to the network except
//! [`dashboard::load`].

pub mod dashboard;
pub mod hobbies;
pub mod students;
pub mod users;

use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, CellAlignment,
    ContentArrangement, Table,
};

/// Slice of `items` for a 1-based `page`. Pages past the end (and page 0) are empty.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items, at least 1.
#[must_use]
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 1;
    }
    total.div_ceil(per_page).max(1)
}

/// Table with the shared look: rounded UTF-8 borders, bold centred headers.
pub(crate) fn table<I, S>(headers: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.into_iter().map(|header| {
            Cell::new(header.into())
                .set_alignment(CellAlignment::Center)
                .add_attribute(Attribute::Bold)
        }));
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_pages_start_at_one() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&items, 1, 3), &[1, 2, 3]);
        assert_eq!(paginate(&items, 3, 3), &[7]);
        assert!(paginate(&items, 4, 3).is_empty());
        assert!(paginate(&items, 0, 3).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
    }

    #[test]
    fn page_count_is_at_least_one() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(5, 0), 1);
    }

    #[test]
    fn table_renders_headers() {
        let mut table = table(["Name", "Count"]);
        table.add_row(vec!["Catur", "2"]);
        let rendered = table.to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Catur"));
    }
}
