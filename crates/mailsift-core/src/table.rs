use std::collections::BTreeSet;

use crate::{EmailRecord, EmailStatus};

/// Sortable columns, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Email,
    Status,
    Domain,
    Source,
}

impl Column {
    pub fn all() -> &'static [Column] {
        &[Column::Email, Column::Status, Column::Domain, Column::Source]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Status => "Status",
            Self::Domain => "Domain",
            Self::Source => "Source",
        }
    }

    fn key<'a>(self, record: &'a EmailRecord) -> &'a str {
        match self {
            Self::Email => &record.email,
            Self::Status => record.status.label(),
            Self::Domain => &record.domain,
            Self::Source => &record.source,
        }
    }
}

/// Projection of the paging state for the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based.
    pub current_page: usize,
    /// Always at least 1, even for an empty table.
    pub page_count: usize,
    pub total_filtered: usize,
    pub total_records: usize,
    pub rows_per_page: usize,
    /// Offset of the first visible row within the filtered view.
    pub page_start: usize,
    pub page_len: usize,
}

/// The table state machine: the result set of the latest extraction plus the
/// derived filter/sort/page/selection view over it.
///
/// The visible projection (`view`) is always re-derived from the full result
/// set — filter first, then sort — so repeated filtering is idempotent and an
/// active sort survives filter changes. Selection is keyed by record index
/// into the result set (stable for the life of one ingest) and cleared
/// whenever the projection is re-shaped (ingest, filter change, sort change).
#[derive(Debug, Clone)]
pub struct EmailTable {
    records: Vec<EmailRecord>,
    filter_query: String,
    sort: Option<(Column, bool)>,
    current_page: usize,
    rows_per_page: usize,
    selected: BTreeSet<usize>,
    /// Filtered + sorted record indices.
    view: Vec<usize>,
}

pub const DEFAULT_ROWS_PER_PAGE: usize = 20;

impl EmailTable {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            records: Vec::new(),
            filter_query: String::new(),
            sort: None,
            current_page: 1,
            rows_per_page: rows_per_page.max(1),
            selected: BTreeSet::new(),
            view: Vec::new(),
        }
    }

    /// Replace the result set wholesale and reset the view state.
    pub fn ingest(&mut self, records: Vec<EmailRecord>) {
        self.records = records;
        self.filter_query.clear();
        self.sort = None;
        self.selected.clear();
        self.current_page = 1;
        self.recompute();
    }

    /// Drop both the result set and the derived view state.
    pub fn clear(&mut self) {
        self.ingest(Vec::new());
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn filter_query(&self) -> &str {
        &self.filter_query
    }

    pub fn sort(&self) -> Option<(Column, bool)> {
        self.sort
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Case-insensitive substring filter over `email` and `domain`.
    /// Resets to page 1; an empty query restores the full set.
    pub fn set_filter(&mut self, query: &str) {
        self.filter_query = query.to_string();
        self.selected.clear();
        self.current_page = 1;
        self.recompute();
    }

    /// Sort by `column`: same column flips direction, a new column starts
    /// ascending. Resets to page 1.
    pub fn sort_by(&mut self, column: Column) {
        self.sort = match self.sort {
            Some((active, ascending)) if active == column => Some((column, !ascending)),
            _ => Some((column, true)),
        };
        self.selected.clear();
        self.current_page = 1;
        self.recompute();
    }

    pub fn set_rows_per_page(&mut self, n: usize) {
        self.rows_per_page = n.max(1);
        self.clamp_page();
    }

    pub fn page_count(&self) -> usize {
        self.view.len().div_ceil(self.rows_per_page).max(1)
    }

    /// No-op at the last page.
    pub fn next_page(&mut self) {
        if self.current_page < self.page_count() {
            self.current_page += 1;
        }
    }

    /// No-op at the first page.
    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn first_page(&mut self) {
        self.current_page = 1;
    }

    pub fn last_page(&mut self) {
        self.current_page = self.page_count();
    }

    pub fn page_info(&self) -> PageInfo {
        let page_start = (self.current_page - 1) * self.rows_per_page;
        let page_len = self
            .view
            .len()
            .saturating_sub(page_start)
            .min(self.rows_per_page);
        PageInfo {
            current_page: self.current_page,
            page_count: self.page_count(),
            total_filtered: self.view.len(),
            total_records: self.records.len(),
            rows_per_page: self.rows_per_page,
            page_start,
            page_len,
        }
    }

    /// The current page's slice of the filtered/sorted view.
    pub fn visible(&self) -> Vec<&EmailRecord> {
        self.page_indices()
            .iter()
            .map(|&i| &self.records[i])
            .collect()
    }

    /// Record at a 0-based row of the current page.
    pub fn visible_record(&self, row: usize) -> Option<&EmailRecord> {
        self.page_indices().get(row).map(|&i| &self.records[i])
    }

    /// Toggle the selection mark of a row on the current page.
    pub fn toggle_select(&mut self, row: usize) {
        let Some(&idx) = self.page_indices().get(row) else {
            return;
        };
        if !self.selected.remove(&idx) {
            self.selected.insert(idx);
        }
    }

    pub fn is_row_selected(&self, row: usize) -> bool {
        self.page_indices()
            .get(row)
            .is_some_and(|idx| self.selected.contains(idx))
    }

    /// Select-all control: mark every current-page row unless all are already
    /// marked, in which case clear them.
    pub fn toggle_select_all_page(&mut self) {
        let indices: Vec<usize> = self.page_indices().to_vec();
        if indices.is_empty() {
            return;
        }
        if indices.iter().all(|i| self.selected.contains(i)) {
            for i in &indices {
                self.selected.remove(i);
            }
        } else {
            self.selected.extend(indices);
        }
    }

    /// Checked state of the select-all control: true iff every row on the
    /// current page is marked.
    pub fn page_fully_selected(&self) -> bool {
        let indices = self.page_indices();
        !indices.is_empty() && indices.iter().all(|i| self.selected.contains(i))
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Derive the export set: the selected records if any are marked,
    /// otherwise every record matching the filter (across all pages). Valid
    /// records come first, Invalid after, relative order preserved within
    /// each group.
    pub fn export_set(&self) -> Vec<&EmailRecord> {
        let base: Vec<&EmailRecord> = if self.selected.is_empty() {
            self.view.iter().map(|&i| &self.records[i]).collect()
        } else {
            self.view
                .iter()
                .filter(|i| self.selected.contains(i))
                .map(|&i| &self.records[i])
                .collect()
        };

        let (valid, invalid): (Vec<_>, Vec<_>) = base
            .into_iter()
            .partition(|r| r.status == EmailStatus::Valid);
        valid.into_iter().chain(invalid).collect()
    }

    /// The full ingested address list, ignoring filter, sort, and selection.
    /// This is what clipboard copy sends.
    pub fn all_addresses(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.email.as_str()).collect()
    }

    fn page_indices(&self) -> &[usize] {
        let start = (self.current_page - 1) * self.rows_per_page;
        let end = (start + self.rows_per_page).min(self.view.len());
        if start >= end { &[] } else { &self.view[start..end] }
    }

    /// Re-derive the filtered+sorted view from the raw result set.
    fn recompute(&mut self) {
        let query = self.filter_query.to_lowercase();
        self.view = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| {
                query.is_empty()
                    || r.email.to_lowercase().contains(&query)
                    || r.domain.to_lowercase().contains(&query)
            })
            .map(|(i, _)| i)
            .collect();

        if let Some((column, ascending)) = self.sort {
            self.view.sort_by(|&a, &b| {
                let ka = column.key(&self.records[a]).to_lowercase();
                let kb = column.key(&self.records[b]).to_lowercase();
                let ord = ka.cmp(&kb).then_with(|| a.cmp(&b));
                if ascending { ord } else { ord.reverse() }
            });
        }

        self.clamp_page();
    }

    fn clamp_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.page_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(email: &str, status: EmailStatus, domain: &str) -> EmailRecord {
        EmailRecord {
            email: email.to_string(),
            status,
            domain: domain.to_string(),
            source: format!("https://{domain}"),
        }
    }

    fn sample() -> Vec<EmailRecord> {
        vec![
            record("info@alpha.com", EmailStatus::Valid, "alpha.com"),
            record("sales@beta.org", EmailStatus::Invalid, "beta.org"),
            record("bob@gamma.net", EmailStatus::Valid, "gamma.net"),
            record("noreply@alpha.com", EmailStatus::Invalid, "alpha.com"),
        ]
    }

    fn table_with(records: Vec<EmailRecord>) -> EmailTable {
        let mut t = EmailTable::new(DEFAULT_ROWS_PER_PAGE);
        t.ingest(records);
        t
    }

    // ── Filtering ───────────────────────────────────────────────────

    #[test]
    fn filter_matches_email_and_domain_case_insensitively() {
        let mut t = table_with(sample());
        t.set_filter("ALPHA");
        let emails: Vec<&str> = t.visible().iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["info@alpha.com", "noreply@alpha.com"]);

        t.set_filter("bob");
        let emails: Vec<&str> = t.visible().iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["bob@gamma.net"]);
    }

    #[test]
    fn filter_includes_every_matching_record_and_no_other() {
        let t = {
            let mut t = table_with(sample());
            t.set_filter("a.co");
            t
        };
        for r in t.visible() {
            assert!(
                r.email.to_lowercase().contains("a.co") || r.domain.to_lowercase().contains("a.co")
            );
        }
        let shown = t.page_info().total_filtered;
        let expected = sample()
            .iter()
            .filter(|r| r.email.contains("a.co") || r.domain.contains("a.co"))
            .count();
        assert_eq!(shown, expected);
    }

    #[test]
    fn empty_query_restores_full_set() {
        let mut t = table_with(sample());
        t.set_filter("alpha");
        t.set_filter("");
        assert_eq!(t.page_info().total_filtered, 4);
    }

    #[test]
    fn filter_is_rederived_from_full_set() {
        let mut t = table_with(sample());
        t.set_filter("alpha");
        // Narrowing then widening must not lose records.
        t.set_filter("alpha.com");
        t.set_filter("a");
        assert_eq!(t.page_info().total_filtered, 4);
    }

    #[test]
    fn filter_resets_to_page_one() {
        let mut t = table_with(sample());
        t.set_rows_per_page(2);
        t.next_page();
        assert_eq!(t.current_page(), 2);
        t.set_filter("alpha");
        assert_eq!(t.current_page(), 1);
    }

    // ── Sorting ─────────────────────────────────────────────────────

    #[test]
    fn sort_same_column_twice_reverses() {
        let mut t = table_with(sample());
        t.sort_by(Column::Email);
        let asc: Vec<String> = t.visible().iter().map(|r| r.email.clone()).collect();
        t.sort_by(Column::Email);
        let desc: Vec<String> = t.visible().iter().map(|r| r.email.clone()).collect();
        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
        assert_eq!(asc[0], "bob@gamma.net");
    }

    #[test]
    fn sort_new_column_resets_to_ascending() {
        let mut t = table_with(sample());
        t.sort_by(Column::Email);
        t.sort_by(Column::Email); // now descending
        t.sort_by(Column::Domain);
        assert_eq!(t.sort(), Some((Column::Domain, true)));
        let domains: Vec<&str> = t.visible().iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, vec!["alpha.com", "alpha.com", "beta.org", "gamma.net"]);
    }

    #[test]
    fn sort_persists_across_filter_changes() {
        let mut t = table_with(sample());
        t.sort_by(Column::Email);
        t.sort_by(Column::Email); // descending by email
        t.set_filter("alpha");
        assert_eq!(t.sort(), Some((Column::Email, false)));
        let emails: Vec<&str> = t.visible().iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["noreply@alpha.com", "info@alpha.com"]);
    }

    #[test]
    fn status_sort_groups_invalid_before_valid_ascending() {
        let mut t = table_with(sample());
        t.sort_by(Column::Status);
        let statuses: Vec<EmailStatus> = t.visible().iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                EmailStatus::Invalid,
                EmailStatus::Invalid,
                EmailStatus::Valid,
                EmailStatus::Valid
            ]
        );
    }

    // ── Pagination ──────────────────────────────────────────────────

    fn many(n: usize) -> Vec<EmailRecord> {
        (0..n)
            .map(|i| {
                record(
                    &format!("user{i:02}@site.com"),
                    EmailStatus::Valid,
                    "site.com",
                )
            })
            .collect()
    }

    #[test]
    fn twenty_five_records_make_two_pages_of_twenty() {
        let mut t = table_with(many(25));
        assert_eq!(t.page_count(), 2);
        assert_eq!(t.visible().len(), 20);

        t.next_page();
        assert_eq!(t.current_page(), 2);
        assert_eq!(t.visible().len(), 5);

        // Boundary no-op, no wraparound.
        t.next_page();
        assert_eq!(t.current_page(), 2);
    }

    #[test]
    fn prev_page_is_noop_at_first_page() {
        let mut t = table_with(many(25));
        t.prev_page();
        assert_eq!(t.current_page(), 1);
    }

    #[test]
    fn first_and_last_page_jump() {
        let mut t = table_with(many(95));
        t.last_page();
        assert_eq!(t.current_page(), 5);
        assert_eq!(t.visible().len(), 15);
        t.first_page();
        assert_eq!(t.current_page(), 1);
    }

    #[test]
    fn empty_table_reports_page_one_of_one() {
        let t = EmailTable::new(20);
        let info = t.page_info();
        assert_eq!(info.current_page, 1);
        assert_eq!(info.page_count, 1);
        assert_eq!(info.page_len, 0);
    }

    #[test]
    fn rows_per_page_change_recomputes_and_clamps() {
        let mut t = table_with(many(25));
        t.next_page();
        assert_eq!(t.current_page(), 2);

        t.set_rows_per_page(50);
        assert_eq!(t.page_count(), 1);
        assert_eq!(t.current_page(), 1);
        assert_eq!(t.visible().len(), 25);
    }

    #[test]
    fn shrinking_filter_clamps_current_page() {
        let mut t = table_with(many(25));
        t.next_page();
        t.set_filter("user00");
        assert_eq!(t.current_page(), 1);
        assert_eq!(t.page_count(), 1);
    }

    #[test]
    fn current_page_always_within_bounds() {
        let mut t = table_with(many(41));
        t.set_rows_per_page(10);
        t.last_page();
        assert_eq!(t.current_page(), 5);
        t.set_rows_per_page(100);
        assert!(t.current_page() >= 1 && t.current_page() <= t.page_count());
    }

    // ── Selection & export derivation ───────────────────────────────

    #[test]
    fn export_without_selection_orders_valid_before_invalid() {
        let t = table_with(sample());
        let set = t.export_set();
        assert_eq!(set.len(), 4);
        let emails: Vec<&str> = set.iter().map(|r| r.email.as_str()).collect();
        // 2 valid first in original relative order, then 2 invalid.
        assert_eq!(
            emails,
            vec![
                "info@alpha.com",
                "bob@gamma.net",
                "sales@beta.org",
                "noreply@alpha.com"
            ]
        );
    }

    #[test]
    fn export_with_selection_yields_only_selected_rows() {
        let mut t = table_with(sample());
        t.toggle_select(1); // sales@beta.org (Invalid)
        t.toggle_select(2); // bob@gamma.net (Valid)
        let emails: Vec<&str> = t.export_set().iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["bob@gamma.net", "sales@beta.org"]);
    }

    #[test]
    fn export_respects_active_filter_when_nothing_selected() {
        let mut t = table_with(sample());
        t.set_filter("alpha");
        let emails: Vec<&str> = t.export_set().iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, vec!["info@alpha.com", "noreply@alpha.com"]);
    }

    #[test]
    fn export_on_empty_table_is_empty() {
        let t = EmailTable::new(20);
        assert!(t.export_set().is_empty());
    }

    #[test]
    fn select_all_page_toggles_and_reports_consistently() {
        let mut t = table_with(sample());
        assert!(!t.page_fully_selected());

        t.toggle_select_all_page();
        assert!(t.page_fully_selected());
        assert_eq!(t.selected_count(), 4);

        // A second toggle clears the page.
        t.toggle_select_all_page();
        assert!(!t.page_fully_selected());
        assert_eq!(t.selected_count(), 0);
    }

    #[test]
    fn select_all_completes_a_partially_marked_page() {
        let mut t = table_with(sample());
        t.toggle_select(0);
        t.toggle_select_all_page();
        assert!(t.page_fully_selected());
    }

    #[test]
    fn selection_is_cleared_on_filter_and_sort() {
        let mut t = table_with(sample());
        t.toggle_select(0);
        assert_eq!(t.selected_count(), 1);
        t.set_filter("alpha");
        assert_eq!(t.selected_count(), 0);

        t.toggle_select(0);
        t.sort_by(Column::Email);
        assert_eq!(t.selected_count(), 0);
    }

    #[test]
    fn duplicate_records_are_independently_selectable() {
        let mut records = sample();
        records.push(records[0].clone());
        let mut t = table_with(records);
        t.toggle_select(0);
        t.toggle_select(4);
        assert_eq!(t.selected_count(), 2);
        assert_eq!(t.export_set().len(), 2);
    }

    #[test]
    fn ingest_resets_view_state() {
        let mut t = table_with(many(25));
        t.set_filter("user01");
        t.sort_by(Column::Email);
        t.toggle_select(0);
        t.ingest(sample());
        assert_eq!(t.filter_query(), "");
        assert_eq!(t.sort(), None);
        assert_eq!(t.current_page(), 1);
        assert_eq!(t.selected_count(), 0);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn clipboard_list_ignores_filter_and_selection() {
        let mut t = table_with(sample());
        t.set_filter("alpha");
        t.toggle_select(0);
        assert_eq!(t.all_addresses().len(), 4);
    }
}
