//! Partitioning of raw records into logical products.

use std::collections::HashMap;

use crate::records::RawRecord;

/// Records sharing one business SKU, at most one per vendor, in arrival order.
///
/// Always holds at least one record; the first is the primary record that
/// supplies the product's name, description and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalProduct {
    sku: Option<String>,
    records: Vec<RawRecord>,
}

impl LogicalProduct {
    fn new(first: RawRecord) -> Self {
        Self {
            sku: first.sku.clone(),
            records: vec![first],
        }
    }

    /// Appends `record` unless a record with the same vendor is already held.
    /// A missing vendor is its own bucket.
    fn push(&mut self, record: RawRecord) {
        if !self.records.iter().any(|r| r.vendor == record.vendor) {
            self.records.push(record);
        }
    }

    #[must_use]
    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    #[must_use]
    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    #[must_use]
    pub fn primary(&self) -> &RawRecord {
        &self.records[0]
    }

    /// The primary record's image, else the first sibling that has one.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.records.iter().find_map(RawRecord::image_url)
    }

    /// Label used in logs and console output.
    #[must_use]
    pub fn label(&self) -> &str {
        self.sku().unwrap_or("<no sku>")
    }
}

/// Groups records by SKU, keeping the first record per (SKU, vendor) pair.
///
/// Groups are returned in order of their SKU's first appearance. Records
/// without a SKU form a single group of their own.
#[must_use]
pub fn group_records<I>(records: I) -> Vec<LogicalProduct>
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut index: HashMap<Option<String>, usize> = HashMap::new();
    let mut groups: Vec<LogicalProduct> = Vec::new();

    for record in records {
        if let Some(&i) = index.get(&record.sku) {
            groups[i].push(record);
        } else {
            index.insert(record.sku.clone(), groups.len());
            groups.push(LogicalProduct::new(record));
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sku: Option<&str>, vendor: Option<&str>, name: &str) -> RawRecord {
        RawRecord {
            sku: sku.map(str::to_owned),
            vendor: vendor.map(str::to_owned),
            name: name.to_owned(),
            ..RawRecord::default()
        }
    }

    fn vendors(product: &LogicalProduct) -> Vec<Option<&str>> {
        product
            .records()
            .iter()
            .map(|r| r.vendor.as_deref())
            .collect()
    }

    #[test]
    fn duplicate_vendor_is_dropped_first_wins() {
        let groups = group_records(vec![
            record(Some("S"), Some("A"), "first A"),
            record(Some("S"), Some("A"), "second A"),
            record(Some("S"), Some("B"), "B"),
        ]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].records().len(), 2);
        assert_eq!(vendors(&groups[0]), vec![Some("A"), Some("B")]);
        assert_eq!(groups[0].records()[0].name, "first A");
    }

    #[test]
    fn primary_is_first_record_seen() {
        let groups = group_records(vec![
            record(Some("S"), Some("B"), "from B"),
            record(Some("T"), Some("A"), "other"),
            record(Some("S"), Some("A"), "from A"),
        ]);
        assert_eq!(groups[0].sku(), Some("S"));
        assert_eq!(groups[0].primary().name, "from B");
        assert_eq!(vendors(&groups[0]), vec![Some("B"), Some("A")]);
    }

    #[test]
    fn groups_keep_first_appearance_order() {
        let groups = group_records(vec![
            record(Some("B"), Some("v"), "b"),
            record(Some("A"), Some("v"), "a"),
            record(Some("B"), Some("w"), "b2"),
            record(Some("C"), Some("v"), "c"),
        ]);
        let skus: Vec<_> = groups.iter().map(LogicalProduct::sku).collect();
        assert_eq!(skus, vec![Some("B"), Some("A"), Some("C")]);
    }

    #[test]
    fn missing_vendor_is_a_distinct_bucket() {
        let groups = group_records(vec![
            record(Some("S"), None, "no vendor"),
            record(Some("S"), Some("A"), "A"),
            record(Some("S"), None, "no vendor again"),
        ]);
        assert_eq!(vendors(&groups[0]), vec![None, Some("A")]);
        assert_eq!(groups[0].primary().name, "no vendor");
    }

    #[test]
    fn missing_sku_records_group_together() {
        let groups = group_records(vec![
            record(None, Some("A"), "x"),
            record(Some("S"), Some("A"), "s"),
            record(None, Some("B"), "y"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].sku(), None);
        assert_eq!(groups[0].label(), "<no sku>");
        assert_eq!(groups[0].records().len(), 2);
    }

    #[test]
    fn image_falls_back_to_first_sibling_with_one() {
        let mut primary = record(Some("S"), Some("A"), "a");
        primary.image = Some(String::new());
        let mut second = record(Some("S"), Some("B"), "b");
        second.image = Some("https://img.example.com/b.jpg".into());
        let mut third = record(Some("S"), Some("C"), "c");
        third.image = Some("https://img.example.com/c.jpg".into());

        let groups = group_records(vec![primary, second, third]);
        assert_eq!(groups[0].image_url(), Some("https://img.example.com/b.jpg"));
    }

    #[test]
    fn primary_image_wins_when_present() {
        let mut primary = record(Some("S"), Some("A"), "a");
        primary.image = Some("https://img.example.com/a.jpg".into());
        let mut second = record(Some("S"), Some("B"), "b");
        second.image = Some("https://img.example.com/b.jpg".into());

        let groups = group_records(vec![primary, second]);
        assert_eq!(groups[0].image_url(), Some("https://img.example.com/a.jpg"));
    }

    #[test]
    fn no_image_anywhere() {
        let groups = group_records(vec![record(Some("S"), Some("A"), "a")]);
        assert_eq!(groups[0].image_url(), None);
    }
}
