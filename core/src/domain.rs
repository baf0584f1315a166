//! Domain encoder: flattens per-attribute categorical domains into one
//! contiguous integer enumeration, and encodes/decodes rows against it.
//!
//! The enumeration scheme: all attribute
//! domains `D_1..D_m` are concatenated into `V`, each value gets a 1-based
//! id, and the first id of each attribute forms the "most-general
//! anonymization" `M`. Candidate cuts `σ = {1..|V|} \ M`.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::label::format_generalization;
use crate::table::Table;

/// A table's QI columns, flattened into one contiguous integer enumeration.
///
/// Immutable once built: one `EncodedTable` is constructed per `Anonymizer`
/// instance and never mutated afterward.
#[derive(Debug, Clone)]
pub struct EncodedTable {
    /// QI attribute names, in canonical (sorted) order.
    attributes: Vec<String>,
    /// Per-attribute sorted, deduplicated domain values: `D_1..D_m`.
    domains: Vec<Vec<String>>,
    /// `off_i`: cumulative domain size before attribute `i` (0-based).
    offsets: Vec<u32>,
    /// `M`: the first id of each attribute -- the most-general anonymization.
    most_general: Vec<u32>,
    /// `σ`: every enumerated id not in `M`, ascending.
    sigma: Vec<u32>,
    /// id -> original value, 1-based (`id_to_value[id - 1]`).
    id_to_value: Vec<String>,
    /// Encoded rows, row-major, one id per QI attribute (attribute order
    /// matches `attributes`).
    rows: Vec<Vec<u32>>,
}

impl EncodedTable {
    #[must_use]
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    #[must_use]
    pub fn most_general(&self) -> &[u32] {
        &self.most_general
    }

    #[must_use]
    pub fn sigma(&self) -> &[u32] {
        &self.sigma
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    #[must_use]
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    #[must_use]
    pub fn domain(&self, attr_idx: usize) -> &[String] {
        &self.domains[attr_idx]
    }

    /// The original value an enumerated id was assigned to (1-based ids).
    #[must_use]
    pub fn original_value(&self, id: u32) -> &str {
        &self.id_to_value[(id - 1) as usize]
    }

    /// `sort(head ∪ M)`: the anonymization induced by a head-set.
    #[must_use]
    pub fn anonymization_for(&self, head: &[u32]) -> Vec<u32> {
        let mut anonymization: Vec<u32> = head.iter().chain(self.most_general.iter()).copied().collect();
        anonymization.sort_unstable();
        anonymization.dedup();
        anonymization
    }

    /// The representative (bucket id) of `id` under a (sorted) anonymization:
    /// the largest element of `anonymization` that is `≤ id`.
    ///
    /// Always well-defined because every attribute's first id is in `M` and
    /// every `anonymization` contains `M`.
    #[must_use]
    pub fn representative(&self, anonymization: &[u32], id: u32) -> u32 {
        let idx = anonymization.partition_point(|&a| a <= id);
        anonymization[idx - 1]
    }

    /// Map an entire encoded row to its equivalence-class representative
    /// tuple under `anonymization`.
    #[must_use]
    pub fn representative_tuple(&self, anonymization: &[u32], row: &[u32]) -> Vec<u32> {
        row.iter().map(|&id| self.representative(anonymization, id)).collect()
    }

    /// The formatted generalization label for attribute `attr_idx`'s bucket
    /// containing `id`, under `anonymization`.
    #[must_use]
    pub fn bucket_label(&self, anonymization: &[u32], attr_idx: usize, id: u32) -> String {
        let off = self.offsets[attr_idx];
        let dom = &self.domains[attr_idx];
        let attr_end = off + dom.len() as u32;
        let rep = self.representative(anonymization, id);

        let next_idx = anonymization.partition_point(|&a| a <= rep);
        let upper = anonymization
            .get(next_idx)
            .copied()
            .filter(|&n| n <= attr_end)
            .map_or(attr_end, |n| n - 1);

        let start = (rep - off - 1) as usize;
        let end = (upper - off) as usize;
        format_generalization(&dom[start..end])
    }

    /// Decode a full encoded row into output labels, one per QI attribute,
    /// under the anonymization induced by `head`.
    #[must_use]
    pub fn decode_row(&self, head: &[u32], row: &[u32]) -> Vec<String> {
        let anonymization = self.anonymization_for(head);
        row.iter()
            .enumerate()
            .map(|(attr_idx, &id)| self.bucket_label(&anonymization, attr_idx, id))
            .collect()
    }
}

/// Encode `table`'s QI columns against a fresh enumeration of their domains.
///
/// # Errors
///
/// Returns [`CoreError::UnknownAttribute`] if a `qi` name is not in the
/// table's schema, or [`CoreError::EmptyDomain`] if the table has no rows.
pub fn encode(table: &Table, qi: &[String]) -> Result<EncodedTable, CoreError> {
    let mut attributes = qi.to_vec();
    attributes.sort();

    if table.is_empty() {
        return Err(CoreError::EmptyDomain);
    }

    let mut domains: Vec<Vec<String>> = Vec::with_capacity(attributes.len());
    for attr in &attributes {
        let idx = table.column_index(attr)?;
        let mut values: Vec<String> = table.column(idx).to_vec();
        values.sort();
        values.dedup();
        domains.push(values);
    }

    let mut offsets = Vec::with_capacity(attributes.len());
    let mut cumulative: u32 = 0;
    for dom in &domains {
        offsets.push(cumulative);
        cumulative += u32::try_from(dom.len()).expect("domain fits in u32");
    }

    let most_general: Vec<u32> = offsets.iter().map(|&off| off + 1).collect();
    let total = cumulative;
    let sigma: Vec<u32> = (1..=total).filter(|id| !most_general.contains(id)).collect();

    let mut id_to_value = Vec::with_capacity(total as usize);
    for dom in &domains {
        id_to_value.extend(dom.iter().cloned());
    }

    let value_to_id: Vec<HashMap<&str, u32>> = domains
        .iter()
        .zip(&offsets)
        .map(|(dom, &off)| {
            dom.iter()
                .enumerate()
                .map(|(i, v)| (v.as_str(), off + 1 + u32::try_from(i).expect("index fits in u32")))
                .collect()
        })
        .collect();

    let mut rows = Vec::with_capacity(table.len());
    for r in 0..table.len() {
        let mut encoded_row = Vec::with_capacity(attributes.len());
        for (attr_idx, attr) in attributes.iter().enumerate() {
            let v = table.cell(r, attr)?;
            let id = *value_to_id[attr_idx]
                .get(v)
                .expect("every cell value is present in its own column's domain");
            encoded_row.push(id);
        }
        rows.push(encoded_row);
    }

    Ok(EncodedTable { attributes, domains, offsets, most_general, sigma, id_to_value, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age_table() -> Table {
        Table::from_rows(
            vec!["age".into()],
            vec![
                vec!["20".into()],
                vec!["20".into()],
                vec!["20".into()],
                vec!["30".into()],
                vec!["30".into()],
                vec!["30".into()],
                vec!["40".into()],
                vec!["40".into()],
                vec!["40".into()],
                vec!["40".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn enumeration_invariants_hold() {
        let table = age_table();
        let encoded = encode(&table, &["age".to_string()]).unwrap();
        // |V| = sum of domain sizes
        assert_eq!(encoded.id_to_value.len(), 3);
        // M is exactly the attribute offsets + 1
        assert_eq!(encoded.most_general(), &[1]);
        // sigma = {1..|V|} \ M
        assert_eq!(encoded.sigma(), &[2, 3]);
    }

    #[test]
    fn empty_head_decodes_to_full_domain_bucket() {
        let table = age_table();
        let encoded = encode(&table, &["age".to_string()]).unwrap();
        for row in encoded.rows() {
            let decoded = encoded.decode_row(&[], row);
            assert_eq!(decoded, vec!["{20; 30; 40}".to_string()]);
        }
    }

    #[test]
    fn full_head_decodes_to_original_values() {
        let table = age_table();
        let encoded = encode(&table, &["age".to_string()]).unwrap();
        let full_head: Vec<u32> = encoded.sigma().to_vec();
        let expected = ["20", "20", "20", "30", "30", "30", "40", "40", "40", "40"];
        for (row, exp) in encoded.rows().iter().zip(expected) {
            let decoded = encoded.decode_row(&full_head, row);
            assert_eq!(decoded, vec![exp.to_string()]);
        }
    }

    #[test]
    fn cut_at_thirty_splits_into_two_buckets() {
        let table = age_table();
        let encoded = encode(&table, &["age".to_string()]).unwrap();
        // id 2 ("30") is a bucket-start delimiter under head=[2], so it
        // groups {30,40} together and leaves {20} on its own.
        let decoded_20 = encoded.decode_row(&[2], &[1]);
        let decoded_40 = encoded.decode_row(&[2], &[3]);
        assert_eq!(decoded_20, vec!["20".to_string()]);
        assert_eq!(decoded_40, vec!["{30; 40}".to_string()]);
    }
}
