use crate::types::{AuthorRecord, SortKey};
use std::cmp::Ordering;

impl SortKey {
    fn value(self, record: &AuthorRecord) -> usize {
        match self {
            SortKey::Lines => record.lines,
            SortKey::Commits => record.commits,
            SortKey::Files => record.files,
        }
    }

    /// Selected key descending, then lines, commits, files descending, then name.
    /// Distinct records never compare equal.
    pub fn compare(self, a: &AuthorRecord, b: &AuthorRecord) -> Ordering {
        self.value(b)
            .cmp(&self.value(a))
            .then_with(|| b.lines.cmp(&a.lines))
            .then_with(|| b.commits.cmp(&a.commits))
            .then_with(|| b.files.cmp(&a.files))
            .then_with(|| a.name.cmp(&b.name))
    }
}

pub fn rank(mut records: Vec<AuthorRecord>, key: SortKey) -> Vec<AuthorRecord> {
    records.sort_by(|a, b| key.compare(a, b));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(name: &str, lines: usize, commits: usize, files: usize) -> AuthorRecord {
        AuthorRecord { name: name.to_string(), lines, commits, files }
    }

    fn order(records: &[AuthorRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_lines_descending() {
        let ranked = rank(vec![rec("Bob", 2, 1, 1), rec("Alice", 8, 1, 2)], SortKey::Lines);
        assert_eq!(order(&ranked), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_primary_key_commits() {
        let ranked = rank(vec![rec("Many", 100, 1, 9), rec("Few", 1, 5, 1)], SortKey::Commits);
        assert_eq!(order(&ranked), vec!["Few", "Many"]);
    }

    #[test]
    fn test_primary_key_files() {
        let ranked = rank(vec![rec("Deep", 500, 9, 1), rec("Wide", 5, 1, 7)], SortKey::Files);
        assert_eq!(order(&ranked), vec!["Wide", "Deep"]);
    }

    #[test]
    fn test_tie_break_cascade() {
        let records = vec![
            rec("Zed", 10, 2, 3),
            rec("Amy", 10, 2, 3),
            rec("Kim", 10, 2, 4),
            rec("Lee", 10, 3, 1),
            rec("Max", 11, 1, 1),
        ];
        let ranked = rank(records, SortKey::Files);
        assert_eq!(order(&ranked), vec!["Kim", "Amy", "Zed", "Max", "Lee"]);
    }

    #[test]
    fn test_name_breaks_full_tie() {
        let ranked = rank(vec![rec("b", 1, 1, 1), rec("B", 1, 1, 1), rec("a", 1, 1, 1)], SortKey::Lines);
        assert_eq!(order(&ranked), vec!["B", "a", "b"]);
    }

    #[test]
    fn test_distinct_records_never_equal() {
        let records = vec![
            rec("a", 1, 1, 1),
            rec("b", 1, 1, 1),
            rec("a", 2, 1, 1),
            rec("a", 1, 2, 1),
            rec("a", 1, 1, 2),
        ];
        for key in [SortKey::Lines, SortKey::Commits, SortKey::Files] {
            for (i, x) in records.iter().enumerate() {
                for (j, y) in records.iter().enumerate() {
                    let ord = key.compare(x, y);
                    if i == j {
                        assert_eq!(ord, Ordering::Equal);
                    } else {
                        assert_ne!(ord, Ordering::Equal, "{x:?} vs {y:?} under {key:?}");
                        assert_eq!(ord, key.compare(y, x).reverse());
                    }
                }
            }
        }
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let a = vec![rec("x", 3, 1, 1), rec("y", 3, 1, 1), rec("z", 1, 4, 2)];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(rank(a, SortKey::Commits), rank(b, SortKey::Commits));
    }
}
