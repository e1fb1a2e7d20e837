//! Character-level diff between a submitted and an expected answer.

use serde::{Deserialize, Serialize};

/// Classification of a diff segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Text is the same in both strings.
    Equal,
    /// Text is missing from the submitted answer.
    Inserted,
    /// Text is present only in the submitted answer.
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSegment {
    pub text: String,
    pub kind: DiffKind,
}

impl DiffSegment {
    fn new(text: String, kind: DiffKind) -> Self {
        Self { text, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Keep(char),
    Delete(char),
    Insert(char),
}

/// Diff `submitted` against `expected` over Unicode scalar values.
///
/// Runs of shared characters become [`DiffKind::Equal`], characters only in
/// `submitted` become [`DiffKind::Deleted`] and characters only in `expected`
/// become [`DiffKind::Inserted`]. Between two equal runs the deleted text is
/// emitted before the inserted text.
///
/// The alignment is a longest common subsequence. Among alignments of equal
/// length, matches are taken as early as possible, so shared prefixes stay
/// intact.
pub fn diff(submitted: &str, expected: &str) -> Vec<DiffSegment> {
    if submitted == expected {
        return vec![DiffSegment::new(submitted.to_string(), DiffKind::Equal)];
    }
    if submitted.is_empty() {
        return vec![DiffSegment::new(expected.to_string(), DiffKind::Inserted)];
    }
    if expected.is_empty() {
        return vec![DiffSegment::new(submitted.to_string(), DiffKind::Deleted)];
    }

    let a: Vec<char> = submitted.chars().collect();
    let b: Vec<char> = expected.chars().collect();

    coalesce(&edit_script(&a, &b))
}

/// Walk the suffix LCS table from the front and record one op per character.
fn edit_script(a: &[char], b: &[char]) -> Vec<Op> {
    let n = a.len();
    let m = b.len();

    // lcs[i][j] = length of the LCS of a[i..] and b[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (0, 0);

    while i < n && j < m {
        if a[i] == b[j] {
            ops.push(Op::Keep(a[i]));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            ops.push(Op::Delete(a[i]));
            i += 1;
        } else {
            ops.push(Op::Insert(b[j]));
            j += 1;
        }
    }
    ops.extend(a[i..].iter().copied().map(Op::Delete));
    ops.extend(b[j..].iter().copied().map(Op::Insert));

    ops
}

/// Merge single-character ops into maximal segments.
fn coalesce(ops: &[Op]) -> Vec<DiffSegment> {
    let mut segments = Vec::new();
    let mut equal = String::new();
    let mut deleted = String::new();
    let mut inserted = String::new();

    for op in ops {
        match *op {
            Op::Keep(c) => {
                flush_change(&mut segments, &mut deleted, &mut inserted);
                equal.push(c);
            }
            Op::Delete(c) => {
                flush(&mut segments, &mut equal, DiffKind::Equal);
                deleted.push(c);
            }
            Op::Insert(c) => {
                flush(&mut segments, &mut equal, DiffKind::Equal);
                inserted.push(c);
            }
        }
    }
    flush_change(&mut segments, &mut deleted, &mut inserted);
    flush(&mut segments, &mut equal, DiffKind::Equal);

    segments
}

fn flush_change(segments: &mut Vec<DiffSegment>, deleted: &mut String, inserted: &mut String) {
    flush(segments, deleted, DiffKind::Deleted);
    flush(segments, inserted, DiffKind::Inserted);
}

fn flush(segments: &mut Vec<DiffSegment>, buf: &mut String, kind: DiffKind) {
    if !buf.is_empty() {
        segments.push(DiffSegment::new(std::mem::take(buf), kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seg(text: &str, kind: DiffKind) -> DiffSegment {
        DiffSegment::new(text.to_string(), kind)
    }

    fn reconstruct(segments: &[DiffSegment], skip: DiffKind) -> String {
        segments
            .iter()
            .filter(|s| s.kind != skip)
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn identical_strings_are_one_equal_segment() {
        assert_eq!(diff("mały kot", "mały kot"), vec![seg("mały kot", DiffKind::Equal)]);
        assert_eq!(diff("", ""), vec![seg("", DiffKind::Equal)]);
    }

    #[test]
    fn empty_submission_is_one_insertion() {
        assert_eq!(diff("", "dobry pies"), vec![seg("dobry pies", DiffKind::Inserted)]);
    }

    #[test]
    fn empty_expectation_is_one_deletion() {
        assert_eq!(diff("dobry pies", ""), vec![seg("dobry pies", DiffKind::Deleted)]);
    }

    #[test]
    fn single_substitution() {
        assert_eq!(
            diff("dobre pies", "dobry pies"),
            vec![
                seg("dobr", DiffKind::Equal),
                seg("e", DiffKind::Deleted),
                seg("y", DiffKind::Inserted),
                seg(" pies", DiffKind::Equal),
            ]
        );
    }

    #[test]
    fn missing_suffix_is_inserted() {
        assert_eq!(
            diff("kot", "kota"),
            vec![seg("kot", DiffKind::Equal), seg("a", DiffKind::Inserted)]
        );
    }

    #[test]
    fn extra_prefix_is_deleted() {
        assert_eq!(
            diff("xkot", "kot"),
            vec![seg("x", DiffKind::Deleted), seg("kot", DiffKind::Equal)]
        );
    }

    #[test]
    fn shared_prefix_is_preserved_on_ties() {
        // Either "a" or "b" could be kept here; deletion is tried first.
        assert_eq!(
            diff("ab", "ba"),
            vec![
                seg("a", DiffKind::Deleted),
                seg("b", DiffKind::Equal),
                seg("a", DiffKind::Inserted),
            ]
        );
        assert_eq!(
            diff("aab", "ab"),
            vec![
                seg("a", DiffKind::Equal),
                seg("a", DiffKind::Deleted),
                seg("b", DiffKind::Equal),
            ]
        );
    }

    #[test]
    fn works_on_characters_not_bytes() {
        assert_eq!(
            diff("małego", "malego"),
            vec![
                seg("ma", DiffKind::Equal),
                seg("ł", DiffKind::Deleted),
                seg("l", DiffKind::Inserted),
                seg("ego", DiffKind::Equal),
            ]
        );
    }

    #[test]
    fn completely_different_strings() {
        assert_eq!(
            diff("abc", "xyz"),
            vec![seg("abc", DiffKind::Deleted), seg("xyz", DiffKind::Inserted)]
        );
    }

    #[test]
    fn segments_reconstruct_both_inputs() {
        let pairs = [
            ("dobrego psa", "dobremu psu"),
            ("Mały kot", "małego kota"),
            ("nowych domów", "nowe domy"),
            ("ąęź", "aez"),
            ("kot", "pies"),
        ];

        for (submitted, expected) in pairs {
            let segments = diff(submitted, expected);
            assert_eq!(reconstruct(&segments, DiffKind::Deleted), expected);
            assert_eq!(reconstruct(&segments, DiffKind::Inserted), submitted);
            assert!(segments.iter().all(|s| !s.text.is_empty()));
            assert!(segments
                .windows(2)
                .all(|w| w[0].kind != w[1].kind));
        }
    }
}
