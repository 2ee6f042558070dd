//! Ratcliff-Obershelp character matching.
//!
//! The longest contiguous common block is matched first and the unmatched
//! stretches on either side are matched recursively. Characters of the second
//! string that occur in more than 1% of it (plus one) are not used to seed
//! blocks once that string is 200 characters or longer, though blocks may still
//! extend across them.

use std::collections::HashMap;

/// Length from which frequent characters of the second string stop seeding blocks
const AUTOJUNK_MIN_LEN: usize = 200;

pub struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// positions of each usable character of `b`, ascending
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    pub fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= threshold);
        }

        Self { a, b, b2j }
    }

    /// `2 * M / T`, where `M` is the number of matched characters and `T` the total length
    pub fn ratio(&self) -> f64 {
        let total = self.a.len() + self.b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.matching_characters() as f64 / total as f64
    }

    /// Sum of the sizes of all matching blocks
    pub fn matching_characters(&self) -> usize {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut matched = 0;

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let (i, j, k) = self.find_longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }

            matched += k;
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
        }

        matched
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows
    ///
    /// Among equally long blocks the one starting earliest in `a`, then in `b`, wins.
    fn find_longest_match(
        &self,
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut run_lengths: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_runs = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }

                    let k = match j {
                        0 => 1,
                        _ => run_lengths.get(&(j - 1)).copied().unwrap_or(0) + 1,
                    };
                    next_runs.insert(j, k);

                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            run_lengths = next_runs;
        }

        // grow across characters that were withheld from seeding
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        (best_i, best_j, best_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(a: &str, b: &str) -> f64 {
        SequenceMatcher::new(a, b).ratio()
    }

    #[test]
    fn test_identical_and_disjoint() {
        assert_eq!(ratio("goblin", "goblin"), 1.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_single_typo() {
        assert!((ratio("goblin", "gobline") - 12.0 / 13.0).abs() < 1e-12);
        assert!((ratio("crash landing on you", "crash lading on you") - 38.0 / 39.0).abs() < 1e-12);
    }

    #[test]
    fn test_longest_block_first_not_subsequence() {
        // a longest-common-subsequence count would give 16 / 50
        let matcher =
            SequenceMatcher::new("strong woman do bong soon", "soon bong do woman strong");
        assert_eq!(matcher.matching_characters(), 14);
        assert!((matcher.ratio() - 0.56).abs() < 1e-12);

        assert!(
            (ratio("its okay to not be okay", "okay be not to okay its") - 8.0 / 23.0).abs()
                < 1e-12
        );
    }

    #[test]
    fn test_frequent_characters_do_not_seed_long_strings() {
        let a = format!("{}abc", "x".repeat(150));
        let b = format!("abc{}", "x".repeat(200));
        assert_eq!(SequenceMatcher::new(&a, &b).matching_characters(), 3);

        // below the length threshold every character seeds
        let b_short = format!("abc{}", "x".repeat(150));
        assert_eq!(SequenceMatcher::new(&a, &b_short).matching_characters(), 150);
    }

    #[test]
    fn test_blocks_extend_across_frequent_characters() {
        let phrase = "the quick brown fox ".repeat(10);
        let a = format!("{phrase}jumps");
        let b = format!("{phrase}leaps");
        assert!((ratio(&a, &b) - 404.0 / 410.0).abs() < 1e-12);
    }
}
