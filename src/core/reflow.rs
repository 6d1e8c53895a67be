//! Bounded-width field reflow.
//!
//! Splits pre-formatted display lines into the fewest contiguous groups whose joined
//! text fits a per-group character budget (Discord's 1024-character field limit in
//! practice). Group sizes differ by at most one line; earlier groups take the remainder.

/// Length of `lines` joined with `\n`, in characters.
fn joined_len<S: AsRef<str>>(lines: &[S]) -> usize {
    let chars: usize = lines.iter().map(|l| l.as_ref().chars().count()).sum();
    chars + lines.len().saturating_sub(1)
}

/// Contiguous split of `lines` into exactly `groups` runs of near-equal size.
fn split_even<S: AsRef<str>>(lines: &[S], groups: usize) -> Vec<&[S]> {
    let base = lines.len() / groups;
    let remainder = lines.len() % groups;

    let mut out = Vec::with_capacity(groups);
    let mut start = 0;
    for i in 0..groups {
        let size = base + usize::from(i < remainder);
        out.push(&lines[start..start + size]);
        start += size;
    }
    out
}

/// Partitions `lines` into the minimum number of even contiguous groups that each fit
/// within `budget` characters, returning each group joined with `\n`.
///
/// Empty input yields no groups. If a single line is longer than the budget the search
/// stops at one line per group, leaving that group over budget.
#[must_use]
pub fn reflow<S: AsRef<str>>(lines: &[S], budget: usize) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }

    let mut groups = 1;
    let chunks = loop {
        let chunks = split_even(lines, groups);
        let fits = chunks.iter().all(|chunk| joined_len(chunk) <= budget);
        if fits || groups >= lines.len() {
            break chunks;
        }
        groups += 1;
    };

    chunks
        .into_iter()
        .map(|chunk| {
            chunk
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join("\n")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines_of(lengths: &[usize]) -> Vec<String> {
        lengths.iter().map(|&n| "x".repeat(n)).collect()
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        let lines: Vec<String> = Vec::new();
        assert!(reflow(&lines, 1024).is_empty());
    }

    #[test]
    fn test_fits_in_one_group() {
        let lines = vec!["alpha", "beta", "gamma"];
        assert_eq!(reflow(&lines, 1024), vec!["alpha\nbeta\ngamma".to_string()]);
    }

    #[test]
    fn test_three_long_lines_need_three_groups() {
        let groups = reflow(&lines_of(&[800, 800, 800]), 1000);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.chars().count() == 800));
    }

    #[test]
    fn test_groups_are_contiguous_and_balanced() {
        // 5 lines of 300 chars: 2 groups hold 3+2 lines = 902/601 chars, which exceeds 800,
        // so we need 3 groups of 2+2+1.
        let lines: Vec<String> = (0..5).map(|i| format!("{i}{}", "y".repeat(299))).collect();
        let groups = reflow(&lines, 800);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0], format!("{}\n{}", lines[0], lines[1]));
        assert_eq!(groups[1], format!("{}\n{}", lines[2], lines[3]));
        assert_eq!(groups[2], lines[4]);
    }

    #[test]
    fn test_every_group_respects_budget_when_feasible() {
        let lengths = [120, 40, 300, 75, 10, 200, 90, 500, 33, 64, 250, 17];
        let lines = lines_of(&lengths);
        for budget in [500, 600, 1024, 2000] {
            let groups = reflow(&lines, budget);
            assert!(groups.iter().all(|g| g.chars().count() <= budget));
            assert!(groups.len() <= lines.len());
            // Nothing is lost or reordered
            assert_eq!(groups.join("\n"), lines.join("\n"));
        }
    }

    #[test]
    fn test_group_count_is_minimal_for_even_splits() {
        let lines = lines_of(&[100; 10]);
        // 10 lines of 100 chars: 5 per group = 504 chars, 4 per group = 403 chars
        let groups = reflow(&lines, 450);
        assert_eq!(groups.len(), 3); // 4+3+3
        assert_eq!(reflow(&lines, 504).len(), 2);
    }

    #[test]
    fn test_oversized_line_terminates() {
        let groups = reflow(&lines_of(&[10, 5000, 10]), 1000);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].chars().count(), 5000);
    }

    #[test]
    fn test_budget_counts_characters_not_bytes() {
        let lines = vec!["✈".repeat(600), "✈".repeat(400)];
        assert_eq!(reflow(&lines, 1001).len(), 1);
    }
}
