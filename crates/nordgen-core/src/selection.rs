//! Parsing and applying the user's server selection expression.
//!
//! Accepted forms (case-insensitive, surrounding whitespace ignored):
//!
//! - empty: the first [`DEFAULT_SELECTION`] servers
//! - `best <N>`: the first `N` servers
//! - `all`: every server
//! - `1,3,5`: the servers at those 1-based positions, in the order given
//!
//! Servers are expected in display order (ascending load).

use std::str::FromStr;

use crate::error::SelectionError;

pub const DEFAULT_SELECTION: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The `n` first servers; used for both the empty expression and `best N`.
    Best(usize),
    All,
    /// Zero-based positions in user order. Duplicates are kept.
    Indices(Vec<usize>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::Best(DEFAULT_SELECTION)
    }
}

impl FromStr for Selection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr = s.trim().to_ascii_lowercase();

        if expr.is_empty() {
            return Ok(Self::default());
        }
        if expr == "all" {
            return Ok(Self::All);
        }
        if let Some(n) = parse_best(&expr) {
            return match n {
                0 => Err(SelectionError::NoValidSelection),
                n => Ok(Self::Best(n)),
            };
        }

        // Positions are 1-based on screen; unparseable and zero tokens are dropped.
        let indices: Vec<usize> = expr
            .split(',')
            .filter_map(|tok| tok.trim().parse::<usize>().ok())
            .filter(|&i| i >= 1)
            .map(|i| i - 1)
            .collect();

        if indices.is_empty() {
            return Err(SelectionError::NoValidSelection);
        }
        Ok(Self::Indices(indices))
    }
}

/// `best <digits>`, with any (or no) whitespace between the two.
fn parse_best(expr: &str) -> Option<usize> {
    let rest = expr.strip_prefix("best")?.trim_start();
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Anything too large for usize still means "everything".
    Some(rest.parse().unwrap_or(usize::MAX))
}

impl Selection {
    /// Resolve against `items`. Out-of-range positions are skipped.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> Vec<&'a T> {
        match self {
            Self::Best(n) => items.iter().take(*n).collect(),
            Self::All => items.iter().collect(),
            Self::Indices(indices) => indices.iter().filter_map(|&i| items.get(i)).collect(),
        }
    }
}

/// Parse `expr` and resolve it against `items`.
///
/// Fails with [`SelectionError::NoValidSelection`] when nothing would be chosen.
pub fn select<'a, T>(items: &'a [T], expr: &str) -> Result<Vec<&'a T>, SelectionError> {
    let chosen = expr.parse::<Selection>()?.apply(items);
    if chosen.is_empty() {
        return Err(SelectionError::NoValidSelection);
    }
    Ok(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOADS: [u32; 5] = [8, 12, 35, 44, 62];

    fn picked(expr: &str) -> Result<Vec<u32>, SelectionError> {
        select(&LOADS, expr).map(|v| v.into_iter().copied().collect())
    }

    #[test]
    fn empty_expression_takes_top_three() {
        assert_eq!(picked(""), Ok(vec![8, 12, 35]));
        assert_eq!(picked("   "), Ok(vec![8, 12, 35]));
    }

    #[test]
    fn empty_expression_on_short_list() {
        let two = [1u32, 2];
        let chosen: Vec<u32> = select(&two, "").unwrap().into_iter().copied().collect();
        assert_eq!(chosen, vec![1, 2]);
    }

    #[test]
    fn best_n_is_capped_by_list_length() {
        assert_eq!(picked("best 2"), Ok(vec![8, 12]));
        assert_eq!(picked("best 50"), Ok(LOADS.to_vec()));
        assert_eq!(picked("best 99999999999999999999999"), Ok(LOADS.to_vec()));
    }

    #[test]
    fn best_tolerates_case_and_whitespace() {
        assert_eq!(picked("BEST  2"), Ok(vec![8, 12]));
        assert_eq!(picked("  Best\t1 "), Ok(vec![8]));
        assert_eq!(picked("best4"), Ok(vec![8, 12, 35, 44]));
    }

    #[test]
    fn best_zero_and_negative_are_rejected() {
        assert_eq!(picked("best 0"), Err(SelectionError::NoValidSelection));
        assert_eq!(picked("best -2"), Err(SelectionError::NoValidSelection));
        assert_eq!(picked("best"), Err(SelectionError::NoValidSelection));
    }

    #[test]
    fn all_returns_everything_in_order() {
        assert_eq!(picked("all"), Ok(LOADS.to_vec()));
        assert_eq!(picked("ALL"), Ok(LOADS.to_vec()));
    }

    #[test]
    fn indices_follow_input_order() {
        let three = [10u32, 20, 30];
        let chosen: Vec<u32> = select(&three, "2,1").unwrap().into_iter().copied().collect();
        assert_eq!(chosen, vec![20, 10]);
    }

    #[test]
    fn indices_keep_duplicates_and_drop_junk() {
        assert_eq!(picked("1, 1 ,x,7,0,,3"), Ok(vec![8, 8, 35]));
    }

    #[test]
    fn out_of_range_only_is_an_error() {
        let three = [10u32, 20, 30];
        assert_eq!(select(&three, "99"), Err(SelectionError::NoValidSelection));
        assert_eq!(select(&three, "4,5"), Err(SelectionError::NoValidSelection));
    }

    #[test]
    fn garbage_is_an_error() {
        assert_eq!(picked("fastest"), Err(SelectionError::NoValidSelection));
        assert_eq!(picked(",,"), Err(SelectionError::NoValidSelection));
    }

    #[test]
    fn nothing_to_choose_from_is_an_error() {
        let empty: [u32; 0] = [];
        assert_eq!(select(&empty, ""), Err(SelectionError::NoValidSelection));
        assert_eq!(select(&empty, "all"), Err(SelectionError::NoValidSelection));
    }

    #[test]
    fn parse_yields_zero_based_indices() {
        assert_eq!("3,1".parse::<Selection>(), Ok(Selection::Indices(vec![2, 0])));
        assert_eq!("".parse::<Selection>(), Ok(Selection::Best(DEFAULT_SELECTION)));
    }
}
