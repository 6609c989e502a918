//! Term matching for solutions
//!
//! A solution matches a term set when every term occurs, case-sensitively,
//! in its name or in its path. There is no scoring: matches keep the order of
//! the solutions they were drawn from.

use crate::core::types::{Solution, SolutionId};

/// Whether every term occurs in the solution's name or path
pub fn matches_all_terms<S: AsRef<str>>(solution: &Solution, terms: &[S]) -> bool {
    terms.iter().all(|term| {
        let term = term.as_ref();
        solution.name.contains(term) || solution.path.contains(term)
    })
}

/// Ids of the solutions matching all terms, in input order
pub fn find_matching_ids<'a, I, S>(solutions: I, terms: &[S]) -> Vec<SolutionId>
where
    I: IntoIterator<Item = &'a Solution>,
    S: AsRef<str>,
{
    solutions
        .into_iter()
        .filter(|solution| matches_all_terms(solution, terms))
        .map(|solution| solution.id.clone())
        .collect()
}
