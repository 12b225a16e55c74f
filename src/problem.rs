use crate::space::Cost;
use crate::space::Space;
use crate::space::State;

/// A search request: where to start and which States end the search.
pub trait Problem<Sp, St, C>: std::fmt::Debug
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    fn space(&self) -> &Sp;
    fn origin(&self) -> &St;
    fn goals(&self) -> &[St];

    fn is_goal(&self, s: &St) -> bool {
        self.goals().contains(s)
    }

    /// Whether a search can start at all.
    ///
    /// Problems without goals, or starting outside the space, fail immediately
    /// without expanding anything.
    fn is_searchable(&self) -> bool {
        !self.goals().is_empty() && self.space().contains(self.origin())
    }
}
