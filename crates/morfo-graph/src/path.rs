// Search path: one candidate walk through the graph
//
// The transitions taken so far form a persistent list. Extending a path
// allocates one new step and shares the rest with the parent path, so
// sibling paths created from the same parent never copy their history.

use std::fmt;
use std::rc::Rc;

use morfo_core::AttributeSet;

use crate::Morpheme;
use crate::analysis::MorphemeData;
use crate::graph::{MorphemeGraph, StateId};
use crate::stem::StemTransition;

/// One taken transition. The first step of a path is the stem itself.
#[derive(Debug)]
pub struct PathStep<M> {
    pub state: StateId,
    pub morpheme: M,
    pub surface: String,
    pub derivative: bool,
    /// The step consumed a requested morpheme (generation only).
    pub consumed: bool,
    parent: Option<Rc<PathStep<M>>>,
}

/// What is left to do: input to consume or morphemes to produce.
#[derive(Debug, Clone, Copy)]
pub enum Goal<'a, M> {
    Input(&'a str),
    Morphemes(&'a [M]),
}

impl<M> Goal<'_, M> {
    pub fn is_empty(&self) -> bool {
        match self {
            Goal::Input(s) => s.is_empty(),
            Goal::Morphemes(m) => m.is_empty(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchPath<'a, M> {
    stem: &'a StemTransition,
    head: Rc<PathStep<M>>,
    tail: Goal<'a, M>,
    attributes: AttributeSet,
    terminal: bool,
}

impl<'a, M: Morpheme> SearchPath<'a, M> {
    /// Start a path at `stem`'s root state.
    pub fn initial(graph: &MorphemeGraph<M>, stem: &'a StemTransition, tail: Goal<'a, M>) -> Self {
        let state = graph.state(stem.state);
        Self {
            stem,
            head: Rc::new(PathStep {
                state: stem.state,
                morpheme: state.morpheme,
                surface: stem.surface.clone(),
                derivative: state.derivative,
                consumed: false,
                parent: None,
            }),
            tail,
            attributes: stem.attributes,
            terminal: state.terminal,
        }
    }

    /// A new path that took a transition to `to`, leaving the parent intact.
    pub fn extend(
        &self,
        graph: &MorphemeGraph<M>,
        to: StateId,
        surface: String,
        tail: Goal<'a, M>,
        attributes: AttributeSet,
        consumed: bool,
    ) -> Self {
        let state = graph.state(to);
        Self {
            stem: self.stem,
            head: Rc::new(PathStep {
                state: to,
                morpheme: state.morpheme,
                surface,
                derivative: state.derivative,
                consumed,
                parent: Some(Rc::clone(&self.head)),
            }),
            tail,
            attributes,
            terminal: state.terminal,
        }
    }

    pub fn stem(&self) -> &'a StemTransition {
        self.stem
    }

    pub fn state(&self) -> StateId {
        self.head.state
    }

    pub fn attributes(&self) -> AttributeSet {
        self.attributes
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn tail(&self) -> Goal<'a, M> {
        self.tail
    }

    pub fn has_tail(&self) -> bool {
        !self.tail.is_empty()
    }

    /// The step the last transition started from.
    pub fn previous_step(&self) -> Option<&PathStep<M>> {
        self.head.parent.as_deref()
    }

    /// All steps, newest first, ending with the stem.
    pub fn steps(&self) -> Steps<'_, M> {
        Steps {
            next: Some(&self.head),
        }
    }

    /// Steps after the stem, newest first.
    pub fn suffix_steps(&self) -> impl Iterator<Item = &PathStep<M>> {
        self.steps().filter(|s| s.parent.is_some())
    }

    /// Number of times the path has been in `state`.
    pub fn visits(&self, state: StateId) -> usize {
        self.steps().filter(|s| s.state == state).count()
    }

    /// Highest visit count of any single state.
    pub fn max_visits(&self) -> usize {
        self.steps().map(|s| self.visits(s.state)).max().unwrap_or(0)
    }

    /// Morphemes and surfaces in path order.
    pub fn morphemes(&self) -> Vec<MorphemeData<M>> {
        let mut out: Vec<_> = self
            .steps()
            .map(|s| MorphemeData::new(s.morpheme, s.surface.clone()))
            .collect();
        out.reverse();
        out
    }

    /// Morphemes consumed from a generation request, in path order.
    pub fn consumed_morphemes(&self) -> Vec<M> {
        let mut out: Vec<_> = self.steps().filter(|s| s.consumed).map(|s| s.morpheme).collect();
        out.reverse();
        out
    }
}

impl<M: Morpheme> fmt::Display for SearchPath<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.morphemes().iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// Iterator over the steps of a path, newest first.
pub struct Steps<'p, M> {
    next: Option<&'p PathStep<M>>,
}

impl<'p, M> Iterator for Steps<'p, M> {
    type Item = &'p PathStep<M>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent.as_deref();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toy::{self, Toy};

    #[test]
    fn extension_shares_history() {
        let g = toy::grammar(vec![toy::item("elma", &[])]);
        let stem = g.stems.for_item("elma_Noun")[0];
        let root = SearchPath::initial(&g.graph, stem, Goal::<Toy>::Input("lar"));
        assert!(!root.is_terminal());
        assert!(root.previous_step().is_none());

        let a3sg = g.graph.state_by_name("a3sg_S").unwrap();
        let a3pl = g.graph.state_by_name("a3pl_S").unwrap();
        let left = root.extend(&g.graph, a3sg, String::new(), root.tail(), root.attributes(), false);
        let right = root.extend(&g.graph, a3pl, "lar".into(), Goal::Input(""), root.attributes(), false);

        assert_eq!(left.previous_step().map(|s| s.morpheme), Some(Toy::Noun));
        assert_eq!(right.previous_step().map(|s| s.state), Some(g.noun));
        assert!(left.has_tail());
        assert!(!right.has_tail());
        assert_eq!(right.to_string(), "elma:Noun+lar:A3pl");
        assert_eq!(root.steps().count(), 1);
        assert_eq!(right.suffix_steps().count(), 1);
        assert_eq!(right.visits(g.noun), 1);
        assert_eq!(right.max_visits(), 1);
    }
}
