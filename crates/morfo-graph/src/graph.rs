// Morpheme states, suffix transitions and the graph builder

use std::fmt;

use hashbrown::HashMap;
use morfo_core::PhoneticAttribute;

use crate::condition::Condition;
use crate::template::{LeadingSound, SuffixTemplate};
use crate::{GraphError, Morpheme};

/// Index of a state inside its [`MorphemeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the graph. A morpheme may own several states.
#[derive(Debug, Clone)]
pub struct MorphemeState<M> {
    pub name: String,
    pub morpheme: M,
    /// A path may end here.
    pub terminal: bool,
    /// Entering this state starts a new inflectional group.
    pub derivative: bool,
    /// The state denotes a part of speech of a root.
    pub pos_root: bool,
}

/// An edge of the graph.
#[derive(Debug, Clone)]
pub struct SuffixTransition<M> {
    pub from: StateId,
    pub to: StateId,
    pub template: SuffixTemplate,
    /// Explicit condition combined with the one implied by the template.
    pub condition: Condition<M>,
}

impl<M> SuffixTransition<M> {
    pub fn is_epsilon(&self) -> bool {
        self.template.is_empty()
    }
}

/// Static morphotactics: states and their outgoing transitions.
///
/// Outgoing transitions keep their declaration order; search results are
/// ordered by it.
#[derive(Debug)]
pub struct MorphemeGraph<M> {
    states: Vec<MorphemeState<M>>,
    transitions: Vec<SuffixTransition<M>>,
    outgoing: Vec<Vec<usize>>,
    by_name: HashMap<String, StateId>,
}

impl<M: Morpheme> MorphemeGraph<M> {
    pub fn state(&self, id: StateId) -> &MorphemeState<M> {
        &self.states[id.index()]
    }

    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.by_name.get(name).copied()
    }

    pub fn outgoing(&self, id: StateId) -> impl Iterator<Item = &SuffixTransition<M>> {
        self.outgoing[id.index()].iter().map(|&i| &self.transitions[i])
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &MorphemeState<M>)> {
        self.states
            .iter()
            .enumerate()
            .map(|(i, s)| (StateId(i as u32), s))
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.len()
    }

    /// `from_name -[template]-> to_name`, for debug output.
    pub fn describe(&self, t: &SuffixTransition<M>) -> String {
        format!(
            "{} -[{}]-> {}",
            self.state(t.from).name,
            t.template,
            self.state(t.to).name
        )
    }
}

// ---------------------------------------------------------------------------
// GraphBuilder
// ---------------------------------------------------------------------------

/// Incremental graph construction.
///
/// Builder calls never fail; the first problem found (bad template,
/// duplicate state name) is reported by [`GraphBuilder::build`].
pub struct GraphBuilder<M> {
    states: Vec<MorphemeState<M>>,
    transitions: Vec<SuffixTransition<M>>,
    by_name: HashMap<String, StateId>,
    error: Option<GraphError>,
}

impl<M: Morpheme> Default for GraphBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Morpheme> GraphBuilder<M> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            transitions: Vec::new(),
            by_name: HashMap::new(),
            error: None,
        }
    }

    fn state(&mut self, name: &str, morpheme: M, terminal: bool, derivative: bool) -> StateId {
        let id = StateId(self.states.len() as u32);
        if self.by_name.insert(name.to_string(), id).is_some() {
            self.fail(GraphError::DuplicateState(name.to_string()));
        }
        self.states.push(MorphemeState {
            name: name.to_string(),
            pos_root: morpheme.pos().is_some() && !derivative,
            morpheme,
            terminal,
            derivative,
        });
        id
    }

    pub fn non_terminal(&mut self, name: &str, morpheme: M) -> StateId {
        self.state(name, morpheme, false, false)
    }

    pub fn terminal(&mut self, name: &str, morpheme: M) -> StateId {
        self.state(name, morpheme, true, false)
    }

    pub fn non_terminal_derivative(&mut self, name: &str, morpheme: M) -> StateId {
        self.state(name, morpheme, false, true)
    }

    pub fn terminal_derivative(&mut self, name: &str, morpheme: M) -> StateId {
        self.state(name, morpheme, true, true)
    }

    pub fn add(&mut self, from: StateId, to: StateId, template: &str) -> &mut Self {
        self.add_if(from, to, template, Condition::Always)
    }

    /// Add a suffix transition. The template's leading sound adds an
    /// implicit condition on the predecessor's expectations.
    pub fn add_if(
        &mut self,
        from: StateId,
        to: StateId,
        template: &str,
        condition: Condition<M>,
    ) -> &mut Self {
        let template = match SuffixTemplate::parse(template) {
            Ok(t) => t,
            Err(e) => {
                self.fail(e);
                return self;
            }
        };
        let implicit = match template.leading_sound() {
            Some(LeadingSound::Consonant) => Condition::not_have(PhoneticAttribute::ExpectsVowel),
            Some(LeadingSound::Vowel) => Condition::not_have(PhoneticAttribute::ExpectsConsonant),
            None => Condition::Always,
        };
        self.push(from, to, template, condition.and(implicit))
    }

    pub fn add_empty(&mut self, from: StateId, to: StateId) -> &mut Self {
        self.add_empty_if(from, to, Condition::Always)
    }

    pub fn add_empty_if(&mut self, from: StateId, to: StateId, condition: Condition<M>) -> &mut Self {
        self.push(from, to, SuffixTemplate::empty(), condition)
    }

    fn push(
        &mut self,
        from: StateId,
        to: StateId,
        template: SuffixTemplate,
        condition: Condition<M>,
    ) -> &mut Self {
        for id in [from, to] {
            if id.index() >= self.states.len() {
                self.fail(GraphError::UnknownState(id.0));
                return self;
            }
        }
        self.transitions.push(SuffixTransition {
            from,
            to,
            template,
            condition,
        });
        self
    }

    fn fail(&mut self, error: GraphError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    /// Finish the graph. Fails on the first recorded problem or when the
    /// epsilon transitions contain a cycle.
    pub fn build(self) -> Result<MorphemeGraph<M>, GraphError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let mut outgoing = vec![Vec::new(); self.states.len()];
        for (i, t) in self.transitions.iter().enumerate() {
            outgoing[t.from.index()].push(i);
        }
        let graph = MorphemeGraph {
            states: self.states,
            transitions: self.transitions,
            outgoing,
            by_name: self.by_name,
        };
        check_epsilon_cycles(&graph)?;
        log::debug!(
            "morpheme graph built: {} states, {} transitions",
            graph.state_count(),
            graph.transition_count()
        );
        Ok(graph)
    }
}

/// Depth-first search over epsilon edges only.
fn check_epsilon_cycles<M: Morpheme>(graph: &MorphemeGraph<M>) -> Result<(), GraphError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    let n = graph.state_count();
    let mut marks = vec![Mark::New; n];
    for start in 0..n {
        if marks[start] != Mark::New {
            continue;
        }
        // (state, next outgoing index)
        let mut stack = vec![(start, 0usize)];
        marks[start] = Mark::Active;
        while let Some(&(state, next)) = stack.last() {
            let edges = &graph.outgoing[state];
            let mut cursor = next;
            let mut pushed = None;
            while cursor < edges.len() {
                let t = &graph.transitions[edges[cursor]];
                cursor += 1;
                if !t.is_epsilon() {
                    continue;
                }
                let to = t.to.index();
                match marks[to] {
                    Mark::Active => return Err(GraphError::EpsilonCycle(graph.states[to].name.clone())),
                    Mark::New => {
                        pushed = Some(to);
                        break;
                    }
                    Mark::Done => {}
                }
            }
            if let Some(top) = stack.last_mut() {
                top.1 = cursor;
            }
            match pushed {
                Some(to) => {
                    marks[to] = Mark::Active;
                    stack.push((to, 0));
                }
                None => {
                    marks[state] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toy::{self, Toy};

    #[test]
    fn toy_graph_shape() {
        let (graph, noun) = toy::graph();
        assert_eq!(graph.state(noun).morpheme, Toy::Noun);
        assert!(graph.state(noun).pos_root);
        assert!(!graph.state(noun).terminal);
        let targets: Vec<_> = graph
            .outgoing(noun)
            .map(|t| graph.state(t.to).name.as_str())
            .collect();
        assert_eq!(targets, ["a3sg_S", "a3pl_S"]);
        assert_eq!(graph.state_by_name("nom_ST").map(|s| graph.state(s).terminal), Some(true));
        assert!(graph.state_by_name("missing").is_none());
    }

    #[test]
    fn implicit_conditions_from_templates() {
        let (graph, noun) = toy::graph();
        let plural = graph.outgoing(noun).nth(1).unwrap();
        assert_eq!(
            plural.condition,
            Condition::not_have(PhoneticAttribute::ExpectsVowel)
        );
        let epsilon = graph.outgoing(noun).next().unwrap();
        assert!(epsilon.is_epsilon());
        assert_eq!(epsilon.condition, Condition::Always);
        assert_eq!(graph.describe(plural), "noun_S -[lAr]-> a3pl_S");
    }

    #[test]
    fn duplicate_state_names_fail() {
        let mut b = GraphBuilder::new();
        b.terminal("x", Toy::Nom);
        b.terminal("x", Toy::Dat);
        assert_eq!(b.build().unwrap_err(), GraphError::DuplicateState("x".into()));
    }

    #[test]
    fn bad_template_fails() {
        let mut b = GraphBuilder::new();
        let a = b.non_terminal("a", Toy::Noun);
        let c = b.terminal("c", Toy::Nom);
        b.add(a, c, "l+");
        assert!(matches!(b.build(), Err(GraphError::InvalidTemplate { .. })));
    }

    #[test]
    fn epsilon_cycles_are_rejected() {
        let mut b = GraphBuilder::new();
        let a = b.non_terminal("a", Toy::Noun);
        let c = b.non_terminal("c", Toy::A3sg);
        let d = b.terminal("d", Toy::Nom);
        b.add_empty(a, c).add_empty(c, d).add_empty(d, a);
        assert!(matches!(b.build(), Err(GraphError::EpsilonCycle(_))));
    }

    #[test]
    fn surface_cycles_are_allowed() {
        let mut b = GraphBuilder::new();
        let a = b.non_terminal("a", Toy::Noun);
        let d = b.terminal("d", Toy::Nom);
        b.add_empty(a, d).add(d, a, "lI");
        assert!(b.build().is_ok());
    }
}
