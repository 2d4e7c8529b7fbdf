// Transition conditions
//
// A condition is a predicate tree evaluated against the search path that is
// about to take a transition. Atoms look at the path's phonetic attributes,
// the stem's dictionary item or the morphemes taken so far.

use std::fmt;

use morfo_core::{PhoneticAttribute, RootAttribute, SecondaryPos};

use crate::Morpheme;
use crate::graph::StateId;
use crate::path::SearchPath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition<M> {
    Always,
    /// The path's attributes contain the attribute.
    Has(PhoneticAttribute),
    /// The stem's dictionary item carries the root attribute.
    RootHas(RootAttribute),
    SecondaryPosIs(SecondaryPos),
    /// The state the last transition started from denotes this morpheme.
    PreviousMorphemeIs(M),
    /// The last transition started from this state.
    PreviousStateIs(StateId),
    /// A morpheme of the current inflectional group is one of these.
    CurrentGroupContains(Vec<M>),
    /// No suffix surface was produced since the last derivation.
    NoSurfaceAfterDerivation,
    /// Some suffix (not the stem) produced a surface.
    HasAnySuffixSurface,
    /// Input is left (analysis) or requested morphemes are left (generation).
    HasTail,
    And(Vec<Condition<M>>),
    Or(Vec<Condition<M>>),
    Not(Box<Condition<M>>),
}

impl<M: Morpheme> Condition<M> {
    pub fn has(attr: PhoneticAttribute) -> Self {
        Condition::Has(attr)
    }

    pub fn not_have(attr: PhoneticAttribute) -> Self {
        Condition::Has(attr).not()
    }

    pub fn root_has(attr: RootAttribute) -> Self {
        Condition::RootHas(attr)
    }

    pub fn root_not_has(attr: RootAttribute) -> Self {
        Condition::RootHas(attr).not()
    }

    pub fn current_group_contains(morphemes: &[M]) -> Self {
        Condition::CurrentGroupContains(morphemes.to_vec())
    }

    #[must_use]
    pub fn and(self, other: Condition<M>) -> Self {
        match (self, other) {
            (Condition::Always, c) | (c, Condition::Always) => c,
            (Condition::And(mut list), Condition::And(more)) => {
                list.extend(more);
                Condition::And(list)
            }
            (Condition::And(mut list), c) => {
                list.push(c);
                Condition::And(list)
            }
            (a, b) => Condition::And(vec![a, b]),
        }
    }

    #[must_use]
    pub fn or(self, other: Condition<M>) -> Self {
        match (self, other) {
            (Condition::Or(mut list), c) => {
                list.push(c);
                Condition::Or(list)
            }
            (a, b) => Condition::Or(vec![a, b]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(self) -> Self {
        match self {
            Condition::Not(inner) => *inner,
            c => Condition::Not(Box::new(c)),
        }
    }

    /// Evaluate against the path that would take the transition.
    pub fn accepts(&self, path: &SearchPath<'_, M>) -> bool {
        match self {
            Condition::Always => true,
            Condition::Has(attr) => path.attributes().contains(*attr),
            Condition::RootHas(attr) => path.stem().item.has_attribute(*attr),
            Condition::SecondaryPosIs(pos) => path.stem().item.secondary_pos == *pos,
            Condition::PreviousMorphemeIs(m) => path.previous_step().is_some_and(|s| s.morpheme == *m),
            Condition::PreviousStateIs(id) => path.previous_step().is_some_and(|s| s.state == *id),
            Condition::CurrentGroupContains(morphemes) => {
                for step in path.suffix_steps() {
                    if morphemes.contains(&step.morpheme) {
                        return true;
                    }
                    if step.derivative {
                        return false;
                    }
                }
                false
            }
            Condition::NoSurfaceAfterDerivation => {
                for step in path.suffix_steps() {
                    if step.derivative {
                        return true;
                    }
                    if !step.surface.is_empty() {
                        return false;
                    }
                }
                true
            }
            Condition::HasAnySuffixSurface => path.suffix_steps().any(|s| !s.surface.is_empty()),
            Condition::HasTail => path.has_tail(),
            Condition::And(list) => list.iter().all(|c| c.accepts(path)),
            Condition::Or(list) => list.iter().any(|c| c.accepts(path)),
            Condition::Not(inner) => !inner.accepts(path),
        }
    }
}

impl<M: Morpheme> fmt::Display for Condition<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = |f: &mut fmt::Formatter<'_>, items: &[Condition<M>], sep: &str| -> fmt::Result {
            f.write_str("(")?;
            for (i, c) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{c}")?;
            }
            f.write_str(")")
        };
        match self {
            Condition::Always => f.write_str("true"),
            Condition::Has(a) => write!(f, "has({a:?})"),
            Condition::RootHas(a) => write!(f, "root({a})"),
            Condition::SecondaryPosIs(p) => write!(f, "secondaryPos({p})"),
            Condition::PreviousMorphemeIs(m) => write!(f, "prevMorpheme({})", m.id()),
            Condition::PreviousStateIs(s) => write!(f, "prevState({s})"),
            Condition::CurrentGroupContains(ms) => {
                let ids: Vec<_> = ms.iter().map(|m| m.id()).collect();
                write!(f, "groupContains({})", ids.join(","))
            }
            Condition::NoSurfaceAfterDerivation => f.write_str("noSurfaceAfterDerivation"),
            Condition::HasAnySuffixSurface => f.write_str("hasSuffixSurface"),
            Condition::HasTail => f.write_str("hasTail"),
            Condition::And(items) => list(f, items, " AND "),
            Condition::Or(items) => list(f, items, " OR "),
            Condition::Not(inner) => write!(f, "NOT {inner}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toy::Toy;

    #[test]
    fn combinators_flatten() {
        let c: Condition<Toy> = Condition::Always.and(Condition::HasTail);
        assert_eq!(c, Condition::HasTail);
        let c: Condition<Toy> = Condition::HasTail
            .and(Condition::HasAnySuffixSurface)
            .and(Condition::NoSurfaceAfterDerivation);
        assert!(matches!(&c, Condition::And(list) if list.len() == 3));
        let c: Condition<Toy> = Condition::HasTail.not().not();
        assert_eq!(c, Condition::HasTail);
    }

    #[test]
    fn display() {
        let c: Condition<Toy> = Condition::not_have(PhoneticAttribute::ExpectsVowel)
            .and(Condition::current_group_contains(&[Toy::A3pl, Toy::P1sg]));
        assert_eq!(
            c.to_string(),
            "(NOT has(ExpectsVowel) AND groupContains(A3pl,P1sg))"
        );
        let c: Condition<Toy> = Condition::root_has(RootAttribute::Voicing).or(Condition::HasTail);
        assert_eq!(c.to_string(), "(root(Voicing) OR hasTail)");
    }
}
