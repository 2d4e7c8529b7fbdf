// Frontier search shared by analysis and generation
//
// Each round expands every path of the frontier through the eligible
// outgoing transitions of its state. Accepted paths leave the frontier;
// paths with no eligible transition are dropped. Every transition either
// consumes something or is an epsilon move, and the graph has no epsilon
// cycles, so the search terminates.

use std::sync::Arc;

use morfo_core::{DictionaryItem, PhoneticAttribute};

use crate::analysis::{GenerationResult, SingleAnalysis};
use crate::graph::{MorphemeGraph, SuffixTransition};
use crate::observer::{NoopObserver, RejectReason, Rejection, SearchObserver};
use crate::path::{Goal, SearchPath};
use crate::stem::{StemIndex, StemTransition};
use crate::{GenerationError, MAX_REPEATING_STATE_COUNT, Morpheme, PRUNE_THRESHOLD};

/// Tunables of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// A path may visit one state at most this many times once pruning starts.
    pub max_repeating_states: usize,
    /// Frontier size above which cyclic paths are pruned.
    pub prune_threshold: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_repeating_states: MAX_REPEATING_STATE_COUNT,
            prune_threshold: PRUNE_THRESHOLD,
        }
    }
}

fn rejection<M: Morpheme>(
    graph: &MorphemeGraph<M>,
    path: &SearchPath<'_, M>,
    transition: Option<&SuffixTransition<M>>,
    reason: RejectReason,
) -> Rejection {
    Rejection {
        path: path.to_string(),
        transition: transition.map(|t| graph.describe(t)),
        reason,
    }
}

fn can_terminate<M: Morpheme>(path: &SearchPath<'_, M>) -> bool {
    path.is_terminal() && !path.attributes().contains(PhoneticAttribute::CannotTerminate)
}

fn prune<'a, M: Morpheme>(
    graph: &MorphemeGraph<M>,
    options: &SearchOptions,
    frontier: Vec<SearchPath<'a, M>>,
    observer: &mut impl SearchObserver,
) -> Vec<SearchPath<'a, M>> {
    if frontier.len() <= options.prune_threshold {
        return frontier;
    }
    frontier
        .into_iter()
        .filter(|path| {
            let visits = path.max_visits();
            let keep = visits <= options.max_repeating_states;
            if !keep {
                observer.reject(|| rejection(graph, path, None, RejectReason::Cyclic { visits }));
            }
            keep
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Input-driven search: finds every decomposition of a word.
#[derive(Debug, Clone)]
pub struct WordAnalyzer<M> {
    graph: Arc<MorphemeGraph<M>>,
    stems: Arc<StemIndex>,
    options: SearchOptions,
}

impl<M: Morpheme> WordAnalyzer<M> {
    pub fn new(graph: Arc<MorphemeGraph<M>>, stems: Arc<StemIndex>) -> Self {
        Self {
            graph,
            stems,
            options: SearchOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    pub fn graph(&self) -> &MorphemeGraph<M> {
        &self.graph
    }

    pub fn stems(&self) -> &StemIndex {
        &self.stems
    }

    /// Analyze a normalized word. No analysis yields an empty vector.
    pub fn analyze(&self, input: &str) -> Vec<SingleAnalysis<M>> {
        self.analyze_observed(input, &mut NoopObserver)
    }

    pub fn analyze_observed(&self, input: &str, observer: &mut impl SearchObserver) -> Vec<SingleAnalysis<M>> {
        if input.is_empty() {
            return Vec::new();
        }
        let candidates = self.stems.prefix_matches(input);
        self.analyze_with_stems(input, &candidates, observer)
    }

    /// Analyze `input` starting only from the given stems.
    ///
    /// Stems whose surface is not a prefix of `input` are ignored.
    pub fn analyze_with_stems(
        &self,
        input: &str,
        stems: &[&StemTransition],
        observer: &mut impl SearchObserver,
    ) -> Vec<SingleAnalysis<M>> {
        let graph = &*self.graph;
        let mut frontier: Vec<SearchPath<'_, M>> = stems
            .iter()
            .filter_map(|stem| {
                let tail = input.strip_prefix(stem.surface.as_str())?;
                Some(SearchPath::initial(graph, *stem, Goal::Input(tail)))
            })
            .collect();

        let mut results = Vec::new();
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for path in &frontier {
                if !path.has_tail() && can_terminate(path) {
                    observer.accept(|| path.to_string());
                    results.push(SingleAnalysis::new(Arc::clone(&path.stem().item), path.morphemes()));
                    continue;
                }
                let before = next.len();
                self.advance(path, &mut next, observer);
                if next.len() == before && !path.has_tail() && path.is_terminal() {
                    observer.reject(|| rejection(graph, path, None, RejectReason::CannotTerminate));
                }
            }
            frontier = prune(graph, &self.options, next, observer);
        }
        results
    }

    fn advance<'a>(
        &self,
        path: &SearchPath<'a, M>,
        next: &mut Vec<SearchPath<'a, M>>,
        observer: &mut impl SearchObserver,
    ) {
        let graph = &*self.graph;
        let Goal::Input(tail) = path.tail() else {
            return;
        };
        for t in graph.outgoing(path.state()) {
            if tail.is_empty() && !t.is_epsilon() {
                observer.reject(|| rejection(graph, path, Some(t), RejectReason::NoTailForSurface));
                continue;
            }
            let Some(surface) = t.template.render(path.attributes()) else {
                observer.reject(|| rejection(graph, path, Some(t), RejectReason::Unrenderable));
                continue;
            };
            let Some(rest) = tail.strip_prefix(surface.as_str()) else {
                observer.reject(|| {
                    rejection(graph, path, Some(t), RejectReason::SurfaceMismatch { surface: surface.clone() })
                });
                continue;
            };
            if !t.condition.accepts(path) {
                observer.reject(|| {
                    rejection(graph, path, Some(t), RejectReason::Condition(t.condition.to_string()))
                });
                continue;
            }
            let attributes = if t.is_epsilon() {
                path.attributes()
            } else {
                t.template.attributes_after(&surface, path.attributes())
            };
            next.push(path.extend(graph, t.to, surface, Goal::Input(rest), attributes, false));
        }
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Morpheme-driven search: produces the surface of a stem plus morphemes.
#[derive(Debug, Clone)]
pub struct WordGenerator<M> {
    graph: Arc<MorphemeGraph<M>>,
    stems: Arc<StemIndex>,
    options: SearchOptions,
}

impl<M: Morpheme> WordGenerator<M> {
    pub fn new(graph: Arc<MorphemeGraph<M>>, stems: Arc<StemIndex>) -> Self {
        Self {
            graph,
            stems,
            options: SearchOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn graph(&self) -> &MorphemeGraph<M> {
        &self.graph
    }

    pub fn stems(&self) -> &StemIndex {
        &self.stems
    }

    /// Generate every surface of `item` followed by `morphemes`.
    ///
    /// Morphemes that are not requested may still appear when they have no
    /// surface (a default A3sg, for instance). Derivations never do.
    pub fn generate(
        &self,
        item: &DictionaryItem,
        morphemes: &[M],
    ) -> Result<Vec<GenerationResult<M>>, GenerationError> {
        self.generate_observed(item, morphemes, &mut NoopObserver)
    }

    pub fn generate_observed(
        &self,
        item: &DictionaryItem,
        morphemes: &[M],
        observer: &mut impl SearchObserver,
    ) -> Result<Vec<GenerationResult<M>>, GenerationError> {
        let candidates = self.stems.for_item(item.id());
        self.generate_with_stems(&candidates, morphemes, observer)
    }

    /// Generate starting only from the given stems.
    pub fn generate_with_stems(
        &self,
        stems: &[&StemTransition],
        morphemes: &[M],
        observer: &mut impl SearchObserver,
    ) -> Result<Vec<GenerationResult<M>>, GenerationError> {
        let graph = &*self.graph;
        let mut frontier: Vec<SearchPath<'_, M>> = stems
            .iter()
            .map(|stem| {
                // The stem already stands for its root morpheme.
                let root = graph.state(stem.state).morpheme;
                let tail = match morphemes.split_first() {
                    Some((first, rest)) if *first == root => rest,
                    _ => morphemes,
                };
                SearchPath::initial(graph, *stem, Goal::Morphemes(tail))
            })
            .collect();

        let mut results = Vec::new();
        while !frontier.is_empty() {
            let mut next = Vec::new();
            for path in &frontier {
                if !path.has_tail() && can_terminate(path) {
                    check_consumed(path, morphemes, graph)?;
                    observer.accept(|| path.to_string());
                    let analysis = SingleAnalysis::new(Arc::clone(&path.stem().item), path.morphemes());
                    results.push(GenerationResult {
                        surface: analysis.surface_form(),
                        analysis,
                    });
                    continue;
                }
                self.advance(path, &mut next, observer);
            }
            frontier = prune(graph, &self.options, next, observer);
        }
        Ok(results)
    }

    fn advance<'a>(
        &self,
        path: &SearchPath<'a, M>,
        next: &mut Vec<SearchPath<'a, M>>,
        observer: &mut impl SearchObserver,
    ) {
        let graph = &*self.graph;
        let Goal::Morphemes(tail) = path.tail() else {
            return;
        };
        for t in graph.outgoing(path.state()) {
            let target = graph.state(t.to).morpheme;
            let head = tail.first().copied();
            let (consumed, rest) = match head {
                Some(m) if m == target => (true, &tail[1..]),
                _ => (false, tail),
            };
            // Only inflectional defaults may appear unrequested.
            if t.is_epsilon() && !consumed && (graph.state(t.to).derivative || target.is_derivational()) {
                observer.reject(|| rejection(graph, path, Some(t), RejectReason::UnrequestedDerivation));
                continue;
            }
            if !t.is_epsilon() {
                match head {
                    None => {
                        observer.reject(|| rejection(graph, path, Some(t), RejectReason::NoTailForSurface));
                        continue;
                    }
                    Some(m) if !consumed => {
                        observer.reject(|| {
                            rejection(graph, path, Some(t), RejectReason::MorphemeMismatch { expected: m.id() })
                        });
                        continue;
                    }
                    Some(_) => {}
                }
            }
            if !t.condition.accepts(path) {
                observer.reject(|| {
                    rejection(graph, path, Some(t), RejectReason::Condition(t.condition.to_string()))
                });
                continue;
            }
            let Some(surface) = t.template.render(path.attributes()) else {
                observer.reject(|| rejection(graph, path, Some(t), RejectReason::Unrenderable));
                continue;
            };
            let attributes = if t.is_epsilon() {
                path.attributes()
            } else {
                t.template.attributes_after(&surface, path.attributes())
            };
            next.push(path.extend(graph, t.to, surface, Goal::Morphemes(rest), attributes, consumed));
        }
    }
}

/// Contract check: an accepted path consumed exactly the requested
/// morphemes, in order. A mismatch is a graph or search defect.
fn check_consumed<M: Morpheme>(
    path: &SearchPath<'_, M>,
    requested: &[M],
    graph: &MorphemeGraph<M>,
) -> Result<(), GenerationError> {
    let root = graph.state(path.stem().state).morpheme;
    let expected = match requested.split_first() {
        Some((first, rest)) if *first == root => rest,
        _ => requested,
    };
    let actual = path.consumed_morphemes();
    if actual.as_slice() == expected {
        return Ok(());
    }
    Err(GenerationError::MorphemeMismatch {
        expected: expected.iter().map(|m| m.id()).collect(),
        actual: actual.iter().map(|m| m.id()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::DebugRecorder;
    use crate::toy::{self, Toy};
    use morfo_core::RootAttribute;

    fn analyzer(items: Vec<morfo_core::DictionaryItem>) -> WordAnalyzer<Toy> {
        let g = toy::grammar(items);
        WordAnalyzer::new(g.graph, g.stems)
    }

    fn generator(items: Vec<morfo_core::DictionaryItem>) -> WordGenerator<Toy> {
        let g = toy::grammar(items);
        WordGenerator::new(g.graph, g.stems)
    }

    fn formatted(results: &[SingleAnalysis<Toy>]) -> Vec<String> {
        results.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn analyzes_inflections() {
        let a = analyzer(vec![toy::item("elma", &[])]);
        assert_eq!(formatted(&a.analyze("elma")), ["[elma:Noun] elma:Noun+A3sg+Pnon+Nom"]);
        assert_eq!(formatted(&a.analyze("elmalar")), ["[elma:Noun] elma:Noun+lar:A3pl+Pnon+Nom"]);
        assert_eq!(formatted(&a.analyze("elmam")), ["[elma:Noun] elma:Noun+A3sg+m:P1sg+Nom"]);
        assert_eq!(formatted(&a.analyze("elmaya")), ["[elma:Noun] elma:Noun+A3sg+Pnon+ya:Dat"]);
        assert_eq!(
            formatted(&a.analyze("elmalı")),
            ["[elma:Noun] elma:Noun+A3sg+Pnon+Nom|lı:With→Adj"]
        );
    }

    #[test]
    fn empty_and_unknown_input() {
        let a = analyzer(vec![toy::item("elma", &[])]);
        assert!(a.analyze("").is_empty());
        assert!(a.analyze("armut").is_empty());
        assert!(a.analyze("elmax").is_empty());
    }

    #[test]
    fn group_condition_blocks_derivation() {
        let a = analyzer(vec![toy::item("elma", &[])]);
        assert!(a.analyze("elmalarlı").is_empty());
    }

    #[test]
    fn voiced_stem_needs_vowel() {
        let a = analyzer(vec![toy::item("kitap", &[RootAttribute::Voicing])]);
        assert_eq!(formatted(&a.analyze("kitap")), ["[kitap:Noun] kitap:Noun+A3sg+Pnon+Nom"]);
        assert_eq!(formatted(&a.analyze("kitabım")), ["[kitap:Noun] kitab:Noun+A3sg+ım:P1sg+Nom"]);
        assert!(a.analyze("kitab").is_empty());
        assert!(a.analyze("kitapım").is_empty());
        assert!(a.analyze("kitablar").is_empty());
    }

    #[test]
    fn homographs_in_stem_order() {
        let a = analyzer(vec![toy::item("yüz", &[]), toy::item("yüz", &[]).with_index(1)]);
        let ids: Vec<_> = a.analyze("yüzler").iter().map(|r| r.item().id().to_string()).collect();
        assert_eq!(ids, ["yüz_Noun", "yüz_Noun_1"]);
    }

    #[test]
    fn analysis_is_idempotent() {
        let a = analyzer(vec![toy::item("el", &[]), toy::item("elma", &[])]);
        assert_eq!(a.analyze("elmalarım"), a.analyze("elmalarım"));
    }

    #[test]
    fn debug_observer_does_not_change_results() {
        let a = analyzer(vec![toy::item("kitap", &[RootAttribute::Voicing])]);
        let mut recorder = DebugRecorder::new();
        let observed = a.analyze_observed("kitapım", &mut recorder);
        assert!(observed.is_empty());
        assert_eq!(observed, a.analyze("kitapım"));
        assert!(recorder.accepted.is_empty());
        assert!(
            recorder
                .rejections
                .iter()
                .any(|r| matches!(r.reason, RejectReason::Condition(_)))
        );
        assert!(
            recorder
                .rejections
                .iter()
                .any(|r| matches!(r.reason, RejectReason::SurfaceMismatch { .. }))
        );

        recorder.clear();
        let observed = a.analyze_observed("kitabım", &mut recorder);
        assert_eq!(observed, a.analyze("kitabım"));
        assert_eq!(recorder.accepted, ["kitab:Noun+A3sg+ım:P1sg+Nom"]);
    }

    #[test]
    fn generates_with_default_morphemes() {
        let g = generator(vec![toy::item("elma", &[])]);
        let item = toy::item("elma", &[]);
        let out = g.generate(&item, &[Toy::A3pl, Toy::P1sg]).unwrap();
        let surfaces: Vec<_> = out.iter().map(|r| r.surface.as_str()).collect();
        assert_eq!(surfaces, ["elmalarım"]);

        let out = g.generate(&item, &[Toy::Dat]).unwrap();
        assert_eq!(out[0].surface, "elmaya");
        assert!(out[0].analysis.contains_morpheme(Toy::A3sg));

        let out = g.generate(&item, &[Toy::With]).unwrap();
        assert_eq!(out[0].surface, "elmalı");
    }

    #[test]
    fn generation_skips_requested_root_morpheme() {
        let g = generator(vec![toy::item("ev", &[])]);
        let item = toy::item("ev", &[]);
        let out = g.generate(&item, &[Toy::Noun, Toy::A3pl]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].surface, "evler");
        let out = g.generate(&item, &[Toy::Noun]).unwrap();
        assert_eq!(out[0].surface, "ev");
    }

    #[test]
    fn generation_uses_voiced_stem_when_needed() {
        let g = generator(vec![toy::item("kitap", &[RootAttribute::Voicing])]);
        let item = toy::item("kitap", &[RootAttribute::Voicing]);
        let out = g.generate(&item, &[Toy::P1sg]).unwrap();
        let surfaces: Vec<_> = out.iter().map(|r| r.surface.as_str()).collect();
        assert_eq!(surfaces, ["kitabım"]);
        let out = g.generate(&item, &[]).unwrap();
        let surfaces: Vec<_> = out.iter().map(|r| r.surface.as_str()).collect();
        assert_eq!(surfaces, ["kitap"]);
    }

    #[test]
    fn generation_takes_no_unrequested_derivation() {
        let g = generator(vec![toy::item("elma", &[])]);
        let item = toy::item("elma", &[]);
        let mut recorder = DebugRecorder::new();
        let out = g.generate_observed(&item, &[Toy::Dat, Toy::Adj], &mut recorder).unwrap();
        assert!(out.is_empty());
        assert!(
            recorder
                .rejections
                .iter()
                .any(|r| r.reason == RejectReason::UnrequestedDerivation)
        );

        let out = g.generate(&item, &[Toy::Dat, Toy::Zero, Toy::Adj]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].surface, "elmaya");
        assert!(out[0].analysis.contains_morpheme(Toy::Zero));

        let out = g.generate(&item, &[Toy::A3pl]).unwrap();
        assert_eq!(out.len(), 1);
        assert!(!out[0].analysis.contains_morpheme(Toy::Zero));
    }

    #[test]
    fn impossible_requests_give_no_result() {
        let g = generator(vec![toy::item("elma", &[])]);
        let item = toy::item("elma", &[]);
        assert!(g.generate(&item, &[Toy::P1sg, Toy::A3pl]).unwrap().is_empty());
        assert!(g.generate(&item, &[Toy::A3pl, Toy::With]).unwrap().is_empty());
        let unknown = toy::item("armut", &[]);
        assert!(g.generate(&unknown, &[Toy::A3pl]).unwrap().is_empty());
    }

    #[test]
    fn generation_round_trips_through_analysis() {
        let items = vec![toy::item("elma", &[]), toy::item("kitap", &[RootAttribute::Voicing])];
        let a = analyzer(items.clone());
        let g = generator(items.clone());
        for item in &items {
            for request in [vec![Toy::A3pl], vec![Toy::P1sg, Toy::Dat], vec![Toy::With]] {
                for generated in g.generate(item, &request).unwrap() {
                    let analyses = a.analyze(&generated.surface);
                    assert!(
                        analyses.iter().any(|r| r.item().id() == item.id()
                            && r.morphemes() == generated.analysis.morphemes()),
                        "{} did not round trip",
                        generated.surface
                    );
                }
            }
        }
    }

    #[test]
    fn concurrent_analysis_is_deterministic() {
        let a = analyzer(vec![toy::item("elma", &[]), toy::item("el", &[])]);
        let expected = a.analyze("elmalarım");
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4).map(|_| s.spawn(|| a.analyze("elmalarım"))).collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}
