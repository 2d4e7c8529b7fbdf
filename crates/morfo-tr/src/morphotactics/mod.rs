// Turkish morphotactics: morpheme catalog and the suffix graph
//
// States are declared up front in `States` so that the nominal and verbal
// parts can point into each other (derivations cross POS boundaries in
// both directions). Transition order inside each `connect` function is
// the enumeration order of the search and decides result order.

mod nominal;
mod verbal;

use std::fmt;
use std::sync::Arc;

use morfo_core::{DictionaryItem, PrimaryPos, RootAttribute};
use morfo_graph::{GraphBuilder, GraphError, Morpheme, MorphemeGraph, StateId};

// ---------------------------------------------------------------------------
// Morpheme catalog
// ---------------------------------------------------------------------------

/// Every morpheme the Turkish graph knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TurkishMorpheme {
    // POS roots
    Noun,
    Adj,
    Adv,
    Conj,
    Interj,
    Verb,
    Pron,
    Num,
    Det,
    Postp,
    Ques,
    Dup,
    Punc,

    // Agreement
    A1sg,
    A2sg,
    A3sg,
    A1pl,
    A2pl,
    A3pl,

    // Possession
    Pnon,
    P1sg,
    P2sg,
    P3sg,
    P1pl,
    P2pl,
    P3pl,

    // Case
    Nom,
    Dat,
    Acc,
    Abl,
    Loc,
    Ins,
    Gen,
    Equ,

    // Nominal derivation
    Dim,
    Ness,
    With,
    Without,
    Agt,
    Become,
    Acquire,
    Zero,

    // Verbal
    Neg,
    Able,
    Caus,
    Pass,
    Prog1,
    Aor,
    Past,
    Narr,
    Fut,
    Opt,
    Imp,
    Cond,
    Neces,
    Inf1,

    // Nominal copula
    Pres,
}

use TurkishMorpheme as T;

impl TurkishMorpheme {
    pub const ALL: [TurkishMorpheme; 57] = [
        T::Noun, T::Adj, T::Adv, T::Conj, T::Interj, T::Verb, T::Pron, T::Num, T::Det, T::Postp,
        T::Ques, T::Dup, T::Punc, T::A1sg, T::A2sg, T::A3sg, T::A1pl, T::A2pl, T::A3pl, T::Pnon,
        T::P1sg, T::P2sg, T::P3sg, T::P1pl, T::P2pl, T::P3pl, T::Nom, T::Dat, T::Acc, T::Abl,
        T::Loc, T::Ins, T::Gen, T::Equ, T::Dim, T::Ness, T::With, T::Without, T::Agt, T::Become,
        T::Acquire, T::Zero, T::Neg, T::Able, T::Caus, T::Pass, T::Prog1, T::Aor, T::Past,
        T::Narr, T::Fut, T::Opt, T::Imp, T::Cond, T::Neces, T::Inf1, T::Pres,
    ];

    /// Possessive morphemes other than `Pnon`.
    pub const POSSESSIVES: [TurkishMorpheme; 6] = [T::P1sg, T::P2sg, T::P3sg, T::P1pl, T::P2pl, T::P3pl];
}

impl Morpheme for TurkishMorpheme {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn id(self) -> &'static str {
        match self {
            T::Noun => "Noun",
            T::Adj => "Adj",
            T::Adv => "Adv",
            T::Conj => "Conj",
            T::Interj => "Interj",
            T::Verb => "Verb",
            T::Pron => "Pron",
            T::Num => "Num",
            T::Det => "Det",
            T::Postp => "Postp",
            T::Ques => "Ques",
            T::Dup => "Dup",
            T::Punc => "Punc",
            T::A1sg => "A1sg",
            T::A2sg => "A2sg",
            T::A3sg => "A3sg",
            T::A1pl => "A1pl",
            T::A2pl => "A2pl",
            T::A3pl => "A3pl",
            T::Pnon => "Pnon",
            T::P1sg => "P1sg",
            T::P2sg => "P2sg",
            T::P3sg => "P3sg",
            T::P1pl => "P1pl",
            T::P2pl => "P2pl",
            T::P3pl => "P3pl",
            T::Nom => "Nom",
            T::Dat => "Dat",
            T::Acc => "Acc",
            T::Abl => "Abl",
            T::Loc => "Loc",
            T::Ins => "Ins",
            T::Gen => "Gen",
            T::Equ => "Equ",
            T::Dim => "Dim",
            T::Ness => "Ness",
            T::With => "With",
            T::Without => "Without",
            T::Agt => "Agt",
            T::Become => "Become",
            T::Acquire => "Acquire",
            T::Zero => "Zero",
            T::Neg => "Neg",
            T::Able => "Able",
            T::Caus => "Caus",
            T::Pass => "Pass",
            T::Prog1 => "Prog1",
            T::Aor => "Aor",
            T::Past => "Past",
            T::Narr => "Narr",
            T::Fut => "Fut",
            T::Opt => "Opt",
            T::Imp => "Imp",
            T::Cond => "Cond",
            T::Neces => "Neces",
            T::Inf1 => "Inf1",
            T::Pres => "Pres",
        }
    }

    fn is_derivational(self) -> bool {
        matches!(
            self,
            T::Dim
                | T::Ness
                | T::With
                | T::Without
                | T::Agt
                | T::Become
                | T::Acquire
                | T::Zero
                | T::Able
                | T::Caus
                | T::Pass
                | T::Inf1
        )
    }

    fn pos(self) -> Option<PrimaryPos> {
        Some(match self {
            T::Noun => PrimaryPos::Noun,
            T::Adj => PrimaryPos::Adjective,
            T::Adv => PrimaryPos::Adverb,
            T::Conj => PrimaryPos::Conjunction,
            T::Interj => PrimaryPos::Interjection,
            T::Verb => PrimaryPos::Verb,
            T::Pron => PrimaryPos::Pronoun,
            T::Num => PrimaryPos::Numeral,
            T::Det => PrimaryPos::Determiner,
            T::Postp => PrimaryPos::PostPositive,
            T::Ques => PrimaryPos::Question,
            T::Dup => PrimaryPos::Duplicator,
            T::Punc => PrimaryPos::Punctuation,
            _ => return None,
        })
    }
}

impl fmt::Display for TurkishMorpheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Every state of the graph, by role.
pub(crate) struct States {
    // Nominal roots
    pub noun: StateId,
    pub noun_compound: StateId,
    pub noun_compound_root: StateId,
    pub adj: StateId,
    pub num: StateId,

    // Nominal agreement and possession
    pub a3sg: StateId,
    pub a3pl: StateId,
    pub a3sg_comp: StateId,
    pub a3pl_comp: StateId,
    pub pnon: StateId,
    pub p1sg: StateId,
    pub p2sg: StateId,
    pub p3sg: StateId,
    pub p1pl: StateId,
    pub p2pl: StateId,
    pub p3pl: StateId,

    // Case
    pub nom: StateId,
    pub dat: StateId,
    pub acc: StateId,
    pub abl: StateId,
    pub loc: StateId,
    pub ins: StateId,
    pub genitive: StateId,
    pub equ: StateId,

    // Nominal derivation
    pub dim: StateId,
    pub ness: StateId,
    pub with: StateId,
    pub without: StateId,
    pub agt: StateId,
    pub becomes: StateId,
    pub acquire: StateId,
    pub zero_noun: StateId,
    pub zero_verb: StateId,

    // Nominal copula
    pub n_verb: StateId,
    pub n_pres: StateId,
    pub n_past: StateId,
    pub n_narr: StateId,
    pub n_cond: StateId,

    // Closed classes
    pub adv: StateId,
    pub conj: StateId,
    pub interj: StateId,
    pub pron: StateId,
    pub det: StateId,
    pub postp: StateId,
    pub ques: StateId,
    pub dup: StateId,
    pub punc: StateId,

    // Verbs
    pub verb: StateId,
    pub verb_vowel_drop: StateId,
    pub neg: StateId,
    pub neg_prog: StateId,
    pub able: StateId,
    pub caus: StateId,
    pub pass: StateId,
    pub prog: StateId,
    pub aor: StateId,
    pub aor_neg: StateId,
    pub aor_neg_empty: StateId,
    pub past: StateId,
    pub narr: StateId,
    pub fut: StateId,
    pub opt: StateId,
    pub imp: StateId,
    pub cond: StateId,
    pub neces: StateId,
    pub tense_past: StateId,
    pub inf1: StateId,

    // Verbal agreement
    pub v_a1sg: StateId,
    pub v_a2sg: StateId,
    pub v_a3sg: StateId,
    pub v_a1pl: StateId,
    pub v_a2pl: StateId,
    pub v_a3pl: StateId,
}

impl States {
    fn declare(b: &mut GraphBuilder<TurkishMorpheme>) -> Self {
        Self {
            noun: b.non_terminal("noun_S", T::Noun),
            noun_compound: b.non_terminal("nounCompound_S", T::Noun),
            noun_compound_root: b.non_terminal("nounCompoundRoot_S", T::Noun),
            adj: b.terminal("adjectiveRoot_ST", T::Adj),
            num: b.terminal("numeralRoot_ST", T::Num),

            a3sg: b.non_terminal("a3sg_S", T::A3sg),
            a3pl: b.non_terminal("a3pl_S", T::A3pl),
            a3sg_comp: b.non_terminal("a3sgCompound_S", T::A3sg),
            a3pl_comp: b.non_terminal("a3plCompound_S", T::A3pl),
            pnon: b.non_terminal("pnon_S", T::Pnon),
            p1sg: b.non_terminal("p1sg_S", T::P1sg),
            p2sg: b.non_terminal("p2sg_S", T::P2sg),
            p3sg: b.non_terminal("p3sg_S", T::P3sg),
            p1pl: b.non_terminal("p1pl_S", T::P1pl),
            p2pl: b.non_terminal("p2pl_S", T::P2pl),
            p3pl: b.non_terminal("p3pl_S", T::P3pl),

            nom: b.terminal("nom_ST", T::Nom),
            dat: b.terminal("dat_ST", T::Dat),
            acc: b.terminal("acc_ST", T::Acc),
            abl: b.terminal("abl_ST", T::Abl),
            loc: b.terminal("loc_ST", T::Loc),
            ins: b.terminal("ins_ST", T::Ins),
            genitive: b.terminal("gen_ST", T::Gen),
            equ: b.terminal("equ_ST", T::Equ),

            dim: b.non_terminal_derivative("dim_S", T::Dim),
            ness: b.non_terminal_derivative("ness_S", T::Ness),
            with: b.non_terminal_derivative("with_S", T::With),
            without: b.non_terminal_derivative("without_S", T::Without),
            agt: b.non_terminal_derivative("agt_S", T::Agt),
            becomes: b.non_terminal_derivative("become_S", T::Become),
            acquire: b.non_terminal_derivative("acquire_S", T::Acquire),
            zero_noun: b.non_terminal_derivative("zeroNoun_S", T::Zero),
            zero_verb: b.non_terminal_derivative("zeroVerb_S", T::Zero),

            n_verb: b.non_terminal("nVerb_S", T::Verb),
            n_pres: b.non_terminal("nPresent_S", T::Pres),
            n_past: b.non_terminal("nPast_S", T::Past),
            n_narr: b.non_terminal("nNarr_S", T::Narr),
            n_cond: b.non_terminal("nCond_S", T::Cond),

            adv: b.terminal("advRoot_ST", T::Adv),
            conj: b.terminal("conjRoot_ST", T::Conj),
            interj: b.terminal("interjRoot_ST", T::Interj),
            pron: b.terminal("pronRoot_ST", T::Pron),
            det: b.terminal("detRoot_ST", T::Det),
            postp: b.terminal("postpRoot_ST", T::Postp),
            ques: b.terminal("questionRoot_ST", T::Ques),
            dup: b.terminal("dupRoot_ST", T::Dup),
            punc: b.terminal("puncRoot_ST", T::Punc),

            verb: b.non_terminal("verbRoot_S", T::Verb),
            verb_vowel_drop: b.non_terminal("verbRoot_VowelDrop_S", T::Verb),
            neg: b.non_terminal("vNeg_S", T::Neg),
            neg_prog: b.non_terminal("vNegProg_S", T::Neg),
            able: b.non_terminal_derivative("vAble_S", T::Able),
            caus: b.non_terminal_derivative("vCaus_S", T::Caus),
            pass: b.non_terminal_derivative("vPass_S", T::Pass),
            prog: b.non_terminal("vProg1_S", T::Prog1),
            aor: b.non_terminal("vAor_S", T::Aor),
            aor_neg: b.non_terminal("vAorNeg_S", T::Aor),
            aor_neg_empty: b.non_terminal("vAorNegEmpty_S", T::Aor),
            past: b.non_terminal("vPast_S", T::Past),
            narr: b.non_terminal("vNarr_S", T::Narr),
            fut: b.non_terminal("vFut_S", T::Fut),
            opt: b.non_terminal("vOpt_S", T::Opt),
            imp: b.non_terminal("vImp_S", T::Imp),
            cond: b.non_terminal("vCond_S", T::Cond),
            neces: b.non_terminal("vNeces_S", T::Neces),
            tense_past: b.non_terminal("vPastAfterTense_S", T::Past),
            inf1: b.non_terminal_derivative("vInf1_S", T::Inf1),

            v_a1sg: b.terminal("vA1sg_ST", T::A1sg),
            v_a2sg: b.terminal("vA2sg_ST", T::A2sg),
            v_a3sg: b.terminal("vA3sg_ST", T::A3sg),
            v_a1pl: b.terminal("vA1pl_ST", T::A1pl),
            v_a2pl: b.terminal("vA2pl_ST", T::A2pl),
            v_a3pl: b.terminal("vA3pl_ST", T::A3pl),
        }
    }
}

/// Person agreement after a tense of the present group (Prog1, Aor, Narr,
/// Neces, the present copula): `-Im -sIn Ø -Iz -sInIz -lAr`.
fn present_agreements(b: &mut GraphBuilder<TurkishMorpheme>, s: &States, from: StateId) {
    b.add(from, s.v_a1sg, "+yIm")
        .add(from, s.v_a2sg, "sIn")
        .add_empty(from, s.v_a3sg)
        .add(from, s.v_a1pl, "+yIz")
        .add(from, s.v_a2pl, "sInIz")
        .add(from, s.v_a3pl, "lAr");
}

/// Person agreement after a tense of the past group (Past, Cond):
/// `-m -n Ø -k -nIz -lAr`.
fn past_agreements(b: &mut GraphBuilder<TurkishMorpheme>, s: &States, from: StateId) {
    b.add(from, s.v_a1sg, "m")
        .add(from, s.v_a2sg, "n")
        .add_empty(from, s.v_a3sg)
        .add(from, s.v_a1pl, "k")
        .add(from, s.v_a2pl, "nIz")
        .add(from, s.v_a3pl, "lAr");
}

// ---------------------------------------------------------------------------
// TurkishMorphotactics
// ---------------------------------------------------------------------------

/// The built Turkish graph plus the root states stems attach to.
#[derive(Debug, Clone)]
pub struct TurkishMorphotactics {
    graph: Arc<MorphemeGraph<TurkishMorpheme>>,
    roots: RootStates,
}

/// States a stem transition can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootStates {
    pub noun: StateId,
    pub noun_compound: StateId,
    pub noun_compound_root: StateId,
    pub adjective: StateId,
    pub numeral: StateId,
    pub verb: StateId,
    pub verb_vowel_drop: StateId,
    pub adverb: StateId,
    pub conjunction: StateId,
    pub interjection: StateId,
    pub pronoun: StateId,
    pub determiner: StateId,
    pub postpositive: StateId,
    pub question: StateId,
    pub duplicator: StateId,
    pub punctuation: StateId,
}

impl TurkishMorphotactics {
    pub fn new() -> Result<Self, GraphError> {
        let mut b = GraphBuilder::new();
        let s = States::declare(&mut b);
        nominal::connect(&mut b, &s);
        verbal::connect(&mut b, &s);
        let graph = b.build()?;

        let roots = RootStates {
            noun: s.noun,
            noun_compound: s.noun_compound,
            noun_compound_root: s.noun_compound_root,
            adjective: s.adj,
            numeral: s.num,
            verb: s.verb,
            verb_vowel_drop: s.verb_vowel_drop,
            adverb: s.adv,
            conjunction: s.conj,
            interjection: s.interj,
            pronoun: s.pron,
            determiner: s.det,
            postpositive: s.postp,
            question: s.ques,
            duplicator: s.dup,
            punctuation: s.punc,
        };
        Ok(Self {
            graph: Arc::new(graph),
            roots,
        })
    }

    pub fn graph(&self) -> &Arc<MorphemeGraph<TurkishMorpheme>> {
        &self.graph
    }

    pub fn roots(&self) -> &RootStates {
        &self.roots
    }

    /// Root state for the unmodified stem of `item`. `None` for POS that
    /// have no root state.
    pub fn root_state(&self, item: &DictionaryItem) -> Option<StateId> {
        let r = &self.roots;
        Some(match item.primary_pos {
            PrimaryPos::Noun if item.has_attribute(RootAttribute::CompoundP3sg) => r.noun_compound,
            PrimaryPos::Noun => r.noun,
            PrimaryPos::Adjective => r.adjective,
            PrimaryPos::Numeral => r.numeral,
            PrimaryPos::Verb => r.verb,
            PrimaryPos::Adverb => r.adverb,
            PrimaryPos::Conjunction => r.conjunction,
            PrimaryPos::Interjection => r.interjection,
            PrimaryPos::Pronoun => r.pronoun,
            PrimaryPos::Determiner => r.determiner,
            PrimaryPos::PostPositive => r.postpositive,
            PrimaryPos::Question => r.question,
            PrimaryPos::Duplicator => r.duplicator,
            PrimaryPos::Punctuation => r.punctuation,
            PrimaryPos::Unknown => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morfo_core::{RootAttributes, SecondaryPos};

    #[test]
    fn catalog_ids_are_unique_and_resolvable() {
        for m in TurkishMorpheme::ALL {
            assert_eq!(TurkishMorpheme::from_id(m.id()), Some(m));
        }
        assert_eq!(TurkishMorpheme::from_id("Foo"), None);
        assert_eq!(T::Adj.pos(), Some(PrimaryPos::Adjective));
        assert!(T::With.is_derivational());
        assert!(!T::A3pl.is_derivational());
    }

    #[test]
    fn graph_builds() {
        let tactics = TurkishMorphotactics::new().unwrap();
        let g = tactics.graph();
        assert!(g.state_count() > 60);
        assert!(g.transition_count() > g.state_count());
        assert_eq!(g.state_by_name("noun_S"), Some(tactics.roots().noun));
        assert!(g.state(tactics.roots().adjective).terminal);
        assert!(!g.state(tactics.roots().verb).terminal);
    }

    #[test]
    fn case_and_derivation_states() {
        let tactics = TurkishMorphotactics::new().unwrap();
        let g = tactics.graph();
        let genitive = g.state(g.state_by_name("gen_ST").unwrap());
        assert!(genitive.terminal);
        assert_eq!(genitive.morpheme, T::Gen);
        let becomes = g.state(g.state_by_name("become_S").unwrap());
        assert!(becomes.derivative);
        assert_eq!(becomes.morpheme, T::Become);
    }

    #[test]
    fn root_states_by_pos() {
        let tactics = TurkishMorphotactics::new().unwrap();
        let item = |pos, attrs: &[RootAttribute]| {
            DictionaryItem::new("x", "x", pos, SecondaryPos::None, RootAttributes::of(attrs))
        };
        let r = tactics.roots();
        assert_eq!(tactics.root_state(&item(PrimaryPos::Noun, &[])), Some(r.noun));
        assert_eq!(
            tactics.root_state(&item(PrimaryPos::Noun, &[RootAttribute::CompoundP3sg])),
            Some(r.noun_compound)
        );
        assert_eq!(tactics.root_state(&item(PrimaryPos::Verb, &[])), Some(r.verb));
        assert_eq!(tactics.root_state(&item(PrimaryPos::Unknown, &[])), None);
    }
}
