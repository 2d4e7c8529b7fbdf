// Nouns, adjectives, numerals, compounds and the nominal copula

use morfo_core::SecondaryPos;
use morfo_graph::{Condition, GraphBuilder, StateId};

use super::{States, TurkishMorpheme as T, past_agreements, present_agreements};

type C = Condition<T>;
type Builder = GraphBuilder<T>;

pub(super) fn connect(b: &mut Builder, s: &States) {
    connect_nouns(b, s);
    connect_compounds(b, s);
    connect_cases(b, s);
    connect_derivations(b, s);
    connect_adjectives(b, s);
    connect_copula(b, s);
}

fn connect_nouns(b: &mut Builder, s: &States) {
    b.add_empty(s.noun, s.a3sg).add(s.noun, s.a3pl, "lAr");

    b.add_empty(s.a3sg, s.pnon)
        .add(s.a3sg, s.p1sg, "Im")
        .add(s.a3sg, s.p2sg, "In")
        .add(s.a3sg, s.p3sg, "+sI")
        .add(s.a3sg, s.p1pl, "ImIz")
        .add(s.a3sg, s.p2pl, "InIz")
        .add(s.a3sg, s.p3pl, "lArI");

    // After the plural the third person possessives share one surface.
    b.add_empty(s.a3pl, s.pnon)
        .add(s.a3pl, s.p1sg, "Im")
        .add(s.a3pl, s.p2sg, "In")
        .add(s.a3pl, s.p3sg, "I")
        .add(s.a3pl, s.p1pl, "ImIz")
        .add(s.a3pl, s.p2pl, "InIz")
        .add(s.a3pl, s.p3pl, "I");
}

/// Compounds like `zeytinyağı` already end in a P3sg suffix. The full form
/// only takes case endings; the plural attaches to the compound root
/// (`zeytinyağ-lar-ı`).
fn connect_compounds(b: &mut Builder, s: &States) {
    b.add_empty(s.noun_compound, s.a3sg_comp)
        .add_empty(s.a3sg_comp, s.p3sg)
        .add(s.noun_compound_root, s.a3pl_comp, "lAr")
        .add(s.a3pl_comp, s.p3sg, "I");
}

fn connect_cases(b: &mut Builder, s: &States) {
    b.add_empty(s.pnon, s.nom)
        .add(s.pnon, s.dat, "+yA")
        .add(s.pnon, s.acc, "+yI")
        .add(s.pnon, s.abl, ">dAn")
        .add(s.pnon, s.loc, ">dA")
        .add(s.pnon, s.ins, "+ylA")
        .add(s.pnon, s.genitive, "+nIn")
        .add(s.pnon, s.equ, ">cA");

    for from in [s.p1sg, s.p2sg, s.p1pl, s.p2pl] {
        b.add_empty(from, s.nom)
            .add(from, s.dat, "A")
            .add(from, s.acc, "I")
            .add(from, s.abl, ">dAn")
            .add(from, s.loc, ">dA")
            .add(from, s.ins, "lA")
            .add(from, s.genitive, "In")
            .add(from, s.equ, ">cA");
    }

    // Third person possessives insert a pronominal n.
    for from in [s.p3sg, s.p3pl] {
        b.add_empty(from, s.nom)
            .add(from, s.dat, "nA")
            .add(from, s.acc, "nI")
            .add(from, s.abl, "ndAn")
            .add(from, s.loc, "ndA")
            .add(from, s.ins, "ylA")
            .add(from, s.genitive, "nIn")
            .add(from, s.equ, "ncA");
    }
}

/// Derivations attach to a bare nominative: no plural, no possessive in
/// the current group.
fn connect_derivations(b: &mut Builder, s: &States) {
    let mut inflected = vec![T::A3pl];
    inflected.extend(T::POSSESSIVES);
    let bare = C::current_group_contains(&inflected).not();
    let common = bare.clone().and(C::SecondaryPosIs(SecondaryPos::ProperNoun).not());

    b.add_if(s.nom, s.dim, ">cI~k", common.clone())
        .add_if(s.nom, s.dim, ">cI!ğ", common.clone())
        .add_if(s.nom, s.ness, "lI~k", bare.clone())
        .add_if(s.nom, s.ness, "lI!ğ", bare.clone())
        .add_if(s.nom, s.with, "lI", bare.clone())
        .add_if(s.nom, s.without, "sIz", bare.clone())
        .add_if(s.nom, s.agt, ">cI", common.clone())
        .add_if(s.nom, s.becomes, "lAş", common.clone())
        .add_if(s.nom, s.acquire, "lAn", common);

    for derived_noun in [s.dim, s.ness, s.agt] {
        b.add_empty(derived_noun, s.noun);
    }
    b.add_empty(s.with, s.adj)
        .add_empty(s.without, s.adj)
        .add_empty(s.becomes, s.verb)
        .add_empty(s.acquire, s.verb);
}

fn connect_adjectives(b: &mut Builder, s: &States) {
    zero_derivations(b, s, s.adj);
    b.add(s.adj, s.ness, "lI~k")
        .add(s.adj, s.ness, "lI!ğ")
        .add(s.adj, s.becomes, "lAş");

    zero_derivations(b, s, s.num);

    b.add_empty(s.zero_noun, s.noun);
}

/// Adjectives and numerals act as nouns or as copula predicates, but only
/// when a suffix follows.
fn zero_derivations(b: &mut Builder, s: &States, from: StateId) {
    b.add_empty_if(from, s.zero_noun, C::HasTail)
        .add_empty_if(from, s.zero_verb, C::HasTail);
}

/// `elma-yım`, `ev-de-ydi`, `kitap-mış`: nominal predicates.
fn connect_copula(b: &mut Builder, s: &States) {
    // A zero-derived noun is not zero-derived again into a predicate.
    let once = C::HasTail.and(C::current_group_contains(&[T::Zero]).not());
    for from in [s.nom, s.loc] {
        b.add_empty_if(from, s.zero_verb, once.clone());
    }
    b.add_empty(s.zero_verb, s.n_verb);

    b.add_empty(s.n_verb, s.n_pres)
        .add(s.n_verb, s.n_past, "+y>dI")
        .add(s.n_verb, s.n_narr, "+ymIş")
        .add(s.n_verb, s.n_cond, "+ysA");

    present_agreements(b, s, s.n_pres);
    past_agreements(b, s, s.n_past);
    present_agreements(b, s, s.n_narr);
    past_agreements(b, s, s.n_cond);
}
