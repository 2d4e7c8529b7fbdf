// Verb tenses, negation, voice derivations and agreement

use morfo_core::{PhoneticAttribute, RootAttribute};
use morfo_graph::{Condition, GraphBuilder, StateId};

use super::{States, TurkishMorpheme as T, past_agreements, present_agreements};

type C = Condition<T>;
type Builder = GraphBuilder<T>;

pub(super) fn connect(b: &mut Builder, s: &States) {
    connect_root(b, s);
    connect_negative(b, s);
    connect_tenses(b, s);

    b.add(s.verb_vowel_drop, s.prog, "Iyor");
    b.add_empty(s.inf1, s.noun);
    for voice in [s.able, s.caus, s.pass] {
        b.add_empty(voice, s.verb);
    }
}

/// Whether the root itself decides the allomorph: true until a suffix has
/// produced a surface (a derived verb always takes the regular form).
fn at_root(attr: RootAttribute) -> C {
    C::root_has(attr).and(C::HasAnySuffixSurface.not())
}

fn connect_root(b: &mut Builder, s: &States) {
    let not_after = |m: T| C::PreviousMorphemeIs(m).not();

    b.add_if(s.verb, s.prog, "Iyor", C::not_have(PhoneticAttribute::LastLetterVowel))
        .add(s.verb, s.neg, "mA")
        // yap-m-ıyor: the negative loses its vowel before -Iyor.
        .add(s.verb, s.neg_prog, "m")
        .add_if(s.verb, s.able, "+yAbil", not_after(T::Able))
        .add_if(s.verb, s.caus, "t", at_root(RootAttribute::CausativeT).and(not_after(T::Caus)))
        .add_if(
            s.verb,
            s.caus,
            ">dIr",
            at_root(RootAttribute::CausativeT).not().and(not_after(T::Caus)),
        )
        .add_if(s.verb, s.pass, "In", at_root(RootAttribute::PassiveIn).and(not_after(T::Pass)))
        .add_if(
            s.verb,
            s.pass,
            "Il",
            at_root(RootAttribute::PassiveIn).not().and(not_after(T::Pass)),
        )
        .add_if(
            s.verb,
            s.aor,
            "Ir",
            C::root_has(RootAttribute::AoristI).or(C::HasAnySuffixSurface),
        )
        .add_if(s.verb, s.aor, "Ar", at_root(RootAttribute::AoristA));

    finite_tenses(b, s, s.verb);
    b.add(s.verb, s.inf1, "mA~k");
}

fn connect_negative(b: &mut Builder, s: &States) {
    b.add(s.neg, s.aor_neg, "z").add_empty(s.neg, s.aor_neg_empty);
    finite_tenses(b, s, s.neg);
    b.add(s.neg, s.inf1, "mA~k");

    b.add(s.neg_prog, s.prog, "Iyor");

    // yap-ma-z-sın, yap-ma-m, yap-ma-yız
    b.add(s.aor_neg, s.v_a2sg, "sIn")
        .add_empty(s.aor_neg, s.v_a3sg)
        .add(s.aor_neg, s.v_a2pl, "sInIz")
        .add(s.aor_neg, s.v_a3pl, "lAr");
    b.add(s.aor_neg_empty, s.v_a1sg, "m")
        .add(s.aor_neg_empty, s.v_a1pl, "+yIz");
    b.add(s.aor_neg, s.tense_past, "+y>dI");
}

/// Tenses shared by positive and negative stems.
fn finite_tenses(b: &mut Builder, s: &States, from: StateId) {
    b.add(from, s.past, ">dI")
        .add(from, s.narr, "mIş")
        .add(from, s.fut, "+yAcA~k")
        .add(from, s.fut, "+yAcA!ğ")
        .add(from, s.opt, "+yA")
        .add_empty(from, s.imp)
        .add(from, s.cond, "sA")
        .add(from, s.neces, "mAlI");
}

fn connect_tenses(b: &mut Builder, s: &States) {
    for tense in [s.prog, s.aor, s.narr, s.fut, s.neces] {
        present_agreements(b, s, tense);
        b.add(tense, s.tense_past, "+y>dI");
    }
    past_agreements(b, s, s.past);
    past_agreements(b, s, s.cond);
    past_agreements(b, s, s.tense_past);

    b.add(s.opt, s.v_a1sg, "+yIm")
        .add(s.opt, s.v_a2sg, "sIn")
        .add_empty(s.opt, s.v_a3sg)
        .add(s.opt, s.v_a1pl, "lIm")
        .add(s.opt, s.v_a2pl, "sInIz")
        .add(s.opt, s.v_a3pl, "lAr");

    b.add_empty(s.imp, s.v_a2sg)
        .add(s.imp, s.v_a3sg, "sIn")
        .add(s.imp, s.v_a2pl, "+yIn")
        .add(s.imp, s.v_a2pl, "+yInIz")
        .add(s.imp, s.v_a3pl, "sInlAr");
}
