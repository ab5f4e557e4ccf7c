//! A compact built-in Turkish morphotactics graph and lexicon.
//!
//! Graph wiring is normally the job of an external collaborator; this
//! module ships a small but realistic default covering common nominal and
//! verbal suffixation, the irregular roots, diminutive derivation and the
//! fused-possessive compounds. The CLI, the integration tests and the
//! benchmarks run on it.
//!
//! # Examples
//!
//! ```
//! use morfo::turkish;
//!
//! let analyzer = turkish::analyzer().unwrap();
//! assert_eq!(analyzer.analyze("kitaplara")[0].surfaces(), vec!["kitap", "lar", "a"]);
//! assert!(analyzer.analyze("kitapa").is_empty());
//! ```

use std::sync::Arc;

use crate::analysis::MorphAnalyzer;
use crate::error::Result;
use crate::lexicon::{DictionaryItem, Lexicon, PrimaryPos, RootAttribute, SecondaryPos};
use crate::morphotactics::condition::{and, not_have, root_is, root_is_not};
use crate::morphotactics::{Morphotactics, MorphotacticsBuilder};
use crate::phonetics::PhoneticAttribute::{ExpectsConsonant, ExpectsVowel, LastLetterVowel};

/// Build the default graph.
pub fn morphotactics() -> Result<Arc<Morphotactics>> {
    let mut b = MorphotacticsBuilder::new();

    let noun = b.morpheme("Noun", "noun");
    let verb = b.morpheme("Verb", "verb");
    let pron = b.morpheme("Pron", "pronoun");
    let a3sg = b.morpheme("A3sg", "third person singular");
    let a3pl = b.morpheme("A3pl", "third person plural");
    let pnon = b.morpheme("Pnon", "no possessor");
    let p1sg = b.morpheme("P1sg", "first person singular possessive");
    let p3sg = b.morpheme("P3sg", "third person singular possessive");
    let nom = b.morpheme("Nom", "nominative");
    let dat = b.morpheme("Dat", "dative");
    let loc = b.morpheme("Loc", "locative");
    let abl = b.morpheme("Abl", "ablative");
    let genitive = b.morpheme("Gen", "genitive");
    let acc = b.morpheme("Acc", "accusative");
    let ins = b.morpheme("Ins", "instrumental");
    let dim = b.derivational_morpheme("Dim", "diminutive");
    let past = b.morpheme("Past", "past tense");
    let prog = b.morpheme("Prog1", "progressive");
    let neg = b.morpheme("Neg", "negation");
    let inf = b.morpheme("Inf1", "infinitive");
    let v1sg = b.morpheme("A1sg", "first person singular");

    // Nominal states.
    let noun_s = b.pos_root_state("noun_S", &noun)?;
    let a3sg_s = b.state("a3sg_S", &a3sg)?;
    let a3pl_s = b.state("a3pl_S", &a3pl)?;
    let pnon_s = b.state("pnon_S", &pnon)?;
    let p1sg_s = b.state("p1sg_S", &p1sg)?;
    let p3sg_s = b.state("p3sg_S", &p3sg)?;
    let nom_st = b.terminal_state("nom_ST", &nom)?;
    let dat_st = b.terminal_state("dat_ST", &dat)?;
    let loc_st = b.terminal_state("loc_ST", &loc)?;
    let abl_st = b.terminal_state("abl_ST", &abl)?;
    let gen_st = b.terminal_state("gen_ST", &genitive)?;
    let acc_st = b.terminal_state("acc_ST", &acc)?;
    let ins_st = b.terminal_state("ins_ST", &ins)?;
    let dim_s = b.derivative_state("dim_S", &dim)?;
    b.root_state(PrimaryPos::Noun, SecondaryPos::None, noun_s);
    b.root_state(PrimaryPos::Adjective, SecondaryPos::None, noun_s);

    // Number.
    b.add_empty(noun_s, a3sg_s)?;
    b.add_with(noun_s, a3pl_s, "lAr", not_have(ExpectsVowel))?;

    // Possession.
    b.add_empty(a3sg_s, pnon_s)?;
    b.add_with(a3sg_s, p1sg_s, "Im", not_have(ExpectsConsonant))?;
    b.add_with(a3sg_s, p3sg_s, "+sI", not_have(ExpectsConsonant))?;
    b.add_empty(a3pl_s, pnon_s)?;
    b.add(a3pl_s, p1sg_s, "Im")?;
    b.add(a3pl_s, p3sg_s, "+sI")?;

    // Case after no possessor.
    b.add_empty(pnon_s, nom_st)?;
    b.add_with(pnon_s, dat_st, "+yA", not_have(ExpectsConsonant))?;
    b.add_with(pnon_s, loc_st, ">dA", not_have(ExpectsVowel))?;
    b.add_with(pnon_s, abl_st, ">dAn", not_have(ExpectsVowel))?;
    b.add_with(pnon_s, gen_st, "+nIn", not_have(ExpectsConsonant))?;
    b.add_with(pnon_s, acc_st, "+yI", not_have(ExpectsConsonant))?;
    b.add_with(pnon_s, ins_st, "+ylA", not_have(ExpectsVowel))?;

    // Case after first person possessive.
    b.add_empty(p1sg_s, nom_st)?;
    b.add(p1sg_s, dat_st, "+yA")?;
    b.add(p1sg_s, loc_st, ">dA")?;
    b.add(p1sg_s, acc_st, "+yI")?;

    // Case after third person possessive takes the n buffer.
    b.add_empty(p3sg_s, nom_st)?;
    b.add(p3sg_s, dat_st, "+nA")?;
    b.add(p3sg_s, loc_st, "ndA")?;
    b.add(p3sg_s, abl_st, "ndAn")?;
    b.add(p3sg_s, gen_st, "+nIn")?;
    b.add(p3sg_s, acc_st, "nI")?;

    // Diminutive derivation re-enters the nominal chain. The k-final form
    // continues with consonants or ends the word; the voiced form demands
    // a vowel.
    b.add_with(nom_st, dim_s, ">cI~k", not_have(ExpectsVowel))?;
    b.add_with(nom_st, dim_s, ">cI!ğ", not_have(ExpectsVowel))?;
    b.add_empty(dim_s, noun_s)?;

    // Irregular nominal roots.
    let noun_su_s = b.state("noun_su_S", &noun)?;
    let noun_su_mod_s = b.state("noun_su_mod_S", &noun)?;
    b.add_empty(noun_su_s, a3sg_s)?;
    b.add_with(noun_su_s, a3pl_s, "lAr", not_have(ExpectsVowel))?;
    b.add_empty(noun_su_mod_s, a3sg_s)?;

    // Fused-possessive compounds: the full form only stands alone; the
    // bare root rejoins at the possessive.
    let compound_full_s = b.state("noun_compound_p3sg_S", &noun)?;
    let compound_root_s = b.state("noun_compound_S", &noun)?;
    b.add_empty(compound_full_s, nom_st)?;
    b.add(compound_root_s, p3sg_s, "+sI")?;
    b.add(compound_root_s, p3sg_s, "lArI")?;

    // Verbal states.
    let verb_s = b.pos_root_state("verb_S", &verb)?;
    let neg_s = b.state("neg_S", &neg)?;
    let past_s = b.state("past_S", &past)?;
    let prog_s = b.state("prog_S", &prog)?;
    let inf_st = b.terminal_state("inf_ST", &inf)?;
    let vpa1sg_st = b.terminal_state("verb_past_a1sg_ST", &v1sg)?;
    let vpa3sg_st = b.terminal_state("verb_past_a3sg_ST", &a3sg)?;
    let vpa3pl_st = b.terminal_state("verb_past_a3pl_ST", &a3pl)?;
    let vpr1sg_st = b.terminal_state("verb_prog_a1sg_ST", &v1sg)?;
    let vpr3sg_st = b.terminal_state("verb_prog_a3sg_ST", &a3sg)?;
    let vpr3pl_st = b.terminal_state("verb_prog_a3pl_ST", &a3pl)?;
    b.root_state(PrimaryPos::Verb, SecondaryPos::None, verb_s);

    b.add_with(verb_s, neg_s, "mA", not_have(ExpectsVowel))?;
    b.add_with(verb_s, past_s, ">dI", not_have(ExpectsVowel))?;
    b.add_with(
        verb_s,
        prog_s,
        "Iyor",
        and(vec![not_have(LastLetterVowel), not_have(ExpectsConsonant)]),
    )?;
    b.add_with(verb_s, inf_st, "mAk", not_have(ExpectsVowel))?;
    b.add(neg_s, past_s, ">dI")?;
    b.add(neg_s, inf_st, "mAk")?;

    b.add(past_s, vpa1sg_st, "m")?;
    b.add_empty(past_s, vpa3sg_st)?;
    b.add(past_s, vpa3pl_st, "lAr")?;
    b.add(prog_s, vpr1sg_st, "+yIm")?;
    b.add_empty(prog_s, vpr3sg_st)?;
    b.add(prog_s, vpr3pl_st, "lAr")?;

    // Verbs with in-stem vowel drop continue into the progressive.
    let verb_lvd_s = b.state("verb_last_vowel_drop_S", &verb)?;
    b.add(verb_lvd_s, prog_s, "Iyor")?;

    // demek/yemek: the raised stem only feeds the progressive.
    let de_ye_s = b.state("verb_de_ye_S", &verb)?;
    let de_ye_mod_s = b.state("verb_de_ye_mod_S", &verb)?;
    b.add(de_ye_s, past_s, ">dI")?;
    b.add(de_ye_s, neg_s, "mA")?;
    b.add(de_ye_s, inf_st, "mAk")?;
    b.add(de_ye_mod_s, prog_s, "Iyor")?;

    // The copula root only carries the past (idi, idim).
    let imek_s = b.state("verb_imek_S", &verb)?;
    b.add(imek_s, past_s, ">dI")?;

    // Pronoun states. Personal pronouns decline from the bare stem except
    // where the oblique stem takes over; o declines entirely from on.
    let pron_pers_s = b.state("pron_pers_S", &pron)?;
    let pron_pers_mod_s = b.state("pron_pers_mod_S", &pron)?;
    let pron_demons_s = b.state("pron_demons_S", &pron)?;
    let pron_demons_mod_s = b.state("pron_demons_mod_S", &pron)?;
    let pron_quant_s = b.state("pron_quant_S", &pron)?;
    let pron_quant_mod_s = b.state("pron_quant_mod_S", &pron)?;
    let pron_pl_s = b.state("pron_a3pl_S", &a3pl)?;
    let pron_nom_st = b.terminal_state("pron_nom_ST", &nom)?;
    b.root_state(PrimaryPos::Pronoun, SecondaryPos::PersonalPronoun, pron_pers_s);
    b.root_state(PrimaryPos::Pronoun, SecondaryPos::DemonstrativePronoun, pron_demons_s);
    b.root_state(PrimaryPos::Pronoun, SecondaryPos::QuantifierPronoun, pron_quant_s);

    let o_pers = "o_Pron_Pers";
    b.add_empty(pron_pers_s, pron_nom_st)?;
    b.add_with(pron_pers_s, loc_st, ">dA", root_is_not(o_pers))?;
    b.add_with(pron_pers_s, abl_st, ">dAn", root_is_not(o_pers))?;
    b.add_with(pron_pers_s, acc_st, "+yI", root_is_not(o_pers))?;
    b.add_with(pron_pers_s, gen_st, "Im", root_is("ben_Pron_Pers"))?;
    b.add_with(pron_pers_s, gen_st, "In", root_is("sen_Pron_Pers"))?;
    b.add(pron_pers_mod_s, dat_st, "+yA")?;
    b.add_with(pron_pers_mod_s, acc_st, "+yI", root_is(o_pers))?;
    b.add_with(pron_pers_mod_s, loc_st, ">dA", root_is(o_pers))?;
    b.add_with(pron_pers_mod_s, abl_st, ">dAn", root_is(o_pers))?;
    b.add_with(pron_pers_mod_s, gen_st, "In", root_is(o_pers))?;
    b.add_with(pron_pers_mod_s, pron_pl_s, "lAr", root_is(o_pers))?;

    b.add_empty(pron_demons_s, pron_nom_st)?;
    b.add(pron_demons_mod_s, dat_st, "+yA")?;
    b.add(pron_demons_mod_s, loc_st, ">dA")?;
    b.add(pron_demons_mod_s, abl_st, ">dAn")?;
    b.add(pron_demons_mod_s, acc_st, "+yI")?;
    b.add(pron_demons_mod_s, gen_st, "In")?;
    b.add(pron_demons_mod_s, pron_pl_s, "lAr")?;

    b.add_empty(pron_pl_s, pron_nom_st)?;
    b.add(pron_pl_s, dat_st, "+yA")?;
    b.add(pron_pl_s, acc_st, "+yI")?;

    b.add_empty(pron_quant_s, pron_nom_st)?;
    b.add(pron_quant_s, dat_st, "+nA")?;
    b.add(pron_quant_s, loc_st, "ndA")?;
    b.add(pron_quant_s, acc_st, "nI")?;
    b.add_with(pron_quant_mod_s, pron_quant_s, "lArI", root_is("birbiri_Pron_Quant"))?;

    Ok(Arc::new(b.build()?))
}

/// Build the default lexicon.
pub fn lexicon() -> Result<Lexicon> {
    use PrimaryPos::*;
    use RootAttribute::*;

    let mut lexicon = Lexicon::new();
    for lemma in ["el", "ev", "araba", "okul", "gül", "yüz"] {
        lexicon.add(DictionaryItem::new(lemma, Noun))?;
    }
    lexicon.add(DictionaryItem::new("kitap", Noun).with_attribute(Voicing))?;
    lexicon.add(DictionaryItem::new("renk", Noun).with_attribute(Voicing))?;
    lexicon.add(DictionaryItem::new("saat", Noun).with_attribute(InverseHarmony))?;
    lexicon.add(DictionaryItem::new("ağız", Noun).with_attribute(LastVowelDrop))?;
    lexicon.add(DictionaryItem::new("sır", Noun).with_attribute(Doubling))?;
    lexicon.add(
        DictionaryItem::new("zeytinyağı", Noun)
            .with_attribute(CompoundP3sg)
            .with_compound_root("zeytinyağ"),
    )?;
    lexicon.add(DictionaryItem::new("su", Noun).with_attribute(Special))?;

    lexicon.add(DictionaryItem::new("gelmek", Verb).with_root("gel"))?;
    lexicon.add(DictionaryItem::new("gitmek", Verb).with_root("git").with_attribute(Voicing))?;
    lexicon.add(
        DictionaryItem::new("anlamak", Verb)
            .with_root("anla")
            .with_attribute(ProgressiveVowelDrop),
    )?;
    lexicon.add(DictionaryItem::new("demek", Verb).with_root("de").with_attribute(Special))?;
    lexicon.add(DictionaryItem::new("yemek", Verb).with_root("ye").with_attribute(Special))?;
    lexicon.add(DictionaryItem::new("imek", Verb).with_root("i").with_attribute(Special))?;

    for lemma in ["ben", "sen", "o"] {
        lexicon.add(
            DictionaryItem::new(lemma, Pronoun)
                .with_secondary_pos(SecondaryPos::PersonalPronoun)
                .with_attribute(Special),
        )?;
    }
    for lemma in ["bu", "şu"] {
        lexicon.add(
            DictionaryItem::new(lemma, Pronoun)
                .with_secondary_pos(SecondaryPos::DemonstrativePronoun)
                .with_attribute(Special),
        )?;
    }
    for lemma in ["hepsi", "birbiri", "kimi", "çoğu"] {
        lexicon.add(
            DictionaryItem::new(lemma, Pronoun)
                .with_secondary_pos(SecondaryPos::QuantifierPronoun)
                .with_attribute(Special),
        )?;
    }

    Ok(lexicon)
}

/// Build an analyzer over the default graph and lexicon.
pub fn analyzer() -> Result<MorphAnalyzer> {
    MorphAnalyzer::new(morphotactics()?, &lexicon()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_graph_builds() {
        let graph = morphotactics().unwrap();
        assert!(graph.state_count() > 30);
        assert!(graph.transition_count() > 50);
        assert!(graph.state_by_key("noun_S").is_ok());
        assert!(graph.state_by_key("pron_pers_mod_S").is_ok());
    }

    #[test]
    fn test_default_analyzer_builds() {
        let analyzer = analyzer().unwrap();
        assert!(!analyzer.stem_transitions().is_empty());
    }
}
