//! Speller behaviour against the system libaspell.
//!
//! Requires libaspell plus the `en` dictionary (and `nl` for the Dutch
//! checks). Every test is ignored by default.
//!
//! Run: cargo test -p aspell --features native --test native -- --ignored

#![cfg(feature = "native")]

use aspell::native::Aspell;
use aspell::{AspellError, AspellSpeller, ConfigKey, Speller, SpellerOptions, SuggestionMode};

fn english() -> AspellSpeller {
    Speller::new(Aspell, SpellerOptions::for_language("en"))
        .unwrap_or_else(|e| panic!("failed to open an English speller: {e}"))
}

#[test]
#[ignore = "requires libaspell and an English dictionary"]
fn checks_english_words() {
    let speller = english();
    assert!(speller.is_correct("cookie").unwrap());
    assert!(!speller.is_correct("cookei").unwrap());
}

#[test]
#[ignore = "requires libaspell and an English dictionary"]
fn suggests_english_words() {
    let mut speller = english();
    let suggestions = speller.suggestions("cookei").unwrap();
    assert!(suggestions.iter().any(|s| s == "cookie"));
}

#[test]
#[ignore = "requires libaspell and an English dictionary"]
fn bad_spellers_yields_at_least_as_many() {
    let mut speller = english();
    let normal = speller.suggestions("cookei").unwrap();
    speller.set_suggestion_mode(SuggestionMode::BadSpellers).unwrap();
    let bad = speller.suggestions("cookei").unwrap();
    assert!(bad.len() >= normal.len());
}

#[test]
#[ignore = "requires libaspell and an English dictionary"]
fn unknown_key_is_a_configuration_error() {
    let mut speller = english();
    assert!(speller.get("foo").unwrap_err().is_config());
    assert!(speller.set("foo", "bar").unwrap_err().is_config());
}

#[test]
#[ignore = "requires libaspell and an English dictionary"]
fn reset_restores_default() {
    let mut speller = english();
    speller.set(ConfigKey::Personal, "foo").unwrap();
    speller.reset(ConfigKey::Personal).unwrap();
    assert_eq!(
        speller.get(ConfigKey::Personal).unwrap(),
        speller.get_default(ConfigKey::Personal).unwrap()
    );
}

#[test]
#[ignore = "requires libaspell and an English dictionary"]
fn personal_word_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("personal.en.pws");
    std::fs::write(&path, "personal_ws-1.1 en 1\ngithub\n").unwrap();

    let mut speller = english();
    speller.set(ConfigKey::Personal, path.display()).unwrap();
    assert!(speller.is_correct("github").unwrap());
}

#[test]
#[ignore = "requires libaspell and an English dictionary"]
fn lists_installed_english_dictionary() {
    let speller = english();
    let dictionaries = speller.dictionaries().unwrap();
    assert!(dictionaries.iter().any(|d| d.matches_language("en")));
}

#[test]
#[ignore = "requires libaspell and an English dictionary"]
fn missing_language_is_reported() {
    let err = Speller::new(Aspell, SpellerOptions::for_language("qq")).unwrap_err();
    assert!(matches!(
        err,
        AspellError::Native { operation: "new_aspell_speller", .. }
    ));
}

#[test]
#[ignore = "requires libaspell and a Dutch dictionary"]
fn checks_dutch_words() {
    let speller = Speller::new(Aspell, SpellerOptions::for_language("nl")).unwrap();
    assert!(speller.is_correct("huis").unwrap());
    assert!(!speller.is_correct("werld").unwrap());
}

#[test]
#[ignore = "requires libaspell and an English dictionary"]
fn scoped_speller_checks_words() {
    let correct = Speller::open(Aspell, SpellerOptions::for_language("en"), |speller| {
        speller.is_correct("cookie").unwrap()
    })
    .unwrap();
    assert!(correct);
}
