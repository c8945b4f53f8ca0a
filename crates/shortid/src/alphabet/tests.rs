use super::*;

#[test]
fn default_alphabet_has_57_distinct_chars() {
    let alphabet = Alphabet::default();

    assert_eq!(alphabet.len(), 57);
    assert_eq!(alphabet.as_str(), DEFAULT_ALPHABET);
    assert!(Alphabet::try_from_str(DEFAULT_ALPHABET).is_ok());
}

#[test]
fn default_alphabet_skips_ambiguous_chars() {
    let alphabet = Alphabet::default();

    for ch in ['0', '1', 'I', 'O', 'l'] {
        assert!(!alphabet.contains(ch), "unexpected '{ch}'");
    }
}

#[test]
fn rejects_empty() {
    let err = Alphabet::try_from_str("").unwrap_err();
    assert_eq!(err, AlphabetError::Empty);
}

#[test]
fn rejects_single_char() {
    let err = Alphabet::try_from_str("a").unwrap_err();
    assert_eq!(err, AlphabetError::TooSmall { len: 1 });
}

#[test]
fn rejects_duplicates() {
    let err = Alphabet::try_from_str("abca").unwrap_err();
    assert_eq!(err, AlphabetError::Duplicate { ch: 'a' });

    // a repeated char is reported even when the alphabet is otherwise too small
    let err = Alphabet::try_from_str("zz").unwrap_err();
    assert_eq!(err, AlphabetError::Duplicate { ch: 'z' });
}

#[test]
fn preserves_declared_order() {
    let alphabet = Alphabet::try_from_str("zyx987").unwrap();

    assert_eq!(alphabet.to_string(), "zyx987");
    assert_eq!(alphabet.first(), Some(&'z'));
}

#[test]
fn accepts_non_ascii() {
    let alphabet = Alphabet::try_from_str("αβγδ").unwrap();

    assert_eq!(alphabet.len(), 4);
    assert!(alphabet.contains('γ'));
}

#[test]
fn resolve_falls_back_to_default() {
    assert_eq!(Alphabet::resolve(None).unwrap(), Alphabet::default());
    assert_eq!(Alphabet::resolve(Some("ab")).unwrap().as_str(), "ab");
}

#[test]
fn keyspace_saturates() {
    let alphabet = Alphabet::try_from_str("ab").unwrap();

    assert_eq!(alphabet.keyspace(10), 1024);
    assert_eq!(alphabet.keyspace(200), u128::MAX);
}
