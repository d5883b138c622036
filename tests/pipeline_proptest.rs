//! Property-based tests for the weave pipeline
//!
//! Random interleaving is never asserted by exact value here, only by shape:
//! output length and which positions come from the input versus the alphabet.

use proptest::prelude::*;
use std::sync::Arc;
use stringweave::{
    transform, Alphabet, Configuration, InterleaveMode, SeededRandom, WeaveError, Weaver,
};

fn alphabet_strategy() -> impl Strategy<Value = Alphabet> {
    prop_oneof![Just(Alphabet::Alphanumeric), Just(Alphabet::Symbols)]
}

/// Any separator, with whitespace and the byte order mark drawn often
fn separator_strategy() -> impl Strategy<Value = char> {
    prop_oneof![
        any::<char>(),
        prop::sample::select(vec![' ', '\n', '\r', '\t', '\u{00A0}', '\u{FEFF}']),
    ]
}

fn interleave_strategy() -> impl Strategy<Value = InterleaveMode> {
    prop_oneof![
        Just(InterleaveMode::None),
        separator_strategy().prop_map(InterleaveMode::Fixed),
        alphabet_strategy().prop_map(InterleaveMode::Random),
    ]
}

fn config_strategy() -> impl Strategy<Value = Configuration> {
    (
        any::<bool>(),
        any::<bool>(),
        prop_oneof![
            Just(stringweave::WhitespacePolicy::Granular),
            Just(stringweave::WhitespacePolicy::Blanket)
        ],
        interleave_strategy(),
        any::<bool>(),
    )
        .prop_map(
            |(remove_newlines, remove_spaces, policy, interleave, reverse)| Configuration {
                remove_newlines,
                remove_spaces,
                policy,
                interleave,
                reverse,
            },
        )
}

/// Text with at least one non-whitespace character
fn text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 \n\r\t.,!é日]{0,40}"
        .prop_filter("needs visible text", |s| !s.trim().is_empty())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn stripping_both_removes_spaces_and_newlines(
        text in text_strategy(),
        interleave in interleave_strategy(),
        reverse in any::<bool>(),
    ) {
        let config = Configuration::default()
            .with_interleave(interleave)
            .with_reverse(reverse);
        let output = transform(&text, &config).unwrap();
        prop_assert!(!output.contains([' ', '\n', '\r']), "output: {:?}", output);
    }

    #[test]
    fn empty_input_fails_for_every_config(
        config in config_strategy(),
        blank in "[ \t\n\r\u{FEFF}\u{3000}]{0,8}",
    ) {
        prop_assert!(matches!(transform(&blank, &config), Err(WeaveError::EmptyInput)));
    }

    #[test]
    fn fixed_interleave_leaves_single_char(c in any::<char>(), sep in any::<char>()) {
        prop_assume!(!c.is_whitespace() && c != '\u{FEFF}');
        let config = Configuration::passthrough().with_interleave(InterleaveMode::Fixed(sep));
        prop_assert_eq!(transform(&c.to_string(), &config).unwrap(), c.to_string());
    }

    #[test]
    fn random_interleave_length_law(
        text in "[a-zA-Z0-9é日]{2,40}",
        alphabet in alphabet_strategy(),
        seed in any::<u64>(),
    ) {
        let weaver = Weaver::new().with_random(Arc::new(SeededRandom::new(seed)));
        let config = Configuration::default().with_interleave(InterleaveMode::Random(alphabet));
        let output: Vec<char> = weaver.transform(&text, &config).unwrap().chars().collect();
        let input: Vec<char> = text.chars().collect();

        prop_assert_eq!(output.len(), 2 * input.len() - 1);
        for (i, c) in output.iter().enumerate() {
            if i % 2 == 0 {
                prop_assert_eq!(*c, input[i / 2]);
            } else {
                prop_assert!(alphabet.contains(*c));
            }
        }
    }

    #[test]
    fn reversal_is_an_involution(text in text_strategy()) {
        let config = Configuration::passthrough().with_reverse(true);
        let once = transform(&text, &config).unwrap();
        prop_assert_eq!(transform(&once, &config).unwrap(), text);
    }

    #[test]
    fn blanket_output_has_no_whitespace(
        text in text_strategy(),
        interleave in interleave_strategy(),
    ) {
        let config = Configuration::blanket().with_interleave(interleave);
        let output = transform(&text, &config).unwrap();
        prop_assert!(
            !output.chars().any(|c| c.is_whitespace() || c == '\u{FEFF}'),
            "output: {:?}",
            output
        );
    }
}
