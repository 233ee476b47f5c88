//! Property tests for command display and secret masking.

use proptest::prelude::*;

use ballast::domain::entities::{shell_quote, CommandSpec, REDACTED};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A redacted secret never appears in the displayed command.
    #[test]
    fn property_redacted_secret_is_never_displayed(
        secret in "[A-Za-z0-9+/]{8,32}",
        prefix in "[a-z]{0,8}",
    ) {
        let spec = CommandSpec::new("mysql")
            .arg(format!("--password={prefix}{secret}"))
            .redact(secret.clone());

        let shown = spec.display();

        prop_assert!(!shown.contains(&secret));
        prop_assert!(shown.contains(REDACTED));
    }

    /// PROPERTY: Quoting leaves safe words alone and wraps everything else.
    #[test]
    fn property_shell_quote_wraps_unsafe_words(value in ".{0,24}") {
        let quoted = shell_quote(&value);
        let safe = !value.is_empty()
            && value.chars().all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));

        if safe {
            prop_assert_eq!(quoted, value);
        } else {
            prop_assert!(quoted.starts_with('\'') && quoted.ends_with('\''));
        }
    }
}
