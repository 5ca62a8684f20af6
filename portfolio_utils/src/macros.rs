/// Panics unless `$expr` matches `$pat` (and the optional guard).
#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables, reason = "bindings are only used by the guard")]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[derive(Debug)]
    enum Outcome {
        Sent,
        Failed(u8),
    }

    #[test]
    fn matches() {
        assert_matches!(Outcome::Sent, Outcome::Sent);
        assert_matches!(Outcome::Failed(3), Outcome::Failed(x) if *x == 3);
    }

    #[test]
    #[should_panic = "did not match pattern"]
    fn no_match() {
        assert_matches!(Outcome::Failed(1), Outcome::Sent);
    }

    #[test]
    #[should_panic = "does not match predicate"]
    fn predicate_fails() {
        assert_matches!(Outcome::Failed(1), Outcome::Failed(x) if *x == 2);
    }
}
