#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! re {
    ($pat:literal) => {
        $crate::Pattern::Regex($crate::regex!($pat))
    };
}

#[macro_export]
macro_rules! lexicon {
    ($lex:ident) => {
        $crate::Pattern::Lexicon($crate::Lexicon::$lex)
    };
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        dim: $dim:expr,
        pattern: $pat:expr
        $(, optional_phrases: [ $($opt_phrase:expr),* $(,)? ])?
        $(, buckets: $buckets:expr)?
        $(, priority: $priority:expr)?
        , prod: |$caps_expr:ident : &$caps_ty:ty| -> $ret_ty:ty $body_expr:block
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            dim: $dim,
            pattern: $pat,
            production: Box::new(move |$caps_expr: &$caps_ty| {
                use $crate::IntoToken;
                let result: $ret_ty = $body_expr;
                result.and_then(|v| v.into_token())
            }),
            optional_phrases: &[ $($($opt_phrase),*)? ],
            buckets: { 0 $(| $buckets)? },
            priority: { 0 $(+ $priority)? },
        }
    }};
}
