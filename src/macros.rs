/// Builds a [`Value`](crate::Value) tree from a JSON-like literal.
///
/// ```rust
/// use yml2props::{flatten, tree};
///
/// let doc = tree!({
///     "foo": { "bar": 42 },
///     "items": ["a", "b"]
/// });
/// let props = flatten(&doc);
/// assert_eq!(props.get("foo.bar"), Some("42"));
/// assert_eq!(props.get("items[1]"), Some("b"));
/// ```
#[macro_export]
macro_rules! tree {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::tree!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($key.to_string(), $crate::tree!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}
