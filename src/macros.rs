/// Construct a [`Value`][crate::Value] using a JSON-like syntax.
///
/// Map keys can be identifiers or string literals. `None` produces
/// [`Value::None`][crate::Value::None] and any other expression is converted
/// using its `From` implementation.
///
/// ```
/// use canopy::value;
///
/// let ctx = value! {
///     title: "Hello",
///     "page-count": 3,
///     items: [1, 2.5, None, { name: "x" }],
/// };
/// ```
#[macro_export]
macro_rules! value {
    () => {
        $crate::Value::Map($crate::Map::new())
    };

    (None) => {
        $crate::Value::None
    };

    ([]) => {
        $crate::Value::List($crate::List::new())
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Value::List($crate::__value_list!([] $($tt)+))
    };

    ({}) => {
        $crate::Value::Map($crate::Map::new())
    };

    ({ $($tt:tt)+ }) => {{
        let mut map = $crate::Map::new();
        $crate::__value_map!(map; $($tt)+);
        $crate::Value::Map(map)
    }};

    // A bare map body, `value! { a: 1 }`.
    ($key:tt : $($rest:tt)*) => {
        $crate::value!({ $key : $($rest)* })
    };

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __value_list {
    ([$($elems:expr,)*]) => {
        ::std::vec![$($elems,)*]
    };

    ([$($elems:expr,)*] None $(, $($rest:tt)*)?) => {
        $crate::__value_list!([$($elems,)* $crate::Value::None,] $($($rest)*)?)
    };

    ([$($elems:expr,)*] [$($list:tt)*] $(, $($rest:tt)*)?) => {
        $crate::__value_list!([$($elems,)* $crate::value!([$($list)*]),] $($($rest)*)?)
    };

    ([$($elems:expr,)*] {$($map:tt)*} $(, $($rest:tt)*)?) => {
        $crate::__value_list!([$($elems,)* $crate::value!({$($map)*}),] $($($rest)*)?)
    };

    ([$($elems:expr,)*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::__value_list!([$($elems,)* $crate::Value::from($next),] $($($rest)*)?)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! __value_map {
    (@insert $map:ident [$key:expr] None $(, $($rest:tt)*)?) => {
        let _ = $map.insert(::std::string::String::from($key), $crate::Value::None);
        $crate::__value_map!($map; $($($rest)*)?);
    };

    (@insert $map:ident [$key:expr] [$($list:tt)*] $(, $($rest:tt)*)?) => {
        let _ = $map.insert(::std::string::String::from($key), $crate::value!([$($list)*]));
        $crate::__value_map!($map; $($($rest)*)?);
    };

    (@insert $map:ident [$key:expr] {$($inner:tt)*} $(, $($rest:tt)*)?) => {
        let _ = $map.insert(::std::string::String::from($key), $crate::value!({$($inner)*}));
        $crate::__value_map!($map; $($($rest)*)?);
    };

    (@insert $map:ident [$key:expr] $value:expr $(, $($rest:tt)*)?) => {
        let _ = $map.insert(::std::string::String::from($key), $crate::Value::from($value));
        $crate::__value_map!($map; $($($rest)*)?);
    };

    ($map:ident;) => {};

    ($map:ident; $key:ident : $($rest:tt)+) => {
        $crate::__value_map!(@insert $map [stringify!($key)] $($rest)+);
    };

    ($map:ident; $key:literal : $($rest:tt)+) => {
        $crate::__value_map!(@insert $map [$key] $($rest)+);
    };
}

#[cfg(test)]
mod tests {
    use crate::{List, Map, Value};

    #[test]
    fn value_none() {
        assert_eq!(value!(None), Value::None);
    }

    #[test]
    fn value_scalar() {
        assert_eq!(value!("testing..."), Value::from("testing..."));
        assert_eq!(value!(-1), Value::Integer(-1));
        assert_eq!(value!(1 + 2), Value::Integer(3));
    }

    #[test]
    fn value_list() {
        let v = value!(["testing...", None, {}, [], 1.5,]);
        assert_eq!(
            v,
            Value::from([
                Value::from("testing..."),
                Value::None,
                Value::Map(Map::new()),
                Value::List(List::new()),
                Value::Float(1.5),
            ])
        )
    }

    #[test]
    fn value_map() {
        let v = value!({ x: "hello", "a-b": String::from("world!") });
        let exp = Value::from([("x", "hello"), ("a-b", "world!")]);
        assert_eq!(v, exp);

        let v = value!({ x: None, });
        assert_eq!(v, Value::from([("x", Value::None)]));
    }

    #[test]
    fn value_map_bare() {
        let v = value! { x: 1, y: [2] };
        let exp = Value::from([("x", Value::from(1)), ("y", Value::from([2]))]);
        assert_eq!(v, exp);
    }

    #[test]
    fn value_map_nested() {
        let v = value!({
            w: "hello",
            x: {
                y: "hello",
                z: ["world!"],
            },
        });
        let exp = Value::from([
            ("w", Value::from("hello")),
            (
                "x",
                Value::from([("y", Value::from("hello")), ("z", Value::from(["world!"]))]),
            ),
        ]);
        assert_eq!(v, exp);
    }
}
