//! The `val!` literal macro.
//!
//! JSON-flavored construction for [`Value`](crate::Value): `null`,
//! `undefined`, nested arrays and records, trailing commas, parenthesized
//! expression keys, and arbitrary `Into<Value>` expressions.

/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// ```
/// use everyequal_value::{val, Value};
///
/// let user = val!({
///     "id": 7,
///     "tags": ["a", "b"],
///     "parent": null,
/// });
/// assert!(matches!(user, Value::Obj(_)));
/// ```
///
/// Record keys are string literals, or any `Into<Key>` expression in
/// parentheses (a minted [`Symbol`](crate::Symbol), for instance). Values
/// are any `Into<Value>` expression plus the `null` and `undefined`
/// keywords.
#[macro_export]
macro_rules! val {
    ($($tt:tt)+) => {
        $crate::val_internal!($($tt)+)
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! val_internal {
    //
    // Array muncher: accumulates elements into [$($elems,)*].
    //

    // Done with trailing comma.
    (@array [$($elems:expr,)*]) => {
        vec![$($elems,)*]
    };

    // Done without trailing comma.
    (@array [$($elems:expr),*]) => {
        vec![$($elems),*]
    };

    // Next element is `null`.
    (@array [$($elems:expr,)*] null $($rest:tt)*) => {
        $crate::val_internal!(@array [$($elems,)* $crate::val_internal!(null)] $($rest)*)
    };

    // Next element is `undefined`.
    (@array [$($elems:expr,)*] undefined $($rest:tt)*) => {
        $crate::val_internal!(@array [$($elems,)* $crate::val_internal!(undefined)] $($rest)*)
    };

    // Next element is an array.
    (@array [$($elems:expr,)*] [$($array:tt)*] $($rest:tt)*) => {
        $crate::val_internal!(@array [$($elems,)* $crate::val_internal!([$($array)*])] $($rest)*)
    };

    // Next element is a record.
    (@array [$($elems:expr,)*] {$($record:tt)*} $($rest:tt)*) => {
        $crate::val_internal!(@array [$($elems,)* $crate::val_internal!({$($record)*})] $($rest)*)
    };

    // Next element is an expression followed by a comma.
    (@array [$($elems:expr,)*] $next:expr, $($rest:tt)*) => {
        $crate::val_internal!(@array [$($elems,)* $crate::val_internal!($next),] $($rest)*)
    };

    // Last element is an expression with no trailing comma.
    (@array [$($elems:expr,)*] $last:expr) => {
        $crate::val_internal!(@array [$($elems,)* $crate::val_internal!($last)])
    };

    // Comma after an element.
    (@array [$($elems:expr),*] , $($rest:tt)*) => {
        $crate::val_internal!(@array [$($elems,)*] $($rest)*)
    };

    //
    // Record muncher: inserts key/value pairs into $record.
    //

    // Done.
    (@record $record:ident () () ()) => {};

    // Insert the current entry followed by a comma.
    (@record $record:ident [$($key:tt)+] ($value:expr) , $($rest:tt)*) => {
        $record.insert(($($key)+), $value);
        $crate::val_internal!(@record $record () ($($rest)*) ($($rest)*));
    };

    // Insert the last entry without a trailing comma.
    (@record $record:ident [$($key:tt)+] ($value:expr)) => {
        $record.insert(($($key)+), $value);
    };

    // Next value is `null`.
    (@record $record:ident ($($key:tt)+) (: null $($rest:tt)*) $copy:tt) => {
        $crate::val_internal!(@record $record [$($key)+] ($crate::val_internal!(null)) $($rest)*);
    };

    // Next value is `undefined`.
    (@record $record:ident ($($key:tt)+) (: undefined $($rest:tt)*) $copy:tt) => {
        $crate::val_internal!(@record $record [$($key)+] ($crate::val_internal!(undefined)) $($rest)*);
    };

    // Next value is an array.
    (@record $record:ident ($($key:tt)+) (: [$($array:tt)*] $($rest:tt)*) $copy:tt) => {
        $crate::val_internal!(@record $record [$($key)+] ($crate::val_internal!([$($array)*])) $($rest)*);
    };

    // Next value is a record.
    (@record $record:ident ($($key:tt)+) (: {$($inner:tt)*} $($rest:tt)*) $copy:tt) => {
        $crate::val_internal!(@record $record [$($key)+] ($crate::val_internal!({$($inner)*})) $($rest)*);
    };

    // Next value is an expression followed by a comma.
    (@record $record:ident ($($key:tt)+) (: $value:expr , $($rest:tt)*) $copy:tt) => {
        $crate::val_internal!(@record $record [$($key)+] ($crate::val_internal!($value)) , $($rest)*);
    };

    // Last value is an expression with no trailing comma.
    (@record $record:ident ($($key:tt)+) (: $value:expr) $copy:tt) => {
        $crate::val_internal!(@record $record [$($key)+] ($crate::val_internal!($value)));
    };

    // Missing value for the last entry: "unexpected end of macro invocation".
    (@record $record:ident ($($key:tt)+) (:) $copy:tt) => {
        $crate::val_internal!();
    };

    // Missing colon and value for the last entry.
    (@record $record:ident ($($key:tt)+) () $copy:tt) => {
        $crate::val_internal!();
    };

    // Misplaced colon: report it as unexpected.
    (@record $record:ident () (: $($rest:tt)*) ($colon:tt $($copy:tt)*)) => {
        $crate::val_unexpected!($colon);
    };

    // Comma inside a key: report it as unexpected.
    (@record $record:ident ($($key:tt)*) (, $($rest:tt)*) ($comma:tt $($copy:tt)*)) => {
        $crate::val_unexpected!($comma);
    };

    // Key is a parenthesized expression.
    (@record $record:ident () (($key:expr) : $($rest:tt)*) $copy:tt) => {
        $crate::val_internal!(@record $record ($key) (: $($rest)*) (: $($rest)*));
    };

    // Munch one key token.
    (@record $record:ident ($($key:tt)*) ($tt:tt $($rest:tt)*) $copy:tt) => {
        $crate::val_internal!(@record $record ($($key)* $tt) ($($rest)*) ($($rest)*));
    };

    //
    // Entry points.
    //

    (null) => {
        $crate::Value::Null
    };

    (undefined) => {
        $crate::Value::Undefined
    };

    ([]) => {
        $crate::Value::from(::std::vec::Vec::<$crate::Value>::new())
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Value::from($crate::val_internal!(@array [] $($tt)+))
    };

    ({}) => {
        $crate::Value::from($crate::Record::new())
    };

    ({ $($tt:tt)+ }) => {
        $crate::Value::from({
            let mut record = $crate::Record::new();
            $crate::val_internal!(@record record () ($($tt)+) ($($tt)+));
            record
        })
    };

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

// No rule matches any token, so forwarding one produces an error pointing at
// the offending fragment.
#[macro_export]
#[doc(hidden)]
macro_rules! val_unexpected {
    () => {};
}

#[cfg(test)]
mod tests {
    use crate::record::{Key, Symbol};
    use crate::value::Value;

    #[test]
    fn scalars() {
        assert!(matches!(val!(null), Value::Null));
        assert!(matches!(val!(undefined), Value::Undefined));
        assert!(matches!(val!(true), Value::Bool(true)));
        assert!(matches!(val!(3), Value::Number(n) if n == 3.0));
        assert!(matches!(val!(-2.5), Value::Number(n) if n == -2.5));
        assert!(matches!(val!("hi"), Value::Str(ref s) if s == "hi"));
    }

    #[test]
    fn arrays() {
        let empty = val!([]);
        let Value::Arr(cell) = &empty else {
            panic!("expected a sequence")
        };
        assert!(cell.borrow().is_empty());

        let arr = val!([1, null, "x", [2, 3], undefined,]);
        let Value::Arr(cell) = &arr else {
            panic!("expected a sequence")
        };
        let items = cell.borrow();
        assert_eq!(items.len(), 5);
        assert!(matches!(items[1], Value::Null));
        assert!(matches!(items[3], Value::Arr(_)));
        assert!(matches!(items[4], Value::Undefined));
    }

    #[test]
    fn records() {
        let empty = val!({});
        let Value::Obj(cell) = &empty else {
            panic!("expected a record")
        };
        assert!(cell.borrow().is_empty());

        let user = val!({
            "id": 7,
            "name": "ada",
            "tags": ["x", "y"],
            "extra": { "deep": null },
            "gone": undefined,
        });
        let Value::Obj(cell) = &user else {
            panic!("expected a record")
        };
        let record = cell.borrow();
        assert_eq!(record.len(), 5);
        let keys: Vec<&str> = record.keys().map(Key::as_text).collect();
        assert_eq!(keys, vec!["id", "name", "tags", "extra", "gone"]);
        assert!(matches!(
            record.get(&Key::from("extra")).unwrap().value,
            Value::Obj(_)
        ));
    }

    #[test]
    fn expression_keys_and_values() {
        let sym = Symbol::new("meta");
        let n = 4;
        let v = val!({ (sym.clone()): n + 1, "plain": n });
        let Value::Obj(cell) = &v else {
            panic!("expected a record")
        };
        let record = cell.borrow();
        let prop = record.get(&Key::from(sym)).unwrap();
        assert!(matches!(prop.value, Value::Number(x) if x == 5.0));
    }

    #[test]
    fn nested_values_pass_through() {
        let inner = val!([1, 2]);
        let outer = val!({ "wrapped": inner.clone() });
        let Value::Obj(cell) = &outer else {
            panic!("expected a record")
        };
        let record = cell.borrow();
        assert!(record
            .get(&Key::from("wrapped"))
            .unwrap()
            .value
            .ref_eq(&inner));
    }
}
