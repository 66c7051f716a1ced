use stromme::{value, Engine, Value};

#[test]
fn value_none() {
    assert_eq!(value!(None), Value::None);
}

#[test]
fn value_scalars() {
    assert_eq!(value!(true), Value::Bool(true));
    assert_eq!(value!(42), Value::Integer(42));
    assert_eq!(value!(1.5), Value::Float(1.5));
    assert_eq!(value!("hello"), Value::String(String::from("hello")));
    assert_eq!(
        value!(String::from("hello")),
        Value::String(String::from("hello"))
    );
}

#[test]
fn value_list() {
    assert_eq!(value!([]), Value::List(vec![]));
    assert_eq!(
        value!([1, "two", None]),
        Value::List(vec![
            Value::Integer(1),
            Value::String(String::from("two")),
            Value::None,
        ])
    );
    // Trailing comma.
    assert_eq!(value!([1, 2,]), value!([1, 2]));
}

#[test]
fn value_map() {
    assert_eq!(value!({}), Value::Map(stromme::Map::new()));

    let value = value! {
        a: 1,
        b: "two",
    };
    let mut map = stromme::Map::new();
    map.insert(String::from("a"), Value::Integer(1));
    map.insert(String::from("b"), Value::String(String::from("two")));
    assert_eq!(value, Value::Map(map));
}

#[test]
fn value_nested() {
    let value = value! {
        user: {
            name: "bob",
            tags: ["a", "b"],
        },
    };
    match value {
        Value::Map(map) => match map.get("user") {
            Some(Value::Map(user)) => {
                assert_eq!(user.get("name"), Some(&value!("bob")));
                assert_eq!(user.get("tags"), Some(&value!(["a", "b"])));
            }
            _ => panic!("expected map"),
        },
        _ => panic!("expected map"),
    }
}

#[test]
fn value_brace_delimiters() {
    // The macro braces double as the map braces.
    assert_eq!(value! {}, value!({}));
    assert_eq!(value! { a: 1 }, value!({ a: 1 }));
    assert_eq!(
        value! { a: 1, b: [2], c: { d: None } },
        value!({ a: 1, b: [2], c: { d: None } })
    );
}

#[test]
fn value_expression() {
    let n = 2 + 2;
    assert_eq!(value!(n), Value::Integer(4));
}

#[test]
fn value_mixin() {
    let engine = Engine::new();
    let mixin = engine.template("body").compile_to_mixin();
    assert_eq!(value!(mixin.clone()), Value::Mixin(mixin));
}
