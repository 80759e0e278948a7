//! End-to-end dispatch through `#[runtime_class]` types, a `Registry` and `Callback`s.

use std::sync::Arc;
use std::thread;

use bayrell_rtl::prelude::*;
use bayrell_rtl::{CallbackConfig, DuplicatePolicy, InstanceValidation, RegistryConfig, Target};

#[derive(Debug)]
struct Greeter {
    greeting: String,
}

#[runtime_class]
impl Greeter {
    pub fn new(greeting: &str) -> Self {
        Greeter {
            greeting: greeting.to_string(),
        }
    }

    pub fn hello(name: &str) -> String {
        format!("Hello, {name}")
    }

    pub fn greet(&self, name: &str) -> String {
        format!("{}, {name}", self.greeting)
    }

    pub fn shout(&self, words: &[String]) -> String {
        words.join(" ").to_uppercase()
    }

    pub fn noop(&self) {}

    fn helper(&self) -> usize {
        self.greeting.len()
    }
}

#[derive(Debug)]
struct Math;

#[runtime_class(name = "Runtime\\Math")]
impl Math {
    pub fn add(a: i64, b: i64) -> i64 {
        a + b
    }

    pub fn scale(x: f64, factor: Option<f64>) -> f64 {
        x * factor.unwrap_or(1.0)
    }

    pub fn checked_div(a: i64, b: i64) -> DispatchResult<i64> {
        if b == 0 {
            return Err(DispatchError::raise("Division by zero"));
        }
        Ok(a / b)
    }
}

/// A plain value type whose name happens to end in `Result`.
#[derive(Debug)]
struct ParseResult {
    consumed: i64,
}

impl IntoValue for ParseResult {
    fn into_value(self) -> Value {
        Value::Int(self.consumed)
    }
}

#[derive(Debug)]
struct Parser;

#[runtime_class]
impl Parser {
    pub fn parse(input: &str) -> ParseResult {
        ParseResult {
            consumed: input.len() as i64,
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("bayrell_rtl=trace"))
        .with_test_writer()
        .try_init();
}

fn registry() -> Registry {
    init_tracing();
    let mut registry = Registry::new();
    registry.register_class::<Greeter>().unwrap();
    registry.register_class::<Math>().unwrap();
    registry
}

#[test]
fn hello_world_through_class_name() {
    let registry = registry();
    let hello = Callback::new(&registry, "Greeter", "hello").unwrap();
    assert_eq!(hello.invoke(["World"]), Ok(Value::from("Hello, World")));
    assert!(hello.is_class_target());
    assert_eq!(hello.to_string(), "Greeter::hello");
}

#[test]
fn unregistered_class_is_class_not_found() {
    let registry = registry();
    let err = Callback::new(&registry, "Nope", "hello").unwrap_err();
    assert_eq!(err, CallbackError::ClassNotFound { name: "Nope".into() });
    assert_eq!(err.kind_name(), "ClassNotFoundError");
}

#[test]
fn missing_method_on_class_is_method_not_found() {
    let registry = registry();
    let err = Callback::new(&registry, "Greeter", "missing").unwrap_err();
    assert_eq!(
        err,
        CallbackError::MethodNotFound {
            class: "Greeter".into(),
            method: "missing".into()
        }
    );
}

#[test]
fn private_helpers_are_not_methods() {
    let registry = registry();
    assert!(matches!(
        Callback::new(&registry, "Greeter", "helper"),
        Err(CallbackError::MethodNotFound { .. })
    ));
    assert_eq!(Greeter::new("x").helper(), 1);
}

#[test]
fn non_string_non_object_targets_are_invalid() {
    let registry = registry();
    for target in [Value::Null, Value::Int(42), Value::Vector(vec![]), Value::Bool(true)] {
        let err = Callback::new(&registry, target.clone(), "hello").unwrap_err();
        assert!(
            matches!(err, CallbackError::InvalidTarget { found } if found == target.kind()),
            "{target:?} gave {err:?}"
        );
    }
}

#[test]
fn instance_target_defers_method_check_to_invocation() {
    let registry = registry();
    let cb = Callback::new(&registry, Value::object(Greeter::new("Hi")), "missing").unwrap();
    assert!(!cb.is_class_target());

    let err = cb.invoke(Vec::<Value>::new()).unwrap_err();
    assert_eq!(err, DispatchError::undefined_method("Greeter", "missing"));
    assert_eq!(err.to_string(), "Call to undefined method Greeter::missing()");
}

#[test]
fn eager_policy_rejects_missing_instance_method() {
    let registry = registry();
    let config = CallbackConfig::new().with_instance_validation(InstanceValidation::Eager);

    let err = Callback::with_config(&registry, Value::object(Greeter::new("Hi")), "missing", &config).unwrap_err();
    assert!(matches!(err, CallbackError::MethodNotFound { ref class, .. } if class == "Greeter"));

    let ok = Callback::with_config(&registry, Value::object(Greeter::new("Hi")), "greet", &config).unwrap();
    assert_eq!(ok.invoke(["Ada"]), Ok(Value::from("Hi, Ada")));
}

#[test]
fn instance_methods_and_statics_through_an_object() {
    let object: ObjectRef = Arc::new(Greeter::new("Howdy"));

    let greet = Callback::for_instance(Arc::clone(&object), "greet").unwrap();
    assert_eq!(greet.invoke(["partner"]), Ok(Value::from("Howdy, partner")));
    assert_eq!(greet.to_string(), "Greeter->greet");

    let hello = Callback::for_instance(object, "hello").unwrap();
    assert_eq!(hello.invoke(["there"]), Ok(Value::from("Hello, there")));
}

#[test]
fn instance_method_through_class_is_non_static_call() {
    let registry = registry();
    let cb = Callback::new(&registry, "Greeter", "greet").unwrap();
    assert_eq!(
        cb.invoke(["x"]),
        Err(DispatchError::NonStaticCall {
            class: "Greeter".into(),
            method: "greet".into()
        })
    );
}

#[test]
fn factory_returns_an_object_usable_as_a_target() {
    let registry = registry();
    let make = Callback::new(&registry, "Greeter", "new").unwrap();
    let object = make.invoke(["Hey"]).unwrap();
    assert_eq!(object.type_name(), "object");
    assert_eq!(object.as_object().map(|o| o.class_name()), Some("Greeter"));

    let greet = Callback::new(&registry, object.clone(), "greet").unwrap();
    assert_eq!(greet.invoke(["you"]), Ok(Value::from("Hey, you")));
    match greet.target() {
        Target::Instance(target) => assert_eq!(Value::Object(Arc::clone(target)), object),
        other => panic!("expected instance target, got {other:?}"),
    }
}

#[test]
fn entry_points_agree() {
    let registry = registry();
    let add = Callback::new(&registry, "Runtime.Math", "add").unwrap();

    let spread = add.invoke([2i64, 3]);
    let sliced = add.invoke_args(&[Value::Int(2), Value::Int(3)]);
    let macro_call = invoke!(add, 2i64, 3i64);

    assert_eq!(spread, Ok(Value::Int(5)));
    assert_eq!(spread, sliced);
    assert_eq!(sliced, macro_call);
}

#[test]
fn repeated_invocations_are_independent() {
    let registry = registry();
    let hello = Callback::new(&registry, "Greeter", "hello").unwrap();
    for name in ["a", "b", "a"] {
        assert_eq!(hello.invoke([name]), Ok(Value::Str(format!("Hello, {name}"))));
    }
}

#[test]
fn namespaced_identifiers_resolve_in_both_forms() {
    let registry = registry();
    for spelling in ["Runtime.Math", "Runtime\\Math", "\\Runtime\\Math"] {
        let cb = Callback::new(&registry, spelling, "add").unwrap();
        assert_eq!(cb.class_name(), "Runtime.Math");
    }
    assert!(matches!(
        Callback::new(&registry, "Math", "add"),
        Err(CallbackError::ClassNotFound { .. })
    ));
}

#[test]
fn generated_methods_check_arity_and_types() {
    let registry = registry();
    let add = Callback::new(&registry, "Runtime.Math", "add").unwrap();

    assert_eq!(
        add.invoke([1i64]),
        Err(DispatchError::ArgumentCount {
            method: "add".into(),
            expected: 2,
            found: 1
        })
    );
    assert_eq!(
        invoke!(add, "one", 2i64),
        Err(DispatchError::ArgumentType {
            method: "add".into(),
            index: 1,
            expected: "int",
            found: "string"
        })
    );
}

#[test]
fn generated_methods_decode_options_floats_and_slices() {
    let registry = registry();
    let scale = Callback::new(&registry, "Runtime.Math", "scale").unwrap();
    assert_eq!(invoke!(scale, 2i64, Value::Null), Ok(Value::Float(2.0)));
    assert_eq!(invoke!(scale, 1.5, 2.0), Ok(Value::Float(3.0)));

    let shout = Callback::for_instance(Arc::new(Greeter::new("")), "shout").unwrap();
    assert_eq!(invoke!(shout, vec!["hi", "there"]), Ok(Value::from("HI THERE")));

    let noop = Callback::for_instance(Arc::new(Greeter::new("")), "noop").unwrap();
    assert_eq!(noop.invoke_args(&[]), Ok(Value::Null));
}

#[test]
fn method_errors_pass_through_unchanged() {
    let registry = registry();
    let div = Callback::new(&registry, "Runtime.Math", "checked_div").unwrap();
    assert_eq!(invoke!(div, 7i64, 2i64), Ok(Value::Int(3)));

    let err = invoke!(div, 1i64, 0i64).unwrap_err();
    assert_eq!(err, DispatchError::raise("Division by zero"));
    assert_eq!(err.kind_name(), "RuntimeException");
}

#[test]
fn empty_method_name_is_rejected_for_both_target_forms() {
    let registry = registry();
    assert_eq!(
        Callback::new(&registry, "Greeter", "").unwrap_err(),
        CallbackError::InvalidMethodName
    );
    assert_eq!(
        Callback::new(&registry, Value::object(Math), "  ").unwrap_err(),
        CallbackError::InvalidMethodName
    );
}

#[test]
fn callbacks_are_values() {
    let registry = registry();
    let hello = Callback::new(&registry, "Greeter", "hello").unwrap();
    let value = Value::from(hello.clone());
    assert_eq!(value.as_callback(), Some(&hello));
    assert!(matches!(
        Callback::new(&registry, value, "hello"),
        Err(CallbackError::InvalidTarget { .. })
    ));
}

#[test]
fn callbacks_are_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Callback>();
    assert_send_sync::<Registry>();
    assert_send_sync::<Value>();

    let registry = Arc::new(registry());
    let hello = Callback::new(&registry, "Greeter", "hello").unwrap();
    let greet = Callback::new(&registry, Value::object(Greeter::new("Yo")), "greet").unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let hello = hello.clone();
            let greet = greet.clone();
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let name = format!("t{i}");
                let add = Callback::new(&registry, "Runtime.Math", "add").unwrap();
                (
                    hello.invoke([name.as_str()]).unwrap(),
                    greet.invoke([name.as_str()]).unwrap(),
                    add.invoke([i as i64, 1]).unwrap(),
                )
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (hello, greet, sum) = handle.join().unwrap();
        assert_eq!(hello, Value::Str(format!("Hello, t{i}")));
        assert_eq!(greet, Value::Str(format!("Yo, t{i}")));
        assert_eq!(sum, Value::Int(i as i64 + 1));
    }
}

#[test]
fn result_named_return_types_are_plain_values() {
    let mut registry = registry();
    registry.register_class::<Parser>().unwrap();
    let parse = Callback::new(&registry, "Parser", "parse").unwrap();
    assert_eq!(parse.invoke(["abcd"]), Ok(Value::Int(4)));
}

#[test]
fn replace_policy_rebinds_new_callbacks_only() {
    init_tracing();
    let mut registry = Registry::with_config(RegistryConfig::new().with_on_duplicate(DuplicatePolicy::Replace));
    assert_eq!(registry.config().on_duplicate, DuplicatePolicy::Replace);

    registry.register_class::<Math>().unwrap();
    let old = Callback::new(&registry, "Runtime.Math", "add").unwrap();

    registry
        .register(
            ClassBuilder::new("Runtime.Math")
                .static_method("add", |_| Ok(Value::Int(0)))
                .build(),
        )
        .unwrap();
    let new = Callback::new(&registry, "Runtime.Math", "add").unwrap();

    assert_eq!(old.invoke([1i64, 2]), Ok(Value::Int(3)));
    assert_eq!(new.invoke([1i64, 2]), Ok(Value::Int(0)));
    assert_ne!(old, new);
    assert_eq!(registry.len(), 1);
}
