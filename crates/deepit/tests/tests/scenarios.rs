//! End-to-end clone scenarios against the public entry points.

use chrono::{TimeZone, Utc};
use deepit_clone::{clone, strict_clone, CloneError, CloneOptions, DeepCloner, DepthAccounting};
use deepit_tests::{chain_len, init_tracing, nested, object, self_referencing, shared_pair};
use deepit_value::{deep_equal, Function, ObjectKind, ObjectRef, Property, Symbol, Value};

// ---------------------------------------------------------------------------
// Key exclusion
// ---------------------------------------------------------------------------

#[test]
fn skips_top_level_keys() {
    init_tracing();
    let user = Value::object([
        ("username", Value::from("gautam")),
        ("password", Value::from("secret")),
        ("token", Value::from("abc123")),
    ]);
    let options = CloneOptions::new().with_skip_keys(["password", "token"]);

    let copy = object(&clone(&user, Some(&options)).unwrap());
    assert!(deep_equal(
        &Value::Object(copy.clone()),
        &Value::object([("username", Value::from("gautam"))])
    ));
    assert!(!copy.has_own("password"));
    assert!(!copy.has_own("token"));
    assert_eq!(copy.own_keys().len(), 1);
}

#[test]
fn skipping_one_key_keeps_nested_structure() {
    init_tracing();
    let profile = Value::object([
        ("name", Value::from("Alice")),
        ("email", Value::from("alice@example.com")),
    ]);
    let source = Value::object([
        ("id", Value::from(1)),
        ("profile", profile.clone()),
        ("metadata", Value::object([("created", Value::from(true))])),
    ]);
    let options = CloneOptions::new().skip_key("metadata");

    let copy = object(&clone(&source, Some(&options)).unwrap());
    assert_eq!(copy.get("id").as_number(), Some(1.0));
    assert!(!copy.get("profile").strict_equals(&profile));
    assert!(deep_equal(&copy.get("profile"), &profile));
    assert!(!copy.has_own("metadata"));
}

#[test]
fn skip_keys_apply_at_every_depth() {
    init_tracing();
    let source = Value::object([(
        "a",
        Value::object([("secret", Value::from(1)), ("keep", Value::from(2))]),
    )]);
    let options = CloneOptions::new().skip_key("secret");

    let copy = object(&clone(&source, Some(&options)).unwrap());
    let inner = object(&copy.get("a"));
    assert!(!inner.has_own("secret"));
    assert_eq!(inner.get("keep").as_number(), Some(2.0));
}

#[test]
fn skip_keys_reach_objects_inside_arrays_and_maps() {
    init_tracing();
    let map = ObjectRef::map();
    map.map_set(
        Value::from("k"),
        Value::object([("secret", Value::from(1)), ("keep", Value::from(2))]),
    )
    .unwrap();
    let source = Value::array([
        Value::object([("secret", Value::from(3))]),
        Value::Object(map),
    ]);
    let options = CloneOptions::new().skip_key("secret");

    let copy = object(&clone(&source, Some(&options)).unwrap());
    assert!(!object(&copy.array_get(0).unwrap()).has_own("secret"));

    let map_copy = object(&copy.array_get(1).unwrap());
    let member = object(&map_copy.map_get(&Value::from("k")).unwrap().unwrap());
    assert!(!member.has_own("secret"));
    assert!(member.has_own("keep"));
}

#[test]
fn skipped_key_is_absent_rather_than_undefined() {
    init_tracing();
    let source = Value::object([("username", Value::from("u")), ("password", Value::from("p"))]);
    let options = CloneOptions::new().skip_key("password");

    let copy = object(&clone(&source, Some(&options)).unwrap());
    assert!(copy.get_own_property("password").is_none());
    assert!(copy.get("password").is_undefined());
}

#[test]
fn map_keys_are_not_subject_to_skip_keys() {
    init_tracing();
    let map = ObjectRef::map();
    map.map_set(Value::from("password"), Value::from("kept")).unwrap();
    let options = CloneOptions::new().skip_key("password");

    let copy = object(&clone(&Value::Object(map), Some(&options)).unwrap());
    assert_eq!(
        copy.map_get(&Value::from("password")).unwrap().unwrap().as_str(),
        Some("kept")
    );
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[test]
fn circular_reference_survives_key_exclusion() {
    init_tracing();
    let source = self_referencing(&[("removeMe", Value::from(true))]);
    let options = CloneOptions::new().skip_key("removeMe");

    let copy = object(&clone(&Value::Object(source), Some(&options)).unwrap());
    assert!(!copy.has_own("removeMe"));
    assert!(object(&copy.get("self")).ptr_eq(&copy));
}

#[test]
fn handles_circular_references() {
    init_tracing();
    let source = self_referencing(&[]);
    let copy = object(&clone(&Value::Object(source.clone()), None).unwrap());
    assert!(!copy.ptr_eq(&source));
    assert!(object(&copy.get("self")).ptr_eq(&copy));
    assert_eq!(copy.get("x").as_number(), Some(1.0));
}

#[test]
fn shared_references_stay_shared() {
    init_tracing();
    let (root, shared) = shared_pair();
    let copy = object(&clone(&root, None).unwrap());

    let p = object(&copy.get("p"));
    let q = object(&copy.get("q"));
    assert!(p.ptr_eq(&q));
    assert!(!p.ptr_eq(&shared));
}

#[test]
fn mutual_cycle_through_array() {
    init_tracing();
    let list = ObjectRef::array(Vec::new());
    let holder = ObjectRef::from_entries([("list", Value::Object(list.clone()))]);
    list.array_push(Value::Object(holder.clone())).unwrap();

    let copy = object(&clone(&Value::Object(holder), None).unwrap());
    let list_copy = object(&copy.get("list"));
    assert!(object(&list_copy.array_get(0).unwrap()).ptr_eq(&copy));
}

#[test]
fn keeps_function_references() {
    init_tracing();
    let hello = Function::new("hello", |_, _| Value::from("hi"));
    let source = Value::object([("fn", Value::from(hello.clone()))]);

    let copy = object(&clone(&source, None).unwrap());
    let copied = copy.get("fn");
    assert!(copied.as_function().unwrap().ptr_eq(&hello));
    assert_eq!(
        copied.as_function().unwrap().call(&Value::Undefined, &[]).as_str(),
        Some("hi")
    );
}

#[test]
fn clones_objects_independently() {
    init_tracing();
    let source = Value::object([
        ("a", Value::from(1)),
        ("b", Value::object([("c", Value::from(2))])),
    ]);
    let copy = clone(&source, None).unwrap();

    assert!(!copy.strict_equals(&source));
    assert!(!object(&copy).get("b").strict_equals(&object(&source).get("b")));
    assert!(deep_equal(&copy, &source));

    // Writes to the copy never reach the source.
    object(&object(&copy).get("b")).set("c", 99).unwrap();
    assert_eq!(object(&object(&source).get("b")).get("c").as_number(), Some(2.0));
}

#[test]
fn primitives_pass_through() {
    init_tracing();
    let sym = Symbol::new("tag");
    for value in [
        Value::Undefined,
        Value::Null,
        Value::from(true),
        Value::from(f64::NAN),
        Value::from("text"),
        Value::from(sym),
    ] {
        let copy = clone(&value, None).unwrap();
        assert!(copy.same_value_zero(&value));
    }
}

// ---------------------------------------------------------------------------
// Built-ins
// ---------------------------------------------------------------------------

#[test]
fn clones_date_regexp_map_set() {
    init_tracing();
    let map = ObjectRef::map();
    map.map_set(Value::from(1), Value::object([("x", Value::from(1))]))
        .unwrap();
    let set = ObjectRef::new_set();
    set.set_add(Value::object([("y", Value::from(2))])).unwrap();

    let source = ObjectRef::from_entries([
        (
            "d",
            Value::Object(ObjectRef::date(
                Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
            )),
        ),
        ("r", Value::Object(ObjectRef::regexp("abc", "i").unwrap())),
        ("m", Value::Object(map.clone())),
        ("s", Value::Object(set.clone())),
    ]);
    let copy = object(&clone(&Value::Object(source.clone()), None).unwrap());

    let (d, d_copy) = (object(&source.get("d")), object(&copy.get("d")));
    assert!(!d.ptr_eq(&d_copy));
    assert_eq!(d.get_time().unwrap(), d_copy.get_time().unwrap());

    let r = object(&source.get("r")).regexp_data().unwrap();
    let r_copy = object(&copy.get("r")).regexp_data().unwrap();
    assert_eq!(r.source(), r_copy.source());
    assert_eq!(r.flags(), r_copy.flags());

    let m_copy = object(&copy.get("m"));
    let entry = map.map_get(&Value::from(1)).unwrap().unwrap();
    let entry_copy = m_copy.map_get(&Value::from(1)).unwrap().unwrap();
    assert!(!entry.strict_equals(&entry_copy));
    assert!(deep_equal(&entry, &entry_copy));

    let s_copy = object(&copy.get("s"));
    let original = &set.set_values().unwrap()[0];
    let member = &s_copy.set_values().unwrap()[0];
    assert!(!original.strict_equals(member));
    assert!(deep_equal(original, member));
}

#[test]
fn error_copy_keeps_prototype_and_message() {
    init_tracing();
    let proto = ObjectRef::from_entries([("name", Value::from("TypeError"))]);
    let error = ObjectRef::error(Some(proto.clone()), "bad input");
    error.set("code", "E_BAD").unwrap();

    let copy = object(&clone(&Value::Object(error.clone()), None).unwrap());
    assert!(!copy.ptr_eq(&error));
    assert_eq!(copy.tag(), error.tag());
    assert_eq!(copy.prototype(), Some(proto));
    assert_eq!(copy.get("message").as_str(), Some("bad input"));
    assert!(!copy.has_own("code"));
}

#[test]
fn same_error_reached_twice_yields_two_copies() {
    init_tracing();
    let error = Value::Object(ObjectRef::error(None, "once"));
    let source = Value::array([error.clone(), error]);

    let copy = object(&clone(&source, None).unwrap());
    assert!(!copy
        .array_get(0)
        .unwrap()
        .strict_equals(&copy.array_get(1).unwrap()));
}

#[test]
fn accessor_closure_state_is_shared() {
    init_tracing();
    let store = ObjectRef::from_entries([("v", Value::from(0))]);
    let getter_store = store.clone();
    let setter_store = store.clone();
    let getter = Function::new("get value", move |_, _| getter_store.get("v"));
    let setter = Function::new("set value", move |_, args| {
        let next = args.first().cloned().unwrap_or_default();
        let _ = setter_store.set("v", next);
        Value::Undefined
    });

    let source = ObjectRef::plain();
    source
        .define_property("value", Property::accessor(Some(getter), Some(setter)))
        .unwrap();

    let copy = object(&clone(&Value::Object(source.clone()), None).unwrap());
    copy.set("value", 42).unwrap();
    assert_eq!(source.get("value").as_number(), Some(42.0));
}

#[test]
fn non_enumerable_and_symbol_keys_are_kept() {
    init_tracing();
    let sym = Symbol::new("id");
    let source = ObjectRef::plain();
    source
        .define_property("internal", Property::hidden(Value::from("x")))
        .unwrap();
    source.set(sym.clone(), 7).unwrap();

    let copy = object(&clone(&Value::Object(source), None).unwrap());
    assert!(!copy.get_own_property("internal").unwrap().is_enumerable());
    assert_eq!(copy.get(sym).as_number(), Some(7.0));
}

#[test]
fn class_instances_keep_their_prototype() {
    init_tracing();
    let class_proto = ObjectRef::plain();
    let instance = ObjectRef::new(Some(class_proto.clone()), ObjectKind::Ordinary);
    instance.set("field", 1).unwrap();

    let copy = object(&clone(&Value::Object(instance), None).unwrap());
    assert_eq!(copy.prototype(), Some(class_proto));
}

// ---------------------------------------------------------------------------
// Depth
// ---------------------------------------------------------------------------

#[test]
fn max_depth_zero_rejects_nested_and_accepts_flat() {
    init_tracing();
    let options = CloneOptions::new().with_max_depth(0);

    let nested = Value::object([("a", Value::object([("b", Value::from(1))]))]);
    let err = clone(&nested, Some(&options)).unwrap_err();
    assert_eq!(
        err,
        CloneError::DepthExceeded {
            depth: 1,
            max_depth: 0
        }
    );

    let flat = Value::object([("a", Value::from(1))]);
    assert!(clone(&flat, Some(&options)).is_ok());
}

#[test]
fn depth_error_aborts_the_whole_call() {
    init_tracing();
    let options = CloneOptions::new().with_max_depth(3);
    let too_deep = nested(6);
    assert!(clone(&too_deep, Some(&options)).is_err());
    assert!(strict_clone(&too_deep, Some(&options)).is_err());

    let copy = clone(&nested(4), Some(&options)).unwrap();
    assert_eq!(chain_len(&copy), 4);
}

#[test]
fn legacy_accounting_resets_depth_inside_maps() {
    init_tracing();
    let map = ObjectRef::map();
    map.map_set(Value::from("deep"), nested(3)).unwrap();
    let root = Value::object([("m", Value::Object(map))]);

    let legacy = CloneOptions::new().with_max_depth(2);
    assert!(clone(&root, Some(&legacy)).is_ok());

    let uniform = legacy.with_depth_accounting(DepthAccounting::Uniform);
    assert!(clone(&root, Some(&uniform))
        .unwrap_err()
        .is_depth_exceeded());
}

#[test]
fn report_counts_work_done() {
    init_tracing();
    let (root, _) = shared_pair();
    let root_obj = object(&root);
    root_obj.set("secret", 1).unwrap();
    root_obj
        .set("when", Value::Object(ObjectRef::date_from_millis(0.0)))
        .unwrap();

    let cloner = DeepCloner::new(CloneOptions::new().skip_key("secret"));
    let (_, report) = cloner.clone_with_report(&root).unwrap();
    assert_eq!(report.composites_cloned, 2);
    assert_eq!(report.leaves_copied, 1);
    assert_eq!(report.shared_hits, 1);
    assert_eq!(report.keys_skipped, 1);
    assert_eq!(report.deepest, 1);
}
