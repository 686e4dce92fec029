use joyful::{
    apply_options, compile, joyful, validate, JoyfulError, LazySchema, ObjectLiteral, Outcome,
    SchemaBuilder, SchemaError, ValidationOptions,
};
use serde_json::json;

fn defaults() -> ValidationOptions {
    ValidationOptions::default()
}

#[test]
fn schema_instance_and_literal_both_validate() {
    let s = SchemaBuilder::new();
    let literal = ObjectLiteral::new().field("foo", s.string().required());
    let instance = s.object(literal.clone()).unwrap();

    for schema in [LazySchema::from(instance), LazySchema::from(literal)] {
        let outcome = joyful(&json!({"foo": "Foo!"}), &schema, &defaults()).unwrap();
        assert_eq!(outcome, Outcome::Valid);
    }
}

#[test]
fn factory_returning_schema_or_literal() {
    let returns_schema = LazySchema::factory(|s| {
        Ok(s.object(s.literal().field("foo", s.string().required()))?.into())
    });
    let returns_literal =
        LazySchema::factory(|s| Ok(s.literal().field("foo", s.string().required()).into()));

    for schema in [returns_schema, returns_literal] {
        assert_eq!(
            joyful(&json!({"foo": "Foo!"}), &schema, &defaults()).unwrap(),
            Outcome::Valid
        );
        assert!(matches!(
            joyful(&json!({}), &schema, &defaults()),
            Err(JoyfulError::Validation(_))
        ));
    }
}

#[test]
fn returned_text_equals_thrown_message() {
    let s = SchemaBuilder::new();
    let schema = LazySchema::from(
        ObjectLiteral::new()
            .field("name", s.string().required())
            .field("age", s.integer().min(0)),
    );
    let state = json!({"age": -1});

    let text = match joyful(&state, &schema, &defaults().with_throw(false)).unwrap() {
        Outcome::Invalid(text) => text,
        other => panic!("expected invalid outcome, got {other:?}"),
    };
    assert_eq!(text.split(", ").count(), 2);

    let thrown = joyful(&state, &schema, &defaults()).unwrap_err();
    assert_eq!(thrown.to_string(), text);
}

#[test]
fn sequence_matches_merged_literal() {
    let s = SchemaBuilder::new();
    let sequence = LazySchema::sequence([
        LazySchema::from(ObjectLiteral::new().field("a", s.string())),
        LazySchema::factory(|s| {
            Ok(s.literal()
                .field("a", s.number())
                .field("b", s.string())
                .into())
        }),
    ]);
    let merged = LazySchema::from(
        ObjectLiteral::new()
            .field("a", s.number())
            .field("b", s.string()),
    );

    for state in [
        json!({"a": 1}),
        json!({"a": "text"}),
        json!({"a": 2, "b": "x"}),
        json!({"b": 3}),
    ] {
        let lenient = defaults().with_throw(false);
        assert_eq!(
            joyful(&state, &sequence, &lenient).unwrap(),
            joyful(&state, &merged, &lenient).unwrap()
        );
    }
}

#[test]
fn sequence_with_schema_member_fails_composition() {
    let s = SchemaBuilder::new();
    let nested = s.object(ObjectLiteral::new().field("a", s.string())).unwrap();
    let schema = LazySchema::sequence([
        LazySchema::from(ObjectLiteral::new().field("b", s.string())),
        LazySchema::from(nested),
    ]);

    assert!(matches!(
        compile(&schema),
        Err(SchemaError::InvalidComposition(_))
    ));
}

#[test]
fn apply_options_trims_and_fills_defaults() {
    let s = SchemaBuilder::new();
    let schema = LazySchema::from(
        ObjectLiteral::new()
            .field("str", s.string().required())
            .field("num", s.number().default(123))
            .field("boolFalse", s.boolean().default(false))
            .field("boolTrue", s.boolean().default(true)),
    );

    let populated =
        apply_options(&json!({"str": "hello", "extra": "x"}), &schema, &defaults()).unwrap();
    assert_eq!(
        populated,
        json!({"str": "hello", "num": 123, "boolFalse": false, "boolTrue": true})
    );
}

#[test]
fn string_is_not_coerced_to_number() {
    let s = SchemaBuilder::new();
    let schema = LazySchema::from(ObjectLiteral::new().field("num", s.number()));

    assert!(validate(&json!({"num": 123}), &schema, &defaults()).is_ok());
    assert!(matches!(
        validate(&json!({"num": "123"}), &schema, &defaults()),
        Err(JoyfulError::Validation(_))
    ));
}

#[test]
fn nested_literals_validate_recursively() {
    let s = SchemaBuilder::new();
    let schema = LazySchema::from(
        ObjectLiteral::new()
            .field("id", s.integer().required())
            .field(
                "owner",
                ObjectLiteral::new()
                    .field("name", s.string().required())
                    .field("active", s.boolean().default(true)),
            ),
    );

    let populated = joyful(
        &json!({"id": 1, "owner": {"name": "ada"}}),
        &schema,
        &defaults().with_populate(true),
    )
    .unwrap();
    assert_eq!(
        populated,
        Outcome::Populated(json!({"id": 1, "owner": {"name": "ada", "active": true}}))
    );

    assert!(joyful(&json!({"id": 1, "owner": {}}), &schema, &defaults()).is_err());
}

#[test]
fn document_with_local_refs_works_as_a_field() {
    let s = SchemaBuilder::new();
    let count = s
        .document(json!({"$defs": {"p": {"type": "integer"}}, "$ref": "#/$defs/p"}))
        .unwrap();
    let schema = LazySchema::from(ObjectLiteral::new().field("n", count));

    assert_eq!(
        joyful(&json!({"n": 5}), &schema, &defaults()).unwrap(),
        Outcome::Valid
    );
    let err = joyful(&json!({"n": "x"}), &schema, &defaults()).unwrap_err();
    assert!(matches!(err, JoyfulError::Validation(_)));
    assert!(err.to_string().starts_with("/n: "));
}
