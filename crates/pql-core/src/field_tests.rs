use indoc::indoc;

use crate::field::{
    FieldKind, FieldModel, FieldType, array_of_strings, identifiable_string, long,
    nested_array_of_objects, object, string,
};

#[test]
fn builder_sets_flags() {
    let field = identifiable_string("_gene_id").aliases(&["id", "gene.id"]);

    assert_eq!(field.field_type(), FieldType::String);
    assert!(field.identifiable);
    assert!(!field.nested);
    assert_eq!(field.aliases, ["id", "gene.id"]);
}

#[test]
fn nested_array_wraps_anonymous_element() {
    let field = nested_array_of_objects("ssm", vec![long("start")]);

    assert!(field.nested);
    let FieldKind::Array(element) = &field.kind else {
        panic!("expected array, got {:?}", field.kind);
    };
    assert!(element.is_anonymous());
    assert_eq!(element.field_type(), FieldType::Object);
}

#[test]
fn compound_types() {
    assert!(FieldType::Array.is_compound());
    assert!(FieldType::Object.is_compound());
    assert!(!FieldType::Long.is_compound());
    assert!(!FieldType::String.is_compound());
}

#[test]
fn serializes_compactly() {
    let field = object("project", vec![array_of_strings("pubmed_ids").alias("pubmedIds")]);

    let json = serde_json::to_string_pretty(&field).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "name": "project",
      "type": "object",
      "fields": [
        {
          "name": "pubmed_ids",
          "type": "array",
          "aliases": [
            "pubmedIds"
          ],
          "element": {
            "name": "",
            "type": "string"
          }
        }
      ]
    }
    "#);
}

#[test]
fn deserializes_nested_array() {
    let json = indoc! {r#"
        {
          "name": "observation",
          "type": "array",
          "nested": true,
          "element": {
            "type": "object",
            "fields": [{ "name": "platform", "type": "string", "aliases": ["platform"] }]
          }
        }
    "#};

    let field: FieldModel = serde_json::from_str(json).unwrap();

    let expected = nested_array_of_objects("observation", vec![string("platform").alias("platform")]);
    assert_eq!(field, expected);
}

#[test]
fn array_without_element_is_rejected() {
    let json = r#"{ "name": "synonyms", "type": "array" }"#;

    let err = serde_json::from_str::<FieldModel>(json).unwrap_err();

    assert!(err.to_string().contains("array field `synonyms` has no element type"));
}
