//! End-to-end translation tests.

use jsexpr::{
    AnnotationTable, BinaryOp, ContextAnnotation, Expr, JavascriptExpression, Lambda, MemberRef,
    MethodRef, RuntimeValue, StructuredValue, TranslateError, TranslatorConfig, TypeRef,
    ValueType,
};

fn person() -> TypeRef {
    TypeRef::new("Person")
}

fn prop(name: &str) -> Expr {
    Expr::property(Expr::param("p"), &person(), name)
}

/// A closure object holding `fields`, as a front-end lowers captured locals.
fn closure(fields: &[(&str, RuntimeValue)]) -> StructuredValue {
    fields
        .iter()
        .fold(StructuredValue::new(TypeRef::new("Closure")), |c, (name, value)| {
            c.with_field(*name, value.clone())
        })
}

fn captured(value: StructuredValue, field: &str) -> Expr {
    let ty = value.ty.clone();
    Expr::member(Expr::constant(value), MemberRef::field(ty, field))
}

fn compile(lambda: Lambda) -> String {
    JavascriptExpression::new(lambda).compile().unwrap()
}

fn compile_inline(lambda: Lambda) -> String {
    JavascriptExpression::new(lambda).inline(true).compile().unwrap()
}

#[test]
fn test_identity() {
    insta::assert_snapshot!(compile(Lambda::unary("x", Expr::param("x"))), @"function (x){return (x);}");
}

#[test]
fn test_inline_property_path() {
    insta::assert_snapshot!(compile_inline(Lambda::unary("p", prop("Name"))), @"Name");

    let address = TypeRef::new("Address");
    let city = Expr::property(prop("Address"), &address, "City");
    insta::assert_snapshot!(compile_inline(Lambda::unary("p", city)), @"Address.City");
}

#[test]
fn test_captured_local() {
    let n = closure(&[("n", 5.into())]);
    insta::assert_snapshot!(
        compile(Lambda::unary("p", captured(n, "n"))),
        @"function (p){return (5);}"
    );
}

#[test]
fn test_captured_string_in_comparison() {
    let c = closure(&[("name", "Ada".into())]);
    let body = Expr::binary(prop("Name"), BinaryOp::Equal, captured(c, "name"));
    insta::assert_snapshot!(compile_inline(Lambda::unary("p", body)), @r#"Name=="Ada""#);
}

#[test]
fn test_conditional_without_else() {
    let test = Expr::binary(prop("X"), BinaryOp::GreaterThan, Expr::constant(0));
    let lambda = Lambda::unary("p", Expr::conditional(test, Expr::constant(1), None));
    insta::assert_snapshot!(compile_inline(lambda.clone()), @"((X>0)?(1))");
    insta::assert_snapshot!(compile(lambda), @"function (p){return (((p.X>0)?(1)));}");
}

#[test]
fn test_structured_constant() {
    let pair = StructuredValue::new(TypeRef::new("Pair"))
        .with_property("A", 1)
        .with_property("B", "x");
    insta::assert_snapshot!(
        compile(Lambda::unary("p", Expr::constant(pair.clone()))),
        @r#"function (p){return ({A:1,B:"x"});}"#
    );

    // A captured member holding a structured value is not rendered.
    let c = closure(&[("pair", pair.into())]);
    let err = JavascriptExpression::new(Lambda::unary("p", captured(c, "pair")))
        .compile()
        .unwrap_err();
    assert_eq!(err, TranslateError::UnsupportedValueKind("structured"));
}

#[test]
fn test_string_quote_gap() {
    insta::assert_snapshot!(
        compile(Lambda::unary("p", Expr::constant("a\"b"))),
        @r#"function (p){return ("a"b");}"#
    );
}

#[test]
fn test_coalesce() {
    let body = Expr::binary(prop("Nick"), BinaryOp::Coalesce, prop("Name"));
    insta::assert_snapshot!(compile_inline(Lambda::unary("p", body)), @"(!(Nick))?(Name):(Nick)");
}

#[test]
fn test_power_renders_as_xor() {
    let body = Expr::binary(prop("X"), BinaryOp::Power, Expr::constant(2));
    insta::assert_snapshot!(compile_inline(Lambda::unary("p", body)), @"X^2");
}

#[test]
fn test_converted_constant() {
    let body = Expr::binary(
        prop("Score"),
        BinaryOp::Multiply,
        Expr::convert(Expr::constant(2), ValueType::Float),
    );
    insta::assert_snapshot!(compile_inline(Lambda::unary("p", body)), @"Score*2");
}

#[test]
fn test_hook_with_simple_member() {
    let expression = JavascriptExpression::new(Lambda::unary("p", prop("Name")))
        .inline(true)
        .with_member_replacement(|member: &MemberRef, simple: bool| {
            if simple {
                format!("$data.{}", member.name.to_lowercase())
            } else {
                member.name.to_lowercase()
            }
        });
    insta::assert_snapshot!(expression.compile().unwrap(), @"$data.name");
}

#[test]
fn test_annotations_from_toml() {
    let config = TranslatorConfig::from_toml(
        r#"
        [annotations.types]
        Page = "this"

        [annotations.members]
        "Globals.Culture" = "global"

        [annotations.methods]
        "Helpers.format" = "global"
        "#,
    )
    .unwrap();

    let page = StructuredValue::new(TypeRef::new("Page")).with_property("Title", "Home");
    let globals = StructuredValue::new(TypeRef::new("Globals")).with_property("Culture", "en");
    let format = MethodRef::new(TypeRef::new("Helpers"), "format");

    let body = Expr::call(
        None,
        format,
        vec![
            Expr::member(
                Expr::constant(page),
                MemberRef::property(TypeRef::new("Page"), "Title"),
            ),
            Expr::member(
                Expr::constant(globals),
                MemberRef::property(TypeRef::new("Globals"), "Culture"),
            ),
            prop("Name"),
        ],
    );
    let js = JavascriptExpression::new(Lambda::unary("p", body))
        .with_config(&config)
        .compile()
        .unwrap();
    insta::assert_snapshot!(js, @"function (p){return (format(this.Title,Culture,p.Name));}");
}

#[test]
fn test_annotation_table_builder_matches_toml() {
    let from_toml = TranslatorConfig::from_toml(
        r#"
        [annotations.types]
        Page = "this"
        "#,
    )
    .unwrap();
    let built = AnnotationTable::new().annotate_type(&TypeRef::new("Page"), ContextAnnotation::This);
    assert_eq!(from_toml.annotations, built);
}

#[test]
fn test_unsupported_node() {
    let body = Expr::Lambda(Box::new(Lambda::unary("q", Expr::param("q"))));
    let err = JavascriptExpression::new(Lambda::unary("p", body))
        .compile()
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"expression kind `lambda` is not supported");
}

#[test]
fn test_json_fixture() {
    let source = include_str!("fixtures/adult_name.json");
    let lambda: Lambda = serde_json::from_str(source).unwrap();
    insta::assert_snapshot!(
        compile(lambda),
        @"function (p){return (((p.Age>=18)?(p.Name):(null)));}"
    );
}

#[test]
fn test_lambda_json_shape() {
    insta::assert_json_snapshot!(Lambda::unary("x", Expr::param("x")), @r#"
    {
      "params": [
        "x"
      ],
      "body": {
        "parameter": "x"
      }
    }
    "#);
}
