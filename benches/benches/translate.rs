//! Translation throughput for function and inline output.

use criterion::{Criterion, criterion_group, criterion_main};
use jsexpr::{
    BinaryOp, Expr, JavascriptExpression, Lambda, MemberRef, StructuredValue, TypeRef,
};
use std::hint::black_box;

fn predicate() -> Lambda {
    let person = TypeRef::new("Person");
    let closure = StructuredValue::new(TypeRef::new("Closure")).with_field("limit", 18);
    let limit = Expr::member(
        Expr::constant(closure),
        MemberRef::field(TypeRef::new("Closure"), "limit"),
    );
    let age = Expr::property(Expr::param("p"), &person, "Age");
    let name = Expr::property(Expr::param("p"), &person, "Name");
    Lambda::unary(
        "p",
        Expr::conditional(
            Expr::binary(age, BinaryOp::GreaterThanOrEqual, limit),
            name,
            Some(Expr::constant(jsexpr::RuntimeValue::Null)),
        ),
    )
}

/// A left-leaning sum `p.V0+p.V1+...` of `width` terms.
fn wide_sum(width: usize) -> Lambda {
    let ty = TypeRef::new("Row");
    let body = (1..width).fold(Expr::property(Expr::param("p"), &ty, "V0"), |acc, i| {
        Expr::binary(
            acc,
            BinaryOp::Add,
            Expr::property(Expr::param("p"), &ty, format!("V{i}")),
        )
    });
    Lambda::unary("p", body)
}

fn translate_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");

    let function = JavascriptExpression::new(predicate());
    group.bench_function("function_predicate", |b| {
        b.iter(|| black_box(function.compile()).map(|js| js.len()))
    });

    let inline = JavascriptExpression::new(predicate()).inline(true);
    group.bench_function("inline_predicate", |b| {
        b.iter(|| black_box(inline.compile()).map(|js| js.len()))
    });

    let hooked = JavascriptExpression::new(wide_sum(64))
        .inline(true)
        .with_member_replacement(|member: &MemberRef, _simple: bool| member.name.to_lowercase());
    group.bench_function("inline_sum_64_hooked", |b| {
        b.iter(|| black_box(hooked.compile()).map(|js| js.len()))
    });

    group.finish();
}

fn deserialize_benchmarks(c: &mut Criterion) {
    let source = serde_json::to_string(&predicate()).unwrap_or_default();
    c.bench_function("deserialize/predicate", |b| {
        b.iter(|| {
            let lambda: Lambda = serde_json::from_str(black_box(&source)).unwrap();
            black_box(JavascriptExpression::new(lambda).compile())
        })
    });
}

criterion_group!(benches, translate_benchmarks, deserialize_benchmarks);
criterion_main!(benches);
