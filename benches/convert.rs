use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jsons2xsd::{Converter, ConverterConfig, WrappingMode};
use serde_json::{json, Map, Value};

fn wide_schema(properties: usize) -> Value {
    let mut map = Map::new();
    for i in 0..properties {
        let node = match i % 4 {
            0 => json!({"type": "string", "maxLength": 64}),
            1 => json!({"type": "integer", "minimum": 0}),
            2 => json!({"type": "array", "items": {"$ref": "#/definitions/Item"}}),
            _ => json!({"type": "object", "properties": {"value": {"type": "number"}}}),
        };
        map.insert(format!("field{}", i), node);
    }
    json!({
        "type": "object",
        "properties": map,
        "definitions": {
            "Item": {"type": "object", "properties": {"id": {"type": "string"}}}
        }
    })
}

fn bench_convert(c: &mut Criterion) {
    let converter = Converter::new(
        ConverterConfig::new("urn:example:bench", "Bench").with_wrapping(WrappingMode::Element),
    );
    let small = include_str!("../tests/fixtures/purchase_order.json");
    let wide = wide_schema(500).to_string();

    c.bench_function("convert purchase order", |b| {
        b.iter(|| converter.convert_to_string(black_box(small)).unwrap())
    });
    c.bench_function("convert 500 properties", |b| {
        b.iter(|| converter.convert_to_string(black_box(&wide)).unwrap())
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
